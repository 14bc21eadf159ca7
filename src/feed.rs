//! Feed loading and schema normalization.
//!
//! The feed has drifted over time (`document` vs `documents`, three spellings
//! of the doc-package flag, tags as a list or a comma-joined string). All of
//! that is absorbed here so the rest of the crate sees one `PackageRecord`
//! shape. A malformed record never fails the whole feed: missing or oddly
//! typed fields collapse to empty values.
use crate::record::PackageRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::{Duration, Instant};
use thiserror::Error;

static TAG_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("tag separator regex"));

const DOC_PACKAGE_KEYS: [&str; 3] = ["has_doc_package", "has_docpackage", "has_docpkg"];
const DOCUMENT_KEYS: [&str; 2] = ["documents", "document"];

/// Errors raised while obtaining the feed. Individual records never error.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("fetch feed {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("read feed {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse feed: {0}")]
    Parse(String),
}

/// Where the feed lives. HTTP(S) URLs are fetched, anything else is a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    Path(PathBuf),
}

impl FeedSource {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            FeedSource::Url(trimmed.to_string())
        } else {
            FeedSource::Path(PathBuf::from(trimmed))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            FeedSource::Url(url) => url.clone(),
            FeedSource::Path(path) => path.display().to_string(),
        }
    }
}

/// Fetch and parse the feed in one step.
pub fn load_feed(source: &FeedSource, timeout: Duration) -> Result<Vec<PackageRecord>, FeedError> {
    let start = Instant::now();
    let text = fetch_feed(source, timeout)?;
    let records = parse_feed(&text)?;
    tracing::info!(
        source = %source.describe(),
        records = records.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "feed loaded"
    );
    Ok(records)
}

/// Retrieve the raw feed text. Single request, no retries.
pub fn fetch_feed(source: &FeedSource, timeout: Duration) -> Result<String, FeedError> {
    match source {
        FeedSource::Url(url) => {
            let config = ureq::Agent::config_builder()
                .timeout_global(Some(timeout))
                .build();
            let agent: ureq::Agent = config.into();
            let fetch_err = |source: ureq::Error| FeedError::Fetch {
                url: url.clone(),
                source: Box::new(source),
            };
            let mut response = agent.get(url.as_str()).call().map_err(fetch_err)?;
            response.body_mut().read_to_string().map_err(fetch_err)
        }
        FeedSource::Path(path) => std::fs::read_to_string(path).map_err(|source| FeedError::Read {
            path: path.clone(),
            source,
        }),
    }
}

/// Parse feed text: either a bare array or a `{ "data": [...] }` envelope.
pub fn parse_feed(text: &str) -> Result<Vec<PackageRecord>, FeedError> {
    let root: Value =
        serde_json::from_str(text).map_err(|err| FeedError::Parse(err.to_string()))?;
    let entries = match root {
        Value::Array(entries) => entries,
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(FeedError::Parse(
                    "expected an array or an object with a \"data\" array".to_string(),
                ))
            }
        },
        _ => {
            return Err(FeedError::Parse(
                "expected an array or an object with a \"data\" array".to_string(),
            ))
        }
    };

    let mut seen = BTreeSet::new();
    let mut records = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let Some(record) = record_from_value(entry) else {
            tracing::warn!(index = idx, "skipping feed entry without a name");
            continue;
        };
        if !seen.insert(record.name.clone()) {
            tracing::warn!(index = idx, name = %record.name, "skipping duplicate package");
            continue;
        }
        records.push(record);
    }
    Ok(records)
}

/// Normalize one feed entry. Returns `None` when the entry has no usable name.
pub fn record_from_value(value: &Value) -> Option<PackageRecord> {
    let obj = value.as_object()?;
    let name = text_field(obj, "name");
    if name.is_empty() {
        return None;
    }

    let mut documents = Vec::new();
    for key in DOCUMENT_KEYS {
        for doc in list_field(obj, key) {
            if !documents.contains(&doc) {
                documents.push(doc);
            }
        }
    }

    Some(PackageRecord {
        name,
        synopsis: text_field(obj, "synopsis"),
        description: text_field(obj, "description"),
        maintainer: text_field(obj, "maintainer"),
        license: text_field(obj, "license"),
        homepage: text_field(obj, "homepage"),
        dependencies: text_field(obj, "dependencies"),
        latest_version: text_field(obj, "latest_version"),
        kind: text_field(obj, "type"),
        last_update: obj.get("last_update").and_then(timestamp_value),
        tags: list_field(obj, "tags"),
        fonts: list_field(obj, "fonts"),
        documents,
        has_doc_package: DOC_PACKAGE_KEYS
            .iter()
            .any(|key| obj.get(*key).is_some_and(flag_value)),
    })
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(num)) => num.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(scalar_text)
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

fn list_field(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(scalar_text)
            .filter(|item| !item.trim().is_empty())
            .collect(),
        Some(Value::String(joined)) => split_tags(joined),
        _ => Vec::new(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(num) => Some(num.to_string()),
        _ => None,
    }
}

/// Split a comma-joined list, trimming around separators and dropping blanks.
pub fn split_tags(joined: &str) -> Vec<String> {
    TAG_SEPARATOR
        .split(joined.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn flag_value(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(num) => num.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(text.trim(), "true" | "yes" | "1"),
        _ => false,
    }
}

fn timestamp_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(num) => {
            if let Some(secs) = num.as_i64() {
                return DateTime::from_timestamp(secs, 0);
            }
            let secs = num.as_f64()?;
            if !secs.is_finite() {
                return None;
            }
            let whole = secs.floor();
            let nanos = ((secs - whole) * 1e9) as u32;
            DateTime::from_timestamp(whole as i64, nanos)
        }
        Value::String(text) => parse_timestamp(text),
        _ => None,
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (as UTC), a bare date, or Unix seconds.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    text.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
