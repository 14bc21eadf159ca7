//! Table interaction controller.
//!
//! Owns the grid, the clipboard, the loaded records, and the per-row
//! expansion state. UI events come in through `handle`; the controller turns
//! them into grid calls and `render_detail` calls. Nothing here is global:
//! one controller drives one table.
use crate::feed::{load_feed, FeedError, FeedSource};
use crate::grid::{grid_rows, Grid};
use crate::record::PackageRecord;
use crate::render::{
    render_detail, ComrakMarkdown, CopyTarget, InstallCommand, MarkdownRenderer, RenderContext,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Whether more than one detail panel may be open at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionMode {
    #[default]
    Single,
    Multiple,
}

impl ExpansionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpansionMode::Single => "single",
            ExpansionMode::Multiple => "multiple",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowState {
    Collapsed,
    Expanded,
}

/// User input the controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    RowClicked(String),
    TagClicked(String),
    NavClicked(String),
    CopyClicked(String),
    Reload,
}

/// Copies text to the system clipboard.
pub trait Clipboard {
    fn copy(&mut self, text: &str);
}

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) {
        self.contents = Some(text.to_string());
    }
}

/// Nav keywords with a curated query; any other label is searched literally.
pub const RESERVED_LABELS: [(&str, &str); 3] = [("all", ""), ("class", "class-"), ("font", "fonts-")];

/// Map a tag or nav label to the grid query. Badge clicks and the curated
/// nav buttons both go through here.
pub fn search_query_for(label: &str) -> String {
    RESERVED_LABELS
        .iter()
        .find(|(reserved, _)| *reserved == label)
        .map(|(_, query)| query.to_string())
        .unwrap_or_else(|| label.to_string())
}

pub struct ControllerSettings {
    pub install: InstallCommand,
    pub expansion: ExpansionMode,
    pub markdown: Box<dyn MarkdownRenderer>,
    /// Reference instant for relative "N days ago" annotations.
    pub now: Option<DateTime<Utc>>,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        ControllerSettings {
            install: InstallCommand::default(),
            expansion: ExpansionMode::default(),
            markdown: Box::new(ComrakMarkdown),
            now: None,
        }
    }
}

/// Observable table state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSnapshot {
    pub records: usize,
    pub query: String,
    pub visible: Vec<String>,
    pub expanded: Vec<String>,
    pub notice: Option<String>,
}

pub struct TableController<G: Grid, C: Clipboard> {
    grid: G,
    clipboard: C,
    settings: ControllerSettings,
    records: BTreeMap<String, PackageRecord>,
    expanded: BTreeMap<String, Option<CopyTarget>>,
    query: String,
    notice: Option<String>,
    feed: Option<(FeedSource, Duration)>,
}

impl<G: Grid, C: Clipboard> TableController<G, C> {
    pub fn new(grid: G, clipboard: C, settings: ControllerSettings) -> Self {
        TableController {
            grid,
            clipboard,
            settings,
            records: BTreeMap::new(),
            expanded: BTreeMap::new(),
            query: String::new(),
            notice: None,
            feed: None,
        }
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn row_state(&self, key: &str) -> RowState {
        if self.expanded.contains_key(key) {
            RowState::Expanded
        } else {
            RowState::Collapsed
        }
    }

    /// Fetch the feed and install it. Failures become the table notice.
    pub fn load(&mut self, source: FeedSource, timeout: Duration) {
        let result = load_feed(&source, timeout);
        self.feed = Some((source, timeout));
        match result {
            Ok(records) => self.install_records(records),
            Err(err) => self.feed_failed(&err),
        }
    }

    /// Replace the table contents. Every row is collapsed first.
    pub fn install_records(&mut self, records: Vec<PackageRecord>) {
        self.collapse_all();
        self.notice = None;
        self.grid.clear_error();
        let rows = grid_rows(self.grid.columns(), &records);
        self.records = records
            .into_iter()
            .map(|record| (record.name.clone(), record))
            .collect();
        self.grid.load(rows);
        self.grid.search(&self.query);
        self.grid.draw();
        tracing::debug!(records = self.records.len(), "table populated");
    }

    /// Leave an empty but interactive table and a single notice.
    pub fn feed_failed(&mut self, err: &FeedError) {
        self.collapse_all();
        self.records.clear();
        self.grid.clear();
        let notice = format!("Failed to load package data: {err}");
        tracing::warn!(error = %err, "feed load failed");
        self.grid.show_error(&notice);
        self.notice = Some(notice);
    }

    pub fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::RowClicked(key) => {
                self.toggle_row(&key);
            }
            UiEvent::TagClicked(label) | UiEvent::NavClicked(label) => self.apply_filter(&label),
            UiEvent::CopyClicked(target) => {
                self.copy(&target);
            }
            UiEvent::Reload => self.reload(),
        }
    }

    /// Flip one row between collapsed and expanded; returns the new state.
    pub fn toggle_row(&mut self, key: &str) -> RowState {
        if self.expanded.contains_key(key) || self.grid.is_child_shown(key) {
            self.collapse(key);
            return RowState::Collapsed;
        }
        let shown = self.grid.visible_keys().iter().any(|visible| visible == key);
        let Some(record) = self.records.get(key).filter(|_| shown) else {
            tracing::debug!(key, "click on unknown or filtered row ignored");
            return RowState::Collapsed;
        };
        let ctx = RenderContext {
            install: self.settings.install.clone(),
            markdown: self.settings.markdown.as_ref(),
            now: self.settings.now,
        };
        let fragment = render_detail(record, &ctx);
        if self.settings.expansion == ExpansionMode::Single {
            self.collapse_all();
        }
        self.grid.show_child(key, fragment.html);
        self.expanded.insert(key.to_string(), fragment.copy_target);
        RowState::Expanded
    }

    /// Set the grid query from a tag or nav label and redraw.
    pub fn apply_filter(&mut self, label: &str) {
        self.query = search_query_for(label);
        self.grid.search(&self.query);
        self.grid.draw();
        let visible = self.grid.visible_keys();
        let hidden: Vec<String> = self
            .expanded
            .keys()
            .filter(|key| !visible.contains(key))
            .cloned()
            .collect();
        for key in hidden {
            self.collapse(&key);
        }
        tracing::debug!(query = %self.query, visible = visible.len(), "filter applied");
    }

    /// Copy the install command wired to `target_id` (with or without `#`).
    pub fn copy(&mut self, target_id: &str) -> bool {
        let id = target_id.trim_start_matches('#');
        let value = self
            .expanded
            .values()
            .flatten()
            .find(|target| target.id == id)
            .map(|target| target.value.clone());
        match value {
            Some(value) => {
                self.clipboard.copy(&value);
                true
            }
            None => {
                tracing::debug!(copy_target = id, "copy target not found");
                false
            }
        }
    }

    /// Re-fetch the last feed. Expansions never survive a reload.
    pub fn reload(&mut self) {
        self.collapse_all();
        match self.feed.clone() {
            Some((source, timeout)) => self.load(source, timeout),
            None => tracing::debug!("reload requested before any feed was loaded"),
        }
    }

    pub fn collapse_all(&mut self) {
        let keys: Vec<String> = self.expanded.keys().cloned().collect();
        for key in keys {
            self.collapse(&key);
        }
    }

    fn collapse(&mut self, key: &str) {
        self.grid.hide_child(key);
        self.expanded.remove(key);
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            records: self.records.len(),
            query: self.query.clone(),
            visible: self.grid.visible_keys(),
            expanded: self.expanded.keys().cloned().collect(),
            notice: self.notice.clone(),
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
