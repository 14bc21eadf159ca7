//! Package records as the catalog sees them.
//!
//! Every field is optional in the feed; absent values are normalized to empty
//! strings, empty lists, or `None` at the feed boundary so renderers only ever
//! need to check for emptiness.
use chrono::{DateTime, Utc};

/// One catalog entry. `name` is the unique row key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageRecord {
    pub name: String,
    pub synopsis: String,
    pub description: String,
    pub maintainer: String,
    pub license: String,
    pub homepage: String,
    pub dependencies: String,
    pub latest_version: String,
    /// Catalog "type" column (library, class, fonts, ...).
    pub kind: String,
    pub last_update: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub fonts: Vec<String>,
    pub documents: Vec<String>,
    pub has_doc_package: bool,
}
