//! Data-grid contract and a headless in-memory grid.
//!
//! The controller only talks to `Grid`; a browser binding would implement the
//! same trait over the real widget. `MemoryGrid` keeps just enough behavior
//! for the CLI session driver and tests: name ordering, substring search over
//! searchable columns, and child rows.
use crate::record::PackageRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Page-length menu entries; `-1` means "All".
pub const DEFAULT_PAGE_LENGTHS: [i64; 3] = [50, 100, -1];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnField {
    DetailsControl,
    Name,
    Synopsis,
    Kind,
    LatestVersion,
    Tags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub title: &'static str,
    pub field: ColumnField,
    pub orderable: bool,
    pub searchable: bool,
    pub visible: bool,
}

impl ColumnDef {
    const fn new(title: &'static str, field: ColumnField) -> Self {
        ColumnDef {
            title,
            field,
            orderable: true,
            searchable: true,
            visible: true,
        }
    }

    const fn unordered(mut self) -> Self {
        self.orderable = false;
        self
    }

    const fn unsearchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn cell(&self, record: &PackageRecord) -> String {
        match self.field {
            ColumnField::DetailsControl => String::new(),
            ColumnField::Name => record.name.clone(),
            ColumnField::Synopsis => record.synopsis.clone(),
            ColumnField::Kind => record.kind.clone(),
            ColumnField::LatestVersion => record.latest_version.clone(),
            ColumnField::Tags => record.tags.join(" "),
        }
    }
}

/// Catalog column layout. Tags are hidden but searchable so badge clicks
/// find every tagged package.
pub fn catalog_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("", ColumnField::DetailsControl)
            .unordered()
            .unsearchable(),
        ColumnDef::new("Name", ColumnField::Name),
        ColumnDef::new("Synopsis", ColumnField::Synopsis).unordered(),
        ColumnDef::new("Type", ColumnField::Kind),
        ColumnDef::new("Latest version", ColumnField::LatestVersion).unordered(),
        ColumnDef::new("Tags", ColumnField::Tags)
            .unordered()
            .hidden(),
    ]
}

/// One grid row: the key plus one cell per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub key: String,
    pub cells: Vec<String>,
}

pub fn grid_rows(columns: &[ColumnDef], records: &[PackageRecord]) -> Vec<GridRow> {
    records
        .iter()
        .map(|record| GridRow {
            key: record.name.clone(),
            cells: columns.iter().map(|column| column.cell(record)).collect(),
        })
        .collect()
}

/// The subset of a data-grid widget the controller drives.
pub trait Grid {
    fn columns(&self) -> &[ColumnDef];
    fn load(&mut self, rows: Vec<GridRow>);
    fn clear(&mut self);
    /// Set the free-text filter; takes effect on the next `draw`.
    fn search(&mut self, query: &str);
    fn draw(&mut self);
    fn visible_keys(&self) -> Vec<String>;
    fn is_child_shown(&self, key: &str) -> bool;
    fn show_child(&mut self, key: &str, html: String);
    fn hide_child(&mut self, key: &str);
    fn child_html(&self, key: &str) -> Option<&str>;
    fn show_error(&mut self, message: &str);
    fn clear_error(&mut self);
    fn error(&self) -> Option<&str>;
}

#[derive(Debug)]
pub struct MemoryGrid {
    columns: Vec<ColumnDef>,
    rows: Vec<GridRow>,
    pending_query: String,
    visible: Vec<usize>,
    children: BTreeMap<String, String>,
    error: Option<String>,
}

impl MemoryGrid {
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        MemoryGrid {
            columns,
            rows: Vec::new(),
            pending_query: String::new(),
            visible: Vec::new(),
            children: BTreeMap::new(),
            error: None,
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    fn row_matches(&self, row: &GridRow, needle: &str) -> bool {
        self.columns
            .iter()
            .zip(&row.cells)
            .filter(|(column, _)| column.searchable)
            .any(|(_, cell)| cell.to_lowercase().contains(needle))
    }
}

impl Default for MemoryGrid {
    fn default() -> Self {
        MemoryGrid::new(catalog_columns())
    }
}

impl Grid for MemoryGrid {
    fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    fn load(&mut self, mut rows: Vec<GridRow>) {
        // Default ordering: name ascending.
        rows.sort_by(|a, b| a.key.cmp(&b.key));
        self.rows = rows;
        self.children.clear();
        self.draw();
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.visible.clear();
        self.children.clear();
    }

    fn search(&mut self, query: &str) {
        self.pending_query = query.to_string();
    }

    fn draw(&mut self) {
        let needle = self.pending_query.trim().to_lowercase();
        self.visible = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| needle.is_empty() || self.row_matches(row, &needle))
            .map(|(idx, _)| idx)
            .collect();
        let visible_keys = self.visible_keys();
        self.children
            .retain(|key, _| visible_keys.iter().any(|visible| visible == key));
    }

    fn visible_keys(&self) -> Vec<String> {
        self.visible
            .iter()
            .map(|idx| self.rows[*idx].key.clone())
            .collect()
    }

    fn is_child_shown(&self, key: &str) -> bool {
        self.children.contains_key(key)
    }

    fn show_child(&mut self, key: &str, html: String) {
        self.children.insert(key.to_string(), html);
    }

    fn hide_child(&mut self, key: &str) {
        self.children.remove(key);
    }

    fn child_html(&self, key: &str) -> Option<&str> {
        self.children.get(key).map(String::as_str)
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn clear_error(&mut self) {
        self.error = None;
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
