use super::{
    search_query_for, ControllerSettings, ExpansionMode, MemoryClipboard, RowState,
    TableController, UiEvent,
};
use crate::feed::FeedSource;
use crate::grid::{Grid, MemoryGrid};
use crate::record::PackageRecord;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

type Controller = TableController<MemoryGrid, MemoryClipboard>;

fn record(name: &str, tags: &[&str]) -> PackageRecord {
    PackageRecord {
        name: name.to_string(),
        synopsis: format!("{name} package"),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        ..Default::default()
    }
}

fn catalog() -> Vec<PackageRecord> {
    vec![
        record("base", &["library"]),
        record("class-jlreq", &["class", "cjk"]),
        record("fonts-noto", &["font", "cjk"]),
        record("fonts-junicode", &["font"]),
    ]
}

fn controller_with(expansion: ExpansionMode) -> Controller {
    let settings = ControllerSettings {
        expansion,
        ..Default::default()
    };
    let mut controller =
        TableController::new(MemoryGrid::default(), MemoryClipboard::default(), settings);
    controller.install_records(catalog());
    controller
}

fn controller() -> Controller {
    controller_with(ExpansionMode::Single)
}

fn temp_feed_path(name: &str) -> std::path::PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    let root = std::env::temp_dir().join(format!("{name}-{}-{now}", std::process::id()));
    std::fs::create_dir_all(&root).expect("create temp root");
    root.join("data.json")
}

#[test]
fn clicking_a_row_twice_shows_then_removes_the_panel() {
    let mut controller = TableController::new(
        MemoryGrid::default(),
        MemoryClipboard::default(),
        ControllerSettings::default(),
    );
    controller.install_records(vec![PackageRecord {
        name: "foo".to_string(),
        description: String::new(),
        ..Default::default()
    }]);

    assert_eq!(controller.toggle_row("foo"), RowState::Expanded);
    let html = controller.grid().child_html("foo").expect("detail panel");
    assert!(html.contains("Installation:"));
    assert!(!html.contains("card-body description"));

    assert_eq!(controller.toggle_row("foo"), RowState::Collapsed);
    assert_eq!(controller.grid().child_count(), 0);
    assert_eq!(controller.row_state("foo"), RowState::Collapsed);
}

#[test]
fn single_mode_keeps_one_panel_open() {
    let mut controller = controller();
    controller.handle(UiEvent::RowClicked("base".to_string()));
    controller.handle(UiEvent::RowClicked("fonts-noto".to_string()));
    assert_eq!(controller.snapshot().expanded, vec!["fonts-noto"]);
    assert_eq!(controller.grid().child_count(), 1);
    assert!(!controller.grid().is_child_shown("base"));
}

#[test]
fn multiple_mode_allows_several_panels() {
    let mut controller = controller_with(ExpansionMode::Multiple);
    controller.handle(UiEvent::RowClicked("base".to_string()));
    controller.handle(UiEvent::RowClicked("fonts-noto".to_string()));
    assert_eq!(controller.snapshot().expanded, vec!["base", "fonts-noto"]);
    assert_eq!(controller.grid().child_count(), 2);
}

#[test]
fn unknown_rows_are_ignored() {
    let mut controller = controller();
    assert_eq!(controller.toggle_row("missing"), RowState::Collapsed);
    assert_eq!(controller.grid().child_count(), 0);
}

#[test]
fn reserved_labels_map_to_query_prefixes() {
    assert_eq!(search_query_for("all"), "");
    assert_eq!(search_query_for("class"), "class-");
    assert_eq!(search_query_for("font"), "fonts-");
    assert_eq!(search_query_for("cjk"), "cjk");
    assert_eq!(search_query_for("Font"), "Font");
}

#[test]
fn nav_and_tag_clicks_share_one_mapping() {
    let mut from_nav = controller();
    let mut from_tag = controller();
    from_nav.handle(UiEvent::NavClicked("class".to_string()));
    from_tag.handle(UiEvent::TagClicked("class".to_string()));
    assert_eq!(from_nav.query(), "class-");
    assert_eq!(from_nav.snapshot(), from_tag.snapshot());
    assert_eq!(from_nav.snapshot().visible, vec!["class-jlreq"]);
}

#[test]
fn tag_click_is_idempotent() {
    let mut controller = controller();
    controller.handle(UiEvent::TagClicked("font".to_string()));
    let once = controller.snapshot();
    controller.handle(UiEvent::TagClicked("font".to_string()));
    let twice = controller.snapshot();
    assert_eq!(once, twice);
    assert_eq!(twice.query, "fonts-");
    assert_eq!(twice.visible, vec!["fonts-junicode", "fonts-noto"]);
}

#[test]
fn literal_tags_pass_through_and_all_clears() {
    let mut controller = controller();
    controller.handle(UiEvent::TagClicked("cjk".to_string()));
    assert_eq!(controller.query(), "cjk");
    assert_eq!(controller.snapshot().visible, vec!["class-jlreq", "fonts-noto"]);

    controller.handle(UiEvent::NavClicked("all".to_string()));
    assert_eq!(controller.query(), "");
    assert_eq!(controller.snapshot().visible.len(), 4);
}

#[test]
fn filtering_a_row_away_destroys_its_expansion() {
    let mut controller = controller();
    controller.handle(UiEvent::RowClicked("base".to_string()));
    controller.handle(UiEvent::TagClicked("font".to_string()));
    assert!(controller.snapshot().expanded.is_empty());
    assert_eq!(controller.grid().child_count(), 0);

    controller.handle(UiEvent::NavClicked("all".to_string()));
    assert_eq!(controller.row_state("base"), RowState::Collapsed);
}

#[test]
fn filtered_rows_cannot_be_expanded() {
    let mut controller = controller();
    controller.handle(UiEvent::TagClicked("font".to_string()));
    assert_eq!(controller.toggle_row("base"), RowState::Collapsed);
    assert_eq!(controller.grid().child_count(), 0);
}

#[test]
fn copy_click_puts_install_command_on_clipboard() {
    let mut controller = controller();
    controller.handle(UiEvent::RowClicked("base".to_string()));
    controller.handle(UiEvent::CopyClicked("#installcmd-base".to_string()));
    assert_eq!(
        controller.clipboard().contents.as_deref(),
        Some("opam install satysfi-base && satyrographos install")
    );
    assert!(!controller.copy("installcmd-fonts-noto"), "collapsed row has no input");
}

#[test]
fn feed_failure_leaves_an_empty_interactive_table() {
    let mut controller = controller();
    controller.handle(UiEvent::RowClicked("base".to_string()));
    controller.load(
        FeedSource::Path("/nonexistent/pkgcat/data.json".into()),
        Duration::from_secs(1),
    );

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.records, 0);
    assert!(snapshot.visible.is_empty());
    assert!(snapshot.expanded.is_empty());
    let notice = snapshot.notice.expect("notice");
    assert!(notice.starts_with("Failed to load package data"));
    assert_eq!(controller.grid().error(), Some(notice.as_str()));

    controller.handle(UiEvent::TagClicked("font".to_string()));
    controller.handle(UiEvent::RowClicked("base".to_string()));
    assert_eq!(controller.grid().child_count(), 0);
}

#[test]
fn malformed_feed_reports_parse_notice() {
    let path = temp_feed_path("pkgcat-controller-malformed");
    std::fs::write(&path, "{\"data\": ").expect("write feed");
    let mut controller = TableController::new(
        MemoryGrid::default(),
        MemoryClipboard::default(),
        ControllerSettings::default(),
    );
    controller.load(FeedSource::Path(path), Duration::from_secs(1));
    assert!(controller
        .notice()
        .is_some_and(|notice| notice.contains("parse feed")));
}

#[test]
fn reload_collapses_rows_and_picks_up_new_records() {
    let path = temp_feed_path("pkgcat-controller-reload");
    std::fs::write(&path, r#"[{"name": "base"}, {"name": "fss"}]"#).expect("write feed");
    let mut controller = TableController::new(
        MemoryGrid::default(),
        MemoryClipboard::default(),
        ControllerSettings::default(),
    );
    controller.load(FeedSource::Path(path.clone()), Duration::from_secs(1));
    controller.handle(UiEvent::RowClicked("fss".to_string()));
    assert_eq!(controller.snapshot().expanded, vec!["fss"]);

    std::fs::write(&path, r#"{"data": [{"name": "base"}, {"name": "zrbase"}]}"#)
        .expect("rewrite feed");
    controller.handle(UiEvent::Reload);

    let snapshot = controller.snapshot();
    assert!(snapshot.expanded.is_empty());
    assert_eq!(snapshot.visible, vec!["base", "zrbase"]);
    assert_eq!(controller.grid().child_count(), 0);
    assert!(snapshot.notice.is_none());
}

#[test]
fn successful_load_clears_previous_notice_and_keeps_query() {
    let mut controller = controller();
    controller.handle(UiEvent::TagClicked("font".to_string()));
    controller.load(
        FeedSource::Path("/nonexistent/pkgcat/data.json".into()),
        Duration::from_secs(1),
    );
    assert!(controller.notice().is_some());

    controller.install_records(catalog());
    assert!(controller.notice().is_none());
    assert_eq!(controller.snapshot().visible, vec!["fonts-junicode", "fonts-noto"]);
}
