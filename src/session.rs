//! Scripted UI sessions.
//!
//! A session script is one event per line:
//!
//! ```text
//! # comment
//! click fonts-noto
//! tag font
//! nav class
//! copy "#installcmd-fonts-noto"
//! reload
//! ```
//!
//! Arguments are split with shell quoting rules, so tags containing spaces can
//! be quoted.
use crate::controller::{Clipboard, TableController, TableSnapshot, UiEvent};
use crate::grid::Grid;
use anyhow::{anyhow, Context, Result};
use serde::Serialize;

pub fn parse_script(text: &str) -> Result<Vec<UiEvent>> {
    let mut events = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let words =
            shell_words::split(line).with_context(|| format!("parse script line {line_no}"))?;
        let Some((command, args)) = words.split_first() else {
            continue;
        };
        let event = match (command.as_str(), args) {
            ("click", [key]) => UiEvent::RowClicked(key.clone()),
            ("tag", [tag]) => UiEvent::TagClicked(tag.clone()),
            ("nav", [keyword]) => UiEvent::NavClicked(keyword.clone()),
            ("copy", [target]) => UiEvent::CopyClicked(target.clone()),
            ("reload", []) => UiEvent::Reload,
            ("click" | "tag" | "nav" | "copy", _) => {
                return Err(anyhow!(
                    "line {line_no}: {command} takes exactly one argument"
                ))
            }
            ("reload", _) => return Err(anyhow!("line {line_no}: reload takes no arguments")),
            (other, _) => return Err(anyhow!("line {line_no}: unknown command {other:?}")),
        };
        events.push(event);
    }
    Ok(events)
}

/// Final state after a session.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub events: usize,
    #[serde(flatten)]
    pub table: TableSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clipboard: Option<String>,
}

pub fn run_session<G: Grid, C: Clipboard>(
    controller: &mut TableController<G, C>,
    events: Vec<UiEvent>,
) -> usize {
    let count = events.len();
    for event in events {
        tracing::debug!(?event, "session event");
        controller.handle(event);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::parse_script;
    use crate::controller::UiEvent;

    #[test]
    fn parses_every_command_and_skips_comments() {
        let script = "# warm up\n\nclick fss\ntag \"east asian\"\nnav all\ncopy '#installcmd-fss'\nreload\n";
        let events = parse_script(script).expect("parse script");
        assert_eq!(
            events,
            vec![
                UiEvent::RowClicked("fss".to_string()),
                UiEvent::TagClicked("east asian".to_string()),
                UiEvent::NavClicked("all".to_string()),
                UiEvent::CopyClicked("#installcmd-fss".to_string()),
                UiEvent::Reload,
            ]
        );
    }

    #[test]
    fn reports_line_numbers_for_bad_lines() {
        let err = parse_script("click fss\njump fss\n").expect_err("unknown command");
        assert!(err.to_string().contains("line 2"), "{err}");

        let err = parse_script("tag\n").expect_err("missing argument");
        assert!(err.to_string().contains("exactly one argument"), "{err}");

        let err = parse_script("reload now\n").expect_err("extra argument");
        assert!(err.to_string().contains("no arguments"), "{err}");

        let err = parse_script("tag \"unterminated\n").expect_err("bad quoting");
        assert!(format!("{err:#}").contains("line 1"), "{err:#}");
    }
}
