use super::markdown::MarkdownRenderer;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// How the install command is synthesized for a package name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub prefix: String,
    pub satyrographos_install: bool,
}

impl InstallCommand {
    pub fn command_for(&self, name: &str) -> String {
        let mut command = format!("opam install {}{}", self.prefix, name);
        if self.satyrographos_install {
            command.push_str(" && satyrographos install");
        }
        command
    }

    /// Element id of the read-only input holding the command.
    pub fn input_id(&self, name: &str) -> String {
        format!("installcmd-{name}")
    }

    pub fn doc_package_for(&self, name: &str) -> String {
        format!("{}{}-doc", self.prefix, name)
    }
}

impl Default for InstallCommand {
    fn default() -> Self {
        InstallCommand {
            prefix: "satysfi-".to_string(),
            satyrographos_install: true,
        }
    }
}

/// Everything the detail renderer needs besides the record itself.
///
/// `now` only feeds the relative "3 days ago" annotation; leaving it unset
/// keeps output independent of the wall clock.
pub struct RenderContext<'a> {
    pub install: InstallCommand,
    pub markdown: &'a dyn MarkdownRenderer,
    pub now: Option<DateTime<Utc>>,
}

/// The install-command input a copy control is wired to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyTarget {
    pub id: String,
    pub value: String,
}

/// Rendered detail panel plus the interactions it exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailFragment {
    pub html: String,
    pub copy_target: Option<CopyTarget>,
}
