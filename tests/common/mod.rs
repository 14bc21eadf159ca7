//! Shared test infrastructure for CLI integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A sample feed exercising the schema variants the catalog accepts.
pub const SAMPLE_FEED: &str = r#"{
  "data": [
    {
      "name": "fonts-noto",
      "synopsis": "Noto fonts",
      "type": "fonts",
      "latest_version": "0.1.0",
      "tags": "font, cjk",
      "fonts": ["NotoSans-Regular.otf"],
      "has_docpkg": false
    },
    {
      "name": "base",
      "synopsis": "Base library",
      "description": "The **base** library.",
      "maintainer": "Jane <jane@example.org>",
      "license": "LGPL-3.0",
      "homepage": "https://example.org/base",
      "type": "library",
      "latest_version": "1.4.0",
      "last_update": "2021-03-04T05:06:00Z",
      "tags": ["library"],
      "document": "doc/base/manual.pdf",
      "has_docpackage": true
    },
    {
      "name": "class-jlreq",
      "synopsis": "Japanese layout",
      "type": "class",
      "tags": ["class", "cjk"]
    },
    {"synopsis": "entry without a name"}
  ]
}"#;

/// A temp directory holding a feed and any scripts a test writes.
pub struct CliFixture {
    pub dir: TempDir,
}

impl CliFixture {
    pub fn new(feed: &str) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        std::fs::write(dir.path().join("data.json"), feed)?;
        Ok(Self { dir })
    }

    pub fn feed_path(&self) -> PathBuf {
        self.dir.path().join("data.json")
    }

    pub fn write(&self, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Run pkgcat with an isolated, empty config home.
    pub fn run(&self, args: &[&str]) -> anyhow::Result<Output> {
        let output = Command::new(bin())
            .args(args)
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env("HOME", self.dir.path())
            .env_remove("RUST_LOG")
            .current_dir(self.dir.path())
            .output()?;
        Ok(output)
    }
}

pub fn bin() -> &'static Path {
    Path::new(env!("CARGO_BIN_EXE_pkgcat"))
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
