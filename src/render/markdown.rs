//! Markdown-to-HTML conversion for package descriptions.
//!
//! Descriptions are trusted content; the output is embedded without escaping.
use comrak::{markdown_to_html, Options};
use std::sync::LazyLock;

static COMRAK_OPTIONS: LazyLock<Options<'static>> = LazyLock::new(|| {
    let mut opts = Options::default();
    opts.extension.table = true;
    opts.extension.strikethrough = true;
    opts.extension.autolink = true;
    // Raw HTML in descriptions is dropped, not passed through.
    opts.render.r#unsafe = false;
    opts
});

/// Pure `markdown -> html` conversion.
pub trait MarkdownRenderer {
    fn to_html(&self, markdown: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ComrakMarkdown;

impl MarkdownRenderer for ComrakMarkdown {
    fn to_html(&self, markdown: &str) -> String {
        markdown_to_html(markdown, &COMRAK_OPTIONS)
    }
}
