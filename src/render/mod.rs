//! Deterministic detail-panel renderer for package records.
//!
//! `render_detail` is a pure function of the record and the context: each
//! field maps to at most one row kind, empty fields produce no markup, and all
//! free text goes through `escape_html`. The only unescaped content is the
//! Markdown description, which is trusted.

use crate::record::PackageRecord;

mod format;
mod markdown;
mod model;
mod time;

use format::{
    append_file_list_row, append_install_row, append_link_row, append_markdown_row,
    append_message_row, append_tag_row, append_text_row,
};
pub use markdown::{ComrakMarkdown, MarkdownRenderer};
pub use model::{CopyTarget, DetailFragment, InstallCommand, RenderContext};

const TABLE_OPEN: &str = "<table class=\"table detail-table\" cellpadding=\"5\" cellspacing=\"0\" border=\"0\"><tbody>\n";
const TABLE_CLOSE: &str = "</tbody></table>";

/// Render the detail panel for one record.
pub fn render_detail(record: &PackageRecord, ctx: &RenderContext<'_>) -> DetailFragment {
    let mut out = String::from(TABLE_OPEN);

    let copy_target = if record.name.is_empty() {
        None
    } else {
        let target = CopyTarget {
            id: ctx.install.input_id(&record.name),
            value: ctx.install.command_for(&record.name),
        };
        append_install_row(&mut out, &target.id, &target.value);
        Some(target)
    };

    if record.has_doc_package && !record.name.is_empty() {
        append_message_row(
            &mut out,
            &format!(
                "Documentation is available in package {}.",
                ctx.install.doc_package_for(&record.name)
            ),
        );
    }
    append_markdown_row(&mut out, &record.description, ctx.markdown);
    append_text_row(&mut out, "Maintainer", &record.maintainer);
    append_text_row(&mut out, "License", &record.license);
    append_link_row(&mut out, "Homepage", &record.homepage);
    append_text_row(&mut out, "Dependencies", &record.dependencies);
    append_text_row(&mut out, "Latest version", &record.latest_version);
    append_text_row(&mut out, "Last update", &last_update_text(record, ctx));
    append_tag_row(&mut out, "Tags", &record.tags);
    append_text_row(&mut out, "Fonts", &record.fonts.join(", "));
    append_file_list_row(&mut out, "Documents", &record.documents);

    out.push_str(TABLE_CLOSE);
    DetailFragment {
        html: out,
        copy_target,
    }
}

fn last_update_text(record: &PackageRecord, ctx: &RenderContext<'_>) -> String {
    let Some(at) = record.last_update.as_ref() else {
        return String::new();
    };
    let absolute = time::format_timestamp(at);
    match ctx.now.as_ref() {
        Some(now) => format!("{absolute} ({})", time::relative_to(at, now)),
        None => absolute,
    }
}
