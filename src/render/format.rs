use super::markdown::MarkdownRenderer;
use crate::util::{basename, escape_html};

pub(super) fn append_text_row(out: &mut String, label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    out.push_str(&format!(
        "<tr><td>{}:</td><td>{}</td></tr>\n",
        escape_html(label),
        escape_html(value)
    ));
}

pub(super) fn append_link_row(out: &mut String, label: &str, url: &str) {
    if url.is_empty() {
        return;
    }
    let url = escape_html(url);
    out.push_str(&format!(
        "<tr><td>{}:</td><td><a target=\"_blank\" href=\"{url}\">{url}</a></td></tr>\n",
        escape_html(label)
    ));
}

pub(super) fn append_file_list_row(out: &mut String, label: &str, paths: &[String]) {
    let mut title = format!("{}:", escape_html(label));
    for path in paths {
        out.push_str(&format!(
            "<tr><td>{title}</td><td><a target=\"_blank\" href=\"{}\">{}</a></td></tr>\n",
            escape_html(path),
            escape_html(basename(path))
        ));
        title.clear();
    }
}

pub(super) fn append_tag_row(out: &mut String, label: &str, tags: &[String]) {
    if tags.is_empty() {
        return;
    }
    let badges = tags
        .iter()
        .map(|tag| {
            let tag = escape_html(tag);
            format!(
                "<a href=\"#\" class=\"badge badge-secondary tag-filter\" data-search-tag=\"{tag}\">{tag}</a>"
            )
        })
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(&format!(
        "<tr><td>{}:</td><td>{badges}</td></tr>\n",
        escape_html(label)
    ));
}

/// The converted Markdown is embedded as-is.
pub(super) fn append_markdown_row(out: &mut String, content: &str, markdown: &dyn MarkdownRenderer) {
    if content.is_empty() {
        return;
    }
    out.push_str(&format!(
        "<tr><td colspan=\"2\"><div class=\"card\"><div class=\"card-body description\">{}</div></div></td></tr>\n",
        markdown.to_html(content)
    ));
}

pub(super) fn append_install_row(out: &mut String, input_id: &str, command: &str) {
    let input_id = escape_html(input_id);
    out.push_str(&format!(
        concat!(
            "<tr><td>Installation:</td><td>",
            "<div class=\"input-group mb-3\">",
            "<input type=\"text\" class=\"form-control\" readonly aria-label=\"Installation Command\" id=\"{id}\" value=\"{command}\">",
            "<div class=\"input-group-append\">",
            "<button class=\"btn btn-outline-secondary\" type=\"button\" data-clipboard-target=\"#{id}\">Copy</button>",
            "</div></div></td></tr>\n"
        ),
        id = input_id,
        command = escape_html(command)
    ));
}

pub(super) fn append_message_row(out: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    out.push_str(&format!(
        "<tr><td colspan=\"2\">{}</td></tr>\n",
        escape_html(text)
    ));
}
