//! Static catalog page.
//!
//! Produces one self-contained HTML document: nav buttons, the package table,
//! and a pre-rendered detail row under every package. A small inline script
//! toggles detail rows and applies tag/nav filters with the same label
//! mapping the controller uses, so the page works without a grid widget.
use crate::config::CatalogConfig;
use crate::controller::RESERVED_LABELS;
use crate::grid::{catalog_columns, ColumnDef};
use crate::record::PackageRecord;
use crate::render::{render_detail, RenderContext};
use crate::util::escape_html;

const NAV_BUTTONS: [(&str, &str); 3] = [("all", "All"), ("class", "Classes"), ("font", "Fonts")];

/// Render the full catalog page. Records are listed by name.
pub fn render_page(
    records: &[PackageRecord],
    ctx: &RenderContext<'_>,
    config: &CatalogConfig,
) -> String {
    let columns = catalog_columns();
    let mut sorted: Vec<&PackageRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut body = String::new();
    for record in sorted {
        append_record_rows(&mut body, record, &columns, ctx);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
</head>
<body>
<h1>{title}</h1>
<nav class="catalog-nav">{nav}</nav>
<input type="search" id="catalog-search" aria-label="Search packages" value="">
<select id="page-length" aria-label="Rows per page">{lengths}</select>
<table id="main-table" class="table" data-expansion="{expansion}">
<thead><tr>{head}</tr></thead>
<tbody>
{body}</tbody>
</table>
<script>{script}</script>
</body>
</html>
"#,
        title = escape_html(&config.page_title),
        nav = render_nav(),
        lengths = render_length_options(&config.page_lengths),
        expansion = config.expansion.as_str(),
        head = render_head(&columns),
        body = body,
        script = inline_script(),
    )
}

fn render_nav() -> String {
    NAV_BUTTONS
        .iter()
        .map(|(keyword, label)| {
            format!(
                "<button type=\"button\" class=\"btn btn-outline-primary\" data-nav=\"{}\">{}</button>",
                escape_html(keyword),
                escape_html(label)
            )
        })
        .collect::<Vec<_>>()
        .join("")
}

fn render_head(columns: &[ColumnDef]) -> String {
    columns
        .iter()
        .filter(|column| column.visible)
        .map(|column| {
            format!(
                "<th data-orderable=\"{}\">{}</th>",
                column.orderable,
                escape_html(column.title)
            )
        })
        .collect()
}

fn append_record_rows(
    out: &mut String,
    record: &PackageRecord,
    columns: &[ColumnDef],
    ctx: &RenderContext<'_>,
) {
    let key = escape_html(&record.name);
    let search_text = columns
        .iter()
        .filter(|column| column.searchable)
        .map(|column| column.cell(record).to_lowercase())
        .filter(|cell| !cell.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(&format!(
        "<tr class=\"package-row\" data-key=\"{key}\" data-search=\"{}\">",
        escape_html(&search_text)
    ));
    let mut visible_count = 0;
    for column in columns.iter().filter(|column| column.visible) {
        visible_count += 1;
        let class = if column.searchable || column.orderable {
            ""
        } else {
            " class=\"details-control\""
        };
        out.push_str(&format!(
            "<td{class}>{}</td>",
            escape_html(&column.cell(record))
        ));
    }
    out.push_str("</tr>\n");

    let fragment = render_detail(record, ctx);
    out.push_str(&format!(
        "<tr class=\"child-row\" data-for=\"{key}\" hidden><td colspan=\"{visible_count}\">{}</td></tr>\n",
        fragment.html
    ));
}

/// Length menu entries; the first one is selected and `-1` means every row.
fn render_length_options(lengths: &[i64]) -> String {
    lengths
        .iter()
        .enumerate()
        .map(|(idx, len)| {
            let label = if *len < 0 {
                "All".to_string()
            } else {
                len.to_string()
            };
            let selected = if idx == 0 { " selected" } else { "" };
            format!("<option value=\"{len}\"{selected}>{label}</option>")
        })
        .collect()
}

fn reserved_labels_json() -> String {
    let entries: Vec<String> = RESERVED_LABELS
        .iter()
        .map(|(label, query)| {
            format!(
                "{}:{}",
                serde_json::Value::from(*label),
                serde_json::Value::from(*query)
            )
        })
        .collect();
    format!("{{{}}}", entries.join(","))
}

// Typed text filters literally; only nav buttons and tag badges go through
// the reserved label mapping.
fn inline_script() -> String {
    format!(
        r#"
(function() {{
  var reserved = {reserved};
  var queryFor = function(label) {{
    return Object.prototype.hasOwnProperty.call(reserved, label) ? reserved[label] : label;
  }};
  var table = document.getElementById('main-table');
  var multiple = table.getAttribute('data-expansion') === 'multiple';
  var input = document.getElementById('catalog-search');
  var lengthSelect = document.getElementById('page-length');
  var query = '';
  var childFor = function(key) {{
    return Array.prototype.find.call(document.querySelectorAll('tr.child-row'), function(row) {{
      return row.getAttribute('data-for') === key;
    }});
  }};
  var collapse = function(row) {{
    var child = childFor(row.getAttribute('data-key'));
    if (child) {{ child.hidden = true; }}
    row.classList.remove('shown');
  }};
  var redraw = function() {{
    var needle = query.trim().toLowerCase();
    var limit = parseInt(lengthSelect.value, 10);
    var shown = 0;
    document.querySelectorAll('tr.package-row').forEach(function(row) {{
      var match = needle === '' || row.getAttribute('data-search').indexOf(needle) >= 0;
      var show = match && (limit < 0 || shown < limit);
      if (show) {{ shown += 1; }}
      row.hidden = !show;
      if (!show) {{ collapse(row); }}
    }});
  }};
  var filterLiteral = function(text) {{
    query = text;
    redraw();
  }};
  var filterLabel = function(label) {{
    query = queryFor(label);
    input.value = query;
    redraw();
  }};
  input.addEventListener('input', function() {{ filterLiteral(input.value); }});
  lengthSelect.addEventListener('change', redraw);
  document.addEventListener('click', function(event) {{
    var target = event.target;
    if (target.matches('[data-nav]')) {{ filterLabel(target.getAttribute('data-nav')); return; }}
    if (target.matches('[data-search-tag]')) {{
      event.preventDefault();
      filterLabel(target.getAttribute('data-search-tag'));
      return;
    }}
    if (target.matches('[data-clipboard-target]')) {{
      var id = target.getAttribute('data-clipboard-target').replace(/^#/, '');
      var source = document.getElementById(id);
      if (source && navigator.clipboard) {{ navigator.clipboard.writeText(source.value); }}
      return;
    }}
    var row = target.closest('tr.package-row');
    if (!row) {{ return; }}
    var child = childFor(row.getAttribute('data-key'));
    if (!child) {{ return; }}
    var opening = child.hidden;
    if (opening && !multiple) {{
      document.querySelectorAll('tr.package-row.shown').forEach(function(other) {{ collapse(other); }});
    }}
    child.hidden = !opening;
    row.classList.toggle('shown', opening);
  }});
  redraw();
}})();
"#,
        reserved = reserved_labels_json()
    )
}
