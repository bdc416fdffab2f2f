//! HTML rendering of the vote page

use vote_core::{iterate, percentage, sum, ViewModel};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Emoji votes</title>
<style>
body { font-family: sans-serif; margin: 2rem auto; max-width: 40rem; }
table { border-collapse: collapse; width: 100%; }
td { padding: 0.25rem 0.5rem; }
td.symbol { font-size: 1.5rem; }
td.bar { width: 50%; }
td.bar div { background: #4a90d9; height: 1rem; }
</style>
</head>
<body>
<h1>Emoji votes</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Render the full vote page
///
/// Rows keep the view's order. An empty view renders a placeholder and no
/// percentages.
pub fn render_page(view: &ViewModel) -> String {
    let mut html = String::with_capacity(PAGE_HEAD.len() + PAGE_TAIL.len() + view.len() * 160);
    html.push_str(PAGE_HEAD);

    if view.is_empty() {
        html.push_str("<p class=\"empty\">No votes yet</p>\n");
    } else {
        let total = sum(view.items());

        html.push_str("<table>\n");
        for (rank, item) in iterate(view.len()).into_iter().zip(view.items()) {
            // Every count is zero: no share to show
            let pct = percentage(item.count, total).unwrap_or(0);
            html.push_str(&format!(
                "<tr class=\"vote\"><td class=\"rank\">{}</td><td class=\"symbol\">{}</td>\
                 <td class=\"count\">{}</td><td class=\"pct\">{}%</td>\
                 <td class=\"bar\"><div style=\"width: {}%\"></div></td></tr>\n",
                rank,
                escape_html(&item.symbol),
                item.count,
                pct,
                pct
            ));
        }
        html.push_str("</table>\n");
    }

    html.push_str(&format!(
        "<p class=\"total\">Total votes: {}</p>\n",
        view.total()
    ));
    html.push_str(PAGE_TAIL);
    html
}

/// Escape text for use inside HTML element content and attribute values
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
