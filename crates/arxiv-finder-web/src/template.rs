use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../templates/index.html");

/// Render the form page, with the lookup result below it when there is one.
pub fn render_index(result: Option<&str>) -> Html<String> {
    let block = match result {
        Some(text) => format!("<p><strong>Result:</strong> {}</p>", escape_html(text)),
        None => String::new(),
    };
    Html(INDEX_HTML.replace("{{ result }}", &block))
}

/// Escape text for use inside HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
