pub mod charts;
pub mod clean;
pub mod features;
pub mod page;
pub mod preview;
pub mod summary;

use serde_json::Value;

/// HTML-escapes a string. Every server- or user-derived string is untrusted
/// and passes through here before interpolation into markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The single-message card used for progress, validation and error text.
pub fn message_card(message: &str) -> String {
    format!(
        "<div class='card'><div class='progress'>{}</div></div>",
        escape(message)
    )
}

pub(crate) fn bullet_list(items: &[String]) -> String {
    let mut html = String::from("<ul>");
    for item in items {
        html.push_str("<li>");
        html.push_str(&escape(item));
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

/// Display text for one JSON cell value. Strings render as-is (escaped by
/// the caller), null renders empty.
pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape("a & b \"c\""), "a &amp; b &quot;c&quot;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn message_card_escapes_content() {
        let html = message_card("<b>bad</b>");
        assert!(html.contains("&lt;b&gt;bad&lt;/b&gt;"));
        assert!(!html.contains("<b>bad</b>"));
    }

    #[test]
    fn cell_text_renders_null_empty() {
        assert_eq!(cell_text(&Value::Null), "");
        assert_eq!(cell_text(&json!(3.5)), "3.5");
        assert_eq!(cell_text(&json!("x")), "x");
        assert_eq!(cell_text(&json!(true)), "true");
    }
}
