use crate::models::PreviewRow;

use super::{cell_text, escape};

/// Inline form asking for the row count; confirming it is the trigger that
/// issues the actual request.
pub fn prompt() -> String {
    "<div class='card prompt'>\
       <h3>Enter rows to preview</h3>\
       <input type='number' id='rowCountInput' placeholder='Default 10' min='1'>\
       <button id='confirmPreview' class='btn'>Show Preview</button>\
     </div>"
        .to_string()
}

/// Renders schema-less rows as a table. Headers come from the key set of
/// the FIRST row only; an empty row set still renders the table with its
/// zero count rather than disappearing.
pub fn table(rows: &[PreviewRow]) -> String {
    let mut html = format!(
        "<div class='card'><h3>Preview ({} rows)</h3>\
         <div style='overflow:auto'><table class='table'>",
        rows.len()
    );

    if let Some(first) = rows.first() {
        html.push_str("<tr>");
        for key in first.keys() {
            html.push_str("<th>");
            html.push_str(&escape(key));
            html.push_str("</th>");
        }
        html.push_str("</tr>");

        for row in rows {
            html.push_str("<tr>");
            for key in first.keys() {
                let text = row.get(key).map(cell_text).unwrap_or_default();
                html.push_str("<td>");
                html.push_str(&escape(&text));
                html.push_str("</td>");
            }
            html.push_str("</tr>");
        }
    }

    html.push_str("</table></div></div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows_from(value: serde_json::Value) -> Vec<PreviewRow> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn headers_come_from_first_row_in_order() {
        let rows = rows_from(json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}]));
        let html = table(&rows);

        let a = html.find("<th>a</th>").expect("header a");
        let b = html.find("<th>b</th>").expect("header b");
        assert!(a < b, "headers out of order: {}", html);

        let first_row = html.find("<td>1</td>").unwrap();
        let second_row = html.find("<td>3</td>").unwrap();
        assert!(first_row < second_row);
        assert!(html.contains("<td>2</td>"));
        assert!(html.contains("<td>4</td>"));
    }

    #[test]
    fn empty_rows_render_zero_count_and_table() {
        let html = table(&[]);
        assert!(html.contains("Preview (0 rows)"));
        assert!(html.contains("<table class='table'>"));
    }

    #[test]
    fn cells_are_escaped() {
        let rows = rows_from(json!([{"name": "<img onerror=x>"}]));
        let html = table(&rows);
        assert!(!html.contains("<img onerror=x>"));
        assert!(html.contains("&lt;img onerror=x&gt;"));
    }

    #[test]
    fn missing_key_in_later_row_renders_empty_cell() {
        let rows = rows_from(json!([{"a": 1, "b": 2}, {"a": 3}]));
        let html = table(&rows);
        assert!(html.contains("<td>3</td><td></td>"));
    }
}
