use crate::models::{ColumnStat, SummaryReport};

use super::{bullet_list, cell_text, escape};

pub fn report(data: &SummaryReport) -> String {
    let mut html = String::from("<div class='card'><h3>Dataset Summary</h3>");

    html.push_str(&format!(
        "<p><strong>Rows:</strong> {} &nbsp; <strong>Columns:</strong> {}</p>",
        data.shape.rows, data.shape.columns
    ));
    html.push_str(&format!(
        "<p><strong>Memory:</strong> {} &nbsp; <strong>Total missing:</strong> {} ({})</p>",
        escape(&data.memory_usage),
        data.total_missing,
        escape(&data.missing_percentage)
    ));
    if let (Some(size), Some(duplicates)) = (data.size, data.duplicate_rows) {
        html.push_str(&format!(
            "<p><strong>Cells:</strong> {} &nbsp; <strong>Duplicate rows:</strong> {}</p>",
            size, duplicates
        ));
    }

    if !data.insights.is_empty() {
        html.push_str("<h4>Insights</h4>");
        html.push_str(&bullet_list(&data.insights));
    }

    html.push_str(
        "<h4>Columns</h4><table class='table'>\
         <tr><th>Name</th><th>Type</th><th>Nulls</th><th>Unique</th>\
         <th>Stats</th><th>Top values</th><th>Outliers</th></tr>",
    );
    for column in &data.columns {
        html.push_str(&column_row(column));
    }
    html.push_str("</table></div>");
    html
}

fn column_row(column: &ColumnStat) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{} ({})</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape(&column.name),
        escape(&column.dtype),
        column.null_count,
        escape(&column.null_percentage),
        column.unique,
        stats_cell(column),
        top_values_cell(column),
        column.outliers.map(|n| n.to_string()).unwrap_or_default()
    )
}

/// Empty when `statistics` is absent — that means a non-numeric column, not
/// an error.
fn stats_cell(column: &ColumnStat) -> String {
    let Some(stats) = &column.statistics else {
        return String::new();
    };
    let mut cell = format!(
        "mean:{} median:{} std:{}",
        stats.mean, stats.median, stats.std
    );
    if let (Some(min), Some(max)) = (stats.min, stats.max) {
        cell.push_str(&format!(" min:{} max:{}", min, max));
    }
    if let Some(iqr) = stats.iqr {
        cell.push_str(&format!(" iqr:{}", iqr));
    }
    cell
}

fn top_values_cell(column: &ColumnStat) -> String {
    let Some(top) = &column.top_values else {
        return String::new();
    };
    top.iter()
        .map(|(value, count)| format!("{} ({})", escape(value), cell_text(count)))
        .collect::<Vec<_>>()
        .join(", ")
}
