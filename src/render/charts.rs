use crate::models::ChartSet;

use super::escape;

/// Inline chart-type selector; "auto" lets the backend pick.
pub fn prompt() -> String {
    "<div class='card prompt'>\
       <h3>Visualize</h3>\
       <select id='chartType'>\
         <option value='auto'>Auto</option>\
       </select>\
       <div><button id='runViz' class='btn'>Generate</button></div>\
     </div>"
        .to_string()
}

/// Chart images are opaque blobs: the renderer only checks that the
/// reference is non-empty, never what it contains.
pub fn set(data: &ChartSet) -> String {
    let mut html = String::from("<div class='card'><h3>Visualizations</h3>");

    if data.charts.is_empty() {
        html.push_str("<p class='progress'>No charts produced for this dataset.</p>");
    }

    for chart in &data.charts {
        html.push_str("<div class='chart'>");
        html.push_str(&format!("<h4>{}</h4>", escape(&chart.title)));
        if chart.image.is_empty() {
            html.push_str("<p class='progress'>Chart image missing.</p>");
        } else {
            html.push_str(&format!(
                "<img class='img-preview' src='{}'>",
                escape(&chart.image)
            ));
        }
        html.push_str("</div>");
    }

    html.push_str("</div>");
    html
}
