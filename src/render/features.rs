use crate::models::FeatureReport;

use super::{bullet_list, escape};

pub fn report(data: &FeatureReport) -> String {
    let mut html = String::from("<div class='card'><h3>Features</h3>");

    html.push_str(&format!(
        "<p><strong>Numeric:</strong> {}</p>",
        escape(&data.numeric_features.join(", "))
    ));
    html.push_str(&format!(
        "<p><strong>Categorical:</strong> {}</p>",
        escape(&data.categorical_features.join(", "))
    ));
    if !data.datetime_features.is_empty() {
        html.push_str(&format!(
            "<p><strong>Datetime:</strong> {}</p>",
            escape(&data.datetime_features.join(", "))
        ));
    }

    if !data.strong_correlations.is_empty() {
        html.push_str("<h4>Strong correlations</h4><ul>");
        for pair in &data.strong_correlations {
            html.push_str(&format!(
                "<li>{} &amp; {}: {:.2}</li>",
                escape(&pair.f1),
                escape(&pair.f2),
                pair.corr
            ));
        }
        html.push_str("</ul>");
    }

    if !data.suggestions.is_empty() {
        html.push_str("<h4>Suggestions</h4>");
        html.push_str(&bullet_list(&data.suggestions));
    }

    html.push_str("</div>");
    html
}
