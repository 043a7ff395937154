use crate::models::CleanReport;

use super::{bullet_list, escape};

/// Inline cleaning form. Defaults mirror the confirmed payload when the
/// user submits it untouched: duplicates and empty columns removed, missing
/// values dropped, outliers untouched.
pub fn prompt() -> String {
    "<div class='card prompt'>\
       <h3>Clean Data</h3>\
       <div><label>Missing values:</label>\
         <select id='missingMethod'>\
           <option value='drop'>Drop rows</option>\
           <option value='mean'>Fill numeric with mean</option>\
           <option value='median'>Fill numeric with median</option>\
           <option value='mode'>Fill with mode</option>\
           <option value='constant'>Fill with constant</option>\
           <option value='ffill'>Forward fill</option>\
           <option value='bfill'>Backward fill</option>\
         </select></div>\
       <div><label>Constant value (if chosen):</label>\
         <input id='constVal' placeholder='e.g. 0'></div>\
       <div>\
         <label><input type='checkbox' id='removeDup' checked> Remove duplicates</label><br>\
         <label><input type='checkbox' id='removeEmpty' checked> Remove empty columns</label><br>\
         <label><input type='checkbox' id='removeOutliers'> Handle outliers (iqr or zscore, cap instead of drop)</label>\
       </div>\
       <div><button id='runClean' class='btn'>Run Cleaning</button></div>\
     </div>"
        .to_string()
}

/// Cleaning report plus the download affordance it unlocks.
pub fn report(data: &CleanReport) -> String {
    let mut html = format!(
        "<div class='card'><h3>Cleaning Report</h3><p>{}</p>",
        escape(&data.report.summary)
    );

    if let (Some(before), Some(after)) = (&data.report.before, &data.report.after) {
        html.push_str(&format!(
            "<p><strong>Shape:</strong> {} × {} → {} × {}</p>",
            before.rows, before.columns, after.rows, after.columns
        ));
    }

    html.push_str(&bullet_list(&data.report.actions));
    html.push_str(
        "<p><button id='downloadCleaned' class='btn'>Download Cleaned CSV</button></p></div>",
    );
    html
}
