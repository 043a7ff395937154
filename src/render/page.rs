use crate::output::Snapshot;
use crate::session::Session;

use super::escape;

/// Wraps the current output fragment and status line into a complete HTML
/// document. Written to disk after every action so the output region is
/// observable outside the process.
pub fn document(snapshot: &Snapshot, session: &Session) -> String {
    let status = if snapshot.status_line.is_empty() {
        String::new()
    } else {
        format!("<div class='status'>{}</div>", escape(&snapshot.status_line))
    };

    let download_hint = if session.is_cleaned() {
        "<div class='hint'>Cleaned dataset available — run the download action to save it.</div>"
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Data Analysis Dashboard</title>
<style>
  :root {{ --bg: #f5f6fa; --card: #ffffff; --border: #d9dce3; --text: #21242b; --dim: #6b7280; --accent: #2563eb; }}
  * {{ box-sizing: border-box; margin: 0; padding: 0; }}
  body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; background: var(--bg); color: var(--text); line-height: 1.5; padding: 2rem; }}
  h1 {{ font-size: 1.4rem; margin-bottom: 0.25rem; }}
  .status {{ color: var(--dim); margin-bottom: 1rem; }}
  .hint {{ color: var(--accent); margin-bottom: 1rem; }}
  .card {{ background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1rem 1.25rem; margin-bottom: 1rem; max-width: 960px; }}
  .card h3 {{ margin-bottom: 0.5rem; }}
  .card h4 {{ margin: 0.75rem 0 0.25rem; }}
  .progress {{ color: var(--dim); }}
  .table {{ border-collapse: collapse; width: 100%; margin-top: 0.5rem; }}
  .table th, .table td {{ border: 1px solid var(--border); padding: 4px 8px; text-align: left; font-size: 0.9rem; }}
  .table th {{ background: var(--bg); }}
  .btn {{ background: var(--accent); color: #fff; border: none; border-radius: 6px; padding: 8px 14px; }}
  .img-preview {{ max-width: 100%; border: 1px solid var(--border); border-radius: 6px; }}
  .chart {{ margin-bottom: 12px; }}
  .prompt input, .prompt select {{ width: 100%; padding: 8px; margin: 10px 0; border: 1px solid var(--border); border-radius: 6px; }}
</style>
</head>
<body>
<h1>Data Analysis Dashboard</h1>
{status}
{download_hint}
<div id="outputArea">
{fragment}
</div>
</body>
</html>
"#,
        status = status,
        download_hint = download_hint,
        fragment = snapshot.fragment
    )
}
