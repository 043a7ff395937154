use std::path::Path;

use crate::render;

use super::{ApiCall, Plan};

/// Fallback filename when the backend names nothing in Content-Disposition.
pub const DEFAULT_FILENAME: &str = "cleaned.csv";

/// No precondition is enforced: the download is always attempted and the
/// backend decides whether cleaned data exists. The Cleaned sub-state only
/// drives the page affordance, never a short-circuit here.
pub fn plan() -> Plan {
    Plan::Call(ApiCall::DownloadCleaned)
}

pub fn saved_message(path: &Path, bytes: usize) -> String {
    render::message_card(&format!(
        "Cleaned CSV saved to {} ({} bytes)",
        path.display(),
        bytes
    ))
}
