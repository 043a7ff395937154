use std::path::Path;

use crate::config::DATASET_EXTENSION;
use crate::models::UploadResult;
use crate::render;
use crate::session::Session;

use super::{ApiCall, Plan};

/// Validates the selected file before anything leaves the machine: a file
/// must be named at all and carry the dataset extension. Upload itself has
/// no loaded-session precondition — re-uploading replaces the dataset.
pub fn plan(path: &Path) -> Plan {
    let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
        return Plan::Reject {
            message: "Please choose a CSV to upload.".to_string(),
        };
    };

    if !filename.to_lowercase().ends_with(DATASET_EXTENSION) {
        return Plan::Reject {
            message: "Only CSV files allowed.".to_string(),
        };
    }

    Plan::Call(ApiCall::UploadFile {
        path: path.to_path_buf(),
        filename: filename.to_string(),
    })
}

/// Filename + shape summary for the status line.
pub fn label(result: &UploadResult) -> String {
    format!(
        "{} — {} rows × {} cols",
        result.filename, result.rows, result.columns
    )
}

/// Success flips the session to Loaded; anything else leaves it untouched.
pub fn apply(session: &mut Session, result: &UploadResult) -> String {
    if result.success {
        session.mark_loaded(label(result));
        render::message_card(&format!(
            "File loaded: {} ({} rows, {} columns)",
            result.filename, result.rows, result.columns
        ))
    } else {
        render::message_card("Upload failed: Unknown")
    }
}
