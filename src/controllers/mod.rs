pub mod clean;
pub mod download;
pub mod features;
pub mod preview;
pub mod reset;
pub mod summary;
pub mod upload;
pub mod visualize;

use std::path::PathBuf;

use crate::models::{CleanConfig, VisualizeRequest};
use crate::session::Session;

/// Message shown when an action needing a dataset runs against an empty
/// session. Shown before any request is issued.
pub const UPLOAD_FIRST_MESSAGE: &str = "Upload a CSV first";

/// One user-facing action of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Upload,
    Preview,
    Summary,
    Features,
    Clean,
    Visualize,
    Download,
    Reset,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Upload => "upload",
            Action::Preview => "preview",
            Action::Summary => "summary",
            Action::Features => "features",
            Action::Clean => "clean",
            Action::Visualize => "visualize",
            Action::Download => "download",
            Action::Reset => "reset",
        }
    }
}

/// What a controller decided to do with a trigger. Only `Call` touches the
/// network; the other two resolve entirely client-side.
#[derive(Debug)]
pub enum Plan {
    /// Validation failure: show the message, issue nothing.
    Reject { message: String },
    /// Secondary input needed: render the inline form and wait for the
    /// nested confirm trigger.
    Prompt { html: String },
    /// Preconditions hold: issue this backend call.
    Call(ApiCall),
}

/// The concrete backend request a controller asks for.
#[derive(Debug)]
pub enum ApiCall {
    UploadFile { path: PathBuf, filename: String },
    Preview { n: u32 },
    Summary,
    Features,
    Clean(CleanConfig),
    Visualize(VisualizeRequest),
    DownloadCleaned,
    Reset,
}

/// Shared precondition: most actions are meaningless without a dataset.
pub(crate) fn require_loaded(session: &Session) -> Option<Plan> {
    if session.is_loaded() {
        None
    } else {
        Some(Plan::Reject {
            message: UPLOAD_FIRST_MESSAGE.to_string(),
        })
    }
}
