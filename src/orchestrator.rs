use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::config::Config;
use crate::controllers::{
    clean, download, features, preview, reset, summary, upload, visualize, Action, ApiCall, Plan,
};
use crate::error::AppError;
use crate::gateway::Gateway;
use crate::models::{
    decode_reply, ChartSet, CleanReport, FeatureReport, PreviewRow, ResetResult, SummaryReport,
    UploadResult,
};
use crate::output::{OutputRegion, Ticket};
use crate::render;
use crate::session::Session;

/// A user trigger. Secondary input carried as `None` opens the inline form;
/// `Some(text)` is the nested confirm trigger (the text may be blank).
#[derive(Debug)]
pub enum Trigger {
    Upload { path: PathBuf },
    Preview { input: Option<String> },
    Summary,
    Features,
    Clean { input: Option<String> },
    Visualize { input: Option<String> },
    Download,
    Reset,
}

impl Trigger {
    pub fn action(&self) -> Action {
        match self {
            Trigger::Upload { .. } => Action::Upload,
            Trigger::Preview { .. } => Action::Preview,
            Trigger::Summary => Action::Summary,
            Trigger::Features => Action::Features,
            Trigger::Clean { .. } => Action::Clean,
            Trigger::Visualize { .. } => Action::Visualize,
            Trigger::Download => Action::Download,
            Trigger::Reset => Action::Reset,
        }
    }

    /// True when the trigger resolves locally by rendering a form.
    pub fn opens_prompt(&self) -> bool {
        matches!(
            self,
            Trigger::Preview { input: None }
                | Trigger::Clean { input: None }
                | Trigger::Visualize { input: None }
        )
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Done,
    /// A form is open; the next input line belongs to this action.
    PromptOpen(Action),
}

enum CallOutcome {
    Upload(UploadResult),
    Preview(Vec<PreviewRow>),
    Summary(SummaryReport),
    Features(FeatureReport),
    Clean(CleanReport),
    Charts(ChartSet),
    Downloaded { path: PathBuf, bytes: usize },
    Reset(ResetResult),
}

/// Wires triggers to controllers, the gateway and the output region, and
/// mediates every session transition. Failures always publish a message and
/// leave the orchestrator interactive; nothing here is fatal.
pub struct Orchestrator {
    session: Mutex<Session>,
    gateway: Gateway,
    output: OutputRegion,
    config: Config,
}

impl Orchestrator {
    pub fn new(config: Config) -> Self {
        Orchestrator {
            gateway: Gateway::new(config.backend_url.clone()),
            session: Mutex::new(Session::new()),
            output: OutputRegion::new(),
            config,
        }
    }

    pub fn session(&self) -> Session {
        self.session.lock().clone()
    }

    pub fn output(&self) -> &OutputRegion {
        &self.output
    }

    pub async fn dispatch(&self, trigger: Trigger) -> DispatchOutcome {
        let action = trigger.action();
        let ticket = self.output.begin(action);

        match self.plan(&trigger) {
            Plan::Reject { message } => {
                tracing::info!("{} rejected: {}", action.name(), message);
                self.output.publish(&ticket, render::message_card(&message));
                self.write_page().await;
                DispatchOutcome::Done
            }
            Plan::Prompt { html } => {
                self.output.publish(&ticket, html);
                self.write_page().await;
                DispatchOutcome::PromptOpen(action)
            }
            Plan::Call(call) => {
                let start = std::time::Instant::now();
                if let Some(progress) = progress_message(action) {
                    self.output.publish(&ticket, render::message_card(progress));
                    self.write_page().await;
                }
                match self.run_call(call).await {
                    Ok(outcome) => {
                        self.finish(&ticket, outcome);
                        tracing::info!("{} completed in {:?}", action.name(), start.elapsed());
                    }
                    Err(e) => {
                        tracing::error!("{} failed after {:?}: {}", action.name(), start.elapsed(), e);
                        self.output
                            .publish(&ticket, render::message_card(&error_message(action, &e)));
                    }
                }
                self.write_page().await;
                DispatchOutcome::Done
            }
        }
    }

    /// Pure decision step: no network, no rendering side effects.
    fn plan(&self, trigger: &Trigger) -> Plan {
        let session = self.session.lock().clone();
        match trigger {
            Trigger::Upload { path } => upload::plan(path),
            Trigger::Preview { input: None } => preview::open(&session),
            Trigger::Preview { input: Some(raw) } => preview::confirm(&session, raw),
            Trigger::Summary => summary::plan(&session),
            Trigger::Features => features::plan(&session),
            Trigger::Clean { input: None } => clean::open(&session),
            Trigger::Clean { input: Some(raw) } => clean::confirm(&session, raw),
            Trigger::Visualize { input: None } => visualize::open(&session),
            Trigger::Visualize { input: Some(raw) } => visualize::confirm(&session, raw),
            Trigger::Download => download::plan(),
            Trigger::Reset => reset::plan(),
        }
    }

    async fn run_call(&self, call: ApiCall) -> Result<CallOutcome, AppError> {
        match call {
            ApiCall::UploadFile { path, filename } => {
                let data = tokio::fs::read(&path).await?;
                let value = self
                    .gateway
                    .post_multipart_file("/upload", "file", filename, data)
                    .await?;
                Ok(CallOutcome::Upload(decode_reply(value)?))
            }
            ApiCall::Preview { n } => {
                let value = self
                    .gateway
                    .get_json("/preview", &[("n", n.to_string())])
                    .await?;
                Ok(CallOutcome::Preview(decode_reply(value)?))
            }
            ApiCall::Summary => {
                let value = self.gateway.get_json("/summary", &[]).await?;
                Ok(CallOutcome::Summary(decode_reply(value)?))
            }
            ApiCall::Features => {
                let value = self.gateway.get_json("/extract-features", &[]).await?;
                Ok(CallOutcome::Features(decode_reply(value)?))
            }
            ApiCall::Clean(config) => {
                let value = self.gateway.post_json("/clean", &config).await?;
                Ok(CallOutcome::Clean(decode_reply(value)?))
            }
            ApiCall::Visualize(request) => {
                let value = self.gateway.post_json("/visualize", &request).await?;
                Ok(CallOutcome::Charts(decode_reply(value)?))
            }
            ApiCall::DownloadCleaned => {
                let (body, filename) = self.gateway.get_bytes("/download-cleaned").await?;
                // Server-supplied name: keep only the final path component
                let name = filename
                    .as_deref()
                    .and_then(|n| Path::new(n).file_name())
                    .and_then(|n| n.to_str())
                    .unwrap_or(download::DEFAULT_FILENAME)
                    .to_string();
                tokio::fs::create_dir_all(&self.config.download_dir).await?;
                let path = self.config.download_dir.join(name);
                tokio::fs::write(&path, &body).await?;
                Ok(CallOutcome::Downloaded {
                    path,
                    bytes: body.len(),
                })
            }
            ApiCall::Reset => {
                let value = self.gateway.post_empty("/reset").await?;
                Ok(CallOutcome::Reset(decode_reply(value)?))
            }
        }
    }

    /// Publishes the decoded result; transitions ride inside the stale
    /// guard so a superseded response can neither paint nor mutate state.
    fn finish(&self, ticket: &Ticket, outcome: CallOutcome) {
        let published = match outcome {
            CallOutcome::Upload(result) => self
                .output
                .publish_with(ticket, || upload::apply(&mut self.session.lock(), &result)),
            CallOutcome::Preview(rows) => {
                self.output.publish(ticket, render::preview::table(&rows))
            }
            CallOutcome::Summary(report) => {
                self.output.publish(ticket, render::summary::report(&report))
            }
            CallOutcome::Features(report) => self
                .output
                .publish(ticket, render::features::report(&report)),
            CallOutcome::Clean(report) => self
                .output
                .publish_with(ticket, || clean::apply(&mut self.session.lock(), &report)),
            CallOutcome::Charts(set) => self.output.publish(ticket, render::charts::set(&set)),
            CallOutcome::Downloaded { path, bytes } => self
                .output
                .publish(ticket, download::saved_message(&path, bytes)),
            CallOutcome::Reset(result) => self
                .output
                .publish_with(ticket, || reset::apply(&mut self.session.lock(), &result)),
        };

        if published {
            self.sync_status();
        }
    }

    /// Mirrors the dataset label into the persistent status line.
    fn sync_status(&self) {
        let label = self
            .session
            .lock()
            .dataset_label()
            .map(|l| format!("Loaded {}", l));
        self.output.set_status(label.unwrap_or_default());
    }

    /// Rewrites the dashboard page from the current region + session.
    async fn write_page(&self) {
        let snapshot = self.output.snapshot();
        let session = self.session();
        let html = render::page::document(&snapshot, &session);
        if let Err(e) = tokio::fs::write(&self.config.dashboard_page, html).await {
            tracing::error!(
                "Failed to write dashboard page {}: {}",
                self.config.dashboard_page.display(),
                e
            );
        }
    }
}

fn progress_message(action: Action) -> Option<&'static str> {
    match action {
        Action::Upload => Some("Uploading file..."),
        Action::Summary => Some("Generating summary..."),
        Action::Features => Some("Extracting features..."),
        Action::Clean => Some("Cleaning in progress..."),
        Action::Visualize => Some("Generating visualizations..."),
        Action::Reset => Some("Resetting dataset..."),
        Action::Preview | Action::Download => None,
    }
}

/// Failure text follows the action: uploads report "Upload failed", the
/// rest report the server error verbatim behind an "Error:" prefix, and
/// client-side failures show their own message.
fn error_message(action: Action, error: &AppError) -> String {
    match (action, error) {
        (Action::Upload, AppError::Backend(msg)) => format!("Upload failed: {}", msg),
        (_, AppError::Backend(msg)) => format!("Error: {}", msg),
        _ => error.to_string(),
    }
}
