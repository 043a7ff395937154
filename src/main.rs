use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use dashboard_client::config::Config;
use dashboard_client::controllers::Action;
use dashboard_client::logging;
use dashboard_client::orchestrator::{DispatchOutcome, Orchestrator, Trigger};
use dashboard_client::session::Stage;

#[derive(Debug)]
enum Command {
    Trigger(Trigger),
    Help,
    Status,
    Quit,
    Empty,
    Unknown(String),
}

/// Maps one input line onto a trigger. Secondary-input actions given
/// without an argument open their inline form; with an argument they
/// confirm directly.
fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let head = parts.next().unwrap_or("");
    let rest = parts.next().map(|s| s.trim().to_string());

    match head {
        "" => Command::Empty,
        "upload" => Command::Trigger(Trigger::Upload {
            path: PathBuf::from(rest.unwrap_or_default()),
        }),
        "preview" => Command::Trigger(Trigger::Preview { input: rest }),
        "summary" => Command::Trigger(Trigger::Summary),
        "features" => Command::Trigger(Trigger::Features),
        "clean" => Command::Trigger(Trigger::Clean { input: rest }),
        "visualize" | "viz" => Command::Trigger(Trigger::Visualize { input: rest }),
        "download" => Command::Trigger(Trigger::Download),
        "reset" => Command::Trigger(Trigger::Reset),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Wraps a pending form's secondary input into its confirm trigger. A blank
/// line confirms with the form's defaults.
fn confirm_trigger(action: Action, input: String) -> Option<Trigger> {
    match action {
        Action::Preview => Some(Trigger::Preview { input: Some(input) }),
        Action::Clean => Some(Trigger::Clean { input: Some(input) }),
        Action::Visualize => Some(Trigger::Visualize { input: Some(input) }),
        _ => None,
    }
}

fn print_help() {
    println!("Commands:");
    println!("  upload <path>       upload a CSV dataset");
    println!("  preview [n]         preview rows (bare command opens the form; blank confirm = 10)");
    println!("  summary             dataset summary report");
    println!("  features            feature extraction report");
    println!("  clean [options]     clean data (bare command opens the form)");
    println!("                      options: drop|mean|median|mode|constant <v>|ffill|bfill");
    println!("                               no-dedup no-drop-empty outliers[=iqr|=zscore] cap");
    println!("  visualize [type]    generate charts (blank type = auto)");
    println!("  download            download the cleaned CSV");
    println!("  reset               reset the session");
    println!("  status | help | quit");
    println!("  cancel              close an open form");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = Config::new()?;
    tracing::info!("backend at {}", config.backend_url);
    let page = config.dashboard_page.display().to_string();

    let orchestrator = Arc::new(Orchestrator::new(config));

    println!("Data Analysis Dashboard — rendering to {}", page);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<Action> = None;

    while let Some(line) = lines.next_line().await? {
        // An open form captures the next line wholesale, blank included
        if let Some(action) = pending.take() {
            if line.trim() == "cancel" {
                println!("{} form closed.", action.name());
                continue;
            }
            if let Some(trigger) = confirm_trigger(action, line) {
                spawn_dispatch(&orchestrator, trigger, &page);
            }
            continue;
        }

        match parse_command(&line) {
            Command::Empty => {}
            Command::Help => print_help(),
            Command::Status => {
                let session = orchestrator.session();
                let stage = match session.stage() {
                    Stage::Empty => "empty",
                    Stage::Loaded => "loaded",
                    Stage::Cleaned => "loaded (cleaned copy available)",
                };
                match session.dataset_label() {
                    Some(label) => println!("Session {}: {}", stage, label),
                    None => println!("Session {}.", stage),
                }
            }
            Command::Quit => break,
            Command::Unknown(cmd) => println!("Unknown command '{}'. Try 'help'.", cmd),
            Command::Trigger(trigger) if trigger.opens_prompt() => {
                // Form rendering is local and immediate; wait for it so the
                // next line can be routed into the form
                let action = trigger.action();
                if orchestrator.dispatch(trigger).await == DispatchOutcome::PromptOpen(action) {
                    pending = Some(action);
                    println!(
                        "{} form open — enter input (blank for defaults, 'cancel' to close).",
                        action.name()
                    );
                }
            }
            Command::Trigger(trigger) => spawn_dispatch(&orchestrator, trigger, &page),
        }
    }

    Ok(())
}

/// Network-bound triggers run detached so a second trigger can overlap an
/// in-flight one; the output region's tickets settle who gets to paint.
fn spawn_dispatch(orchestrator: &Arc<Orchestrator>, trigger: Trigger, page: &str) {
    let orchestrator = Arc::clone(orchestrator);
    let page = page.to_string();
    let action = trigger.action();
    tokio::spawn(async move {
        orchestrator.dispatch(trigger).await;
        println!("[{}] done — see {}", action.name(), page);
    });
}
