use crate::error::AppError;
use crate::models::{CleanConfig, CleanReport, MissingMethod, MissingStrategy, OutlierMethod};
use crate::render;
use crate::session::Session;

use super::{require_loaded, ApiCall, Plan};

/// First trigger: render the cleaning form inline.
pub fn open(session: &Session) -> Plan {
    if let Some(reject) = require_loaded(session) {
        return reject;
    }
    Plan::Prompt {
        html: render::clean::prompt(),
    }
}

/// Nested confirm trigger carrying the filled-in form as one line of
/// tokens: `[method] [constant-value] [no-dedup] [no-drop-empty]
/// [outliers|outliers=iqr|outliers=zscore] [cap]`.
pub fn confirm(session: &Session, raw: &str) -> Plan {
    if let Some(reject) = require_loaded(session) {
        return reject;
    }
    match parse_config(raw) {
        Ok(config) => Plan::Call(ApiCall::Clean(config)),
        Err(e) => Plan::Reject {
            message: e.to_string(),
        },
    }
}

/// Builds the structured cleaning payload from the ad-hoc form input.
/// Defaults match the untouched form: duplicates and empty columns removed,
/// missing values dropped. The constant value is attached ONLY for the
/// constant method, and a blank one is kept as the empty string.
pub fn parse_config(raw: &str) -> Result<CleanConfig, AppError> {
    let mut tokens = raw.split_whitespace().peekable();

    let method = match tokens.peek() {
        Some(token) if !is_flag(token) => {
            let method = MissingMethod::parse(token)?;
            tokens.next();
            method
        }
        _ => MissingMethod::Drop,
    };

    let constant = if method == MissingMethod::Constant {
        match tokens.peek() {
            Some(token) if !is_flag(token) => {
                let value = (*token).to_string();
                tokens.next();
                value
            }
            _ => String::new(),
        }
    } else {
        String::new()
    };

    let mut config = CleanConfig::new(true, true, MissingStrategy::new(method, &constant));

    for token in tokens {
        match token {
            "no-dedup" => config.remove_duplicates = false,
            "no-drop-empty" => config.remove_empty_cols = false,
            "outliers" | "outliers=iqr" => {
                config.remove_outliers = Some(true);
                config.outlier_method = Some(OutlierMethod::Iqr);
            }
            "outliers=zscore" => {
                config.remove_outliers = Some(true);
                config.outlier_method = Some(OutlierMethod::Zscore);
            }
            "cap" => config.outlier_cap = Some(true),
            other => {
                return Err(AppError::Validation(format!(
                    "Unknown cleaning option '{}'",
                    other
                )))
            }
        }
    }

    if config.outlier_cap.is_some() && config.remove_outliers.is_none() {
        return Err(AppError::Validation(
            "'cap' only applies together with 'outliers'".to_string(),
        ));
    }

    Ok(config)
}

/// A successful clean unlocks the cleaned-data download.
pub fn apply(session: &mut Session, report: &CleanReport) -> String {
    session.mark_cleaned();
    render::clean::report(report)
}

fn is_flag(token: &str) -> bool {
    matches!(
        token,
        "no-dedup" | "no-drop-empty" | "outliers" | "outliers=iqr" | "outliers=zscore" | "cap"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requires_loaded_dataset() {
        assert!(matches!(open(&Session::new()), Plan::Reject { .. }));
        assert!(matches!(confirm(&Session::new(), "drop"), Plan::Reject { .. }));
    }

    #[test]
    fn empty_confirm_uses_form_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.remove_duplicates);
        assert!(config.remove_empty_cols);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["missing"]["method"], "drop");
        assert!(json["missing"].get("value").is_none());
    }

    #[test]
    fn constant_without_value_sends_empty_string() {
        let config = parse_config("constant").unwrap();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["missing"]["value"], "");
    }

    #[test]
    fn constant_with_value_and_flags() {
        let config = parse_config("constant 0 no-dedup").unwrap();
        assert!(!config.remove_duplicates);
        assert!(config.remove_empty_cols);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["missing"]["value"], "0");
    }

    #[test]
    fn non_constant_method_never_carries_a_value() {
        for method in ["drop", "mean", "median", "mode", "ffill", "bfill"] {
            let config = parse_config(method).unwrap();
            let json = serde_json::to_value(&config).unwrap();
            assert!(
                json["missing"].get("value").is_none(),
                "stray value for method {}",
                method
            );
        }
    }

    #[test]
    fn outlier_options_serialize_only_when_requested() {
        let plain = serde_json::to_value(parse_config("median").unwrap()).unwrap();
        assert!(plain.get("remove_outliers").is_none());
        assert!(plain.get("outlier_cap").is_none());

        let with = serde_json::to_value(parse_config("median outliers=zscore cap").unwrap()).unwrap();
        assert_eq!(with["remove_outliers"], true);
        assert_eq!(with["outlier_method"], "zscore");
        assert_eq!(with["outlier_cap"], true);
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert!(parse_config("shiny").is_err());
        assert!(parse_config("mean frobnicate").is_err());
        assert!(parse_config("mean cap").is_err());
    }

    #[test]
    fn apply_marks_session_cleaned() {
        let mut session = Session::new();
        session.mark_loaded("a.csv".to_string());
        let report: CleanReport = serde_json::from_value(json!({
            "report": {"summary": "ok", "actions": []}
        }))
        .unwrap();
        let html = apply(&mut session, &report);
        assert!(session.is_cleaned());
        assert!(html.contains("Cleaning Report"));
    }
}
