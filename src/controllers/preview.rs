use crate::config::DEFAULT_PREVIEW_ROWS;
use crate::error::AppError;
use crate::render;
use crate::session::Session;

use super::{require_loaded, ApiCall, Plan};

/// Blank input falls back to the default of 10. Non-blank input that is not
/// a positive integer is rejected outright — no clamping, no request. No
/// upper bound is enforced client-side; the server guards against
/// unreasonable values.
pub fn parse_row_count(raw: &str) -> Result<u32, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_PREVIEW_ROWS);
    }
    trimmed
        .parse::<u32>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Row count must be a positive integer, got '{}'",
                trimmed
            ))
        })
}

/// First trigger: render the row-count form inline.
pub fn open(session: &Session) -> Plan {
    if let Some(reject) = require_loaded(session) {
        return reject;
    }
    Plan::Prompt {
        html: render::preview::prompt(),
    }
}

/// Nested confirm trigger: fire the actual request.
pub fn confirm(session: &Session, raw: &str) -> Plan {
    if let Some(reject) = require_loaded(session) {
        return reject;
    }
    match parse_row_count(raw) {
        Ok(n) => Plan::Call(ApiCall::Preview { n }),
        Err(e) => Plan::Reject {
            message: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::UPLOAD_FIRST_MESSAGE;

    fn loaded_session() -> Session {
        let mut session = Session::new();
        session.mark_loaded("a.csv — 3 rows × 2 cols".to_string());
        session
    }

    #[test]
    fn requires_loaded_dataset_before_any_request() {
        let session = Session::new();
        assert!(matches!(
            open(&session),
            Plan::Reject { ref message } if message == UPLOAD_FIRST_MESSAGE
        ));
        assert!(matches!(
            confirm(&session, "5"),
            Plan::Reject { ref message } if message == UPLOAD_FIRST_MESSAGE
        ));
    }

    #[test]
    fn empty_input_defaults_to_ten() {
        assert_eq!(parse_row_count("").unwrap(), 10);
        assert_eq!(parse_row_count("   ").unwrap(), 10);
        match confirm(&loaded_session(), "") {
            Plan::Call(ApiCall::Preview { n }) => assert_eq!(n, 10),
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn invalid_input_is_rejected_not_clamped() {
        assert!(parse_row_count("abc").is_err());
        assert!(parse_row_count("-3").is_err());
        assert!(parse_row_count("0").is_err());
        assert!(parse_row_count("3.5").is_err());
        assert!(matches!(
            confirm(&loaded_session(), "abc"),
            Plan::Reject { .. }
        ));
    }

    #[test]
    fn valid_count_issues_request_without_upper_bound() {
        match confirm(&loaded_session(), " 250000 ") {
            Plan::Call(ApiCall::Preview { n }) => assert_eq!(n, 250_000),
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn bare_trigger_opens_the_form() {
        assert!(matches!(open(&loaded_session()), Plan::Prompt { .. }));
    }
}
