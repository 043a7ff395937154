use crate::models::VisualizeRequest;
use crate::render;
use crate::session::Session;

use super::{require_loaded, ApiCall, Plan};

/// Chart type sent when the user leaves the selector alone; the backend
/// picks the charts itself.
pub const AUTO_CHART_TYPE: &str = "auto";

/// First trigger: render the chart-type form inline.
pub fn open(session: &Session) -> Plan {
    if let Some(reject) = require_loaded(session) {
        return reject;
    }
    Plan::Prompt {
        html: render::charts::prompt(),
    }
}

/// Nested confirm trigger: blank input means "auto".
pub fn confirm(session: &Session, raw: &str) -> Plan {
    if let Some(reject) = require_loaded(session) {
        return reject;
    }
    let trimmed = raw.trim();
    let chart_type = if trimmed.is_empty() {
        AUTO_CHART_TYPE.to_string()
    } else {
        trimmed.to_string()
    };
    Plan::Call(ApiCall::Visualize(VisualizeRequest { chart_type }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_session() -> Session {
        let mut session = Session::new();
        session.mark_loaded("a.csv".to_string());
        session
    }

    #[test]
    fn requires_loaded_dataset() {
        assert!(matches!(open(&Session::new()), Plan::Reject { .. }));
        assert!(matches!(confirm(&Session::new(), ""), Plan::Reject { .. }));
    }

    #[test]
    fn blank_confirm_requests_auto() {
        match confirm(&loaded_session(), "  ") {
            Plan::Call(ApiCall::Visualize(req)) => assert_eq!(req.chart_type, "auto"),
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn explicit_type_is_passed_through() {
        match confirm(&loaded_session(), "histogram") {
            Plan::Call(ApiCall::Visualize(req)) => assert_eq!(req.chart_type, "histogram"),
            other => panic!("expected call, got {:?}", other),
        }
    }
}
