use crate::models::ResetResult;
use crate::render;
use crate::session::Session;

use super::{ApiCall, Plan};

/// Reset runs regardless of session state.
pub fn plan() -> Plan {
    Plan::Call(ApiCall::Reset)
}

/// Confirmed reset empties the session and clears the label; anything else
/// leaves state untouched.
pub fn apply(session: &mut Session, result: &ResetResult) -> String {
    if result.success {
        session.mark_unloaded();
        render::message_card("Session reset. Upload a new CSV.")
    } else {
        render::message_card("Reset failed: backend did not confirm.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_empties_any_prior_state() {
        let mut session = Session::new();
        session.mark_loaded("a.csv".to_string());
        session.mark_cleaned();
        let html = apply(&mut session, &ResetResult { success: true });
        assert!(!session.is_loaded());
        assert!(session.dataset_label().is_none());
        assert!(html.contains("Session reset"));
    }

    #[test]
    fn unconfirmed_reset_changes_nothing() {
        let mut session = Session::new();
        session.mark_loaded("a.csv".to_string());
        apply(&mut session, &ResetResult { success: false });
        assert!(session.is_loaded());
    }
}
