use crate::session::Session;

use super::{require_loaded, ApiCall, Plan};

pub fn plan(session: &Session) -> Plan {
    if let Some(reject) = require_loaded(session) {
        return reject;
    }
    Plan::Call(ApiCall::Features)
}
