// Shared data model

use std::collections::BTreeMap;

use serde_json::Value;

/// Request parameter map.
///
/// Ordered so that dialog URLs encode deterministically regardless of
/// insertion order.
pub type Params = BTreeMap<String, String>;

/// Terminal outcome of a dispatched API request. Exactly one is produced
/// per dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// Server accepted the request. `None` for a bare `true` body.
    Success(Option<Value>),

    /// Server rejected the request, the body was unreadable, or the
    /// transport failed. `None` for a bare `false` body.
    Failure(Option<String>),
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success(_))
    }
}

/// Terminal outcome of an interactive dialog. The dialog contract
/// guarantees exactly one per invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    /// Flow completed; carries the redirect parameters
    Succeeded(Params),

    /// Dialog reported an error
    Failed(String),

    /// User dismissed the flow
    Cancelled,
}
