// Request dispatch
// Builds outgoing parameters, resolves the target URL and interprets
// raw responses into structured outcomes

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::config::{Endpoints, TOKEN};
use crate::session::{valid_at, Session, SessionStore};
use crate::transport::Transport;
use crate::types::{Params, RequestOutcome};

/// Builds and dispatches API requests.
///
/// Dispatches are independent of each other: no queueing, no retries, no
/// ordering guarantee between concurrent calls.
pub struct RequestDispatcher {
    session: Arc<SessionStore>,
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
}

impl RequestDispatcher {
    pub fn new(
        session: Arc<SessionStore>,
        transport: Arc<dyn Transport>,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            session,
            transport,
            endpoints,
        }
    }

    /// Dispatch one API call and interpret the response.
    ///
    /// The access token is attached iff the session is valid at call time.
    /// `Some(path)` targets the graph API, `None` the legacy REST endpoint
    /// (callers pass the API method as a `method` parameter there).
    /// Every path through here ends in exactly one outcome; transport
    /// errors surface as `Failure`, never as panics or early returns.
    pub async fn dispatch(
        &self,
        path: Option<&str>,
        method: &str,
        mut params: Params,
    ) -> RequestOutcome {
        // One snapshot, so the validity judgement and the injected token
        // always come from the same token/expiry pair
        let session = self.session.snapshot().await;
        if let Some(token) = token_if_valid(&session, Utc::now().timestamp_millis()) {
            params.insert(TOKEN.to_string(), token.to_string());
        }
        params.insert("format".to_string(), "json".to_string());

        let url = match path {
            Some(path) => format!("{}{}", self.endpoints.graph_base_url, path),
            None => self.endpoints.rest_server_url.clone(),
        };

        match self.transport.open_url(&url, method, &params).await {
            Ok(body) => {
                tracing::debug!(body = %body, "Got response");
                interpret(&body)
            }
            Err(e) => {
                tracing::warn!(error = %e, url = %url, "Transport error");
                RequestOutcome::Failure(Some(e.to_string()))
            }
        }
    }
}

/// Token to attach to an outgoing request, derived from one consistent
/// session snapshot
fn token_if_valid(session: &Session, now_ms: i64) -> Option<&str> {
    match &session.access_token {
        Some(token) if valid_at(true, session.expires_at, now_ms) => Some(token),
        _ => None,
    }
}

/// Interpret a raw response body.
///
/// Some endpoints (e.g. POST to `/{post_id}/likes`) answer with a bare
/// `true` or `false`, which is not a parseable JSON object, so those are
/// handled before the structured parse.
pub fn interpret(body: &str) -> RequestOutcome {
    if body == "true" {
        return RequestOutcome::Success(None);
    }
    if body == "false" {
        return RequestOutcome::Failure(None);
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("error") {
            Some(error) => RequestOutcome::Failure(Some(stringify_error(error))),
            None => RequestOutcome::Success(Some(Value::Object(map))),
        },
        Ok(other) => RequestOutcome::Failure(Some(format!(
            "expected a JSON object, got: {other}"
        ))),
        Err(e) => RequestOutcome::Failure(Some(e.to_string())),
    }
}

/// Error values arrive either as a plain string or as a structured object
fn stringify_error(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
