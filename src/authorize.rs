// Authorization flow
// Builds the login handshake, delegates to the interactive dialog and
// writes the session through on success

use std::sync::Arc;

use url::form_urlencoded;

use crate::config::{Endpoints, EXPIRES, REDIRECT_URI, TOKEN};
use crate::dialog::AuthDialog;
use crate::error::Result;
use crate::session::SessionStore;
use crate::types::{DialogOutcome, Params};

pub struct AuthFlow {
    session: Arc<SessionStore>,
    dialog: Arc<dyn AuthDialog>,
    endpoints: Endpoints,
}

impl AuthFlow {
    pub fn new(
        session: Arc<SessionStore>,
        dialog: Arc<dyn AuthDialog>,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            session,
            dialog,
            endpoints,
        }
    }

    /// Run the interactive login handshake.
    ///
    /// On success the session store already reflects the new token when
    /// this returns, so a request issued from the caller's continuation
    /// sees a valid session. Failure and cancellation are forwarded
    /// verbatim and leave the session untouched. A malformed `expires_in`
    /// in the dialog result propagates as [`ConnectError::InvalidExpiry`].
    ///
    /// [`ConnectError::InvalidExpiry`]: crate::error::ConnectError::InvalidExpiry
    pub async fn authorize(&self, app_id: &str, permissions: &[&str]) -> Result<DialogOutcome> {
        let mut params = Params::new();
        params.insert("type".to_string(), "user_agent".to_string());
        params.insert("client_id".to_string(), app_id.to_string());
        params.insert("redirect_uri".to_string(), REDIRECT_URI.to_string());
        params.insert("scope".to_string(), permissions.join(","));

        let outcome = self.dialog("login", params).await;

        match &outcome {
            DialogOutcome::Succeeded(values) => {
                // Token first, then expiry, both before the caller sees
                // the outcome
                self.session
                    .set_access_token(values.get(TOKEN).cloned())
                    .await;
                if let Some(expires_in) = values.get(EXPIRES) {
                    self.session.set_expires_in(expires_in).await?;
                }
                let expires = self.session.expires().await;
                tracing::debug!(expires, "Login succeeded");
            }
            DialogOutcome::Failed(error) => {
                tracing::warn!(error = %error, "Login failed");
            }
            DialogOutcome::Cancelled => {
                tracing::debug!("Login cancelled");
            }
        }

        Ok(outcome)
    }

    /// Compose the dialog URL for `action` and hand off to the interactive
    /// dialog. `"login"` targets the OAuth endpoint, anything else the
    /// generic UI server.
    pub async fn dialog(&self, action: &str, params: Params) -> DialogOutcome {
        let url = self.dialog_url(action, &params);
        self.dialog.show(&url).await
    }

    fn dialog_url(&self, action: &str, params: &Params) -> String {
        let endpoint = if action == "login" {
            &self.endpoints.oauth_endpoint
        } else {
            &self.endpoints.ui_server
        };
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        format!("{endpoint}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    use crate::error::ConnectError;

    /// Captures the dialog URL and answers with a fixed outcome
    struct StubDialog {
        outcome: DialogOutcome,
        shown: Mutex<Vec<String>>,
    }

    impl StubDialog {
        fn with(outcome: DialogOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                shown: Mutex::new(Vec::new()),
            })
        }

        fn last_url(&self) -> String {
            self.shown.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl AuthDialog for StubDialog {
        async fn show(&self, url: &str) -> DialogOutcome {
            self.shown.lock().unwrap().push(url.to_string());
            self.outcome.clone()
        }
    }

    fn flow(dialog: Arc<StubDialog>) -> (AuthFlow, Arc<SessionStore>) {
        let session = Arc::new(SessionStore::new());
        let flow = AuthFlow::new(session.clone(), dialog, Endpoints::default());
        (flow, session)
    }

    fn succeeded(token: &str, expires_in: &str) -> DialogOutcome {
        let mut values = Params::new();
        values.insert(TOKEN.to_string(), token.to_string());
        values.insert(EXPIRES.to_string(), expires_in.to_string());
        DialogOutcome::Succeeded(values)
    }

    #[tokio::test]
    async fn test_authorize_builds_login_url() {
        let dialog = StubDialog::with(DialogOutcome::Cancelled);
        let (flow, _) = flow(dialog.clone());

        flow.authorize("1234", &["email", "publish_stream"])
            .await
            .unwrap();

        let url = dialog.last_url();
        assert!(url.starts_with("http://graph.facebook.com/oauth/authorize?"));
        assert!(url.contains("client_id=1234"));
        assert!(url.contains("type=user_agent"));
        assert!(url.contains("scope=email%2Cpublish_stream"));
        assert!(url.contains("redirect_uri=fbconnect%3A%2F%2Fsuccess"));
    }

    #[tokio::test]
    async fn test_authorize_success_writes_session_before_returning() {
        let dialog = StubDialog::with(succeeded("T", "3600"));
        let (flow, session) = flow(dialog);

        let before = Utc::now().timestamp_millis();
        let outcome = flow.authorize("1234", &["email"]).await.unwrap();
        let after = Utc::now().timestamp_millis();

        assert!(matches!(outcome, DialogOutcome::Succeeded(_)));
        assert_eq!(session.access_token().await.as_deref(), Some("T"));
        assert!(session.is_valid().await);

        let expires = session.expires().await;
        assert!(expires >= before + 3_600_000);
        assert!(expires <= after + 3_600_000);
    }

    #[tokio::test]
    async fn test_authorize_success_without_expiry_never_expires() {
        let mut values = Params::new();
        values.insert(TOKEN.to_string(), "T".to_string());
        let dialog = StubDialog::with(DialogOutcome::Succeeded(values));
        let (flow, session) = flow(dialog);

        flow.authorize("1234", &[]).await.unwrap();

        assert_eq!(session.expires().await, 0);
        assert!(session.is_valid().await);
    }

    #[tokio::test]
    async fn test_authorize_malformed_expiry_propagates() {
        let dialog = StubDialog::with(succeeded("T", "later"));
        let (flow, _) = flow(dialog);

        let err = flow.authorize("1234", &["email"]).await.unwrap_err();
        assert!(matches!(err, ConnectError::InvalidExpiry { .. }));
    }

    #[tokio::test]
    async fn test_authorize_oversized_expiry_propagates() {
        // Parseable seconds value whose millisecond conversion overflows
        let dialog = StubDialog::with(succeeded("T", &i64::MAX.to_string()));
        let (flow, _) = flow(dialog);

        let err = flow.authorize("1234", &["email"]).await.unwrap_err();
        assert!(matches!(err, ConnectError::InvalidExpiry { .. }));
    }

    #[tokio::test]
    async fn test_authorize_failure_leaves_session_untouched() {
        let dialog = StubDialog::with(DialogOutcome::Failed("denied".to_string()));
        let (flow, session) = flow(dialog);

        let outcome = flow.authorize("1234", &["email"]).await.unwrap();

        assert_eq!(outcome, DialogOutcome::Failed("denied".to_string()));
        assert_eq!(session.access_token().await, None);
        assert!(!session.is_valid().await);
    }

    #[tokio::test]
    async fn test_authorize_cancel_leaves_session_untouched() {
        let dialog = StubDialog::with(DialogOutcome::Cancelled);
        let (flow, session) = flow(dialog);

        let outcome = flow.authorize("1234", &["email"]).await.unwrap();

        assert_eq!(outcome, DialogOutcome::Cancelled);
        assert!(!session.is_valid().await);
    }

    #[tokio::test]
    async fn test_non_login_dialog_targets_ui_server() {
        let dialog = StubDialog::with(DialogOutcome::Cancelled);
        let (flow, _) = flow(dialog.clone());

        let mut params = Params::new();
        params.insert("to".to_string(), "4321".to_string());
        flow.dialog("stream.publish", params).await;

        let url = dialog.last_url();
        assert!(url.starts_with("http://www.facebook.com/connect/uiserver.php?"));
        assert!(url.contains("to=4321"));
    }

    #[tokio::test]
    async fn test_dialog_url_encoding_is_deterministic() {
        let dialog = StubDialog::with(DialogOutcome::Cancelled);
        let (flow, _) = flow(dialog);

        let mut a = Params::new();
        a.insert("b".to_string(), "2".to_string());
        a.insert("a".to_string(), "1".to_string());

        let mut b = Params::new();
        b.insert("a".to_string(), "1".to_string());
        b.insert("b".to_string(), "2".to_string());

        assert_eq!(flow.dialog_url("login", &a), flow.dialog_url("login", &b));
        assert!(flow.dialog_url("login", &a).ends_with("?a=1&b=2"));
    }
}
