// Public facade
// Wires the session store, request dispatcher, authorization flow and
// logout coordinator behind one handle

use std::sync::Arc;

use crate::authorize::AuthFlow;
use crate::config::ConnectConfig;
use crate::cookies::{CookieStore, NoCookies};
use crate::dialog::AuthDialog;
use crate::error::Result;
use crate::logout::{ListenerRegistry, LogoutCoordinator, LogoutListener};
use crate::request::RequestDispatcher;
use crate::session::SessionStore;
use crate::transport::{HttpTransport, Transport};
use crate::types::{DialogOutcome, Params, RequestOutcome};

/// One authorized API session and everything that operates on it.
///
/// The client runs no background tasks; every operation is an `async fn`
/// that resolves to exactly one terminal value. Concurrent requests are
/// independent and may complete out of order.
pub struct FbClient {
    session: Arc<SessionStore>,
    dispatcher: Arc<RequestDispatcher>,
    auth: AuthFlow,
    logout: LogoutCoordinator,
    listeners: Arc<ListenerRegistry>,
}

impl FbClient {
    /// Create a client with the default `reqwest` transport and no cookie
    /// layer
    pub fn new(config: ConnectConfig, dialog: Arc<dyn AuthDialog>) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::with_parts(
            config,
            transport,
            dialog,
            Arc::new(NoCookies),
        ))
    }

    /// Create a client from explicit collaborators
    pub fn with_parts(
        config: ConnectConfig,
        transport: Arc<dyn Transport>,
        dialog: Arc<dyn AuthDialog>,
        cookies: Arc<dyn CookieStore>,
    ) -> Self {
        let session = Arc::new(SessionStore::new());
        let dispatcher = Arc::new(RequestDispatcher::new(
            session.clone(),
            transport,
            config.endpoints.clone(),
        ));
        let listeners = Arc::new(ListenerRegistry::default());
        let auth = AuthFlow::new(session.clone(), dialog, config.endpoints);
        let logout = LogoutCoordinator::new(
            session.clone(),
            dispatcher.clone(),
            cookies,
            listeners.clone(),
        );

        Self {
            session,
            dispatcher,
            auth,
            logout,
            listeners,
        }
    }

    /// Run the interactive login flow for `app_id` with the given
    /// permission scopes
    pub async fn authorize(&self, app_id: &str, permissions: &[&str]) -> Result<DialogOutcome> {
        self.auth.authorize(app_id, permissions).await
    }

    /// Show a non-login interactive flow; `action` selects the endpoint
    pub async fn dialog(&self, action: &str, params: Params) -> DialogOutcome {
        self.auth.dialog(action, params).await
    }

    /// GET a graph path with no extra parameters
    pub async fn get(&self, path: &str) -> RequestOutcome {
        self.request(Some(path), "GET", Params::new()).await
    }

    /// Dispatch an API request. `Some(path)` targets the graph API,
    /// `None` the legacy REST endpoint.
    pub async fn request(
        &self,
        path: Option<&str>,
        method: &str,
        params: Params,
    ) -> RequestOutcome {
        self.dispatcher.dispatch(path, method, params).await
    }

    /// Legacy REST call: the API method travels as a `method` parameter
    pub async fn rest(&self, params: Params) -> RequestOutcome {
        self.request(None, "GET", params).await
    }

    /// Log out locally, best-effort revoke remotely. Never fails.
    pub async fn logout(&self) {
        self.logout.logout().await
    }

    pub fn add_logout_listener(&self, listener: Arc<dyn LogoutListener>) {
        self.listeners.add(listener);
    }

    pub fn remove_logout_listener(&self, listener: &Arc<dyn LogoutListener>) {
        self.listeners.remove(listener);
    }

    pub async fn is_session_valid(&self) -> bool {
        self.session.is_valid().await
    }

    /// Current access token: treat with care. `None` if no session exists.
    pub async fn access_token(&self) -> Option<String> {
        self.session.access_token().await
    }

    /// Session expiration in milliseconds since epoch, `0` if it never
    /// expires
    pub async fn access_expires(&self) -> i64 {
        self.session.expires().await
    }

    pub async fn set_access_token(&self, token: Option<String>) {
        self.session.set_access_token(token).await;
    }

    pub async fn set_access_expires(&self, at_ms: i64) {
        self.session.set_expires(at_ms).await;
    }

    /// Set the expiry from an `expires_in` value in seconds
    pub async fn set_access_expires_in(&self, expires_in: &str) -> Result<()> {
        self.session.set_expires_in(expires_in).await
    }
}
