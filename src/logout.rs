// Logout coordination
// Listener registry plus the local-first logout sequence

use std::sync::{Arc, Mutex};

use crate::cookies::CookieStore;
use crate::request::RequestDispatcher;
use crate::session::SessionStore;
use crate::types::{Params, RequestOutcome};

/// Observer notified around the logout sequence. Both hooks default to
/// no-ops so implementors override only what they care about.
pub trait LogoutListener: Send + Sync {
    fn on_logout_begin(&self) {}
    fn on_logout_finish(&self) {}
}

/// Ordered logout observers.
///
/// Registration order is notification order. Repeated registration of the
/// same listener is kept, it will be notified once per registration.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Mutex<Vec<Arc<dyn LogoutListener>>>,
}

impl ListenerRegistry {
    pub fn add(&self, listener: Arc<dyn LogoutListener>) {
        self.listeners.lock().unwrap().push(listener);
    }

    /// Remove the first registration of `listener`, matched by pointer
    /// identity
    pub fn remove(&self, listener: &Arc<dyn LogoutListener>) {
        let mut listeners = self.listeners.lock().unwrap();
        if let Some(pos) = listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
            listeners.remove(pos);
        }
    }

    /// Stable snapshot for one notification pass, so add/remove racing a
    /// pass cannot skip or double-notify within it
    pub fn snapshot(&self) -> Vec<Arc<dyn LogoutListener>> {
        self.listeners.lock().unwrap().clone()
    }
}

/// Drives logout: observer notifications, cookie wipe, best-effort remote
/// revocation, unconditional local clear.
pub struct LogoutCoordinator {
    session: Arc<SessionStore>,
    dispatcher: Arc<RequestDispatcher>,
    cookies: Arc<dyn CookieStore>,
    listeners: Arc<ListenerRegistry>,
}

impl LogoutCoordinator {
    pub fn new(
        session: Arc<SessionStore>,
        dispatcher: Arc<RequestDispatcher>,
        cookies: Arc<dyn CookieStore>,
        listeners: Arc<ListenerRegistry>,
    ) -> Self {
        Self {
            session,
            dispatcher,
            cookies,
            listeners,
        }
    }

    /// Log out locally and ask the server to expire the session.
    ///
    /// Local logout never fails and is never blocked by the remote side:
    /// a failed `auth.expireSession` call is logged and ignored, the
    /// session store is cleared either way. Safe to call on an already
    /// empty session.
    pub async fn logout(&self) {
        for listener in self.listeners.snapshot() {
            listener.on_logout_begin();
        }

        self.cookies.remove_all();

        let mut params = Params::new();
        params.insert("method".to_string(), "auth.expireSession".to_string());
        if let RequestOutcome::Failure(error) = self.dispatcher.dispatch(None, "GET", params).await
        {
            tracing::warn!(
                error = ?error,
                "auth.expireSession request failed, but local session state cleared"
            );
        }

        self.session.clear().await;

        for listener in self.listeners.snapshot() {
            listener.on_logout_finish();
        }
    }
}
