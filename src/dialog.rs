// Interactive authorization dialog seam

use async_trait::async_trait;

use crate::types::DialogOutcome;

/// Renders an interactive flow at a URL and delivers exactly one terminal
/// outcome.
///
/// The concrete implementation (embedded browser, system browser with a
/// loopback redirect, test stub) is supplied by the embedder. Once shown,
/// a dialog cannot be cancelled from this side; it runs to its outcome.
#[async_trait]
pub trait AuthDialog: Send + Sync {
    async fn show(&self, url: &str) -> DialogOutcome;
}
