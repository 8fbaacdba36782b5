// Cookie storage seam

/// External cookie store wiped during logout
pub trait CookieStore: Send + Sync {
    fn remove_all(&self);
}

/// No-op store for embedders without a cookie layer
#[derive(Debug, Default)]
pub struct NoCookies;

impl CookieStore for NoCookies {
    fn remove_all(&self) {}
}
