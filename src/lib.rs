// fb-connect - Library root
// Client-side session orchestrator for the Facebook Graph and legacy REST APIs

pub mod authorize;
pub mod client;
pub mod config;
pub mod cookies;
pub mod dialog;
pub mod error;
pub mod logout;
pub mod request;
pub mod session;
pub mod transport;
pub mod types;

pub use client::FbClient;
pub use error::ConnectError;
pub use types::{DialogOutcome, Params, RequestOutcome};
