// Configuration module
// Endpoint set and HTTP client tuning knobs

use serde::Deserialize;

/// OAuth redirect URI the authorization dialog navigates to on completion
pub const REDIRECT_URI: &str = "fbconnect://success";

/// Parameter key carrying the access token
pub const TOKEN: &str = "access_token";

/// Parameter key carrying the token lifetime in seconds
pub const EXPIRES: &str = "expires_in";

/// Base URLs for the four API surfaces
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Endpoints {
    /// Interactive OAuth authorization endpoint
    pub oauth_endpoint: String,

    /// Generic interactive UI server, used for non-login dialogs
    pub ui_server: String,

    /// Graph API base URL, joined with a resource path
    pub graph_base_url: String,

    /// Legacy REST endpoint; the API method travels as a `method` parameter
    pub rest_server_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            oauth_endpoint: "http://graph.facebook.com/oauth/authorize".to_string(),
            ui_server: "http://www.facebook.com/connect/uiserver.php".to_string(),
            graph_base_url: "https://graph.facebook.com/".to_string(),
            rest_server_url: "https://api.facebook.com/restserver.php".to_string(),
        }
    }
}

/// Client configuration
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ConnectConfig {
    /// Endpoint base URLs
    pub endpoints: Endpoints,

    /// Connect timeout in seconds for the default transport
    pub connect_timeout: u64,

    /// Full request timeout in seconds for the default transport
    pub request_timeout: u64,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            connect_timeout: 30,
            request_timeout: 300,
        }
    }
}
