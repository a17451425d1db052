use crate::config::Config;
use crate::error::{config_error, other_error, AppResult, Error};
use tracing::info;
use url::Url;

/// In-memory session holding the bearer token for the process lifetime.
/// Created empty, filled by a successful sign-in, never persisted.
#[derive(Debug, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Create a new empty session
    pub fn new() -> Self {
        Self { token: None }
    }

    /// Get the bearer token, if signed in
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Store the token obtained from sign-in
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Drop the token
    pub fn clear(&mut self) {
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Relay page served on the first redirect hit. The implicit flow returns the
/// access token in the URL fragment, which never reaches the server, so the
/// page re-submits it as a query string.
const RELAY_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Signing in...</title></head>
<body><script>location.replace("/token?" + location.hash.substring(1));</script></body>
</html>"#;

/// Run the OAuth2 implicit-flow sign-in: open the system browser on the
/// authorization URL and catch the redirect on a localhost listener.
/// Fails with a configuration error when no client ID is set, and with
/// `AuthCancelled` when the user denies the authorization prompt.
pub async fn sign_in(config: &Config) -> AppResult<String> {
    let client_id = config
        .google_client_id
        .as_deref()
        .ok_or_else(|| config_error("GOOGLE_CLIENT_ID is not configured"))?;

    let redirect_uri = format!("http://localhost:{}", config.oauth_redirect_port);
    let state = uuid::Uuid::new_v4().to_string();

    let mut auth_url = Url::parse(&config.oauth_auth_url)
        .map_err(|e| config_error(&format!("Invalid authorization URL: {}", e)))?;
    auth_url
        .query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", &redirect_uri)
        .append_pair("response_type", "token")
        .append_pair("scope", &config.oauth_scope)
        .append_pair("state", &state);

    // Bind the listener before opening the browser so the redirect cannot race it
    let server = tiny_http::Server::http(("127.0.0.1", config.oauth_redirect_port))
        .map_err(|e| other_error(&format!("Failed to start redirect listener: {}", e)))?;

    info!("Opening browser for calendar authorization");
    webbrowser::open(auth_url.as_str())?;

    loop {
        let request = server
            .recv()
            .map_err(|e| other_error(&format!("Redirect listener error: {}", e)))?;
        let url = request.url().to_string();

        if let Some(query) = url.strip_prefix("/token?") {
            let result = parse_token_redirect(query, &state);
            let message = match &result {
                Ok(_) => "Signed in! You can close this window.",
                Err(_) => "Sign-in failed. You can close this window.",
            };
            let _ = request.respond(tiny_http::Response::from_string(message));
            return result;
        }

        // First hit still carries the token in the fragment; serve the relay page
        let mut response = tiny_http::Response::from_string(RELAY_PAGE);
        if let Ok(header) =
            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..])
        {
            response.add_header(header);
        }
        let _ = request.respond(response);
    }
}

/// Extract the access token from the relayed redirect parameters
fn parse_token_redirect(query: &str, expected_state: &str) -> AppResult<String> {
    let mut access_token = None;
    let mut state = None;
    let mut error = None;

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "access_token" => access_token = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    if error.as_deref() == Some("access_denied") {
        return Err(Error::AuthCancelled);
    }
    if let Some(e) = error {
        return Err(other_error(&format!("Authorization failed: {}", e)));
    }
    if state.as_deref() != Some(expected_state) {
        return Err(other_error("State parameter mismatch in redirect"));
    }

    // A redirect with no token and no error means the prompt was abandoned
    access_token.ok_or(Error::AuthCancelled)
}
