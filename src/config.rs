use crate::error::AppResult;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use toml;

/// Default application display name
pub const DEFAULT_APP_NAME: &str = "AgendaShare";

/// Default primary UI color (hex)
pub const DEFAULT_PRIMARY_COLOR: &str = "#1A73E8";

/// Default Google Calendar REST base URL
pub const DEFAULT_CALENDAR_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Default OAuth2 authorization endpoint
pub const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Default OAuth2 scope for calendar access
pub const DEFAULT_OAUTH_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Main configuration structure for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application display name shown in the screen header
    pub app_name: String,
    /// Primary UI color as a hex string
    pub primary_color: String,
    /// Google OAuth client ID; absence is fatal at sign-in, not at startup
    pub google_client_id: Option<String>,
    /// Google Calendar REST base URL (overridable for tests)
    pub calendar_base_url: String,
    /// OAuth2 authorization endpoint
    pub oauth_auth_url: String,
    /// OAuth2 scope requested at sign-in
    pub oauth_scope: String,
    /// Port for the localhost OAuth redirect listener
    pub oauth_redirect_port: u16,
    /// Path to the vCard file used for the contacts import
    pub contacts_path: String,
}

/// Optional values read from config/app.toml; env vars override these
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    app_name: Option<String>,
    primary_color: Option<String>,
    google_client_id: Option<String>,
    contacts_path: Option<String>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Optional file-based values
        let file_config = match fs::read_to_string("config/app.toml") {
            Ok(content) => toml::from_str::<FileConfig>(&content)?,
            Err(_) => FileConfig::default(),
        };

        let app_name = env::var("APP_NAME")
            .ok()
            .or(file_config.app_name)
            .unwrap_or_else(|| String::from(DEFAULT_APP_NAME));

        let primary_color = env::var("PRIMARY_COLOR")
            .ok()
            .or(file_config.primary_color)
            .unwrap_or_else(|| String::from(DEFAULT_PRIMARY_COLOR));

        // The client ID is a fatal precondition for sign-in only, so its
        // absence here is not an error
        let google_client_id = env::var("GOOGLE_CLIENT_ID")
            .ok()
            .or(file_config.google_client_id);

        let calendar_base_url = env::var("CALENDAR_BASE_URL")
            .unwrap_or_else(|_| String::from(DEFAULT_CALENDAR_BASE_URL));

        let oauth_auth_url =
            env::var("OAUTH_AUTH_URL").unwrap_or_else(|_| String::from(DEFAULT_AUTH_URL));

        let oauth_scope =
            env::var("OAUTH_SCOPE").unwrap_or_else(|_| String::from(DEFAULT_OAUTH_SCOPE));

        let oauth_redirect_port = env::var("OAUTH_REDIRECT_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        let contacts_path = env::var("CONTACTS_PATH")
            .ok()
            .or(file_config.contacts_path)
            .unwrap_or_else(|| String::from("contacts.vcf"));

        Ok(Config {
            app_name,
            primary_color,
            google_client_id,
            calendar_base_url,
            oauth_auth_url,
            oauth_scope,
            oauth_redirect_port,
            contacts_path,
        })
    }
}
