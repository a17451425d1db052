use super::models::{CalendarEvent, NewEvent};
use crate::config::Config;
use crate::error::{calendar_api_error, AppResult, Error};
use crate::session::Session;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

/// Calendar operations the controller depends on; implemented by the real
/// client and by test mocks
#[async_trait]
pub trait CalendarApi {
    /// List events intersecting the half-open time window, recurring events
    /// expanded and ordered by start time
    async fn list_events(
        &self,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> AppResult<Vec<CalendarEvent>>;

    /// Create an event on the primary calendar and return it with the
    /// provider-assigned id and link
    async fn create_event(&self, new_event: NewEvent) -> AppResult<CalendarEvent>;
}

/// Client for the Google Calendar REST API, bound to the primary calendar
pub struct GoogleCalendarClient {
    config: Arc<RwLock<Config>>,
    session: Arc<RwLock<Session>>,
    client: Client,
}

impl GoogleCalendarClient {
    pub fn new(config: Arc<RwLock<Config>>, session: Arc<RwLock<Session>>) -> Self {
        Self {
            config,
            session,
            client: Client::new(),
        }
    }

    /// Read the bearer token, failing before any request is built when the
    /// session is empty
    async fn bearer_token(&self) -> AppResult<String> {
        let session = self.session.read().await;
        session
            .token()
            .map(|t| t.to_string())
            .ok_or(Error::Unauthenticated)
    }

    async fn events_url(&self) -> AppResult<Url> {
        let base = {
            let config = self.config.read().await;
            config.calendar_base_url.clone()
        };
        Url::parse(&format!("{}/calendars/primary/events", base))
            .map_err(|e| calendar_api_error(&format!("Failed to parse URL: {}", e)))
    }
}

#[async_trait]
impl CalendarApi for GoogleCalendarClient {
    async fn list_events(
        &self,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> AppResult<Vec<CalendarEvent>> {
        let access_token = self.bearer_token().await?;

        let mut url = self.events_url().await?;
        url.query_pairs_mut()
            .append_pair("timeMin", &range_start.to_rfc3339())
            .append_pair("timeMax", &range_end.to_rfc3339())
            .append_pair("singleEvents", "true")
            .append_pair("orderBy", "startTime");

        debug!(%url, "Fetching calendar events");
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| calendar_api_error(&format!("Failed to fetch events: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(calendar_api_error(&format!(
                "Failed to fetch events: HTTP {} - {}",
                status, error_body
            )));
        }

        let response_data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| calendar_api_error(&format!("Failed to parse events response: {}", e)))?;

        // An absent or empty item list is a valid empty window
        let events = response_data
            .get("items")
            .and_then(|i| i.as_array())
            .map(|items| items.iter().map(CalendarEvent::from_api).collect())
            .unwrap_or_default();

        Ok(events)
    }

    async fn create_event(&self, new_event: NewEvent) -> AppResult<CalendarEvent> {
        let access_token = self.bearer_token().await?;
        let url = self.events_url().await?;

        let mut body = json!({
            "summary": new_event.summary,
            "start": {"dateTime": new_event.start.to_rfc3339()},
            "end": {"dateTime": new_event.end.to_rfc3339()},
        });
        if let Some(location) = &new_event.location {
            body["location"] = json!(location);
        }

        debug!(summary = %new_event.summary, "Creating calendar event");
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| calendar_api_error(&format!("Failed to create event: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(calendar_api_error(&format!(
                "Failed to create event: HTTP {} - {}",
                status, error_body
            )));
        }

        let created: serde_json::Value = response
            .json()
            .await
            .map_err(|e| calendar_api_error(&format!("Failed to parse create response: {}", e)))?;

        Ok(CalendarEvent::from_api(&created))
    }
}
