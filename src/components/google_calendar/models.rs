use serde_json::Value;

/// Simplified calendar event representation
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub html_link: Option<String>,
    pub start_date_time: Option<String>,
    pub start_date: Option<String>,
    pub end_date_time: Option<String>,
    pub end_date: Option<String>,
}

impl CalendarEvent {
    /// Build an event from the provider's JSON representation
    pub fn from_api(event: &Value) -> Self {
        let field = |key: &str| {
            event
                .get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };
        let nested = |outer: &str, inner: &str| {
            event
                .get(outer)
                .and_then(|v| v.get(inner))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };

        CalendarEvent {
            id: field("id").unwrap_or_default(),
            summary: field("summary"),
            location: field("location"),
            html_link: field("htmlLink"),
            start_date_time: nested("start", "dateTime"),
            start_date: nested("start", "date"),
            end_date_time: nested("end", "dateTime"),
            end_date: nested("end", "date"),
        }
    }
}

/// Fields submitted when creating a new event
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub summary: String,
    pub start: chrono::DateTime<chrono::Local>,
    pub end: chrono::DateTime<chrono::Local>,
    pub location: Option<String>,
}
