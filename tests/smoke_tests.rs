use agendashare::components::google_calendar::{AgendaIndex, CalendarEvent};
use agendashare::components::share::{app_url, composer};
use agendashare::config::Config;

/// Smoke test: the config defaults are usable without any environment
#[test]
fn config_loads_with_defaults() {
    let config = Config::load().unwrap();
    assert!(!config.app_name.is_empty());
    assert!(config.calendar_base_url.starts_with("https://"));
    assert!(config.oauth_auth_url.contains("oauth2"));
}

/// Smoke test: a fetched event flows through the agenda into a share message
#[test]
fn event_flows_from_agenda_to_message() {
    let events = vec![CalendarEvent {
        id: "event1".to_string(),
        summary: Some("Lunch".to_string()),
        location: Some("Cafe Central".to_string()),
        html_link: Some("https://calendar.google.com/event?eid=event1".to_string()),
        start_date_time: Some("2024-06-10T12:00:00Z".to_string()),
        end_date_time: Some("2024-06-10T13:00:00Z".to_string()),
        ..Default::default()
    }];

    let index = AgendaIndex::build(&events);
    let entry = &index.get("2024-06-10").unwrap()[0];
    assert_eq!(entry.name, "Lunch");
    assert_eq!(entry.time_range, "12:00 - 13:00");

    let message = composer::compose(
        &entry.name,
        "2024-06-10 12:00",
        "13:00",
        entry.event.location.as_deref(),
        entry.event.html_link.as_deref(),
    );
    assert_eq!(message.lines().count(), 4);
    assert!(message.contains("Lunch"));
    assert!(message.contains("Cafe Central"));

    let url = app_url(&message, Some("5491122334455"));
    assert!(url.starts_with("whatsapp://send?phone=5491122334455&text="));
    assert!(url.contains("Lunch"));
}
