use super::models::CalendarEvent;
use chrono::DateTime;
use std::collections::BTreeMap;
use tracing::warn;

/// One row of the agenda view
#[derive(Debug, Clone)]
pub struct AgendaEntry {
    /// Display name, falling back when the provider sends no summary
    pub name: String,
    /// Formatted time range, or "All day"
    pub time_range: String,
    /// The event the entry was derived from
    pub event: CalendarEvent,
}

/// Day-keyed index of events used for display grouping. Rebuilt in full on
/// every refresh; keys are `YYYY-MM-DD` strings in ascending order and each
/// day's entries preserve provider order.
#[derive(Debug, Clone, Default)]
pub struct AgendaIndex {
    days: BTreeMap<String, Vec<AgendaEntry>>,
}

impl AgendaIndex {
    /// Build the index from a provider-ordered event list
    pub fn build(events: &[CalendarEvent]) -> Self {
        let mut days: BTreeMap<String, Vec<AgendaEntry>> = BTreeMap::new();

        for event in events {
            let Some((day_key, time_range)) = day_and_time(event) else {
                warn!(event_id = %event.id, "Skipping event with no usable start");
                continue;
            };
            let name = event
                .summary
                .clone()
                .unwrap_or_else(|| String::from("(untitled)"));
            days.entry(day_key).or_default().push(AgendaEntry {
                name,
                time_range,
                event: event.clone(),
            });
        }

        Self { days }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of days carrying at least one entry
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Iterate days in ascending key order
    pub fn days(&self) -> impl Iterator<Item = (&String, &Vec<AgendaEntry>)> {
        self.days.iter()
    }

    pub fn get(&self, day_key: &str) -> Option<&Vec<AgendaEntry>> {
        self.days.get(day_key)
    }
}

/// Derive the day key and time label from an event's effective start
fn day_and_time(event: &CalendarEvent) -> Option<(String, String)> {
    if let Some(start) = &event.start_date_time {
        let start_dt = DateTime::parse_from_rfc3339(start).ok()?;
        let day_key = start_dt.format("%Y-%m-%d").to_string();
        let time_range = match event
            .end_date_time
            .as_deref()
            .and_then(|e| DateTime::parse_from_rfc3339(e).ok())
        {
            Some(end_dt) => format!(
                "{} - {}",
                start_dt.format("%H:%M"),
                end_dt.format("%H:%M")
            ),
            None => start_dt.format("%H:%M").to_string(),
        };
        return Some((day_key, time_range));
    }

    if let Some(date) = &event.start_date {
        // All-day events carry the day key literally
        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        return Some((date.clone(), String::from("All day")));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed_event(id: &str, summary: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            summary: Some(summary.to_string()),
            start_date_time: Some(start.to_string()),
            end_date_time: Some(end.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_event_list_yields_empty_index() {
        let index = AgendaIndex::build(&[]);
        assert!(index.is_empty());
    }

    #[test]
    fn events_group_by_start_day_preserving_order() {
        let events = vec![
            timed_event("e1", "Standup", "2024-06-10T09:00:00Z", "2024-06-10T09:15:00Z"),
            timed_event("e2", "Lunch", "2024-06-10T12:00:00Z", "2024-06-10T13:00:00Z"),
            timed_event("e3", "Review", "2024-06-11T10:00:00Z", "2024-06-11T11:00:00Z"),
        ];

        let index = AgendaIndex::build(&events);
        assert_eq!(index.len(), 2);

        let monday = index.get("2024-06-10").unwrap();
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].name, "Standup");
        assert_eq!(monday[1].name, "Lunch");
        assert_eq!(monday[1].time_range, "12:00 - 13:00");

        let tuesday = index.get("2024-06-11").unwrap();
        assert_eq!(tuesday[0].name, "Review");
    }

    #[test]
    fn all_day_event_keys_on_its_date() {
        let events = vec![CalendarEvent {
            id: "d1".to_string(),
            summary: Some("Holiday".to_string()),
            start_date: Some("2024-06-12".to_string()),
            end_date: Some("2024-06-13".to_string()),
            ..Default::default()
        }];

        let index = AgendaIndex::build(&events);
        let day = index.get("2024-06-12").unwrap();
        assert_eq!(day[0].time_range, "All day");
    }

    #[test]
    fn event_without_start_is_skipped() {
        let events = vec![CalendarEvent {
            id: "broken".to_string(),
            summary: Some("???".to_string()),
            ..Default::default()
        }];

        let index = AgendaIndex::build(&events);
        assert!(index.is_empty());
    }

    #[test]
    fn missing_summary_falls_back() {
        let mut event = timed_event("e1", "x", "2024-06-10T12:00:00Z", "2024-06-10T13:00:00Z");
        event.summary = None;
        let index = AgendaIndex::build(&[event]);
        assert_eq!(index.get("2024-06-10").unwrap()[0].name, "(untitled)");
    }
}
