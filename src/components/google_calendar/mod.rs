mod agenda;
mod client;
pub mod models;
pub mod time;

pub use agenda::{AgendaEntry, AgendaIndex};
pub use client::{CalendarApi, GoogleCalendarClient};
pub use models::{CalendarEvent, NewEvent};
