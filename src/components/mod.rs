pub mod contacts;
pub mod google_calendar;
pub mod share;
