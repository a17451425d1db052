use crate::components::contacts;
use crate::components::google_calendar::{time, AgendaIndex, CalendarApi, NewEvent};
use crate::components::share::{composer, DispatchOutcome, Dispatcher, LinkOpener};
use crate::config::Config;
use crate::error::{validation_error, AppResult};
use crate::session::{self, Session};
use chrono::Local;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Screen states. There is no path back to `LoggedOut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    LoggedOut,
    Loading,
    Idle,
}

/// Event-creation form: independent strings, no cross-field invariants beyond
/// the non-empty title checked at submission
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    pub title: String,
    pub date: String,
    pub start: String,
    pub end: String,
    pub location: String,
    pub phone: String,
}

/// Orchestrates the single screen: holds the session, the form, and the
/// agenda, and runs each user action as one sequential chain
pub struct Controller<C: CalendarApi, O: LinkOpener> {
    config: Arc<RwLock<Config>>,
    session: Arc<RwLock<Session>>,
    calendar: C,
    dispatcher: Dispatcher<O>,
    state: ScreenState,
    agenda: AgendaIndex,
    form: EventForm,
    contacts_count: Option<usize>,
}

impl<C: CalendarApi, O: LinkOpener> Controller<C, O> {
    pub fn new(
        config: Arc<RwLock<Config>>,
        session: Arc<RwLock<Session>>,
        calendar: C,
        dispatcher: Dispatcher<O>,
    ) -> Self {
        let form = EventForm {
            date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            ..EventForm::default()
        };

        Self {
            config,
            session,
            calendar,
            dispatcher,
            state: ScreenState::LoggedOut,
            agenda: AgendaIndex::default(),
            form,
            contacts_count: None,
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn agenda(&self) -> &AgendaIndex {
        &self.agenda
    }

    pub fn form(&self) -> &EventForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EventForm {
        &mut self.form
    }

    pub fn contacts_count(&self) -> Option<usize> {
        self.contacts_count
    }

    /// Run the browser sign-in, store the token, and load the agenda.
    /// Failure leaves the state at `LoggedOut`.
    pub async fn sign_in(&mut self) -> AppResult<()> {
        let config = self.config.read().await.clone();
        let token = session::sign_in(&config).await?;
        self.session.write().await.set_token(token);
        info!("Signed in");
        self.refresh().await;
        Ok(())
    }

    /// Rebuild the agenda for the current month. A failed fetch logs a
    /// warning and keeps the previous (stale) agenda.
    pub async fn refresh(&mut self) {
        self.state = ScreenState::Loading;
        match self.fetch_agenda().await {
            Ok(index) => self.agenda = index,
            Err(e) => warn!("Agenda refresh failed, keeping previous view: {}", e),
        }
        self.state = ScreenState::Idle;
    }

    async fn fetch_agenda(&self) -> AppResult<AgendaIndex> {
        let today = Local::now().date_naive();
        let (range_start, range_end) = time::month_window(today)?;
        let events = self.calendar.list_events(range_start, range_end).await?;
        Ok(AgendaIndex::build(&events))
    }

    /// Submit the form: validate, create the event, share it, refresh.
    /// Linear with no rollback; the first failing step aborts with its
    /// message and leaves earlier side effects in place.
    pub async fn submit_form(&mut self) -> AppResult<DispatchOutcome> {
        let form = self.form.clone();
        let title = form.title.trim();
        if title.is_empty() {
            return Err(validation_error("Title must not be empty"));
        }

        let start = time::combine_local(&form.date, &form.start)?;
        let end = time::combine_local(&form.date, &form.end)?;
        let location = non_empty(&form.location);

        let created = self
            .calendar
            .create_event(NewEvent {
                summary: title.to_string(),
                start,
                end,
                location: location.map(str::to_string),
            })
            .await?;
        info!(event_id = %created.id, "Created calendar event");

        // The share text uses the strings the user typed, not the
        // round-tripped instants
        let message = composer::compose(
            title,
            &format!("{} {}", form.date, form.start),
            &form.end,
            location,
            created.html_link.as_deref(),
        );
        let outcome = self.dispatcher.dispatch(&message, non_empty(&form.phone))?;

        self.form.title.clear();
        self.refresh().await;
        Ok(outcome)
    }

    /// One-shot contacts import; only the count is kept
    pub async fn import_contacts(&mut self) -> AppResult<usize> {
        let path = {
            let config = self.config.read().await;
            config.contacts_path.clone()
        };
        let count = contacts::import_count(Path::new(&path))?;
        self.contacts_count = Some(count);
        Ok(count)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
