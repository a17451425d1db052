use crate::components::google_calendar::CalendarApi;
use crate::components::share::{DispatchOutcome, LinkOpener};
use crate::controller::{Controller, EventForm, ScreenState};
use crate::error::AppResult;
use inquire::{Confirm, Select, Text};

const ACTION_SIGN_IN: &str = "Sign in";
const ACTION_REFRESH: &str = "Refresh";
const ACTION_NEW_EVENT: &str = "New event";
const ACTION_IMPORT_CONTACTS: &str = "Import contacts";
const ACTION_QUIT: &str = "Quit";

/// The single screen: render the agenda, prompt for an action, run it.
/// All decisions live in the controller; this loop is glue.
pub async fn run<C: CalendarApi, O: LinkOpener>(
    controller: &mut Controller<C, O>,
    app_name: &str,
) -> AppResult<()> {
    loop {
        render(controller, app_name);

        let actions = match controller.state() {
            ScreenState::LoggedOut => vec![ACTION_SIGN_IN, ACTION_QUIT],
            _ => vec![
                ACTION_REFRESH,
                ACTION_NEW_EVENT,
                ACTION_IMPORT_CONTACTS,
                ACTION_QUIT,
            ],
        };

        match Select::new("Action", actions).prompt()? {
            ACTION_SIGN_IN => {
                if let Err(e) = controller.sign_in().await {
                    println!("⚠ {}", e);
                }
            }
            ACTION_REFRESH => controller.refresh().await,
            ACTION_NEW_EVENT => new_event(controller).await?,
            ACTION_IMPORT_CONTACTS => import_contacts(controller).await?,
            _ => return Ok(()),
        }
    }
}

fn render<C: CalendarApi, O: LinkOpener>(controller: &Controller<C, O>, app_name: &str) {
    println!("\n=== {} ===", app_name);
    if let Some(count) = controller.contacts_count() {
        println!("👥 {} contacts imported", count);
    }

    match controller.state() {
        ScreenState::LoggedOut => println!("Not signed in."),
        _ if controller.agenda().is_empty() => println!("No events this month."),
        _ => {
            for (day, entries) in controller.agenda().days() {
                println!("\n{}", day);
                for entry in entries {
                    println!("  • {} ({})", entry.name, entry.time_range);
                }
            }
        }
    }
}

async fn new_event<C: CalendarApi, O: LinkOpener>(
    controller: &mut Controller<C, O>,
) -> AppResult<()> {
    let form = controller.form().clone();
    let filled = EventForm {
        title: Text::new("Title").with_initial_value(&form.title).prompt()?,
        date: Text::new("Date (YYYY-MM-DD)")
            .with_initial_value(&form.date)
            .prompt()?,
        start: Text::new("Start (HH:MM)")
            .with_initial_value(&form.start)
            .prompt()?,
        end: Text::new("End (HH:MM)")
            .with_initial_value(&form.end)
            .prompt()?,
        location: Text::new("Location")
            .with_initial_value(&form.location)
            .prompt()?,
        phone: Text::new("Phone (with country code)")
            .with_initial_value(&form.phone)
            .prompt()?,
    };
    *controller.form_mut() = filled;

    match controller.submit_form().await {
        Ok(DispatchOutcome::App) => println!("Event created, shared via the messaging app."),
        Ok(DispatchOutcome::Web) => println!("Event created, shared via the web fallback."),
        Err(e) => println!("⚠ {}", e),
    }
    Ok(())
}

async fn import_contacts<C: CalendarApi, O: LinkOpener>(
    controller: &mut Controller<C, O>,
) -> AppResult<()> {
    let granted = Confirm::new("Allow access to device contacts?")
        .with_default(false)
        .prompt()?;
    if !granted {
        println!("Contacts permission denied.");
        return Ok(());
    }

    match controller.import_contacts().await {
        Ok(count) => println!("Imported {} contacts.", count),
        Err(e) => println!("⚠ {}", e),
    }
    Ok(())
}
