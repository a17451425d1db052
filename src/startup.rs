use crate::components::google_calendar::GoogleCalendarClient;
use crate::components::share::{Dispatcher, SystemOpener};
use crate::config::Config;
use crate::controller::Controller;
use crate::error::Error;
use crate::screen;
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Wire up the components and run the screen loop until the user quits
pub async fn run(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let app_name = {
        let config_read = config.read().await;
        info!(
            "Starting {} (theme color {})",
            config_read.app_name, config_read.primary_color
        );
        config_read.app_name.clone()
    };

    let session = Arc::new(RwLock::new(Session::new()));
    let calendar = GoogleCalendarClient::new(Arc::clone(&config), Arc::clone(&session));
    let dispatcher = Dispatcher::new(SystemOpener);

    let mut controller = Controller::new(config, session, calendar, dispatcher);
    screen::run(&mut controller, &app_name).await?;

    info!("Goodbye");
    Ok(())
}
