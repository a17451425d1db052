use agendashare::startup;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    // Load configuration
    let config = startup::load_config().await?;

    // Run the screen loop
    startup::run(config).await
}
