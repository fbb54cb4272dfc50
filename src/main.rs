//! main.rs

use aseofi_api::configuration::get_configuration;
use aseofi_api::startup::Application;
use aseofi_api::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("aseofi-api".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");
    let application = Application::build(&configuration).await?;
    application.run_until_stopped().await?;
    Ok(())
}
