#[macro_use]
extern crate tracing;

use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;

use finance_lib::config::Config;

const SERVICE_NAME: &str = "finance-server";

#[actix_web::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = registry::Registry::default()
        .with(LevelFilter::INFO)
        .with(tracing_subscriber::fmt::Layer::default());
    let tracing_guard = tracing::subscriber::set_default(subscriber);
    info!("tracing initialized");

    let config = Config::load()?;

    let telemetry_layer = config
        .telemetry
        .as_ref()
        .map(|telemetry| finance_lib::tracing::create_opentelemetry_layer(SERVICE_NAME, telemetry))
        .transpose()?;
    if telemetry_layer.is_none() {
        info!("No telemetry endpoint configured");
    }

    let subscriber = registry::Registry::default()
        .with(LevelFilter::INFO)
        .with(tracing_subscriber::fmt::Layer::default())
        .with(telemetry_layer);
    tracing::subscriber::set_global_default(subscriber).context("Unable to set up subscriber")?;
    drop(tracing_guard);

    let (expense_repo, income_repo) =
        finance_repo::sqlx_repo::create_repos(&config.database_url, config.max_pool_size).await?;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(finance_lib::tracing::create_middleware())
            .configure(finance_lib::app_config_func(
                expense_repo.clone(),
                income_repo.clone(),
            ))
    });

    info!(bind_address = %config.bind_address, "Starting server");
    server
        .bind(config.bind_address.as_str())
        .with_context(|| format!("Unable to bind to {}", config.bind_address))?
        .run()
        .await?;

    Ok(())
}
