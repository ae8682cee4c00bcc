//! # Tracker Binary
//!
//! Headless driver for the derivation core: loads the catalog, market summary
//! and saved portfolio, keeps the derived state up to date and logs every
//! statistics republish until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use tracker::app::{App, Collaborators};
use tracker::config::AppConfig;
use tracker::services::api::ApiClient;
use tracker::services::portfolio::JsonPortfolioStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let _log_guard = tracker::debug::init();

    let config = AppConfig::from_env().context("reading configuration")?;
    config.validate().context("validating configuration")?;
    tracing::info!(
        api_url = %config.api_url,
        portfolio_path = %config.portfolio_path.display(),
        search_debounce_ms = config.search_debounce_ms,
        "Configuration loaded"
    );

    let api = Arc::new(ApiClient::from_config(&config));
    let collaborators = Collaborators {
        catalog: api.clone(),
        market: api,
        portfolio: Arc::new(JsonPortfolioStore::new(config.portfolio_path.clone())),
    };

    let mut app = App::new(collaborators, config.search_debounce());
    let handle = app.handle();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Ctrl-C received"),
            Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl-C"),
        }
        handle.shutdown();
    });

    app.start();
    app.run().await;

    let state = app.state.read();
    for stat in &state.statistics {
        match stat.percentage_change {
            Some(change) => println!(
                "{:<16} {:>20} {:>10}",
                stat.title,
                stat.value,
                shared::utils::format_percentage(change)
            ),
            None => println!("{:<16} {:>20}", stat.title, stat.value),
        }
    }
    println!(
        "{} coins listed, {} held",
        state.coins.len(),
        state.portfolio_coins.len()
    );

    Ok(())
}
