//! # Portfolio Tasks
//!
//! One worker task owns every call into the [`PortfolioStore`]. Commands run
//! one at a time in the order they were queued, and each result is sent
//! before the next command starts, so the update loop always receives entry
//! sets in request order and the last one it applies is the newest.

use std::sync::Arc;

use async_channel::{Receiver, Sender};
use tokio::spawn;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::app::events::{AppEvent, DataSource};
use crate::core::service::PortfolioStore;

/// Work queued for the portfolio worker.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PortfolioCommand {
    /// Load the saved entries
    Load,
    /// Save a holding; a non-positive `amount` removes the coin
    Save { coin_id: String, amount: f64 },
}

/// Spawn the worker. It stops once every command sender is dropped.
pub(crate) fn spawn_worker(
    store: Arc<dyn PortfolioStore>,
    commands: Receiver<PortfolioCommand>,
    event_tx: Sender<AppEvent>,
) -> JoinHandle<()> {
    spawn(async move {
        while let Ok(command) = commands.recv().await {
            let event = match command {
                PortfolioCommand::Load => load(store.as_ref()).await,
                PortfolioCommand::Save { coin_id, amount } => {
                    save(store.as_ref(), &coin_id, amount).await
                }
            };
            if event_tx.send(event).await.is_err() {
                break;
            }
        }
        tracing::debug!("Portfolio worker stopped");
    })
}

async fn load(store: &dyn PortfolioStore) -> AppEvent {
    match store.load_entries().await {
        Ok(entries) => {
            info!(count = entries.len(), "Portfolio entries loaded");
            AppEvent::PortfolioPublished(entries)
        }
        Err(e) => {
            error!(error = %e, "Failed to load portfolio entries");
            AppEvent::FetchFailed {
                source: DataSource::Portfolio,
                error: e.to_string(),
            }
        }
    }
}

async fn save(store: &dyn PortfolioStore, coin_id: &str, amount: f64) -> AppEvent {
    match store.upsert(coin_id, amount).await {
        Ok(entries) => {
            info!(
                coin_id = %coin_id,
                amount = amount,
                entry_count = entries.len(),
                "Portfolio updated"
            );
            AppEvent::PortfolioPublished(entries)
        }
        Err(e) => {
            error!(
                coin_id = %coin_id,
                amount = amount,
                error = %e,
                "Failed to save portfolio entry - previous entries stay published"
            );
            AppEvent::FetchFailed {
                source: DataSource::Portfolio,
                error: e.to_string(),
            }
        }
    }
}
