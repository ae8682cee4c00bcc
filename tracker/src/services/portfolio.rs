//! # Portfolio Stores
//!
//! [`PortfolioStore`] implementations: a JSON file for real sessions and an
//! in-memory store for tests and throwaway sessions.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::dto::portfolio::PortfolioEntry;
use tokio::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::core::service::PortfolioStore;

/// Insert, replace or remove the entry for `coin_id`.
///
/// A positive amount inserts or replaces; anything else removes.
fn apply_upsert(entries: &mut Vec<PortfolioEntry>, coin_id: &str, amount: f64) {
    if amount > 0.0 {
        match entries.iter_mut().find(|entry| entry.coin_id == coin_id) {
            Some(entry) => entry.amount = Some(amount),
            None => entries.push(PortfolioEntry::new(coin_id, amount)),
        }
    } else {
        entries.retain(|entry| entry.coin_id != coin_id);
    }
}

/// Entries persisted as a pretty-printed JSON array.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous file intact.
pub struct JsonPortfolioStore {
    path: PathBuf,
    // serialises read-modify-write cycles
    lock: Mutex<()>,
}

impl JsonPortfolioStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Vec<PortfolioEntry>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No portfolio file yet - starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::Parse(format!("Portfolio file {} is malformed: {}", self.path.display(), e))
        })
    }

    async fn write_entries(&self, entries: &[PortfolioEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(
            path = %self.path.display(),
            count = entries.len(),
            bytes = json.len(),
            "Portfolio file written"
        );
        Ok(())
    }
}

#[async_trait]
impl PortfolioStore for JsonPortfolioStore {
    async fn load_entries(&self) -> Result<Vec<PortfolioEntry>> {
        let _guard = self.lock.lock().await;
        self.read_entries().await
    }

    async fn upsert(&self, coin_id: &str, amount: f64) -> Result<Vec<PortfolioEntry>> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        apply_upsert(&mut entries, coin_id, amount);
        self.write_entries(&entries).await?;
        Ok(entries)
    }
}

/// Entries kept in memory only.
#[derive(Default)]
pub struct MemoryPortfolioStore {
    entries: RwLock<Vec<PortfolioEntry>>,
}

impl MemoryPortfolioStore {
    pub fn with_entries(entries: Vec<PortfolioEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl PortfolioStore for MemoryPortfolioStore {
    async fn load_entries(&self) -> Result<Vec<PortfolioEntry>> {
        Ok(self.entries.read().clone())
    }

    async fn upsert(&self, coin_id: &str, amount: f64) -> Result<Vec<PortfolioEntry>> {
        let mut entries = self.entries.write();
        apply_upsert(&mut entries, coin_id, amount);
        Ok(entries.clone())
    }
}
