//! Price feed with file-watch reload.
//!
//! Holds the current [`PriceTable`] snapshot behind an `Arc` and swaps it
//! when the backing JSON file changes:
//! - Uses `notify` crate for filesystem events
//! - Validation before applying (the new file must parse)
//! - Rollback on invalid file (previous snapshot stays current)
//!
//! Callers take one snapshot per batch, so a reload never lands mid-batch.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{info, warn};

use super::PriceTable;
use crate::error::Result;

/// Reload bookkeeping exposed to callers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedStatus {
    pub watching: bool,
    pub reload_count: u32,
    pub last_reload_success: bool,
    pub last_error: Option<String>,
    pub digest: String,
}

struct Shared {
    path: PathBuf,
    current: RwLock<Arc<PriceTable>>,
    status: Mutex<FeedStatus>,
}

impl Shared {
    fn reload(&self) -> Result<()> {
        match PriceTable::load(&self.path) {
            Ok(table) => {
                let digest = table.digest();
                let entries = table.len();
                *self.current.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(table);

                let mut status = self.status.lock().unwrap_or_else(|e| e.into_inner());
                status.reload_count += 1;
                status.last_reload_success = true;
                status.last_error = None;
                status.digest = digest;
                info!(path = ?self.path, entries, reloads = status.reload_count, "price table reloaded");
                Ok(())
            }
            Err(e) => {
                let mut status = self.status.lock().unwrap_or_else(|e| e.into_inner());
                status.last_reload_success = false;
                status.last_error = Some(e.to_string());
                warn!(path = ?self.path, error = %e, "price table reload failed, keeping previous snapshot");
                Err(e)
            }
        }
    }
}

/// Current price snapshot plus an optional file watcher
pub struct PriceFeed {
    shared: Arc<Shared>,
    _watcher: Option<RecommendedWatcher>,
}

impl PriceFeed {
    /// Load the price file once without watching it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let table = PriceTable::load(&path)?;
        let status = FeedStatus {
            last_reload_success: true,
            digest: table.digest(),
            ..FeedStatus::default()
        };
        Ok(Self {
            shared: Arc::new(Shared {
                path,
                current: RwLock::new(Arc::new(table)),
                status: Mutex::new(status),
            }),
            _watcher: None,
        })
    }

    /// Load the price file and reload it whenever it is modified
    pub fn watch(path: impl AsRef<Path>) -> Result<Self> {
        let mut feed = Self::open(path)?;
        let shared = Arc::clone(&feed.shared);

        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            match result {
                Ok(event) if is_price_file_event(&event, &shared.path) => {
                    // failure is recorded in status and logged
                    let _ = shared.reload();
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "price file watch error"),
            }
        })?;

        let dir = feed
            .shared
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        feed.shared
            .status
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .watching = true;
        info!(path = ?feed.shared.path, "price feed watching for changes");
        feed._watcher = Some(watcher);
        Ok(feed)
    }

    /// Snapshot to price one batch against
    pub fn snapshot(&self) -> Arc<PriceTable> {
        Arc::clone(&self.shared.current.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// Re-read the file now; on failure the previous snapshot stays current
    pub fn reload(&self) -> Result<()> {
        self.shared.reload()
    }

    pub fn status(&self) -> FeedStatus {
        self.shared
            .status
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn path(&self) -> &Path {
        &self.shared.path
    }
}

fn is_price_file_event(event: &Event, path: &Path) -> bool {
    let relevant = matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_));
    relevant
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some() && p.file_name() == path.file_name())
}
