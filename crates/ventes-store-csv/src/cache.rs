//! [`TableCache`]: the loaded table plus its freshness window.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::{Duration, Instant},
};

use tracing::info;
use ventes_core::table::SalesTable;

use crate::{Result, loader::load_path};

/// Freshness window used when none is configured.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Keeps the table loaded from one file and reloads it once it is older
/// than the TTL.
///
/// Cloning the table out is cheap; it is reference-counted and never
/// mutated.
#[derive(Debug)]
pub struct TableCache {
  path:      PathBuf,
  ttl:       Duration,
  table:     Arc<SalesTable>,
  loaded_at: Instant,
}

impl TableCache {
  /// Load `path` now.
  pub fn open(path: impl AsRef<Path>, ttl: Duration) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let table = Arc::new(load_path(&path)?);
    Ok(Self {
      path,
      ttl,
      table,
      loaded_at: Instant::now(),
    })
  }

  pub fn path(&self) -> &Path { &self.path }

  /// The cached table, without checking freshness.
  pub fn table(&self) -> Arc<SalesTable> { Arc::clone(&self.table) }

  pub fn is_stale(&self) -> bool { self.loaded_at.elapsed() >= self.ttl }

  /// Reload the file if the window has passed. Returns whether a reload
  /// happened. On error the previous table stays in place.
  pub fn refresh_if_stale(&mut self) -> Result<bool> {
    if !self.is_stale() {
      return Ok(false);
    }
    self.reload()?;
    Ok(true)
  }

  /// Reload the file unconditionally.
  pub fn reload(&mut self) -> Result<()> {
    let table = load_path(&self.path)?;
    info!(
      rows = table.len(),
      age_secs = self.loaded_at.elapsed().as_secs(),
      "reloaded stale sales data"
    );
    self.table = Arc::new(table);
    self.loaded_at = Instant::now();
    Ok(())
  }

  /// The table, reloaded first when stale.
  pub fn get(&mut self) -> Result<Arc<SalesTable>> {
    self.refresh_if_stale()?;
    Ok(self.table())
  }
}
