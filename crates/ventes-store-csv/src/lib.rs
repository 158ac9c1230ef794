//! CSV backend for the sales dashboard.
//!
//! Locates the cleaned sales export, decodes it into a
//! [`ventes_core::table::SalesTable`] and keeps the loaded table in a
//! [`TableCache`] for a freshness window.

mod columns;
mod decode;
mod loader;

pub mod cache;
pub mod error;

pub use cache::{DEFAULT_TTL, TableCache};
pub use columns::{DATA_PATHS, REQUIRED_COLUMNS};
pub use error::{Error, Result};
pub use loader::{load_from_reader, load_path, locate};

#[cfg(test)]
mod tests;
