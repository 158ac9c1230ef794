//! Error types for `ventes-core`.

use thiserror::Error;

/// A column the filter engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum FilterColumn {
  #[strum(serialize = "year")]
  Year,
  #[strum(serialize = "country")]
  Country,
  #[strum(serialize = "product line")]
  ProductLine,
}

#[derive(Debug, Error)]
pub enum Error {
  /// A filter column is malformed on some row; the caller is expected to
  /// fall back to the unfiltered table.
  #[error("malformed {column} column at row {row}: {reason}")]
  DataShape {
    row:    usize,
    column: FilterColumn,
    reason: String,
  },

  #[error("unknown pending action: {0:?}")]
  UnknownAction(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
