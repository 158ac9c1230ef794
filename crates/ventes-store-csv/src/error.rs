//! Error type for `ventes-store-csv`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// None of the candidate locations holds a data file.
  #[error("no sales data file found (looked in: {})", display_paths(.searched))]
  NotFound { searched: Vec<PathBuf> },

  #[error("could not read {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("missing column {0:?}")]
  MissingColumn(&'static str),

  /// A cell that parsed as CSV but not as its column's type.
  #[error("line {line}: invalid {column} {value:?}")]
  Malformed {
    line:   u64,
    column: &'static str,
    value:  String,
  },
}

fn display_paths(paths: &[PathBuf]) -> String {
  paths
    .iter()
    .map(|p| p.display().to_string())
    .collect::<Vec<_>>()
    .join(", ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
