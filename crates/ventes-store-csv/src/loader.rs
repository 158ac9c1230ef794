//! Locating and reading the data file.

use std::{
  fs::File,
  io::Read,
  path::{Path, PathBuf},
};

use tracing::{debug, info, warn};
use ventes_core::table::SalesTable;

use crate::{
  Error, Result,
  columns::{DATA_PATHS, REQUIRED_COLUMNS},
  decode::RawRecord,
};

/// Pick the data file: `explicit` when given, otherwise the first of
/// [`DATA_PATHS`] (relative to `base`) that exists.
pub fn locate(explicit: Option<&Path>, base: &Path) -> Result<PathBuf> {
  if let Some(path) = explicit {
    if path.is_file() {
      return Ok(path.to_path_buf());
    }
    return Err(Error::NotFound {
      searched: vec![path.to_path_buf()],
    });
  }

  let candidates: Vec<PathBuf> = DATA_PATHS.iter().map(|p| base.join(p)).collect();
  match candidates.iter().find(|p| p.is_file()) {
    Some(found) => Ok(found.clone()),
    None => Err(Error::NotFound {
      searched: candidates,
    }),
  }
}

/// Load the whole table from the file at `path`.
pub fn load_path(path: &Path) -> Result<SalesTable> {
  let file = File::open(path).map_err(|source| Error::Io {
    path: path.to_path_buf(),
    source,
  })?;
  let table = load_from_reader(file)?;
  info!(rows = table.len(), path = %path.display(), "loaded sales data");
  Ok(table)
}

/// Load the whole table from CSV text.
///
/// The header row must name every column in [`REQUIRED_COLUMNS`]; a leading
/// byte order mark and surrounding whitespace in header names are ignored.
/// Any row that fails to decode fails the whole load.
pub fn load_from_reader(reader: impl Read) -> Result<SalesTable> {
  let mut rdr = csv::ReaderBuilder::new()
    .has_headers(true)
    .trim(csv::Trim::Headers)
    .from_reader(reader);

  let headers: Vec<String> = rdr
    .headers()?
    .iter()
    .map(|h| h.trim_start_matches('\u{FEFF}').to_owned())
    .collect();
  if let Some(missing) = REQUIRED_COLUMNS
    .iter()
    .find(|c| !headers.iter().any(|h| h.as_str() == **c))
  {
    return Err(Error::MissingColumn(*missing));
  }
  let headers = csv::StringRecord::from(headers);

  let mut records = Vec::new();
  for row in rdr.records() {
    let row = row?;
    let line = row.position().map_or(0, |p| p.line());
    let raw: RawRecord = row.deserialize(Some(&headers))?;
    records.push(raw.into_record(line)?);
  }
  debug!(rows = records.len(), "decoded csv rows");

  let skewed = records.iter().filter(|r| !r.calendar_is_consistent()).count();
  if skewed > 0 {
    warn!(rows = skewed, "month or quarter disagrees with the order date");
  }
  Ok(SalesTable::new(records))
}
