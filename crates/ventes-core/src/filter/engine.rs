//! Derives the filtered subset from the table and the filter state.

use chrono::Datelike;
use tracing::warn;

use crate::{
  Error, Result,
  error::FilterColumn,
  filter::FilterState,
  record::SaleRecord,
  table::{SalesTable, Subset},
};

/// Keep the rows whose year, country and product line are all selected.
///
/// An empty selection in any dimension yields an empty subset. Row order is
/// preserved. Fails with [`Error::DataShape`] when a filter column is
/// malformed on any row.
pub fn apply<'a>(table: &'a SalesTable, state: &FilterState) -> Result<Subset<'a>> {
  let mut rows = Vec::new();
  for (index, record) in table.records().iter().enumerate() {
    check_shape(index, record)?;
    if state.matches(record.year, &record.country, &record.product_line) {
      rows.push(record);
    }
  }
  Ok(Subset::from_rows(rows))
}

/// [`apply`], falling back to the whole table when the shape check fails.
///
/// The second element reports whether the fallback was taken.
pub fn apply_or_unfiltered<'a>(
  table: &'a SalesTable,
  state: &FilterState,
) -> (Subset<'a>, bool) {
  match apply(table, state) {
    Ok(subset) => (subset, false),
    Err(e) => {
      warn!(error = %e, "filter application failed; using unfiltered data");
      (table.all(), true)
    }
  }
}

fn check_shape(row: usize, record: &SaleRecord) -> Result<()> {
  if record.country.trim().is_empty() {
    return Err(Error::DataShape {
      row,
      column: FilterColumn::Country,
      reason: "empty value".into(),
    });
  }
  if record.product_line.trim().is_empty() {
    return Err(Error::DataShape {
      row,
      column: FilterColumn::ProductLine,
      reason: "empty value".into(),
    });
  }
  // Month and quarter are not read here, so only the year is checked.
  if record.year != record.order_date.year() {
    return Err(Error::DataShape {
      row,
      column: FilterColumn::Year,
      reason: format!(
        "year {} does not match order date {}",
        record.year, record.order_date
      ),
    });
  }
  Ok(())
}
