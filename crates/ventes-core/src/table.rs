//! The in-memory sales table and borrowed subsets of it.
//!
//! A [`SalesTable`] is built once from the data source and shared read-only
//! for the rest of the session. Every pipeline pass derives a [`Subset`] from
//! it; subsets borrow rows and keep the table's row order.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::record::SaleRecord;

// ─── Table ───────────────────────────────────────────────────────────────────

/// Immutable, loaded-once sales table.
#[derive(Debug, Clone, Default)]
pub struct SalesTable {
  records: Vec<SaleRecord>,
}

impl SalesTable {
  pub fn new(records: Vec<SaleRecord>) -> Self { Self { records } }

  pub fn records(&self) -> &[SaleRecord] { &self.records }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  /// Distinct years present, ascending.
  pub fn years(&self) -> Vec<i32> {
    let set: BTreeSet<i32> = self.records.iter().map(|r| r.year).collect();
    set.into_iter().collect()
  }

  /// Distinct countries present, ascending.
  pub fn countries(&self) -> Vec<String> {
    distinct_sorted(self.records.iter().map(|r| r.country.as_str()))
  }

  /// Distinct product lines present, ascending.
  pub fn product_lines(&self) -> Vec<String> {
    distinct_sorted(self.records.iter().map(|r| r.product_line.as_str()))
  }

  /// Revenue over the whole, unfiltered table.
  pub fn total_revenue(&self) -> f64 {
    self.records.iter().map(|r| r.revenue).sum()
  }

  /// Distinct orders over the whole, unfiltered table.
  pub fn distinct_orders(&self) -> usize {
    self
      .records
      .iter()
      .map(|r| r.order_number)
      .collect::<HashSet<_>>()
      .len()
  }

  /// A subset covering every row, in order.
  pub fn all(&self) -> Subset<'_> {
    Subset {
      rows: self.records.iter().collect(),
    }
  }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
  let set: BTreeSet<&str> = values.collect();
  set.into_iter().map(str::to_owned).collect()
}

// ─── Subset ──────────────────────────────────────────────────────────────────

/// A filtered, order-preserving view over a [`SalesTable`]. Never stored;
/// recomputed on every pass.
#[derive(Debug, Clone, Default)]
pub struct Subset<'a> {
  rows: Vec<&'a SaleRecord>,
}

impl<'a> Subset<'a> {
  pub fn from_rows(rows: Vec<&'a SaleRecord>) -> Self { Self { rows } }

  pub fn iter(&self) -> impl Iterator<Item = &'a SaleRecord> + '_ {
    self.rows.iter().copied()
  }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  /// Narrow this subset further, keeping order.
  pub fn filter(&self, mut keep: impl FnMut(&SaleRecord) -> bool) -> Self {
    Self {
      rows: self.rows.iter().copied().filter(|r| keep(r)).collect(),
    }
  }
}

// ─── Filter domain ───────────────────────────────────────────────────────────

/// The values each filter dimension can take, captured from the table when
/// the filter state is first initialised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterDomain {
  pub years:         Vec<i32>,
  pub countries:     Vec<String>,
  pub product_lines: Vec<String>,
}

impl FilterDomain {
  pub fn from_table(table: &SalesTable) -> Self {
    Self {
      years:         table.years(),
      countries:     table.countries(),
      product_lines: table.product_lines(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::record;

  #[test]
  fn domains_are_distinct_and_sorted() {
    let table = SalesTable::new(vec![
      record(1, "2004-01-10", "USA", "Planes", "A", 10.0),
      record(2, "2003-02-10", "France", "Classic Cars", "B", 20.0),
      record(3, "2004-03-10", "USA", "Classic Cars", "A", 30.0),
    ]);
    assert_eq!(table.years(), vec![2003, 2004]);
    assert_eq!(table.countries(), vec!["France", "USA"]);
    assert_eq!(table.product_lines(), vec!["Classic Cars", "Planes"]);
    assert_eq!(table.total_revenue(), 60.0);
    assert_eq!(table.distinct_orders(), 3);
  }

  #[test]
  fn subset_filter_keeps_order() {
    let table = SalesTable::new(vec![
      record(1, "2004-01-10", "USA", "Planes", "A", 10.0),
      record(2, "2003-02-10", "France", "Classic Cars", "B", 20.0),
      record(3, "2004-03-10", "USA", "Classic Cars", "A", 30.0),
    ]);
    let usa = table.all().filter(|r| r.country == "USA");
    let orders: Vec<u32> = usa.iter().map(|r| r.order_number).collect();
    assert_eq!(orders, vec![1, 3]);
  }

  #[test]
  fn empty_table_has_empty_domain() {
    let domain = FilterDomain::from_table(&SalesTable::default());
    assert!(domain.years.is_empty());
    assert!(domain.countries.is_empty());
    assert!(domain.product_lines.is_empty());
  }
}
