//! Revenue rankings over arbitrary group keys.

use std::hash::Hash;

use super::{GroupSummary, group::sort_by_revenue_desc, summarize_by};
use crate::{record::SaleRecord, table::Subset};

/// Every group of `key`, sorted by summed revenue, highest first.
///
/// The sort is stable: groups with equal revenue keep the order in which
/// their first row appears in the subset.
pub fn rank_by_revenue<'a, K, F>(subset: &Subset<'a>, key: F) -> Vec<GroupSummary<'a, K>>
where
  K: Eq + Hash + Clone,
  F: FnMut(&'a SaleRecord) -> K,
{
  let mut groups = summarize_by(subset, key);
  sort_by_revenue_desc(&mut groups, |g| g.revenue);
  groups
}

/// The `n` groups with the highest summed revenue, as `(key, revenue)`.
pub fn top_n_by_revenue<'a, K, F>(subset: &Subset<'a>, key: F, n: usize) -> Vec<(K, f64)>
where
  K: Eq + Hash + Clone,
  F: FnMut(&'a SaleRecord) -> K,
{
  rank_by_revenue(subset, key)
    .into_iter()
    .take(n)
    .map(|g| (g.key, g.revenue))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{table::SalesTable, test_support::record};

  #[test]
  fn top_n_sorts_descending() {
    let table = SalesTable::new(vec![
      record(1, "2003-01-10", "USA", "Planes", "A", 10.0),
      record(2, "2003-01-10", "France", "Planes", "B", 30.0),
      record(3, "2003-01-10", "Spain", "Planes", "C", 20.0),
    ]);
    let top = top_n_by_revenue(&table.all(), |r| r.country.clone(), 2);
    assert_eq!(top, vec![("France".to_owned(), 30.0), ("Spain".to_owned(), 20.0)]);
  }

  #[test]
  fn ties_at_the_cut_go_to_the_earlier_group() {
    let table = SalesTable::new(vec![
      record(1, "2003-01-10", "USA", "Planes", "A", 50.0),
      record(2, "2003-01-11", "USA", "Planes", "B", 40.0),
      record(3, "2003-01-12", "USA", "Planes", "C", 30.0),
      record(4, "2003-01-13", "USA", "Planes", "D", 30.0),
    ]);
    let top = top_n_by_revenue(&table.all(), |r| r.customer.as_str(), 3);
    let names: Vec<&str> = top.iter().map(|(k, _)| *k).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
  }

  #[test]
  fn n_larger_than_groups_returns_all() {
    let table = SalesTable::new(vec![record(1, "2003-01-10", "USA", "Planes", "A", 50.0)]);
    assert_eq!(top_n_by_revenue(&table.all(), |r| r.year, 10).len(), 1);
  }
}
