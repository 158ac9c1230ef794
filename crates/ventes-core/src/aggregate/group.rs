//! Typed group-by over a subset.
//!
//! Groups come out in first-seen order, so a stable sort on any measure
//! breaks ties by the position of the group's first row.

use std::{
  collections::{HashMap, HashSet},
  hash::Hash,
};

use crate::{record::SaleRecord, table::Subset};

/// Standard measures for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary<'a, K> {
  pub key:       K,
  /// The first row of the group in subset order.
  pub first:     &'a SaleRecord,
  pub revenue:   f64,
  pub quantity:  u64,
  /// Number of order lines.
  pub lines:     usize,
  /// Distinct order numbers.
  pub orders:    usize,
  /// Distinct customers.
  pub customers: usize,
}

struct Accumulator<'a> {
  first:     &'a SaleRecord,
  revenue:   f64,
  quantity:  u64,
  lines:     usize,
  orders:    HashSet<u32>,
  customers: HashSet<&'a str>,
}

impl<'a> Accumulator<'a> {
  fn new(first: &'a SaleRecord) -> Self {
    Self {
      first,
      revenue: 0.0,
      quantity: 0,
      lines: 0,
      orders: HashSet::new(),
      customers: HashSet::new(),
    }
  }

  fn add(&mut self, record: &'a SaleRecord) {
    self.revenue += record.revenue;
    self.quantity += u64::from(record.quantity);
    self.lines += 1;
    self.orders.insert(record.order_number);
    self.customers.insert(record.customer.as_str());
  }

  fn finish<K>(self, key: K) -> GroupSummary<'a, K> {
    GroupSummary {
      key,
      first: self.first,
      revenue: self.revenue,
      quantity: self.quantity,
      lines: self.lines,
      orders: self.orders.len(),
      customers: self.customers.len(),
    }
  }
}

/// Group `subset` by `key`, returning one summary per group in first-seen
/// order.
pub fn summarize_by<'a, K, F>(
  subset: &Subset<'a>,
  mut key: F,
) -> Vec<GroupSummary<'a, K>>
where
  K: Eq + Hash + Clone,
  F: FnMut(&'a SaleRecord) -> K,
{
  let mut index: HashMap<K, usize> = HashMap::new();
  let mut groups: Vec<(K, Accumulator<'a>)> = Vec::new();

  for record in subset.iter() {
    let k = key(record);
    let slot = match index.get(&k) {
      Some(&slot) => slot,
      None => {
        let slot = groups.len();
        index.insert(k.clone(), slot);
        groups.push((k, Accumulator::new(record)));
        slot
      }
    };
    groups[slot].1.add(record);
  }

  groups
    .into_iter()
    .map(|(key, acc)| acc.finish(key))
    .collect()
}

/// Stable descending sort on revenue.
pub(crate) fn sort_by_revenue_desc<T>(items: &mut [T], revenue: impl Fn(&T) -> f64) {
  items.sort_by(|a, b| revenue(b).total_cmp(&revenue(a)));
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{table::SalesTable, test_support::record};

  #[test]
  fn groups_keep_first_seen_order_and_count_distinct() {
    let table = SalesTable::new(vec![
      record(1, "2003-01-10", "USA", "Planes", "A", 10.0),
      record(1, "2003-01-10", "USA", "Ships", "A", 5.0),
      record(2, "2003-02-10", "France", "Planes", "B", 20.0),
      record(3, "2003-03-10", "USA", "Planes", "C", 30.0),
    ]);
    let groups = summarize_by(&table.all(), |r| r.country.as_str());

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key, "USA");
    assert_eq!(groups[0].revenue, 45.0);
    assert_eq!(groups[0].lines, 3);
    assert_eq!(groups[0].orders, 2);
    assert_eq!(groups[0].customers, 2);
    assert_eq!(groups[0].first.order_number, 1);
    assert_eq!(groups[1].key, "France");
  }

  #[test]
  fn empty_subset_has_no_groups() {
    let table = SalesTable::default();
    assert!(summarize_by(&table.all(), |r| r.year).is_empty());
  }
}
