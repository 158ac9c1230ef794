//! Headline KPIs: revenue, orders, growth, concentration and operations.

use std::{
  collections::{BTreeMap, HashSet},
  hash::Hash,
};

use super::{group::sort_by_revenue_desc, percent, ratio, summarize_by};
use crate::{record::SaleRecord, table::Subset};

/// Sum of revenue; `0.0` for an empty subset.
pub fn revenue_total(subset: &Subset<'_>) -> f64 {
  subset.iter().map(|r| r.revenue).sum()
}

/// Number of distinct order numbers.
pub fn distinct_orders(subset: &Subset<'_>) -> usize {
  distinct_count(subset, |r| r.order_number)
}

/// Number of distinct values of `key`.
pub fn distinct_count<'a, K: Eq + Hash>(
  subset: &Subset<'a>,
  key: impl Fn(&'a SaleRecord) -> K,
) -> usize {
  subset.iter().map(key).collect::<HashSet<_>>().len()
}

/// Revenue per distinct order; `0.0` when there are no orders.
pub fn average_order_value(subset: &Subset<'_>) -> f64 {
  ratio(revenue_total(subset), distinct_orders(subset) as f64)
}

/// Units ordered per distinct order.
pub fn units_per_order(subset: &Subset<'_>) -> f64 {
  let units: u64 = subset.iter().map(|r| u64::from(r.quantity)).sum();
  ratio(units as f64, distinct_orders(subset) as f64)
}

/// Revenue per year, ascending by year.
pub fn revenue_by_year(subset: &Subset<'_>) -> BTreeMap<i32, f64> {
  let mut years = BTreeMap::new();
  for record in subset.iter() {
    *years.entry(record.year).or_insert(0.0) += record.revenue;
  }
  years
}

/// Growth of `year` over `prior`, in percent.
///
/// A prior year with no revenue gives `0.0`.
pub fn year_over_year_growth(subset: &Subset<'_>, year: i32, prior: i32) -> f64 {
  let years = revenue_by_year(subset);
  let current = years.get(&year).copied().unwrap_or(0.0);
  let previous = years.get(&prior).copied().unwrap_or(0.0);
  percent(current - previous, previous)
}

/// Growth between the two most recent years present in the subset.
///
/// Fewer than two distinct years gives `0.0`.
pub fn latest_growth(subset: &Subset<'_>) -> f64 {
  let years = revenue_by_year(subset);
  let mut recent = years.keys().rev();
  match (recent.next(), recent.next()) {
    (Some(&last), Some(&prior)) => {
      let previous = years[&prior];
      percent(years[&last] - previous, previous)
    }
    _ => 0.0,
  }
}

/// Share (in %) of total revenue contributed by the rows matching `pred`.
pub fn concentration_share(
  subset: &Subset<'_>,
  pred: impl Fn(&SaleRecord) -> bool,
) -> f64 {
  let matched: f64 = subset.iter().filter(|r| pred(r)).map(|r| r.revenue).sum();
  percent(matched, revenue_total(subset))
}

/// Share (in %) of revenue on cancelled or disputed orders.
pub fn at_risk_share(subset: &Subset<'_>) -> f64 {
  concentration_share(subset, |r| r.status.is_problematic())
}

/// Distinct cancelled or disputed orders.
pub fn problematic_orders(subset: &Subset<'_>) -> usize {
  distinct_count(&subset.filter(|r| r.status.is_problematic()), |r| {
    r.order_number
  })
}

/// Percentage of orders that are neither cancelled nor disputed.
///
/// `None` when the subset has no orders; callers decide what to show.
pub fn success_rate(subset: &Subset<'_>) -> Option<f64> {
  let orders = distinct_orders(subset);
  if orders == 0 {
    return None;
  }
  let failed = problematic_orders(subset);
  Some((orders - failed) as f64 / orders as f64 * 100.0)
}

/// The customer with the highest revenue and their share of the total.
pub fn top_customer(subset: &Subset<'_>) -> Option<(String, f64)> {
  let total = revenue_total(subset);
  let mut customers = summarize_by(subset, |r| r.customer.as_str());
  sort_by_revenue_desc(&mut customers, |g| g.revenue);
  customers
    .first()
    .map(|g| (g.key.to_owned(), percent(g.revenue, total)))
}
