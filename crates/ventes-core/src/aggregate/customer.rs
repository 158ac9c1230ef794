//! Customer rankings and loyalty.

use serde::Serialize;

use super::{group::sort_by_revenue_desc, ranking::rank_by_revenue, ratio, summarize_by};
use crate::table::Subset;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCustomer {
  pub customer:          String,
  pub country:           String,
  pub revenue:           f64,
  pub orders:            usize,
  pub revenue_per_order: f64,
}

/// The `n` customers with the highest revenue.
pub fn top_customers(subset: &Subset<'_>, n: usize) -> Vec<TopCustomer> {
  rank_by_revenue(subset, |r| r.customer.as_str())
    .into_iter()
    .take(n)
    .map(|g| TopCustomer {
      customer:          g.key.to_owned(),
      country:           g.first.country.clone(),
      revenue:           g.revenue,
      orders:            g.orders,
      revenue_per_order: ratio(g.revenue, g.orders as f64),
    })
    .collect()
}

/// A repeat buyer of Medium or Large transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoyalCustomer {
  pub customer: String,
  pub country:  String,
  /// Distinct orders containing a premium line.
  pub orders:   usize,
  pub revenue:  f64,
  pub quantity: u64,
}

/// Customers with at least `min_orders` distinct premium orders, highest
/// premium revenue first.
pub fn premium_loyal_customers(subset: &Subset<'_>, min_orders: usize) -> Vec<LoyalCustomer> {
  let premium = subset.filter(|r| r.transaction_size.is_premium());
  let mut groups: Vec<_> = summarize_by(&premium, |r| r.customer.as_str())
    .into_iter()
    .filter(|g| g.orders >= min_orders)
    .collect();
  sort_by_revenue_desc(&mut groups, |g| g.revenue);

  groups
    .into_iter()
    .map(|g| LoyalCustomer {
      customer: g.key.to_owned(),
      country:  g.first.country.clone(),
      orders:   g.orders,
      revenue:  g.revenue,
      quantity: g.quantity,
    })
    .collect()
}

/// Customer activity of one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryCustomers {
  pub country:              String,
  pub revenue:              f64,
  pub orders:               usize,
  pub customers:            usize,
  pub revenue_per_customer: f64,
}

/// Per-country customer performance, highest revenue first.
pub fn customers_by_country(subset: &Subset<'_>) -> Vec<CountryCustomers> {
  rank_by_revenue(subset, |r| r.country.as_str())
    .into_iter()
    .map(|g| CountryCustomers {
      country:              g.key.to_owned(),
      revenue:              g.revenue,
      orders:               g.orders,
      customers:            g.customers,
      revenue_per_customer: ratio(g.revenue, g.customers as f64),
    })
    .collect()
}
