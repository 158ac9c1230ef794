//! Aggregation library: pure reducers over a [`Subset`].
//!
//! Every function here is stateless and tolerates an empty subset. Divisions
//! by zero resolve to `0.0`; no NaN or infinity ever leaves this module.
//!
//! [`Subset`]: crate::table::Subset

pub mod alerts;
pub mod behavior;
pub mod customer;
pub mod geo;
pub mod kpi;
pub mod product;
pub mod ranking;
pub mod score;
pub mod segment;
pub mod temporal;

mod group;

use serde::Serialize;

pub use group::{GroupSummary, summarize_by};

use crate::table::SalesTable;

/// `num / den`, or `0.0` when the denominator is zero.
pub fn ratio(num: f64, den: f64) -> f64 {
  if den == 0.0 { 0.0 } else { num / den }
}

/// `num / den × 100`, or `0.0` when the denominator is zero.
pub fn percent(num: f64, den: f64) -> f64 { ratio(num, den) * 100.0 }

/// Unfiltered totals that some aggregates compare the subset against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Baseline {
  pub revenue: f64,
  pub orders:  usize,
}

impl Baseline {
  pub fn of(table: &SalesTable) -> Self {
    Self {
      revenue: table.total_revenue(),
      orders:  table.distinct_orders(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zero_denominators_resolve_to_zero() {
    assert_eq!(ratio(5.0, 0.0), 0.0);
    assert_eq!(percent(0.0, 0.0), 0.0);
    assert_eq!(percent(1.0, 4.0), 25.0);
  }
}
