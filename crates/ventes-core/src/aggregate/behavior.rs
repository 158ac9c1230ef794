//! Purchase behaviour and order operations.

use serde::Serialize;
use strum::IntoEnumIterator;

use super::{Baseline, kpi::revenue_total, percent, summarize_by};
use crate::{
  record::{OrderStatus, TransactionSize},
  table::Subset,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeBreakdown {
  pub size:    TransactionSize,
  pub revenue: f64,
  pub orders:  usize,
  pub share:   f64,
}

/// Revenue and distinct orders for every transaction size, Small to Large.
/// Sizes absent from the subset report zeros.
pub fn size_breakdown(subset: &Subset<'_>) -> Vec<SizeBreakdown> {
  let total = revenue_total(subset);
  let groups = summarize_by(subset, |r| r.transaction_size);
  TransactionSize::iter()
    .map(|size| {
      let (revenue, orders) = groups
        .iter()
        .find(|g| g.key == size)
        .map_or((0.0, 0), |g| (g.revenue, g.orders));
      SizeBreakdown {
        size,
        revenue,
        orders,
        share: percent(revenue, total),
      }
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusBreakdown {
  pub status:  OrderStatus,
  pub orders:  usize,
  pub revenue: f64,
}

/// Distinct orders and revenue per status present in the subset.
pub fn status_breakdown(subset: &Subset<'_>) -> Vec<StatusBreakdown> {
  let groups = summarize_by(subset, |r| r.status);
  OrderStatus::iter()
    .filter_map(|status| {
      let g = groups.iter().find(|g| g.key == status)?;
      Some(StatusBreakdown {
        status,
        orders: g.orders,
        revenue: g.revenue,
      })
    })
    .collect()
}

/// Fulfilment figures derived from [`status_breakdown`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operations {
  pub shipped_orders:    usize,
  /// Shipped orders over all orders, in percent.
  pub shipped_rate:      f64,
  pub in_process_orders: usize,
}

pub fn operations(statuses: &[StatusBreakdown]) -> Operations {
  let orders_with = |status: OrderStatus| {
    statuses
      .iter()
      .filter(|s| s.status == status)
      .map(|s| s.orders)
      .sum::<usize>()
  };
  let total: usize = statuses.iter().map(|s| s.orders).sum();
  let shipped = orders_with(OrderStatus::Shipped);
  Operations {
    shipped_orders:    shipped,
    shipped_rate:      percent(shipped as f64, total as f64),
    in_process_orders: orders_with(OrderStatus::InProcess),
  }
}

// ─── Problems ────────────────────────────────────────────────────────────────

/// Cancelled or disputed orders of one status, measured against the whole
/// unfiltered table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemStatus {
  pub status:       OrderStatus,
  pub orders:       usize,
  pub revenue:      f64,
  /// Orders as a percentage of all orders in the table.
  pub order_rate:   f64,
  /// Revenue as a percentage of all revenue in the table.
  pub revenue_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemYear {
  pub year:   i32,
  pub status: OrderStatus,
  pub orders: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProblemAnalysis {
  /// Disputed then Cancelled, when present.
  pub by_status: Vec<ProblemStatus>,
  /// Problem orders per `(year, status)`, chronological.
  pub by_year:   Vec<ProblemYear>,
}

impl ProblemAnalysis {
  pub fn is_empty(&self) -> bool { self.by_status.is_empty() }

  /// Combined order rate of every problem status.
  pub fn total_order_rate(&self) -> f64 {
    self.by_status.iter().map(|p| p.order_rate).sum()
  }
}

pub fn problem_analysis(subset: &Subset<'_>, baseline: &Baseline) -> ProblemAnalysis {
  let problems = subset.filter(|r| r.status.is_problematic());

  let by_status = status_breakdown(&problems)
    .into_iter()
    .map(|s| ProblemStatus {
      status:       s.status,
      orders:       s.orders,
      revenue:      s.revenue,
      order_rate:   percent(s.orders as f64, baseline.orders as f64),
      revenue_rate: percent(s.revenue, baseline.revenue),
    })
    .collect();

  let mut years = summarize_by(&problems, |r| (r.year, r.status));
  years.sort_by_key(|g| g.key);
  let by_year = years
    .into_iter()
    .map(|g| ProblemYear {
      year:   g.key.0,
      status: g.key.1,
      orders: g.orders,
    })
    .collect();

  ProblemAnalysis { by_status, by_year }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    table::SalesTable,
    test_support::{record, with_size, with_status},
  };

  fn table() -> SalesTable {
    SalesTable::new(vec![
      record(1, "2003-01-10", "USA", "Planes", "A", 100.0),
      record(1, "2003-01-10", "USA", "Ships", "A", 100.0),
      with_size(record(2, "2003-02-10", "USA", "Planes", "B", 600.0), TransactionSize::Large),
      with_status(record(3, "2003-03-10", "France", "Planes", "C", 100.0), OrderStatus::Cancelled),
      with_status(record(4, "2004-03-10", "France", "Planes", "C", 50.0), OrderStatus::Disputed),
      with_status(record(5, "2004-04-10", "USA", "Planes", "D", 50.0), OrderStatus::InProcess),
    ])
  }

  #[test]
  fn every_size_is_reported() {
    let table = table();
    let sizes = size_breakdown(&table.all());
    assert_eq!(sizes.len(), 3);
    assert_eq!(sizes[0].size, TransactionSize::Small);
    assert_eq!(sizes[0].orders, 4);
    assert_eq!(sizes[1].size, TransactionSize::Medium);
    assert_eq!(sizes[1].revenue, 0.0);
    assert_eq!(sizes[2].share, 60.0);
  }

  #[test]
  fn statuses_and_operations() {
    let table = table();
    let statuses = status_breakdown(&table.all());
    assert_eq!(statuses.len(), 4);
    assert_eq!(statuses[0].status, OrderStatus::Shipped);
    assert_eq!(statuses[0].orders, 2);

    let ops = operations(&statuses);
    assert_eq!(ops.shipped_orders, 2);
    assert_eq!(ops.shipped_rate, 40.0);
    assert_eq!(ops.in_process_orders, 1);
  }

  #[test]
  fn problems_are_measured_against_the_whole_table() {
    let table = table();
    let baseline = Baseline::of(&table);
    let france = table.all().filter(|r| r.country == "France");
    let problems = problem_analysis(&france, &baseline);

    assert_eq!(problems.by_status.len(), 2);
    assert_eq!(problems.by_status[0].status, OrderStatus::Disputed);
    assert_eq!(problems.by_status[0].order_rate, 20.0);
    assert_eq!(problems.by_status[1].revenue_rate, 10.0);
    assert_eq!(problems.total_order_rate(), 40.0);
    assert_eq!(problems.by_year.len(), 2);
    assert_eq!(problems.by_year[0].year, 2003);
  }

  #[test]
  fn no_problems_is_empty() {
    let table = table();
    let shipped = table.all().filter(|r| r.status == OrderStatus::Shipped);
    assert!(problem_analysis(&shipped, &Baseline::of(&table)).is_empty());
  }
}
