//! Sale records, one per order line.
//!
//! A record is one order line. Several lines share an order number; all lines
//! of an order carry the same status and date. Revenue is persisted upstream
//! as `unit_price × quantity` and is never recomputed here.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// ─── Order status ────────────────────────────────────────────────────────────

/// Lifecycle status of an order, as exported by the order system.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
pub enum OrderStatus {
  Shipped,
  #[serde(rename = "In Process")]
  #[strum(serialize = "In Process")]
  InProcess,
  Disputed,
  Cancelled,
  Resolved,
  #[serde(rename = "On Hold")]
  #[strum(serialize = "On Hold")]
  OnHold,
}

impl OrderStatus {
  /// Orders that count against the operational success rate and whose
  /// revenue is considered at risk.
  pub fn is_problematic(self) -> bool {
    matches!(self, Self::Cancelled | Self::Disputed)
  }
}

// ─── Transaction size ────────────────────────────────────────────────────────

/// Size bucket precomputed upstream from the magnitude of the line revenue.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
pub enum TransactionSize {
  Small,
  Medium,
  Large,
}

impl TransactionSize {
  /// Medium and Large transactions are the "high value" ones.
  pub fn is_premium(self) -> bool { matches!(self, Self::Medium | Self::Large) }
}

// ─── SaleRecord ──────────────────────────────────────────────────────────────

/// One line of the cleaned sales dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
  pub order_number:     u32,
  pub order_date:       NaiveDate,
  pub year:             i32,
  pub month:            u32,
  /// Calendar quarter, 1–4.
  pub quarter:          u32,
  pub country:          String,
  pub city:             String,
  pub customer:         String,
  pub product_code:     String,
  /// The product line ("gamme").
  pub product_line:     String,
  pub unit_price:       f64,
  /// Manufacturer's suggested retail price.
  pub suggested_price:  f64,
  pub quantity:         u32,
  pub revenue:          f64,
  pub status:           OrderStatus,
  pub transaction_size: TransactionSize,
}

impl SaleRecord {
  /// Whether `year`, `month` and `quarter` agree with `order_date`.
  pub fn calendar_is_consistent(&self) -> bool {
    self.year == self.order_date.year()
      && self.month == self.order_date.month()
      && self.quarter == (self.order_date.month() - 1) / 3 + 1
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[test]
  fn status_labels_round_trip_through_strum() {
    assert_eq!(OrderStatus::from_str("In Process").unwrap(), OrderStatus::InProcess);
    assert_eq!(OrderStatus::from_str("On Hold").unwrap(), OrderStatus::OnHold);
    assert_eq!(OrderStatus::Shipped.to_string(), "Shipped");
    assert!(OrderStatus::from_str("Lost").is_err());
  }

  #[test]
  fn only_cancelled_and_disputed_are_problematic() {
    use strum::IntoEnumIterator;
    let problematic: Vec<_> =
      OrderStatus::iter().filter(|s| s.is_problematic()).collect();
    assert_eq!(problematic, vec![OrderStatus::Disputed, OrderStatus::Cancelled]);
  }

  #[test]
  fn calendar_consistency_checks_quarter() {
    let mut record = crate::test_support::record(10100, "2003-05-07", "USA", "Motorcycles", "A", 10.0);
    assert!(record.calendar_is_consistent());
    record.quarter = 3;
    assert!(!record.calendar_is_consistent());
  }
}
