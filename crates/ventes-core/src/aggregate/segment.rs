//! Customer segmentation by share of filtered revenue.

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

use super::{group::sort_by_revenue_desc, kpi::revenue_total, percent, ratio, summarize_by};
use crate::{config::SegmentThresholds, table::Subset};

/// Revenue tier of a customer.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter,
)]
pub enum Segment {
  #[strum(serialize = "VIP")]
  Vip,
  Moyen,
  Base,
}

impl Segment {
  /// Segment for a revenue share in percent. Shares at or below zero are
  /// not classified.
  pub fn classify(share: f64, thresholds: &SegmentThresholds) -> Option<Self> {
    if share <= 0.0 {
      None
    } else if share > thresholds.vip {
      Some(Self::Vip)
    } else if share > thresholds.mid {
      Some(Self::Moyen)
    } else {
      Some(Self::Base)
    }
  }
}

/// One classified customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerShare {
  pub customer: String,
  /// Country of the customer's first row.
  pub country:  String,
  pub revenue:  f64,
  pub orders:   usize,
  pub share:    f64,
  pub segment:  Segment,
}

/// Totals for one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentTotals {
  pub segment:              Segment,
  pub customers:            usize,
  pub orders:               usize,
  pub revenue:              f64,
  pub share:                f64,
  pub revenue_per_customer: f64,
}

/// Customer → segment mapping plus per-segment totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Segmentation {
  /// Classified customers, highest revenue first.
  pub customers: Vec<CustomerShare>,
  /// Segments that have at least one customer, ordered VIP, Moyen, Base.
  pub segments:  Vec<SegmentTotals>,
}

impl Segmentation {
  pub fn segment_of(&self, customer: &str) -> Option<Segment> {
    self
      .customers
      .iter()
      .find(|c| c.customer == customer)
      .map(|c| c.segment)
  }

  pub fn totals(&self, segment: Segment) -> Option<&SegmentTotals> {
    self.segments.iter().find(|s| s.segment == segment)
  }
}

/// Classify every customer of the subset. Customers without revenue are
/// left out.
pub fn segment_customers(
  subset: &Subset<'_>,
  thresholds: &SegmentThresholds,
) -> Segmentation {
  let total = revenue_total(subset);
  let mut groups = summarize_by(subset, |r| r.customer.as_str());
  sort_by_revenue_desc(&mut groups, |g| g.revenue);

  let customers: Vec<CustomerShare> = groups
    .into_iter()
    .filter_map(|g| {
      let share = percent(g.revenue, total);
      let segment = Segment::classify(share, thresholds)?;
      Some(CustomerShare {
        customer: g.key.to_owned(),
        country: g.first.country.clone(),
        revenue: g.revenue,
        orders: g.orders,
        share,
        segment,
      })
    })
    .collect();

  let segments = Segment::iter()
    .filter_map(|segment| {
      let members: Vec<&CustomerShare> =
        customers.iter().filter(|c| c.segment == segment).collect();
      if members.is_empty() {
        return None;
      }
      let revenue: f64 = members.iter().map(|c| c.revenue).sum();
      Some(SegmentTotals {
        segment,
        customers: members.len(),
        orders: members.iter().map(|c| c.orders).sum(),
        revenue,
        share: percent(revenue, total),
        revenue_per_customer: ratio(revenue, members.len() as f64),
      })
    })
    .collect();

  Segmentation {
    customers,
    segments,
  }
}
