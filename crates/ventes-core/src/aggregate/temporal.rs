//! Time-bucketed revenue: years, quarters, months and seasonality.

use serde::Serialize;

use super::{GroupSummary, kpi::latest_growth, percent, ratio, summarize_by};
use crate::{config::TemporalBands, record::SaleRecord, table::Subset};

// ─── Yearly ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearPerformance {
  pub year:                i32,
  pub revenue:             f64,
  pub quantity:            u64,
  pub lines:               usize,
  pub orders:              usize,
  pub customers:           usize,
  pub average_order_value: f64,
  pub quantity_per_line:   f64,
  /// Revenue growth over the previous year present; `None` for the first.
  pub revenue_growth:      Option<f64>,
  pub orders_growth:       Option<f64>,
}

/// One row per year, ascending.
pub fn yearly_performance(subset: &Subset<'_>) -> Vec<YearPerformance> {
  let mut groups = summarize_by(subset, |r| r.year);
  groups.sort_by_key(|g| g.key);

  let mut rows: Vec<YearPerformance> = Vec::with_capacity(groups.len());
  for g in groups {
    let previous = rows.last();
    rows.push(YearPerformance {
      year:                g.key,
      revenue:             g.revenue,
      quantity:            g.quantity,
      lines:               g.lines,
      orders:              g.orders,
      customers:           g.customers,
      average_order_value: ratio(g.revenue, g.orders as f64),
      quantity_per_line:   ratio(g.quantity as f64, g.lines as f64),
      revenue_growth:      previous.map(|p| percent(g.revenue - p.revenue, p.revenue)),
      orders_growth:       previous
        .map(|p| percent(g.orders as f64 - p.orders as f64, p.orders as f64)),
    });
  }
  rows
}

// ─── Periods ─────────────────────────────────────────────────────────────────

/// Revenue of one `(year, period)` bucket, where the period is a quarter or
/// a month depending on the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRevenue {
  pub year:    i32,
  pub period:  u32,
  pub revenue: f64,
  pub orders:  usize,
}

fn period_series<'a>(
  subset: &Subset<'a>,
  period: impl Fn(&SaleRecord) -> u32,
) -> Vec<GroupSummary<'a, (i32, u32)>> {
  let mut groups = summarize_by(subset, |r| (r.year, period(r)));
  groups.sort_by_key(|g| g.key);
  groups
}

/// Revenue per `(year, quarter)`, chronological.
pub fn quarterly_revenue(subset: &Subset<'_>) -> Vec<PeriodRevenue> {
  period_series(subset, |r| r.quarter)
    .into_iter()
    .map(|g| PeriodRevenue {
      year:    g.key.0,
      period:  g.key.1,
      revenue: g.revenue,
      orders:  g.orders,
    })
    .collect()
}

/// One calendar month of activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthPerformance {
  pub year:                i32,
  pub month:               u32,
  pub revenue:             f64,
  pub orders:              usize,
  pub quantity:            u64,
  pub customers:           usize,
  pub average_order_value: f64,
  pub quantity_per_order:  f64,
  /// Growth over the previous month present; `None` for the first.
  pub growth:              Option<f64>,
  /// Distance from the mean monthly revenue, in percent of that mean.
  pub vs_mean:             f64,
}

/// Revenue per `(year, month)`, chronological.
pub fn monthly_performance(subset: &Subset<'_>) -> Vec<MonthPerformance> {
  let groups = period_series(subset, |r| r.month);
  let mean = ratio(
    groups.iter().map(|g| g.revenue).sum::<f64>(),
    groups.len() as f64,
  );

  let mut rows: Vec<MonthPerformance> = Vec::with_capacity(groups.len());
  for g in groups {
    let growth = rows.last().map(|p| percent(g.revenue - p.revenue, p.revenue));
    rows.push(MonthPerformance {
      year: g.key.0,
      month: g.key.1,
      revenue: g.revenue,
      orders: g.orders,
      quantity: g.quantity,
      customers: g.customers,
      average_order_value: ratio(g.revenue, g.orders as f64),
      quantity_per_order: ratio(g.quantity as f64, g.orders as f64),
      growth,
      vs_mean: percent(g.revenue - mean, mean),
    });
  }
  rows
}

/// The quarter with the highest revenue; the earliest wins a tie.
pub fn best_quarter(subset: &Subset<'_>) -> Option<PeriodRevenue> {
  max_by_revenue(quarterly_revenue(subset))
}

/// The month with the highest revenue; the earliest wins a tie.
pub fn best_month(subset: &Subset<'_>) -> Option<PeriodRevenue> {
  let months = period_series(subset, |r| r.month)
    .into_iter()
    .map(|g| PeriodRevenue {
      year:    g.key.0,
      period:  g.key.1,
      revenue: g.revenue,
      orders:  g.orders,
    })
    .collect();
  max_by_revenue(months)
}

fn max_by_revenue(periods: Vec<PeriodRevenue>) -> Option<PeriodRevenue> {
  periods.into_iter().fold(None, |best, p| match best {
    Some(b) if b.revenue >= p.revenue => Some(b),
    _ => Some(p),
  })
}

/// The `n` best `(year, month)` buckets, highest revenue first.
pub fn top_months(subset: &Subset<'_>, n: usize) -> Vec<MonthPerformance> {
  let mut months = monthly_performance(subset);
  months.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
  months.truncate(n);
  months
}

// ─── Seasonality ─────────────────────────────────────────────────────────────

/// Revenue of one month of the year, all years combined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthShare {
  pub month:   u32,
  pub revenue: f64,
  pub orders:  usize,
  pub share:   f64,
}

/// Revenue per month of the year, January first. Months without rows are
/// absent.
pub fn seasonality(subset: &Subset<'_>) -> Vec<MonthShare> {
  let mut groups = summarize_by(subset, |r| r.month);
  groups.sort_by_key(|g| g.key);
  let total: f64 = groups.iter().map(|g| g.revenue).sum();
  groups
    .into_iter()
    .map(|g| MonthShare {
      month:   g.key,
      revenue: g.revenue,
      orders:  g.orders,
      share:   percent(g.revenue, total),
    })
    .collect()
}

/// Highest month-of-year revenue divided by the lowest.
///
/// `0.0` when there are no months or the weakest month has no revenue.
pub fn seasonal_amplitude(subset: &Subset<'_>) -> f64 {
  let months = seasonality(subset);
  let max = months.iter().map(|m| m.revenue).fold(f64::NEG_INFINITY, f64::max);
  let min = months.iter().map(|m| m.revenue).fold(f64::INFINITY, f64::min);
  if months.is_empty() || min <= 0.0 {
    0.0
  } else {
    max / min
  }
}

/// The `n` strongest months of the year, highest revenue first.
pub fn strongest_months(subset: &Subset<'_>, n: usize) -> Vec<MonthShare> {
  let mut months = seasonality(subset);
  months.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
  months.truncate(n);
  months
}

/// The `n` weakest months of the year, lowest revenue first.
pub fn weakest_months(subset: &Subset<'_>, n: usize) -> Vec<MonthShare> {
  let mut months = seasonality(subset);
  months.sort_by(|a, b| a.revenue.total_cmp(&b.revenue));
  months.truncate(n);
  months
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum SeasonalIntensity {
  #[strum(serialize = "Strong seasonality")]
  Strong,
  #[strum(serialize = "Moderate seasonality")]
  Moderate,
  #[strum(serialize = "Stable activity")]
  Stable,
}

/// Classify the spread between the best of the `n` strongest month shares
/// and the worst of the `n` weakest.
pub fn seasonal_intensity(
  subset: &Subset<'_>,
  n: usize,
  bands: &TemporalBands,
) -> SeasonalIntensity {
  let high = strongest_months(subset, n)
    .iter()
    .map(|m| m.share)
    .fold(0.0, f64::max);
  let low = weakest_months(subset, n)
    .iter()
    .map(|m| m.share)
    .fold(high, f64::min);
  let spread = high - low;
  if spread > bands.seasonal_strong {
    SeasonalIntensity::Strong
  } else if spread > bands.seasonal_moderate {
    SeasonalIntensity::Moderate
  } else {
    SeasonalIntensity::Stable
  }
}

// ─── Trend ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum Trend {
  Rising,
  Stable,
  Falling,
  #[strum(serialize = "Insufficient data")]
  Insufficient,
}

/// Classify the latest year-over-year growth against `band` (in %).
pub fn trend(subset: &Subset<'_>, band: f64) -> Trend {
  let years = summarize_by(subset, |r| r.year).len();
  if years < 2 {
    return Trend::Insufficient;
  }
  let growth = latest_growth(subset);
  if growth > band {
    Trend::Rising
  } else if growth > -band {
    Trend::Stable
  } else {
    Trend::Falling
  }
}

/// Finer reading of the latest growth than [`Trend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum GrowthBand {
  #[strum(serialize = "Excellent growth")]
  Excellent,
  #[strum(serialize = "Positive growth")]
  Positive,
  Stagnation,
  Decline,
  #[strum(serialize = "Insufficient data")]
  Insufficient,
}

pub fn growth_band(subset: &Subset<'_>, bands: &TemporalBands) -> GrowthBand {
  if summarize_by(subset, |r| r.year).len() < 2 {
    return GrowthBand::Insufficient;
  }
  let growth = latest_growth(subset);
  if growth > bands.growth_excellent {
    GrowthBand::Excellent
  } else if growth > 0.0 {
    GrowthBand::Positive
  } else if growth > bands.growth_floor {
    GrowthBand::Stagnation
  } else {
    GrowthBand::Decline
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{table::SalesTable, test_support::record};

  fn table() -> SalesTable {
    SalesTable::new(vec![
      record(1, "2003-01-10", "USA", "Planes", "A", 100.0),
      record(2, "2003-11-10", "USA", "Planes", "B", 400.0),
      record(3, "2004-01-15", "USA", "Planes", "A", 200.0),
      record(4, "2004-11-20", "USA", "Planes", "C", 400.0),
      record(5, "2004-11-21", "USA", "Planes", "C", 200.0),
    ])
  }

  #[test]
  fn yearly_rows_carry_growth() {
    let rows = yearly_performance(&table().all());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].year, 2003);
    assert_eq!(rows[0].revenue_growth, None);
    assert_eq!(rows[1].revenue, 800.0);
    assert_eq!(rows[1].revenue_growth, Some(60.0));
    assert_eq!(rows[1].orders_growth, Some(50.0));
    assert_eq!(rows[1].customers, 2);
  }

  #[test]
  fn best_quarter_and_month() {
    let table = table();
    let q = best_quarter(&table.all()).unwrap();
    assert_eq!((q.year, q.period, q.revenue), (2004, 4, 600.0));
    let m = best_month(&table.all()).unwrap();
    assert_eq!((m.year, m.period), (2004, 11));
  }

  #[test]
  fn seasonality_and_amplitude() {
    let table = table();
    let months = seasonality(&table.all());
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].month, 1);
    assert_eq!(months[0].revenue, 300.0);
    assert_eq!(months[1].revenue, 1000.0);
    assert!((seasonal_amplitude(&table.all()) - 1000.0 / 300.0).abs() < 1e-9);
  }

  #[test]
  fn amplitude_with_zero_month_is_zero() {
    let table = SalesTable::new(vec![
      record(1, "2003-01-10", "USA", "Planes", "A", 0.0),
      record(2, "2003-02-10", "USA", "Planes", "A", 10.0),
    ]);
    assert_eq!(seasonal_amplitude(&table.all()), 0.0);
    assert_eq!(seasonal_amplitude(&SalesTable::default().all()), 0.0);
  }

  #[test]
  fn monthly_rows_compare_to_mean() {
    let rows = monthly_performance(&table().all());
    assert_eq!(rows.len(), 4);
    // mean = 1300 / 4 = 325
    assert!((rows[0].vs_mean - (100.0 - 325.0) / 325.0 * 100.0).abs() < 1e-9);
    assert_eq!(rows[3].orders, 2);
    assert_eq!(top_months(&table().all(), 1)[0].revenue, 600.0);
  }

  #[test]
  fn trend_classification() {
    assert_eq!(trend(&table().all(), 5.0), Trend::Rising);
    let single = SalesTable::new(vec![record(1, "2003-01-10", "USA", "Planes", "A", 1.0)]);
    assert_eq!(trend(&single.all(), 5.0), Trend::Insufficient);
    let flat = SalesTable::new(vec![
      record(1, "2003-01-10", "USA", "Planes", "A", 100.0),
      record(2, "2004-01-10", "USA", "Planes", "A", 97.0),
    ]);
    assert_eq!(trend(&flat.all(), 5.0), Trend::Stable);
    let down = SalesTable::new(vec![
      record(1, "2003-01-10", "USA", "Planes", "A", 100.0),
      record(2, "2004-01-10", "USA", "Planes", "A", 50.0),
    ]);
    assert_eq!(trend(&down.all(), 5.0), Trend::Falling);
  }

  #[test]
  fn strongest_and_weakest_months_of_the_year() {
    let table = table();
    let strong = strongest_months(&table.all(), 3);
    let weak = weakest_months(&table.all(), 3);
    assert_eq!(strong.iter().map(|m| m.month).collect::<Vec<_>>(), vec![11, 1]);
    assert_eq!(weak.iter().map(|m| m.month).collect::<Vec<_>>(), vec![1, 11]);
    assert_eq!(weakest_months(&table.all(), 1)[0].revenue, 300.0);
  }

  #[test]
  fn seasonal_intensity_follows_share_spread() {
    let bands = TemporalBands::default();
    assert_eq!(seasonal_intensity(&table().all(), 3, &bands), SeasonalIntensity::Strong);

    let moderate = SalesTable::new(vec![
      record(1, "2003-01-10", "USA", "Planes", "A", 45.0),
      record(2, "2003-02-10", "USA", "Planes", "A", 55.0),
    ]);
    assert_eq!(seasonal_intensity(&moderate.all(), 3, &bands), SeasonalIntensity::Moderate);

    let even = SalesTable::new(vec![
      record(1, "2003-01-10", "USA", "Planes", "A", 100.0),
      record(2, "2003-02-10", "USA", "Planes", "A", 100.0),
    ]);
    assert_eq!(seasonal_intensity(&even.all(), 3, &bands), SeasonalIntensity::Stable);
    assert_eq!(
      seasonal_intensity(&SalesTable::default().all(), 3, &bands),
      SeasonalIntensity::Stable
    );
  }

  #[test]
  fn growth_bands() {
    let bands = TemporalBands::default();
    let pair = |before: f64, after: f64| {
      SalesTable::new(vec![
        record(1, "2003-01-10", "USA", "Planes", "A", before),
        record(2, "2004-01-10", "USA", "Planes", "A", after),
      ])
    };
    assert_eq!(growth_band(&table().all(), &bands), GrowthBand::Excellent);
    assert_eq!(growth_band(&pair(100.0, 105.0).all(), &bands), GrowthBand::Positive);
    assert_eq!(growth_band(&pair(100.0, 97.0).all(), &bands), GrowthBand::Stagnation);
    assert_eq!(growth_band(&pair(100.0, 50.0).all(), &bands), GrowthBand::Decline);
    let single = SalesTable::new(vec![record(1, "2003-01-10", "USA", "Planes", "A", 1.0)]);
    assert_eq!(growth_band(&single.all(), &bands), GrowthBand::Insufficient);
  }
}
