//! Geographic performance: countries, markets and cities.

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

use super::{kpi::revenue_total, percent, ranking::rank_by_revenue, ratio};
use crate::{config::MarketBuckets, table::Subset};

// ─── Countries ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryPerformance {
  pub country:              String,
  pub revenue:              f64,
  pub orders:               usize,
  pub customers:            usize,
  pub quantity:             u64,
  pub share:                f64,
  pub revenue_per_customer: f64,
  pub orders_per_customer:  f64,
  pub quantity_per_order:   f64,
  pub market:               MarketType,
}

/// Every country of the subset, highest revenue first.
pub fn country_performance(
  subset: &Subset<'_>,
  buckets: &MarketBuckets,
) -> Vec<CountryPerformance> {
  let total = revenue_total(subset);
  rank_by_revenue(subset, |r| r.country.as_str())
    .into_iter()
    .map(|g| CountryPerformance {
      country:              g.key.to_owned(),
      revenue:              g.revenue,
      orders:               g.orders,
      customers:            g.customers,
      quantity:             g.quantity,
      share:                percent(g.revenue, total),
      revenue_per_customer: ratio(g.revenue, g.customers as f64),
      orders_per_customer:  ratio(g.orders as f64, g.customers as f64),
      quantity_per_order:   ratio(g.quantity as f64, g.orders as f64),
      market:               MarketType::classify(g.revenue, buckets),
    })
    .collect()
}

/// Headline geographic figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoSummary {
  /// Leading country and its share of revenue.
  pub leader:              Option<(String, f64)>,
  /// Combined share of the three leading countries.
  pub top3_concentration:  f64,
  /// Combined share of the five leading countries.
  pub top5_concentration:  f64,
  pub active_countries:    usize,
  pub revenue_per_country: f64,
  /// `100 - top3_concentration`.
  pub diversity:           f64,
}

pub fn geo_summary(countries: &[CountryPerformance]) -> GeoSummary {
  let top = |n: usize| -> f64 { countries.iter().take(n).map(|c| c.share).sum() };
  let top3 = top(3);
  let revenue: f64 = countries.iter().map(|c| c.revenue).sum();
  GeoSummary {
    leader:              countries.first().map(|c| (c.country.clone(), c.share)),
    top3_concentration:  top3,
    top5_concentration:  top(5),
    active_countries:    countries.len(),
    revenue_per_country: ratio(revenue, countries.len() as f64),
    diversity:           if countries.is_empty() { 0.0 } else { 100.0 - top3 },
  }
}

// ─── Markets ─────────────────────────────────────────────────────────────────

/// Maturity bucket of a country, by its revenue.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter,
)]
pub enum MarketType {
  Emerging,
  Intermediate,
  Mature,
}

impl MarketType {
  /// Right-inclusive: revenue equal to a bound falls in the lower bucket.
  pub fn classify(revenue: f64, buckets: &MarketBuckets) -> Self {
    if revenue <= buckets.emerging_max {
      Self::Emerging
    } else if revenue <= buckets.intermediate_max {
      Self::Intermediate
    } else {
      Self::Mature
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSummary {
  pub market:    MarketType,
  pub countries: usize,
  pub revenue:   f64,
  pub share:     f64,
}

/// Countries and revenue per market type, Emerging first. Empty buckets are
/// left out.
pub fn market_summary(countries: &[CountryPerformance]) -> Vec<MarketSummary> {
  let total: f64 = countries.iter().map(|c| c.revenue).sum();
  MarketType::iter()
    .filter_map(|market| {
      let members: Vec<&CountryPerformance> =
        countries.iter().filter(|c| c.market == market).collect();
      if members.is_empty() {
        return None;
      }
      let revenue: f64 = members.iter().map(|c| c.revenue).sum();
      Some(MarketSummary {
        market,
        countries: members.len(),
        revenue,
        share: percent(revenue, total),
      })
    })
    .collect()
}

// ─── Cities ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityPerformance {
  pub country:          String,
  pub city:             String,
  pub revenue:          f64,
  pub orders:           usize,
  pub customers:        usize,
  /// Share of the country's revenue.
  pub share_of_country: f64,
  /// Dense rank by revenue within the country, starting at 1.
  pub national_rank:    usize,
  /// Dense rank by revenue among all cities, starting at 1.
  pub world_rank:       usize,
}

/// Every `(country, city)` pair, highest revenue first.
pub fn city_performance(subset: &Subset<'_>) -> Vec<CityPerformance> {
  let countries = rank_by_revenue(subset, |r| r.country.as_str());
  let cities = rank_by_revenue(subset, |r| (r.country.as_str(), r.city.as_str()));

  cities
    .iter()
    .map(|g| {
      let (country, city) = g.key;
      let country_revenue = countries
        .iter()
        .find(|c| c.key == country)
        .map_or(0.0, |c| c.revenue);
      let national = dense_rank(
        cities.iter().filter(|o| o.key.0 == country).map(|o| o.revenue),
        g.revenue,
      );
      let world = dense_rank(cities.iter().map(|o| o.revenue), g.revenue);
      CityPerformance {
        country:          country.to_owned(),
        city:             city.to_owned(),
        revenue:          g.revenue,
        orders:           g.orders,
        customers:        g.customers,
        share_of_country: percent(g.revenue, country_revenue),
        national_rank:    national,
        world_rank:       world,
      }
    })
    .collect()
}

/// 1 + the number of distinct revenues above `revenue`.
fn dense_rank(revenues: impl Iterator<Item = f64>, revenue: f64) -> usize {
  let mut higher: Vec<f64> = revenues.filter(|r| *r > revenue).collect();
  higher.sort_by(f64::total_cmp);
  higher.dedup();
  higher.len() + 1
}

/// Headline city figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySummary {
  pub active_cities:     usize,
  /// Countries with at least one city.
  pub countries:         usize,
  /// Share of revenue made by the leading cities.
  pub top_concentration: f64,
  pub revenue_per_city:  f64,
}

/// Summarise `cities` (as returned by [`city_performance`]), measuring the
/// concentration over the first `n`.
pub fn city_summary(cities: &[CityPerformance], n: usize) -> CitySummary {
  let revenue: f64 = cities.iter().map(|c| c.revenue).sum();
  let top: f64 = cities.iter().take(n).map(|c| c.revenue).sum();
  let mut countries: Vec<&str> = cities.iter().map(|c| c.country.as_str()).collect();
  countries.sort_unstable();
  countries.dedup();
  CitySummary {
    active_cities:     cities.len(),
    countries:         countries.len(),
    top_concentration: percent(top, revenue),
    revenue_per_city:  ratio(revenue, cities.len() as f64),
  }
}

/// The leading city of each country, keeping the `n` with the highest
/// revenue.
pub fn strategic_cities(cities: &[CityPerformance], n: usize) -> Vec<CityPerformance> {
  cities
    .iter()
    .filter(|c| c.national_rank == 1)
    .fold(Vec::<CityPerformance>::new(), |mut leaders, c| {
      if !leaders.iter().any(|l| l.country == c.country) {
        leaders.push(c.clone());
      }
      leaders
    })
    .into_iter()
    .take(n)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{record::SaleRecord, table::SalesTable, test_support::record};

  fn with_city(mut r: SaleRecord, city: &str) -> SaleRecord {
    r.city = city.into();
    r
  }

  #[test]
  fn market_buckets_are_right_inclusive() {
    let b = MarketBuckets::default();
    assert_eq!(MarketType::classify(100_000.0, &b), MarketType::Emerging);
    assert_eq!(MarketType::classify(100_000.01, &b), MarketType::Intermediate);
    assert_eq!(MarketType::classify(500_000.0, &b), MarketType::Intermediate);
    assert_eq!(MarketType::classify(500_001.0, &b), MarketType::Mature);
  }

  #[test]
  fn countries_and_summary() {
    let table = SalesTable::new(vec![
      record(1, "2003-01-10", "USA", "Planes", "A", 600_000.0),
      record(2, "2003-01-11", "France", "Planes", "B", 300_000.0),
      record(3, "2003-01-12", "Spain", "Planes", "C", 50_000.0),
      record(4, "2003-01-13", "Italy", "Planes", "D", 50_000.0),
    ]);
    let countries = country_performance(&table.all(), &MarketBuckets::default());
    assert_eq!(countries[0].country, "USA");
    assert_eq!(countries[0].market, MarketType::Mature);
    assert_eq!(countries[0].share, 60.0);

    let summary = geo_summary(&countries);
    assert_eq!(summary.leader, Some(("USA".to_owned(), 60.0)));
    assert!((summary.top3_concentration - 95.0).abs() < 1e-9);
    assert!((summary.diversity - 5.0).abs() < 1e-9);
    assert!((summary.top5_concentration - 100.0).abs() < 1e-9);
    assert_eq!(summary.revenue_per_country, 250_000.0);

    let markets = market_summary(&countries);
    assert_eq!(markets.len(), 3);
    assert_eq!(markets[0].market, MarketType::Emerging);
    assert_eq!(markets[0].countries, 2);
  }

  #[test]
  fn empty_city_summary() {
    let summary = city_summary(&[], 10);
    assert_eq!(summary.active_cities, 0);
    assert_eq!(summary.top_concentration, 0.0);
    assert_eq!(summary.revenue_per_city, 0.0);
  }

  #[test]
  fn empty_geo_summary() {
    let summary = geo_summary(&[]);
    assert_eq!(summary.leader, None);
    assert_eq!(summary.diversity, 0.0);
    assert_eq!(summary.revenue_per_country, 0.0);
  }

  #[test]
  fn cities_rank_densely_within_country() {
    let table = SalesTable::new(vec![
      with_city(record(1, "2003-01-10", "USA", "Planes", "A", 300.0), "NYC"),
      with_city(record(2, "2003-01-11", "USA", "Planes", "B", 100.0), "Boston"),
      with_city(record(3, "2003-01-12", "USA", "Planes", "C", 100.0), "Denver"),
      with_city(record(4, "2003-01-13", "USA", "Planes", "D", 50.0), "Austin"),
      with_city(record(5, "2003-01-14", "France", "Planes", "E", 200.0), "Paris"),
    ]);
    let cities = city_performance(&table.all());
    let rank = |name: &str| cities.iter().find(|c| c.city == name).unwrap().national_rank;
    assert_eq!(rank("NYC"), 1);
    assert_eq!(rank("Boston"), 2);
    assert_eq!(rank("Denver"), 2);
    assert_eq!(rank("Austin"), 3);
    assert_eq!(rank("Paris"), 1);

    let world = |name: &str| cities.iter().find(|c| c.city == name).unwrap().world_rank;
    assert_eq!(world("NYC"), 1);
    assert_eq!(world("Paris"), 2);
    assert_eq!(world("Boston"), 3);
    assert_eq!(world("Denver"), 3);
    assert_eq!(world("Austin"), 4);

    let summary = city_summary(&cities, 2);
    assert_eq!(summary.active_cities, 5);
    assert_eq!(summary.countries, 2);
    assert!((summary.top_concentration - 500.0 / 750.0 * 100.0).abs() < 1e-9);
    assert_eq!(summary.revenue_per_city, 150.0);

    let nyc = cities.iter().find(|c| c.city == "NYC").unwrap();
    assert!((nyc.share_of_country - 300.0 / 550.0 * 100.0).abs() < 1e-9);

    let leaders = strategic_cities(&cities, 5);
    let names: Vec<&str> = leaders.iter().map(|c| c.city.as_str()).collect();
    assert_eq!(names, vec!["NYC", "Paris"]);
  }
}
