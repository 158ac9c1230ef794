//! One view model per dashboard tab, built from a non-empty subset.

use serde::Serialize;

use crate::{
  aggregate::{
    Baseline,
    alerts::{Alert, strategic_alerts},
    behavior::{
      Operations, ProblemAnalysis, SizeBreakdown, StatusBreakdown, operations, problem_analysis,
      size_breakdown, status_breakdown,
    },
    customer::{
      CountryCustomers, LoyalCustomer, TopCustomer, customers_by_country, premium_loyal_customers,
      top_customers,
    },
    geo::{
      CityPerformance, CitySummary, CountryPerformance, GeoSummary, MarketSummary,
      city_performance, city_summary, country_performance, geo_summary, market_summary,
      strategic_cities,
    },
    kpi,
    product::{
      Combination, LinePerformance, PriceVariability, ProductMarketMatrix, ProductSales,
      line_performance, price_variability, product_market_matrix, top_products_by_quantity,
      top_products_by_revenue, top3_concentration,
    },
    score::{CompositeScore, ScoreInputs, score_from_inputs},
    segment::{Segmentation, segment_customers},
    temporal::{
      self, GrowthBand, MonthPerformance, MonthShare, PeriodRevenue, SeasonalIntensity, Trend,
      YearPerformance,
    },
  },
  config::AnalysisConfig,
  table::Subset,
};

// ─── Overview ────────────────────────────────────────────────────────────────

/// Headline figures shown above every tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
  pub rows:                usize,
  pub revenue:             f64,
  pub orders:              usize,
  pub average_order_value: f64,
  pub units_per_order:     f64,
  /// Latest year-over-year growth, in %.
  pub growth:              f64,
  pub customers:           usize,
  pub countries:           usize,
  pub cities:              usize,
  pub product_lines:       usize,
  pub products:            usize,
}

impl Overview {
  pub fn build(subset: &Subset<'_>) -> Self {
    Self {
      rows:                subset.len(),
      revenue:             kpi::revenue_total(subset),
      orders:              kpi::distinct_orders(subset),
      average_order_value: kpi::average_order_value(subset),
      units_per_order:     kpi::units_per_order(subset),
      growth:              kpi::latest_growth(subset),
      customers:           kpi::distinct_count(subset, |r| r.customer.as_str()),
      countries:           kpi::distinct_count(subset, |r| r.country.as_str()),
      cities:              kpi::distinct_count(subset, |r| r.city.as_str()),
      product_lines:       kpi::distinct_count(subset, |r| r.product_line.as_str()),
      products:            kpi::distinct_count(subset, |r| r.product_code.as_str()),
    }
  }
}

// ─── Global ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalView {
  pub focus_product:       String,
  pub focus_product_share: f64,
  pub focus_country:       String,
  pub focus_country_share: f64,
  pub top_customer:        Option<(String, f64)>,
  pub success_rate:        Option<f64>,
  pub at_risk_share:       f64,
  pub score:               CompositeScore,
  pub alerts:              Vec<Alert>,
  pub matrix:              ProductMarketMatrix,
  pub combinations:        Vec<Combination>,
}

impl GlobalView {
  pub fn build(subset: &Subset<'_>, baseline: &Baseline, config: &AnalysisConfig) -> Self {
    let inputs = ScoreInputs::gather(subset, baseline, config);
    let matrix = product_market_matrix(subset, config.rankings.matrix_side);
    Self {
      focus_product:       config.focus_product.clone(),
      focus_product_share: inputs.focus_share,
      focus_country:       config.focus_country.clone(),
      focus_country_share: kpi::concentration_share(subset, |r| {
        r.country == config.focus_country
      }),
      top_customer:        kpi::top_customer(subset),
      success_rate:        inputs.success_rate,
      at_risk_share:       kpi::at_risk_share(subset),
      score:               score_from_inputs(&inputs, &config.scoring),
      alerts:              strategic_alerts(&inputs, &config.alerts, &config.focus_product),
      combinations:        matrix.top_combinations(config.rankings.combinations),
      matrix,
    }
  }
}

// ─── Temporal ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalView {
  pub yearly:            Vec<YearPerformance>,
  pub quarterly:         Vec<PeriodRevenue>,
  pub monthly:           Vec<MonthPerformance>,
  pub seasonality:       Vec<MonthShare>,
  pub strongest:         Vec<MonthShare>,
  pub weakest:           Vec<MonthShare>,
  pub intensity:         SeasonalIntensity,
  /// Best-to-worst month-of-year revenue ratio.
  pub amplitude:         f64,
  pub amplitude_is_high: bool,
  pub best_quarter:      Option<PeriodRevenue>,
  pub best_month:        Option<PeriodRevenue>,
  pub top_months:        Vec<MonthPerformance>,
  pub trend:             Trend,
  pub growth_band:       GrowthBand,
}

impl TemporalView {
  pub fn build(subset: &Subset<'_>, config: &AnalysisConfig) -> Self {
    let bands = &config.temporal;
    let months = config.rankings.seasonal_months;
    let amplitude = temporal::seasonal_amplitude(subset);
    Self {
      yearly: temporal::yearly_performance(subset),
      quarterly: temporal::quarterly_revenue(subset),
      monthly: temporal::monthly_performance(subset),
      seasonality: temporal::seasonality(subset),
      strongest: temporal::strongest_months(subset, months),
      weakest: temporal::weakest_months(subset, months),
      intensity: temporal::seasonal_intensity(subset, months, bands),
      amplitude,
      amplitude_is_high: amplitude > bands.amplitude_high,
      best_quarter: temporal::best_quarter(subset),
      best_month: temporal::best_month(subset),
      top_months: temporal::top_months(subset, config.rankings.top_months),
      trend: temporal::trend(subset, config.trend_band),
      growth_band: temporal::growth_band(subset, bands),
    }
  }
}

// ─── Geography ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoView {
  pub summary:          GeoSummary,
  pub countries:        Vec<CountryPerformance>,
  pub markets:          Vec<MarketSummary>,
  pub cities:           Vec<CityPerformance>,
  pub city_summary:     CitySummary,
  pub strategic_cities: Vec<CityPerformance>,
}

impl GeoView {
  pub fn build(subset: &Subset<'_>, config: &AnalysisConfig) -> Self {
    let countries = country_performance(subset, &config.markets);
    let cities = city_performance(subset);
    Self {
      summary: geo_summary(&countries),
      markets: market_summary(&countries),
      strategic_cities: strategic_cities(&cities, config.rankings.strategic_cities),
      city_summary: city_summary(&cities, config.rankings.city_concentration),
      countries,
      cities,
    }
  }
}

// ─── Customers ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerView {
  pub segmentation:  Segmentation,
  pub top_customers: Vec<TopCustomer>,
  pub loyal:         Vec<LoyalCustomer>,
  pub by_country:    Vec<CountryCustomers>,
}

impl CustomerView {
  pub fn build(subset: &Subset<'_>, config: &AnalysisConfig) -> Self {
    Self {
      segmentation:  segment_customers(subset, &config.segments),
      top_customers: top_customers(subset, config.rankings.top_customers),
      loyal:         premium_loyal_customers(subset, config.rankings.loyal_min_orders),
      by_country:    customers_by_country(subset),
    }
  }
}

// ─── Products ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
  pub lines:              Vec<LinePerformance>,
  pub top3_concentration: f64,
  pub top_by_quantity:    Vec<ProductSales>,
  pub top_by_revenue:     Vec<ProductSales>,
  pub price_variability:  Vec<PriceVariability>,
}

impl ProductView {
  pub fn build(subset: &Subset<'_>, config: &AnalysisConfig) -> Self {
    let lines = line_performance(subset);
    let n = config.rankings.top_products;
    Self {
      top3_concentration: top3_concentration(&lines),
      lines,
      top_by_quantity: top_products_by_quantity(subset, n),
      top_by_revenue: top_products_by_revenue(subset, n),
      price_variability: price_variability(subset, config.rankings.price_variability),
    }
  }
}

// ─── Behaviour ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviorView {
  pub sizes:      Vec<SizeBreakdown>,
  pub statuses:   Vec<StatusBreakdown>,
  pub operations: Operations,
  pub problems:   ProblemAnalysis,
}

impl BehaviorView {
  pub fn build(subset: &Subset<'_>, baseline: &Baseline) -> Self {
    let statuses = status_breakdown(subset);
    Self {
      sizes: size_breakdown(subset),
      operations: operations(&statuses),
      statuses,
      problems: problem_analysis(subset, baseline),
    }
  }
}
