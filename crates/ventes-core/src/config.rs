//! Business constants used by the aggregation library.
//!
//! The thresholds and score formulas are product decisions. They default to
//! the values the dashboard has always used and can be overridden from the
//! binary's configuration file.

use serde::{Deserialize, Serialize};

/// All tunable analysis constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
  pub segments:      SegmentThresholds,
  pub scoring:       ScoringConfig,
  pub alerts:        AlertThresholds,
  pub markets:       MarketBuckets,
  pub rankings:      RankingSizes,
  pub temporal:      TemporalBands,
  /// Product line tracked by the concentration KPI and the product score.
  pub focus_product: String,
  /// Country tracked by the market concentration KPI.
  pub focus_country: String,
  /// Growth (in %) above which the trend is rising; its negation is the
  /// lower bound of "stable".
  pub trend_band:    f64,
}

impl Default for AnalysisConfig {
  fn default() -> Self {
    Self {
      segments:      SegmentThresholds::default(),
      scoring:       ScoringConfig::default(),
      alerts:        AlertThresholds::default(),
      markets:       MarketBuckets::default(),
      rankings:      RankingSizes::default(),
      temporal:      TemporalBands::default(),
      focus_product: "Classic Cars".into(),
      focus_country: "USA".into(),
      trend_band:    5.0,
    }
  }
}

/// Revenue-share cut points (in %) for customer segments.
///
/// A share `> vip` is VIP, `> mid` is Moyen, anything else is Base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentThresholds {
  pub mid: f64,
  pub vip: f64,
}

impl Default for SegmentThresholds {
  fn default() -> Self { Self { mid: 1.0, vip: 5.0 } }
}

/// Inputs of the composite score formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
  pub financial_base:     f64,
  /// Multiplier applied to year-over-year growth (in %).
  pub growth_factor:      f64,
  /// Absolute cap on the growth adjustment.
  pub growth_cap:         f64,
  /// Maximum contribution of the filtered share of total revenue.
  pub revenue_share_cap:  f64,
  /// `(upper bound on top-customer share, score)`, checked in order; the
  /// fallback applies past the last step.
  pub customer_steps:     Vec<(f64, f64)>,
  pub customer_fallback:  f64,
  /// Same shape, keyed on the focus product line's share.
  pub product_steps:      Vec<(f64, f64)>,
  pub product_fallback:   f64,
  /// Points per distinct country.
  pub points_per_country: f64,
}

impl Default for ScoringConfig {
  fn default() -> Self {
    Self {
      financial_base:     50.0,
      growth_factor:      0.4,
      growth_cap:         25.0,
      revenue_share_cap:  25.0,
      customer_steps:     vec![(15.0, 80.0), (25.0, 60.0)],
      customer_fallback:  40.0,
      product_steps:      vec![(35.0, 80.0), (50.0, 60.0)],
      product_fallback:   40.0,
      points_per_country: 8.0,
    }
  }
}

/// Trip points for strategic alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
  pub growth_critical:       f64,
  pub focus_share_critical:  f64,
  pub focus_share_warning:   f64,
  pub top_customer_critical: f64,
  pub success_rate_critical: f64,
  pub min_countries:         usize,
}

impl Default for AlertThresholds {
  fn default() -> Self {
    Self {
      growth_critical:       -10.0,
      focus_share_critical:  50.0,
      focus_share_warning:   35.0,
      top_customer_critical: 25.0,
      success_rate_critical: 90.0,
      min_countries:         8,
    }
  }
}

/// Country revenue bounds for market maturity buckets (right-inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketBuckets {
  pub emerging_max:     f64,
  pub intermediate_max: f64,
}

impl Default for MarketBuckets {
  fn default() -> Self {
    Self {
      emerging_max:     100_000.0,
      intermediate_max: 500_000.0,
    }
  }
}

/// How many rows each ranked table keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingSizes {
  pub top_customers:      usize,
  pub top_products:       usize,
  pub top_months:         usize,
  /// Strongest and weakest months of the year listed in the seasonality
  /// view.
  pub seasonal_months:    usize,
  pub strategic_cities:   usize,
  /// Cities counted by the city concentration figure.
  pub city_concentration: usize,
  pub price_variability:  usize,
  /// Product lines and countries on each side of the product × market
  /// matrix.
  pub matrix_side:        usize,
  pub combinations:       usize,
  /// Minimum distinct premium orders for a loyal customer.
  pub loyal_min_orders:   usize,
}

impl Default for RankingSizes {
  fn default() -> Self {
    Self {
      top_customers:      10,
      top_products:       10,
      top_months:         5,
      seasonal_months:    3,
      strategic_cities:   5,
      city_concentration: 10,
      price_variability:  15,
      matrix_side:        4,
      combinations:       3,
      loyal_min_orders:   2,
    }
  }
}

/// Cut points (in %, except `amplitude_high`) of the temporal labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalBands {
  /// Spread between the strongest and weakest month shares above which
  /// seasonality is strong.
  pub seasonal_strong:   f64,
  pub seasonal_moderate: f64,
  /// Growth above which the year is excellent.
  pub growth_excellent:  f64,
  /// Growth above which a decline is only stagnation.
  pub growth_floor:      f64,
  /// Best-to-worst month ratio above which the amplitude is high.
  pub amplitude_high:    f64,
}

impl Default for TemporalBands {
  fn default() -> Self {
    Self {
      seasonal_strong:   15.0,
      seasonal_moderate: 8.0,
      growth_excellent:  10.0,
      growth_floor:      -10.0,
      amplitude_high:    3.0,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_documents_keep_defaults() {
    let config: AnalysisConfig =
      serde_json::from_str(r#"{ "focus_country": "France", "segments": { "vip": 10.0 } }"#)
        .unwrap();
    assert_eq!(config.focus_country, "France");
    assert_eq!(config.segments.vip, 10.0);
    assert_eq!(config.segments.mid, 1.0);
    assert_eq!(config.rankings, RankingSizes::default());
    assert_eq!(config.focus_product, "Classic Cars");
  }
}
