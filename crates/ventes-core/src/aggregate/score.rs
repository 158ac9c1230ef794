//! Composite performance score.
//!
//! Five sub-scores, each clamped to `[0, 100]`, and their unweighted mean.
//! The formulas are driven by [`ScoringConfig`]; see its defaults for the
//! business values.

use serde::Serialize;
use strum::Display;

use super::{
  Baseline,
  kpi::{
    concentration_share, distinct_count, latest_growth, revenue_total, success_rate,
    top_customer,
  },
  ratio,
};
use crate::{
  config::{AnalysisConfig, ScoringConfig},
  table::Subset,
};

/// The KPIs the score and the strategic alerts are computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreInputs {
  /// Latest year-over-year revenue growth, in %.
  pub growth:             f64,
  pub revenue:            f64,
  /// Unfiltered revenue.
  pub baseline_revenue:   f64,
  /// Share of the focus product line, in %.
  pub focus_share:        f64,
  pub top_customer_share: f64,
  pub success_rate:       Option<f64>,
  pub countries:          usize,
}

impl ScoreInputs {
  pub fn gather(subset: &Subset<'_>, baseline: &Baseline, config: &AnalysisConfig) -> Self {
    Self {
      growth:             latest_growth(subset),
      revenue:            revenue_total(subset),
      baseline_revenue:   baseline.revenue,
      focus_share:        concentration_share(subset, |r| r.product_line == config.focus_product),
      top_customer_share: top_customer(subset).map_or(0.0, |(_, share)| share),
      success_rate:       success_rate(subset),
      countries:          distinct_count(subset, |r| r.country.as_str()),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum Rating {
  Excellent,
  Good,
  #[strum(serialize = "Needs work")]
  NeedsWork,
}

impl Rating {
  pub fn of(global: f64) -> Self {
    if global > 80.0 {
      Self::Excellent
    } else if global > 60.0 {
      Self::Good
    } else {
      Self::NeedsWork
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeScore {
  pub financial:   f64,
  pub customer:    f64,
  pub product:     f64,
  pub operational: f64,
  pub geographic:  f64,
  pub global:      f64,
  pub rating:      Rating,
}

impl CompositeScore {
  /// Sub-scores with their labels, in display order.
  pub fn parts(&self) -> [(&'static str, f64); 5] {
    [
      ("Financial", self.financial),
      ("Customers", self.customer),
      ("Products", self.product),
      ("Operations", self.operational),
      ("Geography", self.geographic),
    ]
  }
}

pub fn composite_score(
  subset: &Subset<'_>,
  baseline: &Baseline,
  config: &AnalysisConfig,
) -> CompositeScore {
  score_from_inputs(&ScoreInputs::gather(subset, baseline, config), &config.scoring)
}

pub fn score_from_inputs(inputs: &ScoreInputs, scoring: &ScoringConfig) -> CompositeScore {
  let growth_adj = (inputs.growth * scoring.growth_factor)
    .clamp(-scoring.growth_cap, scoring.growth_cap);
  let revenue_adj = if inputs.baseline_revenue > 0.0 {
    (ratio(inputs.revenue, inputs.baseline_revenue) * scoring.revenue_share_cap)
      .clamp(0.0, scoring.revenue_share_cap)
  } else {
    0.0
  };

  let financial = clamp_score(scoring.financial_base + growth_adj + revenue_adj);
  let customer = clamp_score(step(
    inputs.top_customer_share,
    &scoring.customer_steps,
    scoring.customer_fallback,
  ));
  let product = clamp_score(step(
    inputs.focus_share,
    &scoring.product_steps,
    scoring.product_fallback,
  ));
  let operational = clamp_score(inputs.success_rate.unwrap_or(0.0));
  let geographic = clamp_score(inputs.countries as f64 * scoring.points_per_country);

  let global = (financial + customer + product + operational + geographic) / 5.0;
  CompositeScore {
    financial,
    customer,
    product,
    operational,
    geographic,
    global,
    rating: Rating::of(global),
  }
}

fn clamp_score(value: f64) -> f64 { value.clamp(0.0, 100.0) }

/// Score of the first step whose bound is strictly above `value`.
fn step(value: f64, steps: &[(f64, f64)], fallback: f64) -> f64 {
  steps
    .iter()
    .find(|(bound, _)| value < *bound)
    .map_or(fallback, |(_, score)| *score)
}
