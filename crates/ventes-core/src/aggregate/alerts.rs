//! Strategic alerts raised from the headline KPIs.

use serde::Serialize;
use strum::Display;

use super::score::ScoreInputs;
use crate::config::AlertThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Display)]
pub enum Severity {
  Critical,
  Warning,
  Healthy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
  pub severity:       Severity,
  /// Area of the business the alert is about.
  pub area:           &'static str,
  pub message:        String,
  pub recommendation: &'static str,
}

impl Alert {
  fn new(
    severity: Severity,
    area: &'static str,
    message: impl Into<String>,
    recommendation: &'static str,
  ) -> Self {
    Self {
      severity,
      area,
      message: message.into(),
      recommendation,
    }
  }
}

/// Evaluate every rule, in a fixed order. When none fires the result is a
/// single [`Severity::Healthy`] alert.
pub fn strategic_alerts(
  inputs: &ScoreInputs,
  thresholds: &AlertThresholds,
  focus_product: &str,
) -> Vec<Alert> {
  let mut alerts = Vec::new();

  if inputs.growth < thresholds.growth_critical {
    alerts.push(Alert::new(
      Severity::Critical,
      "Growth",
      format!("Revenue down {:.1}% on the previous year", -inputs.growth),
      "Revisit the commercial strategy",
    ));
  } else if inputs.growth < 0.0 {
    alerts.push(Alert::new(
      Severity::Warning,
      "Growth",
      format!("Revenue slipping ({:.1}%)", inputs.growth),
      "Analyse the causes and adjust the offer",
    ));
  }

  if inputs.focus_share > thresholds.focus_share_critical {
    alerts.push(Alert::new(
      Severity::Critical,
      "Products",
      format!("Heavy dependence on {focus_product} ({:.1}%)", inputs.focus_share),
      "Diversify the product range",
    ));
  } else if inputs.focus_share > thresholds.focus_share_warning {
    alerts.push(Alert::new(
      Severity::Warning,
      "Products",
      format!("High concentration on {focus_product} ({:.1}%)", inputs.focus_share),
      "Grow the other product lines",
    ));
  }

  if inputs.top_customer_share > thresholds.top_customer_critical {
    alerts.push(Alert::new(
      Severity::Critical,
      "Customers",
      format!("Top customer carries {:.1}% of revenue", inputs.top_customer_share),
      "Broaden the customer base",
    ));
  }

  if let Some(rate) = inputs
    .success_rate
    .filter(|rate| *rate < thresholds.success_rate_critical)
  {
    alerts.push(Alert::new(
      Severity::Critical,
      "Operations",
      format!("Success rate at {rate:.1}%"),
      "Audit the order process",
    ));
  }

  if inputs.countries < thresholds.min_countries {
    alerts.push(Alert::new(
      Severity::Warning,
      "Markets",
      format!("Only {} countries covered", inputs.countries),
      "Study expansion into new markets",
    ));
  }

  if alerts.is_empty() {
    alerts.push(Alert::new(
      Severity::Healthy,
      "Overall",
      "Performance on track",
      "Keep the current trajectory",
    ));
  }
  alerts
}
