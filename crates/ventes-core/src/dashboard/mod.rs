//! The dashboard pipeline.
//!
//! A [`Session`] owns the loaded table and the filter state. Each user input
//! becomes an [`Interaction`]; [`Session::handle_interaction`] runs exactly
//! one pass:
//!
//! 1. apply the interaction to the filter state,
//! 2. resolve the pending action, if any,
//! 3. derive the filtered subset, falling back to the whole table when the
//!    filter columns are malformed,
//! 4. aggregate the subset into a [`RenderModel`].
//!
//! Nothing computed here outlives the pass except the filter state.

pub mod views;

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

pub use self::views::{
  BehaviorView, CustomerView, GeoView, GlobalView, Overview, ProductView, TemporalView,
};
use crate::{
  action::{PendingAction, resolve_pending},
  aggregate::Baseline,
  config::AnalysisConfig,
  filter::{ActiveFilters, FilterState, apply_or_unfiltered},
  table::{FilterDomain, SalesTable},
};

// ─── Interactions ────────────────────────────────────────────────────────────

/// A user input, as seen by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
  /// Re-render with the current state.
  Refresh,
  SetYears(Vec<i32>),
  SetCountries(Vec<String>),
  SetProductLines(Vec<String>),
  ToggleYear(i32),
  ToggleCountry(String),
  ToggleProductLine(String),
  /// Record a bulk action; it is resolved in the same pass.
  Trigger(PendingAction),
}

// ─── Render model ────────────────────────────────────────────────────────────

/// Output of one pipeline pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderModel {
  /// The filters exclude every row.
  NoResults {
    active:     ActiveFilters,
    /// The action that brings data back.
    suggestion: PendingAction,
  },
  Dashboard(Box<DashboardModel>),
}

impl RenderModel {
  pub fn active(&self) -> &ActiveFilters {
    match self {
      Self::NoResults { active, .. } => active,
      Self::Dashboard(model) => &model.active,
    }
  }

  pub fn dashboard(&self) -> Option<&DashboardModel> {
    match self {
      Self::Dashboard(model) => Some(model),
      Self::NoResults { .. } => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardModel {
  pub overview:  Overview,
  pub active:    ActiveFilters,
  /// The filters could not be applied and the whole table is shown.
  pub degraded:  bool,
  pub global:    GlobalView,
  pub temporal:  TemporalView,
  pub geo:       GeoView,
  pub customers: CustomerView,
  pub products:  ProductView,
  pub behavior:  BehaviorView,
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// Per-user dashboard state.
#[derive(Debug, Clone)]
pub struct Session {
  table:    Arc<SalesTable>,
  domain:   FilterDomain,
  state:    FilterState,
  config:   AnalysisConfig,
  baseline: Baseline,
}

impl Session {
  /// A session with every filter value selected.
  pub fn new(table: Arc<SalesTable>, config: AnalysisConfig) -> Self {
    let domain = FilterDomain::from_table(&table);
    let state = FilterState::new(&domain);
    let baseline = Baseline::of(&table);
    Self {
      table,
      domain,
      state,
      config,
      baseline,
    }
  }

  pub fn table(&self) -> &SalesTable { &self.table }

  pub fn domain(&self) -> &FilterDomain { &self.domain }

  pub fn state(&self) -> &FilterState { &self.state }

  /// Swap in a reloaded table. The domain is recomputed from it and
  /// selections that were full grow to cover the new values.
  pub fn replace_table(&mut self, table: Arc<SalesTable>) {
    let domain = FilterDomain::from_table(&table);
    self.state.rebase(&self.domain, &domain);
    self.domain = domain;
    self.baseline = Baseline::of(&table);
    self.table = table;
  }

  /// Run one pipeline pass for `interaction`.
  pub fn handle_interaction(&mut self, interaction: Interaction) -> RenderModel {
    self.apply(interaction);
    resolve_pending(&mut self.state, &self.domain);
    self.render()
  }

  fn apply(&mut self, interaction: Interaction) {
    let state = &mut self.state;
    match interaction {
      Interaction::Refresh => {}
      Interaction::SetYears(years) => state.set_years(years),
      Interaction::SetCountries(countries) => state.set_countries(countries),
      Interaction::SetProductLines(lines) => state.set_product_lines(lines),
      Interaction::ToggleYear(year) => state.toggle_year(year),
      Interaction::ToggleCountry(country) => state.toggle_country(&country),
      Interaction::ToggleProductLine(line) => state.toggle_product_line(&line),
      Interaction::Trigger(action) => state.set_pending(Some(action)),
    }
  }

  /// Filter and aggregate with the current state.
  pub fn render(&self) -> RenderModel {
    let active = self.state.coverage(&self.domain);
    let (subset, degraded) = apply_or_unfiltered(&self.table, &self.state);

    debug!(
      rows = subset.len(),
      total = self.table.len(),
      degraded,
      "pipeline pass"
    );

    if subset.is_empty() {
      return RenderModel::NoResults {
        active,
        suggestion: PendingAction::ResetAllFilters,
      };
    }

    let config = &self.config;
    RenderModel::Dashboard(Box::new(DashboardModel {
      overview: Overview::build(&subset),
      active,
      degraded,
      global: GlobalView::build(&subset, &self.baseline, config),
      temporal: TemporalView::build(&subset, config),
      geo: GeoView::build(&subset, config),
      customers: CustomerView::build(&subset, config),
      products: ProductView::build(&subset, config),
      behavior: BehaviorView::build(&subset, &self.baseline),
    }))
  }
}
