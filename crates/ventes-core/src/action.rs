//! Pending actions and their resolution.
//!
//! Bulk filter buttons do not touch the selections directly. They record a
//! [`PendingAction`]; the next pipeline pass resolves it exactly once and
//! clears the slot.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

use crate::{filter::FilterState, table::FilterDomain};

/// A one-shot bulk filter operation.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PendingAction {
  /// Select every year present in the table.
  SelectAllYears,
  /// Select only the most recent year.
  SelectLastYear,
  /// Restore all three selections to the full domain.
  ResetAllFilters,
}

impl PendingAction {
  /// Parse a token such as `"select_last_year"`.
  pub fn from_token(token: &str) -> crate::Result<Self> {
    token
      .parse()
      .map_err(|_| crate::Error::UnknownAction(token.to_owned()))
  }
}

/// Apply the pending action, if any, then clear it.
///
/// The selections are fully rewritten before the token is cleared. Returns
/// the action that was applied; with no pending action this is a no-op that
/// returns `None`.
pub fn resolve_pending(
  state: &mut FilterState,
  domain: &FilterDomain,
) -> Option<PendingAction> {
  let action = state.pending()?;

  match action {
    PendingAction::SelectAllYears => {
      state.set_years(domain.years.iter().copied());
    }
    PendingAction::SelectLastYear => {
      let last = domain.years.iter().copied().max();
      state.set_years(last);
    }
    PendingAction::ResetAllFilters => {
      let years = domain.years.clone();
      let countries = domain.countries.clone();
      let lines = domain.product_lines.clone();
      state.set_years(years);
      state.set_countries(countries);
      state.set_product_lines(lines);
    }
  }

  state.set_pending(None);
  debug!(%action, "resolved pending action");
  Some(action)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn domain() -> FilterDomain {
    FilterDomain {
      years:         vec![2003, 2004, 2005],
      countries:     vec!["France".into(), "Spain".into(), "USA".into()],
      product_lines: vec!["Classic Cars".into(), "Planes".into()],
    }
  }

  #[test]
  fn tokens_use_snake_case() {
    assert_eq!(
      PendingAction::from_token("select_last_year").unwrap(),
      PendingAction::SelectLastYear
    );
    assert_eq!(PendingAction::ResetAllFilters.to_string(), "reset_all_filters");
    assert_eq!(
      serde_json::to_string(&PendingAction::SelectAllYears).unwrap(),
      "\"select_all_years\""
    );
    assert!(matches!(
      PendingAction::from_token("select_everything"),
      Err(crate::Error::UnknownAction(_))
    ));
  }

  #[test]
  fn select_last_year_keeps_only_the_maximum() {
    let domain = domain();
    let mut state = FilterState::new(&domain);
    state.set_pending(Some(PendingAction::SelectLastYear));

    let applied = resolve_pending(&mut state, &domain);
    assert_eq!(applied, Some(PendingAction::SelectLastYear));
    assert_eq!(state.years().iter().copied().collect::<Vec<_>>(), vec![2005]);
    assert_eq!(state.pending(), None);
  }

  #[test]
  fn select_last_year_with_no_years_is_empty() {
    let domain = FilterDomain::default();
    let mut state = FilterState::new(&domain);
    state.set_years([2010]);
    state.set_pending(Some(PendingAction::SelectLastYear));
    resolve_pending(&mut state, &domain);
    assert!(state.years().is_empty());
  }

  #[test]
  fn select_all_years_restores_years_only() {
    let domain = domain();
    let mut state = FilterState::new(&domain);
    state.set_years([2004]);
    state.set_countries(["USA"]);
    state.set_pending(Some(PendingAction::SelectAllYears));

    resolve_pending(&mut state, &domain);
    assert_eq!(
      state.years().iter().copied().collect::<Vec<_>>(),
      vec![2003, 2004, 2005]
    );
    assert_eq!(state.countries().len(), 1);
  }

  #[test]
  fn reset_restores_everything_and_is_idempotent() {
    let domain = domain();
    let mut state = FilterState::new(&domain);
    state.set_years([]);
    state.set_countries(["Atlantis"]);
    state.set_product_lines(["Planes"]);

    state.set_pending(Some(PendingAction::ResetAllFilters));
    resolve_pending(&mut state, &domain);
    assert_eq!(state, FilterState::new(&domain));

    state.set_pending(Some(PendingAction::ResetAllFilters));
    resolve_pending(&mut state, &domain);
    assert_eq!(state, FilterState::new(&domain));
  }

  #[test]
  fn resolving_without_a_token_is_a_no_op() {
    let domain = domain();
    let mut state = FilterState::new(&domain);
    state.set_years([2004]);
    let before = state.clone();

    assert_eq!(resolve_pending(&mut state, &domain), None);
    assert_eq!(state, before);
  }

  #[test]
  fn token_is_consumed_at_most_once() {
    let domain = domain();
    let mut state = FilterState::new(&domain);
    state.set_pending(Some(PendingAction::SelectLastYear));
    resolve_pending(&mut state, &domain);

    state.set_years([2003]);
    assert_eq!(resolve_pending(&mut state, &domain), None);
    assert_eq!(state.years().iter().copied().collect::<Vec<_>>(), vec![2003]);
  }
}
