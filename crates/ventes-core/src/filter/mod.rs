//! Session filter state: the three selections plus the pending action slot.
//!
//! The state is owned by the session and mutated only through the accessors
//! below (direct user selection) or by [`crate::action::resolve_pending`].
//! Assigned values are not validated against the domain; values the table
//! does not contain simply match no rows.

pub mod engine;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{action::PendingAction, table::FilterDomain};

pub use engine::{apply, apply_or_unfiltered};

/// Selected years, countries and product lines, plus the one-shot pending
/// action token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
  years:         BTreeSet<i32>,
  countries:     BTreeSet<String>,
  product_lines: BTreeSet<String>,
  pending:       Option<PendingAction>,
}

impl FilterState {
  /// Everything selected, no pending action.
  pub fn new(domain: &FilterDomain) -> Self {
    Self {
      years:         domain.years.iter().copied().collect(),
      countries:     domain.countries.iter().cloned().collect(),
      product_lines: domain.product_lines.iter().cloned().collect(),
      pending:       None,
    }
  }

  // ── Years ───────────────────────────────────────────────────────────────

  pub fn years(&self) -> &BTreeSet<i32> { &self.years }

  pub fn set_years(&mut self, years: impl IntoIterator<Item = i32>) {
    self.years = years.into_iter().collect();
  }

  pub fn toggle_year(&mut self, year: i32) {
    if !self.years.remove(&year) {
      self.years.insert(year);
    }
  }

  // ── Countries ───────────────────────────────────────────────────────────

  pub fn countries(&self) -> &BTreeSet<String> { &self.countries }

  pub fn set_countries<S: Into<String>>(
    &mut self,
    countries: impl IntoIterator<Item = S>,
  ) {
    self.countries = countries.into_iter().map(Into::into).collect();
  }

  pub fn toggle_country(&mut self, country: &str) {
    toggle(&mut self.countries, country);
  }

  // ── Product lines ───────────────────────────────────────────────────────

  pub fn product_lines(&self) -> &BTreeSet<String> { &self.product_lines }

  pub fn set_product_lines<S: Into<String>>(
    &mut self,
    lines: impl IntoIterator<Item = S>,
  ) {
    self.product_lines = lines.into_iter().map(Into::into).collect();
  }

  pub fn toggle_product_line(&mut self, line: &str) {
    toggle(&mut self.product_lines, line);
  }

  // ── Pending action ──────────────────────────────────────────────────────

  pub fn pending(&self) -> Option<PendingAction> { self.pending }

  pub fn set_pending(&mut self, action: Option<PendingAction>) {
    self.pending = action;
  }

  /// Whether the row matches all three selections.
  pub fn matches(&self, year: i32, country: &str, product_line: &str) -> bool {
    self.years.contains(&year)
      && self.countries.contains(country)
      && self.product_lines.contains(product_line)
  }

  /// Move the state onto a new domain after a reload. A dimension that had
  /// every value of `old` selected gets every value of `new`; partial
  /// selections are kept as they are.
  pub fn rebase(&mut self, old: &FilterDomain, new: &FilterDomain) {
    let coverage = self.coverage(old);
    if coverage.years.is_full() {
      self.years.extend(new.years.iter().copied());
    }
    if coverage.countries.is_full() {
      self.countries.extend(new.countries.iter().cloned());
    }
    if coverage.product_lines.is_full() {
      self.product_lines.extend(new.product_lines.iter().cloned());
    }
  }

  /// `(selected, domain size)` for each dimension, in the order years,
  /// countries, product lines. Only domain values are counted as selected.
  pub fn coverage(&self, domain: &FilterDomain) -> ActiveFilters {
    ActiveFilters {
      years:         Coverage {
        selected: domain.years.iter().filter(|y| self.years.contains(y)).count(),
        total:    domain.years.len(),
      },
      countries:     Coverage {
        selected: domain
          .countries
          .iter()
          .filter(|c| self.countries.contains(c.as_str()))
          .count(),
        total:    domain.countries.len(),
      },
      product_lines: Coverage {
        selected: domain
          .product_lines
          .iter()
          .filter(|p| self.product_lines.contains(p.as_str()))
          .count(),
        total:    domain.product_lines.len(),
      },
    }
  }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
  if !set.remove(value) {
    set.insert(value.to_owned());
  }
}

/// How many domain values of one dimension are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coverage {
  pub selected: usize,
  pub total:    usize,
}

impl Coverage {
  pub fn is_full(&self) -> bool { self.selected == self.total }
}

/// The "active filters" indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveFilters {
  pub years:         Coverage,
  pub countries:     Coverage,
  pub product_lines: Coverage,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn domain() -> FilterDomain {
    FilterDomain {
      years:         vec![2003, 2004, 2005],
      countries:     vec!["France".into(), "USA".into()],
      product_lines: vec!["Classic Cars".into(), "Planes".into()],
    }
  }

  #[test]
  fn new_state_selects_everything() {
    let state = FilterState::new(&domain());
    assert_eq!(state.years().len(), 3);
    assert_eq!(state.countries().len(), 2);
    assert_eq!(state.product_lines().len(), 2);
    assert_eq!(state.pending(), None);
    let coverage = state.coverage(&domain());
    assert!(coverage.years.is_full());
    assert!(coverage.countries.is_full());
    assert!(coverage.product_lines.is_full());
  }

  #[test]
  fn toggles_add_and_remove() {
    let mut state = FilterState::new(&domain());
    state.toggle_year(2004);
    assert!(!state.years().contains(&2004));
    state.toggle_year(2004);
    assert!(state.years().contains(&2004));

    state.toggle_country("USA");
    assert!(!state.countries().contains("USA"));
    state.toggle_product_line("Planes");
    assert!(!state.product_lines().contains("Planes"));
  }

  #[test]
  fn out_of_domain_values_are_accepted_but_not_counted() {
    let mut state = FilterState::new(&domain());
    state.set_countries(["Atlantis", "USA"]);
    assert!(state.countries().contains("Atlantis"));
    let coverage = state.coverage(&domain());
    assert_eq!(coverage.countries, Coverage { selected: 1, total: 2 });
  }

  #[test]
  fn rebase_grows_only_full_selections() {
    let old = domain();
    let new = FilterDomain {
      years:         vec![2003, 2004, 2005, 2006],
      countries:     vec!["France".into(), "Spain".into(), "USA".into()],
      product_lines: vec!["Classic Cars".into(), "Planes".into(), "Ships".into()],
    };
    let mut state = FilterState::new(&old);
    state.toggle_country("USA");
    state.rebase(&old, &new);

    let coverage = state.coverage(&new);
    assert!(coverage.years.is_full());
    assert!(coverage.product_lines.is_full());
    assert_eq!(coverage.countries, Coverage { selected: 1, total: 3 });
  }
}
