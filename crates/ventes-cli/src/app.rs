//! Application state machine and key dispatcher.
//!
//! Every key that changes the filters becomes one [`Interaction`] and one
//! pipeline pass; the resulting [`RenderModel`] is kept until the next one.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use strum::{Display, EnumIter, IntoEnumIterator};
use ventes_core::{
  action::PendingAction,
  dashboard::{Interaction, RenderModel, Session},
};

/// Above this many countries the country pane gets a search box.
pub const COUNTRY_SEARCH_THRESHOLD: usize = 10;

// ─── Focus ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  /// Keyboard drives the filter panel on the left.
  Filters,
  /// Keyboard drives the tabbed view on the right.
  View,
}

/// One of the three multi-selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum FilterPane {
  Years,
  Countries,
  #[strum(serialize = "Product lines")]
  ProductLines,
}

impl FilterPane {
  fn next(self) -> Self {
    match self {
      Self::Years => Self::Countries,
      Self::Countries => Self::ProductLines,
      Self::ProductLines => Self::Years,
    }
  }

  fn prev(self) -> Self {
    match self {
      Self::Years => Self::ProductLines,
      Self::Countries => Self::Years,
      Self::ProductLines => Self::Countries,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Tab {
  Global,
  Temporal,
  Geography,
  Customers,
  Products,
  Behaviour,
}

impl Tab {
  pub fn index(self) -> usize { Tab::iter().position(|t| t == self).unwrap_or(0) }

  fn from_index(index: usize) -> Self { Tab::iter().nth(index).unwrap_or(Tab::Global) }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub session: Session,

  /// Output of the last pipeline pass.
  pub model: RenderModel,

  pub focus: Focus,
  pub pane:  FilterPane,
  pub tab:   Tab,

  /// Cursor per filter pane, indexing the *visible* values.
  pub cursors: [usize; 3],

  /// Scroll offset of the active tab.
  pub scroll: u16,

  /// Current fuzzy query on the country pane.
  pub search: String,

  /// Whether the user is typing into the country search box.
  pub search_active: bool,

  /// One-line status message shown in the status bar.
  pub status_msg: String,
}

impl App {
  /// Create an [`App`] and run the first pass.
  pub fn new(mut session: Session) -> Self {
    let model = session.handle_interaction(Interaction::Refresh);
    Self {
      session,
      model,
      focus: Focus::Filters,
      pane: FilterPane::Years,
      tab: Tab::Global,
      cursors: [0; 3],
      scroll: 0,
      search: String::new(),
      search_active: false,
      status_msg: String::new(),
    }
  }

  /// Run one pipeline pass and keep its output.
  pub fn dispatch(&mut self, interaction: Interaction) {
    self.model = self.session.handle_interaction(interaction);
    self.scroll = 0;
  }

  // ── Filter panel ──────────────────────────────────────────────────────────

  pub fn country_search_enabled(&self) -> bool {
    self.session.domain().countries.len() > COUNTRY_SEARCH_THRESHOLD
  }

  /// Countries matching the search query, in domain order.
  pub fn visible_countries(&self) -> Vec<&str> {
    let countries = self.session.domain().countries.iter().map(String::as_str);
    if self.search.is_empty() {
      return countries.collect();
    }
    let matcher = SkimMatcherV2::default();
    countries
      .filter(|c| matcher.fuzzy_match(c, &self.search).is_some())
      .collect()
  }

  /// `(label, selected)` for every visible value of `pane`.
  pub fn pane_items(&self, pane: FilterPane) -> Vec<(String, bool)> {
    let state = self.session.state();
    match pane {
      FilterPane::Years => self
        .session
        .domain()
        .years
        .iter()
        .map(|y| (y.to_string(), state.years().contains(y)))
        .collect(),
      FilterPane::Countries => self
        .visible_countries()
        .into_iter()
        .map(|c| (c.to_owned(), state.countries().contains(c)))
        .collect(),
      FilterPane::ProductLines => self
        .session
        .domain()
        .product_lines
        .iter()
        .map(|l| (l.clone(), state.product_lines().contains(l)))
        .collect(),
    }
  }

  pub fn cursor(&self, pane: FilterPane) -> usize { self.cursors[pane as usize] }

  fn cursor_mut(&mut self) -> &mut usize { &mut self.cursors[self.pane as usize] }

  fn pane_len(&self) -> usize {
    match self.pane {
      FilterPane::Years => self.session.domain().years.len(),
      FilterPane::Countries => self.visible_countries().len(),
      FilterPane::ProductLines => self.session.domain().product_lines.len(),
    }
  }

  /// The toggle for the value under the cursor, if any.
  fn toggle_under_cursor(&self) -> Option<Interaction> {
    let index = self.cursor(self.pane);
    let domain = self.session.domain();
    match self.pane {
      FilterPane::Years => domain.years.get(index).map(|y| Interaction::ToggleYear(*y)),
      FilterPane::Countries => self
        .visible_countries()
        .get(index)
        .map(|c| Interaction::ToggleCountry((*c).to_owned())),
      FilterPane::ProductLines => domain
        .product_lines
        .get(index)
        .map(|l| Interaction::ToggleProductLine(l.clone())),
    }
  }

  /// Select exactly the visible values of the current pane, or none.
  fn set_pane(&self, all: bool) -> Interaction {
    let domain = self.session.domain();
    match self.pane {
      FilterPane::Years => {
        Interaction::SetYears(if all { domain.years.clone() } else { Vec::new() })
      }
      FilterPane::Countries => Interaction::SetCountries(if all {
        self.visible_countries().into_iter().map(str::to_owned).collect()
      } else {
        Vec::new()
      }),
      FilterPane::ProductLines => Interaction::SetProductLines(if all {
        domain.product_lines.clone()
      } else {
        Vec::new()
      }),
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    if self.search_active {
      self.handle_search_key(key);
      return true;
    }

    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Tab => {
        self.focus = match self.focus {
          Focus::Filters => Focus::View,
          Focus::View => Focus::Filters,
        };
      }
      KeyCode::Char('r') => self.trigger(PendingAction::ResetAllFilters),
      KeyCode::Char('a') => self.trigger(PendingAction::SelectAllYears),
      KeyCode::Char('L') => self.trigger(PendingAction::SelectLastYear),
      KeyCode::F(5) => {
        self.dispatch(Interaction::Refresh);
        self.status_msg = "Refreshed".into();
      }
      _ => match self.focus {
        Focus::Filters => self.handle_filter_key(key),
        Focus::View => self.handle_view_key(key),
      },
    }
    true
  }

  fn trigger(&mut self, action: PendingAction) {
    self.dispatch(Interaction::Trigger(action));
    self.status_msg = format!("Applied {action}");
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Left | KeyCode::Char('h') => self.pane = self.pane.prev(),
      KeyCode::Right | KeyCode::Char('l') => self.pane = self.pane.next(),
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.pane_len();
        let cursor = self.cursor_mut();
        if *cursor + 1 < len {
          *cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        let cursor = self.cursor_mut();
        *cursor = cursor.saturating_sub(1);
      }
      KeyCode::Char(' ') | KeyCode::Enter => {
        if let Some(interaction) = self.toggle_under_cursor() {
          self.dispatch(interaction);
        }
      }
      KeyCode::Char('A') => self.dispatch(self.set_pane(true)),
      KeyCode::Char('x') => self.dispatch(self.set_pane(false)),
      KeyCode::Char('/')
        if self.pane == FilterPane::Countries && self.country_search_enabled() =>
      {
        self.search_active = true;
      }
      _ => {}
    }
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.search_active = false;
        self.search.clear();
      }
      KeyCode::Enter => self.search_active = false,
      KeyCode::Backspace => {
        self.search.pop();
      }
      KeyCode::Char(c) => self.search.push(c),
      _ => {}
    }
    self.cursors[FilterPane::Countries as usize] = 0;
  }

  fn handle_view_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Right | KeyCode::Char('l') => {
        self.tab = Tab::from_index((self.tab.index() + 1) % Tab::iter().count());
        self.scroll = 0;
      }
      KeyCode::Left | KeyCode::Char('h') => {
        let count = Tab::iter().count();
        self.tab = Tab::from_index((self.tab.index() + count - 1) % count);
        self.scroll = 0;
      }
      KeyCode::Char(c @ '1'..='6') => {
        self.tab = Tab::from_index(c as usize - '1' as usize);
        self.scroll = 0;
      }
      KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
      KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
      KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
      KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
      _ => {}
    }
  }
}
