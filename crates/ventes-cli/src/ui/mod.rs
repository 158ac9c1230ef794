//! TUI rendering: header, filter panel, tabbed views, status bar.

pub mod filters;
pub mod views;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use ventes_core::filter::Coverage;

use crate::app::{App, Focus};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn coverage_label(name: &str, coverage: Coverage) -> String {
  if coverage.is_full() {
    format!("{name}: all")
  } else {
    format!("{name}: {}/{}", coverage.selected, coverage.total)
  }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();
  let active = app.model.active();

  let left = Span::styled(
    " ventes ",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let filters = Span::styled(
    format!(
      " {}  {}  {}",
      coverage_label("years", active.years),
      coverage_label("countries", active.countries),
      coverage_label("lines", active.product_lines),
    ),
    Style::default().fg(Color::Gray),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  let used = (left.width() + filters.width() + right.width()) as u16;
  let pad = area.width.saturating_sub(used);

  let line = Line::from(vec![
    left,
    filters,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
    .split(area);

  filters::draw(f, cols[0], app);
  views::draw(f, cols[1], app);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.focus {
    Focus::Filters if app.search_active => ("SEARCH", "Type to filter  Enter keep  Esc clear"),
    Focus::Filters => (
      "FILTERS",
      "h/l pane  j/k move  space toggle  A all  x none  a all years  L last year  r reset  Tab views  q quit",
    ),
    Focus::View => ("VIEW", "h/l or 1-6 tab  j/k scroll  Tab filters  r reset  q quit"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mut spans = vec![Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  )];
  if app.model.dashboard().is_some_and(|d| d.degraded) {
    spans.push(Span::styled(
      " DEGRADED ",
      Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD),
    ));
  }
  spans.push(Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  ));

  f.render_widget(
    Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black)),
    area,
  );
}
