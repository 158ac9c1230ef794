//! Filter panel: the three multi-selects, stacked.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use strum::IntoEnumIterator;

use crate::app::{App, FilterPane, Focus};

/// Render the filter panel into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let panes = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Percentage(25),
      Constraint::Percentage(45),
      Constraint::Percentage(30),
    ])
    .split(area);

  for (pane, rect) in FilterPane::iter().zip(panes.iter()) {
    draw_pane(f, *rect, app, pane);
  }
}

fn draw_pane(f: &mut Frame, area: Rect, app: &App, pane: FilterPane) {
  let items = app.pane_items(pane);
  let selected = items.iter().filter(|(_, on)| *on).count();
  let focused = app.focus == Focus::Filters && app.pane == pane;

  let block = Block::default()
    .title(format!(" {pane} ({selected}/{}) ", items.len()))
    .borders(Borders::ALL)
    .border_style(if focused {
      Style::default().fg(Color::Cyan)
    } else {
      Style::default().fg(Color::DarkGray)
    });

  let mut inner = block.inner(area);
  f.render_widget(block, area);

  // Country search bar on the last inner row.
  let searchable = pane == FilterPane::Countries && app.country_search_enabled();
  if searchable && (app.search_active || !app.search.is_empty()) && inner.height > 2 {
    let bar = Rect {
      x:      inner.x,
      y:      inner.y + inner.height - 1,
      width:  inner.width,
      height: 1,
    };
    inner.height -= 1;

    let text = if app.search_active {
      format!("/{}_", app.search)
    } else {
      format!("/{}", app.search)
    };
    f.render_widget(
      Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
      bar,
    );
  }

  let list_items: Vec<ListItem> = items
    .iter()
    .map(|(label, on)| {
      let (mark, style) = if *on {
        ("[x] ", Style::default().fg(Color::Green))
      } else {
        ("[ ] ", Style::default().fg(Color::DarkGray))
      };
      ListItem::new(Line::from(vec![
        Span::styled(mark, style),
        Span::raw(label.clone()),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(if focused && !items.is_empty() {
    Some(app.cursor(pane).min(items.len() - 1))
  } else {
    None
  });

  f.render_stateful_widget(
    List::new(list_items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner,
    &mut state,
  );
}
