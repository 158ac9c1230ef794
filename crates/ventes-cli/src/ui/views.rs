//! Right-hand pane: overview strip plus one tab per analysis view.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};
use strum::IntoEnumIterator;
use ventes_core::{
  aggregate::{alerts::Severity, score::Rating, temporal::MonthShare},
  dashboard::{DashboardModel, RenderModel},
};

use crate::app::{App, Focus, Tab};

// ─── Public entry ─────────────────────────────────────────────────────────────

/// Render the view pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(if app.focus == Focus::View {
      Style::default().fg(Color::Cyan)
    } else {
      Style::default().fg(Color::DarkGray)
    });
  let inner = block.inner(area);
  f.render_widget(block, area);

  let model = match &app.model {
    RenderModel::Dashboard(model) => model,
    RenderModel::NoResults { suggestion, .. } => {
      let lines = vec![
        Line::from(Span::styled(
          "No sales match the current filters.",
          Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
          format!("Press r to {}.", suggestion.to_string().replace('_', " ")),
          Style::default().fg(Color::DarkGray),
        )),
      ];
      f.render_widget(Paragraph::new(lines), inner);
      return;
    }
  };

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(2), // overview
      Constraint::Length(1), // tab bar
      Constraint::Min(0),    // tab body
    ])
    .split(inner);

  f.render_widget(Paragraph::new(overview(model)), rows[0]);

  let titles: Vec<String> = Tab::iter()
    .enumerate()
    .map(|(i, t)| format!("{} {t}", i + 1))
    .collect();
  f.render_widget(
    Tabs::new(titles)
      .select(app.tab.index())
      .style(Style::default().fg(Color::DarkGray))
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
    rows[1],
  );

  let lines = match app.tab {
    Tab::Global => global(model),
    Tab::Temporal => temporal(model),
    Tab::Geography => geography(model),
    Tab::Customers => customers(model),
    Tab::Products => products(model),
    Tab::Behaviour => behaviour(model),
  };
  f.render_widget(
    Paragraph::new(lines)
      .wrap(Wrap { trim: false })
      .scroll((app.scroll, 0)),
    rows[2],
  );
}

/// Rows of the city ranking shown in the geography tab.
const CITY_ROWS: usize = 30;

// ─── Formatting ───────────────────────────────────────────────────────────────

/// `1234567.8` → `"1,234,568"`.
pub fn money(value: f64) -> String {
  let rounded = value.round();
  let digits = format!("{:.0}", rounded.abs());
  let mut out = String::new();
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(c);
  }
  if rounded < 0.0 {
    format!("-{out}")
  } else {
    out
  }
}

pub fn pct(value: f64) -> String { format!("{value:.1}%") }

/// Best-to-worst month ratio as a multiplier with its level.
pub fn amplitude(ratio: f64, high: bool) -> String {
  format!("{ratio:.1}x  {}", if high { "high" } else { "moderate" })
}

/// Signed percentage, or a dash when there is nothing to compare against.
pub fn growth(value: Option<f64>) -> String {
  value.map_or_else(|| "-".to_owned(), |v| format!("{v:+.1}%"))
}

fn heading(text: &str) -> Line<'static> {
  Line::from(Span::styled(
    text.to_owned(),
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  ))
}

fn row(label: &str, value: String) -> Line<'static> {
  Line::from(vec![
    Span::styled(format!("  {label:<24}"), Style::default().fg(Color::Gray)),
    Span::raw(value),
  ])
}

fn overview(model: &DashboardModel) -> Vec<Line<'static>> {
  let o = &model.overview;
  vec![
    Line::from(format!(
      " Revenue {}   Orders {}   AOV {}   Growth {}",
      money(o.revenue),
      o.orders,
      money(o.average_order_value),
      growth(Some(o.growth)),
    )),
    Line::from(Span::styled(
      format!(
        " {} customers  {} countries  {} cities  {} lines  {} products  {:.1} units/order",
        o.customers, o.countries, o.cities, o.product_lines, o.products, o.units_per_order,
      ),
      Style::default().fg(Color::DarkGray),
    )),
  ]
}

// ─── Tabs ─────────────────────────────────────────────────────────────────────

fn global(model: &DashboardModel) -> Vec<Line<'static>> {
  let g = &model.global;
  let mut lines = vec![heading("Key figures")];
  lines.push(row(&format!("{} share", g.focus_product), pct(g.focus_product_share)));
  lines.push(row(&format!("{} share", g.focus_country), pct(g.focus_country_share)));
  if let Some((name, share)) = &g.top_customer {
    lines.push(row("Top customer", format!("{name} ({})", pct(*share))));
  }
  lines.push(row(
    "Success rate",
    g.success_rate.map_or_else(|| "-".to_owned(), pct),
  ));
  lines.push(row("At-risk revenue", pct(g.at_risk_share)));

  lines.push(Line::from(""));
  lines.push(heading("Performance score"));
  for (name, value) in g.score.parts() {
    lines.push(row(name, format!("{value:.0}")));
  }
  let rating_color = match g.score.rating {
    Rating::Excellent => Color::Green,
    Rating::Good => Color::Yellow,
    Rating::NeedsWork => Color::Red,
  };
  lines.push(Line::from(vec![
    Span::styled(format!("  {:<24}", "Global"), Style::default().fg(Color::Gray)),
    Span::styled(
      format!("{:.0}  {}", g.score.global, g.score.rating),
      Style::default().fg(rating_color).add_modifier(Modifier::BOLD),
    ),
  ]));

  lines.push(Line::from(""));
  lines.push(heading("Alerts"));
  for alert in &g.alerts {
    let color = match alert.severity {
      Severity::Critical => Color::Red,
      Severity::Warning => Color::Yellow,
      Severity::Healthy => Color::Green,
    };
    lines.push(Line::from(vec![
      Span::styled(format!("  {:<9}", alert.severity.to_string()), Style::default().fg(color)),
      Span::styled(format!("{:<12}", alert.area), Style::default().fg(Color::Gray)),
      Span::raw(alert.message.clone()),
    ]));
    lines.push(Line::from(Span::styled(
      format!("  {:<21}-> {}", "", alert.recommendation),
      Style::default().fg(Color::DarkGray),
    )));
  }

  lines.push(Line::from(""));
  lines.push(heading("Product x market"));
  let header: String = g
    .matrix
    .countries
    .iter()
    .map(|c| format!("{c:>12.12}"))
    .collect();
  lines.push(Line::from(Span::styled(
    format!("  {:<20}{header}", ""),
    Style::default().fg(Color::Gray),
  )));
  for (line, cells) in g.matrix.product_lines.iter().zip(&g.matrix.cells) {
    let values: String = cells.iter().map(|v| format!("{:>12}", money(*v))).collect();
    lines.push(Line::from(format!("  {line:<20.20}{values}")));
  }
  for combo in &g.combinations {
    lines.push(row(
      &format!("{} / {}", combo.product_line, combo.country),
      money(combo.revenue),
    ));
  }
  lines
}

fn temporal(model: &DashboardModel) -> Vec<Line<'static>> {
  let t = &model.temporal;
  let mut lines = vec![heading("By year")];
  for y in &t.yearly {
    lines.push(row(
      &y.year.to_string(),
      format!(
        "{:>12}  {:>5} orders  AOV {:>8}  {:>8}",
        money(y.revenue),
        y.orders,
        money(y.average_order_value),
        growth(y.revenue_growth),
      ),
    ));
  }
  lines.push(row("Trend", format!("{}  ({})", t.trend, t.growth_band)));

  lines.push(Line::from(""));
  lines.push(heading("By quarter"));
  for q in &t.quarterly {
    lines.push(row(&format!("{} Q{}", q.year, q.period), money(q.revenue)));
  }
  if let Some(q) = &t.best_quarter {
    lines.push(row("Best quarter", format!("{} Q{} ({})", q.year, q.period, money(q.revenue))));
  }
  if let Some(m) = &t.best_month {
    lines.push(row("Best month", format!("{}-{:02} ({})", m.year, m.period, money(m.revenue))));
  }

  lines.push(Line::from(""));
  lines.push(heading("Top months"));
  for m in &t.top_months {
    lines.push(row(
      &format!("{}-{:02}", m.year, m.month),
      format!("{:>12}  {:>8} vs prior", money(m.revenue), growth(m.growth)),
    ));
  }

  lines.push(Line::from(""));
  lines.push(heading("Seasonality"));
  for s in &t.seasonality {
    lines.push(row(&format!("Month {:02}", s.month), format!("{:>7}", pct(s.share))));
  }
  lines.push(row("Amplitude", amplitude(t.amplitude, t.amplitude_is_high)));
  lines.push(row("Intensity", t.intensity.to_string()));
  let months = |list: &[MonthShare]| -> String {
    list
      .iter()
      .map(|m| format!("{:02} ({})", m.month, pct(m.share)))
      .collect::<Vec<_>>()
      .join(", ")
  };
  lines.push(row("Strongest months", months(&t.strongest)));
  lines.push(row("Weakest months", months(&t.weakest)));
  lines
}

fn geography(model: &DashboardModel) -> Vec<Line<'static>> {
  let geo = &model.geo;
  let mut lines = vec![heading("Summary")];
  if let Some((country, share)) = &geo.summary.leader {
    lines.push(row("Leader", format!("{country} ({})", pct(*share))));
  }
  lines.push(row("Top 3 concentration", pct(geo.summary.top3_concentration)));
  lines.push(row("Top 5 concentration", pct(geo.summary.top5_concentration)));
  lines.push(row("Active countries", geo.summary.active_countries.to_string()));
  lines.push(row("Revenue per country", money(geo.summary.revenue_per_country)));
  lines.push(row("Diversity", pct(geo.summary.diversity)));

  lines.push(Line::from(""));
  lines.push(heading("Countries"));
  for c in &geo.countries {
    lines.push(row(
      &c.country,
      format!(
        "{:>12}  {:>6}  {:>4} customers  {}",
        money(c.revenue),
        pct(c.share),
        c.customers,
        c.market,
      ),
    ));
  }

  lines.push(Line::from(""));
  lines.push(heading("Market types"));
  for m in &geo.markets {
    lines.push(row(
      &m.market.to_string(),
      format!("{:>3} countries  {:>12}  {}", m.countries, money(m.revenue), pct(m.share)),
    ));
  }

  lines.push(Line::from(""));
  lines.push(heading("Cities"));
  let cs = &geo.city_summary;
  lines.push(row("Active cities", format!("{} in {} countries", cs.active_cities, cs.countries)));
  lines.push(row("Leading cities' share", pct(cs.top_concentration)));
  lines.push(row("Revenue per city", money(cs.revenue_per_city)));
  for c in geo.cities.iter().take(CITY_ROWS) {
    lines.push(row(
      &format!("#{} {} ({})", c.world_rank, c.city, c.country),
      format!("{:>12}  #{} in country", money(c.revenue), c.national_rank),
    ));
  }

  lines.push(Line::from(""));
  lines.push(heading("Strategic cities"));
  for c in &geo.strategic_cities {
    lines.push(row(
      &format!("{} ({})", c.city, c.country),
      format!("{:>12}  {} of country", money(c.revenue), pct(c.share_of_country)),
    ));
  }
  lines
}

fn customers(model: &DashboardModel) -> Vec<Line<'static>> {
  let c = &model.customers;
  let mut lines = vec![heading("Segments")];
  for s in &c.segmentation.segments {
    lines.push(row(
      &s.segment.to_string(),
      format!(
        "{:>4} customers  {:>12}  {:>6}  {} per customer",
        s.customers,
        money(s.revenue),
        pct(s.share),
        money(s.revenue_per_customer),
      ),
    ));
  }

  lines.push(Line::from(""));
  lines.push(heading("Top customers"));
  for t in &c.top_customers {
    lines.push(row(
      &t.customer,
      format!("{:>12}  {:>3} orders  {}", money(t.revenue), t.orders, t.country),
    ));
  }

  lines.push(Line::from(""));
  lines.push(heading("Loyal premium customers"));
  if c.loyal.is_empty() {
    lines.push(Line::from(Span::styled("  none", Style::default().fg(Color::DarkGray))));
  }
  for l in &c.loyal {
    lines.push(row(
      &l.customer,
      format!("{:>3} orders  {:>12}  {}", l.orders, money(l.revenue), l.country),
    ));
  }

  lines.push(Line::from(""));
  lines.push(heading("By country"));
  for b in &c.by_country {
    lines.push(row(
      &b.country,
      format!("{:>4} customers  {} per customer", b.customers, money(b.revenue_per_customer)),
    ));
  }
  lines
}

fn products(model: &DashboardModel) -> Vec<Line<'static>> {
  let p = &model.products;
  let mut lines = vec![heading("Product lines")];
  for l in &p.lines {
    lines.push(row(
      &l.product_line,
      format!(
        "{:>12}  {:>6}  {:>6} units  AOV {}",
        money(l.revenue),
        pct(l.share),
        l.quantity,
        money(l.average_order_value),
      ),
    ));
  }
  lines.push(row("Top 3 concentration", pct(p.top3_concentration)));

  lines.push(Line::from(""));
  lines.push(heading("Best sellers by units"));
  for s in &p.top_by_quantity {
    lines.push(row(&s.product_code, format!("{:>6} units  {}", s.quantity, s.product_line)));
  }

  lines.push(Line::from(""));
  lines.push(heading("Best sellers by revenue"));
  for s in &p.top_by_revenue {
    lines.push(row(&s.product_code, format!("{:>12}  {}", money(s.revenue), s.product_line)));
  }

  lines.push(Line::from(""));
  lines.push(heading("Price variability"));
  for v in &p.price_variability {
    lines.push(row(
      &v.product_code,
      format!(
        "mean {:>8.2}  sd {:>7.2}  range {:.2}-{:.2}  list {:.2}",
        v.mean, v.std_dev, v.min, v.max, v.suggested_price,
      ),
    ));
  }
  lines
}

fn behaviour(model: &DashboardModel) -> Vec<Line<'static>> {
  let b = &model.behavior;
  let mut lines = vec![heading("Transaction size")];
  for s in &b.sizes {
    lines.push(row(
      &s.size.to_string(),
      format!("{:>12}  {:>5} orders  {}", money(s.revenue), s.orders, pct(s.share)),
    ));
  }

  lines.push(Line::from(""));
  lines.push(heading("Order status"));
  for s in &b.statuses {
    lines.push(row(
      &s.status.to_string(),
      format!("{:>5} orders  {:>12}", s.orders, money(s.revenue)),
    ));
  }
  lines.push(row(
    "Shipped",
    format!("{} ({})", b.operations.shipped_orders, pct(b.operations.shipped_rate)),
  ));
  lines.push(row("In process", b.operations.in_process_orders.to_string()));

  lines.push(Line::from(""));
  lines.push(heading("Problem orders"));
  if b.problems.is_empty() {
    lines.push(Line::from(Span::styled(
      "  none in the current selection",
      Style::default().fg(Color::Green),
    )));
    return lines;
  }
  for p in &b.problems.by_status {
    lines.push(row(
      &p.status.to_string(),
      format!(
        "{:>4} orders  {} of all orders  {} of revenue",
        p.orders,
        pct(p.order_rate),
        pct(p.revenue_rate),
      ),
    ));
  }
  lines.push(row("Total", pct(b.problems.total_order_rate())));
  for y in &b.problems.by_year {
    lines.push(row(&format!("{} {}", y.year, y.status), format!("{} orders", y.orders)));
  }
  lines
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use chrono::{Datelike, NaiveDate};
  use ventes_core::{
    config::AnalysisConfig,
    dashboard::{Interaction, Session},
    record::{OrderStatus, SaleRecord, TransactionSize},
    table::SalesTable,
  };

  use super::*;

  fn sale(n: u32, date: &str, city: &str, revenue: f64) -> SaleRecord {
    let order_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    SaleRecord {
      order_number: n,
      order_date,
      year: order_date.year(),
      month: order_date.month(),
      quarter: (order_date.month() - 1) / 3 + 1,
      country: "USA".into(),
      city: city.into(),
      customer: format!("Customer {n}"),
      product_code: "S10_1".into(),
      product_line: "Planes".into(),
      unit_price: revenue,
      suggested_price: revenue,
      quantity: 1,
      revenue,
      status: OrderStatus::Shipped,
      transaction_size: TransactionSize::Small,
    }
  }

  fn model() -> DashboardModel {
    let table = SalesTable::new(vec![
      sale(1, "2003-01-10", "NYC", 300.0),
      sale(2, "2003-11-10", "Boston", 1000.0),
    ]);
    let mut session = Session::new(Arc::new(table), AnalysisConfig::default());
    match session.handle_interaction(Interaction::Refresh) {
      RenderModel::Dashboard(model) => *model,
      RenderModel::NoResults { .. } => panic!("expected a dashboard"),
    }
  }

  fn text(lines: &[Line<'_>]) -> Vec<String> {
    lines
      .iter()
      .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
      .collect()
  }

  #[test]
  fn temporal_tab_shows_amplitude_as_multiplier() {
    let lines = text(&temporal(&model()));
    let amplitude = lines.iter().find(|l| l.contains("Amplitude")).unwrap();
    assert!(amplitude.ends_with("3.3x  high"), "{amplitude}");
    assert!(!amplitude.contains('%'));
    assert!(lines.iter().any(|l| l.contains("Strong seasonality")));
  }

  #[test]
  fn geography_tab_ranks_cities_worldwide() {
    let lines = text(&geography(&model()));
    assert!(lines.iter().any(|l| l.contains("#1 Boston (USA)")));
    assert!(lines.iter().any(|l| l.contains("#2 NYC (USA)")));
    assert!(lines.iter().any(|l| l.contains("Top 5 concentration")));
  }

  #[test]
  fn money_groups_thousands() {
    assert_eq!(money(0.0), "0");
    assert_eq!(money(999.4), "999");
    assert_eq!(money(1234567.8), "1,234,568");
    assert_eq!(money(-4500.0), "-4,500");
  }

  #[test]
  fn amplitude_is_a_multiplier() {
    assert_eq!(amplitude(2.8, false), "2.8x  moderate");
    assert_eq!(amplitude(1000.0 / 300.0, true), "3.3x  high");
    assert_eq!(amplitude(0.0, false), "0.0x  moderate");
  }

  #[test]
  fn growth_shows_sign_or_dash() {
    assert_eq!(growth(Some(12.34)), "+12.3%");
    assert_eq!(growth(Some(-5.0)), "-5.0%");
    assert_eq!(growth(None), "-");
    assert_eq!(pct(40.0), "40.0%");
  }
}
