//! Product line and product-level performance.

use serde::Serialize;

use super::{
  group::sort_by_revenue_desc, kpi::revenue_total, percent, ranking::rank_by_revenue, ratio,
  summarize_by,
};
use crate::table::Subset;

// ─── Lines ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePerformance {
  pub product_line:        String,
  pub revenue:             f64,
  pub quantity:            u64,
  pub orders:              usize,
  pub lines:               usize,
  pub average_order_value: f64,
  pub share:               f64,
  pub quantity_per_line:   f64,
}

/// Every product line, highest revenue first.
pub fn line_performance(subset: &Subset<'_>) -> Vec<LinePerformance> {
  let total = revenue_total(subset);
  rank_by_revenue(subset, |r| r.product_line.as_str())
    .into_iter()
    .map(|g| LinePerformance {
      product_line:        g.key.to_owned(),
      revenue:             g.revenue,
      quantity:            g.quantity,
      orders:              g.orders,
      lines:               g.lines,
      average_order_value: ratio(g.revenue, g.orders as f64),
      share:               percent(g.revenue, total),
      quantity_per_line:   ratio(g.quantity as f64, g.lines as f64),
    })
    .collect()
}

/// Combined revenue share of the three leading product lines.
pub fn top3_concentration(lines: &[LinePerformance]) -> f64 {
  lines.iter().take(3).map(|l| l.share).sum()
}

// ─── Products ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSales {
  pub product_code: String,
  pub product_line: String,
  pub quantity:     u64,
  pub revenue:      f64,
}

fn product_sales(subset: &Subset<'_>) -> Vec<ProductSales> {
  summarize_by(subset, |r| r.product_code.as_str())
    .into_iter()
    .map(|g| ProductSales {
      product_code: g.key.to_owned(),
      product_line: g.first.product_line.clone(),
      quantity:     g.quantity,
      revenue:      g.revenue,
    })
    .collect()
}

/// The `n` best-selling products by units.
pub fn top_products_by_quantity(subset: &Subset<'_>, n: usize) -> Vec<ProductSales> {
  let mut products = product_sales(subset);
  products.sort_by(|a, b| b.quantity.cmp(&a.quantity));
  products.truncate(n);
  products
}

/// The `n` products with the highest revenue.
pub fn top_products_by_revenue(subset: &Subset<'_>, n: usize) -> Vec<ProductSales> {
  let mut products = product_sales(subset);
  sort_by_revenue_desc(&mut products, |p| p.revenue);
  products.truncate(n);
  products
}

// ─── Prices ──────────────────────────────────────────────────────────────────

/// Unit price statistics of one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceVariability {
  pub product_code:    String,
  pub product_line:    String,
  pub mean:            f64,
  /// Sample standard deviation; `0.0` with fewer than two sales.
  pub std_dev:         f64,
  pub min:             f64,
  pub max:             f64,
  pub count:           usize,
  pub suggested_price: f64,
}

/// Price statistics per `(product code, line)`, the `n` most variable first.
pub fn price_variability(subset: &Subset<'_>, n: usize) -> Vec<PriceVariability> {
  let groups = summarize_by(subset, |r| (r.product_code.as_str(), r.product_line.as_str()));

  let mut stats: Vec<PriceVariability> = groups
    .into_iter()
    .map(|g| {
      let (code, line) = g.key;
      let prices: Vec<f64> = subset
        .iter()
        .filter(|r| r.product_code == code && r.product_line == line)
        .map(|r| r.unit_price)
        .collect();
      let count = prices.len();
      let mean = ratio(prices.iter().sum(), count as f64);
      let std_dev = if count < 2 {
        0.0
      } else {
        let squares: f64 = prices.iter().map(|p| (p - mean).powi(2)).sum();
        (squares / (count - 1) as f64).sqrt()
      };
      PriceVariability {
        product_code: code.to_owned(),
        product_line: line.to_owned(),
        mean,
        std_dev,
        min: prices.iter().copied().fold(f64::INFINITY, f64::min),
        max: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        count,
        suggested_price: g.first.suggested_price,
      }
    })
    .collect();

  stats.sort_by(|a, b| b.std_dev.total_cmp(&a.std_dev));
  stats.truncate(n);
  stats
}

// ─── Product × market ────────────────────────────────────────────────────────

/// Revenue of the leading product lines (rows) in the leading countries
/// (columns).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductMarketMatrix {
  pub product_lines: Vec<String>,
  pub countries:     Vec<String>,
  /// `cells[line][country]`.
  pub cells:         Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combination {
  pub product_line: String,
  pub country:      String,
  pub revenue:      f64,
}

impl ProductMarketMatrix {
  pub fn cell(&self, line: &str, country: &str) -> Option<f64> {
    let row = self.product_lines.iter().position(|l| l == line)?;
    let col = self.countries.iter().position(|c| c == country)?;
    Some(self.cells[row][col])
  }

  /// The `n` cells with revenue, highest first. Equal cells keep row-major
  /// order.
  pub fn top_combinations(&self, n: usize) -> Vec<Combination> {
    let mut combos: Vec<Combination> = self
      .product_lines
      .iter()
      .zip(&self.cells)
      .flat_map(|(line, row)| {
        self.countries.iter().zip(row).map(move |(country, &revenue)| Combination {
          product_line: line.clone(),
          country: country.clone(),
          revenue,
        })
      })
      .filter(|c| c.revenue > 0.0)
      .collect();
    sort_by_revenue_desc(&mut combos, |c| c.revenue);
    combos.truncate(n);
    combos
  }
}

/// The `side` leading product lines crossed with the `side` leading
/// countries.
pub fn product_market_matrix(subset: &Subset<'_>, side: usize) -> ProductMarketMatrix {
  let lines: Vec<String> = rank_by_revenue(subset, |r| r.product_line.as_str())
    .into_iter()
    .take(side)
    .map(|g| g.key.to_owned())
    .collect();
  let countries: Vec<String> = rank_by_revenue(subset, |r| r.country.as_str())
    .into_iter()
    .take(side)
    .map(|g| g.key.to_owned())
    .collect();

  let cells = lines
    .iter()
    .map(|line| {
      countries
        .iter()
        .map(|country| {
          subset
            .iter()
            .filter(|r| &r.product_line == line && &r.country == country)
            .map(|r| r.revenue)
            .sum()
        })
        .collect()
    })
    .collect();

  ProductMarketMatrix {
    product_lines: lines,
    countries,
    cells,
  }
}
