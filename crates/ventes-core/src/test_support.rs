//! Record builders shared by the unit tests.

use chrono::{Datelike, NaiveDate};

use crate::record::{OrderStatus, SaleRecord, TransactionSize};

/// A shipped, small, single-unit line with a calendar consistent with `date`.
pub fn record(
  order_number: u32,
  date: &str,
  country: &str,
  product_line: &str,
  customer: &str,
  revenue: f64,
) -> SaleRecord {
  let order_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
  SaleRecord {
    order_number,
    order_date,
    year: order_date.year(),
    month: order_date.month(),
    quarter: (order_date.month() - 1) / 3 + 1,
    country: country.into(),
    city: format!("{country} City"),
    customer: customer.into(),
    product_code: format!("S10_{order_number}"),
    product_line: product_line.into(),
    unit_price: revenue,
    suggested_price: revenue,
    quantity: 1,
    revenue,
    status: OrderStatus::Shipped,
    transaction_size: TransactionSize::Small,
  }
}

/// [`record`] with a different status.
pub fn with_status(mut record: SaleRecord, status: OrderStatus) -> SaleRecord {
  record.status = status;
  record
}

/// [`record`] with a different transaction size.
pub fn with_size(mut record: SaleRecord, size: TransactionSize) -> SaleRecord {
  record.transaction_size = size;
  record
}
