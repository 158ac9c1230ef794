//! Decoding of one CSV row into a [`SaleRecord`].
//!
//! Numeric columns are typed by serde. Dates, statuses and transaction sizes
//! are read as text and converted here so a bad cell can be reported with
//! its line and column.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use ventes_core::record::{OrderStatus, SaleRecord, TransactionSize};

use crate::{Error, Result, columns};

/// Layouts the export has been seen with, tried in order.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M", "%m/%d/%Y %H:%M:%S"];

#[derive(Debug, Deserialize)]
pub struct RawRecord {
  #[serde(rename = "Numéro_Commande")]
  order_number:     u32,
  #[serde(rename = "Date_Commande")]
  order_date:       String,
  #[serde(rename = "Année")]
  year:             i32,
  #[serde(rename = "Mois")]
  month:            u32,
  #[serde(rename = "Trimestre_ID")]
  quarter:          u32,
  #[serde(rename = "Pays")]
  country:          String,
  #[serde(rename = "Ville")]
  city:             String,
  #[serde(rename = "Nom_du_Client")]
  customer:         String,
  #[serde(rename = "Code_Produit")]
  product_code:     String,
  #[serde(rename = "Gamme_de_Produits")]
  product_line:     String,
  #[serde(rename = "Prix_Unitaire")]
  unit_price:       f64,
  #[serde(rename = "Prix Conseil")]
  suggested_price:  f64,
  #[serde(rename = "Quantité_Commandée")]
  quantity:         u32,
  #[serde(rename = "Chiffre d'Affaires")]
  revenue:          f64,
  #[serde(rename = "Statut")]
  status:           String,
  #[serde(rename = "Taille de Transaction")]
  transaction_size: String,
}

impl RawRecord {
  /// Convert into a domain record. `line` is the 1-based line of the row in
  /// the file, for error reporting.
  pub fn into_record(self, line: u64) -> Result<SaleRecord> {
    let order_date = parse_date(&self.order_date).ok_or_else(|| Error::Malformed {
      line,
      column: columns::ORDER_DATE,
      value: self.order_date.clone(),
    })?;
    let status: OrderStatus = self.status.trim().parse().map_err(|_| Error::Malformed {
      line,
      column: columns::STATUS,
      value: self.status.clone(),
    })?;
    let transaction_size: TransactionSize =
      self.transaction_size.trim().parse().map_err(|_| Error::Malformed {
        line,
        column: columns::TRANSACTION_SIZE,
        value: self.transaction_size.clone(),
      })?;

    Ok(SaleRecord {
      order_number: self.order_number,
      order_date,
      year: self.year,
      month: self.month,
      quarter: self.quarter,
      country: self.country,
      city: self.city,
      customer: self.customer,
      product_code: self.product_code,
      product_line: self.product_line,
      unit_price: self.unit_price,
      suggested_price: self.suggested_price,
      quantity: self.quantity,
      revenue: self.revenue,
      status,
      transaction_size,
    })
  }
}

/// Parse an order date, keeping only the calendar day when a time of day is
/// present.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
  let value = value.trim();
  DATE_FORMATS
    .iter()
    .find_map(|f| NaiveDate::parse_from_str(value, f).ok())
    .or_else(|| {
      DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        .map(|dt| dt.date())
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_every_known_date_layout() {
    let expected = NaiveDate::from_ymd_opt(2003, 2, 24).unwrap();
    for value in [
      "2003-02-24",
      "2003-02-24 00:00:00",
      "2/24/2003 0:00",
      "02/24/2003",
      " 2003-02-24 ",
    ] {
      assert_eq!(parse_date(value), Some(expected), "{value}");
    }
  }

  #[test]
  fn rejects_garbage_dates() {
    assert_eq!(parse_date("yesterday"), None);
    assert_eq!(parse_date("2003-13-01"), None);
    assert_eq!(parse_date(""), None);
  }
}
