//! Tests for the CSV loader, locator and cache, against in-memory text and
//! temporary files.

use std::{fs, io::Cursor, sync::Arc, time::Duration};

use ventes_core::record::{OrderStatus, TransactionSize};

use crate::{Error, TableCache, load_from_reader, load_path, locate};

const HEADER: &str = "Numéro_Commande,Date_Commande,Année,Mois,Trimestre_ID,Pays,Ville,\
Nom_du_Client,Code_Produit,Gamme_de_Produits,Prix_Unitaire,Prix Conseil,\
Quantité_Commandée,Chiffre d'Affaires,Statut,Taille de Transaction";

fn csv(rows: &[&str]) -> String {
  let mut text = String::from(HEADER);
  for row in rows {
    text.push('\n');
    text.push_str(row);
  }
  text.push('\n');
  text
}

const ROW_1: &str = "10107,2003-02-24,2003,2,1,USA,NYC,Land of Toys Inc.,S10_1678,\
Motorcycles,95.7,95,30,2871,Shipped,Small";
const ROW_2: &str = "10121,2003-05-07 00:00:00,2003,5,2,France,Reims,Reims Collectables,\
S10_1678,Motorcycles,86.13,95,34,2765.9,In Process,Medium";
const ROW_3: &str = "10134,7/1/2003 0:00,2003,7,3,France,Paris,Lyon Souveniers,S10_1949,\
Classic Cars,100,214,41,3884.34,On Hold,Large";

// ─── Decoding ────────────────────────────────────────────────────────────────

#[test]
fn loads_rows_in_file_order() {
  let text = csv(&[ROW_1, ROW_2, ROW_3]);
  let table = load_from_reader(Cursor::new(text)).unwrap();

  assert_eq!(table.len(), 3);
  let records = table.records();
  assert_eq!(records[0].order_number, 10107);
  assert_eq!(records[0].customer, "Land of Toys Inc.");
  assert_eq!(records[0].revenue, 2871.0);
  assert_eq!(records[1].status, OrderStatus::InProcess);
  assert_eq!(records[1].transaction_size, TransactionSize::Medium);
  assert_eq!(records[2].status, OrderStatus::OnHold);
  assert_eq!(records[2].suggested_price, 214.0);
  assert!(records.iter().all(|r| r.calendar_is_consistent()));
  assert_eq!(table.countries(), vec!["France", "USA"]);
}

#[test]
fn calendar_mismatch_still_loads() {
  let skewed = ROW_2.replace(",2003,5,2,", ",2003,5,3,");
  let table = load_from_reader(Cursor::new(csv(&[ROW_1, &skewed]))).unwrap();

  assert_eq!(table.len(), 2);
  assert!(table.records()[0].calendar_is_consistent());
  assert!(!table.records()[1].calendar_is_consistent());
  assert_eq!(table.records()[1].quarter, 3);
}

#[test]
fn header_only_file_is_an_empty_table() {
  let table = load_from_reader(Cursor::new(csv(&[]))).unwrap();
  assert!(table.is_empty());
}

#[test]
fn byte_order_mark_is_ignored() {
  let text = format!("\u{FEFF}{}", csv(&[ROW_1]));
  let table = load_from_reader(Cursor::new(text)).unwrap();
  assert_eq!(table.len(), 1);
}

#[test]
fn extra_columns_are_ignored() {
  let text = format!("{HEADER},Notes\n{ROW_1},hello\n");
  let table = load_from_reader(Cursor::new(text)).unwrap();
  assert_eq!(table.records()[0].city, "NYC");
}

#[test]
fn missing_column_is_reported_by_name() {
  let text = HEADER.replace(",Statut", "") + "\n";
  let err = load_from_reader(Cursor::new(text)).unwrap_err();
  assert!(matches!(err, Error::MissingColumn("Statut")), "{err}");
}

#[test]
fn bad_date_is_reported_with_line_and_column() {
  let row = ROW_2.replace("2003-05-07 00:00:00", "someday");
  let err = load_from_reader(Cursor::new(csv(&[ROW_1, &row]))).unwrap_err();
  match err {
    Error::Malformed {
      line,
      column,
      value,
    } => {
      assert_eq!(line, 3);
      assert_eq!(column, "Date_Commande");
      assert_eq!(value, "someday");
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn unknown_status_is_malformed() {
  let row = ROW_1.replace("Shipped", "Lost");
  let err = load_from_reader(Cursor::new(csv(&[&row]))).unwrap_err();
  assert!(matches!(err, Error::Malformed { column: "Statut", .. }), "{err}");
}

#[test]
fn non_numeric_quantity_is_a_csv_error() {
  let row = ROW_1.replace(",30,", ",lots,");
  let err = load_from_reader(Cursor::new(csv(&[&row]))).unwrap_err();
  assert!(matches!(err, Error::Csv(_)), "{err}");
}

// ─── Locating ────────────────────────────────────────────────────────────────

#[test]
fn locate_prefers_the_data_directory() {
  let dir = tempfile::tempdir().unwrap();
  fs::create_dir(dir.path().join("data")).unwrap();
  fs::write(dir.path().join("data/sales_data_cleaned.csv"), csv(&[ROW_1])).unwrap();
  fs::write(dir.path().join("sales_data_cleaned.csv"), csv(&[ROW_1])).unwrap();

  let found = locate(None, dir.path()).unwrap();
  assert_eq!(found, dir.path().join("data/sales_data_cleaned.csv"));
}

#[test]
fn locate_falls_back_to_the_working_directory() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("sales_data_cleaned.csv"), csv(&[ROW_1])).unwrap();
  let found = locate(None, dir.path()).unwrap();
  assert_eq!(found, dir.path().join("sales_data_cleaned.csv"));
}

#[test]
fn locate_reports_every_searched_path() {
  let dir = tempfile::tempdir().unwrap();
  match locate(None, dir.path()).unwrap_err() {
    Error::NotFound { searched } => assert_eq!(searched.len(), 2),
    other => panic!("unexpected error: {other}"),
  }

  let explicit = dir.path().join("nope.csv");
  assert!(matches!(
    locate(Some(explicit.as_path()), dir.path()),
    Err(Error::NotFound { .. })
  ));
}

#[test]
fn load_path_of_missing_file_is_io_error() {
  let dir = tempfile::tempdir().unwrap();
  let err = load_path(&dir.path().join("missing.csv")).unwrap_err();
  assert!(matches!(err, Error::Io { .. }), "{err}");
}

// ─── Cache ───────────────────────────────────────────────────────────────────

#[test]
fn fresh_cache_serves_the_same_table() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("sales.csv");
  fs::write(&path, csv(&[ROW_1])).unwrap();

  let mut cache = TableCache::open(&path, Duration::from_secs(3600)).unwrap();
  let first = cache.get().unwrap();
  fs::write(&path, csv(&[ROW_1, ROW_2])).unwrap();
  let second = cache.get().unwrap();

  assert!(Arc::ptr_eq(&first, &second));
  assert_eq!(second.len(), 1);
  assert!(!cache.refresh_if_stale().unwrap());
}

#[test]
fn stale_cache_reloads_the_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("sales.csv");
  fs::write(&path, csv(&[ROW_1])).unwrap();

  let mut cache = TableCache::open(&path, Duration::ZERO).unwrap();
  fs::write(&path, csv(&[ROW_1, ROW_2, ROW_3])).unwrap();
  assert!(cache.is_stale());
  assert_eq!(cache.get().unwrap().len(), 3);
}

#[test]
fn failed_reload_keeps_the_previous_table() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("sales.csv");
  fs::write(&path, csv(&[ROW_1])).unwrap();

  let mut cache = TableCache::open(&path, Duration::ZERO).unwrap();
  fs::write(&path, "garbage\n").unwrap();
  assert!(cache.get().is_err());
  assert_eq!(cache.table().len(), 1);
}
