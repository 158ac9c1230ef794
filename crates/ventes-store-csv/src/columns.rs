//! Header names of the cleaned sales export.

pub const ORDER_NUMBER: &str = "Numéro_Commande";
pub const ORDER_DATE: &str = "Date_Commande";
pub const YEAR: &str = "Année";
pub const MONTH: &str = "Mois";
pub const QUARTER: &str = "Trimestre_ID";
pub const COUNTRY: &str = "Pays";
pub const CITY: &str = "Ville";
pub const CUSTOMER: &str = "Nom_du_Client";
pub const PRODUCT_CODE: &str = "Code_Produit";
pub const PRODUCT_LINE: &str = "Gamme_de_Produits";
pub const UNIT_PRICE: &str = "Prix_Unitaire";
pub const SUGGESTED_PRICE: &str = "Prix Conseil";
pub const QUANTITY: &str = "Quantité_Commandée";
pub const REVENUE: &str = "Chiffre d'Affaires";
pub const STATUS: &str = "Statut";
pub const TRANSACTION_SIZE: &str = "Taille de Transaction";

/// Every column the loader needs. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 16] = [
  ORDER_NUMBER,
  ORDER_DATE,
  YEAR,
  MONTH,
  QUARTER,
  COUNTRY,
  CITY,
  CUSTOMER,
  PRODUCT_CODE,
  PRODUCT_LINE,
  UNIT_PRICE,
  SUGGESTED_PRICE,
  QUANTITY,
  REVENUE,
  STATUS,
  TRANSACTION_SIZE,
];

/// Conventional locations of the data file, tried in order.
pub const DATA_PATHS: [&str; 2] = ["data/sales_data_cleaned.csv", "sales_data_cleaned.csv"];
