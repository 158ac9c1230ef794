//! Core of the sales dashboard: the typed table, filter state, pending
//! actions, the aggregation library and the pipeline that ties them
//! together.
//!
//! This crate does no I/O. Loading the table is the job of
//! `ventes-store-csv`; presenting the render model is the job of the binary.

pub mod action;
pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod record;
pub mod table;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
