//! Imports NVD JSON feeds into SQLite as advisories, vendors, products and
//! configuration trees, and exposes read access to the imported rows.

pub mod config;
pub mod db;
pub mod importer;
pub mod models;
pub mod repositories;
pub mod utils;
