// src/models/vendor.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vendor {
	pub id: Option<i64>,
	pub name: String,
}

/// A product is identified by its (name, version, vendor) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
	pub id: Option<i64>,
	pub name: String,
	pub version: String,
	pub vendor_id: i64,
}

impl Product {
	pub fn new(name: String, version: String, vendor_id: i64) -> Self {
		Self {
			id: None,
			name,
			version,
			vendor_id,
		}
	}
}
