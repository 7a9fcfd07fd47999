// src/models/advisory.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use crate::models::vendor::Product;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisory {
	pub id: Option<i64>,
	pub cve_id: String,
	/// Comma-terminated list of weakness descriptions, e.g. `"CWE-79,CWE-89,"`.
	pub problem_type: String,
	pub published_date: Option<DateTime<Utc>>,
	pub last_modified_date: Option<DateTime<Utc>>,
	pub description: Option<String>,
	pub severity: Option<String>,
	pub products: HashSet<Product>,
}

/// One node of an applicability tree. Root nodes have no parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigNode {
	pub id: Option<i64>,
	pub advisory_id: i64,
	pub operator: String,
	pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigNodeCpe {
	pub id: Option<i64>,
	pub config_node_id: i64,
	pub cpe22_uri: Option<String>,
	pub cpe23_uri: Option<String>,
	pub vulnerable: bool,
}

impl Advisory {
	pub fn new(cve_id: String) -> Self {
		Self {
			id: None,
			cve_id,
			problem_type: String::new(),
			published_date: None,
			last_modified_date: None,
			description: None,
			severity: None,
			products: HashSet::new(),
		}
	}
}

impl ConfigNode {
	pub fn new(advisory_id: i64, operator: String, parent_id: Option<i64>) -> Self {
		Self {
			id: None,
			advisory_id,
			operator,
			parent_id,
		}
	}
}
