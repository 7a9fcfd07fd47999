//! Serde model of the NVD JSON 1.0 / 1.1 data feeds.
//!
//! Only the fields the importer maps are modelled. List fields default to
//! empty when the feed omits them; objects stay optional so that "absent"
//! can be told apart where the import rules care about it.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CveData {
	#[serde(rename = "CVE_Items")]
	pub cve_items: Option<Vec<CveItem>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CveItem {
	pub cve: Cve,
	pub published_date: Option<String>,
	pub last_modified_date: Option<String>,
	pub impact: Option<Impact>,
	pub configurations: Option<Configurations>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cve {
	#[serde(rename = "CVE_data_meta")]
	pub data_meta: Option<CveDataMeta>,
	#[serde(rename = "problemtype")]
	pub problem_type: Option<ProblemType>,
	pub affects: Option<Affects>,
	pub description: Option<Description>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CveDataMeta {
	#[serde(rename = "ID")]
	pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProblemType {
	#[serde(rename = "problemtype_data")]
	pub data: Option<Vec<ProblemTypeData>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProblemTypeData {
	#[serde(default)]
	pub description: Vec<ProblemTypeDescription>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProblemTypeDescription {
	pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Affects {
	pub vendor: Option<VendorList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorList {
	#[serde(rename = "vendor_data", default)]
	pub data: Vec<VendorData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorData {
	pub vendor_name: String,
	#[serde(default)]
	pub product: ProductList,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductList {
	#[serde(rename = "product_data", default)]
	pub data: Vec<ProductData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductData {
	pub product_name: String,
	#[serde(default)]
	pub version: VersionList,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionList {
	#[serde(rename = "version_data", default)]
	pub data: Vec<VersionData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionData {
	pub version_value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Description {
	#[serde(rename = "description_data")]
	pub data: Option<Vec<DescriptionData>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DescriptionData {
	pub lang: String,
	pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Impact {
	pub base_metric_v2: Option<BaseMetricV2>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseMetricV2 {
	pub severity: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Configurations {
	pub nodes: Option<Vec<Node>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Node {
	pub operator: Option<String>,
	/// 1.0 feeds call this `cpe`, 1.1 feeds `cpe_match`.
	#[serde(alias = "cpe_match")]
	pub cpe: Option<Vec<NodeCpe>>,
	pub children: Option<Vec<Node>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCpe {
	#[serde(default)]
	pub vulnerable: bool,
	pub cpe22_uri: Option<String>,
	pub cpe23_uri: Option<String>,
}
