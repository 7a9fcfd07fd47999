use crate::models::nvd::Cve;
use crate::models::vendor::Product;
use crate::repositories::vendor_repo;
use log::info;
use rusqlite::Connection;
use std::collections::HashSet;

/// Resolves every affected vendor/product/version of `cve` to a stored
/// product, creating vendors and products that are not known yet.
pub fn resolve_products(conn: &Connection, cve: &Cve) -> rusqlite::Result<HashSet<Product>> {
	let mut products = HashSet::new();

	let Some(vendors) = cve.affects.as_ref().and_then(|a| a.vendor.as_ref()) else {
		return Ok(products);
	};

	info!("Vendor count: {}", vendors.data.len());

	for vendor_data in &vendors.data {
		let vendor = vendor_repo::find_or_create_vendor(conn, &vendor_data.vendor_name)?;
		let Some(vendor_id) = vendor.id else { continue };

		info!("Product count {}", vendor_data.product.data.len());
		for product_data in &vendor_data.product.data {
			for version_data in &product_data.version.data {
				products.insert(vendor_repo::find_or_create_product(
					conn,
					&product_data.product_name,
					&version_data.version_value,
					vendor_id,
				)?);
			}
		}
	}

	Ok(products)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::db::schema;
	use crate::models::nvd::{Affects, VendorData, VendorList, ProductData, ProductList, VersionData, VersionList};

	fn vendor(name: &str, products: Vec<(&str, Vec<&str>)>) -> VendorData {
		VendorData {
			vendor_name: name.to_string(),
			product: ProductList {
				data: products
					.into_iter()
					.map(|(product, versions)| ProductData {
						product_name: product.to_string(),
						version: VersionList {
							data: versions
								.into_iter()
								.map(|v| VersionData { version_value: v.to_string() })
								.collect(),
						},
					})
					.collect(),
			},
		}
	}

	fn cve_with(vendors: Vec<VendorData>) -> Cve {
		Cve {
			affects: Some(Affects { vendor: Some(VendorList { data: vendors }) }),
			..Cve::default()
		}
	}

	#[test]
	fn test_no_affects_gives_empty_set() -> anyhow::Result<()> {
		let conn = Connection::open_in_memory()?;
		schema::create_tables(&conn)?;

		assert!(resolve_products(&conn, &Cve::default())?.is_empty());

		let no_vendor = Cve {
			affects: Some(Affects { vendor: None }),
			..Cve::default()
		};
		assert!(resolve_products(&conn, &no_vendor)?.is_empty());
		Ok(())
	}

	#[test]
	fn test_repeated_versions_collapse() -> anyhow::Result<()> {
		let conn = Connection::open_in_memory()?;
		schema::create_tables(&conn)?;

		let cve = cve_with(vec![
			vendor("gnu", vec![("glibc", vec!["2.26", "2.26", "2.25"])]),
			vendor("gnu", vec![("glibc", vec!["2.25"])]),
		]);

		let products = resolve_products(&conn, &cve)?;
		assert_eq!(products.len(), 2);

		let vendors: i64 = conn.query_row("SELECT COUNT(*) FROM vendor", [], |row| row.get(0))?;
		let rows: i64 = conn.query_row("SELECT COUNT(*) FROM product", [], |row| row.get(0))?;
		assert_eq!(vendors, 1);
		assert_eq!(rows, 2);
		Ok(())
	}
}
