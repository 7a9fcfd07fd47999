use crate::models::advisory::{ConfigNode, ConfigNodeCpe};
use crate::models::nvd::{Node, NodeCpe};
use crate::repositories::config_node_repo;
use rusqlite::Connection;

/// Stores the applicability tree of one advisory and returns the number of
/// configuration nodes written.
///
/// Only two levels are kept: top-level nodes and their direct children.
/// Nodes without an operator are skipped along with everything below them.
/// Child rows are stored with the operator of their top-level node, not
/// their own.
pub fn save_configurations(conn: &Connection, advisory_id: i64, nodes: &[Node]) -> rusqlite::Result<usize> {
	let mut saved = 0;

	for node in nodes {
		let Some(operator) = node.operator.as_deref() else { continue };

		let root = config_node_repo::insert_config_node(
			conn,
			&ConfigNode::new(advisory_id, operator.to_string(), None),
		)?;
		saved += 1;
		let Some(root_id) = root.id else { continue };
		save_cpes(conn, root_id, node.cpe.as_deref())?;

		for child in node.children.iter().flatten() {
			if child.operator.is_none() {
				continue;
			}

			let child_node = config_node_repo::insert_config_node(
				conn,
				&ConfigNode::new(advisory_id, operator.to_string(), Some(root_id)),
			)?;
			saved += 1;
			if let Some(child_id) = child_node.id {
				save_cpes(conn, child_id, child.cpe.as_deref())?;
			}
			// child.children is not stored
		}
	}

	conn.cache_flush()?;
	Ok(saved)
}

fn save_cpes(conn: &Connection, config_node_id: i64, cpes: Option<&[NodeCpe]>) -> rusqlite::Result<()> {
	for cpe in cpes.unwrap_or_default() {
		config_node_repo::insert_config_node_cpe(conn, &ConfigNodeCpe {
			id: None,
			config_node_id,
			cpe22_uri: cpe.cpe22_uri.clone(),
			cpe23_uri: cpe.cpe23_uri.clone(),
			vulnerable: cpe.vulnerable,
		})?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::db::schema;
	use crate::models::advisory::Advisory;
	use crate::repositories::advisory_repo::insert_advisory;

	fn setup() -> anyhow::Result<(Connection, i64)> {
		let conn = Connection::open_in_memory()?;
		conn.execute_batch("PRAGMA foreign_keys = ON;")?;
		schema::create_tables(&conn)?;
		let advisory = insert_advisory(&conn, &Advisory::new("CVE-2019-0001".to_string()))?;
		Ok((conn, advisory.id.unwrap()))
	}

	fn cpe(uri: &str, vulnerable: bool) -> NodeCpe {
		NodeCpe {
			vulnerable,
			cpe22_uri: Some(uri.to_string()),
			cpe23_uri: None,
		}
	}

	fn node(operator: Option<&str>, cpes: Vec<NodeCpe>, children: Option<Vec<Node>>) -> Node {
		Node {
			operator: operator.map(str::to_string),
			cpe: Some(cpes),
			children,
		}
	}

	fn stored_nodes(conn: &Connection) -> Vec<(i64, String, Option<i64>)> {
		let mut stmt = conn
			.prepare("SELECT id, operator, parent_id FROM config_node ORDER BY id")
			.unwrap();
		stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
			.unwrap()
			.collect::<rusqlite::Result<Vec<_>>>()
			.unwrap()
	}

	fn stored_cpes(conn: &Connection) -> Vec<(i64, String, bool)> {
		let mut stmt = conn
			.prepare("SELECT config_node_id, cpe22_uri, vulnerable FROM config_node_cpe ORDER BY id")
			.unwrap();
		stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
			.unwrap()
			.collect::<rusqlite::Result<Vec<_>>>()
			.unwrap()
	}

	#[test]
	fn test_child_copies_parent_operator() -> anyhow::Result<()> {
		let (conn, advisory_id) = setup()?;
		let nodes = vec![node(
			Some("OR"),
			vec![cpe("u1", true)],
			Some(vec![node(Some("AND"), vec![cpe("u2", false)], None)]),
		)];

		assert_eq!(save_configurations(&conn, advisory_id, &nodes)?, 2);

		let stored = stored_nodes(&conn);
		assert_eq!(stored.len(), 2);
		let (root_id, root_op, root_parent) = stored[0].clone();
		assert_eq!(root_op, "OR");
		assert_eq!(root_parent, None);
		let (child_id, child_op, child_parent) = stored[1].clone();
		assert_eq!(child_op, "OR");
		assert_eq!(child_parent, Some(root_id));

		assert_eq!(
			stored_cpes(&conn),
			vec![(root_id, "u1".to_string(), true), (child_id, "u2".to_string(), false)]
		);
		Ok(())
	}

	#[test]
	fn test_node_without_operator_is_skipped() -> anyhow::Result<()> {
		let (conn, advisory_id) = setup()?;
		let nodes = vec![node(
			None,
			vec![cpe("u1", true)],
			Some(vec![node(Some("AND"), vec![cpe("u2", true)], None)]),
		)];

		assert_eq!(save_configurations(&conn, advisory_id, &nodes)?, 0);
		assert!(stored_nodes(&conn).is_empty());
		assert!(stored_cpes(&conn).is_empty());
		Ok(())
	}

	#[test]
	fn test_child_without_operator_is_skipped() -> anyhow::Result<()> {
		let (conn, advisory_id) = setup()?;
		let nodes = vec![node(
			Some("AND"),
			vec![],
			Some(vec![
				node(None, vec![cpe("skipped", true)], None),
				node(Some("OR"), vec![cpe("kept", true)], None),
			]),
		)];

		assert_eq!(save_configurations(&conn, advisory_id, &nodes)?, 2);
		let cpes = stored_cpes(&conn);
		assert_eq!(cpes.len(), 1);
		assert_eq!(cpes[0].1, "kept");
		Ok(())
	}

	#[test]
	fn test_third_level_is_dropped() -> anyhow::Result<()> {
		let (conn, advisory_id) = setup()?;
		let grandchild = node(Some("OR"), vec![cpe("u3", true)], None);
		let child = node(Some("AND"), vec![cpe("u2", true)], Some(vec![grandchild]));
		let nodes = vec![node(Some("OR"), vec![cpe("u1", true)], Some(vec![child]))];

		save_configurations(&conn, advisory_id, &nodes)?;

		let stored = stored_nodes(&conn);
		assert_eq!(stored.len(), 2);
		assert!(stored.iter().all(|(_, _, parent)| parent.is_none() || *parent == Some(stored[0].0)));
		assert_eq!(stored_cpes(&conn).len(), 2);
		Ok(())
	}

	#[test]
	fn test_missing_cpe_and_children_lists() -> anyhow::Result<()> {
		let (conn, advisory_id) = setup()?;
		let nodes = vec![Node {
			operator: Some("OR".to_string()),
			cpe: None,
			children: None,
		}];

		assert_eq!(save_configurations(&conn, advisory_id, &nodes)?, 1);
		assert!(stored_cpes(&conn).is_empty());
		Ok(())
	}
}
