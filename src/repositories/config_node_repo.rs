// src/repositories/config_node_repo.rs

use crate::models::advisory::{ConfigNode, ConfigNodeCpe};
use rusqlite::{params, Connection};

pub fn insert_config_node(conn: &Connection, node: &ConfigNode) -> rusqlite::Result<ConfigNode> {
	conn.execute(
		"INSERT INTO config_node (advisory_id, operator, parent_id) VALUES (?1, ?2, ?3)",
		params![node.advisory_id, node.operator, node.parent_id],
	)?;
	Ok(ConfigNode {
		id: Some(conn.last_insert_rowid()),
		..node.clone()
	})
}

pub fn insert_config_node_cpe(conn: &Connection, cpe: &ConfigNodeCpe) -> rusqlite::Result<ConfigNodeCpe> {
	conn.execute(
		"INSERT INTO config_node_cpe (config_node_id, cpe22_uri, cpe23_uri, vulnerable)
		 VALUES (?1, ?2, ?3, ?4)",
		params![cpe.config_node_id, cpe.cpe22_uri, cpe.cpe23_uri, cpe.vulnerable],
	)?;
	Ok(ConfigNodeCpe {
		id: Some(conn.last_insert_rowid()),
		..cpe.clone()
	})
}
