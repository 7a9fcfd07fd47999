pub mod advisory_repo;
pub mod config_node_repo;
pub mod vendor_repo;
