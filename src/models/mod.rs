pub mod advisory;
pub mod nvd;
pub mod vendor;
