pub mod feed;
pub mod logger;
