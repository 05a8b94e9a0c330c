pub mod duckdb_sync;
pub mod simple_logger;

pub use duckdb_sync::*;
pub use simple_logger::*;
