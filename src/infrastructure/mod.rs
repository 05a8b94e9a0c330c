pub mod duckdb_storage;
pub mod filesystem;
pub mod hooks;
pub mod parser;
pub mod plugins;
pub mod repository;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

pub use duckdb_storage::*;
pub use filesystem::*;
pub use hooks::*;
pub use parser::*;
pub use plugins::*;
pub use repository::*;
pub use storage::*;
