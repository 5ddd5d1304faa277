//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::case::{CamelCaseKeys, normalize_keys, to_camel_case};
pub use crate::error::SqlitePluginError;
pub use crate::facade::SqliteClient;
pub use crate::registry::{DEFAULT_CLIENT, SINGLETON_NAME, SqliteRegistry};
pub use crate::results::{ResultSet, Row, RunOutcome, Selection};
pub use crate::sqlite::config::{
    ClientConfig, ConnectionOptions, Environment, PluginConfig, SqliteOptions,
    SqliteOptionsBuilder,
};
pub use crate::types::RowValues;
