//! A SQLite connection exposed as a named singleton service.
//!
//! Callers hand in literal SQL strings and get back rows, scalar counts, or
//! inserted row ids. Result keys can optionally be rewritten from snake_case
//! to camelCase before they reach the caller.
//!
//! ```rust,no_run
//! use sqlite_plugin::prelude::*;
//!
//! # fn main() -> Result<(), SqlitePluginError> {
//! let db = SqliteOptionsBuilder::new(":memory:".to_string())
//!     .camel_case(true)
//!     .open()?;
//! db.run("CREATE TABLE users (user_id INTEGER PRIMARY KEY, user_name TEXT)")?;
//! let id = db.insert("INSERT INTO users (user_name) VALUES ('alice')")?;
//! let row = db.select(&format!("SELECT * FROM users WHERE user_id = {id}"))?;
//! assert_eq!(row.to_json()["userName"], "alice");
//! # Ok(())
//! # }
//! ```

pub mod case;
pub mod error;
pub mod facade;
pub mod prelude;
pub mod registry;
pub mod results;
pub mod sqlite;
pub mod types;

pub use case::{CamelCaseKeys, normalize_keys, to_camel_case};
pub use error::SqlitePluginError;
pub use facade::SqliteClient;
pub use registry::{DEFAULT_CLIENT, SINGLETON_NAME, SqliteRegistry};
pub use results::{ResultSet, Row, RunOutcome, Selection};
pub use sqlite::config::{Environment, SqliteOptions, SqliteOptionsBuilder};
pub use types::RowValues;
