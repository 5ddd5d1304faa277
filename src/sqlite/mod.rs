// SQLite module - everything that talks to the rusqlite binding
//
// - config: Client options, environment, and plugin config documents
// - connection: Opening the single connection a client owns
// - query: Result extraction and building
// - executor: Single statement execution with timing and error tagging
// - transaction: BEGIN/COMMIT batches with rollback on failure

pub mod config;
pub mod connection;
pub mod executor;
pub mod query;
pub mod transaction;

pub use config::{Environment, SqliteOptions, SqliteOptionsBuilder};
pub use connection::open_connection;
pub use executor::{ExecMode, Executed, execute, execute_run, execute_select};
pub use query::build_result_set;
pub use transaction::run_transaction;
