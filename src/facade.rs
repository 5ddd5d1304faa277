use std::fmt;

use rusqlite::Connection;

use crate::case::CamelCaseKeys;
use crate::error::SqlitePluginError;
use crate::results::{ResultSet, RunOutcome, Selection};
use crate::sqlite::config::{Environment, SqliteOptions};
use crate::sqlite::{execute_run, execute_select, open_connection, run_transaction};

/// A client that owns one SQLite connection for its whole lifetime.
///
/// Every call is synchronous and runs on that single connection. Whether
/// read results get camelCase keys, and whether statements are timed, is
/// fixed when the client is built.
pub struct SqliteClient {
    conn: Connection,
    camel_case: bool,
    environment: Environment,
}

impl SqliteClient {
    /// Open the database described by `opts`.
    ///
    /// # Errors
    /// Returns `SqlitePluginError::ConnectionError` if the path or options are invalid.
    pub fn open(opts: SqliteOptions) -> Result<Self, SqlitePluginError> {
        let conn = open_connection(&opts)?;
        Ok(Self::from_connection(conn, opts.camel_case, opts.environment))
    }

    /// Wrap an already open connection.
    #[must_use]
    pub fn from_connection(conn: Connection, camel_case: bool, environment: Environment) -> Self {
        Self {
            conn,
            camel_case,
            environment,
        }
    }

    /// The underlying connection, for anything the helpers do not cover.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    #[must_use]
    pub fn camel_case(&self) -> bool {
        self.camel_case
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    fn timing(&self) -> bool {
        !self.environment.is_production()
    }

    /// Run a query and return nothing, the only row, or every row.
    ///
    /// # Errors
    /// Returns `SqlitePluginError` if preparing or executing `sql` fails.
    pub fn select(&self, sql: &str) -> Result<Selection, SqlitePluginError> {
        let rows = execute_select(&self.conn, sql, self.timing())?;
        Ok(Selection::from(rows).camel_case_if(self.camel_case))
    }

    /// Run a query and return every row, possibly none.
    ///
    /// # Errors
    /// Returns `SqlitePluginError` if preparing or executing `sql` fails.
    pub fn selects(&self, sql: &str) -> Result<ResultSet, SqlitePluginError> {
        let rows = execute_select(&self.conn, sql, self.timing())?;
        Ok(rows.camel_case_if(self.camel_case))
    }

    /// Run an INSERT and return the new rowid.
    ///
    /// # Errors
    /// Returns `SqlitePluginError` if preparing or executing `sql` fails.
    pub fn insert(&self, sql: &str) -> Result<i64, SqlitePluginError> {
        Ok(self.run(sql)?.last_insert_rowid)
    }

    /// Run an UPDATE (or any DML) and return the number of changed rows.
    ///
    /// # Errors
    /// Returns `SqlitePluginError` if preparing or executing `sql` fails.
    pub fn update(&self, sql: &str) -> Result<usize, SqlitePluginError> {
        Ok(self.run(sql)?.changes)
    }

    /// Same as [`update`](Self::update); reads better for DELETE statements.
    ///
    /// # Errors
    /// Returns `SqlitePluginError` if preparing or executing `sql` fails.
    pub fn del(&self, sql: &str) -> Result<usize, SqlitePluginError> {
        self.update(sql)
    }

    /// Run a statement and return both the change count and last rowid.
    ///
    /// # Errors
    /// Returns `SqlitePluginError` if preparing or executing `sql` fails.
    pub fn run(&self, sql: &str) -> Result<RunOutcome, SqlitePluginError> {
        execute_run(&self.conn, sql, self.timing())
    }

    /// Run `statements` atomically, in order.
    ///
    /// # Errors
    /// Returns `SqlitePluginError::TransactionError` after rolling back if any
    /// statement fails.
    pub fn transaction<S: AsRef<str>>(
        &self,
        statements: &[S],
    ) -> Result<Vec<RunOutcome>, SqlitePluginError> {
        run_transaction(&self.conn, statements, self.timing())
    }
}

impl fmt::Debug for SqliteClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteClient")
            .field("path", &self.conn.path())
            .field("camel_case", &self.camel_case)
            .field("environment", &self.environment)
            .finish()
    }
}
