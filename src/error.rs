use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlitePluginError {
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error opening {path}: {source}")]
    ConnectionError {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("SQL syntax error in `{statement}`: {source}")]
    SyntaxError {
        statement: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("SQL execution error in `{statement}`: {source}")]
    ExecutionError {
        statement: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Transaction failed ({} statements attempted): {source}", .statements.len())]
    TransactionError {
        statements: Vec<String>,
        #[source]
        source: Box<SqlitePluginError>,
    },
}

impl SqlitePluginError {
    /// The single statement that failed, if this error is tied to one.
    ///
    /// For a `TransactionError` this looks through to the failing statement
    /// inside the batch.
    #[must_use]
    pub fn statement(&self) -> Option<&str> {
        match self {
            Self::SyntaxError { statement, .. } | Self::ExecutionError { statement, .. } => {
                Some(statement)
            }
            Self::TransactionError { source, .. } => source.statement(),
            _ => None,
        }
    }

    /// Every statement of the batch, for errors raised by a transaction.
    #[must_use]
    pub fn statements(&self) -> Option<&[String]> {
        if let Self::TransactionError { statements, .. } = self {
            Some(statements)
        } else {
            None
        }
    }

    /// Underlying engine error, when there is one.
    #[must_use]
    pub fn sqlite_error(&self) -> Option<&rusqlite::Error> {
        match self {
            Self::SqliteError(err)
            | Self::ConnectionError { source: err, .. }
            | Self::SyntaxError { source: err, .. }
            | Self::ExecutionError { source: err, .. } => Some(err),
            Self::TransactionError { source, .. } => source.sqlite_error(),
            Self::ConfigError(_) => None,
        }
    }
}
