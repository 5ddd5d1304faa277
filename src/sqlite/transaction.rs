use rusqlite::Connection;

use crate::error::SqlitePluginError;
use crate::results::RunOutcome;

use super::executor::{execute_run, timed};

fn transaction_error<S: AsRef<str>>(
    statements: &[S],
    source: SqlitePluginError,
) -> SqlitePluginError {
    SqlitePluginError::TransactionError {
        statements: statements.iter().map(|s| s.as_ref().to_owned()).collect(),
        source: Box::new(source),
    }
}

fn run_statements<S: AsRef<str>>(
    conn: &Connection,
    statements: &[S],
    timing: bool,
) -> Result<Vec<RunOutcome>, SqlitePluginError> {
    let mut results = Vec::with_capacity(statements.len());
    for sql in statements {
        results.push(execute_run(conn, sql.as_ref(), timing)?);
    }
    conn.execute_batch("COMMIT")?;
    Ok(results)
}

/// Roll back after a failed batch.
///
/// Some engine errors end the transaction on their own; ROLLBACK is only
/// issued while one is still open.
fn rollback(conn: &Connection) -> Result<(), SqlitePluginError> {
    if conn.is_autocommit() {
        return Ok(());
    }
    conn.execute_batch("ROLLBACK")?;
    Ok(())
}

/// Run `statements` in order inside a single BEGIN/COMMIT block.
///
/// On success the per-statement outcomes come back in input order. On the
/// first failure (a statement or the COMMIT itself) the transaction is rolled
/// back and the original error is returned as a `TransactionError` listing
/// every statement of the batch; outcomes of statements that already ran are
/// dropped.
///
/// If BEGIN fails, for instance because a transaction is already open on the
/// connection, nothing is rolled back.
///
/// A failing ROLLBACK is returned as-is and replaces the original error.
///
/// # Errors
/// Returns `SqlitePluginError::TransactionError`, or the rollback error.
pub fn run_transaction<S: AsRef<str>>(
    conn: &Connection,
    statements: &[S],
    timing: bool,
) -> Result<Vec<RunOutcome>, SqlitePluginError> {
    let label = if timing {
        statements
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<&str>>()
            .join("; ")
    } else {
        String::new()
    };

    timed(&label, timing, || {
        conn.execute_batch("BEGIN")
            .map_err(|e| transaction_error(statements, e.into()))?;

        match run_statements(conn, statements, timing) {
            Ok(results) => Ok(results),
            Err(err) => {
                tracing::warn!(
                    statements = statements.len(),
                    error = %err,
                    "rolling back sqlite transaction"
                );
                if let Err(rollback_err) = rollback(conn) {
                    tracing::error!(
                        masked = %err,
                        error = %rollback_err,
                        "sqlite rollback failed"
                    );
                    return Err(rollback_err);
                }
                Err(transaction_error(statements, err))
            }
        }
    })
}
