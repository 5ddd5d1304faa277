use std::time::Instant;

use rusqlite::{Connection, Statement};

use crate::error::SqlitePluginError;
use crate::results::{ResultSet, RunOutcome};

use super::query::build_result_set;

/// Whether the caller expects rows back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// Collect every row the statement produces.
    FetchAll,
    /// Step once for side effects; report changes and the last insert rowid.
    Run,
}

/// Raw result of `execute`, shaped by the mode it ran in.
#[derive(Debug, Clone, PartialEq)]
pub enum Executed {
    Rows(ResultSet),
    Outcome(RunOutcome),
}

/// Run `f`, emitting a debug event with the elapsed time when `timed` is set.
///
/// The event fires whether or not `f` succeeded.
pub(crate) fn timed<T>(label: &str, timed: bool, f: impl FnOnce() -> T) -> T {
    if !timed {
        return f();
    }
    let started = Instant::now();
    let out = f();
    let elapsed = started.elapsed();
    tracing::debug!(
        sql = label,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "sqlite statement finished"
    );
    out
}

fn prepare<'c>(conn: &'c Connection, sql: &str) -> Result<Statement<'c>, SqlitePluginError> {
    conn.prepare(sql)
        .map_err(|source| SqlitePluginError::SyntaxError {
            statement: sql.to_owned(),
            source,
        })
}

fn execution_error(sql: &str) -> impl FnOnce(rusqlite::Error) -> SqlitePluginError {
    move |source| SqlitePluginError::ExecutionError {
        statement: sql.to_owned(),
        source,
    }
}

/// Execute a single statement against `conn`.
///
/// The statement is prepared verbatim. A prepare failure is reported as
/// `SyntaxError`, a failure while stepping as `ExecutionError`; both carry the
/// statement text. Nothing is retried.
///
/// # Errors
/// Returns `SqlitePluginError::SyntaxError` or `SqlitePluginError::ExecutionError`.
pub fn execute(
    conn: &Connection,
    sql: &str,
    mode: ExecMode,
    timing: bool,
) -> Result<Executed, SqlitePluginError> {
    match mode {
        ExecMode::FetchAll => execute_select(conn, sql, timing).map(Executed::Rows),
        ExecMode::Run => execute_run(conn, sql, timing).map(Executed::Outcome),
    }
}

/// Execute a SELECT-like statement and collect its rows.
///
/// # Errors
///
/// Returns `SqlitePluginError` if preparing or stepping the statement fails.
pub fn execute_select(
    conn: &Connection,
    sql: &str,
    timing: bool,
) -> Result<ResultSet, SqlitePluginError> {
    timed(sql, timing, || {
        let mut stmt = prepare(conn, sql)?;
        build_result_set(&mut stmt).map_err(execution_error(sql))
    })
}

/// Execute a statement for its side effects.
///
/// Statements that produce rows are rejected by the engine here; use
/// `execute_select` for those. A statement that changes no rows (DDL,
/// a no-op UPDATE) reports zero changes.
///
/// # Errors
///
/// Returns `SqlitePluginError` if preparing or stepping the statement fails.
pub fn execute_run(
    conn: &Connection,
    sql: &str,
    timing: bool,
) -> Result<RunOutcome, SqlitePluginError> {
    timed(sql, timing, || {
        let mut stmt = prepare(conn, sql)?;
        let total_before = conn.total_changes();
        let changes = stmt.execute([]).map_err(execution_error(sql))?;
        // sqlite3_changes() keeps the count of the last DML statement, so a
        // statement that touched nothing would otherwise report stale rows.
        let changes = if conn.total_changes() == total_before {
            0
        } else {
            changes
        };
        Ok(RunOutcome::new(changes, conn.last_insert_rowid()))
    })
}
