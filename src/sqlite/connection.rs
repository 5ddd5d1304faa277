use rusqlite::{Connection, OpenFlags};

use crate::error::SqlitePluginError;

use super::config::SqliteOptions;

fn open_flags(opts: &SqliteOptions) -> OpenFlags {
    let base = OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    if opts.read_only {
        base | OpenFlags::SQLITE_OPEN_READ_ONLY
    } else if opts.file_must_exist && !opts.is_in_memory() {
        base | OpenFlags::SQLITE_OPEN_READ_WRITE
    } else {
        base | OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
    }
}

/// Open the connection described by `opts` and apply its busy timeout.
///
/// # Errors
/// Returns `SqlitePluginError::ConnectionError` if the path cannot be opened
/// with the requested flags or the timeout cannot be set.
pub fn open_connection(opts: &SqliteOptions) -> Result<Connection, SqlitePluginError> {
    let connection_error = |source: rusqlite::Error| SqlitePluginError::ConnectionError {
        path: opts.db_path.clone(),
        source,
    };

    let conn = Connection::open_with_flags(&opts.db_path, open_flags(opts)).map_err(|e| {
        tracing::warn!(path = %opts.db_path, error = %e, "failed to open sqlite database");
        connection_error(e)
    })?;
    conn.busy_timeout(opts.busy_timeout)
        .map_err(connection_error)?;

    tracing::info!(
        path = %opts.db_path,
        read_only = opts.read_only,
        "opened sqlite database"
    );
    Ok(conn)
}
