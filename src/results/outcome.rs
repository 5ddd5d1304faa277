/// Outcome of running a statement that does not return rows.
///
/// Mirrors what SQLite reports after a step: the number of rows changed by
/// the statement and the rowid of the most recent successful insert on the
/// connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Rows inserted, updated or deleted by the statement.
    pub changes: usize,
    /// Rowid of the last successful insert on this connection.
    pub last_insert_rowid: i64,
}

impl RunOutcome {
    #[must_use]
    pub fn new(changes: usize, last_insert_rowid: i64) -> Self {
        Self {
            changes,
            last_insert_rowid,
        }
    }
}
