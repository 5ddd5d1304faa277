//! Shapes returned by the read and write paths.

pub mod outcome;
pub mod result_set;
pub mod row;
pub mod selection;

pub use outcome::RunOutcome;
pub use result_set::ResultSet;
pub use row::Row;
pub use selection::Selection;
