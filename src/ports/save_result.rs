//! Outcome of an insert guarded by a uniqueness constraint.

/// Result of attempting to insert a row that must be unique.
///
/// Stores enforce the constraint themselves (unique index, or a single
/// write lock in memory) so that two concurrent inserts for the same key
/// cannot both succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// Row was inserted.
    Inserted,
    /// A row with the same unique key already exists; nothing was written.
    AlreadyExists,
}

impl SaveResult {
    pub fn is_inserted(&self) -> bool {
        matches!(self, SaveResult::Inserted)
    }
}
