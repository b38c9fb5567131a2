use crate::navigation::EnrichedPosition;

use super::error::LogbookError;

/// Append-only history of accepted positions, in arrival order.
///
/// Entries are never edited, removed or reordered. Timestamps are not
/// required to be monotonic; a correction is simply a newer entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionLog {
    entries: Vec<EnrichedPosition>,
    max_entries: Option<usize>,
}

impl PositionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_entries(max_entries: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Appends `entry` and returns its 1-based record number.
    ///
    /// On error the log is left untouched.
    pub fn append(&mut self, entry: EnrichedPosition) -> Result<usize, LogbookError> {
        let len = self.entries.len();

        if self.max_entries.is_some_and(|max| len >= max) {
            return Err(LogbookError::CapacityExceeded(len));
        }
        self.entries
            .try_reserve(1)
            .map_err(|_| LogbookError::CapacityExceeded(len))?;

        self.entries.push(entry);
        Ok(self.entries.len())
    }

    pub fn all(&self) -> &[EnrichedPosition] {
        &self.entries
    }

    pub fn last(&self) -> Option<&EnrichedPosition> {
        self.entries.last()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    /// An empty log with the same limits, used to start over.
    pub fn fresh(&self) -> Self {
        Self::with_max_entries(self.max_entries)
    }
}
