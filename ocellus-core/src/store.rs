//! Result store
//!
//! Holds the records of the most recent successful enumerate cycle (one
//! "generation") plus a read cursor. All queries are linear scans; an index
//! always means "the i-th matching record in arrival order", and a miss
//! returns [`Record::Invalid`] instead of failing.

use alloc::collections::TryReserveError;
use alloc::vec::Vec;

use ocellus_protocol::{Metadata, Record};

/// Ordered records of one enumerate cycle
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    records: Vec<Record>,
    cursor: usize,
    metadata: Metadata,
}

impl ResultStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with room for `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Make room for at least `n` records in total
    ///
    /// Capacity only ever grows.
    pub fn reserve(&mut self, n: usize) -> Result<(), TryReserveError> {
        self.records
            .try_reserve(n.saturating_sub(self.records.len()))
    }

    /// Append a record in arrival order
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Drop all records and metadata, keeping the allocation
    pub fn clear(&mut self) {
        self.records.clear();
        self.cursor = 0;
        self.metadata = Metadata::default();
    }

    /// Number of records the store can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    /// Returns true if the generation holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Header of the cycle that produced this generation
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub(crate) fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = metadata;
    }

    /// All records in arrival order
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.iter()
    }

    // Cursor

    /// Position of the next `read`
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor forward by one, stopping at the end
    pub fn advance_cursor(&mut self) {
        if self.cursor < self.records.len() {
            self.cursor += 1;
        }
    }

    /// Rewind the cursor to the first record
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Return the record under the cursor and advance
    ///
    /// Past the end this returns [`Record::Invalid`] and leaves the cursor put.
    pub fn read(&mut self) -> Record {
        let record = self.get(self.cursor);
        self.advance_cursor();
        record
    }

    // Counts

    /// Total number of records
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Records with this ID
    pub fn count_by_id(&self, id: u16) -> usize {
        self.count_where(|r| r.id() == id)
    }

    /// Block records
    pub fn count_blocks(&self) -> usize {
        self.count_where(Record::is_block)
    }

    /// Block records with this ID
    pub fn count_blocks_by_id(&self, id: u16) -> usize {
        self.count_where(|r| r.is_block() && r.id() == id)
    }

    /// Arrow records
    pub fn count_arrows(&self) -> usize {
        self.count_where(Record::is_arrow)
    }

    /// Arrow records with this ID
    pub fn count_arrows_by_id(&self, id: u16) -> usize {
        self.count_where(|r| r.is_arrow() && r.id() == id)
    }

    /// Records with a learned ID (>= 1)
    pub fn count_learned(&self) -> usize {
        self.count_where(Record::is_learned)
    }

    /// Blocks with a learned ID
    pub fn count_blocks_learned(&self) -> usize {
        self.count_where(|r| r.is_block() && r.is_learned())
    }

    /// Arrows with a learned ID
    pub fn count_arrows_learned(&self) -> usize {
        self.count_where(|r| r.is_arrow() && r.is_learned())
    }

    // Indexed lookups

    /// The i-th record
    pub fn get(&self, index: usize) -> Record {
        self.records.get(index).copied().unwrap_or_default()
    }

    /// The i-th record with this ID
    pub fn get_by_id(&self, id: u16, index: usize) -> Record {
        self.nth_where(index, |r| r.id() == id)
    }

    /// The i-th block
    pub fn block(&self, index: usize) -> Record {
        self.nth_where(index, Record::is_block)
    }

    /// The i-th block with this ID
    pub fn block_by_id(&self, id: u16, index: usize) -> Record {
        self.nth_where(index, |r| r.is_block() && r.id() == id)
    }

    /// The i-th arrow
    pub fn arrow(&self, index: usize) -> Record {
        self.nth_where(index, Record::is_arrow)
    }

    /// The i-th arrow with this ID
    pub fn arrow_by_id(&self, id: u16, index: usize) -> Record {
        self.nth_where(index, |r| r.is_arrow() && r.id() == id)
    }

    /// The i-th learned record
    pub fn learned(&self, index: usize) -> Record {
        self.nth_where(index, Record::is_learned)
    }

    /// The i-th learned block
    pub fn block_learned(&self, index: usize) -> Record {
        self.nth_where(index, |r| r.is_block() && r.is_learned())
    }

    /// The i-th learned arrow
    pub fn arrow_learned(&self, index: usize) -> Record {
        self.nth_where(index, |r| r.is_arrow() && r.is_learned())
    }

    fn count_where(&self, predicate: impl Fn(&Record) -> bool) -> usize {
        self.records.iter().filter(|&r| predicate(r)).count()
    }

    fn nth_where(&self, index: usize, predicate: impl Fn(&Record) -> bool) -> Record {
        self.records
            .iter()
            .filter(|&r| predicate(r))
            .nth(index)
            .copied()
            .unwrap_or_default()
    }
}
