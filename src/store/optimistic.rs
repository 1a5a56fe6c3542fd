//! Provisional ledger entries shown before the backend confirms them.
//!
//! An entry moves `Pending -> Committed` or `Pending -> RolledBack`; both end
//! states remove the provisional id. Ids are negative so they can never clash
//! with backend ids.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::model::{LedgerEntry, NewEntry};

static NEXT_TEMP_ID: AtomicI64 = AtomicI64::new(-1);

pub fn next_temp_id() -> i64 {
    NEXT_TEMP_ID.fetch_sub(1, Ordering::Relaxed)
}

#[derive(Clone, Debug, PartialEq)]
pub enum Optimistic {
    Pending {
        temp_id: i64,
        entry: NewEntry,
        created_at: String,
    },
    Committed {
        temp_id: i64,
        entry: LedgerEntry,
    },
    RolledBack {
        temp_id: i64,
        error: String,
    },
}

/// The aggregate fields a provisional entry touches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatsSnapshot {
    pub net: f64,
    pub remaining: f64,
    pub entries_count: u32,
}

/// Bookkeeping for one in-flight entry.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingEntry {
    pub category_id: i64,
    pub delta: f64,
    /// Stats before and after the provisional change. `None` once the
    /// category list was replaced from the backend, which never saw the entry.
    pub applied: Option<(StatsSnapshot, StatsSnapshot)>,
}

pub(crate) fn provisional_entry(temp_id: i64, entry: &NewEntry, created_at: &str) -> LedgerEntry {
    LedgerEntry {
        entry_id: temp_id,
        category_id: entry.category_id,
        entry_type: entry.entry_type,
        what: entry.what.clone(),
        place: entry.place.clone(),
        amount: entry.amount,
        date: entry.date.clone(),
        created_at: created_at.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_ids_are_negative_and_unique() {
        let a = next_temp_id();
        let b = next_temp_id();
        assert!(a < 0 && b < 0);
        assert_ne!(a, b);
    }
}
