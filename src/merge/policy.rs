//! Record-level merge of two resource collections.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::options::{MergeBehavior, MergeOptions};
use crate::resource::{ResourceKey, ResourceRecord};

/// MergeReport counts what happened to each record during a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Records taken from the existing document.
    pub existing: usize,
    /// Incoming records whose key was new.
    pub added: usize,
    /// Incoming records dropped in favor of an existing value.
    pub preserved: usize,
    /// Existing records whose value was replaced in place.
    pub overwritten: usize,
    /// Repeated keys collapsed to their first occurrence.
    pub duplicates_dropped: usize,
}

/// MergedRecords is the outcome of [`merge_records`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRecords {
    pub records: Vec<ResourceRecord>,
    pub report: MergeReport,
}

/// Combines existing and incoming records.
///
/// `Replace` yields the incoming records. `Merge` keeps the existing records in
/// their original order and appends incoming records with unseen keys; for
/// keys present on both sides, `preserve_existing` decides whether the
/// existing value stays or is overwritten at its existing position.
/// `Append` has no record-level meaning and only adds unseen keys.
///
/// The result never holds two records with the same key.
pub fn merge_records(
    existing: Vec<ResourceRecord>,
    incoming: Vec<ResourceRecord>,
    options: &MergeOptions,
) -> MergedRecords {
    let mut merged = RecordIndex::default();

    if options.behavior == MergeBehavior::Replace {
        for record in incoming {
            merged.insert_first(record);
        }
        merged.report.added = merged.records.len();
        return merged.finish();
    }

    for record in existing {
        merged.insert_first(record);
    }
    merged.report.existing = merged.records.len();

    let preserve = options.preserve_existing || options.behavior == MergeBehavior::Append;
    for record in incoming {
        let key = record.key();
        match merged.index.get(&key) {
            Some(_) if preserve => {
                debug!(key = %key, "keeping existing value");
                merged.report.preserved += 1;
            }
            Some(&i) => {
                debug!(key = %key, "overwriting existing value");
                let slot = &mut merged.records[i];
                slot.value = record.value;
                slot.attributes = record.attributes;
                slot.raw_text = record.raw_text;
                merged.report.overwritten += 1;
            }
            None => {
                merged.index.insert(key, merged.records.len());
                merged.records.push(record);
                merged.report.added += 1;
            }
        }
    }

    merged.finish()
}

#[derive(Default)]
struct RecordIndex {
    records: Vec<ResourceRecord>,
    index: HashMap<ResourceKey, usize>,
    report: MergeReport,
}

impl RecordIndex {
    /// Inserts a record unless its key is already present.
    fn insert_first(&mut self, record: ResourceRecord) {
        let key = record.key();
        if self.index.contains_key(&key) {
            warn!(key = %key, "duplicate resource in one document, keeping the first");
            self.report.duplicates_dropped += 1;
            return;
        }
        self.index.insert(key, self.records.len());
        self.records.push(record);
    }

    fn finish(self) -> MergedRecords {
        MergedRecords {
            records: self.records,
            report: self.report,
        }
    }
}
