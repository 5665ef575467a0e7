use std::collections::BTreeMap;
use std::sync::Arc;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::subset::{SubsetCodec, SubsetMask};

/// Cheapest known way to leave the start city, visit a subset, and stop at one end node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DpEntry {
    pub cost: f64,
    pub path: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DpRecord {
    pub mask: SubsetMask,
    pub end: usize,
    pub entry: DpEntry,
}

/// Working Held-Karp table. Entries are write-once: a slot, once filled, is
/// never touched again, so the insertion log doubles as a history of the run.
#[derive(Debug)]
pub struct DpTable {
    n: usize,
    // mask * n + end -> index into `log`
    slots: Vec<Option<usize>>,
    log: Vec<DpRecord>,
}

impl DpTable {
    pub fn new(n: usize) -> Self {
        Self { n, slots: vec![None; n << n], log: Vec::new() }
    }

    #[inline(always)]
    fn slot(&self, mask: SubsetMask, end: usize) -> usize {
        mask.bits() as usize * self.n + end
    }

    pub fn get(&self, mask: SubsetMask, end: usize) -> Option<&DpEntry> {
        self.slots[self.slot(mask, end)].map(|at| &self.log[at].entry)
    }

    /// Stores `entry` unless the key is already set. Returns whether it was stored.
    pub fn insert(&mut self, mask: SubsetMask, end: usize, entry: DpEntry) -> bool {
        let slot = self.slot(mask, end);
        if self.slots[slot].is_some() {
            return false;
        }
        self.slots[slot] = Some(self.log.len());
        self.log.push(DpRecord { mask, end, entry });
        true
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn freeze(self) -> Arc<[DpRecord]> {
        self.log.into()
    }
}

/// The DP table as it stood when a step was recorded: the first `len`
/// records of the frozen log.
#[derive(Clone, Debug)]
pub struct DpTableView {
    codec: Arc<SubsetCodec>,
    records: Arc<[DpRecord]>,
    len: usize,
}

impl DpTableView {
    pub fn new(codec: Arc<SubsetCodec>, records: Arc<[DpRecord]>, len: usize) -> Self {
        debug_assert!(len <= records.len());
        Self { codec, records, len }
    }

    pub fn records(&self) -> &[DpRecord] {
        &self.records[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, mask: SubsetMask, end: usize) -> Option<&DpEntry> {
        self.records().iter().find(|r| r.mask == mask && r.end == end).map(|r| &r.entry)
    }

    /// Groups entries by subset, subsets in ascending mask order.
    pub fn by_subset(&self) -> BTreeMap<SubsetMask, BTreeMap<usize, &DpEntry>> {
        let mut grouped: BTreeMap<SubsetMask, BTreeMap<usize, &DpEntry>> = BTreeMap::new();
        for record in self.records() {
            grouped.entry(record.mask).or_default().insert(record.end, &record.entry);
        }
        grouped
    }
}

impl PartialEq for DpTableView {
    fn eq(&self, other: &Self) -> bool {
        self.codec == other.codec && self.records() == other.records()
    }
}

impl Serialize for DpTableView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let grouped = self.by_subset();
        let mut map = serializer.serialize_map(Some(grouped.len()))?;
        for (mask, row) in &grouped {
            map.serialize_entry(&self.codec.key(*mask), row)?;
        }
        map.end()
    }
}
