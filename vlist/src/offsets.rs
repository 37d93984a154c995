use alloc::vec::Vec;

use crate::key::KeyCacheKey;
use crate::{Item, SizeModel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Stamp {
    items_version: u64,
    sizes_version: u64,
}

/// Cumulative item offsets: `offsets[i]` is the summed height of items `[0..i)`.
///
/// Holds `items.len() + 1` entries, starts at `0`, never decreases, and ends at the total
/// content height. Rebuilt in one linear pass, and only when the item list or the size model
/// version moved since the last build.
#[derive(Clone, Debug)]
pub struct OffsetTable {
    offsets: Vec<u64>,
    stamp: Option<Stamp>,
}

impl Default for OffsetTable {
    fn default() -> Self {
        Self {
            offsets: alloc::vec![0],
            stamp: None,
        }
    }
}

impl OffsetTable {
    /// Builds a fresh table for `items`.
    pub fn build<K: KeyCacheKey, C>(items: &[Item<K, C>], sizes: &SizeModel<K>) -> Self {
        let mut table = Self::default();
        table.fill(items, sizes);
        table
    }

    /// Rebuilds the table if `items_version` or the size model version changed since the last
    /// build. Returns `true` when a rebuild happened.
    pub fn refresh<K: KeyCacheKey, C>(
        &mut self,
        items: &[Item<K, C>],
        items_version: u64,
        sizes: &SizeModel<K>,
    ) -> bool {
        let stamp = Stamp {
            items_version,
            sizes_version: sizes.version(),
        };
        if self.stamp == Some(stamp) {
            return false;
        }
        self.fill(items, sizes);
        self.stamp = Some(stamp);
        vdebug!(
            items = items.len(),
            items_version,
            sizes_version = stamp.sizes_version,
            total = self.total(),
            "OffsetTable::refresh"
        );
        true
    }

    fn fill<K: KeyCacheKey, C>(&mut self, items: &[Item<K, C>], sizes: &SizeModel<K>) {
        self.offsets.clear();
        self.offsets.reserve_exact(items.len() + 1);
        let mut acc = 0u64;
        self.offsets.push(acc);
        for item in items {
            acc = acc.saturating_add(sizes.height_or_estimate(&item.key) as u64);
            self.offsets.push(acc);
        }
    }

    /// Number of items the table covers.
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.offsets
    }

    pub fn total(&self) -> u64 {
        self.offsets.last().copied().unwrap_or(0)
    }

    /// Top edge of item `index` (list-relative). `index == len()` gives the total height.
    pub fn start_of(&self, index: usize) -> u64 {
        let i = index.min(self.len());
        self.offsets[i]
    }

    /// Bottom edge of item `index` (list-relative).
    pub fn end_of(&self, index: usize) -> u64 {
        self.start_of(index.saturating_add(1))
    }

    pub fn size_of(&self, index: usize) -> u64 {
        self.end_of(index).saturating_sub(self.start_of(index))
    }

    /// Smallest `i` with `offsets[i] >= target`, or `len() + 1` when no entry qualifies.
    ///
    /// `O(log n)`.
    pub fn first_at_least(&self, target: u64) -> usize {
        self.offsets.partition_point(|&o| o < target)
    }

    /// Index of the item covering list-relative `offset`, or `None` for an empty table.
    ///
    /// Offsets past the end map to the last item; zero-height items are skipped over.
    pub fn index_at(&self, offset: u64) -> Option<usize> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        // First boundary strictly past `offset`, minus one, is the covering item.
        let past = self.offsets.partition_point(|&o| o <= offset);
        Some(past.saturating_sub(1).min(n - 1))
    }
}
