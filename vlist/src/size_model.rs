use crate::key::{KeyCacheKey, KeyMap};

/// Last measured height per item key, with an estimate fallback.
///
/// Mutation happens in place. Every write that actually changes a height bumps
/// [`SizeModel::version`], which derived data (the offset table) compares against instead of
/// copying the map on each measurement. Writes of an equal value are no-ops.
#[derive(Clone, Debug)]
pub struct SizeModel<K> {
    sizes: KeyMap<K, u32>,
    estimated_height: u32,
    version: u64,
    batch_depth: usize,
    batch_dirty: bool,
}

impl<K: KeyCacheKey> SizeModel<K> {
    pub fn new(estimated_height: u32) -> Self {
        Self {
            sizes: KeyMap::new(),
            estimated_height,
            version: 0,
            batch_depth: 0,
            batch_dirty: false,
        }
    }

    pub fn get(&self, key: &K) -> Option<u32> {
        self.sizes.get(key).copied()
    }

    /// Height to lay the item out with: the measurement if any, the estimate otherwise.
    pub fn height_or_estimate(&self, key: &K) -> u32 {
        self.get(key).unwrap_or(self.estimated_height)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.sizes.contains_key(key)
    }

    /// Stores a measurement. Returns `true` when the stored value changed.
    ///
    /// A zero height is a real measurement (collapsed item), not "unmeasured".
    pub fn set(&mut self, key: K, height: u32) -> bool {
        if self.sizes.get(&key) == Some(&height) {
            return false;
        }
        self.sizes.insert(key, height);
        self.bump();
        true
    }

    /// Applies several writes with at most one version bump.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.batch_depth = self.batch_depth.saturating_add(1);
        let out = f(self);
        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 && core::mem::take(&mut self.batch_dirty) {
            self.version = self.version.wrapping_add(1);
        }
        out
    }

    /// Drops every measurement (list identity changed).
    pub fn reset(&mut self) {
        let had_entries = !self.sizes.is_empty();
        self.sizes.clear();
        if had_entries {
            self.bump();
        }
    }

    pub fn estimated_height(&self) -> u32 {
        self.estimated_height
    }

    /// Changes the fallback height. Returns `true` when it changed.
    pub fn set_estimated_height(&mut self, estimated_height: u32) -> bool {
        if self.estimated_height == estimated_height {
            return false;
        }
        self.estimated_height = estimated_height;
        self.bump();
        true
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    fn bump(&mut self) {
        if self.batch_depth > 0 {
            self.batch_dirty = true;
        } else {
            self.version = self.version.wrapping_add(1);
        }
    }
}
