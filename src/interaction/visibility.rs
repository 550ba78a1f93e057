use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::SeriesKey;

/// Series keys currently rendered and included in domain computation.
///
/// Keys keep their insertion order so output listings stay stable between
/// renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilitySet {
    keys: IndexSet<SeriesKey>,
}

impl VisibilitySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_keys(keys: impl IntoIterator<Item = SeriesKey>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Visibility after a first data load.
    ///
    /// Every available key is visible unless `preferred` names some of them,
    /// in which case only those are. A preferred subset with no overlap
    /// falls back to all keys.
    #[must_use]
    pub fn initial(available: &[SeriesKey], preferred: &[SeriesKey]) -> Self {
        let chosen: IndexSet<SeriesKey> = available
            .iter()
            .filter(|key| preferred.contains(key))
            .copied()
            .collect();
        if chosen.is_empty() {
            return Self::from_keys(available.iter().copied());
        }
        Self { keys: chosen }
    }

    #[must_use]
    pub fn contains(&self, key: &SeriesKey) -> bool {
        self.keys.contains(key)
    }

    /// Flips membership of `key`, returning whether it is now visible.
    pub fn toggle(&mut self, key: SeriesKey) -> bool {
        if self.keys.shift_remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    pub fn select_all(&mut self, keys: impl IntoIterator<Item = SeriesKey>) {
        self.keys = keys.into_iter().collect();
    }

    pub fn clear_all(&mut self) {
        self.keys.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesKey> {
        self.keys.iter()
    }
}
