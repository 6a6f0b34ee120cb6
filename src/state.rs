use alloc::vec::Vec;

/// A serializable snapshot of an index's logical values (position `i` is `values[i - 1]`).
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`. Restoring goes
/// through [`crate::PrefixSumIndex::from_snapshot`], so the internal slots are always rebuilt
/// rather than trusted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexSnapshot {
    pub values: Vec<i64>,
}

impl IndexSnapshot {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
