use alloc::vec::Vec;
use core::cmp;

use crate::IndexError;
use crate::state::IndexSnapshot;

/// A Fenwick tree (binary indexed tree) over signed 64-bit values.
///
/// Logical positions are 1-based (`1..=len`). Point updates are additive deltas, and both
/// [`update`](Self::update) and [`prefix_sum`](Self::prefix_sum) run in `O(log n)`.
///
/// Arithmetic wraps on overflow: results are exact whenever the true sum fits in `i64`.
///
/// ```
/// use fentree::PrefixSumIndex;
///
/// let mut index = PrefixSumIndex::from_values(&[1, 2, 3, 4, 5]);
/// assert_eq!(index.range_sum(1, 5), Ok(15));
///
/// index.update(3, 10).unwrap();
/// assert_eq!(index.range_sum(1, 5), Ok(25));
/// assert_eq!(index.range_sum(1, 2), Ok(3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixSumIndex {
    tree: Vec<i64>, // 1-indexed, slot 0 unused
    total: i64,
    max_bit: usize,
}

impl PrefixSumIndex {
    /// Creates a zero-filled index with `len` positions.
    pub fn new(len: usize) -> Self {
        fdebug!(len, "PrefixSumIndex::new");
        Self {
            tree: alloc::vec![0; len + 1],
            total: 0,
            max_bit: highest_power_of_two_leq(len),
        }
    }

    /// Builds an index whose logical values are `values`, in `O(n)`.
    ///
    /// The result is identical to calling [`update`](Self::update) once per position on a
    /// zero-filled index.
    pub fn from_values(values: &[i64]) -> Self {
        let n = values.len();
        fdebug!(len = n, "PrefixSumIndex::from_values");
        let mut tree = alloc::vec![0i64; n + 1];
        let mut total = 0i64;
        for i in 1..=n {
            let v = values[i - 1];
            total = total.wrapping_add(v);
            tree[i] = tree[i].wrapping_add(v);
            let j = i + lsb(i);
            if j <= n {
                tree[j] = tree[j].wrapping_add(tree[i]);
            }
        }
        Self {
            tree,
            total,
            max_bit: highest_power_of_two_leq(n),
        }
    }

    pub fn from_snapshot(snapshot: &IndexSnapshot) -> Self {
        Self::from_values(&snapshot.values)
    }

    /// Number of logical positions.
    pub fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all logical values, in `O(1)`.
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Adds `delta` to the value at `position`.
    ///
    /// Fails with [`IndexError::OutOfRange`] unless `1 <= position <= len`; in that case no slot
    /// is touched.
    pub fn update(&mut self, position: usize, delta: i64) -> Result<(), IndexError> {
        let n = self.len();
        IndexError::check(position, 1, n)?;
        ftrace!(position, delta, "update");

        self.total = self.total.wrapping_add(delta);
        let mut i = position;
        while i <= n {
            self.tree[i] = self.tree[i].wrapping_add(delta);
            i += lsb(i);
        }
        Ok(())
    }

    /// Sum of the values at positions `1..=position`.
    ///
    /// `position` may be `0` (the empty prefix, always `0`) up to `len`.
    pub fn prefix_sum(&self, position: usize) -> Result<i64, IndexError> {
        IndexError::check(position, 0, self.len())?;
        Ok(self.prefix(position))
    }

    /// Sum of the values at positions `start..=end`, i.e. `prefix_sum(end) - prefix_sum(start - 1)`.
    ///
    /// `start` must lie in `1..=len` and `end` in `0..=len`. The ordering of the two is not
    /// checked: `start > end` yields the negated sum of `end + 1..start`.
    pub fn range_sum(&self, start: usize, end: usize) -> Result<i64, IndexError> {
        let n = self.len();
        IndexError::check(start, 1, n)?;
        IndexError::check(end, 0, n)?;
        Ok(self.prefix(end).wrapping_sub(self.prefix(start - 1)))
    }

    /// The logical value at `position`.
    pub fn value_at(&self, position: usize) -> Result<i64, IndexError> {
        self.range_sum(position, position)
    }

    /// Overwrites the value at `position`, expressed as a delta update.
    pub fn set(&mut self, position: usize, value: i64) -> Result<(), IndexError> {
        let current = self.value_at(position)?;
        self.update(position, value.wrapping_sub(current))
    }

    /// Appends a new position holding `value`.
    ///
    /// Runs in `O(log n)`: the new slot is initialized from existing prefix sums.
    pub fn push(&mut self, value: i64) {
        let new_len = self.len() + 1;
        self.tree.push(0);
        self.total = self.total.wrapping_add(value);

        // Slot `new_len` covers the last `lsb(new_len)` values ending at `new_len`.
        let start_exclusive = new_len - lsb(new_len);
        let before = self
            .prefix(new_len - 1)
            .wrapping_sub(self.prefix(start_exclusive));
        self.tree[new_len] = before.wrapping_add(value);

        self.max_bit = highest_power_of_two_leq(new_len);
    }

    /// Drops every position past `new_len`. Does nothing if `new_len >= len`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len() {
            return;
        }
        self.total = self.prefix(new_len);
        self.tree.truncate(new_len + 1);
        self.max_bit = highest_power_of_two_leq(new_len);
    }

    /// Returns the largest count `k` such that `prefix_sum(k) <= target`.
    ///
    /// Only meaningful when every value is non-negative (prefix sums are then monotonic).
    /// A negative `target` returns `0`.
    pub fn lower_bound(&self, mut target: i64) -> usize {
        let n = self.len();
        let mut idx = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] <= target {
                target = target.wrapping_sub(self.tree[next]);
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }

    /// The logical values, in position order. Runs in `O(n)`.
    pub fn values(&self) -> Vec<i64> {
        let n = self.len();
        let mut values = self.tree.clone();
        for i in (1..=n).rev() {
            let j = i + lsb(i);
            if j <= n {
                values[j] = values[j].wrapping_sub(values[i]);
            }
        }
        values.remove(0);
        values
    }

    pub fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot {
            values: self.values(),
        }
    }

    fn prefix(&self, count: usize) -> i64 {
        let mut i = cmp::min(count, self.len());
        let mut sum = 0i64;
        while i > 0 {
            sum = sum.wrapping_add(self.tree[i]);
            i &= i - 1;
        }
        sum
    }
}

impl Default for PrefixSumIndex {
    fn default() -> Self {
        Self::new(0)
    }
}

impl FromIterator<i64> for PrefixSumIndex {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let values: Vec<i64> = iter.into_iter().collect();
        Self::from_values(&values)
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two_leq(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut p = 1usize;
    while p <= n / 2 {
        p <<= 1;
    }
    p
}
