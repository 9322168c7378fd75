use std::cmp::Ordering;

use oorandom::Rand32;

use crate::comparator::Comparator;
use crate::error::ConfigError;
use crate::geometry::Geometry;
use crate::iter::{Backward, Forward};


/// The seed used by [`SkipList::new`], chosen once and fixed for reproducible default runs.
const DEFAULT_SEED: u64 = 0x_5117_1995;


/// A fixed-capacity, pointer-packed, multi-layer probabilistic skip list.
///
/// The list never owns or copies values: every element is an externally supplied `u32` index
/// (the caller's own slot id into whatever container holds the actual values), and ordering is
/// determined entirely by the `Cmp` comparator, which compares two indices. Two distinct live
/// indices must never resolve to an equal value through the caller's own container; the skip
/// list does not enforce or check this.
///
/// Every link lives in a flat array indexed by the index itself, rather than in a per-node heap
/// allocation: the whole structure is `L + 1` `Vec<Option<u32>>` buffers of length `capacity`,
/// plus small per-level metadata arrays. All of that memory is allocated once, at construction,
/// and never reallocated while the list is in use.
#[derive(Debug, Clone)]
pub struct SkipList<Cmp> {
    cmp:      Cmp,
    capacity: u32,
    geometry: Geometry,
    prng:     Rand32,

    /// Highest level that currently holds any index. Monotonic non-decreasing on insert;
    /// may decrease on remove, but only ever tracks an upper bound (see `remove`).
    current_level: usize,

    heads: Vec<Option<u32>>,
    tails: Vec<Option<u32>>,
    sizes: Vec<u32>,

    /// `nexts[level][index]` is the successor of `index` at `level`, when `index` is live
    /// at that level. Unspecified (but always a valid `Option<u32>`) otherwise.
    nexts: Vec<Vec<Option<u32>>>,
    /// Backward links at level 0 only.
    prevs: Vec<Option<u32>>,
}

impl<Cmp: Comparator> SkipList<Cmp> {
    /// Construct an empty skip list with the given `capacity` and promotion `ratio`.
    ///
    /// `ratio` must lie in `[0, 1]`; `0` disables promotion entirely (a plain sorted linked
    /// list), and `1` promotes every index all the way to the top level. Both are degenerate
    /// but valid configurations, useful for deterministic tests.
    pub fn new(capacity: u32, ratio: f64, cmp: Cmp) -> Result<Self, ConfigError> {
        Self::new_seeded(capacity, ratio, cmp, DEFAULT_SEED)
    }

    /// As [`Self::new`], but with an explicit PRNG seed for the level-selection draws.
    pub fn new_seeded(
        capacity: u32,
        ratio:    f64,
        cmp:      Cmp,
        seed:     u64,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity(capacity));
        }
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ConfigError::InvalidRatio(ratio));
        }

        let geometry    = Geometry::new(capacity, ratio);
        let level_count = geometry.level_count_value();

        Ok(Self {
            cmp,
            capacity,
            geometry,
            prng:          Rand32::new(seed),
            current_level: 0,
            heads:         vec![None; level_count],
            tails:         vec![None; level_count],
            sizes:         vec![0; level_count],
            nexts:         vec![vec![None; capacity as usize]; level_count],
            prevs:         vec![None; capacity as usize],
        })
    }

    /// The fixed maximum number of simultaneous live indices.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// The number of live indices, i.e. `sizes[0]`.
    #[inline]
    #[must_use]
    pub fn len(&self) -> u32 {
        self.sizes[0]
    }

    /// Whether the list currently holds no indices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The highest level that currently holds any index.
    ///
    /// For diagnostics. After a `remove`, this is only an upper bound in general: it is
    /// decremented exactly when the single topmost level of the traversal empties, not
    /// whenever any level empties.
    #[inline]
    #[must_use]
    pub const fn current_level(&self) -> usize {
        self.current_level
    }

    /// The first (smallest) index, if any.
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<u32> {
        self.heads[0]
    }

    /// The last (largest) index, if any.
    #[inline]
    #[must_use]
    pub fn tail(&self) -> Option<u32> {
        self.tails[0]
    }

    /// The successor of `index` at level 0, if `index` is live and not the last element.
    #[inline]
    #[must_use]
    pub fn next(&self, index: u32) -> Option<u32> {
        self.nexts[0][index as usize]
    }

    /// The predecessor of `index` at level 0, if `index` is live and not the first element.
    #[inline]
    #[must_use]
    pub fn prev(&self, index: u32) -> Option<u32> {
        self.prevs[index as usize]
    }

    /// Look up, at `level`, where `index` would sit relative to the existing chain, scanning
    /// forward from `hint` (or from `heads[level]` if `hint` is `None`).
    ///
    /// Returns `(predecessor, successor)`: the pair of indices `index` would be spliced
    /// between. `predecessor` is `None` when `index` sorts before everything currently live
    /// at this level (including when the level is empty); `successor` is `None` when `index`
    /// sorts at or after the current tail.
    ///
    /// This is the hint carry-forward described in the crate's `DESIGN.md`: `hint` is always
    /// a node already known to sort before `index`, so resuming the scan from there (instead of
    /// from `heads[level]`) is what gives `insert`/`remove` their expected `O(log n)` behavior.
    fn locate(&self, level: usize, index: u32, hint: Option<u32>) -> (Option<u32>, Option<u32>) {
        let Some(head) = self.heads[level] else {
            return (None, None);
        };
        if self.cmp.compare(index, head) == Ordering::Less {
            return (None, Some(head));
        }

        #[expect(clippy::unwrap_used, reason = "heads[level] is Some, so tails[level] must be too")]
        let tail = self.tails[level].unwrap();
        if self.cmp.compare(index, tail) != Ordering::Less {
            return (Some(tail), None);
        }

        let mut cursor = hint.unwrap_or(head);
        loop {
            #[expect(clippy::unwrap_used, reason = "cursor precedes tail, so it must have a successor")]
            let successor = self.nexts[level][cursor as usize].unwrap();
            if self.cmp.compare(index, successor) == Ordering::Less {
                return (Some(cursor), Some(successor));
            }
            cursor = successor;
        }
    }

    /// Draw a fresh random insertion level, in `[0, L - 1]`.
    fn random_level(&mut self) -> usize {
        self.geometry.random_level(&mut self.prng)
    }

    /// Splice `index` into every level `0..=insertLevel`, where `insertLevel` is drawn fresh.
    ///
    /// `index` must not already be live in the list; inserting a value already present is a
    /// caller error (see this crate's `DESIGN.md` on error handling) and will corrupt the
    /// structure's invariants rather than being rejected.
    ///
    /// Ties are broken stably: among indices that compare equal, `index` is inserted after all
    /// existing equals.
    pub fn insert(&mut self, index: u32) {
        let insert_level = self.random_level();
        if insert_level > self.current_level {
            self.current_level = insert_level;
        }

        let mut hint = None;
        for level in (0..=self.current_level).rev() {
            let (predecessor, successor) = self.locate(level, index, hint);
            hint = predecessor;

            if level > insert_level {
                continue;
            }

            self.sizes[level] += 1;
            self.nexts[level][index as usize] = successor;

            match predecessor {
                None          => self.heads[level] = Some(index),
                Some(pred_ix) => self.nexts[level][pred_ix as usize] = Some(index),
            }
            if successor.is_none() {
                self.tails[level] = Some(index);
            }

            if level == 0 {
                self.prevs[index as usize] = predecessor;
                if let Some(succ_ix) = successor {
                    self.prevs[succ_ix as usize] = Some(index);
                }
            }
        }
    }

    /// Unsplice `index` from every level it is live at.
    ///
    /// If `index` is absent from some level, that level is simply skipped (it means `index`
    /// was never promoted that high). Removing an `index` that is not a member of the list at
    /// all is a caller error and is not signaled; see this crate's `DESIGN.md`.
    pub fn remove(&mut self, index: u32) {
        let top_level = self.current_level;
        let mut hint  = None;

        for level in (0..=top_level).rev() {
            let Some(found_at) = self.find_predecessor(level, index, hint) else {
                // Not promoted to this level; `hint` carries forward unchanged.
                continue;
            };
            hint = found_at;

            self.sizes[level] -= 1;
            let successor = self.nexts[level][index as usize];

            if self.heads[level] == Some(index) {
                self.heads[level] = successor;
            }
            if self.tails[level] == Some(index) {
                self.tails[level] = found_at.or(self.heads[level]);
            }

            match found_at {
                Some(pred_ix) => {
                    self.nexts[level][pred_ix as usize] = successor;
                    if level == 0 {
                        if let Some(succ_ix) = successor {
                            self.prevs[succ_ix as usize] = Some(pred_ix);
                        }
                    }
                }
                None if level == 0 => {
                    if let Some(succ_ix) = successor {
                        self.prevs[succ_ix as usize] = None;
                    }
                }
                None => {}
            }

            // This only compensates for the very top level of this traversal emptying; in
            // general `current_level` stays an upper bound, which is safe because empty upper
            // levels are skipped by every scan (their `heads` entry is `None`).
            if level == top_level && self.sizes[level] == 0 && self.current_level > 0 {
                self.current_level -= 1;
            }
        }
    }

    /// Scan `level` for `index`, starting from `hint` (or `heads[level]` if `hint` is `None`).
    ///
    /// Returns `Some(predecessor)` if found (`predecessor` is `None` when `index` is the head
    /// of this level), or `None` if `index` is not live at this level.
    fn find_predecessor(&self, level: usize, index: u32, hint: Option<u32>) -> Option<Option<u32>> {
        let mut predecessor = hint;
        let mut cursor = match hint {
            Some(h) => self.nexts[level][h as usize],
            None    => self.heads[level],
        };

        loop {
            match cursor {
                None => return None,
                Some(c) if c == index => return Some(predecessor),
                Some(c) => {
                    predecessor = Some(c);
                    cursor = self.nexts[level][c as usize];
                }
            }
        }
    }

    /// Find the rightmost index at which `predicate` is false, i.e. the last position before
    /// `predicate` first becomes true along the list's sorted order.
    ///
    /// `predicate` must be monotone over the list's order: false for a prefix, then true for
    /// the remaining suffix. Two edge cases are special: if `predicate` is already true at the
    /// very first element, [`Self::head`] is returned (not `None`); if `predicate` is false for
    /// every element, `None` is returned (not the tail).
    ///
    /// A caller composes both halves of a range query on top of the comparator: "less than `v`"
    /// locates the right boundary, "less than or equal to `v`" locates the left boundary.
    pub fn bisect<P: FnMut(u32) -> bool>(&self, mut predicate: P) -> Option<u32> {
        let mut hint = None;
        let mut predicate_became_true = false;

        for level in (0..=self.current_level).rev() {
            let mut cursor = hint;
            predicate_became_true = false;

            loop {
                let candidate = match cursor {
                    Some(c) => self.nexts[level][c as usize],
                    None    => self.heads[level],
                };
                match candidate {
                    None => break,
                    Some(c) => {
                        if predicate(c) {
                            predicate_became_true = true;
                            break;
                        }
                        cursor = Some(c);
                    }
                }
            }

            hint = cursor;
        }

        if !predicate_became_true {
            return None;
        }
        hint.or_else(|| self.head())
    }

    /// Find an index whose value compares equal under `matcher`, preferring the earliest such
    /// position if duplicates are present.
    ///
    /// `matcher(index)` must return [`Ordering::Less`] when `index`'s value sorts below the
    /// probe, [`Ordering::Equal`] when it matches, and [`Ordering::Greater`] when it sorts
    /// above; like `predicate` in [`Self::bisect`], it must be monotone over the list's order.
    pub fn search<M: FnMut(u32) -> Ordering>(&self, mut matcher: M) -> Option<u32> {
        let mut hint  = None;
        let mut found = None;

        for level in (0..=self.current_level).rev() {
            let mut cursor = hint;

            loop {
                let candidate = match cursor {
                    Some(c) => self.nexts[level][c as usize],
                    None    => self.heads[level],
                };
                match candidate {
                    None => break,
                    Some(c) => match matcher(c) {
                        Ordering::Less    => cursor = Some(c),
                        Ordering::Equal   => { found = Some(c); break; }
                        Ordering::Greater => break,
                    },
                }
            }

            hint = cursor;
        }

        found
    }

    /// Iterate forward from `start` (defaulting to [`Self::head`]) for up to `limit` steps
    /// (defaulting to [`Self::len`]), following level-0 successors.
    #[must_use]
    pub fn forwards(&self, start: Option<u32>, limit: Option<u32>) -> Forward<'_, Cmp> {
        Forward::new(self, start.or_else(|| self.head()), limit.unwrap_or_else(|| self.len()))
    }

    /// Iterate backward from `start` (defaulting to [`Self::tail`]) for up to `limit` steps
    /// (defaulting to [`Self::len`]), following level-0 predecessors.
    #[must_use]
    pub fn backwards(&self, start: Option<u32>, limit: Option<u32>) -> Backward<'_, Cmp> {
        Backward::new(self, start.or_else(|| self.tail()), limit.unwrap_or_else(|| self.len()))
    }

    /// Iterate the full list, forward from the head.
    #[must_use]
    pub fn iter(&self) -> Forward<'_, Cmp> {
        self.forwards(None, None)
    }
}
