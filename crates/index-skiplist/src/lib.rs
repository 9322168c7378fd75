//! A fixed-capacity, pointer-packed, multi-layer probabilistic skip list over externally
//! stored records.
//!
//! The list never owns values: every element is a caller-supplied `u32` index into whatever
//! container actually holds the data (see the [`slot-buffer`](https://docs.rs/slot-buffer)
//! crate for a ready-made companion). Ordering is delegated entirely to a [`Comparator`], which
//! compares two indices rather than two values.
//!
//! ```
//! use index_skiplist::{IdentityComparator, SkipList};
//!
//! let mut list = SkipList::new(16, 0.5, IdentityComparator)?;
//! list.insert(3);
//! list.insert(1);
//! list.insert(2);
//! assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
//! # Ok::<(), index_skiplist::ConfigError>(())
//! ```

mod comparator;
mod error;
mod geometry;
mod iter;
mod list;

pub use comparator::{Comparator, IdentityComparator};
pub use error::ConfigError;
pub use iter::{Backward, Forward};
pub use list::SkipList;
