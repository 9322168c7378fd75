//! `SlotBuffer` paired with `index-skiplist`, the combination the two crates were designed
//! around: the buffer owns values and hands out slot ids, the skip list orders those ids.
//!
//! A comparator that borrows the buffer can't coexist with mutating it, so every test here
//! mutates the buffer to completion in one phase, then builds a list borrowing it for the
//! read/insert phase, dropping the list before the next mutation.

use std::cmp::Ordering;

use index_skiplist::SkipList;
use slot_buffer::SlotBuffer;

struct ByValue<'a>(&'a SlotBuffer<i32>);

impl index_skiplist::Comparator for ByValue<'_> {
    fn compare(&self, a: u32, b: u32) -> Ordering {
        self.0.at(a).cmp(&self.0.at(b))
    }
}

#[test]
fn insert_ordered_via_buffer_backed_comparator() {
    let mut buffer = SlotBuffer::new(16);
    let ids: Vec<u32> = [30, 10, 20, 0, -5].into_iter().map(|v| buffer.append(v)).collect();

    let mut list = SkipList::new(16, 0.5, ByValue(&buffer)).unwrap();
    for &id in &ids {
        list.insert(id);
    }

    let ordered_values: Vec<_> = list.iter().map(|id| *buffer.at(id).unwrap()).collect();
    assert_eq!(ordered_values, vec![-5, 0, 10, 20, 30]);
}

#[test]
fn eviction_requires_caller_to_remove_stale_id_first() {
    let mut buffer = SlotBuffer::new(2);
    let a = buffer.append(1);
    let b = buffer.append(2);

    {
        let mut list = SkipList::new(2, 0.5, ByValue(&buffer)).unwrap();
        list.insert(a);
        list.insert(b);
        // Per this pairing's contract, the caller removes a stale id from every skip list it
        // was inserted into before the buffer reuses that id for a new value.
        list.remove(a);
    }

    // The buffer is now full; appending a third value evicts slot `a`'s value and reuses `a`.
    let reused = buffer.append(3);
    assert_eq!(reused, a, "a 2-slot buffer reuses the oldest id once full");

    let mut list = SkipList::new(2, 0.5, ByValue(&buffer)).unwrap();
    list.insert(b);
    list.insert(reused);

    let ordered_values: Vec<_> = list.iter().map(|id| *buffer.at(id).unwrap()).collect();
    assert_eq!(ordered_values, vec![2, 3]);
}
