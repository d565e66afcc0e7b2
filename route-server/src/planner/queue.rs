//! Array-backed binary min-heap for partial itineraries.
//!
//! Entries are ordered by [`Weighted::weight`] only. There is no
//! decrease-key: search nodes are immutable, and every improvement is a new
//! entry. When sifting down, the left child wins a tie with the right child,
//! and an entry only moves when a child is strictly lighter.

/// Anything that can sit in a [`RouteQueue`].
pub trait Weighted {
    fn weight(&self) -> u32;
}

/// Binary min-heap keyed by [`Weighted::weight`].
///
/// Children of index `i` live at `2i + 1` and `2i + 2`; its parent at
/// `(i - 1) / 2`.
#[derive(Debug, Clone)]
pub struct RouteQueue<T> {
    heap: Vec<T>,
}

impl<T: Weighted> RouteQueue<T> {
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    /// Insert an entry, sifting it toward the root while its parent is
    /// heavier.
    pub fn enqueue(&mut self, item: T) {
        self.heap.push(item);
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return a minimum-weight entry.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let min = self.heap.pop();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        min
    }

    /// The current minimum, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[parent].weight() <= self.heap[index].weight() {
                break;
            }
            self.heap.swap(parent, index);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.heap[left].weight() < self.heap[smallest].weight() {
                smallest = left;
            }
            if right < len && self.heap[right].weight() < self.heap[smallest].weight() {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.heap.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T: Weighted> Default for RouteQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    struct W(u32);

    impl Weighted for W {
        fn weight(&self) -> u32 {
            self.0
        }
    }

    proptest! {
        /// Draining yields the input sorted ascending
        #[test]
        fn drains_sorted(weights in proptest::collection::vec(0u32..1000, 0..200)) {
            let mut queue = RouteQueue::new();
            for &w in &weights {
                queue.enqueue(W(w));
            }
            let drained: Vec<u32> = std::iter::from_fn(|| queue.dequeue()).map(|w| w.0).collect();
            let mut expected = weights.clone();
            expected.sort_unstable();
            prop_assert_eq!(drained, expected);
        }
    }
}
