//! # Indexed Max-Heap
//!
//! Binary max-heap over item ids `0..n` keyed by a weight per id, with
//! in-place key updates. Ordering is total: higher weight first, and among
//! equal weights the lower id first, so pops are reproducible.

use std::cmp::Ordering;

const ABSENT: usize = usize::MAX;

/// Max-heap of ids with updatable keys
#[derive(Debug, Clone)]
pub struct IndexedMaxHeap<K> {
    /// Heap array of ids
    heap: Vec<usize>,

    /// Position of each id in `heap`, or `ABSENT` once popped
    position: Vec<usize>,

    /// Key for each id (kept after popping)
    keys: Vec<K>,
}

impl<K: PartialOrd + Copy> IndexedMaxHeap<K> {
    /// Heapify ids `0..keys.len()` in O(n)
    pub fn new(keys: Vec<K>) -> Self {
        let n = keys.len();
        let mut heap = Self {
            heap: (0..n).collect(),
            position: (0..n).collect(),
            keys,
        };

        for pos in (0..n / 2).rev() {
            heap.sift_down(pos);
        }

        heap
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.position.get(id).is_some_and(|&pos| pos != ABSENT)
    }

    pub fn key(&self, id: usize) -> K {
        self.keys[id]
    }

    /// Id with the highest key, without removing it
    pub fn peek(&self) -> Option<usize> {
        self.heap.first().copied()
    }

    /// Remove and return the id with the highest key
    pub fn pop(&mut self) -> Option<usize> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(0, last);

        let top = self.heap.pop()?;
        self.position[top] = ABSENT;

        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        Some(top)
    }

    /// Replace the key of `id` and restore heap order
    ///
    /// Ids that were already popped keep the new key but stay out of the heap.
    pub fn update(&mut self, id: usize, key: K) {
        let old = self.keys[id];
        self.keys[id] = key;

        let pos = self.position[id];
        if pos == ABSENT {
            return;
        }

        match key.partial_cmp(&old) {
            Some(Ordering::Greater) => self.sift_up(pos),
            _ => self.sift_down(pos),
        }
    }

    /// True when `a` belongs above `b`
    fn outranks(&self, a: usize, b: usize) -> bool {
        match self.keys[a].partial_cmp(&self.keys[b]) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Less) => false,
            _ => a < b,
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.position[self.heap[i]] = i;
        self.position[self.heap[j]] = j;
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.outranks(self.heap[pos], self.heap[parent]) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            if left >= n {
                break;
            }

            let right = left + 1;
            let mut best = left;
            if right < n && self.outranks(self.heap[right], self.heap[left]) {
                best = right;
            }

            if !self.outranks(self.heap[best], self.heap[pos]) {
                break;
            }
            self.swap(pos, best);
            pos = best;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(heap: &mut IndexedMaxHeap<f64>) -> Vec<usize> {
        std::iter::from_fn(|| heap.pop()).collect()
    }

    #[test]
    fn test_pops_in_key_order() {
        let mut heap = IndexedMaxHeap::new(vec![0.3, 2.0, 0.1, 5.0, 1.0]);
        assert_eq!(heap.peek(), Some(3));
        assert_eq!(drain(&mut heap), vec![3, 1, 4, 0, 2]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_ties_break_by_lowest_id() {
        let mut heap = IndexedMaxHeap::new(vec![1.0, 2.0, 2.0, 1.0, 2.0]);
        assert_eq!(drain(&mut heap), vec![1, 2, 4, 0, 3]);
    }

    #[test]
    fn test_decrease_key() {
        let mut heap = IndexedMaxHeap::new(vec![4.0, 3.0, 2.0, 1.0]);

        heap.update(0, 0.5);
        assert_eq!(heap.peek(), Some(1));
        assert_eq!(heap.key(0), 0.5);
        assert_eq!(drain(&mut heap), vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_increase_key() {
        let mut heap = IndexedMaxHeap::new(vec![4.0, 3.0, 2.0, 1.0]);

        heap.update(3, 10.0);
        assert_eq!(heap.pop(), Some(3));
    }

    #[test]
    fn test_update_after_pop_is_ignored() {
        let mut heap = IndexedMaxHeap::new(vec![4.0, 3.0]);

        assert_eq!(heap.pop(), Some(0));
        assert!(!heap.contains(0));

        heap.update(0, 100.0);
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn test_matches_sorted_order_under_updates() {
        let n = 200;
        let keys: Vec<f64> = (0..n).map(|i| ((i * 37) % 101) as f64).collect();
        let mut heap = IndexedMaxHeap::new(keys.clone());

        let mut expected = keys;
        for id in (0..n).step_by(3) {
            expected[id] -= 50.0;
            heap.update(id, expected[id]);
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            expected[b]
                .partial_cmp(&expected[a])
                .unwrap()
                .then(a.cmp(&b))
        });

        assert_eq!(drain(&mut heap), order);
    }
}
