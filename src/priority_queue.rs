//! Max-heap priority queue of stores ordered by sales, and an in-place heapsort.

use crate::store::Store;

const DEFAULT_CAPACITY: usize = 10;

/// Insert elements and retrieve them highest priority first.
pub trait PriorityQueue<T> {
    fn insert(&mut self, element: T);
    /// Remove and return the highest-priority element.
    fn pop_highest(&mut self) -> Option<T>;
    fn is_empty(&self) -> bool;
    fn len(&self) -> usize;
}

/// Array-backed binary max-heap keyed on `Store::sales`.
///
/// Uses 0-indexed storage with parent = (i-1)/2, children = 2i+1, 2i+2.
/// The heap owns its stores, so `Clone` is a full deep copy.
#[derive(Clone, Debug)]
pub struct StoreHeap {
    heap: Vec<Store>,
}

impl Default for StoreHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreHeap {
    pub fn new() -> Self {
        Self {
            heap: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Independent deep copy; equivalent to `clone()`.
    pub fn copy_instance(&self) -> Self {
        self.clone()
    }

    pub fn peek_highest(&self) -> Option<&Store> {
        self.heap.first()
    }

    /// Stores in heap (array) order.
    pub fn iter(&self) -> core::slice::Iter<'_, Store> {
        self.heap.iter()
    }

    fn ensure_capacity(&mut self) {
        if self.heap.len() == self.heap.capacity() {
            let extra = self.heap.capacity().max(1);
            self.heap.reserve_exact(extra);
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].sales() > self.heap[parent].sales() {
                self.heap.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }
}

impl PriorityQueue<Store> for StoreHeap {
    fn insert(&mut self, element: Store) {
        self.ensure_capacity();
        self.heap.push(element);
        self.sift_up(self.heap.len() - 1);
    }

    fn pop_highest(&mut self) -> Option<Store> {
        if self.heap.is_empty() {
            return None;
        }
        let top = self.heap.swap_remove(0);
        let n = self.heap.len();
        sift_down(&mut self.heap, n, 0);
        Some(top)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Restore the max-heap property for the subtree at `i` within `arr[..n]`.
fn sift_down(arr: &mut [Store], n: usize, mut i: usize) {
    loop {
        let left = 2 * i + 1;
        let right = left + 1;
        let mut largest = i;
        if left < n && arr[left].sales() > arr[largest].sales() {
            largest = left;
        }
        if right < n && arr[right].sales() > arr[largest].sales() {
            largest = right;
        }
        if largest == i {
            return;
        }
        arr.swap(i, largest);
        i = largest;
    }
}

/// Sort in place from highest to lowest sales.
pub fn heapsort(stores: &mut [Store]) {
    let n = stores.len();
    for i in (0..n / 2).rev() {
        sift_down(stores, n, i);
    }
    for end in (1..n).rev() {
        stores.swap(0, end);
        sift_down(stores, end, 0);
    }
    // Max-heap extraction leaves ascending order.
    stores.reverse();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(h: &mut StoreHeap) -> Vec<f64> {
        std::iter::from_fn(|| h.pop_highest().map(|s| s.sales())).collect()
    }

    #[test]
    fn pops_in_descending_sales_order() {
        let mut h = StoreHeap::new();
        for (i, v) in [5.0, 1.0, 9.0, 3.0, 7.0, 9.5, 0.5].into_iter().enumerate() {
            h.insert(Store::new(format!("s{i}"), v));
        }
        assert_eq!(h.len(), 7);
        assert_eq!(h.peek_highest().map(Store::sales), Some(9.5));
        assert_eq!(drain(&mut h), vec![9.5, 9.0, 7.0, 5.0, 3.0, 1.0, 0.5]);
        assert!(h.is_empty());
        assert!(h.pop_highest().is_none());
    }

    /// Invariant: growth past the initial room keeps the heap order.
    #[test]
    fn grows_past_default_capacity() {
        let mut h = StoreHeap::new();
        for i in 0..25 {
            h.insert(Store::new(format!("s{i}"), f64::from((i * 7) % 25)));
        }
        assert_eq!(h.len(), 25);
        let out = drain(&mut h);
        assert!(out.windows(2).all(|w| w[0] >= w[1]));
    }

    /// Invariant: a copy is independent; popping from the original leaves
    /// the copy's contents and size untouched.
    #[test]
    fn copies_are_independent() {
        let mut original = StoreHeap::new();
        original.insert(Store::new("Test Owner", 5000.0));
        original.insert(Store::new("Another Owner", 10000.0));

        let mut by_clone = original.clone();
        let mut by_copy = original.copy_instance();

        let top = original.pop_highest().unwrap();
        assert_eq!(top.owner(), "Another Owner");
        assert_eq!(original.len(), 1);
        assert_eq!(by_clone.len(), 2);
        assert_eq!(by_copy.len(), 2);

        assert_eq!(by_clone.pop_highest().unwrap().sales(), 10000.0);
        assert_eq!(by_clone.pop_highest().unwrap().sales(), 5000.0);
        assert_eq!(by_copy.pop_highest().unwrap().owner(), "Another Owner");
    }

    #[test]
    fn heapsort_orders_descending() {
        let mut stores: Vec<Store> = [3.0, 10.0, 1.0, 7.0, 7.0, 2.0]
            .into_iter()
            .enumerate()
            .map(|(i, v)| Store::new(format!("s{i}"), v))
            .collect();
        heapsort(&mut stores);
        let sales: Vec<f64> = stores.iter().map(Store::sales).collect();
        assert_eq!(sales, vec![10.0, 7.0, 7.0, 3.0, 2.0, 1.0]);

        let mut empty: Vec<Store> = Vec::new();
        heapsort(&mut empty);
        let mut one = vec![Store::new("a", 1.0)];
        heapsort(&mut one);
        assert_eq!(one[0].sales(), 1.0);
    }
}
