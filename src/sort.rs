//! In-place sorting routines and a fixed-capacity min-priority queue.
//!
//! All sorts order ascending; empty and single-element slices are left alone.

use crate::error::CapacityError;

/// Stable counting sort over the value range `min..=max`.
///
/// Memory is proportional to `max - min`, not to `max`.
pub fn counting_sort(arr: &mut [u32]) {
    let (Some(&min), Some(&max)) = (arr.iter().min(), arr.iter().max()) else {
        return;
    };
    let slot = |x: u32| (x - min) as usize;
    let mut count = vec![0usize; slot(max) + 1];
    for &x in arr.iter() {
        count[slot(x)] += 1;
    }
    // Prefix sums: count[v - min] is one past the last output slot for `v`.
    for i in 1..count.len() {
        count[i] += count[i - 1];
    }
    let mut output = vec![0u32; arr.len()];
    for &x in arr.iter().rev() {
        count[slot(x)] -= 1;
        output[count[slot(x)]] = x;
    }
    arr.copy_from_slice(&output);
}

pub fn heap_sort<T: Ord>(arr: &mut [T]) {
    let n = arr.len();
    for i in (0..n / 2).rev() {
        heapify(arr, n, i);
    }
    for end in (1..n).rev() {
        arr.swap(0, end);
        heapify(arr, end, 0);
    }
}

fn heapify<T: Ord>(arr: &mut [T], n: usize, mut i: usize) {
    loop {
        let left = 2 * i + 1;
        let right = left + 1;
        let mut largest = i;
        if left < n && arr[left] > arr[largest] {
            largest = left;
        }
        if right < n && arr[right] > arr[largest] {
            largest = right;
        }
        if largest == i {
            return;
        }
        arr.swap(i, largest);
        i = largest;
    }
}

/// Quicksort with a median-of-three pivot and a Lomuto partition.
///
/// Recursion only descends into the smaller side, so stack depth stays
/// logarithmic in the slice length.
pub fn quick_sort<T: Ord>(mut arr: &mut [T]) {
    while arr.len() > 1 {
        median_to_last(arr);
        let p = partition(arr);
        let (lo, rest) = core::mem::take(&mut arr).split_at_mut(p);
        let hi = &mut rest[1..];
        if lo.len() < hi.len() {
            quick_sort(lo);
            arr = hi;
        } else {
            quick_sort(hi);
            arr = lo;
        }
    }
}

// Move the median of first, middle and last into the pivot slot.
fn median_to_last<T: Ord>(arr: &mut [T]) {
    if arr.len() < 3 {
        return;
    }
    let last = arr.len() - 1;
    let mid = arr.len() / 2;
    if arr[mid] < arr[0] {
        arr.swap(mid, 0);
    }
    if arr[last] < arr[0] {
        arr.swap(last, 0);
    }
    if arr[last] < arr[mid] {
        arr.swap(last, mid);
    }
    arr.swap(mid, last);
}

/// Place the pivot (last element) at its sorted index and return it.
fn partition<T: Ord>(arr: &mut [T]) -> usize {
    let pivot = arr.len() - 1;
    let mut store = 0;
    for j in 0..pivot {
        if arr[j] <= arr[pivot] {
            arr.swap(store, j);
            store += 1;
        }
    }
    arr.swap(store, pivot);
    store
}

pub fn selection_sort<T: Ord>(arr: &mut [T]) {
    let n = arr.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            if arr[j] < arr[min] {
                min = j;
            }
        }
        arr.swap(i, min);
    }
}

/// Binary min-heap of `i64` with a fixed capacity.
#[derive(Clone, Debug)]
pub struct MinPriorityQueue {
    heap: Vec<i64>,
    capacity: usize,
}

impl MinPriorityQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn peek_min(&self) -> Option<i64> {
        self.heap.first().copied()
    }

    pub fn push(&mut self, key: i64) -> Result<(), CapacityError> {
        if self.heap.len() == self.capacity {
            return Err(CapacityError {
                capacity: self.capacity,
            });
        }
        self.heap.push(key);
        let mut i = self.heap.len() - 1;
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[parent] <= self.heap[i] {
                break;
            }
            self.heap.swap(i, parent);
            i = parent;
        }
        Ok(())
    }

    pub fn pop_min(&mut self) -> Option<i64> {
        if self.heap.is_empty() {
            return None;
        }
        let min = self.heap.swap_remove(0);
        let n = self.heap.len();
        let mut i = 0;
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < n && self.heap[left] < self.heap[smallest] {
                smallest = left;
            }
            if right < n && self.heap[right] < self.heap[smallest] {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.heap.swap(i, smallest);
            i = smallest;
        }
        Some(min)
    }
}
