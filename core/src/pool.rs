//! Object pooling utilities for allocation reuse.
//!
//! This module provides [`FreeList<T>`], a stack of cleared values whose
//! allocations are kept alive between uses. Values are handed out with
//! [`acquire`](FreeList::acquire) and given back with
//! [`recycle`](FreeList::recycle), which resets them first so no residual
//! contents can reach the next user.
//!
//! # Motivation
//!
//! Debug drawing submits many short-lived vertex lists every frame. Dropping
//! them when they expire and allocating fresh ones for the next submission
//! would churn the allocator; recycling them keeps steady-state frames
//! allocation free.
//!
//! # Example
//!
//! ```
//! use dbgdraw_core::pool::FreeList;
//!
//! let mut lists: FreeList<Vec<u32>> = FreeList::new();
//!
//! let mut list = lists.acquire();
//! list.extend_from_slice(&[1, 2, 3]);
//!
//! // Give it back: contents are cleared, capacity is kept.
//! lists.recycle(list);
//! assert_eq!(lists.free_count(), 1);
//!
//! let list = lists.acquire();
//! assert!(list.is_empty());
//! assert!(list.capacity() >= 3);
//! assert_eq!(lists.created_count(), 1);
//! ```

/// Trait for types that can be pooled and reused.
///
/// Implementors must be able to create an empty instance and clear their
/// contents while preserving allocated capacity.
pub trait Poolable {
    /// Create a new empty instance for pool initialization.
    fn new_empty() -> Self;

    /// Reset the value to an empty state, preserving allocated capacity.
    ///
    /// For example, call `Vec::clear()` rather than replacing with a new `Vec`.
    fn reset(&mut self);
}

impl<T> Poolable for Vec<T> {
    fn new_empty() -> Self {
        Vec::new()
    }

    fn reset(&mut self) {
        self.clear();
    }
}

/// A stack of reset values available for reuse.
#[derive(Debug)]
pub struct FreeList<T: Poolable> {
    free: Vec<T>,
    created: usize,
}

impl<T: Poolable> FreeList<T> {
    /// Create an empty free list.
    pub fn new() -> Self {
        Self {
            free: Vec::new(),
            created: 0,
        }
    }

    /// Take a value from the free list, or create one if the list is empty.
    ///
    /// The returned value is always in its reset state.
    pub fn acquire(&mut self) -> T {
        match self.free.pop() {
            Some(value) => value,
            None => {
                self.created += 1;
                T::new_empty()
            }
        }
    }

    /// Reset a value and store it for reuse.
    pub fn recycle(&mut self, mut value: T) {
        value.reset();
        self.free.push(value);
    }

    /// Pre-create `count` values using `make`, so the first frames do not
    /// allocate on demand.
    pub fn prewarm_with(&mut self, count: usize, mut make: impl FnMut() -> T) {
        self.free.reserve(count);
        for _ in 0..count {
            self.created += 1;
            self.free.push(make());
        }
    }

    /// Number of values currently waiting for reuse.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Total number of values this list has ever created.
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Drop every stored value, releasing their allocations.
    pub fn clear(&mut self) {
        self.free.clear();
    }

    /// Iterate over the values waiting for reuse.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.free.iter()
    }
}

impl<T: Poolable> Default for FreeList<T> {
    fn default() -> Self {
        Self::new()
    }
}
