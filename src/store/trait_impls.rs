use core::fmt;
use core::iter;
use core::mem::MaybeUninit;
use core::ops::Index;

use super::*;

impl<T> Drop for CircularStore<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for CircularStore<T> {
    #[inline]
    fn default() -> Self {
        CircularStore::new_unbounded(MIN_CAPACITY)
    }
}

/// The clone gets the same storage size, bound and discard count, but no
/// discard callback.
impl<T: Clone> Clone for CircularStore<T> {
    fn clone(&self) -> Self {
        let mut buf = allocate(self.capacity());
        for (slot, element) in buf.iter_mut().zip(self.iter()) {
            *slot = MaybeUninit::new(element.clone());
        }

        CircularStore {
            buf,
            initial_capacity: self.initial_capacity,
            max_size: self.max_size,
            discards: self.discards,
            read: 0,
            write: self.len(),
            on_discard: None,
        }
    }
}

impl<T: PartialEq> PartialEq for CircularStore<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for CircularStore<T> {}

impl<T> Index<usize> for CircularStore<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        let len = self.len();
        match self.get(index) {
            Some(element) => element,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

/// Writes every element, so a bounded store discards the overflow.
impl<T> Extend<T> for CircularStore<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.write(element);
        }
    }
}

impl<T> iter::FromIterator<T> for CircularStore<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut store = CircularStore::new_unbounded(lower.saturating_add(1));
        store.extend(iter);
        store
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
