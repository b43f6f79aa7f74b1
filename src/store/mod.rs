use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem::MaybeUninit;

use crate::behavior::Overflow;
use crate::error::EmptyError;
use crate::utils::*;
use crate::MIN_CAPACITY;

mod internal;
mod iterator_impls;
mod trait_impls;

use self::internal::allocate;

/// Callback receiving every element rejected by `write`.
pub type DiscardFn<T> = Box<dyn FnMut(T) + Send>;

/// `CircularStore` is a growable ring buffer with an optional upper bound on
/// its length.
///
/// Elements are appended with `write` or `overwrite` and taken from the front
/// with `read` (FIFO) or from the back with `pop_back` (LIFO).
///
/// The backing store is never full: as soon as the write cursor catches up
/// with the read cursor the storage is reallocated and the elements are laid
/// out again in logical order. Storage doubles while it is below 1024 slots
/// and grows by a quarter after that.
///
/// # Capacity
///
/// One slot is always left empty so that `read == write` means empty. The
/// write that would fill the last free slot reallocates before returning, so
/// `len()` is always below `capacity()`.
///
/// # Bounded stores
///
/// With a `max_size`, `write` rejects new elements once the store holds
/// `max_size` of them, counting each rejection in `discards()` and handing it
/// to the discard callback. `overwrite` evicts the oldest element instead.
///
/// The store performs no locking; wrap it in a `Mutex` to share it.
pub struct CircularStore<T> {
    buf: Box<[MaybeUninit<T>]>,
    initial_capacity: usize,
    max_size: usize,
    discards: u64,
    read: usize,
    write: usize,
    on_discard: Option<DiscardFn<T>>,
}

/// `CircularStore` iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    ring: &'a [MaybeUninit<T>],
    read: usize,
    write: usize,
}

/// A by-value `CircularStore` iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IntoIter<T> {
    inner: CircularStore<T>,
}

impl<T> CircularStore<T> {
    /// Creates an empty store with at least `initial_capacity` slots and an
    /// optional bound on its length.
    ///
    /// `initial_capacity` is raised to `MIN_CAPACITY` if smaller. A
    /// `max_size` below `MIN_CAPACITY` (including `Some(0)`) leaves the store
    /// unbounded.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringstore::CircularStore;
    ///
    /// let store: CircularStore<u32> = CircularStore::new(3, Some(4));
    /// assert_eq!(store.capacity(), 3);
    /// assert_eq!(store.max_size(), Some(4));
    ///
    /// let store: CircularStore<u32> = CircularStore::new(0, Some(1));
    /// assert_eq!(store.capacity(), 2);
    /// assert_eq!(store.max_size(), None);
    /// ```
    pub fn new(initial_capacity: usize, max_size: Option<usize>) -> Self {
        let initial_capacity = initial_capacity.max(MIN_CAPACITY);
        let max_size = match max_size {
            Some(max_size) if max_size >= MIN_CAPACITY => max_size,
            _ => 0,
        };

        CircularStore {
            buf: allocate(initial_capacity),
            initial_capacity,
            max_size,
            discards: 0,
            read: 0,
            write: 0,
            on_discard: None,
        }
    }

    /// Creates a store that grows without bound.
    #[inline]
    pub fn new_unbounded(initial_capacity: usize) -> Self {
        Self::new(initial_capacity, None)
    }

    /// Creates a store bounded to `size` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringstore::CircularStore;
    ///
    /// let mut store = CircularStore::new_fixed(2);
    /// store.write("a");
    /// store.write("b");
    /// store.write("c");
    /// assert_eq!(store.peek_all(), vec!["a", "b"]);
    /// assert_eq!(store.discards(), 1);
    /// ```
    #[inline]
    pub fn new_fixed(size: usize) -> Self {
        Self::new(size, Some(size))
    }

    /// Removes the oldest element and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringstore::{CircularStore, EmptyError};
    ///
    /// let mut store = CircularStore::new_unbounded(4);
    /// store.write(1);
    /// store.write(2);
    /// assert_eq!(store.read(), Ok(1));
    /// assert_eq!(store.read(), Ok(2));
    /// assert_eq!(store.read(), Err(EmptyError));
    /// ```
    pub fn read(&mut self) -> Result<T, EmptyError> {
        if self.is_empty() {
            return Err(EmptyError);
        }
        let read = self.read;
        self.read = self.wrap_add(read, 1);
        unsafe { Ok(self.buffer_read(read)) }
    }

    /// Removes the most recently written element and returns it, undoing the
    /// last write.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringstore::CircularStore;
    ///
    /// let mut store = CircularStore::new_unbounded(4);
    /// store.write(1);
    /// store.write(2);
    /// assert_eq!(store.pop_back(), Ok(2));
    /// assert_eq!(store.pop_back(), Ok(1));
    /// assert!(store.pop_back().is_err());
    /// ```
    pub fn pop_back(&mut self) -> Result<T, EmptyError> {
        if self.is_empty() {
            return Err(EmptyError);
        }
        self.write = self.wrap_sub(self.write, 1);
        let write = self.write;
        unsafe { Ok(self.buffer_read(write)) }
    }

    /// Returns a reference to the oldest element.
    #[inline]
    pub fn peek_front(&self) -> Result<&T, EmptyError> {
        if self.is_empty() {
            return Err(EmptyError);
        }
        unsafe { Ok(self.buffer_get(self.read)) }
    }

    /// Returns a reference to the most recently written element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringstore::CircularStore;
    ///
    /// let mut store = CircularStore::new_unbounded(2);
    /// store.write('x');
    /// store.write('y');
    /// assert_eq!(store.peek_front(), Ok(&'x'));
    /// assert_eq!(store.peek_back(), Ok(&'y'));
    /// assert_eq!(store.len(), 2);
    /// ```
    #[inline]
    pub fn peek_back(&self) -> Result<&T, EmptyError> {
        if self.is_empty() {
            return Err(EmptyError);
        }
        unsafe { Ok(self.buffer_get(self.wrap_sub(self.write, 1))) }
    }

    /// Retrieves an element by its logical index; 0 is the oldest element.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            unsafe { Some(self.buffer_get(self.wrap_add(self.read, index))) }
        } else {
            None
        }
    }

    /// Appends an element.
    ///
    /// A bounded store that already holds `max_size` elements rejects
    /// `value`: the discard counter is incremented and `value` is passed to
    /// the discard callback, leaving the stored elements untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringstore::CircularStore;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let rejected = Arc::new(Mutex::new(Vec::new()));
    /// let sink = rejected.clone();
    ///
    /// let mut store: CircularStore<i32> = CircularStore::new(2, Some(2));
    /// store.set_on_discard(move |v| sink.lock().unwrap().push(v));
    /// for i in 0..5 {
    ///     store.write(i);
    /// }
    /// assert_eq!(store.peek_all(), vec![0, 1]);
    /// assert_eq!(store.discards(), 3);
    /// assert_eq!(*rejected.lock().unwrap(), vec![2, 3, 4]);
    /// ```
    #[inline]
    pub fn write(&mut self, value: T) {
        self.insert(value, Overflow::Discard);
    }

    /// Appends an element, evicting the oldest one if a bounded store is at
    /// `max_size`. The evicted element is returned.
    ///
    /// Eviction is not counted in `discards()` and does not reach the discard
    /// callback.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringstore::CircularStore;
    ///
    /// let mut store = CircularStore::new_fixed(3);
    /// assert_eq!(store.overwrite(1), None);
    /// assert_eq!(store.overwrite(2), None);
    /// assert_eq!(store.overwrite(3), None);
    /// assert_eq!(store.overwrite(4), Some(1));
    /// assert_eq!(store.peek_all(), vec![2, 3, 4]);
    /// assert_eq!(store.discards(), 0);
    /// ```
    #[inline]
    pub fn overwrite(&mut self, value: T) -> Option<T> {
        self.insert(value, Overflow::Overwrite)
    }

    fn insert(&mut self, value: T, overflow: Overflow) -> Option<T> {
        let mut evicted = None;
        if self.max_size > 0 && self.len() >= self.max_size {
            match overflow {
                Overflow::Discard => {
                    self.discards += 1;
                    if let Some(on_discard) = self.on_discard.as_mut() {
                        on_discard(value);
                    }
                    return None;
                }
                Overflow::Overwrite => evicted = self.read().ok(),
            }
        }

        let write = self.write;
        unsafe { self.buffer_write(write, value) };
        self.write = self.wrap_add(write, 1);

        if self.write == self.read {
            self.grow();
        }
        evicted
    }

    /// Returns a front-to-back iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringstore::CircularStore;
    ///
    /// let store: CircularStore<_> = (1..4).collect();
    /// let doubled: Vec<i32> = store.iter().map(|v| v * 2).collect();
    /// assert_eq!(doubled, vec![2, 4, 6]);
    /// assert_eq!(store.iter().rev().next(), Some(&3));
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<T> {
        Iter {
            ring: &self.buf[..],
            read: self.read,
            write: self.write,
        }
    }

    /// Returns a pair of slices which contain, in order, the contents of the
    /// store. The second slice is empty unless the contents wrap around the
    /// end of the backing storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringstore::CircularStore;
    ///
    /// let mut store = CircularStore::new_unbounded(4);
    /// store.write(0);
    /// store.write(1);
    /// store.write(2);
    /// assert_eq!(store.as_slices(), (&[0, 1, 2][..], &[][..]));
    ///
    /// store.read().unwrap();
    /// store.read().unwrap();
    /// store.write(3);
    /// store.write(4);
    /// assert_eq!(store.as_slices(), (&[2, 3][..], &[4][..]));
    /// ```
    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        if self.read <= self.write {
            unsafe { (self.span(self.read, self.write), self.span(0, 0)) }
        } else {
            unsafe { (self.span(self.read, self.capacity()), self.span(0, self.write)) }
        }
    }

    /// Keeps only the `n` most recently written elements.
    ///
    /// `truncate(0)` is the same as `reset()`. Nothing happens if the store
    /// holds `n` elements or fewer. When the storage is more than twice as
    /// large as `n` it is replaced with one of `n + 1` slots, otherwise the
    /// oldest elements are dropped in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringstore::CircularStore;
    ///
    /// let mut store: CircularStore<_> = (0..10).collect();
    /// store.truncate(3);
    /// assert_eq!(store.peek_all(), vec![7, 8, 9]);
    /// assert_eq!(store.capacity(), 4);
    /// ```
    pub fn truncate(&mut self, n: usize) {
        if n == 0 {
            self.reset();
            return;
        }

        let len = self.len();
        if len <= n {
            return;
        }

        if self.capacity() > n * 2 {
            self.shrink_to_last(n);
        } else {
            self.drop_front(len - n);
        }
    }

    /// Returns the store to its just-constructed state: empty, with
    /// `initial_capacity()` slots.
    ///
    /// The discard counter and the discard callback are kept.
    pub fn reset(&mut self) {
        self.clear();
        self.buf = allocate(self.initial_capacity);
        self.read = 0;
        self.write = 0;
    }

    /// Drops every element, keeping the current storage.
    pub fn clear(&mut self) {
        let len = self.len();
        self.drop_front(len);
        self.read = 0;
        self.write = 0;
    }

    /// Changes the bound on the length and returns the resulting bound.
    ///
    /// `0` makes the store unbounded. A bound of at least `MIN_CAPACITY`
    /// truncates the store to that many elements right away. Values in
    /// between are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringstore::CircularStore;
    ///
    /// let mut store: CircularStore<_> = (0..10).collect();
    /// assert_eq!(store.set_max_size(1), None);
    /// assert_eq!(store.set_max_size(3), Some(3));
    /// assert_eq!(store.peek_all(), vec![7, 8, 9]);
    /// assert_eq!(store.set_max_size(0), None);
    /// ```
    pub fn set_max_size(&mut self, max_size: usize) -> Option<usize> {
        if max_size == 0 {
            self.max_size = 0;
        } else if max_size >= MIN_CAPACITY {
            self.max_size = max_size;
            self.truncate(max_size);
        }
        self.max_size()
    }

    /// Installs the callback receiving the elements rejected by `write`,
    /// replacing any previous one.
    ///
    /// The callback runs synchronously inside `write`.
    pub fn set_on_discard<F>(&mut self, on_discard: F)
        where F: FnMut(T) + Send + 'static
    {
        self.on_discard = Some(Box::new(on_discard));
    }

    /// Return the number of elements in the store.
    #[inline]
    pub fn len(&self) -> usize {
        count(self.read, self.write, self.capacity())
    }

    /// Returns true if the store contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read == self.write
    }

    /// Return the number of slots in the backing storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Return the number of slots restored by `reset`.
    #[inline]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Return the bound on the length, `None` if unbounded.
    #[inline]
    pub fn max_size(&self) -> Option<usize> {
        match self.max_size {
            0 => None,
            max_size => Some(max_size),
        }
    }

    /// Return how many elements `write` has rejected so far.
    #[inline]
    pub fn discards(&self) -> u64 {
        self.discards
    }
}

impl<T: Clone> CircularStore<T> {
    /// Copies every element, oldest first. Empty if the store is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringstore::CircularStore;
    ///
    /// let mut store = CircularStore::new(3, Some(4));
    /// store.write(1);
    /// for i in 0..10 {
    ///     store.write(i);
    /// }
    /// assert_eq!(store.peek_all(), vec![1, 0, 1, 2]);
    /// ```
    pub fn peek_all(&self) -> Vec<T> {
        let (tail, head) = self.as_slices();
        let mut all = Vec::with_capacity(tail.len() + head.len());
        all.extend_from_slice(tail);
        all.extend_from_slice(head);
        all
    }

    /// Copies the `n` oldest elements, or all of them if there are fewer.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringstore::CircularStore;
    ///
    /// let store: CircularStore<_> = (0..5).collect();
    /// assert_eq!(store.peek_first_n(3), vec![0, 1, 2]);
    /// assert_eq!(store.peek_first_n(9), vec![0, 1, 2, 3, 4]);
    /// assert!(store.peek_first_n(0).is_empty());
    /// ```
    pub fn peek_first_n(&self, n: usize) -> Vec<T> {
        self.iter().take(n).cloned().collect()
    }

    /// Copies the `n` newest elements, oldest first, or all of them if there
    /// are fewer.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringstore::CircularStore;
    ///
    /// let store: CircularStore<_> = (0..5).collect();
    /// assert_eq!(store.peek_last_n(3), vec![2, 3, 4]);
    /// assert_eq!(store.peek_last_n(9), vec![0, 1, 2, 3, 4]);
    /// ```
    pub fn peek_last_n(&self, n: usize) -> Vec<T> {
        let skip = self.len().saturating_sub(n);
        self.iter().skip(skip).cloned().collect()
    }
}
