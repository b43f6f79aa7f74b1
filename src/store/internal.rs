use alloc::boxed::Box;
use core::mem::MaybeUninit;
use core::ptr;
use core::slice;

use super::CircularStore;
use crate::utils::*;

/// Allocates `capacity` uninitialized slots.
pub fn allocate<T>(capacity: usize) -> Box<[MaybeUninit<T>]> {
    (0..capacity).map(|_| MaybeUninit::uninit()).collect()
}

impl<T> CircularStore<T> {
    #[inline]
    pub(super) fn wrap_add(&self, index: usize, addend: usize) -> usize {
        wrap_add(index, addend, self.capacity())
    }

    #[inline]
    pub(super) fn wrap_sub(&self, index: usize, subtrahend: usize) -> usize {
        wrap_sub(index, subtrahend, self.capacity())
    }

    #[inline]
    fn ptr(&self) -> *const T {
        self.buf.as_ptr() as *const T
    }

    #[inline]
    fn ptr_mut(&mut self) -> *mut T {
        self.buf.as_mut_ptr() as *mut T
    }

    /// Moves the element out of `offset`. The slot counts as empty afterwards.
    #[inline]
    pub(super) unsafe fn buffer_read(&self, offset: usize) -> T {
        debug_assert!(offset < self.capacity());
        ptr::read(self.ptr().add(offset))
    }

    #[inline]
    pub(super) unsafe fn buffer_write(&mut self, offset: usize, element: T) {
        debug_assert!(offset < self.capacity());
        ptr::write(self.ptr_mut().add(offset), element);
    }

    #[inline]
    pub(super) unsafe fn buffer_get(&self, offset: usize) -> &T {
        debug_assert!(offset < self.capacity());
        &*self.ptr().add(offset)
    }

    /// Views the initialized slots `[start, end)`.
    #[inline]
    pub(super) unsafe fn span(&self, start: usize, end: usize) -> &[T] {
        debug_assert!(start <= end && end <= self.capacity(),
                      "span start={} end={} cap={}",
                      start,
                      end,
                      self.capacity());
        slice::from_raw_parts(self.ptr().add(start), end - start)
    }

    /// Drops the `count` oldest elements in place.
    ///
    /// The read cursor moves before each drop, so a panicking destructor
    /// leaks the remaining elements instead of dropping one twice.
    pub(super) fn drop_front(&mut self, count: usize) {
        debug_assert!(count <= self.len());
        for _ in 0..count {
            let read = self.read;
            self.read = self.wrap_add(read, 1);
            unsafe { ptr::drop_in_place(self.ptr_mut().add(read)) };
        }
    }

    /// Moves the contents to the front of `dst`, oldest first: the span from
    /// the read cursor to the end of the storage, then the span from the start
    /// of the storage up to the write cursor.
    ///
    /// The caller must forget the source slots afterwards.
    unsafe fn linearize_into(&self, dst: &mut [MaybeUninit<T>], len: usize) {
        let capacity = self.capacity();
        debug_assert!(len <= dst.len());
        let dst = dst.as_mut_ptr() as *mut T;

        let tail_len = if self.read + len > capacity { capacity - self.read } else { len };
        ptr::copy_nonoverlapping(self.ptr().add(self.read), dst, tail_len);
        ptr::copy_nonoverlapping(self.ptr(), dst.add(tail_len), len - tail_len);
    }

    /// Reallocates a store whose write cursor has just caught up with its
    /// read cursor. Every slot holds an element at that point.
    pub(super) fn grow(&mut self) {
        debug_assert!(self.read == self.write,
                      "grow r={} w={} cap={}",
                      self.read,
                      self.write,
                      self.capacity());
        let old_capacity = self.capacity();
        let mut buf = allocate(grown_capacity(old_capacity));
        unsafe { self.linearize_into(&mut buf, old_capacity) };

        // The old slots are `MaybeUninit`, so dropping them drops no element.
        self.buf = buf;
        self.read = 0;
        self.write = old_capacity;
    }

    /// Keeps the `n` newest elements in fresh storage of `n + 1` slots.
    pub(super) fn shrink_to_last(&mut self, n: usize) {
        let len = self.len();
        debug_assert!(n < len);
        self.drop_front(len - n);

        let mut buf = allocate(n + 1);
        unsafe { self.linearize_into(&mut buf, n) };

        self.buf = buf;
        self.read = 0;
        self.write = n;
    }
}
