//! A growable circular buffer with an optional bound on its length.
//!
//! `CircularStore` keeps its elements in one contiguous ring and tracks a
//! read cursor and a write cursor into it. When the ring is about to fill up
//! it is reallocated with the elements laid out again oldest first, so an
//! unbounded store is never full.
//!
//! Given a maximum size the store stops growing at that many elements, and
//! then either rejects new elements (`write`) or evicts the oldest ones
//! (`overwrite`). Rejections are counted and can be observed through a
//! callback.
//!
//! Reading takes from the front (`read`, FIFO) or from the back (`pop_back`,
//! LIFO). Every read-side operation returns `Err(EmptyError)` on an empty
//! store.
//!
//! The store is not synchronized. Callers that share it between threads wrap
//! it in a lock.
//!
//! # Feature Flags
//! The **ringstore** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd; `EmptyError` implements `std::error::Error`
//!   - Without it the crate is `no_std` and only requires `alloc`
//!
//! # Usage
//!
//! First, add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ringstore = "0.1"
//! ```
//!
//! # Capacity
//!
//! Note that `capacity()` is the number of slots in the backing storage, and
//! that one slot always stays free: `len()` is always less than
//! `capacity()`.
//!
//! # Examples
//! ```
//! use ringstore::CircularStore;
//!
//! let mut store = CircularStore::new(10, Some(20));
//! assert_eq!(store.set_max_size(5), Some(5));
//!
//! store.write("A".to_string());
//! assert_eq!(store.len(), 1);
//! assert_eq!(store.read().unwrap(), "A");
//!
//! for i in 0..10 {
//!     store.write(i.to_string());
//! }
//! assert_eq!(store.discards(), 5);
//!
//! assert_eq!(store.peek_back().unwrap(), "4");
//! assert_eq!(store.pop_back().unwrap(), "4");
//! assert_eq!(store.peek_all(), vec!["0", "1", "2", "3"]);
//! assert_eq!(store.peek_last_n(3), vec!["1", "2", "3"]);
//!
//! store.reset();
//! assert!(store.is_empty());
//! assert_eq!(store.capacity(), 10);
//! ```
//!
//! # Overwrite
//! ```
//! use ringstore::CircularStore;
//!
//! let mut history = CircularStore::new_fixed(3);
//! for sample in 0..10 {
//!     history.overwrite(sample);
//! }
//! assert_eq!(history.peek_all(), vec![7, 8, 9]);
//! ```
//!
//! # Iterator
//! ```
//! use ringstore::CircularStore;
//!
//! let mut store = CircularStore::new_unbounded(4);
//! store.extend(0..5);
//!
//! assert_eq!(format!("{:?}", store), "[0, 1, 2, 3, 4]");
//!
//! let values: Vec<_> = store.into_iter().collect();
//! assert_eq!(values, vec![0, 1, 2, 3, 4]);
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]

extern crate alloc;

mod behavior;
mod store;
mod utils;
pub mod error;

pub use error::EmptyError;
pub use store::{CircularStore, DiscardFn, IntoIter, Iter};

/// Smallest storage size, and smallest accepted bound, of a `CircularStore`.
pub const MIN_CAPACITY: usize = 2;
