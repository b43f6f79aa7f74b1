//! Overflow semantics for `CircularStore`.

/// What happens when an element arrives at a store that has reached its
/// `max_size`. An unbounded store never overflows; it grows instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Overflow {
    /// Used by `write`.
    ///
    /// The **incoming** element is rejected, **without performing any
    /// mutation** of the stored elements. The discard counter is bumped and
    /// the element is handed to the discard callback, if any.
    Discard,
    /// Used by `overwrite`.
    ///
    /// The **oldest** stored element is evicted from the **front** to make
    /// room. Eviction is silent: no counter, no callback.
    Overwrite,
}
