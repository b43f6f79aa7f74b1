/// Capacity at which growth switches from doubling to 25% steps.
const DOUBLING_LIMIT: usize = 1024;

#[inline]
pub fn wrap_add(index: usize, addend: usize, capacity: usize) -> usize {
    debug_assert!(addend <= capacity);
    (index + addend) % capacity
}

#[inline]
pub fn wrap_sub(index: usize, subtrahend: usize, capacity: usize) -> usize {
    debug_assert!(subtrahend <= capacity);
    (index + capacity - subtrahend) % capacity
}

/// Number of elements between the read and write cursors.
#[inline]
pub fn count(read: usize, write: usize, capacity: usize) -> usize {
    debug_assert!(write < capacity);
    debug_assert!(read < capacity);
    if write >= read {
        write - read
    } else {
        capacity + write - read
    }
}

#[inline]
pub fn grown_capacity(capacity: usize) -> usize {
    if capacity < DOUBLING_LIMIT {
        capacity * 2
    } else {
        capacity + capacity / 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_wraps() {
        assert_eq!(count(0, 0, 4), 0);
        assert_eq!(count(1, 3, 4), 2);
        assert_eq!(count(3, 1, 4), 2);
        assert_eq!(count(2, 1, 4), 3);
    }

    #[test]
    fn wrap_at_edges() {
        assert_eq!(wrap_add(3, 1, 4), 0);
        assert_eq!(wrap_sub(0, 1, 4), 3);
        assert_eq!(wrap_sub(5 % 6, 5, 6), 0);
    }

    #[test]
    fn growth_schedule() {
        assert_eq!(grown_capacity(2), 4);
        assert_eq!(grown_capacity(10), 20);
        assert_eq!(grown_capacity(1023), 2046);
        assert_eq!(grown_capacity(1024), 1280);
        assert_eq!(grown_capacity(1280), 1600);
    }
}
