/// Index into a cyclic sequence of `len` samples.
///
/// All arithmetic wraps modulo `len`, so callers never write `% len`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CyclicIndex {
    value: usize,
    len: usize,
}

impl CyclicIndex {
    /// Wraps `value` into `0..len`.
    ///
    /// # Panics
    /// Panics if `len` is zero.
    pub fn new(value: usize, len: usize) -> Self {
        assert!(len > 0, "cyclic index over an empty sequence");
        Self {
            value: value % len,
            len,
        }
    }

    pub const fn get(self) -> usize {
        self.value
    }

    /// Length of the underlying cycle.
    pub const fn period(self) -> usize {
        self.len
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn prev(self) -> Self {
        self.offset(-1)
    }

    /// Moves by `delta` samples in either direction.
    pub fn offset(self, delta: isize) -> Self {
        let len = self.len as isize;
        let wrapped = (self.value as isize + delta % len).rem_euclid(len);
        debug_assert!((0..len).contains(&wrapped));
        Self {
            value: wrapped as usize,
            len: self.len,
        }
    }

    /// Number of forward steps from `from` to `self`.
    pub fn forward_distance(self, from: Self) -> usize {
        debug_assert_eq!(self.len, from.len);
        (self.value + self.len - from.value) % self.len
    }

    /// Position as a fraction of the loop in `[0, 1)`.
    pub fn fraction(self) -> f32 {
        self.value as f32 / self.len as f32
    }
}
