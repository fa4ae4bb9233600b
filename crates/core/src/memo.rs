//! Compute-once cells for lazily materialized projection data.

use once_cell::race::OnceBox;
use std::fmt;

/// A slot computed on first access and never recomputed.
///
/// Concurrent first accesses may each run the computation; exactly one result is
/// published and every caller observes that one. Computations must therefore be
/// free of side effects.
pub struct Memo<T> {
    slot: OnceBox<T>,
}

impl<T> Memo<T> {
    pub const fn new() -> Self {
        Self {
            slot: OnceBox::new(),
        }
    }

    pub fn get_or_compute<F>(&self, compute: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.slot.get_or_init(|| Box::new(compute()))
    }

    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    pub fn is_computed(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("Memo").field(value).finish(),
            None => f.write_str("Memo(<pending>)"),
        }
    }
}
