use alloc::{boxed::Box, vec::Vec};
use core::{
    fmt,
    sync::atomic::{AtomicBool, Ordering::SeqCst},
};

/// Fixed-length vector of flags, one per producer.
///
/// The aggregate predicates scan the whole vector every time they're called, so they report
/// the values as they are at the moment of the call.
pub struct StateVector {
    flags: Box<[AtomicBool]>,
}

impl StateVector {
    /// Creates a vector of `len` flags, all set to `value`
    pub fn filled(len: usize, value: bool) -> Self {
        Self {
            flags: (0..len).map(|_| AtomicBool::new(value)).collect(),
        }
    }

    /// Number of flags
    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns true if there are no flags at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// # Panics
    /// If `index >= len()`
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.flags[index].load(SeqCst)
    }

    /// # Panics
    /// If `index >= len()`
    #[inline]
    pub fn set(&self, index: usize, value: bool) {
        self.flags[index].store(value, SeqCst);
    }

    /// Returns true if every flag is set. Vacuously true for an empty vector.
    pub fn all_true(&self) -> bool {
        self.flags.iter().all(|flag| flag.load(SeqCst))
    }

    /// Returns true if no flag is set. Vacuously true for an empty vector.
    pub fn all_false(&self) -> bool {
        !self.flags.iter().any(|flag| flag.load(SeqCst))
    }

    /// Snapshot of all flags
    pub fn to_vec(&self) -> Vec<bool> {
        self.flags.iter().map(|flag| flag.load(SeqCst)).collect()
    }
}

impl fmt::Debug for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.flags.iter().map(|flag| flag.load(SeqCst)))
            .finish()
    }
}
