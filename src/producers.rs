//! The collaborators a [`RoundRobin`](crate::RoundRobin) dispatches to.
//!
//! A [`Producers`] implementation represents a fixed set of indexed producers. The core only
//! ever probes, fetches and resets them by index; how they fetch, batch or buffer their data
//! is entirely up to them.
//!
//! All operations take `&self`: a producer set that's shared between threads is responsible
//! for its own synchronization.
mod iters;

pub use iters::IterProducers;

/// A fixed set of indexed producers.
///
/// Indices passed to these methods are always `< count()`.
pub trait Producers {
    /// Element produced by every producer
    type Item;
    /// Error raised by the producer operations. It reaches the caller of
    /// [`RoundRobin`](crate::RoundRobin) unchanged, wrapped in
    /// [`MergeError::Producer`](crate::MergeError::Producer).
    type Error;

    /// Number of producers in the set
    fn count(&self) -> usize;

    /// Non-consuming probe: does producer `index` have an item ready?
    ///
    /// Repeated probes should give the same answer, and once a producer reports `false` it should
    /// keep doing so until it's [`reset`](Producers::reset). Skipping exhausted producers under
    /// [`Relocate`](crate::InequalityHandling::Relocate) relies on that.
    fn has_next_for(&self, index: usize) -> Result<bool, Self::Error>;

    /// Consumes and returns one item from producer `index`.
    ///
    /// May be called on an exhausted producer under
    /// [`PassNull`](crate::InequalityHandling::PassNull) (and right after an unsuccessful
    /// [`Reset`](crate::InequalityHandling::Reset)); the producer decides what an empty item is.
    fn next_for(&self, index: usize) -> Result<Self::Item, Self::Error>;

    /// Rewinds producer `index` to its start.
    ///
    /// Called regardless of whether the producer can actually rewind. A producer that can't
    /// may do nothing or return an error.
    fn reset(&self, index: usize) -> Result<(), Self::Error>;
}

impl<P: Producers + ?Sized> Producers for &P {
    type Item = P::Item;
    type Error = P::Error;

    #[inline]
    fn count(&self) -> usize {
        (**self).count()
    }

    #[inline]
    fn has_next_for(&self, index: usize) -> Result<bool, Self::Error> {
        (**self).has_next_for(index)
    }

    #[inline]
    fn next_for(&self, index: usize) -> Result<Self::Item, Self::Error> {
        (**self).next_for(index)
    }

    #[inline]
    fn reset(&self, index: usize) -> Result<(), Self::Error> {
        (**self).reset(index)
    }
}
