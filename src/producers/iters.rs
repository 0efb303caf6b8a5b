use alloc::vec::Vec;
use core::{
    cell::{Cell, RefCell},
    convert::Infallible,
    fmt,
    iter::Peekable,
};

use super::Producers;

struct Slot<S: IntoIterator> {
    source: S,
    iter: RefCell<Peekable<S::IntoIter>>,
    resets: Cell<usize>,
}

impl<S> Slot<S>
where
    S: IntoIterator + Clone,
{
    fn new(source: S) -> Self {
        let iter = RefCell::new(source.clone().into_iter().peekable());
        Self {
            source,
            iter,
            resets: Cell::new(0),
        }
    }
}

/// [`Producers`] over plain iterators.
///
/// Each producer is built from a cloneable source (a `Vec`, a slice, a range...). Probing peeks
/// at the next item, fetching yields `Some(item)`, or `None` if the producer is exhausted.
/// Resetting re-creates the iterator from a fresh clone of its source.
///
/// It is not [`Sync`], so it can only be driven from a single thread.
///
/// # Examples
///
/// ```
/// use round_robin_merge::{InequalityHandling, IterProducers, RoundRobin};
///
/// let producers = IterProducers::from_iter([vec![1, 2], vec![10, 20, 30]]);
/// let merged = RoundRobin::builder(producers)
///     .inequality_handling(InequalityHandling::Relocate)
///     .build()?
///     .into_vec()?;
/// assert_eq!(merged, vec![Some(1), Some(10), Some(2), Some(20), Some(30)]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct IterProducers<S: IntoIterator> {
    slots: Vec<Slot<S>>,
}

impl<S> IterProducers<S>
where
    S: IntoIterator + Clone,
{
    pub fn new(sources: impl IntoIterator<Item = S>) -> Self {
        Self {
            slots: sources.into_iter().map(Slot::new).collect(),
        }
    }

    /// Adds another producer at the end
    pub fn push(&mut self, source: S) {
        self.slots.push(Slot::new(source));
    }

    /// How many times producer `index` was reset
    ///
    /// # Panics
    /// If `index >= count()`
    pub fn reset_count(&self, index: usize) -> usize {
        self.slots[index].resets.get()
    }
}

impl<S> FromIterator<S> for IterProducers<S>
where
    S: IntoIterator + Clone,
{
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<S> Producers for IterProducers<S>
where
    S: IntoIterator + Clone,
{
    type Item = Option<S::Item>;
    type Error = Infallible;

    #[inline]
    fn count(&self) -> usize {
        self.slots.len()
    }

    fn has_next_for(&self, index: usize) -> Result<bool, Self::Error> {
        Ok(self.slots[index].iter.borrow_mut().peek().is_some())
    }

    fn next_for(&self, index: usize) -> Result<Self::Item, Self::Error> {
        Ok(self.slots[index].iter.borrow_mut().next())
    }

    fn reset(&self, index: usize) -> Result<(), Self::Error> {
        let slot = &self.slots[index];
        *slot.iter.borrow_mut() = slot.source.clone().into_iter().peekable();
        slot.resets.set(slot.resets.get() + 1);
        Ok(())
    }
}

impl<S> fmt::Debug for IterProducers<S>
where
    S: IntoIterator + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.slots.iter().map(|slot| &slot.source))
            .finish()
    }
}
