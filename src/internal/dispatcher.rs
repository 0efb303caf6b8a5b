use core::sync::atomic::{AtomicU64, Ordering::SeqCst};

/// Round-robin dispatcher.
///
/// Holds a counter that only ever goes up; the active producer index is derived from it.
/// A `u64` counter does not overflow in any realistic run, and since
/// `counter % num_producers` is unchanged by subtracting multiples of `num_producers`, it could
/// be re-based without affecting dispatch if that ever becomes necessary.
#[derive(Debug)]
pub struct Dispatcher {
    counter: AtomicU64,
    num_producers: u64,
}

impl Dispatcher {
    /// # Panics
    /// If `num_producers == 0`
    pub fn new(num_producers: usize) -> Self {
        assert!(num_producers != 0, "dispatcher needs at least one producer");
        Self {
            counter: AtomicU64::new(0),
            num_producers: num_producers as u64,
        }
    }

    /// Index of the currently active producer, always in `0..num_producers`
    #[inline]
    pub fn current_index(&self) -> usize {
        // the result is < num_producers, which came from a usize
        (self.counter.load(SeqCst) % self.num_producers) as usize
    }

    /// Moves to the next producer. This is the only way the counter changes.
    #[inline]
    pub fn advance(&self) {
        self.counter.fetch_add(1, SeqCst);
    }

    /// Number of steps taken so far
    #[inline]
    pub fn counter(&self) -> u64 {
        self.counter.load(SeqCst)
    }

    #[inline]
    pub fn num_producers(&self) -> usize {
        self.num_producers as usize
    }
}
