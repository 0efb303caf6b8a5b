//! Implementation of [`RoundRobin`]

use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::{
    error::MergeError,
    internal::{DepletionLatch, Dispatcher, Liveness, StateVector},
    policy::{InequalityHandling, PolicySetting},
    producers::Producers,
};

mod builder;
pub use builder::Builder;

/// Result of [`RoundRobin`] operations
pub type MergeResult<T, P> = Result<T, MergeError<<P as Producers>::Error>>;

/// Round-robin merge over a fixed set of producers.
///
/// Producers are visited cyclically, `0, 1, ..., n - 1, 0, 1, ...`, one item at a time. What
/// happens once some producer runs out of items before the others is decided by the configured
/// [`InequalityHandling`].
///
/// The low-level protocol is [`has_next`](Self::has_next) followed by
/// [`next_item`](Self::next_item). [`RoundRobin`] is also an [`Iterator`] over
/// `Result<item, error>`, which does the pairing for you.
///
/// All the bookkeeping is atomic, so a `RoundRobin` over [`Sync`] producers may be shared
/// between threads. However, a `has_next`/`next_item` pair is *not* atomic as a whole: another
/// thread may advance the dispatcher in between, and the item fetched may come from a different
/// producer than the one probed. Drive it from a single consumer.
#[derive(Debug)]
pub struct RoundRobin<P> {
    producers: P,
    policy: PolicySetting,
    dispatcher: Dispatcher,
    /// Producer still has data, as of its last probe
    states: StateVector,
    /// Producer was reset during the current depletion cycle
    reset_tracker: StateVector,
    depletion: DepletionLatch,
    /// Set once the [`Iterator`] impl yielded `None` or an error
    fused: bool,
}

impl<P: Producers> RoundRobin<P> {
    /// Starts configuring a [`RoundRobin`] over `producers`
    #[inline]
    pub fn builder(producers: P) -> Builder<P> {
        Builder::new(producers)
    }

    pub(crate) fn new(producers: P, num_producers: usize, policy: PolicySetting) -> Self {
        Self {
            producers,
            policy,
            dispatcher: Dispatcher::new(num_producers),
            states: StateVector::filled(num_producers, true),
            reset_tracker: StateVector::filled(num_producers, false),
            depletion: DepletionLatch::new(),
            fused: false,
        }
    }

    /// Returns true if [`next_item`](Self::next_item) has something to return.
    ///
    /// Probes the active producer. If it has an item, this returns true without advancing,
    /// the next call to `next_item` will take it. Otherwise the outcome depends on the
    /// [`InequalityHandling`]:
    /// * [`Reset`](InequalityHandling::Reset): the producer is rewound and this returns true
    ///   optimistically. Once every producer has run dry at least once, the iterator is depleted
    ///   for good.
    /// * [`Relocate`](InequalityHandling::Relocate): advances to the next producer with data.
    /// * [`PassNull`](InequalityHandling::PassNull): returns true, `next_item` will ask the
    ///   exhausted producer for an item anyway.
    /// * [`StopEveryone`](InequalityHandling::StopEveryone): returns false.
    ///
    /// Regardless of the policy, returns false once every producer has reported exhaustion.
    ///
    /// # Errors
    /// * [`MergeError::InvalidPolicy`] if no valid policy was configured. Reported before any
    ///   producer is touched, on every call.
    /// * [`MergeError::Producer`] if a producer operation fails.
    pub fn has_next(&self) -> MergeResult<bool, P> {
        let policy = self.policy.validate().map_err(MergeError::InvalidPolicy)?;

        if self.depletion.is_depleted() || self.states.all_false() {
            return Ok(false);
        }

        let index = self.dispatcher.current_index();
        let has_next = self.probe(index)?;

        if self.states.all_false() {
            tracing::debug!(index, "all producers are exhausted");
            return Ok(false);
        }
        if has_next {
            return Ok(true);
        }

        match policy {
            InequalityHandling::Reset => self.reset_exhausted(index),
            InequalityHandling::Relocate => self.relocate(),
            InequalityHandling::PassNull => {
                tracing::trace!(index, "passing exhausted producer through");
                Ok(true)
            }
            InequalityHandling::StopEveryone => {
                let all_live = self.states.all_true();
                if !all_live {
                    tracing::debug!(index, "producer exhausted, stopping everyone");
                }
                Ok(all_live)
            }
        }
    }

    /// Takes an item from the active producer and advances to the next one.
    ///
    /// This does no exhaustion checks of its own. Call it only after [`has_next`](Self::has_next)
    /// returned true; what's returned otherwise is up to the producer.
    ///
    /// # Errors
    /// [`MergeError::Producer`] if fetching fails. The dispatcher doesn't advance in that case.
    pub fn next_item(&self) -> MergeResult<P::Item, P> {
        let item = self
            .producers
            .next_for(self.dispatcher.current_index())
            .map_err(MergeError::Producer)?;
        self.dispatcher.advance();
        Ok(item)
    }

    /// Probes producer `index` and records the answer
    fn probe(&self, index: usize) -> MergeResult<bool, P> {
        let has_next = self
            .producers
            .has_next_for(index)
            .map_err(MergeError::Producer)?;
        tracing::trace!(index, has_next, "probed producer");
        self.states.set(index, has_next);
        Ok(has_next)
    }

    fn reset_exhausted(&self, index: usize) -> MergeResult<bool, P> {
        self.reset_tracker.set(index, true);

        // every producer ran dry during this cycle, stop instead of rewinding forever
        if self.reset_tracker.all_true() {
            tracing::debug!(index, "every producer ran dry, depleting");
            self.depletion.trip();
            return Ok(false);
        }

        tracing::debug!(index, "resetting exhausted producer");
        self.producers.reset(index).map_err(MergeError::Producer)?;
        // priming probe, the producer may initialize lazily. The answer is ignored.
        self.producers
            .has_next_for(index)
            .map_err(MergeError::Producer)?;
        Ok(true)
    }

    fn relocate(&self) -> MergeResult<bool, P> {
        // Probes every producer at most once and records each answer, so if none has data
        // `all_false` returns first. Only a concurrent writer to `states` can exhaust the steps.
        for _ in 0..self.dispatcher.num_producers() {
            self.dispatcher.advance();
            let index = self.dispatcher.current_index();
            let has_next = self.probe(index)?;
            if self.states.all_false() {
                tracing::debug!(index, "all producers are exhausted");
                return Ok(false);
            }
            if has_next {
                tracing::debug!(index, "relocated to producer");
                return Ok(true);
            }
        }
        tracing::warn!(
            num_producers = self.dispatcher.num_producers(),
            "no producer with data found after a full cycle, producer states changed concurrently"
        );
        Ok(false)
    }

    /// Index of the producer the next probe or fetch goes to
    #[inline]
    pub fn current_index(&self) -> usize {
        self.dispatcher.current_index()
    }

    /// Number of dispatch steps taken so far. Never decreases.
    #[inline]
    pub fn counter(&self) -> u64 {
        self.dispatcher.counter()
    }

    #[inline]
    pub fn num_producers(&self) -> usize {
        self.dispatcher.num_producers()
    }

    /// Returns true once the iterator is permanently finished under
    /// [`Reset`](InequalityHandling::Reset)
    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.depletion.is_depleted()
    }

    #[inline]
    pub fn liveness(&self) -> Liveness {
        self.depletion.state()
    }

    /// The configured policy, as it was configured
    #[inline]
    pub fn policy(&self) -> &PolicySetting {
        &self.policy
    }

    /// Last known state of every producer: `true` if it had data when it was last probed
    pub fn producer_states(&self) -> Vec<bool> {
        self.states.to_vec()
    }

    #[inline]
    pub fn producers(&self) -> &P {
        &self.producers
    }

    #[inline]
    pub fn into_producers(self) -> P {
        self.producers
    }

    /// Drains the iterator into a [`Vec`], stopping at the first error
    ///
    /// # Examples
    ///
    /// ```
    /// use round_robin_merge::{round_robin, InequalityHandling};
    ///
    /// let v = round_robin([vec![1, 2], vec![3, 4, 5]], InequalityHandling::StopEveryone)?
    ///     .into_vec()?;
    /// assert_eq!(v, vec![Some(1), Some(3), Some(2), Some(4)]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn into_vec(self) -> MergeResult<Vec<P::Item>, P> {
        self.collect()
    }
}

impl<P: Producers> Iterator for RoundRobin<P> {
    type Item = MergeResult<P::Item, P>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        let res = match self.has_next() {
            Ok(true) => self.next_item(),
            Ok(false) => {
                self.fused = true;
                return None;
            }
            Err(e) => Err(e),
        };
        if res.is_err() {
            self.fused = true;
        }
        Some(res)
    }
}

// Fused: after the first `None` or error the flag short-circuits every call
impl<P: Producers> FusedIterator for RoundRobin<P> {}

#[cfg(test)]
mod tests {
    use alloc::{format, string::ToString, vec, vec::Vec};
    use core::cell::{Cell, RefCell};

    use super::*;
    use crate::{producers::IterProducers, round_robin};

    fn lengths_2_3() -> IterProducers<Vec<(usize, usize)>> {
        IterProducers::from_iter([vec![(0, 0), (0, 1)], vec![(1, 0), (1, 1), (1, 2)]])
    }

    fn drain<P: Producers>(rr: &RoundRobin<P>) -> Vec<P::Item>
    where
        P::Error: core::fmt::Debug,
    {
        let mut out = Vec::new();
        while rr.has_next().unwrap() {
            out.push(rr.next_item().unwrap());
        }
        out
    }

    #[test]
    fn stop_everyone() {
        let rr = RoundRobin::builder(lengths_2_3())
            .inequality_handling(InequalityHandling::StopEveryone)
            .build()
            .unwrap();
        assert_eq!(
            drain(&rr),
            [(0, 0), (1, 0), (0, 1), (1, 1)].map(Some).to_vec()
        );
        assert!(!rr.has_next().unwrap());
        assert!(!rr.is_depleted());
    }

    #[test]
    fn relocate() {
        let rr = RoundRobin::builder(lengths_2_3())
            .inequality_handling(InequalityHandling::Relocate)
            .build()
            .unwrap();
        assert_eq!(
            drain(&rr),
            [(0, 0), (1, 0), (0, 1), (1, 1), (1, 2)].map(Some).to_vec()
        );
        assert!(!rr.has_next().unwrap());
        assert_eq!(rr.producer_states(), vec![false, false]);
    }

    #[test]
    fn pass_null() {
        let rr = RoundRobin::builder(lengths_2_3())
            .inequality_handling(InequalityHandling::PassNull)
            .build()
            .unwrap();
        assert_eq!(
            drain(&rr),
            vec![
                Some((0, 0)),
                Some((1, 0)),
                Some((0, 1)),
                Some((1, 1)),
                None,
                Some((1, 2)),
                None,
            ]
        );
    }

    #[test]
    fn reset() {
        let rr = RoundRobin::builder(lengths_2_3())
            .inequality_handling(InequalityHandling::Reset)
            .build()
            .unwrap();
        assert_eq!(
            drain(&rr),
            [(0, 0), (1, 0), (0, 1), (1, 1), (0, 0), (1, 2), (0, 1)]
                .map(Some)
                .to_vec()
        );
        assert!(rr.is_depleted());
        assert_eq!(rr.liveness(), Liveness::Depleted);
        // the longer producer was never rewound, the cycle ended at its first exhaustion
        assert_eq!(rr.producers().reset_count(0), 1);
        assert_eq!(rr.producers().reset_count(1), 0);
    }

    #[test]
    fn depletion_is_sticky() {
        let rr = RoundRobin::builder(lengths_2_3())
            .inequality_handling(InequalityHandling::Reset)
            .build()
            .unwrap();
        drain(&rr);
        // rewinding the producers from the outside changes nothing
        rr.producers().reset(0).unwrap();
        rr.producers().reset(1).unwrap();
        let counter = rr.counter();
        for _ in 0..3 {
            assert!(!rr.has_next().unwrap());
        }
        assert_eq!(rr.counter(), counter);
    }

    #[test]
    fn has_next_does_not_advance_on_live_producer() {
        let rr = RoundRobin::builder(lengths_2_3())
            .inequality_handling(InequalityHandling::Relocate)
            .build()
            .unwrap();
        assert!(rr.has_next().unwrap());
        assert!(rr.has_next().unwrap());
        assert_eq!(rr.counter(), 0);
        assert_eq!(rr.next_item().unwrap(), Some((0, 0)));
        assert_eq!(rr.counter(), 1);
        assert_eq!(rr.current_index(), 1);
    }

    /// Producers that record every call and report nothing
    #[derive(Default)]
    struct Recording {
        calls: RefCell<Vec<&'static str>>,
    }

    impl Producers for Recording {
        type Item = ();
        type Error = &'static str;

        fn count(&self) -> usize {
            2
        }
        fn has_next_for(&self, _: usize) -> Result<bool, Self::Error> {
            self.calls.borrow_mut().push("has_next_for");
            Ok(false)
        }
        fn next_for(&self, _: usize) -> Result<(), Self::Error> {
            self.calls.borrow_mut().push("next_for");
            Ok(())
        }
        fn reset(&self, _: usize) -> Result<(), Self::Error> {
            self.calls.borrow_mut().push("reset");
            Ok(())
        }
    }

    #[test]
    fn invalid_policy_fails_before_probing() {
        let rr = RoundRobin::builder(Recording::default())
            .inequality_handling_name("SHUFFLE")
            .build()
            .unwrap();
        assert_eq!(
            rr.has_next(),
            Err(MergeError::InvalidPolicy("SHUFFLE".to_string()))
        );
        assert_eq!(
            rr.has_next(),
            Err(MergeError::InvalidPolicy("SHUFFLE".to_string()))
        );
        assert!(rr.producers().calls.borrow().is_empty());
    }

    #[test]
    fn unset_policy_is_invalid() {
        let rr = RoundRobin::builder(Recording::default()).build().unwrap();
        let err = rr.has_next().unwrap_err();
        assert!(format!("{err}").contains("<unset>"));
    }

    #[test]
    fn reset_primes_after_rewinding() {
        let rr = RoundRobin::builder(Recording::default())
            .inequality_handling(InequalityHandling::Reset)
            .build()
            .unwrap();
        assert!(rr.has_next().unwrap());
        assert_eq!(
            *rr.producers().calls.borrow(),
            ["has_next_for", "reset", "has_next_for"]
        );
    }

    /// Fails the `fail_at`-th call to any operation
    struct Failing {
        calls: Cell<usize>,
        fail_at: usize,
    }

    impl Failing {
        fn tick(&self) -> Result<(), &'static str> {
            let n = self.calls.get();
            self.calls.set(n + 1);
            if n == self.fail_at {
                Err("producer failed")
            } else {
                Ok(())
            }
        }
    }

    impl Producers for Failing {
        type Item = usize;
        type Error = &'static str;

        fn count(&self) -> usize {
            3
        }
        fn has_next_for(&self, _: usize) -> Result<bool, Self::Error> {
            self.tick().map(|()| true)
        }
        fn next_for(&self, index: usize) -> Result<usize, Self::Error> {
            self.tick().map(|()| index)
        }
        fn reset(&self, _: usize) -> Result<(), Self::Error> {
            self.tick()
        }
    }

    #[test]
    fn producer_errors_pass_through() {
        let rr = RoundRobin::builder(Failing {
            calls: Cell::new(0),
            fail_at: 3,
        })
        .inequality_handling(InequalityHandling::Relocate)
        .build()
        .unwrap();
        assert_eq!(rr.has_next(), Ok(true));
        assert_eq!(rr.next_item(), Ok(0));
        assert_eq!(rr.has_next(), Ok(true));
        assert_eq!(rr.next_item(), Err(MergeError::Producer("producer failed")));
        // failed fetch doesn't advance
        assert_eq!(rr.current_index(), 1);
    }

    #[test]
    fn iterator_fuses_on_error() {
        let mut rr = RoundRobin::builder(Failing {
            calls: Cell::new(0),
            fail_at: 2,
        })
        .inequality_handling(InequalityHandling::PassNull)
        .build()
        .unwrap();
        assert_eq!(rr.next(), Some(Ok(0)));
        assert_eq!(rr.next(), Some(Err(MergeError::Producer("producer failed"))));
        assert_eq!(rr.next(), None);
        assert_eq!(rr.next(), None);
    }

    #[test]
    fn iterator_fuses_on_end() {
        let mut rr = round_robin([[1]], InequalityHandling::Relocate).unwrap();
        assert_eq!(rr.next(), Some(Ok(Some(1))));
        assert_eq!(rr.next(), None);
        rr.producers().reset(0).unwrap();
        assert_eq!(rr.next(), None);
    }

    #[test]
    fn single_producer() {
        for policy in InequalityHandling::ALL {
            let rr = round_robin([[1, 2, 3]], policy).unwrap();
            assert_eq!(rr.into_vec().unwrap(), vec![Some(1), Some(2), Some(3)]);
        }
    }

    #[test]
    fn debug_formatter() {
        let rr = round_robin([[31415]], InequalityHandling::Relocate).unwrap();
        let s = format!("{rr:?}");
        assert!(s.contains("31415"));
        assert!(s.contains("Relocate"));
    }
}
