use super::RoundRobin;
use crate::{
    error::BuildError,
    policy::{InequalityHandling, PolicySetting},
    producers::Producers,
};

/// Builder for [`RoundRobin`](crate::RoundRobin)
///
/// Nothing is validated about the policy here: an unset or unrecognized policy is carried into
/// the built iterator and reported by [`has_next`](crate::RoundRobin::has_next).
#[derive(Debug)]
pub struct Builder<P> {
    producers: P,
    policy: PolicySetting,
    num_producers: Option<usize>,
}

impl<P: Producers> Builder<P> {
    #[inline]
    pub(crate) fn new(producers: P) -> Self {
        Self {
            producers,
            policy: PolicySetting::Unset,
            num_producers: None,
        }
    }

    /// What to do when a producer runs out of items before the others
    #[inline]
    pub fn inequality_handling(mut self, policy: InequalityHandling) -> Self {
        self.policy = PolicySetting::Valid(policy);
        self
    }

    /// Same as [`inequality_handling`](Self::inequality_handling), but takes a raw configuration
    /// value such as `"RELOCATE"` or `"pass-null"`
    pub fn inequality_handling_name(mut self, name: &str) -> Self {
        self.policy = PolicySetting::from_name(name);
        if let PolicySetting::Unrecognized(raw) = &self.policy {
            tracing::warn!(value = %raw, "unrecognized inequality handling configured");
        }
        self
    }

    /// Only dispatch to the first `num_producers` producers.
    /// Defaults to [`Producers::count`].
    #[inline]
    pub fn num_producers(mut self, num_producers: usize) -> Self {
        self.num_producers = Some(num_producers);
        self
    }

    /// # Errors
    /// * [`BuildError::NoProducers`] if there's nothing to dispatch to
    /// * [`BuildError::TooManyProducers`] if [`num_producers`](Self::num_producers) exceeds
    ///   [`Producers::count`]
    pub fn build(self) -> Result<RoundRobin<P>, BuildError> {
        let available = self.producers.count();
        let num_producers = self.num_producers.unwrap_or(available);
        if num_producers == 0 {
            return Err(BuildError::NoProducers);
        }
        if num_producers > available {
            return Err(BuildError::TooManyProducers {
                requested: num_producers,
                available,
            });
        }
        tracing::debug!(num_producers, policy = ?self.policy, "building round-robin merge");
        Ok(RoundRobin::new(self.producers, num_producers, self.policy))
    }
}
