//! Building blocks of the round-robin core.
//!
//! Typically you shouldn't need to touch these types, unless you're writing your own
//! dispatch loop on top of them.
//!
//! All three of them are mutated through shared references:
//! * [`StateVector`] is a fixed-length vector of atomic flags. [`RoundRobin`](crate::RoundRobin)
//!   keeps two of them: whether each producer still has data, and whether each producer was
//!   already reset during the current depletion cycle.
//! * [`Dispatcher`] owns the monotonically increasing counter. The active producer is always
//!   `counter % num_producers`, there's no separate index to keep in sync.
//! * [`DepletionLatch`] is the one-way `Active -> Depleted` switch.
//!
//! Every individual operation is atomic, but nothing here makes a *sequence* of operations
//! atomic. A probe followed by an advance may interleave with another thread doing the same.
mod dispatcher;
mod latch;
mod state_vector;

pub use dispatcher::Dispatcher;
pub use latch::{DepletionLatch, Liveness};
pub use state_vector::StateVector;
