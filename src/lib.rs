//! Round-robin merging of unequal-length producers.
//!
//! This crate provides [`RoundRobin`], which visits a fixed set of producers cyclically
//! (`0, 1, ..., n - 1, 0, 1, ...`), taking one item from each, and a policy,
//! [`InequalityHandling`], deciding what happens once some producers run out of items before the
//! others. It's `no_std`, but requires `alloc`.
//!
//! # Quick start
//!
//! ```
//! use round_robin_merge::{round_robin, InequalityHandling};
//!
//! let a = vec![1, 3, 5];
//! let b = vec![2, 4, 6];
//! let merged = round_robin([a, b], InequalityHandling::StopEveryone)?.into_vec()?;
//! assert_eq!(merged, [1, 2, 3, 4, 5, 6].map(Some));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Policies
//!
//! With producers `[a0, a1]` and `[b0, b1, b2]`:
//!
//! | Policy | Yields |
//! |---|---|
//! | [`StopEveryone`](InequalityHandling::StopEveryone) | `a0, b0, a1, b1` |
//! | [`Relocate`](InequalityHandling::Relocate) | `a0, b0, a1, b1, b2` |
//! | [`PassNull`](InequalityHandling::PassNull) | `a0, b0, a1, b1, <empty>, b2, <empty>` |
//! | [`Reset`](InequalityHandling::Reset) | `a0, b0, a1, b1, a0, b2, a1` |
//!
//! Under `Reset` the sequence ends for good once every producer has run dry at least once,
//! so it never loops forever.
//!
//! ```
//! use round_robin_merge::{round_robin, InequalityHandling};
//!
//! let merged = round_robin([vec!['a'], vec!['b', 'c']], InequalityHandling::PassNull)?
//!     .into_vec()?;
//! assert_eq!(merged, vec![Some('a'), Some('b'), None, Some('c'), None]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Custom producers
//!
//! Implement [`Producers`] to dispatch over anything that can be probed, fetched from and
//! rewound by index. Errors from your producers reach the caller unchanged, as
//! [`MergeError::Producer`].
//!
//! ```
//! use round_robin_merge::{InequalityHandling, Producers, RoundRobin};
//!
//! /// Producer `i` counts down from `i`
//! struct Countdowns(Vec<std::cell::Cell<u32>>);
//!
//! impl Producers for Countdowns {
//!     type Item = u32;
//!     type Error = std::convert::Infallible;
//!
//!     fn count(&self) -> usize {
//!         self.0.len()
//!     }
//!     fn has_next_for(&self, index: usize) -> Result<bool, Self::Error> {
//!         Ok(self.0[index].get() > 0)
//!     }
//!     fn next_for(&self, index: usize) -> Result<u32, Self::Error> {
//!         let left = self.0[index].get();
//!         self.0[index].set(left - 1);
//!         Ok(left)
//!     }
//!     fn reset(&self, index: usize) -> Result<(), Self::Error> {
//!         self.0[index].set(index as u32);
//!         Ok(())
//!     }
//! }
//!
//! let producers = Countdowns((0..4).map(std::cell::Cell::new).collect());
//! let rr = RoundRobin::builder(producers)
//!     .inequality_handling_name("RELOCATE")
//!     .build()?;
//! assert_eq!(rr.into_vec()?, vec![1, 2, 3, 1, 2, 1]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Configuration errors
//!
//! A missing or unrecognized policy isn't rejected when building; instead every call to
//! [`RoundRobin::has_next`] fails with [`MergeError::InvalidPolicy`], before any producer is
//! touched.
//!
//! # Logging
//!
//! Dispatch decisions are reported through [`tracing`]: probes at `TRACE`, policy decisions at
//! `DEBUG`, and producer states changed behind the dispatcher's back at `WARN`.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
pub mod policy;
pub mod producers;
pub mod round_robin;

pub use error::{BuildError, MergeError, ParsePolicyError};
pub use policy::{InequalityHandling, PolicySetting};
pub use producers::{IterProducers, Producers};
pub use round_robin::RoundRobin;

mod convenience;
pub use convenience::*;

pub mod internal;


#[doc(hidden)]
#[doc = include_str!("../README.md")]
struct _ReadmeTest;
