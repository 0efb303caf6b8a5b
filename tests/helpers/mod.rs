#![allow(dead_code)]

use std::sync::Once;

use round_robin_merge::{InequalityHandling, IterProducers, Producers, RoundRobin};
use tracing_subscriber::EnvFilter;

/// Item of a test producer: `(producer_index, position)`
pub type Labeled = (usize, usize);

/// Routes `tracing` output to the test harness, filtered by `RUST_LOG`
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Producer `i` yields `(i, 0), (i, 1), ..., (i, lengths[i] - 1)`
pub fn labeled(lengths: &[usize]) -> IterProducers<Vec<Labeled>> {
    lengths
        .iter()
        .enumerate()
        .map(|(producer, &len)| (0..len).map(|position| (producer, position)).collect())
        .collect()
}

pub fn build(lengths: &[usize], policy: InequalityHandling) -> RoundRobin<IterProducers<Vec<Labeled>>> {
    init_logging();
    RoundRobin::builder(labeled(lengths))
        .inequality_handling(policy)
        .build()
        .expect("at least one producer")
}

/// Drains via the `has_next`/`next_item` protocol
pub fn drain<P>(rr: &RoundRobin<P>) -> Vec<P::Item>
where
    P: Producers,
    P::Error: std::fmt::Debug,
{
    let mut out = Vec::new();
    while rr.has_next().expect("has_next") {
        out.push(rr.next_item().expect("next_item"));
    }
    out
}
