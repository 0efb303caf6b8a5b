#![no_main]

use libfuzzer_sys::fuzz_target;
extern crate round_robin_merge;
use round_robin_merge::InequalityHandling;

fuzz_target!(|data: Vec<u8>| {
    // keep runs short, lengths up to 15, at most 16 producers
    let lengths: Vec<usize> = data.iter().take(16).map(|len| usize::from(len % 16)).collect();
    for policy in InequalityHandling::ALL {
        round_robin_merge::tests::assert_matches_model(&lengths, policy);
    }
});
