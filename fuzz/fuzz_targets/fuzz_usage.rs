#![no_main]

use libfuzzer_sys::fuzz_target;
extern crate round_robin_merge;
use round_robin_merge::{IterProducers, MergeError, RoundRobin};
use std::hint::black_box;

fn consume<T>(item: T){
    drop(black_box(item))
}

fuzz_target!(|data: (String, Vec<Vec<i8>>)| {
    let (policy_name, sources) = data;
    let Ok(rr) = RoundRobin::builder(IterProducers::new(sources))
        .inequality_handling_name(&policy_name)
        .build()
    else {
        return;
    };
    let valid = rr.policy().validate().is_ok();
    for item in rr {
        match item {
            Ok(item) => consume(item),
            Err(MergeError::InvalidPolicy(value)) => {
                assert!(!valid);
                assert_eq!(value, policy_name);
            }
            Err(MergeError::Producer(e)) => match e {},
        }
    }
});
