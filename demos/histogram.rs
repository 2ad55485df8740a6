/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # Atomic Histogram Example
//!
//! Several threads bin values into a shared array of counters and track
//! the global minimum and maximum.

use prism3_atomic_ops::{
    AtomicRef,
    AtomicSlice,
};
use std::thread;

const BUCKETS: usize = 8;
const SAMPLES_PER_THREAD: u32 = 10_000;

fn main() {
    println!("=== Atomic Histogram Example ===\n");

    let mut counts = [0u32; BUCKETS];
    let mut lowest = u32::MAX;
    let mut highest = 0u32;

    let histogram = AtomicSlice::new(&mut counts);
    let min = AtomicRef::new(&mut lowest);
    let max = AtomicRef::new(&mut highest);

    thread::scope(|s| {
        for seed in 1..=4u32 {
            s.spawn(move || {
                // xorshift; good enough to spread samples over the buckets
                let mut state = seed.wrapping_mul(0x9E37_79B9);
                for _ in 0..SAMPLES_PER_THREAD {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    let sample = state % 1000;
                    histogram.at(sample as usize * BUCKETS / 1000).inc();
                    min.fetch_min(sample);
                    max.fetch_max(sample);
                }
            });
        }
    });

    for (i, count) in counts.iter().enumerate() {
        let from = i * 1000 / BUCKETS;
        let to = (i + 1) * 1000 / BUCKETS;
        println!("   [{:4}, {:4}) {:6} {}", from, to, count, "#".repeat(*count as usize / 250));
    }
    println!("\n   Samples: {}", counts.iter().sum::<u32>());
    println!("   Range:   {} ..= {}", lowest, highest);
}
