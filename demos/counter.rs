/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # Atomic Counter Example
//!
//! Demonstrates counting on a plain integer through the free functions and
//! through an `AtomicRef`.

use prism3_atomic_ops::{
    atomic_compare_exchange_strong,
    atomic_fetch_add,
    atomic_increment,
    atomic_load,
    AcqRel,
    Acquire,
    AtomicRef,
    Relaxed,
};
use std::thread;

fn main() {
    println!("=== Atomic Counter Example ===\n");

    // Example 1: Basic counter operations
    println!("1. Basic Counter Operations:");
    let mut counter = 0i32;
    println!("   Initial value: {}", counter);
    unsafe {
        atomic_increment(&mut counter, AcqRel);
        println!("   After increment: {}", atomic_load(&mut counter, Acquire));
        let old = atomic_fetch_add(&mut counter, 5, AcqRel);
        println!("   fetch_add(5) returned {}, value is now {}", old, counter);
    }

    // Example 2: Multi-threaded counter
    println!("\n2. Multi-threaded Counter:");
    let num_threads = 10;
    let increments_per_thread = 1000;
    let mut hits = 0i32;
    let shared = AtomicRef::new(&mut hits);
    thread::scope(|s| {
        for i in 0..num_threads {
            s.spawn(move || {
                for _ in 0..increments_per_thread {
                    shared.inc();
                }
                println!("   Thread {} completed", i);
            });
        }
    });
    println!(
        "   Final count: {} (expected: {})",
        hits,
        num_threads * increments_per_thread
    );

    // Example 3: Compare-and-swap
    println!("\n3. Compare-and-Swap:");
    let mut value = 10i32;
    let mut expected = 10;
    if unsafe { atomic_compare_exchange_strong(&mut value, &mut expected, 20, AcqRel, Relaxed) } {
        println!("   CAS succeeded: value is now {}", value);
    }
    let mut expected = 10;
    if !unsafe { atomic_compare_exchange_strong(&mut value, &mut expected, 30, AcqRel, Relaxed) } {
        println!("   CAS failed: actual value was {}", expected);
    }

    // Example 4: Operators on a reference
    println!("\n4. Compound Assignment:");
    let mut total = 1u32;
    let mut r = AtomicRef::new(&mut total);
    r += 4;
    r *= 3;
    r <<= 1;
    println!("   ((1 + 4) * 3) << 1 = {}", r);
}
