/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # Release/Acquire Publication Example
//!
//! A producer fills a record and publishes it with a release store; the
//! consumer spins on an acquire load and then reads the record.

use bytemuck::NoUninit;
use prism3_atomic_ops::{
    atomic_load,
    atomic_store,
    impl_generic_atomic,
    is_lock_free,
    Acquire,
    Relaxed,
    Release,
};
use std::cell::UnsafeCell;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Default, Clone, Copy, NoUninit)]
#[repr(C)]
struct Reading {
    sensor: u32,
    sequence: u32,
    celsius: f64,
}

impl_generic_atomic!(Reading);

struct Mailbox {
    reading: UnsafeCell<Reading>,
    ready: UnsafeCell<bool>,
}

// Both fields are only accessed through the atomic primitives.
unsafe impl Sync for Mailbox {}

fn main() {
    println!("=== Release/Acquire Publication Example ===\n");
    println!("   Reading is lock-free: {}", is_lock_free::<Reading>());

    let mailbox = Arc::new(Mailbox {
        reading: UnsafeCell::new(Reading::default()),
        ready: UnsafeCell::new(false),
    });

    let producer = {
        let mailbox = mailbox.clone();
        thread::spawn(move || unsafe {
            let reading = Reading {
                sensor: 7,
                sequence: 1,
                celsius: 21.5,
            };
            atomic_store(mailbox.reading.get(), reading, Relaxed);
            atomic_store(mailbox.ready.get(), true, Release);
            println!("   Producer published {:?}", reading);
        })
    };

    let consumer = {
        let mailbox = mailbox.clone();
        thread::spawn(move || unsafe {
            while !atomic_load(mailbox.ready.get(), Acquire) {
                thread::yield_now();
            }
            atomic_load(mailbox.reading.get(), Relaxed)
        })
    };

    producer.join().unwrap();
    let reading = consumer.join().unwrap();
    println!("   Consumer received {:?}", reading);
}
