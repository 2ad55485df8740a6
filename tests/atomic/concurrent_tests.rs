/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use std::cell::UnsafeCell;
use std::sync::{
    Arc,
    Barrier,
};
use std::thread;

use prism3_atomic_ops::atomic::{
    atomic_compare_exchange_strong,
    atomic_compare_exchange_weak,
    atomic_fetch_add,
    atomic_fetch_max,
    atomic_fetch_min,
    atomic_fetch_or,
    atomic_increment,
    atomic_load,
    atomic_store,
    AcqRel,
    Acquire,
    AtomicRef,
    AtomicSlice,
    Relaxed,
    Release,
    SeqCst,
};

use super::generic_tests::Extent;

const NUM_THREADS: usize = 10;
const ITERATIONS_PER_THREAD: usize = 1000;

/// Plain memory shared between threads and only touched through the
/// atomic primitives.
struct Shared<T>(UnsafeCell<T>);

unsafe impl<T: Send> Sync for Shared<T> {}

impl<T> Shared<T> {
    fn new(value: T) -> Arc<Self> {
        Arc::new(Self(UnsafeCell::new(value)))
    }

    fn ptr(&self) -> *mut T {
        self.0.get()
    }
}

fn run_threads<F>(num_threads: usize, f: F)
where
    F: Fn(usize) + Send + Sync + 'static,
{
    let f = Arc::new(f);
    let mut handles = vec![];
    for i in 0..num_threads {
        let f = f.clone();
        handles.push(thread::spawn(move || f(i)));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

// Four threads, a thousand increments each
#[test]
fn test_concurrent_increment() {
    let counter = Shared::new(0i32);
    let shared = counter.clone();
    run_threads(4, move |_| {
        for _ in 0..1000 {
            unsafe { atomic_increment(shared.ptr(), AcqRel) };
        }
    });
    assert_eq!(unsafe { atomic_load(counter.ptr(), SeqCst) }, 4000);
}

#[test]
fn test_concurrent_fetch_add_loses_no_updates() {
    let counter = Shared::new(0u64);
    let shared = counter.clone();
    run_threads(NUM_THREADS, move |_| {
        for _ in 0..ITERATIONS_PER_THREAD {
            unsafe { atomic_fetch_add(shared.ptr(), 1, Relaxed) };
        }
    });
    assert_eq!(
        unsafe { atomic_load(counter.ptr(), SeqCst) },
        (NUM_THREADS * ITERATIONS_PER_THREAD) as u64
    );
}

#[test]
fn test_concurrent_cas_loop() {
    let counter = Shared::new(0usize);
    let shared = counter.clone();
    run_threads(NUM_THREADS, move |_| {
        for _ in 0..ITERATIONS_PER_THREAD {
            let mut current = unsafe { atomic_load(shared.ptr(), Relaxed) };
            while !unsafe {
                let desired = current + 1;
                atomic_compare_exchange_weak(shared.ptr(), &mut current, desired, AcqRel, Relaxed)
            } {}
        }
    });
    assert_eq!(
        unsafe { atomic_load(counter.ptr(), SeqCst) },
        NUM_THREADS * ITERATIONS_PER_THREAD
    );
}

#[test]
fn test_concurrent_min_max() {
    let low = Shared::new(i64::MAX);
    let high = Shared::new(i64::MIN);
    let (l, h) = (low.clone(), high.clone());
    run_threads(NUM_THREADS, move |i| {
        for j in 0..100 {
            let value = (i * 100 + j) as i64 - 500;
            unsafe {
                atomic_fetch_min(l.ptr(), value, AcqRel);
                atomic_fetch_max(h.ptr(), value, AcqRel);
            }
        }
    });
    assert_eq!(unsafe { atomic_load(low.ptr(), SeqCst) }, -500);
    assert_eq!(unsafe { atomic_load(high.ptr(), SeqCst) }, 499);
}

#[test]
fn test_concurrent_bitwise() {
    let bits = Shared::new(0u32);
    let shared = bits.clone();
    run_threads(NUM_THREADS, move |i| {
        unsafe { atomic_fetch_or(shared.ptr(), 1u32 << (i % 32), AcqRel) };
    });
    let result = unsafe { atomic_load(bits.ptr(), SeqCst) };
    for i in 0..NUM_THREADS.min(32) {
        assert_eq!(result & (1 << i), 1 << i);
    }
}

#[test]
fn test_concurrent_float_add() {
    let total = Shared::new(0.0f64);
    let shared = total.clone();
    run_threads(NUM_THREADS, move |_| {
        for _ in 0..100 {
            unsafe { atomic_fetch_add(shared.ptr(), 0.5, AcqRel) };
        }
    });
    assert_eq!(unsafe { atomic_load(total.ptr(), SeqCst) }, NUM_THREADS as f64 * 50.0);
}

// Large values go through the striped locks; readers must never observe a
// value that is half updated.
#[test]
fn test_concurrent_generic_values_are_never_torn() {
    let extent = Shared::new(Extent::default());
    let barrier = Arc::new(Barrier::new(NUM_THREADS));
    let (shared, gate) = (extent.clone(), barrier.clone());
    run_threads(NUM_THREADS, move |i| {
        gate.wait();
        for _ in 0..ITERATIONS_PER_THREAD {
            if i % 2 == 0 {
                unsafe {
                    atomic_fetch_add(
                        shared.ptr(),
                        Extent {
                            offset: 1,
                            length: 1,
                        },
                        AcqRel,
                    )
                };
            } else {
                let seen = unsafe { atomic_load(shared.ptr(), Acquire) };
                assert_eq!(seen.offset, seen.length);
            }
        }
    });
    let writers = (NUM_THREADS + 1) / 2;
    let expected = (writers * ITERATIONS_PER_THREAD) as u64;
    assert_eq!(
        unsafe { atomic_load(extent.ptr(), SeqCst) },
        Extent {
            offset: expected,
            length: expected,
        }
    );
}

#[test]
fn test_release_acquire_publication() {
    let data = Shared::new(0u32);
    let ready = Shared::new(false);
    let (d, r) = (data.clone(), ready.clone());
    let writer = thread::spawn(move || unsafe {
        atomic_store(d.ptr(), 42, Relaxed);
        atomic_store(r.ptr(), true, Release);
    });
    let (d, r) = (data.clone(), ready.clone());
    let reader = thread::spawn(move || unsafe {
        while !atomic_load(r.ptr(), Acquire) {
            thread::yield_now();
        }
        atomic_load(d.ptr(), Relaxed)
    });
    writer.join().unwrap();
    assert_eq!(reader.join().unwrap(), 42);
}

// A test-and-set lock built from the primitives guards a plain counter.
#[test]
fn test_spinlock_pattern() {
    let lock = Shared::new(false);
    let counter = Shared::new(0u32);
    let (l, c) = (lock.clone(), counter.clone());
    run_threads(NUM_THREADS, move |_| {
        for _ in 0..100 {
            loop {
                let mut expected = false;
                if unsafe { atomic_compare_exchange_strong(l.ptr(), &mut expected, true, Acquire, Relaxed) } {
                    break;
                }
                thread::yield_now();
            }
            unsafe { *c.ptr() += 1 };
            unsafe { atomic_store(l.ptr(), false, Release) };
        }
    });
    assert_eq!(unsafe { atomic_load(counter.ptr(), SeqCst) }, (NUM_THREADS * 100) as u32);
}

#[test]
fn test_atomic_ref_compound_assignment() {
    let mut total = 0i64;
    let mut product = 1u64;
    let sum = AtomicRef::new(&mut total);
    let mul = AtomicRef::new(&mut product);
    thread::scope(|s| {
        for _ in 0..NUM_THREADS {
            s.spawn(move || {
                let (mut sum, mut mul) = (sum, mul);
                for _ in 0..ITERATIONS_PER_THREAD {
                    sum += 2;
                    sum -= 1;
                }
                mul *= 2;
            });
        }
    });
    assert_eq!(total, (NUM_THREADS * ITERATIONS_PER_THREAD) as i64);
    assert_eq!(product, 1 << NUM_THREADS);
}

#[test]
fn test_atomic_slice_histogram() {
    let mut buckets = [0u32; 16];
    let histogram = AtomicSlice::new(&mut buckets);
    thread::scope(|s| {
        for t in 0..NUM_THREADS {
            s.spawn(move || {
                for i in 0..ITERATIONS_PER_THREAD {
                    histogram.at((i + t) % 16).post_increment();
                }
            });
        }
    });
    let total: u32 = buckets.iter().sum();
    assert_eq!(total as usize, NUM_THREADS * ITERATIONS_PER_THREAD);
}
