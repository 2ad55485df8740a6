/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use prism3_atomic_ops::atomic::{
    atomic_compare_exchange_strong,
    atomic_compare_exchange_weak,
    atomic_exchange,
    atomic_fetch_add,
    atomic_load,
    atomic_store,
    atomic_thread_fence,
    AcqRel,
    Acquire,
    Relaxed,
    Release,
    SeqCst,
};

#[test]
fn test_fetch_add_returns_previous_value() {
    let mut x = 0i32;
    let r = unsafe { atomic_fetch_add(&mut x, 5, AcqRel) };
    assert_eq!(r, 0);
    assert_eq!(x, 5);
}

#[test]
fn test_compare_exchange_strong_writes_on_match() {
    let mut x = 5i32;
    let mut e = 5i32;
    let ok = unsafe { atomic_compare_exchange_strong(&mut x, &mut e, 10, AcqRel, Relaxed) };
    assert!(ok);
    assert_eq!(x, 10);
}

#[test]
fn test_compare_exchange_strong_reports_observed_value() {
    let mut x = 7i32;
    let mut e = 5i32;
    let ok = unsafe { atomic_compare_exchange_strong(&mut x, &mut e, 10, AcqRel, Relaxed) };
    assert!(!ok);
    assert_eq!(e, 7);
    assert_eq!(x, 7);
}

#[test]
fn test_compare_exchange_weak_never_succeeds_on_mismatch() {
    let mut x = 3u64;
    for _ in 0..100 {
        let mut e = 4u64;
        let ok = unsafe { atomic_compare_exchange_weak(&mut x, &mut e, 99, SeqCst, SeqCst) };
        assert!(!ok);
        assert_eq!(e, 3);
    }
    assert_eq!(x, 3);
}

#[test]
fn test_exchange_returns_previous_value() {
    let mut x = 1u16;
    assert_eq!(unsafe { atomic_exchange(&mut x, 2, Relaxed) }, 1);
    assert_eq!(unsafe { atomic_exchange(&mut x, 3, Acquire) }, 2);
    assert_eq!(unsafe { atomic_exchange(&mut x, 4, Release) }, 3);
    assert_eq!(unsafe { atomic_exchange(&mut x, 5, SeqCst) }, 4);
    assert_eq!(x, 5);
}

#[test]
fn test_raw_pointer_access() {
    let mut values = [0u32; 4];
    let base = values.as_mut_ptr();
    unsafe {
        for i in 0..4 {
            atomic_store(base.add(i), i as u32 * 10, Release);
        }
        assert_eq!(atomic_load(base.add(2), Acquire), 20);
    }
    assert_eq!(values, [0, 10, 20, 30]);
}

#[test]
fn test_fences_accept_every_order() {
    atomic_thread_fence(Relaxed);
    atomic_thread_fence(Acquire);
    atomic_thread_fence(Release);
    atomic_thread_fence(AcqRel);
    atomic_thread_fence(SeqCst);
}
