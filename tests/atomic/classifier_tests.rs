/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use std::mem;

use prism3_atomic_ops::atomic::{
    classify,
    is_lock_free,
    required_align,
    AtomicValue,
    Classification,
    MAX_ATOMIC_INTEGER_SIZE,
};

fn classification_of<T: AtomicValue>(_: &T) -> Classification {
    T::CLASSIFICATION
}

#[test]
fn test_native_types() {
    assert_eq!(classify::<bool>(), Classification::Native);
    assert_eq!(classify::<i8>(), Classification::Native);
    assert_eq!(classify::<u16>(), Classification::Native);
    assert_eq!(classify::<i32>(), Classification::Native);
    assert_eq!(classify::<u64>(), Classification::Native);
    assert_eq!(classify::<usize>(), Classification::Native);
    assert_eq!(classify::<*mut String>(), Classification::Native);
}

#[test]
fn test_generic_types() {
    assert_eq!(classify::<f32>(), Classification::Generic);
    assert_eq!(classify::<f64>(), Classification::Generic);
    assert_eq!(classify::<char>(), Classification::Generic);
    assert!(is_lock_free::<char>());
    assert_eq!(classification_of(&1.0f64), Classification::Generic);
}

#[test]
fn test_classification_is_usable_in_const_context() {
    const NATIVE: Classification = classify::<u32>();
    const ALIGN: usize = required_align::<u32>();
    const LOCK_FREE: bool = is_lock_free::<u32>();
    assert_eq!(NATIVE, Classification::Native);
    assert_eq!(ALIGN, mem::align_of::<u32>());
    assert!(LOCK_FREE);
}

#[test]
fn test_max_atomic_integer_size() {
    assert!(MAX_ATOMIC_INTEGER_SIZE == 8 || MAX_ATOMIC_INTEGER_SIZE == 16);
    assert!(mem::size_of::<usize>() <= MAX_ATOMIC_INTEGER_SIZE);
}

#[test]
fn test_wide_integers_follow_max_atomic_integer_size() {
    let native = MAX_ATOMIC_INTEGER_SIZE == 16;
    assert_eq!(classify::<u128>() == Classification::Native, native);
    assert_eq!(classify::<i128>() == Classification::Native, native);
    assert_eq!(is_lock_free::<u128>(), native);
    assert!(required_align::<u128>() >= mem::align_of::<u128>());
}

#[test]
fn test_native_integers_fit_max_atomic_integer_size() {
    fn check<T: AtomicValue>() {
        assert_eq!(
            T::CLASSIFICATION == Classification::Native,
            mem::size_of::<T>() <= MAX_ATOMIC_INTEGER_SIZE,
            "{} is misclassified",
            std::any::type_name::<T>()
        );
    }
    check::<i8>();
    check::<u16>();
    check::<i32>();
    check::<u64>();
    check::<isize>();
    check::<i128>();
    check::<u128>();
}

#[test]
fn test_native_alignment_matches_width() {
    assert_eq!(required_align::<u8>(), 1);
    assert_eq!(required_align::<u16>(), 2);
    assert_eq!(required_align::<u32>(), 4);
    assert_eq!(required_align::<u64>(), 8);
}
