/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use prism3_atomic_ops::atomic::{
    atomic_add_fetch,
    atomic_div_fetch,
    atomic_fetch_add,
    atomic_fetch_div,
    atomic_fetch_max,
    atomic_fetch_min,
    atomic_fetch_mod,
    atomic_fetch_mul,
    atomic_fetch_sub,
    atomic_fetch_update,
    atomic_lshift_fetch,
    atomic_max_fetch,
    atomic_min_fetch,
    atomic_mul_fetch,
    atomic_rshift_fetch,
    atomic_sub_fetch,
    atomic_update_fetch,
    AcqRel,
    Relaxed,
    SeqCst,
};

#[test]
fn test_fetch_min_keeps_smaller_value() {
    let mut x = 10i32;
    let r = unsafe { atomic_fetch_min(&mut x, 3, AcqRel) };
    assert_eq!(r, 10);
    assert_eq!(x, 3);
}

#[test]
fn test_min_max_with_negative_values() {
    let mut x = -5i64;
    assert_eq!(unsafe { atomic_fetch_max(&mut x, -10, AcqRel) }, -5);
    assert_eq!(x, -5);
    assert_eq!(unsafe { atomic_min_fetch(&mut x, -10, AcqRel) }, -10);
    assert_eq!(unsafe { atomic_max_fetch(&mut x, 0, AcqRel) }, 0);
}

#[test]
fn test_fetch_update_applies_function_once_per_success() {
    let mut x = 10u32;
    let old = unsafe { atomic_fetch_update(&mut x, SeqCst, |v| v * 2 + 1) };
    assert_eq!(old, 10);
    assert_eq!(x, 21);
    let new = unsafe { atomic_update_fetch(&mut x, Relaxed, |v| v.saturating_sub(100)) };
    assert_eq!(new, 0);
}

#[test]
fn test_shift_amount_is_masked_to_bit_width() {
    let mut x = 1u8;
    assert_eq!(unsafe { atomic_lshift_fetch(&mut x, 9, AcqRel) }, 2);
    assert_eq!(unsafe { atomic_rshift_fetch(&mut x, 8, AcqRel) }, 2);
}

#[test]
fn test_signed_right_shift_is_arithmetic() {
    let mut x = -16i32;
    assert_eq!(unsafe { atomic_rshift_fetch(&mut x, 2, AcqRel) }, -4);
}

#[test]
fn test_multiplication_wraps() {
    let mut x = 200u8;
    assert_eq!(unsafe { atomic_fetch_mul(&mut x, 2, AcqRel) }, 200);
    assert_eq!(x, 144);
}

#[test]
fn test_signed_division_of_min_by_minus_one_wraps() {
    let mut x = i32::MIN;
    assert_eq!(unsafe { atomic_div_fetch(&mut x, -1, AcqRel) }, i32::MIN);
}

#[test]
#[should_panic]
fn test_division_by_zero_panics() {
    let mut x = 10u32;
    unsafe { atomic_fetch_div(&mut x, 0, AcqRel) };
}

#[test]
#[should_panic]
fn test_remainder_by_zero_panics() {
    let mut x = 10i64;
    unsafe { atomic_fetch_mod(&mut x, 0, AcqRel) };
}

#[test]
fn test_division_by_zero_leaves_value_untouched() {
    let mut x = 10u32;
    let addr: *mut u32 = &mut x;
    let result = std::panic::catch_unwind(|| unsafe { atomic_fetch_div(addr, 0, AcqRel) });
    assert!(result.is_err());
    assert_eq!(x, 10);
}

#[test]
fn test_float_arithmetic() {
    let mut x = 1.5f64;
    unsafe {
        assert_eq!(atomic_fetch_add(&mut x, 2.5, AcqRel), 1.5);
        assert_eq!(atomic_fetch_sub(&mut x, 1.0, AcqRel), 4.0);
        assert_eq!(atomic_mul_fetch(&mut x, 4.0, AcqRel), 12.0);
        assert_eq!(atomic_div_fetch(&mut x, 8.0, AcqRel), 1.5);
        assert_eq!(atomic_fetch_mod(&mut x, 1.0, AcqRel), 1.5);
    }
    assert_eq!(x, 0.5);

    let mut y = -2.0f32;
    unsafe {
        assert_eq!(atomic_add_fetch(&mut y, 0.5, AcqRel), -1.5);
        assert_eq!(atomic_sub_fetch(&mut y, 0.5, AcqRel), -2.0);
        assert_eq!(atomic_fetch_max(&mut y, 3.0, AcqRel), -2.0);
        assert_eq!(atomic_fetch_min(&mut y, f32::NEG_INFINITY, AcqRel), 3.0);
    }
    assert_eq!(y, f32::NEG_INFINITY);
}

#[test]
fn test_float_min_max_ignore_nan_operand() {
    let mut x = 1.0f64;
    unsafe {
        atomic_fetch_min(&mut x, f64::NAN, AcqRel);
        atomic_fetch_max(&mut x, f64::NAN, AcqRel);
    }
    assert_eq!(x, 1.0);
}

#[test]
fn test_loop_operations_match_sequential_evaluation() {
    let operands = [7u64, 3, 12, 5, 9, 2, 11];
    let mut shared = 1u64;
    let mut plain = 1u64;
    for operand in operands {
        unsafe {
            atomic_fetch_mul(&mut shared, operand, AcqRel);
            atomic_fetch_mod(&mut shared, 1_000, AcqRel);
            atomic_fetch_min(&mut shared, 900, AcqRel);
        }
        plain = plain.wrapping_mul(operand) % 1_000;
        plain = plain.min(900);
    }
    assert_eq!(shared, plain);
}
