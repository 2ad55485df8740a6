/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Read-Modify-Write Operations
//!
//! Every read-modify-write operation without a hardware instruction runs
//! the same compare-exchange retry loop:
//!
//! 1. `old = load(Relaxed)`
//! 2. `new = apply(old, operand)`
//! 3. `compare_exchange_weak(old, new, order, Relaxed)`
//! 4. on failure `old` is the value just observed; go back to 2
//!
//! The `fetch_*` functions return `old` of the winning attempt and the
//! `*_fetch` functions return its `new`. The loop only ends when an
//! exchange succeeds; it gives no fairness guarantee and may retry for as
//! long as other threads keep winning.
//!
//! All functions share the safety contract of the
//! [primitives](crate::atomic::primitives) and accept every memory order.
//! The operand type `V` comes from the [`Operation`] impl: `T` for most
//! operations, `u32` for shifts and `usize` for pointer arithmetic.
//!
//! # Author
//!
//! Haixing Hu

use std::sync::atomic::Ordering;

use crate::atomic::classifier::AtomicStrategy;
use crate::atomic::classifier::AtomicValue;
use crate::atomic::memory_order::MemoryOrder;
use crate::atomic::operation::{
    Add,
    And,
    Div,
    LShift,
    Max,
    Min,
    Mod,
    Mul,
    Nand,
    One,
    Operation,
    Or,
    RShift,
    Sub,
    Xor,
};

/// The compare-exchange retry loop.
///
/// # Returns
///
/// `(old, new)` of the attempt that succeeded.
///
/// # Safety
///
/// See [`AtomicStrategy`].
#[inline]
pub(crate) unsafe fn fetch_update_with<T, F>(addr: *mut T, order: Ordering, mut f: F) -> (T, T)
where
    T: AtomicValue,
    F: FnMut(T) -> T,
{
    let mut old = unsafe { T::Strategy::load(addr, Ordering::Relaxed) };
    loop {
        let new = f(old);
        match unsafe {
            T::Strategy::compare_exchange_weak(addr, old, new, order, Ordering::Relaxed)
        } {
            Ok(_) => return (old, new),
            Err(actual) => old = actual,
        }
    }
}

/// Atomically replaces the value at `addr` with `f(old)`, returning `old`.
///
/// `f` may be called several times and must be free of side effects that
/// matter.
///
/// # Safety
///
/// See the [primitives](crate::atomic::primitives).
///
/// # Example
///
/// ```rust
/// use prism3_atomic_ops::atomic::{atomic_fetch_update, AcqRel};
///
/// let mut x = 10;
/// let old = unsafe { atomic_fetch_update(&mut x, AcqRel, |v| v * 2 + 1) };
/// assert_eq!(old, 10);
/// assert_eq!(x, 21);
/// ```
#[inline]
pub unsafe fn atomic_fetch_update<T, O, F>(addr: *mut T, _order: O, f: F) -> T
where
    T: AtomicValue,
    O: MemoryOrder,
    F: FnMut(T) -> T,
{
    unsafe { fetch_update_with(addr, O::ORDERING, f).0 }
}

/// Atomically replaces the value at `addr` with `f(old)`, returning the new
/// value.
///
/// # Safety
///
/// See the [primitives](crate::atomic::primitives).
#[inline]
pub unsafe fn atomic_update_fetch<T, O, F>(addr: *mut T, _order: O, f: F) -> T
where
    T: AtomicValue,
    O: MemoryOrder,
    F: FnMut(T) -> T,
{
    unsafe { fetch_update_with(addr, O::ORDERING, f).1 }
}

macro_rules! rmw_functions {
    ($op:ident, $fetch_op:ident, $op_fetch:ident, $what:expr) => {
        #[doc = concat!("Atomically ", $what, ", returning the previous value.")]
        ///
        /// # Safety
        ///
        /// See the [primitives](crate::atomic::primitives).
        #[inline]
        pub unsafe fn $fetch_op<T, V, O>(addr: *mut T, operand: V, _order: O) -> T
        where
            T: AtomicValue,
            V: Copy,
            O: MemoryOrder,
            $op: Operation<T, V>,
        {
            unsafe { <$op as Operation<T, V>>::fetch_apply(addr, operand, O::ORDERING) }
        }

        #[doc = concat!("Atomically ", $what, ", returning the new value.")]
        ///
        /// # Safety
        ///
        /// See the [primitives](crate::atomic::primitives).
        #[inline]
        pub unsafe fn $op_fetch<T, V, O>(addr: *mut T, operand: V, _order: O) -> T
        where
            T: AtomicValue,
            V: Copy,
            O: MemoryOrder,
            $op: Operation<T, V>,
        {
            let old = unsafe { <$op as Operation<T, V>>::fetch_apply(addr, operand, O::ORDERING) };
            <$op as Operation<T, V>>::apply(old, operand)
        }
    };
}

rmw_functions!(Add, atomic_fetch_add, atomic_add_fetch, "adds `operand`");
rmw_functions!(Sub, atomic_fetch_sub, atomic_sub_fetch, "subtracts `operand`");
rmw_functions!(Mul, atomic_fetch_mul, atomic_mul_fetch, "multiplies by `operand`");
rmw_functions!(Div, atomic_fetch_div, atomic_div_fetch, "divides by `operand`");
rmw_functions!(Mod, atomic_fetch_mod, atomic_mod_fetch, "takes the remainder by `operand`");
rmw_functions!(And, atomic_fetch_and, atomic_and_fetch, "ANDs with `operand`");
rmw_functions!(Or, atomic_fetch_or, atomic_or_fetch, "ORs with `operand`");
rmw_functions!(Xor, atomic_fetch_xor, atomic_xor_fetch, "XORs with `operand`");
rmw_functions!(Nand, atomic_fetch_nand, atomic_nand_fetch, "NANDs with `operand`");
rmw_functions!(
    Min,
    atomic_fetch_min,
    atomic_min_fetch,
    "keeps the smaller of the value and `operand`"
);
rmw_functions!(
    Max,
    atomic_fetch_max,
    atomic_max_fetch,
    "keeps the larger of the value and `operand`"
);
rmw_functions!(
    LShift,
    atomic_fetch_lshift,
    atomic_lshift_fetch,
    "shifts left by `operand` bits"
);
rmw_functions!(
    RShift,
    atomic_fetch_rshift,
    atomic_rshift_fetch,
    "shifts right by `operand` bits"
);

/// Atomically adds `operand`, discarding the result.
///
/// # Safety
///
/// See the [primitives](crate::atomic::primitives).
#[inline]
pub unsafe fn atomic_add<T, V, O>(addr: *mut T, operand: V, order: O)
where
    T: AtomicValue,
    V: Copy,
    O: MemoryOrder,
    Add: Operation<T, V>,
{
    unsafe { atomic_fetch_add(addr, operand, order) };
}

/// Atomically subtracts `operand`, discarding the result.
///
/// # Safety
///
/// See the [primitives](crate::atomic::primitives).
#[inline]
pub unsafe fn atomic_sub<T, V, O>(addr: *mut T, operand: V, order: O)
where
    T: AtomicValue,
    V: Copy,
    O: MemoryOrder,
    Sub: Operation<T, V>,
{
    unsafe { atomic_fetch_sub(addr, operand, order) };
}

/// Atomically adds one.
///
/// # Safety
///
/// See the [primitives](crate::atomic::primitives).
#[inline]
pub unsafe fn atomic_increment<T, O>(addr: *mut T, order: O)
where
    T: AtomicValue + One,
    O: MemoryOrder,
    Add: Operation<T>,
{
    unsafe { atomic_fetch_add(addr, T::ONE, order) };
}

/// Atomically subtracts one.
///
/// # Safety
///
/// See the [primitives](crate::atomic::primitives).
#[inline]
pub unsafe fn atomic_decrement<T, O>(addr: *mut T, order: O)
where
    T: AtomicValue + One,
    O: MemoryOrder,
    Sub: Operation<T>,
{
    unsafe { atomic_fetch_sub(addr, T::ONE, order) };
}
