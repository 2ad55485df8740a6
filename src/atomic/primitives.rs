/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Core Atomic Primitives
//!
//! Load, store, exchange, compare-exchange and fence over a raw address,
//! with the memory order given as a tag value. Each call compiles to the
//! native or the generic implementation of its value type; both satisfy
//! the same contract.
//!
//! # Safety
//!
//! Every primitive that takes an address requires that the address is
//! non-null, valid for reads and writes of `T`, aligned to
//! [`required_align::<T>()`](crate::atomic::required_align), and not
//! accessed non-atomically while the call runs. The primitives never
//! allocate and never take ownership of the memory.
//!
//! # Example
//!
//! ```rust
//! use prism3_atomic_ops::atomic::{
//!     atomic_compare_exchange_strong,
//!     atomic_load,
//!     AcqRel,
//!     Acquire,
//!     Relaxed,
//! };
//!
//! let mut x = 5;
//! let mut expected = 5;
//! let ok = unsafe {
//!     atomic_compare_exchange_strong(&mut x, &mut expected, 10, AcqRel, Relaxed)
//! };
//! assert!(ok);
//! assert_eq!(unsafe { atomic_load(&mut x, Acquire) }, 10);
//! ```
//!
//! # Author
//!
//! Haixing Hu

use std::sync::atomic;

use crate::atomic::classifier::AtomicStrategy;
use crate::atomic::classifier::AtomicValue;
use crate::atomic::memory_order::CompareExchangeOrder;
use crate::atomic::memory_order::LoadOrder;
use crate::atomic::memory_order::MemoryOrder;
use crate::atomic::memory_order::MemoryOrderKind;
use crate::atomic::memory_order::StoreOrder;

/// Atomically loads and returns the value at `addr`.
///
/// Valid orders: `Relaxed`, `Acquire`, `SeqCst`. For generic values all
/// bytes are read as one indivisible unit.
///
/// # Safety
///
/// See the [module documentation](self).
#[inline]
pub unsafe fn atomic_load<T, O>(addr: *mut T, _order: O) -> T
where
    T: AtomicValue,
    O: LoadOrder,
{
    unsafe { T::Strategy::load(addr, O::ORDERING) }
}

/// Atomically stores `value` at `addr`.
///
/// Valid orders: `Relaxed`, `Release`, `SeqCst`.
///
/// # Safety
///
/// See the [module documentation](self).
#[inline]
pub unsafe fn atomic_store<T, O>(addr: *mut T, value: T, _order: O)
where
    T: AtomicValue,
    O: StoreOrder,
{
    unsafe { T::Strategy::store(addr, value, O::ORDERING) }
}

/// Atomically writes `value` at `addr` and returns the previous contents.
///
/// All orders are valid.
///
/// # Safety
///
/// See the [module documentation](self).
#[inline]
pub unsafe fn atomic_exchange<T, O>(addr: *mut T, value: T, _order: O) -> T
where
    T: AtomicValue,
    O: MemoryOrder,
{
    unsafe { T::Strategy::swap(addr, value, O::ORDERING) }
}

/// Compares the contents of `addr` with `*expected` and, if equal, writes
/// `desired`.
///
/// If they are not equal the operation is a load: the current contents are
/// written into `*expected` and memory is left unchanged. This function
/// never fails spuriously, so `false` always reflects a real mismatch.
///
/// # Parameters
///
/// * `addr` - The shared location.
/// * `expected` - The expected value; receives the observed value on
///   failure.
/// * `desired` - The value written on success.
/// * `_success` - Order of the read-modify-write on success.
/// * `_failure` - Order of the load on failure.
///
/// # Returns
///
/// `true` if `desired` was written.
///
/// # Safety
///
/// See the [module documentation](self).
#[inline]
pub unsafe fn atomic_compare_exchange_strong<T, S, F>(
    addr: *mut T,
    expected: &mut T,
    desired: T,
    _success: S,
    _failure: F,
) -> bool
where
    T: AtomicValue,
    S: CompareExchangeOrder<F>,
    F: MemoryOrder,
{
    let result =
        unsafe { T::Strategy::compare_exchange(addr, *expected, desired, S::ORDERING, F::ORDERING) };
    match result {
        Ok(_) => true,
        Err(actual) => {
            *expected = actual;
            false
        }
    }
}

/// Same as [`atomic_compare_exchange_strong`] but may fail spuriously:
/// `false` can be returned even when the contents equal `*expected`, in
/// which case `*expected` is refreshed with the (equal) observed value.
/// Call it in a loop.
///
/// # Safety
///
/// See the [module documentation](self).
#[inline]
pub unsafe fn atomic_compare_exchange_weak<T, S, F>(
    addr: *mut T,
    expected: &mut T,
    desired: T,
    _success: S,
    _failure: F,
) -> bool
where
    T: AtomicValue,
    S: CompareExchangeOrder<F>,
    F: MemoryOrder,
{
    let result = unsafe {
        T::Strategy::compare_exchange_weak(addr, *expected, desired, S::ORDERING, F::ORDERING)
    };
    match result {
        Ok(_) => true,
        Err(actual) => {
            *expected = actual;
            false
        }
    }
}

/// Establishes ordering between surrounding memory accesses and the atomic
/// operations of other threads.
///
/// All orders are valid; a `Relaxed` fence imposes nothing and emits
/// nothing.
#[inline]
pub fn atomic_thread_fence<O: MemoryOrder>(_order: O) {
    if !matches!(O::KIND, MemoryOrderKind::Relaxed) {
        atomic::fence(O::ORDERING);
    }
}
