/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Native Atomic Types
//!
//! Binds `bool`, the integer types and raw pointers to the platform's
//! atomic types. Integers up to 64 bits use `std::sync::atomic` and are
//! only registered when the target supports that width. 128-bit integers
//! use `portable-atomic` on targets with a double-word compare-exchange and
//! are registered with the generic implementation everywhere else.
//!
//! # Author
//!
//! Haixing Hu

use std::sync::atomic::AtomicPtr;
use std::sync::atomic::Ordering;

use crate::atomic::classifier::AtomicStrategy;
use crate::atomic::classifier::AtomicValue;
use crate::atomic::classifier::Classification;
use crate::atomic::classifier::NativeStrategy;
use crate::atomic::native_atomic_macro::cfg_native_128;
use crate::atomic::native_atomic_macro::cfg_not_native_128;
use crate::atomic::native_atomic_macro::impl_native_atomic;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// A value type with a platform atomic of the same width.
///
/// This trait is sealed. The `native_*` functions carry the safety
/// contract of [`AtomicStrategy`].
pub trait NativeAtomic: sealed::Sealed + Copy + 'static {
    /// The platform atomic type.
    type Atomic;

    /// Alignment of the platform atomic type.
    const ALIGN: usize;

    /// `true` if the platform atomic type never takes a lock.
    const LOCK_FREE: bool;

    /// Views `addr` as the platform atomic type.
    ///
    /// # Safety
    ///
    /// `addr` must be valid for the returned lifetime, aligned to
    /// [`Self::ALIGN`], and only accessed atomically while the reference
    /// is alive.
    unsafe fn atomic<'a>(addr: *mut Self) -> &'a Self::Atomic;

    /// Atomic load.
    ///
    /// # Safety
    ///
    /// See [`AtomicStrategy`].
    unsafe fn native_load(addr: *mut Self, order: Ordering) -> Self;

    /// Atomic store.
    ///
    /// # Safety
    ///
    /// See [`AtomicStrategy`].
    unsafe fn native_store(addr: *mut Self, value: Self, order: Ordering);

    /// Atomic exchange.
    ///
    /// # Safety
    ///
    /// See [`AtomicStrategy`].
    unsafe fn native_swap(addr: *mut Self, value: Self, order: Ordering) -> Self;

    /// Strong compare-exchange.
    ///
    /// # Safety
    ///
    /// See [`AtomicStrategy`].
    unsafe fn native_compare_exchange(
        addr: *mut Self,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self>;

    /// Weak compare-exchange.
    ///
    /// # Safety
    ///
    /// See [`AtomicStrategy`].
    unsafe fn native_compare_exchange_weak(
        addr: *mut Self,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self>;
}

impl<T: NativeAtomic> AtomicStrategy<T> for NativeStrategy {
    const CLASSIFICATION: Classification = Classification::Native;
    const REQUIRED_ALIGN: usize = T::ALIGN;
    const IS_LOCK_FREE: bool = T::LOCK_FREE;

    #[inline]
    unsafe fn load(addr: *mut T, order: Ordering) -> T {
        unsafe { T::native_load(addr, order) }
    }

    #[inline]
    unsafe fn store(addr: *mut T, value: T, order: Ordering) {
        unsafe { T::native_store(addr, value, order) }
    }

    #[inline]
    unsafe fn swap(addr: *mut T, value: T, order: Ordering) -> T {
        unsafe { T::native_swap(addr, value, order) }
    }

    #[inline]
    unsafe fn compare_exchange(
        addr: *mut T,
        current: T,
        new: T,
        success: Ordering,
        failure: Ordering,
    ) -> Result<T, T> {
        unsafe { T::native_compare_exchange(addr, current, new, success, failure) }
    }

    #[inline]
    unsafe fn compare_exchange_weak(
        addr: *mut T,
        current: T,
        new: T,
        success: Ordering,
        failure: Ordering,
    ) -> Result<T, T> {
        unsafe { T::native_compare_exchange_weak(addr, current, new, success, failure) }
    }
}

#[cfg(target_has_atomic = "8")]
impl_native_atomic!(bool, std::sync::atomic::AtomicBool, true);
#[cfg(target_has_atomic = "8")]
impl_native_atomic!(i8, std::sync::atomic::AtomicI8, true);
#[cfg(target_has_atomic = "8")]
impl_native_atomic!(u8, std::sync::atomic::AtomicU8, true);
#[cfg(target_has_atomic = "16")]
impl_native_atomic!(i16, std::sync::atomic::AtomicI16, true);
#[cfg(target_has_atomic = "16")]
impl_native_atomic!(u16, std::sync::atomic::AtomicU16, true);
#[cfg(target_has_atomic = "32")]
impl_native_atomic!(i32, std::sync::atomic::AtomicI32, true);
#[cfg(target_has_atomic = "32")]
impl_native_atomic!(u32, std::sync::atomic::AtomicU32, true);
#[cfg(target_has_atomic = "64")]
impl_native_atomic!(i64, std::sync::atomic::AtomicI64, true);
#[cfg(target_has_atomic = "64")]
impl_native_atomic!(u64, std::sync::atomic::AtomicU64, true);
#[cfg(target_has_atomic = "ptr")]
impl_native_atomic!(isize, std::sync::atomic::AtomicIsize, true);
#[cfg(target_has_atomic = "ptr")]
impl_native_atomic!(usize, std::sync::atomic::AtomicUsize, true);

cfg_native_128! {
    /// `true` if 128-bit integers are native on the target.
    pub(crate) const NATIVE_128: bool = true;

    impl_native_atomic!(i128, portable_atomic::AtomicI128, true);
    impl_native_atomic!(u128, portable_atomic::AtomicU128, true);
}

cfg_not_native_128! {
    /// `true` if 128-bit integers are native on the target.
    pub(crate) const NATIVE_128: bool = false;

    crate::impl_generic_atomic!(i128, u128);
}

// Pointers are compared and exchanged as addresses; the pointee is never
// touched.
#[cfg(target_has_atomic = "ptr")]
impl<U: 'static> sealed::Sealed for *mut U {}

#[cfg(target_has_atomic = "ptr")]
impl<U: 'static> NativeAtomic for *mut U {
    type Atomic = AtomicPtr<U>;

    const ALIGN: usize = std::mem::align_of::<AtomicPtr<U>>();
    const LOCK_FREE: bool = true;

    #[inline]
    unsafe fn atomic<'a>(addr: *mut Self) -> &'a AtomicPtr<U> {
        debug_assert!(addr as usize % Self::ALIGN == 0, "misaligned address for AtomicPtr");
        unsafe { AtomicPtr::from_ptr(addr) }
    }

    #[inline]
    unsafe fn native_load(addr: *mut Self, order: Ordering) -> Self {
        unsafe { Self::atomic(addr) }.load(order)
    }

    #[inline]
    unsafe fn native_store(addr: *mut Self, value: Self, order: Ordering) {
        unsafe { Self::atomic(addr) }.store(value, order);
    }

    #[inline]
    unsafe fn native_swap(addr: *mut Self, value: Self, order: Ordering) -> Self {
        unsafe { Self::atomic(addr) }.swap(value, order)
    }

    #[inline]
    unsafe fn native_compare_exchange(
        addr: *mut Self,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self> {
        unsafe { Self::atomic(addr) }.compare_exchange(current, new, success, failure)
    }

    #[inline]
    unsafe fn native_compare_exchange_weak(
        addr: *mut Self,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self> {
        unsafe { Self::atomic(addr) }.compare_exchange_weak(current, new, success, failure)
    }
}

#[cfg(target_has_atomic = "ptr")]
impl<U: 'static> AtomicValue for *mut U {
    type Strategy = NativeStrategy;
}
