/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Type Classifier
//!
//! Decides, at compile time, which implementation an atomic operation on a
//! value type uses:
//!
//! - **Native**: `bool`, the integer types up to
//!   [`MAX_ATOMIC_INTEGER_SIZE`] bytes and raw pointers. Operations map
//!   directly onto the platform's atomic instructions.
//! - **Generic**: any other bitwise-copyable type without padding
//!   (`bytemuck::NoUninit`). Values that happen to fit an atomic word are
//!   moved through that word; larger values go through a striped lock
//!   table.
//!
//! The choice is carried by the associated [`AtomicValue::Strategy`] type,
//! so every call site is monomorphized to exactly one implementation and
//! no branch on the classification exists at run time. Types that are
//! neither native nor `NoUninit` cannot name a strategy and are rejected
//! by the compiler.
//!
//! # Author
//!
//! Haixing Hu

use std::sync::atomic::Ordering;

use crate::atomic::native::NATIVE_128;

/// Compile-time classification of an atomic value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Operations use the platform's atomic instructions for the type.
    Native,
    /// Operations use the generic byte-blob implementation.
    Generic,
}

/// Largest integer width, in bytes, with native atomic support on the
/// target.
///
/// Integer types no wider than this are classified native; wider ones are
/// generic.
pub const MAX_ATOMIC_INTEGER_SIZE: usize = if NATIVE_128 { 16 } else { 8 };

/// Implementation of the atomic primitives for one value type.
///
/// All functions take a raw address and operate only on the bytes at that
/// address. They never allocate.
///
/// # Safety
///
/// Callers of every function must guarantee that `addr` is non-null, valid
/// for reads and writes of `T`, aligned to [`Self::REQUIRED_ALIGN`], and
/// only accessed through atomic operations on `T` for the duration of the
/// call.
pub trait AtomicStrategy<T> {
    /// The classification this strategy implements.
    const CLASSIFICATION: Classification;

    /// Alignment, in bytes, an address must have to be used with this
    /// strategy.
    const REQUIRED_ALIGN: usize;

    /// `true` if the operations never take a lock.
    const IS_LOCK_FREE: bool;

    /// Atomically loads the value at `addr`.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn load(addr: *mut T, order: Ordering) -> T;

    /// Atomically stores `value` at `addr`.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn store(addr: *mut T, value: T, order: Ordering);

    /// Atomically replaces the value at `addr`, returning the previous
    /// value.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn swap(addr: *mut T, value: T, order: Ordering) -> T;

    /// Replaces the value at `addr` with `new` if it equals `current`.
    ///
    /// Returns `Ok(previous)` on success and `Err(actual)` otherwise. Never
    /// fails spuriously.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn compare_exchange(
        addr: *mut T,
        current: T,
        new: T,
        success: Ordering,
        failure: Ordering,
    ) -> Result<T, T>;

    /// Same as [`compare_exchange`](Self::compare_exchange) but may fail
    /// spuriously.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn compare_exchange_weak(
        addr: *mut T,
        current: T,
        new: T,
        success: Ordering,
        failure: Ordering,
    ) -> Result<T, T>;
}

/// Strategy backed by the platform's atomic instructions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeStrategy;

/// Strategy for arbitrary bitwise-copyable values without padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericStrategy;

/// A type that can be accessed through the atomic primitives.
///
/// Implemented for the native types by this crate. Plain-old-data types
/// without padding opt in with [`impl_generic_atomic!`](crate::impl_generic_atomic):
///
/// ```rust
/// use bytemuck::NoUninit;
/// use prism3_atomic_ops::impl_generic_atomic;
///
/// #[derive(Debug, Clone, Copy, PartialEq, NoUninit)]
/// #[repr(C)]
/// struct Extent {
///     offset: u64,
///     length: u64,
/// }
///
/// impl_generic_atomic!(Extent);
/// ```
pub trait AtomicValue: Copy + 'static {
    /// The implementation selected for this type.
    type Strategy: AtomicStrategy<Self>;

    /// The classification of this type.
    const CLASSIFICATION: Classification =
        <Self::Strategy as AtomicStrategy<Self>>::CLASSIFICATION;
}

/// Returns the classification of `T`.
#[inline]
pub const fn classify<T: AtomicValue>() -> Classification {
    T::CLASSIFICATION
}

/// Returns `true` if atomic operations on `T` never take a lock.
#[inline]
pub const fn is_lock_free<T: AtomicValue>() -> bool {
    <T::Strategy as AtomicStrategy<T>>::IS_LOCK_FREE
}

/// Returns the address alignment atomic operations on `T` require.
#[inline]
pub const fn required_align<T: AtomicValue>() -> usize {
    <T::Strategy as AtomicStrategy<T>>::REQUIRED_ALIGN
}

/// Registers types with the generic atomic implementation.
///
/// Each type must implement `bytemuck::NoUninit`, which guarantees it is
/// bitwise copyable and has no padding bytes; otherwise the expansion does
/// not compile.
#[macro_export]
macro_rules! impl_generic_atomic {
    ($($value_type:ty),+ $(,)?) => {
        $(
            impl $crate::atomic::AtomicValue for $value_type {
                type Strategy = $crate::atomic::GenericStrategy;
            }
        )+
    };
}
