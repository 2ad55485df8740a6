/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Native Atomic Macro
//!
//! Provides a macro that binds a value type to the platform atomic type of
//! the same width, and the `cfg` gates for 128-bit integers.
//!
//! # Author
//!
//! Haixing Hu

/// Macro to register a value type with the native atomic implementation.
///
/// The platform atomic type must provide `from_ptr`, `load`, `store`,
/// `swap`, `compare_exchange` and `compare_exchange_weak` with the usual
/// signatures, and have the same size as the value type.
///
/// # Parameters
///
/// * `$value_type` - The value type (e.g., `i32`)
/// * `$atomic_type` - The platform atomic type (e.g.,
///   `std::sync::atomic::AtomicI32`)
/// * `$lock_free` - Whether the platform type is always lock-free
macro_rules! impl_native_atomic {
    ($value_type:ty, $atomic_type:ty, $lock_free:expr) => {
        impl crate::atomic::native::sealed::Sealed for $value_type {}

        impl crate::atomic::native::NativeAtomic for $value_type {
            type Atomic = $atomic_type;

            const ALIGN: usize = std::mem::align_of::<$atomic_type>();
            const LOCK_FREE: bool = $lock_free;

            #[inline]
            unsafe fn atomic<'a>(addr: *mut Self) -> &'a $atomic_type {
                debug_assert!(
                    addr as usize % Self::ALIGN == 0,
                    concat!("misaligned address for ", stringify!($atomic_type))
                );
                // SAFETY: the caller guarantees `addr` is valid, aligned for
                // the atomic type and only accessed atomically.
                unsafe { <$atomic_type>::from_ptr(addr) }
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

        impl crate::atomic::classifier::AtomicValue for $value_type {
            type Strategy = crate::atomic::classifier::NativeStrategy;
        }
    };
}

pub(crate) use impl_native_atomic;

/// Keeps the items only on targets whose baseline includes a 128-bit
/// compare-exchange (`cmpxchg16b` on x86_64, `ldxp`/`stxp` on aarch64).
macro_rules! cfg_native_128 {
    ($($item:item)*) => {
        $(
            #[cfg(any(
                target_arch = "aarch64",
                all(target_arch = "x86_64", target_feature = "cmpxchg16b")
            ))]
            $item
        )*
    };
}

pub(crate) use cfg_native_128;

/// Keeps the items only on targets without a 128-bit compare-exchange.
macro_rules! cfg_not_native_128 {
    ($($item:item)*) => {
        $(
            #[cfg(not(any(
                target_arch = "aarch64",
                all(target_arch = "x86_64", target_feature = "cmpxchg16b")
            )))]
            $item
        )*
    };
}

pub(crate) use cfg_not_native_128;
