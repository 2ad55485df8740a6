/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Generic Atomic Implementation
//!
//! Atomic operations on arbitrary bitwise-copyable values without padding.
//!
//! A value whose size is 1, 2, 4 or 8 bytes and whose alignment is at least
//! that of the atomic word of the same size is moved through that word and
//! stays lock-free. Every other value is protected by one of a fixed set of
//! striped spin locks picked from its address. Comparisons are byte-wise;
//! `NoUninit` rules out padding, so equal values always have equal bytes.
//!
//! # Author
//!
//! Haixing Hu

use std::mem;
use std::ptr;
use std::sync::atomic::{
    self,
    AtomicBool,
    Ordering,
};

use bytemuck::NoUninit;
use crossbeam_utils::{
    Backoff,
    CachePadded,
};

use crate::atomic::classifier::AtomicStrategy;
use crate::atomic::classifier::Classification;
use crate::atomic::classifier::GenericStrategy;
use crate::atomic::native::NativeAtomic;

/// Number of stripe locks. Prime, so that addresses sharing a power-of-two
/// (or any small) stride still spread over all stripes.
pub(crate) const LOCK_STRIPES: usize = 97;

/// The word a generic value travels through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lane {
    U8,
    U16,
    U32,
    U64,
    Locked,
}

/// Returns `true` if values of `T` can be reinterpreted as the native word
/// `W`: same size, and at least the alignment of the word's atomic.
const fn fits<T, W: NativeAtomic>() -> bool {
    mem::size_of::<T>() == mem::size_of::<W>() && mem::align_of::<T>() >= W::ALIGN
}

const fn lane<T>() -> Lane {
    #[cfg(target_has_atomic = "8")]
    if fits::<T, u8>() {
        return Lane::U8;
    }
    #[cfg(target_has_atomic = "16")]
    if fits::<T, u16>() {
        return Lane::U16;
    }
    #[cfg(target_has_atomic = "32")]
    if fits::<T, u32>() {
        return Lane::U32;
    }
    #[cfg(target_has_atomic = "64")]
    if fits::<T, u64>() {
        return Lane::U64;
    }
    Lane::Locked
}

/// Reinterprets the bytes of `value` as `U`.
///
/// # Safety
///
/// `T` and `U` must have the same size and every byte of `value` must be a
/// valid `U`.
#[inline]
unsafe fn reinterpret<T, U>(value: T) -> U {
    debug_assert_eq!(mem::size_of::<T>(), mem::size_of::<U>());
    unsafe { mem::transmute_copy(&value) }
}

macro_rules! dispatch_lane {
    ($t:ty, $w:ident => $word_op:expr, $locked_op:expr) => {
        match lane::<$t>() {
            #[cfg(target_has_atomic = "8")]
            Lane::U8 => {
                type $w = u8;
                $word_op
            }
            #[cfg(target_has_atomic = "16")]
            Lane::U16 => {
                type $w = u16;
                $word_op
            }
            #[cfg(target_has_atomic = "32")]
            Lane::U32 => {
                type $w = u32;
                $word_op
            }
            #[cfg(target_has_atomic = "64")]
            Lane::U64 => {
                type $w = u64;
                $word_op
            }
            _ => $locked_op,
        }
    };
}

impl<T: NoUninit> AtomicStrategy<T> for GenericStrategy {
    const CLASSIFICATION: Classification = Classification::Generic;
    const REQUIRED_ALIGN: usize = mem::align_of::<T>();
    const IS_LOCK_FREE: bool = !matches!(lane::<T>(), Lane::Locked);

    #[inline]
    unsafe fn load(addr: *mut T, order: Ordering) -> T {
        // SAFETY: word lanes only exist for same-sized words whose atomic
        // alignment `T` satisfies; the bytes loaded were stored as a `T`.
        unsafe {
            dispatch_lane!(T, W => {
                reinterpret(W::native_load(addr.cast::<W>(), order))
            }, {
                let _guard = stripe(addr).lock(order);
                ptr::read(addr)
            })
        }
    }

    #[inline]
    unsafe fn store(addr: *mut T, value: T, order: Ordering) {
        unsafe {
            dispatch_lane!(T, W => {
                W::native_store(addr.cast::<W>(), reinterpret(value), order)
            }, {
                let _guard = stripe(addr).lock(order);
                ptr::write(addr, value)
            })
        }
    }

    #[inline]
    unsafe fn swap(addr: *mut T, value: T, order: Ordering) -> T {
        unsafe {
            dispatch_lane!(T, W => {
                reinterpret(W::native_swap(addr.cast::<W>(), reinterpret(value), order))
            }, {
                let _guard = stripe(addr).lock(order);
                ptr::replace(addr, value)
            })
        }
    }

    #[inline]
    unsafe fn compare_exchange(
        addr: *mut T,
        current: T,
        new: T,
        success: Ordering,
        failure: Ordering,
    ) -> Result<T, T> {
        unsafe {
            dispatch_lane!(T, W => {
                W::native_compare_exchange(
                    addr.cast::<W>(),
                    reinterpret(current),
                    reinterpret(new),
                    success,
                    failure,
                )
                .map(|w| reinterpret(w))
                .map_err(|w| reinterpret(w))
            }, {
                locked_compare_exchange(addr, current, new, success)
            })
        }
    }

    #[inline]
    unsafe fn compare_exchange_weak(
        addr: *mut T,
        current: T,
        new: T,
        success: Ordering,
        failure: Ordering,
    ) -> Result<T, T> {
        unsafe {
            dispatch_lane!(T, W => {
                W::native_compare_exchange_weak(
                    addr.cast::<W>(),
                    reinterpret(current),
                    reinterpret(new),
                    success,
                    failure,
                )
                .map(|w| reinterpret(w))
                .map_err(|w| reinterpret(w))
            }, {
                // The locked path has no spurious failures.
                locked_compare_exchange(addr, current, new, success)
            })
        }
    }
}

/// Compare-exchange under the stripe lock of `addr`.
///
/// # Safety
///
/// See [`AtomicStrategy`].
unsafe fn locked_compare_exchange<T: NoUninit>(
    addr: *mut T,
    current: T,
    new: T,
    order: Ordering,
) -> Result<T, T> {
    let _guard = stripe(addr).lock(order);
    let actual = unsafe { ptr::read(addr) };
    if bytemuck::bytes_of(&actual) == bytemuck::bytes_of(&current) {
        unsafe { ptr::write(addr, new) };
        Ok(actual)
    } else {
        Err(actual)
    }
}

/// A spin lock guarding every generic value whose address maps to it.
struct StripeLock {
    locked: AtomicBool,
}

impl StripeLock {
    const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Acquires the lock.
    ///
    /// Acquiring and releasing give the guarded access acquire and release
    /// semantics. A `SeqCst` request additionally fences on both sides so
    /// the access joins the single total order.
    #[inline]
    fn lock(&'static self, order: Ordering) -> StripeGuard {
        let backoff = Backoff::new();
        let mut reported = false;
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            if !reported && backoff.is_completed() {
                log::trace!("generic atomic stripe lock contended, yielding");
                reported = true;
            }
            backoff.snooze();
        }
        let seq_cst = order == Ordering::SeqCst;
        if seq_cst {
            atomic::fence(Ordering::SeqCst);
        }
        StripeGuard {
            lock: self,
            seq_cst,
        }
    }
}

/// Releases the stripe lock when dropped.
struct StripeGuard {
    lock: &'static StripeLock,
    seq_cst: bool,
}

impl Drop for StripeGuard {
    #[inline]
    fn drop(&mut self) {
        if self.seq_cst {
            atomic::fence(Ordering::SeqCst);
        }
        self.lock.locked.store(false, Ordering::Release);
    }
}

#[allow(clippy::declare_interior_mutable_const)]
const UNLOCKED: CachePadded<StripeLock> = CachePadded::new(StripeLock::new());

static STRIPES: [CachePadded<StripeLock>; LOCK_STRIPES] = [UNLOCKED; LOCK_STRIPES];

/// Returns the stripe lock associated with `addr`.
#[inline]
fn stripe<T>(addr: *mut T) -> &'static StripeLock {
    &STRIPES[addr as usize % LOCK_STRIPES]
}

// No atomic instructions exist for these; they travel through the word of
// the same width.
crate::impl_generic_atomic!(f32, f64, char);
