/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Operation Descriptors
//!
//! One zero-sized descriptor per read-modify-write kind. A descriptor knows
//! how to combine the old value with an operand ([`Operation::apply`]) and
//! how to do so atomically ([`Operation::fetch_apply`]). The default
//! `fetch_apply` is the compare-exchange retry loop of
//! [`rmw`](crate::atomic::rmw); integer add, sub, and, or, xor, nand, min
//! and max override it with the hardware fetch instruction wherever the
//! integer type is native.
//!
//! Integer arithmetic wraps on overflow like the hardware instructions do,
//! and shift amounts are masked to the bit width. Division and remainder by
//! zero panic inside `apply`, before anything is written.
//!
//! Raw pointers behave like their address: add, sub, and, or, xor and nand
//! take a `usize` byte operand, and min and max compare addresses. The
//! result keeps the provenance of the old pointer.
//!
//! User types registered with
//! [`impl_generic_atomic!`](crate::impl_generic_atomic) can implement any
//! descriptor by providing `apply`:
//!
//! ```rust
//! use bytemuck::NoUninit;
//! use prism3_atomic_ops::atomic::operation::{Add, Operation};
//! use prism3_atomic_ops::impl_generic_atomic;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, NoUninit)]
//! #[repr(C)]
//! struct Stats {
//!     count: u64,
//!     total: u64,
//! }
//!
//! impl_generic_atomic!(Stats);
//!
//! impl Operation<Stats> for Add {
//!     fn apply(old: Stats, operand: Stats) -> Stats {
//!         Stats {
//!             count: old.count.wrapping_add(operand.count),
//!             total: old.total.wrapping_add(operand.total),
//!         }
//!     }
//! }
//! ```
//!
//! # Author
//!
//! Haixing Hu

use std::sync::atomic::Ordering;

use crate::atomic::classifier::AtomicValue;
use crate::atomic::native::NativeAtomic;
use crate::atomic::native_atomic_macro::cfg_native_128;
use crate::atomic::native_atomic_macro::cfg_not_native_128;
use crate::atomic::rmw;

/// A read-modify-write operation on values of `T` with operands of `V`.
pub trait Operation<T: AtomicValue, V: Copy = T> {
    /// Combines the old value with the operand. Must be pure.
    fn apply(old: T, operand: V) -> T;

    /// Atomically replaces the value at `addr` with
    /// `apply(old, operand)` and returns `old`.
    ///
    /// # Safety
    ///
    /// `addr` must satisfy the contract of the
    /// [primitives](crate::atomic::primitives).
    #[inline]
    unsafe fn fetch_apply(addr: *mut T, operand: V, order: Ordering) -> T {
        unsafe { rmw::fetch_update_with(addr, order, |old| Self::apply(old, operand)).0 }
    }
}

/// Types with a multiplicative identity, used by increment and decrement.
pub trait One: Copy {
    /// The value one.
    const ONE: Self;
}

macro_rules! operation_descriptor {
    ($($name:ident => $doc:expr),* $(,)?) => {
        $(
            #[doc = $doc]
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $name;
        )*
    };
}

operation_descriptor!(
    Add => "`old + operand`.",
    Sub => "`old - operand`.",
    Mul => "`old * operand`.",
    Div => "`old / operand`.",
    Mod => "`old % operand`.",
    And => "`old & operand`.",
    Or => "`old | operand`.",
    Xor => "`old ^ operand`.",
    Nand => "`!(old & operand)`.",
    Min => "The smaller of `old` and `operand`; `old` when they compare equal.",
    Max => "The larger of `old` and `operand`; `old` when they compare equal.",
    LShift => "`old << operand`, with the shift amount masked to the bit width.",
    RShift => "`old >> operand`, with the shift amount masked to the bit width.",
);

/// Descriptor with a native fetch instruction on the platform atomic.
macro_rules! native_fetch_operation {
    ($value_type:ty, $op:ident, $fetch:ident, |$old:ident, $operand:ident| $apply:expr) => {
        impl Operation<$value_type> for $op {
            #[inline]
            fn apply($old: $value_type, $operand: $value_type) -> $value_type {
                $apply
            }

            #[inline]
            unsafe fn fetch_apply(
                addr: *mut $value_type,
                operand: $value_type,
                order: Ordering,
            ) -> $value_type {
                unsafe { <$value_type as NativeAtomic>::atomic(addr) }.$fetch(operand, order)
            }
        }
    };
}

/// Descriptor computed through the compare-exchange loop.
macro_rules! loop_operation {
    ($value_type:ty, $op:ident, $operand_type:ty, |$old:ident, $operand:ident| $apply:expr) => {
        impl Operation<$value_type, $operand_type> for $op {
            #[inline]
            fn apply($old: $value_type, $operand: $operand_type) -> $value_type {
                $apply
            }
        }
    };
}

macro_rules! integer_operations {
    (native: $($value_type:ty),*) => {
        $(
            native_fetch_operation!($value_type, Add, fetch_add, |old, operand| old.wrapping_add(operand));
            native_fetch_operation!($value_type, Sub, fetch_sub, |old, operand| old.wrapping_sub(operand));
            native_fetch_operation!($value_type, And, fetch_and, |old, operand| old & operand);
            native_fetch_operation!($value_type, Or, fetch_or, |old, operand| old | operand);
            native_fetch_operation!($value_type, Xor, fetch_xor, |old, operand| old ^ operand);
            native_fetch_operation!($value_type, Nand, fetch_nand, |old, operand| !(old & operand));
            native_fetch_operation!($value_type, Min, fetch_min, |old, operand| {
                if operand < old { operand } else { old }
            });
            native_fetch_operation!($value_type, Max, fetch_max, |old, operand| {
                if operand > old { operand } else { old }
            });
            integer_operations!(@arithmetic $value_type);
        )*
    };
    (looped: $($value_type:ty),*) => {
        $(
            loop_operation!($value_type, Add, $value_type, |old, operand| old.wrapping_add(operand));
            loop_operation!($value_type, Sub, $value_type, |old, operand| old.wrapping_sub(operand));
            loop_operation!($value_type, And, $value_type, |old, operand| old & operand);
            loop_operation!($value_type, Or, $value_type, |old, operand| old | operand);
            loop_operation!($value_type, Xor, $value_type, |old, operand| old ^ operand);
            loop_operation!($value_type, Nand, $value_type, |old, operand| !(old & operand));
            loop_operation!($value_type, Min, $value_type, |old, operand| {
                if operand < old { operand } else { old }
            });
            loop_operation!($value_type, Max, $value_type, |old, operand| {
                if operand > old { operand } else { old }
            });
            integer_operations!(@arithmetic $value_type);
        )*
    };
    (@arithmetic $value_type:ty) => {
        loop_operation!($value_type, Mul, $value_type, |old, operand| old.wrapping_mul(operand));
        loop_operation!($value_type, Div, $value_type, |old, operand| old.wrapping_div(operand));
        loop_operation!($value_type, Mod, $value_type, |old, operand| old.wrapping_rem(operand));
        loop_operation!($value_type, LShift, u32, |old, operand| old.wrapping_shl(operand));
        loop_operation!($value_type, RShift, u32, |old, operand| old.wrapping_shr(operand));

        impl One for $value_type {
            const ONE: Self = 1;
        }
    };
}

macro_rules! float_operations {
    ($($value_type:ty),*) => {
        $(
            loop_operation!($value_type, Add, $value_type, |old, operand| old + operand);
            loop_operation!($value_type, Sub, $value_type, |old, operand| old - operand);
            loop_operation!($value_type, Mul, $value_type, |old, operand| old * operand);
            loop_operation!($value_type, Div, $value_type, |old, operand| old / operand);
            loop_operation!($value_type, Mod, $value_type, |old, operand| old % operand);
            loop_operation!($value_type, Min, $value_type, |old, operand| {
                if operand < old { operand } else { old }
            });
            loop_operation!($value_type, Max, $value_type, |old, operand| {
                if operand > old { operand } else { old }
            });

            impl One for $value_type {
                const ONE: Self = 1.0;
            }
        )*
    };
}

#[cfg(target_has_atomic = "8")]
integer_operations!(native: i8, u8);
#[cfg(target_has_atomic = "16")]
integer_operations!(native: i16, u16);
#[cfg(target_has_atomic = "32")]
integer_operations!(native: i32, u32);
#[cfg(target_has_atomic = "64")]
integer_operations!(native: i64, u64);
#[cfg(target_has_atomic = "ptr")]
integer_operations!(native: isize, usize);

cfg_native_128! {
    integer_operations!(native: i128, u128);
}

cfg_not_native_128! {
    integer_operations!(looped: i128, u128);
}

float_operations!(f32, f64);

#[cfg(target_has_atomic = "8")]
native_fetch_operation!(bool, And, fetch_and, |old, operand| old & operand);
#[cfg(target_has_atomic = "8")]
native_fetch_operation!(bool, Or, fetch_or, |old, operand| old | operand);
#[cfg(target_has_atomic = "8")]
native_fetch_operation!(bool, Xor, fetch_xor, |old, operand| old ^ operand);
#[cfg(target_has_atomic = "8")]
native_fetch_operation!(bool, Nand, fetch_nand, |old, operand| !(old & operand));

/// Moves `ptr` to `addr` without dropping its provenance.
#[cfg(target_has_atomic = "ptr")]
#[inline]
fn with_addr<U>(ptr: *mut U, addr: usize) -> *mut U {
    ptr.wrapping_byte_add(addr.wrapping_sub(ptr as usize))
}

macro_rules! pointer_operations {
    ($($op:ident => |$old:ident, $operand:ident| $apply:expr),* $(,)?) => {
        $(
            #[cfg(target_has_atomic = "ptr")]
            impl<U: 'static> Operation<*mut U, usize> for $op {
                #[inline]
                fn apply($old: *mut U, $operand: usize) -> *mut U {
                    $apply
                }
            }
        )*
    };
}

pointer_operations!(
    Add => |old, operand| old.wrapping_byte_add(operand),
    Sub => |old, operand| old.wrapping_byte_sub(operand),
    And => |old, operand| with_addr(old, old as usize & operand),
    Or => |old, operand| with_addr(old, old as usize | operand),
    Xor => |old, operand| with_addr(old, old as usize ^ operand),
    Nand => |old, operand| with_addr(old, !(old as usize & operand)),
);

#[cfg(target_has_atomic = "ptr")]
impl<U: 'static> Operation<*mut U> for Min {
    #[inline]
    fn apply(old: *mut U, operand: *mut U) -> *mut U {
        if (operand as usize) < (old as usize) {
            operand
        } else {
            old
        }
    }
}

#[cfg(target_has_atomic = "ptr")]
impl<U: 'static> Operation<*mut U> for Max {
    #[inline]
    fn apply(old: *mut U, operand: *mut U) -> *mut U {
        if (operand as usize) > (old as usize) {
            operand
        } else {
            old
        }
    }
}
