/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Reference
//!
//! A lightweight handle to one value in memory that routes every access
//! through the atomic primitives with `Relaxed` ordering. The handle does
//! not own the value and never frees it.
//!
//! # Author
//!
//! Haixing Hu

use std::fmt;
use std::marker::PhantomData;
use std::ops;
use std::ptr::NonNull;

use crate::atomic::classifier::required_align;
use crate::atomic::classifier::AtomicValue;
use crate::atomic::memory_order::Relaxed;
use crate::atomic::operation as op;
use crate::atomic::operation::One;
use crate::atomic::operation::Operation;
use crate::atomic::primitives;
use crate::atomic::rmw;

/// Atomic reference to a single value.
///
/// Every method is one atomic primitive or read-modify-write operation on
/// the referenced value, performed with `Relaxed` ordering. Use the free
/// functions of [`atomic`](crate::atomic) when stronger ordering is needed.
///
/// # Operators
///
/// - Compound assignments (`+=`, `-=`, `*=`, `/=`, `%=`, `&=`, `|=`, `^=`,
///   `<<=`, `>>=`) are atomic: each is exactly one read-modify-write.
/// - Value operators (`+`, `-`, `*`, `/`, `%`, `&`, `|`, `^`, `<<`, `>>`,
///   `!`, unary `-`) and comparisons perform one relaxed load and then
///   compute on the loaded value. They are **not** atomic compound
///   operations.
///
/// # Lifetime
///
/// The handle borrows the value for `'a`, so the value cannot be touched
/// non-atomically while any copy of the handle is alive. Copies may be
/// moved to other threads freely.
///
/// # Example
///
/// ```rust
/// use prism3_atomic_ops::atomic::AtomicRef;
/// use std::thread;
///
/// let mut hits = 0u64;
/// let counter = AtomicRef::new(&mut hits);
///
/// thread::scope(|s| {
///     for _ in 0..4 {
///         s.spawn(move || {
///             for _ in 0..1000 {
///                 counter.inc();
///             }
///         });
///     }
/// });
///
/// assert_eq!(hits, 4000);
/// ```
///
/// # Author
///
/// Haixing Hu
pub struct AtomicRef<'a, T> {
    ptr: NonNull<T>,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T: AtomicValue> AtomicRef<'a, T> {
    /// Creates an atomic reference to `value`.
    ///
    /// # Parameters
    ///
    /// * `value` - The value to access atomically.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not aligned to
    /// [`required_align::<T>()`](crate::atomic::required_align). This can
    /// only happen for native types whose platform atomic is more strictly
    /// aligned than the type itself, such as `u64` on some 32-bit targets.
    #[inline]
    pub fn new(value: &'a mut T) -> Self {
        let ptr = NonNull::from(value);
        assert!(
            ptr.as_ptr() as usize % required_align::<T>() == 0,
            "address {:p} is not aligned to {} bytes",
            ptr.as_ptr(),
            required_align::<T>()
        );
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    /// Creates an atomic reference from a raw pointer.
    ///
    /// # Safety
    ///
    /// For the whole lifetime `'a`, `ptr` must be non-null, valid for reads
    /// and writes, aligned to
    /// [`required_align::<T>()`](crate::atomic::required_align), and only
    /// accessed through atomic operations.
    #[inline]
    pub unsafe fn from_ptr(ptr: *mut T) -> Self {
        debug_assert!(!ptr.is_null(), "null pointer passed to AtomicRef::from_ptr");
        Self {
            ptr: unsafe { NonNull::new_unchecked(ptr) },
            _marker: PhantomData,
        }
    }

    /// Returns the address of the referenced value.
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Loads the current value.
    #[inline]
    pub fn load(&self) -> T {
        // SAFETY: guaranteed by the constructors for the lifetime 'a.
        unsafe { primitives::atomic_load(self.as_ptr(), Relaxed) }
    }

    /// Stores `value` and returns it.
    #[inline]
    pub fn store(&self, value: T) -> T {
        unsafe { primitives::atomic_store(self.as_ptr(), value, Relaxed) };
        value
    }

    /// Replaces the value, returning the previous one.
    #[inline]
    pub fn swap(&self, value: T) -> T {
        unsafe { primitives::atomic_exchange(self.as_ptr(), value, Relaxed) }
    }

    /// Replaces the value with `new` if it equals `current`.
    ///
    /// # Returns
    ///
    /// `Ok(previous)` if `new` was written, otherwise `Err(actual)` with
    /// the value that was observed.
    #[inline]
    pub fn compare_exchange(&self, current: T, new: T) -> Result<T, T> {
        let mut expected = current;
        let exchanged = unsafe {
            primitives::atomic_compare_exchange_strong(
                self.as_ptr(),
                &mut expected,
                new,
                Relaxed,
                Relaxed,
            )
        };
        if exchanged {
            Ok(current)
        } else {
            Err(expected)
        }
    }

    /// Same as [`compare_exchange`](Self::compare_exchange) but may fail
    /// spuriously.
    #[inline]
    pub fn compare_exchange_weak(&self, current: T, new: T) -> Result<T, T> {
        let mut expected = current;
        let exchanged = unsafe {
            primitives::atomic_compare_exchange_weak(
                self.as_ptr(),
                &mut expected,
                new,
                Relaxed,
                Relaxed,
            )
        };
        if exchanged {
            Ok(current)
        } else {
            Err(expected)
        }
    }

    /// Atomically replaces the value with `f(old)`, returning `old`.
    ///
    /// `f` may run more than once under contention.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_atomic_ops::atomic::AtomicRef;
    ///
    /// let mut level = 3u32;
    /// let r = AtomicRef::new(&mut level);
    /// assert_eq!(r.fetch_update(|v| v.saturating_sub(5)), 3);
    /// assert_eq!(r.load(), 0);
    /// ```
    #[inline]
    pub fn fetch_update<F>(&self, f: F) -> T
    where
        F: FnMut(T) -> T,
    {
        unsafe { rmw::atomic_fetch_update(self.as_ptr(), Relaxed, f) }
    }

    /// Atomically replaces the value with `f(old)`, returning the new
    /// value.
    #[inline]
    pub fn update_fetch<F>(&self, f: F) -> T
    where
        F: FnMut(T) -> T,
    {
        unsafe { rmw::atomic_update_fetch(self.as_ptr(), Relaxed, f) }
    }
}

macro_rules! ref_rmw_methods {
    ($(
        $op:ident: $fetch_op:ident => $atomic_fetch_op:ident,
        $op_fetch:ident => $atomic_op_fetch:ident, $what:expr;
    )*) => {
        impl<'a, T: AtomicValue> AtomicRef<'a, T> {
            $(
                #[doc = concat!("Atomically ", $what, ", returning the previous value.")]
                #[inline]
                pub fn $fetch_op<V: Copy>(&self, operand: V) -> T
                where
                    op::$op: Operation<T, V>,
                {
                    unsafe { rmw::$atomic_fetch_op(self.as_ptr(), operand, Relaxed) }
                }

                #[doc = concat!("Atomically ", $what, ", returning the new value.")]
                #[inline]
                pub fn $op_fetch<V: Copy>(&self, operand: V) -> T
                where
                    op::$op: Operation<T, V>,
                {
                    unsafe { rmw::$atomic_op_fetch(self.as_ptr(), operand, Relaxed) }
                }
            )*
        }
    };
}

ref_rmw_methods! {
    Add: fetch_add => atomic_fetch_add, add_fetch => atomic_add_fetch, "adds `operand`";
    Sub: fetch_sub => atomic_fetch_sub, sub_fetch => atomic_sub_fetch, "subtracts `operand`";
    Mul: fetch_mul => atomic_fetch_mul, mul_fetch => atomic_mul_fetch, "multiplies by `operand`";
    Div: fetch_div => atomic_fetch_div, div_fetch => atomic_div_fetch, "divides by `operand`";
    Mod: fetch_mod => atomic_fetch_mod, mod_fetch => atomic_mod_fetch,
        "takes the remainder by `operand`";
    And: fetch_and => atomic_fetch_and, and_fetch => atomic_and_fetch, "ANDs with `operand`";
    Or: fetch_or => atomic_fetch_or, or_fetch => atomic_or_fetch, "ORs with `operand`";
    Xor: fetch_xor => atomic_fetch_xor, xor_fetch => atomic_xor_fetch, "XORs with `operand`";
    Nand: fetch_nand => atomic_fetch_nand, nand_fetch => atomic_nand_fetch,
        "NANDs with `operand`";
    Min: fetch_min => atomic_fetch_min, min_fetch => atomic_min_fetch,
        "keeps the smaller of the value and `operand`";
    Max: fetch_max => atomic_fetch_max, max_fetch => atomic_max_fetch,
        "keeps the larger of the value and `operand`";
    LShift: fetch_lshift => atomic_fetch_lshift, lshift_fetch => atomic_lshift_fetch,
        "shifts left by `operand` bits";
    RShift: fetch_rshift => atomic_fetch_rshift, rshift_fetch => atomic_rshift_fetch,
        "shifts right by `operand` bits";
}

impl<'a, T> AtomicRef<'a, T>
where
    T: AtomicValue + One,
    op::Add: Operation<T>,
    op::Sub: Operation<T>,
{
    /// Atomically adds one.
    #[inline]
    pub fn inc(&self) {
        unsafe { rmw::atomic_increment(self.as_ptr(), Relaxed) }
    }

    /// Atomically subtracts one.
    #[inline]
    pub fn dec(&self) {
        unsafe { rmw::atomic_decrement(self.as_ptr(), Relaxed) }
    }

    /// Atomically adds one and returns the new value (`++x`).
    #[inline]
    pub fn pre_increment(&self) -> T {
        self.add_fetch(T::ONE)
    }

    /// Atomically adds one and returns the previous value (`x++`).
    #[inline]
    pub fn post_increment(&self) -> T {
        self.fetch_add(T::ONE)
    }

    /// Atomically subtracts one and returns the new value (`--x`).
    #[inline]
    pub fn pre_decrement(&self) -> T {
        self.sub_fetch(T::ONE)
    }

    /// Atomically subtracts one and returns the previous value (`x--`).
    #[inline]
    pub fn post_decrement(&self) -> T {
        self.fetch_sub(T::ONE)
    }
}

impl<T> Clone for AtomicRef<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AtomicRef<'_, T> {}

// SAFETY: the handle only ever accesses the value atomically, so sharing
// or sending it is sound whenever the value itself may cross threads.
unsafe impl<T: AtomicValue + Send> Send for AtomicRef<'_, T> {}
unsafe impl<T: AtomicValue + Send> Sync for AtomicRef<'_, T> {}

macro_rules! impl_assign_operator {
    ($($trait:ident::$method:ident => $op:ident($operand:ty) via $op_fetch:ident),* $(,)?) => {
        $(
            impl<T> ops::$trait<$operand> for AtomicRef<'_, T>
            where
                T: AtomicValue,
                op::$op: Operation<T, $operand>,
            {
                #[inline]
                fn $method(&mut self, operand: $operand) {
                    self.$op_fetch(operand);
                }
            }
        )*
    };
}

impl_assign_operator!(
    AddAssign::add_assign => Add(T) via add_fetch,
    SubAssign::sub_assign => Sub(T) via sub_fetch,
    MulAssign::mul_assign => Mul(T) via mul_fetch,
    DivAssign::div_assign => Div(T) via div_fetch,
    RemAssign::rem_assign => Mod(T) via mod_fetch,
    BitAndAssign::bitand_assign => And(T) via and_fetch,
    BitOrAssign::bitor_assign => Or(T) via or_fetch,
    BitXorAssign::bitxor_assign => Xor(T) via xor_fetch,
    ShlAssign::shl_assign => LShift(u32) via lshift_fetch,
    ShrAssign::shr_assign => RShift(u32) via rshift_fetch,
);

macro_rules! impl_value_operator {
    ($($trait:ident::$method:ident($rhs:ty)),* $(,)?) => {
        $(
            impl<T> ops::$trait<$rhs> for AtomicRef<'_, T>
            where
                T: AtomicValue + ops::$trait<$rhs, Output = T>,
            {
                type Output = T;

                #[inline]
                fn $method(self, rhs: $rhs) -> T {
                    ops::$trait::$method(self.load(), rhs)
                }
            }
        )*
    };
}

impl_value_operator!(
    Add::add(T),
    Sub::sub(T),
    Mul::mul(T),
    Div::div(T),
    Rem::rem(T),
    BitAnd::bitand(T),
    BitOr::bitor(T),
    BitXor::bitxor(T),
    Shl::shl(u32),
    Shr::shr(u32),
);

impl<T> ops::Not for AtomicRef<'_, T>
where
    T: AtomicValue + ops::Not<Output = T>,
{
    type Output = T;

    #[inline]
    fn not(self) -> T {
        !self.load()
    }
}

impl<T> ops::Neg for AtomicRef<'_, T>
where
    T: AtomicValue + ops::Neg<Output = T>,
{
    type Output = T;

    #[inline]
    fn neg(self) -> T {
        -self.load()
    }
}

impl<T: AtomicValue + PartialEq> PartialEq<T> for AtomicRef<'_, T> {
    #[inline]
    fn eq(&self, other: &T) -> bool {
        self.load() == *other
    }
}

impl<T: AtomicValue + PartialOrd> PartialOrd<T> for AtomicRef<'_, T> {
    #[inline]
    fn partial_cmp(&self, other: &T) -> Option<std::cmp::Ordering> {
        self.load().partial_cmp(other)
    }
}

impl<T: AtomicValue + fmt::Debug> fmt::Debug for AtomicRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicRef")
            .field("ptr", &self.ptr)
            .field("value", &self.load())
            .finish()
    }
}

impl<T: AtomicValue + fmt::Display> fmt::Display for AtomicRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.load())
    }
}
