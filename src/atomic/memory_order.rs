/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Memory Orders
//!
//! Memory orders are distinct zero-sized types rather than a runtime value,
//! so that passing an order an operation does not accept is rejected at
//! compile time instead of being silently strengthened to `SeqCst`.
//!
//! Each operation family names the orders it accepts through a marker
//! trait:
//!
//! | Operation | Accepted orders |
//! |---|---|
//! | load | [`LoadOrder`]: `Relaxed`, `Acquire`, `SeqCst` |
//! | store | [`StoreOrder`]: `Relaxed`, `Release`, `SeqCst` |
//! | exchange, fence, read-modify-write | any [`MemoryOrder`] |
//! | compare-exchange | [`CompareExchangeOrder<F>`] pairs |
//!
//! [`MemoryOrderKind`] mirrors the tags at run time and carries the same
//! validity rules as `const fn` predicates; every marker-trait impl is
//! checked against them at compile time.
//!
//! # Author
//!
//! Haixing Hu

use std::fmt;
use std::sync::atomic::Ordering;

use crate::atomic::error::OrderError;

mod sealed {
    pub trait Sealed {}
}

/// A compile-time memory order tag.
///
/// This trait is sealed: the five tags of this module are the only
/// implementors.
pub trait MemoryOrder:
    sealed::Sealed + Copy + Default + fmt::Debug + Send + Sync + 'static
{
    /// The runtime mirror of this tag.
    const KIND: MemoryOrderKind;

    /// The platform ordering constant this tag selects.
    const ORDERING: Ordering;
}

/// Orders accepted by atomic loads.
pub trait LoadOrder: MemoryOrder {}

/// Orders accepted by atomic stores.
pub trait StoreOrder: MemoryOrder {}

/// A valid `(success, failure)` order pair for compare-exchange.
///
/// Implemented by the success order, parameterized by the failure order.
/// The failure order is never `Release` or `AcqRel`, and is `SeqCst` only
/// when the success order is `SeqCst`.
pub trait CompareExchangeOrder<F: MemoryOrder>: MemoryOrder {}

/// Runtime mirror of the memory order tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryOrderKind {
    /// No inter-thread ordering constraints.
    Relaxed,
    /// Acquire semantics.
    Acquire,
    /// Release semantics.
    Release,
    /// Both acquire and release semantics.
    AcqRel,
    /// Sequential consistency.
    SeqCst,
}

impl MemoryOrderKind {
    /// Returns the matching `std::sync::atomic::Ordering`.
    #[inline]
    pub const fn ordering(self) -> Ordering {
        match self {
            Self::Relaxed => Ordering::Relaxed,
            Self::Acquire => Ordering::Acquire,
            Self::Release => Ordering::Release,
            Self::AcqRel => Ordering::AcqRel,
            Self::SeqCst => Ordering::SeqCst,
        }
    }

    /// Returns `true` if this order may be used for an atomic load.
    #[inline]
    pub const fn is_valid_for_load(self) -> bool {
        matches!(self, Self::Relaxed | Self::Acquire | Self::SeqCst)
    }

    /// Returns `true` if this order may be used for an atomic store.
    #[inline]
    pub const fn is_valid_for_store(self) -> bool {
        matches!(self, Self::Relaxed | Self::Release | Self::SeqCst)
    }

    /// Returns `true` if `(success, failure)` is a valid compare-exchange
    /// order pair.
    ///
    /// # Parameters
    ///
    /// * `success` - The order used when the exchange happens.
    /// * `failure` - The order used for the load when it does not.
    ///
    /// # Returns
    ///
    /// `true` if the failure order is `Relaxed`, or `Acquire` with a
    /// non-relaxed success order, or `SeqCst` with a `SeqCst` success
    /// order.
    #[inline]
    pub const fn is_valid_compare_exchange(success: Self, failure: Self) -> bool {
        match failure {
            Self::Relaxed => true,
            Self::Acquire => !matches!(success, Self::Relaxed),
            Self::SeqCst => matches!(success, Self::SeqCst),
            Self::Release | Self::AcqRel => false,
        }
    }

    /// Checks that this order may be used for an atomic load.
    ///
    /// # Returns
    ///
    /// `Ok(())`, or `Err(OrderError::InvalidLoadOrder)`.
    pub fn check_load(self) -> Result<(), OrderError> {
        if self.is_valid_for_load() {
            Ok(())
        } else {
            Err(OrderError::InvalidLoadOrder(self))
        }
    }

    /// Checks that this order may be used for an atomic store.
    ///
    /// # Returns
    ///
    /// `Ok(())`, or `Err(OrderError::InvalidStoreOrder)`.
    pub fn check_store(self) -> Result<(), OrderError> {
        if self.is_valid_for_store() {
            Ok(())
        } else {
            Err(OrderError::InvalidStoreOrder(self))
        }
    }

    /// Checks that `(success, failure)` is a valid compare-exchange pair.
    ///
    /// # Returns
    ///
    /// `Ok(())`, or `Err(OrderError::InvalidCompareExchangeOrder)`.
    pub fn check_compare_exchange(success: Self, failure: Self) -> Result<(), OrderError> {
        if Self::is_valid_compare_exchange(success, failure) {
            Ok(())
        } else {
            Err(OrderError::InvalidCompareExchangeOrder { success, failure })
        }
    }
}

impl TryFrom<Ordering> for MemoryOrderKind {
    type Error = OrderError;

    fn try_from(ordering: Ordering) -> Result<Self, Self::Error> {
        match ordering {
            Ordering::Relaxed => Ok(Self::Relaxed),
            Ordering::Acquire => Ok(Self::Acquire),
            Ordering::Release => Ok(Self::Release),
            Ordering::AcqRel => Ok(Self::AcqRel),
            Ordering::SeqCst => Ok(Self::SeqCst),
            other => Err(OrderError::UnsupportedOrdering(other)),
        }
    }
}

impl From<MemoryOrderKind> for Ordering {
    #[inline]
    fn from(kind: MemoryOrderKind) -> Self {
        kind.ordering()
    }
}

impl fmt::Display for MemoryOrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Relaxed => "relaxed",
            Self::Acquire => "acquire",
            Self::Release => "release",
            Self::AcqRel => "acq_rel",
            Self::SeqCst => "seq_cst",
        };
        f.write_str(name)
    }
}

macro_rules! memory_order_tag {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl MemoryOrder for $name {
            const KIND: MemoryOrderKind = MemoryOrderKind::$name;
            const ORDERING: Ordering = MemoryOrderKind::$name.ordering();
        }
    };
}

memory_order_tag!(Relaxed, "Implies no inter-thread ordering constraints.");
memory_order_tag!(
    Acquire,
    "Creates a happens-before edge from a release (or stronger) store read by this load."
);
memory_order_tag!(
    Release,
    "Creates a happens-before edge to acquire (or stronger) loads that read this store."
);
memory_order_tag!(AcqRel, "Combines the effects of `Acquire` and `Release`.");
memory_order_tag!(
    SeqCst,
    "Participates in a single total order with all other `SeqCst` operations."
);

macro_rules! load_orders {
    ($($tag:ident),*) => {
        $(
            impl LoadOrder for $tag {}
            const _: () = assert!(<$tag as MemoryOrder>::KIND.is_valid_for_load());
        )*
    };
}

macro_rules! store_orders {
    ($($tag:ident),*) => {
        $(
            impl StoreOrder for $tag {}
            const _: () = assert!(<$tag as MemoryOrder>::KIND.is_valid_for_store());
        )*
    };
}

macro_rules! compare_exchange_orders {
    ($(($success:ident, $failure:ident)),*) => {
        $(
            impl CompareExchangeOrder<$failure> for $success {}
            const _: () = assert!(MemoryOrderKind::is_valid_compare_exchange(
                <$success as MemoryOrder>::KIND,
                <$failure as MemoryOrder>::KIND,
            ));
        )*
    };
}

load_orders!(Relaxed, Acquire, SeqCst);
store_orders!(Relaxed, Release, SeqCst);
compare_exchange_orders!(
    (Relaxed, Relaxed),
    (Acquire, Relaxed),
    (Release, Relaxed),
    (AcqRel, Relaxed),
    (SeqCst, Relaxed),
    (Acquire, Acquire),
    (Release, Acquire),
    (AcqRel, Acquire),
    (SeqCst, Acquire),
    (SeqCst, SeqCst)
);

/// Order used by loads when the caller has no stronger requirement.
pub type DefaultLoadOrder = Acquire;

/// Order used by stores when the caller has no stronger requirement.
pub type DefaultStoreOrder = Release;

/// Order used by exchange and read-modify-write operations by default.
pub type DefaultRmwOrder = AcqRel;

/// Failure order paired with [`DefaultRmwOrder`] for compare-exchange.
pub type DefaultFailureOrder = Relaxed;

/// Order used by fences by default.
pub type DefaultFenceOrder = AcqRel;
