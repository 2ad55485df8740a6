/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Order Errors
//!
//! Errors reported when memory orders carried as runtime data are checked
//! against the rules the tag types enforce at compile time.
//!
//! # Author
//!
//! Haixing Hu

use std::sync::atomic::Ordering;

use thiserror::Error;

use crate::atomic::memory_order::MemoryOrderKind;

/// A memory order that is not valid where it was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The order cannot be used for an atomic load.
    #[error("memory order `{0}` is not valid for an atomic load")]
    InvalidLoadOrder(MemoryOrderKind),

    /// The order cannot be used for an atomic store.
    #[error("memory order `{0}` is not valid for an atomic store")]
    InvalidStoreOrder(MemoryOrderKind),

    /// The pair cannot be used for a compare-exchange.
    #[error("memory orders (`{success}`, `{failure}`) are not a valid compare-exchange pair")]
    InvalidCompareExchangeOrder {
        /// Order requested for the successful exchange.
        success: MemoryOrderKind,
        /// Order requested for the failed comparison.
        failure: MemoryOrderKind,
    },

    /// The platform ordering has no tag in this crate.
    #[error("unsupported memory ordering {0:?}")]
    UnsupportedOrdering(Ordering),
}
