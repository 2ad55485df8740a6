/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # prism3-rust-atomic-ops
//!
//! Portable atomic operations on ordinary memory locations.
//!
//! Where `std::sync::atomic` asks the caller to wrap data in dedicated
//! atomic types, this crate operates on plain values in place: any
//! supported value reachable through a pointer (or a `&mut` borrow) can be
//! loaded, stored, exchanged and updated atomically.
//!
//! ## Design Goals
//!
//! - **Compile-time checking**: memory orders are type-level tags; a
//!   `Release` load or an invalid compare-exchange order pair does not
//!   compile
//! - **Any value type**: integers, `bool` and raw pointers use the
//!   platform's atomic instructions; other padding-free plain-old-data
//!   types fall back to word-sized atomics or striped locks
//! - **Zero overhead**: the implementation is chosen by monomorphization,
//!   with no run-time dispatch
//!
//! ## Features
//!
//! - Primitives: `atomic_load`, `atomic_store`, `atomic_exchange`,
//!   `atomic_compare_exchange_strong`, `atomic_compare_exchange_weak`,
//!   `atomic_thread_fence`
//! - Read-modify-write: `atomic_fetch_*` and `atomic_*_fetch` for add,
//!   sub, mul, div, mod, and, or, xor, nand, min, max, lshift and rshift
//! - Element handles: `AtomicRef` and `AtomicSlice` with operator syntax
//!
//! ## Example
//!
//! ```rust
//! use prism3_atomic_ops::{AtomicRef, atomic_fetch_add, atomic_load, AcqRel, Acquire};
//! use std::thread;
//!
//! // Free functions with explicit orders
//! let mut total = 0i64;
//! let old = unsafe { atomic_fetch_add(&mut total, 5, AcqRel) };
//! assert_eq!(old, 0);
//! assert_eq!(unsafe { atomic_load(&mut total, Acquire) }, 5);
//!
//! // Shared counter through a reference handle
//! let mut hits = 0u32;
//! let counter = AtomicRef::new(&mut hits);
//! thread::scope(|s| {
//!     for _ in 0..10 {
//!         s.spawn(move || {
//!             for _ in 0..100 {
//!                 counter.inc();
//!             }
//!         });
//!     }
//! });
//! assert_eq!(hits, 1000);
//! ```
//!
//! ## Author
//!
//! Haixing Hu

#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod atomic;

// Re-export the public API at the crate root
pub use atomic::*;
