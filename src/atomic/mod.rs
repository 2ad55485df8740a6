/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Operations
//!
//! Atomic access to ordinary memory, with the memory order chosen at
//! compile time.
//!
//! # Layers
//!
//! - **Memory orders**: zero-sized tags (`Relaxed`, `Acquire`, `Release`,
//!   `AcqRel`, `SeqCst`). Invalid combinations, such as a `Release` load,
//!   do not compile.
//! - **Classifier**: every value type is either native (the platform has
//!   an atomic of that width) or generic (any padding-free plain-old-data
//!   type).
//! - **Primitives**: load, store, exchange, compare-exchange and fence on
//!   a raw address.
//! - **Read-modify-write**: arithmetic, bitwise, min/max and shifts in both
//!   fetch-op and op-fetch forms, built on native instructions or a
//!   compare-exchange loop.
//! - **References**: [`AtomicRef`] and [`AtomicSlice`] wrap an address and
//!   expose all of the above with `Relaxed` ordering and operator syntax.
//!
//! # Author
//!
//! Haixing Hu

mod atomic_ref;
mod atomic_slice;
mod classifier;
mod error;
mod generic;
mod memory_order;
mod native;
mod native_atomic_macro;
pub mod operation;
mod primitives;
mod rmw;

pub use atomic_ref::AtomicRef;
pub use atomic_slice::{
    AtomicSlice,
    Iter as AtomicSliceIter,
};
pub use classifier::{
    classify,
    is_lock_free,
    required_align,
    AtomicStrategy,
    AtomicValue,
    Classification,
    GenericStrategy,
    NativeStrategy,
    MAX_ATOMIC_INTEGER_SIZE,
};
pub use error::OrderError;
pub use memory_order::{
    AcqRel,
    Acquire,
    CompareExchangeOrder,
    DefaultFailureOrder,
    DefaultFenceOrder,
    DefaultLoadOrder,
    DefaultRmwOrder,
    DefaultStoreOrder,
    LoadOrder,
    MemoryOrder,
    MemoryOrderKind,
    Relaxed,
    Release,
    SeqCst,
    StoreOrder,
};
pub use native::NativeAtomic;
pub use operation::{
    One,
    Operation,
};
pub use primitives::{
    atomic_compare_exchange_strong,
    atomic_compare_exchange_weak,
    atomic_exchange,
    atomic_load,
    atomic_store,
    atomic_thread_fence,
};
pub use rmw::{
    atomic_add,
    atomic_add_fetch,
    atomic_and_fetch,
    atomic_decrement,
    atomic_div_fetch,
    atomic_fetch_add,
    atomic_fetch_and,
    atomic_fetch_div,
    atomic_fetch_lshift,
    atomic_fetch_max,
    atomic_fetch_min,
    atomic_fetch_mod,
    atomic_fetch_mul,
    atomic_fetch_nand,
    atomic_fetch_or,
    atomic_fetch_rshift,
    atomic_fetch_sub,
    atomic_fetch_update,
    atomic_fetch_xor,
    atomic_increment,
    atomic_lshift_fetch,
    atomic_max_fetch,
    atomic_min_fetch,
    atomic_mod_fetch,
    atomic_mul_fetch,
    atomic_nand_fetch,
    atomic_or_fetch,
    atomic_rshift_fetch,
    atomic_sub,
    atomic_sub_fetch,
    atomic_update_fetch,
    atomic_xor_fetch,
};
