/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Slice
//!
//! A non-owning, indexable view over a buffer whose elements are accessed
//! through [`AtomicRef`] handles.
//!
//! # Author
//!
//! Haixing Hu

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::atomic::atomic_ref::AtomicRef;
use crate::atomic::classifier::required_align;
use crate::atomic::classifier::AtomicValue;

/// Atomic view over a slice of values.
///
/// Several threads may hold copies of the same view and update elements
/// concurrently; each element access is independent and atomic, but no
/// operation spans more than one element.
///
/// # Example
///
/// ```rust
/// use prism3_atomic_ops::atomic::AtomicSlice;
/// use std::thread;
///
/// let mut buckets = [0u32; 4];
/// let histogram = AtomicSlice::new(&mut buckets);
///
/// thread::scope(|s| {
///     for t in 0..4 {
///         s.spawn(move || {
///             for i in 0..100 {
///                 histogram.at((i + t) % 4).inc();
///             }
///         });
///     }
/// });
///
/// assert_eq!(buckets, [100; 4]);
/// ```
///
/// # Author
///
/// Haixing Hu
pub struct AtomicSlice<'a, T> {
    ptr: NonNull<T>,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

impl<'a, T: AtomicValue> AtomicSlice<'a, T> {
    /// Creates an atomic view over `values`.
    ///
    /// # Panics
    ///
    /// Panics if `values` is not empty and its elements are not aligned to
    /// [`required_align::<T>()`](crate::atomic::required_align).
    #[inline]
    pub fn new(values: &'a mut [T]) -> Self {
        let len = values.len();
        let ptr = NonNull::from(values).cast::<T>();
        assert!(
            len == 0 || ptr.as_ptr() as usize % required_align::<T>() == 0,
            "slice at {:p} is not aligned to {} bytes",
            ptr.as_ptr(),
            required_align::<T>()
        );
        Self {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    /// Creates an atomic view from a raw pointer and a length.
    ///
    /// # Safety
    ///
    /// For the whole lifetime `'a`, `ptr` must be non-null and point to
    /// `len` consecutive values of `T` that are valid for reads and writes,
    /// aligned to [`required_align::<T>()`](crate::atomic::required_align),
    /// and only accessed through atomic operations.
    #[inline]
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self {
        debug_assert!(!ptr.is_null(), "null pointer passed to AtomicSlice::from_raw_parts");
        Self {
            ptr: unsafe { NonNull::new_unchecked(ptr) },
            len,
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the view has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the address of the first element.
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Returns an atomic reference to the element at `index`, or `None` if
    /// `index` is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<AtomicRef<'a, T>> {
        if index < self.len {
            // SAFETY: in bounds, and the constructors guarantee the element
            // is valid, aligned and only accessed atomically for 'a.
            Some(unsafe { AtomicRef::from_ptr(self.as_ptr().add(index)) })
        } else {
            None
        }
    }

    /// Returns an atomic reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn at(&self, index: usize) -> AtomicRef<'a, T> {
        match self.get(index) {
            Some(element) => element,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len, index
            ),
        }
    }

    /// Returns an iterator over atomic references to the elements.
    #[inline]
    pub fn iter(&self) -> Iter<'a, T> {
        Iter {
            slice: *self,
            next: 0,
        }
    }

    /// Loads every element with `Relaxed` ordering.
    ///
    /// The loads are independent, so the result is not a consistent
    /// snapshot while other threads are writing.
    pub fn snapshot(&self) -> Vec<T> {
        self.iter().map(|element| element.load()).collect()
    }
}

impl<T> Clone for AtomicSlice<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AtomicSlice<'_, T> {}

// SAFETY: see `AtomicRef`.
unsafe impl<T: AtomicValue + Send> Send for AtomicSlice<'_, T> {}
unsafe impl<T: AtomicValue + Send> Sync for AtomicSlice<'_, T> {}

impl<T: AtomicValue + fmt::Debug> fmt::Debug for AtomicSlice<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.snapshot()).finish()
    }
}

impl<'a, T: AtomicValue> IntoIterator for AtomicSlice<'a, T> {
    type Item = AtomicRef<'a, T>;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Iterator over the elements of an [`AtomicSlice`].
#[derive(Clone)]
pub struct Iter<'a, T> {
    slice: AtomicSlice<'a, T>,
    next: usize,
}

impl<'a, T: AtomicValue> Iterator for Iter<'a, T> {
    type Item = AtomicRef<'a, T>;

    #[inline]
    fn next(&mut self) -> Option<AtomicRef<'a, T>> {
        let element = self.slice.get(self.next)?;
        self.next += 1;
        Some(element)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.slice.len - self.next;
        (remaining, Some(remaining))
    }
}

impl<T: AtomicValue> ExactSizeIterator for Iter<'_, T> {}
