/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use prism3_atomic_ops::atomic::AtomicSlice;

#[test]
fn test_len_and_bounds() {
    let mut values = [1u64, 2, 3];
    let slice = AtomicSlice::new(&mut values);
    assert_eq!(slice.len(), 3);
    assert!(!slice.is_empty());
    assert!(slice.get(2).is_some());
    assert!(slice.get(3).is_none());
}

#[test]
fn test_empty_slice() {
    let mut values: [u64; 0] = [];
    let slice = AtomicSlice::new(&mut values);
    assert!(slice.is_empty());
    assert_eq!(slice.iter().count(), 0);
    assert!(slice.snapshot().is_empty());
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn test_at_out_of_bounds_panics() {
    let mut values = [0i32; 2];
    let slice = AtomicSlice::new(&mut values);
    slice.at(2);
}

#[test]
fn test_element_updates() {
    let mut values = [10i32, 20, 30];
    let slice = AtomicSlice::new(&mut values);
    slice.at(0).fetch_add(1);
    let mut middle = slice.at(1);
    middle -= 5;
    assert_eq!(slice.at(2).swap(0), 30);
    assert_eq!(slice.snapshot(), vec![11, 15, 0]);
    assert_eq!(values, [11, 15, 0]);
}

#[test]
fn test_iteration() {
    let mut values = [1u32, 2, 3, 4];
    let slice = AtomicSlice::new(&mut values);
    let iter = slice.iter();
    assert_eq!(iter.len(), 4);
    for element in iter {
        element.fetch_mul(10);
    }
    let total: u32 = slice.into_iter().map(|element| element.load()).sum();
    assert_eq!(total, 100);
    assert_eq!(format!("{slice:?}"), "[10, 20, 30, 40]");
}

#[test]
fn test_from_raw_parts() {
    let mut values = vec![0u8; 8];
    let slice = unsafe { AtomicSlice::from_raw_parts(values.as_mut_ptr(), values.len()) };
    assert_eq!(slice.as_ptr(), values.as_mut_ptr());
    for element in slice.iter() {
        element.store(7);
    }
    assert_eq!(values, vec![7; 8]);
}

#[test]
fn test_view_borrows_the_buffer_mutably() {
    fn assert_shareable_view<H: Copy + Send + Sync>(_: &H) {}

    let mut values = [1u32, 2];
    let slice = AtomicSlice::new(&mut values);
    assert_shareable_view(&slice);
    let copy = slice;
    std::thread::scope(|s| {
        s.spawn(move || copy.at(0).inc());
        s.spawn(move || slice.at(1).inc());
    });
    values[0] += 10;
    assert_eq!(values, [12, 3]);
}
