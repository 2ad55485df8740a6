/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/


mod atomic_slice_tests;
mod classifier_tests;
mod concurrent_tests;
mod primitives_tests;
mod rmw_tests;
