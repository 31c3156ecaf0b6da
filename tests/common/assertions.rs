//! Assertion utilities for testing.
//!
//! Floating-point comparisons for values read back from LUCY files.

use ndarray::ArrayView1;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that a column matches the expected values element-wise.
pub fn assert_column_approx_eq(actual: ArrayView1<'_, f64>, expected: &[f64], epsilon: Option<f64>) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Column lengths differ: actual = {}, expected = {}",
        actual.len(),
        expected.len()
    );

    for (i, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
        assert!(
            (a - e).abs() <= epsilon,
            "Values at index {} differ: actual = {}, expected = {}",
            i,
            a,
            e
        );
    }
}
