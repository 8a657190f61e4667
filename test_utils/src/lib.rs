//! Utility helpers for tests.
//!
//! Shared fixtures and app helpers for the limb factory integration tests.

pub mod app;
pub mod fixtures;

use bevy::prelude::*;

/// Largest per-component difference [`assert_transform_eq`] accepts. Covers
/// the rounding of decomposing a global transform.
pub const TRANSFORM_TOLERANCE: f32 = 1e-5;

/// Assert that two transforms match component-wise within
/// [`TRANSFORM_TOLERANCE`].
///
/// # Panics
/// Panics with a helpful message naming `what` if any component differs.
pub fn assert_transform_eq(actual: &Transform, expected: &Transform, what: &str) {
    assert!(
        actual.translation.abs_diff_eq(expected.translation, TRANSFORM_TOLERANCE),
        "{what} translation {:?} should be {:?}",
        actual.translation,
        expected.translation
    );
    assert!(
        actual.rotation.abs_diff_eq(expected.rotation, TRANSFORM_TOLERANCE),
        "{what} rotation {:?} should be {:?}",
        actual.rotation,
        expected.rotation
    );
    assert!(
        actual.scale.abs_diff_eq(expected.scale, TRANSFORM_TOLERANCE),
        "{what} scale {:?} should be {:?}",
        actual.scale,
        expected.scale
    );
}

/// Assert that `value`'s magnitude lies within `[min, max]`.
///
/// # Panics
/// Panics naming `what` when the magnitude is out of range.
pub fn assert_magnitude_within(value: f32, min: f32, max: f32, what: &str) {
    let magnitude = value.abs();
    assert!(
        (min..=max).contains(&magnitude),
        "{what} magnitude {magnitude} outside [{min}, {max}]"
    );
}
