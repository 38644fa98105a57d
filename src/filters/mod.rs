//! Orientation filters
//!
//! Each filter instance tracks exactly one controller.

pub mod complementary;

pub use complementary::{OrientationFilter, OrientationFilterState};
