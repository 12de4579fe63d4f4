//! Core compute primitives.
//!
//! The interaction matrix is stored densely, one row per item.

mod matrix;

pub use matrix::Matrix;
