//! # SIMD accelerated reductions
//!
//! Window seeds, weighted sums and regression sums reduce contiguous slices.
//! This module provides those reductions in a portable SIMD form (`wide`) and a
//! scalar fallback, selected once per process by runtime CPU detection.
//!
//! ```rust
//! use cluefin_ta_core::simd;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0];
//! let result = simd::sum(&data);
//! assert_eq!(result, 10.0);
//! ```
//!
//! The selection never changes public results beyond floating-point
//! reassociation; with the `simd` feature disabled the scalar table is always
//! used.
pub mod dispatch;
pub mod scalar;
mod types;
pub mod vector;

pub use dispatch::{dot_product, sum};
pub use types::{Lanes, SimdLevel};
