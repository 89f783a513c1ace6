//! SIMD level detection.

use core::fmt;

/// SIMD instruction set level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SimdLevel {
    /// No SIMD acceleration (scalar operations)
    Scalar,
    /// AVX2 - x86-64, 256-bit, 4 lanes of f64
    Avx2,
    /// AVX-512 - x86-64, 512-bit, 8 lanes of f64
    Avx512,
    /// NEON - AArch64, 128-bit, 2 lanes of f64
    Neon,
    /// SIMD128 - WebAssembly, 128-bit, 2 lanes of f64
    Simd128,
}

impl SimdLevel {
    /// Detect the best available SIMD level at runtime.
    ///
    /// ```rust
    /// use cluefin_ta_core::simd::SimdLevel;
    ///
    /// let level = SimdLevel::detect();
    /// assert!(level.lanes() >= 1);
    /// ```
    #[inline]
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if std::is_x86_feature_detected!("avx512f") {
                return SimdLevel::Avx512;
            }
            if std::is_x86_feature_detected!("avx2") {
                return SimdLevel::Avx2;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            return SimdLevel::Neon;
        }

        #[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
        {
            return SimdLevel::Simd128;
        }

        #[allow(unreachable_code)]
        SimdLevel::Scalar
    }

    /// Number of f64 lanes for this level.
    ///
    /// ```rust
    /// use cluefin_ta_core::simd::SimdLevel;
    ///
    /// assert_eq!(SimdLevel::Avx2.lanes(), 4);
    /// assert_eq!(SimdLevel::Scalar.lanes(), 1);
    /// ```
    #[inline]
    pub fn lanes(&self) -> usize {
        match self {
            SimdLevel::Scalar => Lanes::SCALAR,
            SimdLevel::Avx2 => Lanes::AVX2,
            SimdLevel::Avx512 => Lanes::AVX512,
            SimdLevel::Neon => Lanes::NEON,
            SimdLevel::Simd128 => Lanes::SIMD128,
        }
    }

    /// Vector width in bits.
    #[inline]
    pub fn width_bits(&self) -> usize {
        self.lanes() * 64
    }
}

impl fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimdLevel::Scalar => write!(f, "Scalar"),
            SimdLevel::Avx2 => write!(f, "AVX2"),
            SimdLevel::Avx512 => write!(f, "AVX-512"),
            SimdLevel::Neon => write!(f, "NEON"),
            SimdLevel::Simd128 => write!(f, "SIMD128"),
        }
    }
}

/// Lane count for each SIMD level when working with f64.
#[derive(Debug, Clone, Copy)]
pub struct Lanes;

impl Lanes {
    /// Scalar operations
    pub const SCALAR: usize = 1;
    /// AVX2 (4 x f64)
    pub const AVX2: usize = 4;
    /// AVX-512 (8 x f64)
    pub const AVX512: usize = 8;
    /// NEON (2 x f64)
    pub const NEON: usize = 2;
    /// SIMD128 (2 x f64)
    pub const SIMD128: usize = 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simd_level_lanes() {
        assert_eq!(SimdLevel::Scalar.lanes(), 1);
        assert_eq!(SimdLevel::Avx2.lanes(), 4);
        assert_eq!(SimdLevel::Avx512.lanes(), 8);
        assert_eq!(SimdLevel::Neon.lanes(), 2);
        assert_eq!(SimdLevel::Simd128.lanes(), 2);
    }

    #[test]
    fn test_simd_level_width_bits() {
        assert_eq!(SimdLevel::Scalar.width_bits(), 64);
        assert_eq!(SimdLevel::Avx2.width_bits(), 256);
        assert_eq!(SimdLevel::Avx512.width_bits(), 512);
    }

    #[test]
    fn test_simd_level_display() {
        assert_eq!(format!("{}", SimdLevel::Scalar), "Scalar");
        assert_eq!(format!("{}", SimdLevel::Avx2), "AVX2");
        assert_eq!(format!("{}", SimdLevel::Avx512), "AVX-512");
        assert_eq!(format!("{}", SimdLevel::Neon), "NEON");
        assert_eq!(format!("{}", SimdLevel::Simd128), "SIMD128");
    }

    #[test]
    fn test_detect_is_stable() {
        assert_eq!(SimdLevel::detect(), SimdLevel::detect());
    }
}
