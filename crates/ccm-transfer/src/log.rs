//! Logarithmic transfer characteristics (ITU-T H.273 values 9 and 10).
//!
//! Log-100 covers a 100:1 range, Log-316 a `100 * sqrt(10)`:1 range. Linear
//! values below the range encode as zero.

/// Lowest linear value representable by Log-100.
pub const LOG100_MIN: f32 = 0.01;

/// Lowest linear value representable by Log-316.
pub const LOG316_MIN: f32 = 0.003_162_277_7;

/// Log-100 EOTF: signal to linear.
#[inline]
pub fn log100_eotf(v: f32) -> f32 {
    if v <= 0.0 { 0.0 } else { 10f32.powf(2.0 * (v - 1.0)) }
}

/// Inverse Log-100 EOTF: linear to signal.
#[inline]
pub fn log100_eotf_inverse(l: f32) -> f32 {
    if l < LOG100_MIN { 0.0 } else { 1.0 + l.log10() / 2.0 }
}

/// Log-316 EOTF: signal to linear.
#[inline]
pub fn log316_eotf(v: f32) -> f32 {
    if v <= 0.0 { 0.0 } else { 10f32.powf(2.5 * (v - 1.0)) }
}

/// Inverse Log-316 EOTF: linear to signal.
#[inline]
pub fn log316_eotf_inverse(l: f32) -> f32 {
    if l < LOG316_MIN { 0.0 } else { 1.0 + l.log10() / 2.5 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(log100_eotf(0.0), 0.0);
        assert!((log100_eotf(1.0) - 1.0).abs() < 1e-6);
        assert!(log100_eotf_inverse(LOG100_MIN).abs() < 1e-6);
        assert!(log316_eotf_inverse(LOG316_MIN).abs() < 1e-5);
        assert_eq!(log316_eotf_inverse(0.001), 0.0);
    }

    #[test]
    fn test_roundtrip_in_range() {
        for i in 1..=20 {
            let v = i as f32 / 20.0;
            assert!((log100_eotf_inverse(log100_eotf(v)) - v).abs() < 1e-5);
            assert!((log316_eotf_inverse(log316_eotf(v)) - v).abs() < 1e-5);
        }
    }
}
