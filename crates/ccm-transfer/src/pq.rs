//! SMPTE ST 2084 Perceptual Quantizer.
//!
//! Curves here are normalized: linear `1.0` stands for [`L_MAX`] cd/m².

/// Peak luminance of the PQ system in cd/m².
pub const L_MAX: f32 = 10000.0;

const M1: f32 = 2610.0 / 16384.0;
const M2: f32 = 2523.0 / 4096.0 * 128.0;
const C1: f32 = 3424.0 / 4096.0;
const C2: f32 = 2413.0 / 4096.0 * 32.0;
const C3: f32 = 2392.0 / 4096.0 * 32.0;

/// PQ EOTF: signal `[0, 1]` to normalized luminance `[0, 1]`.
///
/// ```rust
/// use ccm_transfer::pq::{eotf, L_MAX};
///
/// // 100 cd/m² sits near code value 0.508
/// assert!((eotf(0.508) * L_MAX - 100.0).abs() < 1.0);
/// ```
#[inline]
pub fn eotf(v: f32) -> f32 {
    if v <= 0.0 {
        return 0.0;
    }

    let vp = v.powf(1.0 / M2);
    let num = (vp - C1).max(0.0);
    let den = C2 - C3 * vp;

    (num / den).powf(1.0 / M1)
}

/// Inverse PQ EOTF: normalized luminance `[0, 1]` to signal `[0, 1]`.
#[inline]
pub fn eotf_inverse(y: f32) -> f32 {
    if y <= 0.0 {
        return 0.0;
    }

    let yp = y.min(1.0).powf(M1);
    ((C1 + C2 * yp) / (1.0 + C3 * yp)).powf(M2)
}

/// Encodes absolute luminance in cd/m².
#[inline]
pub fn encode_nits(nits: f32) -> f32 {
    eotf_inverse(nits / L_MAX)
}

/// Decodes to absolute luminance in cd/m².
#[inline]
pub fn decode_nits(v: f32) -> f32 {
    eotf(v) * L_MAX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for &nits in &[0.0, 0.1, 1.0, 100.0, 203.0, 1000.0, 10000.0] {
            let decoded = decode_nits(encode_nits(nits));
            assert!(
                (nits - decoded).abs() < nits * 0.001 + 0.001,
                "nits={}, decoded={}",
                nits,
                decoded
            );
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(eotf(0.0), 0.0);
        assert!((eotf(1.0) - 1.0).abs() < 1e-4);
        assert!((eotf_inverse(1.0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_reference_white() {
        // 203 cd/m² HDR reference white is about 0.58
        assert!((encode_nits(203.0) - 0.58).abs() < 0.01);
    }
}
