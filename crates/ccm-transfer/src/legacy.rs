//! Broadcast and cinema curves that only appear as named transfer functions:
//! SMPTE ST 240, BT.709 / xvYCC and SMPTE ST 428.

/// SMPTE ST 240 EOTF (inverse of the ST 240 OETF).
#[inline]
pub fn st240_eotf(v: f32) -> f32 {
    if v < 0.0913 {
        v / 4.0
    } else {
        ((v + 0.1115) / 1.1115).powf(1.0 / 0.45)
    }
}

/// SMPTE ST 240 OETF.
#[inline]
pub fn st240_eotf_inverse(l: f32) -> f32 {
    if l < 0.0228 {
        4.0 * l
    } else {
        1.1115 * l.powf(0.45) - 0.1115
    }
}

/// BT.709 inverse OETF.
#[inline]
pub fn bt709_eotf(v: f32) -> f32 {
    if v < 0.081 {
        v / 4.5
    } else {
        ((v + 0.099) / 1.099).powf(1.0 / 0.45)
    }
}

/// BT.709 OETF.
#[inline]
pub fn bt709_eotf_inverse(l: f32) -> f32 {
    if l < 0.018 {
        4.5 * l
    } else {
        1.099 * l.powf(0.45) - 0.099
    }
}

/// xvYCC (IEC 61966-2-4): BT.709 extended symmetrically to negative values.
#[inline]
pub fn xvycc_eotf(v: f32) -> f32 {
    v.signum() * bt709_eotf(v.abs())
}

/// Inverse of [`xvycc_eotf`].
#[inline]
pub fn xvycc_eotf_inverse(l: f32) -> f32 {
    l.signum() * bt709_eotf_inverse(l.abs())
}

const ST428_SCALE: f32 = 52.37 / 48.0;

/// SMPTE ST 428-1 EOTF, normalized to 48 cd/m².
#[inline]
pub fn st428_eotf(v: f32) -> f32 {
    ST428_SCALE * v.max(0.0).powf(2.6)
}

/// Inverse SMPTE ST 428-1 EOTF.
#[inline]
pub fn st428_eotf_inverse(l: f32) -> f32 {
    (l.max(0.0) / ST428_SCALE).powf(1.0 / 2.6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrips() {
        for i in 0..=40 {
            let v = i as f32 / 40.0;
            assert!((st240_eotf_inverse(st240_eotf(v)) - v).abs() < 1e-4, "st240 {}", v);
            assert!((bt709_eotf_inverse(bt709_eotf(v)) - v).abs() < 1e-4, "bt709 {}", v);
            assert!((st428_eotf_inverse(st428_eotf(v)) - v).abs() < 1e-4, "st428 {}", v);
        }
    }

    #[test]
    fn test_xvycc_negative() {
        assert_eq!(xvycc_eotf(-0.5), -bt709_eotf(0.5));
    }
}
