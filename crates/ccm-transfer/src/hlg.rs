//! Hybrid Log-Gamma OETF (ITU-R BT.2100).
//!
//! Scene-referred: linear `[0, 1]` in, signal `[0, 1]` out.

const A: f32 = 0.178_832_77;
const B: f32 = 0.284_668_92; // 1 - 4A
const C: f32 = 0.559_910_73; // 0.5 - A ln(4A)

/// HLG OETF: scene linear to signal.
///
/// ```text
/// E <= 1/12:  E' = sqrt(3E)
/// otherwise:  E' = A ln(12E - B) + C
/// ```
#[inline]
pub fn oetf(e: f32) -> f32 {
    if e <= 0.0 {
        0.0
    } else if e <= 1.0 / 12.0 {
        (3.0 * e).sqrt()
    } else {
        A * (12.0 * e - B).ln() + C
    }
}

/// Inverse HLG OETF: signal to scene linear.
#[inline]
pub fn oetf_inverse(ep: f32) -> f32 {
    if ep <= 0.0 {
        0.0
    } else if ep <= 0.5 {
        ep * ep / 3.0
    } else {
        (((ep - C) / A).exp() + B) / 12.0
    }
}
