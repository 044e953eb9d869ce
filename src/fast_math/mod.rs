//! Fast Math: scalar helpers shared by layout, camera and focus code.
//!
//! ## FMA (Fused Multiply-Add)
//! a * b + c in 1 instruction instead of 2 (also reduces rounding error).
//!
//! ## Frame-rate independent damping
//! `lerp(a, b, 0.1)` per frame converges twice as fast at 120 Hz as at 60 Hz.
//! `damp_factor(k, dt) = 1 - e^(-k·dt)` gives the same curve at any frame rate
//! and never overshoots (0 < factor < 1 for finite positive input).

use glam::Vec3;

/// Golden angle in radians: π·(3 − √5) ≈ 2.39996.
pub const GOLDEN_ANGLE: f32 = 2.399_963_2;

/// Fused Multiply-Add: a * b + c
#[inline(always)]
pub fn fma(a: f32, b: f32, c: f32) -> f32 {
    a.mul_add(b, c)
}

/// Linear interpolation using FMA for precision.
/// lerp(a, b, t) = a + t * (b - a) = fma(t, b-a, a)
#[inline(always)]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    fma(t, b - a, a)
}

/// Exponential smoothing factor for a step of `dt` seconds with stiffness `k`.
///
/// Returns 0.0 for non-positive or non-finite input so a bad frame delta
/// freezes motion instead of teleporting.
#[inline]
pub fn damp_factor(k: f32, dt: f32) -> f32 {
    let x = k * dt;
    if !x.is_finite() || x <= 0.0 {
        return 0.0;
    }
    1.0 - (-x).exp()
}

/// Normalize, or `None` for zero-length / non-finite vectors.
#[inline]
pub fn safe_normalize(v: Vec3) -> Option<Vec3> {
    if !v.is_finite() {
        return None;
    }
    let len_sq = v.length_squared();
    if len_sq <= f32::EPSILON {
        return None;
    }
    Some(v * len_sq.sqrt().recip())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_angle_matches_formula() {
        let expected = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
        assert!((GOLDEN_ANGLE - expected).abs() < 1e-5);
    }

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
        assert!((lerp(0.0, 10.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((lerp(0.0, 10.0, 1.0) - 10.0).abs() < 1e-6);
    }

    #[test]
    fn damp_factor_is_frame_rate_independent() {
        // Two 1/120 s steps must land where one 1/60 s step does.
        let one = damp_factor(6.0, 1.0 / 60.0);
        let half = damp_factor(6.0, 1.0 / 120.0);
        let two = 1.0 - (1.0 - half) * (1.0 - half);
        assert!((one - two).abs() < 1e-5);
        assert!(one > 0.0 && one < 1.0);
    }

    #[test]
    fn damp_factor_rejects_bad_deltas() {
        assert_eq!(damp_factor(6.0, 0.0), 0.0);
        assert_eq!(damp_factor(6.0, -0.1), 0.0);
        assert_eq!(damp_factor(6.0, f32::NAN), 0.0);
    }

    #[test]
    fn safe_normalize_guards_degenerate_input() {
        assert!(safe_normalize(Vec3::ZERO).is_none());
        assert!(safe_normalize(Vec3::new(f32::NAN, 0.0, 1.0)).is_none());
        let n = safe_normalize(Vec3::new(0.0, 3.0, 4.0)).unwrap();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }
}
