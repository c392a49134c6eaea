//! Continuous color scale for scalar marker values.
//!
//! Blending runs through HSV so the ramp stays saturated instead of washing
//! out through grey mid-tones.

use bevy::math::{Vec3, Vec4};

/// Low end of the scale (deep blue).
const COLD: Vec4 = Vec4::new(0.13, 0.20, 0.55, 1.0);
/// High end of the scale (warm yellow).
const HOT: Vec4 = Vec4::new(0.99, 0.91, 0.15, 1.0);

/// Sample the scale at `t` in [0, 1]; out-of-range values clamp.
pub fn sample(t: f32) -> Vec4 {
    lerp_hsv(COLD, HOT, t.clamp(0.0, 1.0))
}

/// Map raw values onto [0, 1] over their own range (auto-scaling). A constant
/// array maps to the scale midpoint.
pub fn normalize(values: &[f64]) -> Vec<f32> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &value in values {
        lo = lo.min(value);
        hi = hi.max(value);
    }
    if !(hi > lo) {
        return vec![0.5; values.len()];
    }
    values
        .iter()
        .map(|&value| ((value - lo) / (hi - lo)) as f32)
        .collect()
}

fn rgb_to_hsv(color: Vec4) -> Vec3 {
    let (r, g, b) = (color.x, color.y, color.z);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta < 1e-5 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    let saturation = if max < 1e-5 { 0.0 } else { delta / max };

    Vec3::new(hue / 6.0, saturation, max)
}

fn hsv_to_rgb(hsv: Vec3) -> Vec4 {
    let (h, s, v) = (hsv.x * 6.0, hsv.y, hsv.z);
    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    Vec4::new(r + m, g + m, b + m, 1.0)
}

/// Blend in HSV space, taking the short way around the hue wheel.
fn lerp_hsv(a: Vec4, b: Vec4, t: f32) -> Vec4 {
    let from = rgb_to_hsv(a);
    let to = rgb_to_hsv(b);

    let mut hue_delta = to.x - from.x;
    if hue_delta.abs() > 0.5 {
        hue_delta -= hue_delta.signum();
    }
    let hue = (from.x + hue_delta * t).rem_euclid(1.0);

    hsv_to_rgb(Vec3::new(
        hue,
        from.y + (to.y - from.y) * t,
        from.z + (to.z - from.z) * t,
    ))
}
