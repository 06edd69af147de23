//! Generates the color ramp that maps escape times to pixels.  The
//! palette is an ordered list of exactly `n` colors; a pixel that
//! survived `i` iterations is painted with `palette[i]`, so the
//! palette length must match the render's iteration budget.

use error::RenderError;
use num::clamp;

/// An RGB triple, one byte per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The intensity of one channel at ramp position i of n.  The
/// exponent bends the ramp: below 1 it reaches `high` early, above 1
/// it lingers near `low`.  That is artistic control, not a bug.
fn channel_intensity(i: usize, n: usize, exponent: f64, low: u8, high: u8) -> u8 {
    let t = ((i as f64) / ((n - 1) as f64)).powf(exponent);
    let intensity = (f64::from(low) + (f64::from(high) - f64::from(low)) * t).round();
    clamp(intensity, 0.0, 255.0) as u8
}

/// Builds a palette of `n` colors ramping from `low` to `high`, with
/// a per-channel exponent controlling the interpolation curve.  If
/// `interior` is supplied it unconditionally replaces the last entry,
/// which is the slot reserved for points that never escape; that is
/// how "in the set" pixels get a flat color.
///
/// Fails with `InvalidArgument` if `n < 2` or any exponent is not a
/// positive finite number.
pub fn build_palette(
    n: usize,
    low: Rgb,
    high: Rgb,
    exponents: (f64, f64, f64),
    interior: Option<Rgb>,
) -> Result<Vec<Rgb>, RenderError> {
    if n < 2 {
        return Err(RenderError::InvalidArgument(format!(
            "palette size must be at least 2, got {}",
            n
        )));
    }
    for &exponent in &[exponents.0, exponents.1, exponents.2] {
        if !exponent.is_finite() || exponent <= 0.0 {
            return Err(RenderError::InvalidArgument(format!(
                "palette exponents must be positive and finite, got {}",
                exponent
            )));
        }
    }

    let mut palette = Vec::with_capacity(n);
    for i in 0..n {
        palette.push(Rgb(
            channel_intensity(i, n, exponents.0, low.0, high.0),
            channel_intensity(i, n, exponents.1, low.1, high.1),
            channel_intensity(i, n, exponents.2, low.2, high.2),
        ));
    }
    if let Some(interior) = interior {
        palette[n - 1] = interior;
    }
    Ok(palette)
}
