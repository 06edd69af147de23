// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The viewport is the rectangle of the complex plane that the pixel
//! grid is stretched over.  It can be given as explicit bounds, or
//! derived from a center point and a zoom level: at zoom 1 the
//! shorter image dimension spans a range of 4, and each zoom
//! increment halves the visible range on both axes.  The longer
//! dimension is scaled up proportionally so pixels stay square.

use error::RenderError;
use num::Complex;

/// A rectangle on the complex plane.  The real axis runs left to
/// right, the imaginary axis bottom to top.  Constructed through
/// `from_bounds` or `centered`, which validate the shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Smallest real coordinate.
    pub left: f64,
    /// Largest real coordinate.
    pub right: f64,
    /// Smallest imaginary coordinate.
    pub bottom: f64,
    /// Largest imaginary coordinate.
    pub top: f64,
}

impl Viewport {
    /// Builds a viewport from explicit edges.  Fails with
    /// `InvalidArgument` if any edge is non-finite or the rectangle
    /// is empty or inverted.
    pub fn from_bounds(left: f64, right: f64, bottom: f64, top: f64) -> Result<Viewport, RenderError> {
        for &bound in &[left, right, bottom, top] {
            if !bound.is_finite() {
                return Err(RenderError::InvalidArgument(format!(
                    "viewport bounds must be finite, got {}",
                    bound
                )));
            }
        }
        if right <= left {
            return Err(RenderError::InvalidArgument(format!(
                "viewport right edge {} is not to the right of left edge {}",
                right, left
            )));
        }
        if top <= bottom {
            return Err(RenderError::InvalidArgument(format!(
                "viewport top edge {} is not above bottom edge {}",
                top, bottom
            )));
        }
        Ok(Viewport {
            left,
            right,
            bottom,
            top,
        })
    }

    /// Builds a viewport from a center point and a zoom level, for an
    /// image of the given pixel dimensions.  The half-range of each
    /// axis is 2 · (dimension/min(width,height)) · 2^−(zoom−1), which
    /// keeps the aspect ratio of non-square images correct and halves
    /// the visible range per zoom increment.
    pub fn centered(
        center: Complex<f64>,
        zoom: f64,
        width: usize,
        height: usize,
    ) -> Result<Viewport, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidArgument(format!(
                "image dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if !zoom.is_finite() {
            return Err(RenderError::InvalidArgument(format!(
                "zoom level must be finite, got {}",
                zoom
            )));
        }
        let short = ::std::cmp::min(width, height) as f64;
        let range = 2.0_f64.powf(1.0 - zoom);
        let half_width = 2.0 * (width as f64 / short) * range;
        let half_height = 2.0 * (height as f64 / short) * range;
        Viewport::from_bounds(
            center.re - half_width,
            center.re + half_width,
            center.im - half_height,
            center.im + half_height,
        )
    }

    /// The extent of the real axis.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// The extent of the imaginary axis.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_must_make_a_rectangle() {
        assert!(Viewport::from_bounds(-2.0, 0.65, -1.25, 1.25).is_ok());
        assert!(Viewport::from_bounds(0.65, -2.0, -1.25, 1.25).is_err());
        assert!(Viewport::from_bounds(-2.0, 0.65, 1.25, -1.25).is_err());
        assert!(Viewport::from_bounds(-2.0, -2.0, -1.25, 1.25).is_err());
    }

    #[test]
    fn bounds_must_be_finite() {
        assert!(Viewport::from_bounds(::std::f64::NEG_INFINITY, 0.0, -1.0, 1.0).is_err());
        assert!(Viewport::from_bounds(-2.0, 0.65, ::std::f64::NAN, 1.25).is_err());
    }

    #[test]
    fn square_image_at_zoom_one_spans_four() {
        let vp = Viewport::centered(Complex::new(-0.675, 0.0), 1.0, 1000, 1000).unwrap();
        assert!((vp.width() - 4.0).abs() < 1e-12);
        assert!((vp.height() - 4.0).abs() < 1e-12);
        assert!((vp.left - (-2.675)).abs() < 1e-12);
        assert!((vp.right - 1.325).abs() < 1e-12);
    }

    #[test]
    fn wide_image_keeps_pixels_square() {
        let vp = Viewport::centered(Complex::new(0.0, 0.0), 1.0, 200, 100).unwrap();
        // Shorter axis spans 4, longer axis spans proportionally more.
        assert!((vp.height() - 4.0).abs() < 1e-12);
        assert!((vp.width() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn each_zoom_increment_halves_the_range() {
        let center = Complex::new(-0.66468458, 0.355508837);
        let near = Viewport::centered(center, 3.0, 640, 480).unwrap();
        let far = Viewport::centered(center, 2.0, 640, 480).unwrap();
        assert!((far.width() - 2.0 * near.width()).abs() < 1e-9);
        assert!((far.height() - 2.0 * near.height()).abs() < 1e-9);
    }

    #[test]
    fn degenerate_dimensions_are_rejected() {
        assert!(Viewport::centered(Complex::new(0.0, 0.0), 1.0, 0, 100).is_err());
        assert!(Viewport::centered(Complex::new(0.0, 0.0), 1.0, 100, 0).is_err());
    }
}
