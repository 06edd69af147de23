// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Orchestrates a frame: maps the pixel grid onto the viewport, runs
//! the escape-time engine a row at a time, looks the counts up in the
//! palette, and optionally encodes the grid to an image file.
//!
//! Raster convention: row 0 of the output is the TOP of the viewport,
//! matching the encoder's top-to-bottom raster order.  Row y sits at
//! imaginary coordinate top − y_scale·(y + 0.5); flipping this is the
//! classic way to produce a silently mirrored image.

extern crate crossbeam;
extern crate image;

use std::path::Path;

use image::ColorType;
use num::Complex;

use error::RenderError;
use escape::escape_row;
use palette::Rgb;
use viewport::Viewport;

/// Everything a render needs, validated once at construction.  Fields
/// are fixed for the lifetime of the spec; each render call builds
/// and owns its own grid.
#[derive(Copy, Clone, Debug)]
pub struct FrameSpec {
    /// The rectangle of the complex plane being drawn.
    pub viewport: Viewport,
    /// Output width in pixels.
    pub width: usize,
    /// Output height in pixels.
    pub height: usize,
    /// Iteration budget; also the required palette length.
    pub max_iterations: usize,
    /// Starting value of the orbit, zero for the classic Mandelbrot.
    pub z_initial: Complex<f64>,
}

impl FrameSpec {
    /// Validates and builds a frame spec.  Fails with
    /// `InvalidArgument` on zero dimensions, a zero iteration budget,
    /// or a non-finite starting value.  The viewport is assumed to
    /// have come through its own validated constructors.
    pub fn new(
        viewport: Viewport,
        width: usize,
        height: usize,
        max_iterations: usize,
        z_initial: Complex<f64>,
    ) -> Result<FrameSpec, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidArgument(format!(
                "image dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if max_iterations < 1 {
            return Err(RenderError::InvalidArgument(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !z_initial.re.is_finite() || !z_initial.im.is_finite() {
            return Err(RenderError::InvalidArgument(format!(
                "starting value must be finite, got {}",
                z_initial
            )));
        }
        Ok(FrameSpec {
            viewport,
            width,
            height,
            max_iterations,
            z_initial,
        })
    }

    /// Complex-plane units per pixel along the real axis.
    pub fn x_scale(&self) -> f64 {
        self.viewport.width() / (self.width as f64)
    }

    /// Complex-plane units per pixel along the imaginary axis.
    pub fn y_scale(&self) -> f64 {
        self.viewport.height() / (self.height as f64)
    }

    /// The real coordinate of every pixel center in a row, computed
    /// once and shared by all rows.
    pub fn row_reals(&self) -> Vec<f64> {
        let scale = self.x_scale();
        (0..self.width)
            .map(|x| self.viewport.left + scale * (x as f64 + 0.5))
            .collect()
    }

    /// The imaginary coordinate of the pixel centers in raster row
    /// `y`, counting down from the top of the viewport.
    pub fn row_imag(&self, y: usize) -> f64 {
        self.viewport.top - self.y_scale() * (y as f64 + 0.5)
    }

    fn check_palette(&self, palette: &[Rgb]) -> Result<(), RenderError> {
        if palette.len() != self.max_iterations {
            return Err(RenderError::InvalidArgument(format!(
                "palette has {} colors but the iteration budget is {}",
                palette.len(),
                self.max_iterations
            )));
        }
        Ok(())
    }
}

/// Renders the frame single-threaded, producing a row-major grid of
/// width·height colors.  The palette length must equal the spec's
/// iteration budget, since counts index straight into it.
pub fn render(spec: &FrameSpec, palette: &[Rgb]) -> Result<Vec<Rgb>, RenderError> {
    spec.check_palette(palette)?;
    let reals = spec.row_reals();
    let mut pixels = Vec::with_capacity(spec.width * spec.height);
    for y in 0..spec.height {
        let counts = escape_row(spec.z_initial, &reals, spec.row_imag(y), spec.max_iterations);
        pixels.extend(counts.into_iter().map(|count| palette[count]));
    }
    Ok(pixels)
}

/// Renders the frame across `threads` scoped worker threads, each
/// taking a contiguous band of rows.  Rows are independent, so the
/// only synchronization is the final join; the output is identical to
/// the single-threaded `render`.
pub fn render_threaded(
    spec: &FrameSpec,
    palette: &[Rgb],
    threads: usize,
) -> Result<Vec<Rgb>, RenderError> {
    if threads < 1 {
        return Err(RenderError::InvalidArgument(
            "thread count must be at least 1".to_string(),
        ));
    }
    if threads == 1 {
        return render(spec, palette);
    }
    spec.check_palette(palette)?;

    let reals = spec.row_reals();
    let band_rows = spec.height / threads + 1;
    let mut pixels = vec![Rgb(0, 0, 0); spec.width * spec.height];
    {
        let reals = &reals;
        crossbeam::scope(|spawner| {
            for (band_index, band) in pixels.chunks_mut(band_rows * spec.width).enumerate() {
                spawner.spawn(move |_| {
                    let top_row = band_index * band_rows;
                    for (row_index, row) in band.chunks_mut(spec.width).enumerate() {
                        let counts = escape_row(
                            spec.z_initial,
                            reals,
                            spec.row_imag(top_row + row_index),
                            spec.max_iterations,
                        );
                        for (pixel, count) in row.iter_mut().zip(counts) {
                            *pixel = palette[count];
                        }
                    }
                });
            }
        })
        .unwrap();
    }
    Ok(pixels)
}

/// Renders the frame and encodes it to `path` with the `image` crate,
/// which picks the format from the file extension.  Encoder and
/// filesystem failures surface as `Encoding`; a failed render writes
/// nothing.
pub fn render_to_file<P: AsRef<Path>>(
    spec: &FrameSpec,
    palette: &[Rgb],
    threads: usize,
    path: P,
) -> Result<(), RenderError> {
    let pixels = render_threaded(spec, palette, threads)?;
    let mut raw = Vec::with_capacity(pixels.len() * 3);
    for &Rgb(r, g, b) in &pixels {
        raw.push(r);
        raw.push(g);
        raw.push(b);
    }
    image::save_buffer(
        path,
        &raw,
        spec.width as u32,
        spec.height as u32,
        ColorType::RGB(8),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape::escape_time;
    use palette::build_palette;

    fn classic_spec(width: usize, height: usize, max_iterations: usize) -> FrameSpec {
        let viewport = Viewport::from_bounds(-2.0, 0.65, -1.25, 1.25).unwrap();
        FrameSpec::new(
            viewport,
            width,
            height,
            max_iterations,
            Complex::new(0.0, 0.0),
        )
        .unwrap()
    }

    fn grayscale(n: usize) -> Vec<Rgb> {
        build_palette(n, Rgb(0, 0, 0), Rgb(255, 255, 255), (1.0, 1.0, 1.0), None).unwrap()
    }

    #[test]
    fn spec_rejects_degenerate_parameters() {
        let viewport = Viewport::from_bounds(-2.0, 0.65, -1.25, 1.25).unwrap();
        let z = Complex::new(0.0, 0.0);
        assert!(FrameSpec::new(viewport, 0, 4, 50, z).is_err());
        assert!(FrameSpec::new(viewport, 4, 0, 50, z).is_err());
        assert!(FrameSpec::new(viewport, 4, 4, 0, z).is_err());
        assert!(FrameSpec::new(viewport, 4, 4, 50, Complex::new(::std::f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn palette_length_must_match_iteration_budget() {
        let spec = classic_spec(4, 4, 50);
        assert!(render(&spec, &grayscale(49)).is_err());
        assert!(render(&spec, &grayscale(50)).is_ok());
    }

    #[test]
    fn four_by_four_render_is_deterministic() {
        let spec = classic_spec(4, 4, 50);
        let palette = grayscale(50);
        let first = render(&spec, &palette).unwrap();
        let second = render(&spec, &palette).unwrap();
        assert_eq!(first.len(), 16);
        assert_eq!(first, second);
    }

    #[test]
    fn interior_and_exterior_pixels_get_the_expected_colors() {
        let spec = classic_spec(4, 4, 50);
        let palette = grayscale(50);
        let grid = render(&spec, &palette).unwrap();
        // Pixel (2, 1) sits at (-0.34375, 0.3125), inside the main
        // cardioid, so it saturates to the last palette entry.
        assert_eq!(grid[1 * 4 + 2], Rgb(255, 255, 255));
        // The top-left corner is far outside and escapes early.
        assert!(grid[0] != Rgb(255, 255, 255));
    }

    #[test]
    fn grid_matches_the_scalar_engine_pixel_by_pixel() {
        let spec = classic_spec(16, 12, 60);
        let palette = grayscale(60);
        let grid = render(&spec, &palette).unwrap();
        let reals = spec.row_reals();
        for y in 0..spec.height {
            for x in 0..spec.width {
                let c = Complex::new(reals[x], spec.row_imag(y));
                let count = escape_time(spec.z_initial, c, spec.max_iterations);
                assert_eq!(grid[y * spec.width + x], palette[count]);
            }
        }
    }

    #[test]
    fn threaded_render_matches_single_threaded() {
        let spec = classic_spec(16, 11, 60);
        let palette = grayscale(60);
        let single = render(&spec, &palette).unwrap();
        for &threads in &[2, 3, 4] {
            assert_eq!(render_threaded(&spec, &palette, threads).unwrap(), single);
        }
    }

    #[test]
    fn zero_threads_is_rejected() {
        let spec = classic_spec(4, 4, 50);
        assert!(render_threaded(&spec, &grayscale(50), 0).is_err());
    }
}
