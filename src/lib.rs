#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time Mandelbrot renderer
//!
//! The Mandelbrot set is drawn by taking each pixel of an image,
//! mapping it to a point c on the complex plane, and repeatedly
//! applying z = z² + c.  Points whose orbit stays bounded belong to
//! the set; for the rest, the number of iterations survived before
//! the orbit's magnitude exceeds the escape radius is the pixel's
//! "escape time."  A palette maps escape times to colors, with an
//! optional flat "interior" color for points that never escape, and
//! the resulting grid is encoded as a raster image.
//!
//! The crate is split along those lines: `escape` holds the
//! recurrence itself (a scalar engine and a row-batched one that
//! must agree), `viewport` maps the pixel grid onto the complex
//! plane, `palette` generates the color ramp, and `render` strings
//! them together, optionally fanning rows out across threads.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate num;

pub mod error;
pub mod escape;
pub mod palette;
pub mod render;
pub mod viewport;

pub use error::RenderError;
pub use escape::{escape_row, escape_time};
pub use palette::{build_palette, Rgb};
pub use render::{render, render_threaded, render_to_file, FrameSpec};
pub use viewport::Viewport;
