//! The error taxonomy for rendering.  Everything surfaces
//! immediately to the caller; the computation is pure and
//! deterministic, so nothing is retried.

use std::io;

/// The ways a render can fail.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// A caller-supplied parameter was malformed or out of range.
    #[fail(display = "invalid argument: {}", _0)]
    InvalidArgument(String),
    /// The image encoder could not produce or write the output file.
    #[fail(display = "could not encode image: {}", _0)]
    Encoding(#[fail(cause)] io::Error),
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> RenderError {
        RenderError::Encoding(err)
    }
}
