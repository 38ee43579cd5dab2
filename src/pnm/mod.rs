//! Netpbm image I/O for target images and progress artifacts.
//!
//! # Formats
//!
//! ```text
//! P2 (ASCII graymap), read and written:
//!   "P2" <width> <height> <max value>
//!   width * height decimal samples, whitespace separated
//!   '#' starts a comment running to end of line
//!
//! P6 (binary pixmap), written only:
//!   "P6\n<width> <height>\n255\n"
//!   width * height RGB byte triples
//! ```
//!
//! A video is simply a concatenation of P6 frames.

mod format;
mod recorder;

pub use format::{
    GrayImage, PGM_MAGIC, PPM_MAGIC, PnmError, parse_pgm, read_pgm, write_pgm, write_ppm,
};
pub use recorder::FrameRecorder;
