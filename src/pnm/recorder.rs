//! Appending recorder that turns a stream of images into one PPM video.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::format::write_ppm;
use crate::compute::Image;

/// Concatenates binary PPM frames into a single file.
///
/// The result plays directly in tools that accept a PPM stream, e.g.
/// `ffmpeg -i video.ppm`.
pub struct FrameRecorder {
    writer: BufWriter<File>,
    ncolors: usize,
    scale: usize,
    frames_written: u64,
}

impl FrameRecorder {
    /// Create (or truncate) the video file.
    pub fn create<P: AsRef<Path>>(path: P, ncolors: usize, scale: usize) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            ncolors,
            scale,
            frames_written: 0,
        })
    }

    /// Append a frame and flush it to disk.
    pub fn record_frame(&mut self, image: &Image) -> io::Result<()> {
        write_ppm(image, self.ncolors, self.scale, &mut self.writer)?;
        self.writer.flush()?;
        self.frames_written += 1;
        Ok(())
    }

    /// Get number of frames recorded so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}
