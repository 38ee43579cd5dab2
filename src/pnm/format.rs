//! Netpbm codecs: ASCII PGM (`P2`) in and out, binary PPM (`P6`) out.

use std::io::{self, Read, Write};

use crate::compute::Image;

/// Magic for ASCII grayscale images.
pub const PGM_MAGIC: &str = "P2";
/// Magic for binary RGB images.
pub const PPM_MAGIC: &str = "P6";

/// A grayscale image whose samples are color indices `0..=max_value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    pub image: Image,
    pub max_value: u8,
}

impl GrayImage {
    /// Number of distinct colors the header allows.
    pub fn ncolors(&self) -> usize {
        self.max_value as usize + 1
    }
}

/// Read a square ASCII PGM of edge `expected_size`.
pub fn read_pgm<R: Read>(mut reader: R, expected_size: usize) -> Result<GrayImage, PnmError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_pgm(&text, expected_size)
}

/// Parse a square ASCII PGM of edge `expected_size`.
///
/// `#` comments run to end of line. Every sample must be within the declared
/// max value, which itself must be in `1..=255`.
pub fn parse_pgm(text: &str, expected_size: usize) -> Result<GrayImage, PnmError> {
    let mut tokens = text
        .lines()
        .flat_map(|line| line.split('#').next().unwrap_or("").split_ascii_whitespace())
        .enumerate();

    match tokens.next() {
        Some((_, PGM_MAGIC)) => {}
        Some((_, other)) => return Err(PnmError::Magic(other.to_string())),
        None => return Err(PnmError::UnexpectedEnd("magic")),
    }

    let mut next_number = |what: &'static str| -> Result<usize, PnmError> {
        let (position, token) = tokens.next().ok_or(PnmError::UnexpectedEnd(what))?;
        token.parse().map_err(|_| PnmError::InvalidNumber {
            token: token.to_string(),
            position,
        })
    };

    let width = next_number("width")?;
    let height = next_number("height")?;
    let max_value = next_number("max value")?;
    if width != expected_size || height != expected_size {
        return Err(PnmError::Dimensions {
            width,
            height,
            expected: expected_size,
        });
    }
    if !(1..=u8::MAX as usize).contains(&max_value) {
        return Err(PnmError::MaxValue(max_value));
    }

    let mut pixels = Vec::with_capacity(width * height);
    for index in 0..width * height {
        let value = next_number("sample")?;
        if value > max_value {
            return Err(PnmError::SampleOutOfRange {
                index,
                value,
                max_value,
            });
        }
        pixels.push(value as u8);
    }

    if let Some((position, token)) = tokens.next() {
        return Err(PnmError::TrailingData {
            token: token.to_string(),
            position,
        });
    }

    let image = Image::from_pixels(expected_size, pixels)
        .ok_or(PnmError::UnexpectedEnd("sample"))?;
    Ok(GrayImage {
        image,
        max_value: max_value as u8,
    })
}

/// Largest index for `ncolors`, clamped so single-color images stay valid.
fn max_index(ncolors: usize) -> usize {
    ncolors.saturating_sub(1).max(1)
}

/// Write an ASCII PGM, each pixel replicated into a `scale × scale` block.
pub fn write_pgm<W: Write>(
    image: &Image,
    ncolors: usize,
    scale: usize,
    w: &mut W,
) -> io::Result<()> {
    let size = image.size() * scale;
    write!(w, "{PGM_MAGIC}\n{size} {size}\n{}\n", max_index(ncolors))?;
    for value in image.scaled_pixels(scale) {
        writeln!(w, "{value}")?;
    }
    Ok(())
}

/// Write one binary PPM frame, color indices stretched to `0..=255` gray.
pub fn write_ppm<W: Write>(
    image: &Image,
    ncolors: usize,
    scale: usize,
    w: &mut W,
) -> io::Result<()> {
    let size = image.size() * scale;
    write!(w, "{PPM_MAGIC}\n{size} {size}\n255\n")?;
    let max = max_index(ncolors);
    let mut row = Vec::with_capacity(size * 3);
    let mut pixels = image.scaled_pixels(scale);
    for _ in 0..size {
        row.clear();
        for value in pixels.by_ref().take(size) {
            let v = (value as usize * 255 / max).min(255) as u8;
            row.extend_from_slice(&[v, v, v]);
        }
        w.write_all(&row)?;
    }
    Ok(())
}

/// Errors reading a PGM target image.
#[derive(Debug, thiserror::Error)]
pub enum PnmError {
    #[error("Expected magic \"P2\", found {0:?}")]
    Magic(String),
    #[error("Unexpected end of input while reading {0}")]
    UnexpectedEnd(&'static str),
    #[error("Invalid number {token:?} at token {position}")]
    InvalidNumber { token: String, position: usize },
    #[error("Image is {width}x{height}, expected {expected}x{expected}")]
    Dimensions {
        width: usize,
        height: usize,
        expected: usize,
    },
    #[error("Max value must be between 1 and 255, got {0}")]
    MaxValue(usize),
    #[error("Sample {index} has value {value}, above max value {max_value}")]
    SampleOutOfRange {
        index: usize,
        value: usize,
        max_value: usize,
    },
    #[error("Unexpected trailing token {token:?} at token {position}")]
    TrailingData { token: String, position: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_comments() {
        let text = "P2\n# created by hand\n3 3 # size\n2\n0 1 2\n2 1 0\n0 0 0\n";
        let gray = parse_pgm(text, 3).unwrap();
        assert_eq!(gray.max_value, 2);
        assert_eq!(gray.ncolors(), 3);
        assert_eq!(gray.image.pixels(), &[0, 1, 2, 2, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_pgm("", 3), Err(PnmError::UnexpectedEnd("magic"))));
        assert!(matches!(parse_pgm("P5 3 3 1", 3), Err(PnmError::Magic(_))));
        assert!(matches!(
            parse_pgm("P2 3 2 1 0 0 0 0 0 0", 3),
            Err(PnmError::Dimensions { .. })
        ));
        assert!(matches!(
            parse_pgm("P2 1 1 0 0", 1),
            Err(PnmError::MaxValue(0))
        ));
        assert!(matches!(
            parse_pgm("P2 1 1 256 0", 1),
            Err(PnmError::MaxValue(256))
        ));
        assert!(matches!(
            parse_pgm("P2 1 1 3 4", 1),
            Err(PnmError::SampleOutOfRange { value: 4, .. })
        ));
        assert!(matches!(
            parse_pgm("P2 1 1 3 -1", 1),
            Err(PnmError::InvalidNumber { position: 4, .. })
        ));
        assert!(matches!(
            parse_pgm("P2 2 2 3 0 1 2", 2),
            Err(PnmError::UnexpectedEnd("sample"))
        ));
        assert!(matches!(
            parse_pgm("P2 1 1 3 0 0", 1),
            Err(PnmError::TrailingData { .. })
        ));
    }

    #[test]
    fn test_pgm_round_trip() {
        let image = Image::from_pixels(3, vec![0, 1, 2, 3, 4, 5, 6, 7, 0]).unwrap();
        let mut buf = Vec::new();
        write_pgm(&image, 8, 1, &mut buf).unwrap();
        let gray = read_pgm(buf.as_slice(), 3).unwrap();
        assert_eq!(gray.image, image);
        assert_eq!(gray.max_value, 7);
    }

    #[test]
    fn test_pgm_scaled_header() {
        let mut buf = Vec::new();
        write_pgm(&Image::uniform(2, 0), 1, 3, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("P2\n6 6\n1\n"));
        assert_eq!(text.lines().count(), 3 + 36);
    }

    #[test]
    fn test_ppm_frame() {
        let image = Image::from_pixels(1, vec![1]).unwrap();
        let mut buf = Vec::new();
        write_ppm(&image, 3, 2, &mut buf).unwrap();
        let header = b"P6\n2 2\n255\n";
        assert_eq!(&buf[..header.len()], header);
        assert_eq!(&buf[header.len()..], &[127u8; 12]);
    }
}
