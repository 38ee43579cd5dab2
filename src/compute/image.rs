//! Square grids of color indices.

/// A square image of color indices, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Image {
    size: usize,
    pixels: Vec<u8>,
}

impl Image {
    /// Image of edge `size` filled with `value`.
    pub fn uniform(size: usize, value: u8) -> Self {
        Self {
            size,
            pixels: vec![value; size * size],
        }
    }

    /// Wrap row-major pixels; returns `None` unless `pixels.len() == size²`.
    pub fn from_pixels(size: usize, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == size * size).then_some(Self { size, pixels })
    }

    /// Edge length in pixels.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.size + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.pixels[y * self.size + x] = value;
    }

    /// Largest color index present.
    pub fn max_value(&self) -> u8 {
        self.pixels.iter().copied().max().unwrap_or(0)
    }

    /// Iterate the pixels of the `scale`-times enlarged image, row-major,
    /// without materializing it.
    pub fn scaled_pixels(&self, scale: usize) -> impl Iterator<Item = u8> + '_ {
        let out = self.size * scale;
        (0..out).flat_map(move |y| (0..out).map(move |x| self.get(x / scale, y / scale)))
    }
}
