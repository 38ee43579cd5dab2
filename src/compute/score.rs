//! Local-mean image error.
//!
//! Each pixel is replaced by the mean of itself and its in-grid 8-neighbors
//! (no wrapping, no padding), and the squared differences of the two mean
//! fields are summed. Identical images score exactly zero.

use super::Image;

const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Error between two equal-size images; lower is better.
///
/// # Panics
///
/// Panics if the images differ in size.
pub fn score(a: &Image, b: &Image) -> f64 {
    LocalMeans::of(a).score(b)
}

/// Precomputed local means of a fixed image.
#[derive(Debug, Clone)]
pub struct LocalMeans {
    size: usize,
    means: Vec<f64>,
}

impl LocalMeans {
    /// Compute the 3×3 neighborhood mean of every pixel.
    pub fn of(image: &Image) -> Self {
        let size = image.size();
        let mut means = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                means.push(local_mean(image, x, y));
            }
        }
        Self { size, means }
    }

    /// Edge length of the source image.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sum of squared mean differences against `image`.
    ///
    /// # Panics
    ///
    /// Panics if `image` is not the same size as the source image.
    pub fn score(&self, image: &Image) -> f64 {
        assert_eq!(image.size(), self.size, "image size mismatch");
        let mut error = 0.0;
        for y in 0..self.size {
            for x in 0..self.size {
                let delta = self.means[y * self.size + x] - local_mean(image, x, y);
                error += delta * delta;
            }
        }
        error
    }
}

#[inline]
fn local_mean(image: &Image, x: usize, y: usize) -> f64 {
    let size = image.size() as isize;
    let mut sum = image.get(x, y) as u32;
    let mut count = 1u32;
    for (dx, dy) in NEIGHBORS {
        let xx = x as isize + dx;
        let yy = y as isize + dy;
        if (0..size).contains(&xx) && (0..size).contains(&yy) {
            sum += image.get(xx as usize, yy as usize) as u32;
            count += 1;
        }
    }
    sum as f64 / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_pair() -> impl Strategy<Value = (Image, Image)> {
        (1usize..12).prop_flat_map(|size| {
            let pixels = proptest::collection::vec(any::<u8>(), size * size);
            (pixels.clone(), pixels).prop_map(move |(a, b)| {
                (
                    Image::from_pixels(size, a).unwrap(),
                    Image::from_pixels(size, b).unwrap(),
                )
            })
        })
    }

    #[test]
    fn test_corner_uses_four_cells() {
        // Only (0, 0) differs; it is inside the neighborhoods of (0,0), (1,0), (0,1), (1,1).
        let a = Image::uniform(3, 0);
        let mut b = Image::uniform(3, 0);
        b.set(0, 0, 4);
        // corners average 4 cells, edges 6 cells, center 9 cells
        let expected = 1.0 + 2.0 * (4.0f64 / 6.0).powi(2) + (4.0f64 / 9.0).powi(2);
        assert!((score(&a, &b) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_single_pixel_images() {
        let a = Image::uniform(1, 3);
        let b = Image::uniform(1, 1);
        assert_eq!(score(&a, &b), 4.0);
    }

    #[test]
    fn test_local_means_match_score() {
        let a = Image::from_pixels(3, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let b = Image::from_pixels(3, vec![8, 7, 6, 5, 4, 3, 2, 1, 0]).unwrap();
        assert_eq!(LocalMeans::of(&a).score(&b), score(&a, &b));
    }

    #[test]
    #[should_panic(expected = "image size mismatch")]
    fn test_size_mismatch_panics() {
        score(&Image::uniform(3, 0), &Image::uniform(9, 0));
    }

    proptest! {
        #[test]
        fn test_identity((a, _) in arb_pair()) {
            prop_assert_eq!(score(&a, &a), 0.0);
        }

        #[test]
        fn test_symmetric_and_non_negative((a, b) in arb_pair()) {
            let ab = score(&a, &b);
            prop_assert!(ab >= 0.0);
            prop_assert_eq!(ab, score(&b, &a));
        }
    }
}
