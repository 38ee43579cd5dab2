//! Deterministic fractal rendering by repeated ternary subdivision.
//!
//! Every pixel walks down `log₃(resolution)` levels starting in state 0. At
//! each level the pixel's cell within the current 3×3 subdivision selects
//! the next state from the table. The final state is the pixel's color, so a
//! pixel depends only on its own coordinates and the table.

use rayon::prelude::*;

use crate::schema::RuleTable;

use super::Image;

/// Whether `n` is `3^k` for some `k >= 0`.
pub fn is_power_of_three(mut n: usize) -> bool {
    if n == 0 {
        return false;
    }
    while n % 3 == 0 {
        n /= 3;
    }
    n == 1
}

/// Number of subdivision levels for a resolution (`log₃`, rounded down).
pub fn iterations_for(resolution: usize) -> u32 {
    let mut iterations = 0;
    let mut div = resolution / 3;
    while div > 0 {
        iterations += 1;
        div /= 3;
    }
    iterations
}

/// Edge length rendered by `iterations` levels, if it fits in `usize`.
pub fn resolution_for(iterations: u32) -> Option<usize> {
    3usize.checked_pow(iterations)
}

/// Color of pixel `(x, y)` at the given resolution.
#[inline]
pub fn render_pixel(table: &RuleTable, resolution: usize, x: usize, y: usize) -> u8 {
    let mut state = 0u8;
    let (mut px, mut py) = (x, y);
    let mut div = resolution / 3;
    while div > 0 {
        state = table.next_state(state, (py / div) * 3 + px / div);
        px %= div;
        py %= div;
        div /= 3;
    }
    state
}

/// Render a table at `resolution × resolution`.
pub fn render(table: &RuleTable, resolution: usize) -> Image {
    let mut image = Image::uniform(resolution, 0);
    render_into(table, &mut image);
    image
}

/// Render into an existing buffer, reusing its allocation.
pub fn render_into(table: &RuleTable, image: &mut Image) {
    let resolution = image.size();
    if resolution == 0 {
        return;
    }
    for (y, row) in image.pixels_mut().chunks_exact_mut(resolution).enumerate() {
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = render_pixel(table, resolution, x, y);
        }
    }
}

/// Render with rows distributed over the rayon pool.
pub fn render_parallel(table: &RuleTable, resolution: usize) -> Image {
    let mut image = Image::uniform(resolution, 0);
    if resolution > 0 {
        image
            .pixels_mut()
            .par_chunks_exact_mut(resolution)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = render_pixel(table, resolution, x, y);
                }
            });
    }
    image
}
