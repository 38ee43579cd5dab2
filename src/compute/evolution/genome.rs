//! Rule table generation, crossover, and mutation.
//!
//! All operators are generic over [`RngCore`] and consume draws in a fixed
//! order, so a seeded [`FractalRng`](crate::compute::FractalRng) reproduces
//! the same tables run after run.

use rand::RngCore;

use crate::schema::{CELLS, RuleTable};

/// Random table: every entry of every row drawn uniformly modulo `ncolors`.
pub fn random_table<R: RngCore>(ncolors: usize, rng: &mut R) -> RuleTable {
    let rows = (0..ncolors)
        .map(|_| {
            let mut row = [0u8; CELLS];
            for entry in &mut row {
                *entry = draw_below(rng.next_u32(), ncolors);
            }
            row
        })
        .collect();
    RuleTable::from_rows_unchecked(rows)
}

/// Row-wise crossover.
///
/// One selector word is pulled from `next_word` for every 32 rows; bit
/// `i % 32` set copies row `i` from `a`, clear copies it from `b`.
pub fn crossover(
    a: &RuleTable,
    b: &RuleTable,
    mut next_word: impl FnMut() -> u32,
) -> RuleTable {
    debug_assert_eq!(a.ncolors(), b.ncolors());
    let mut select = 0u32;
    let rows = (0..a.ncolors())
        .map(|i| {
            if i % 32 == 0 {
                select = next_word();
            }
            if (select >> (i % 32)) & 1 == 1 {
                *a.row(i)
            } else {
                *b.row(i)
            }
        })
        .collect();
    RuleTable::from_rows_unchecked(rows)
}

/// Random point mutations.
///
/// Draws a count in `[0, ncolors)`, then for each mutation a single word
/// whose bits pick the row, the cell and the replacement state.
pub fn mutate<R: RngCore>(table: &mut RuleTable, rng: &mut R) {
    let ncolors = table.ncolors();
    let mutations = rng.next_u32() as usize % ncolors;
    for _ in 0..mutations {
        let select = rng.next_u32();
        let row = select as usize % ncolors;
        let cell = (select >> 8) as usize % CELLS;
        let value = draw_below(select >> 12, ncolors);
        table.set(row, cell, value);
    }
}

/// Crossover followed by mutation.
pub fn breed<R: RngCore>(a: &RuleTable, b: &RuleTable, rng: &mut R) -> RuleTable {
    let mut child = crossover(a, b, || rng.next_u32());
    mutate(&mut child, rng);
    child
}

/// Number of entries in which two tables differ.
pub fn table_distance(a: &RuleTable, b: &RuleTable) -> usize {
    a.rows()
        .iter()
        .flatten()
        .zip(b.rows().iter().flatten())
        .filter(|(x, y)| x != y)
        .count()
}

#[inline]
fn draw_below(word: u32, n: usize) -> u8 {
    (word as usize % n) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::FractalRng;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_random_table_in_range() {
        let mut rng = FractalRng::new(42);
        for ncolors in [1, 2, 7, 256] {
            let table = random_table(ncolors, &mut rng);
            assert_eq!(table.ncolors(), ncolors);
            assert!(table.rows().iter().flatten().all(|&v| (v as usize) < ncolors));
        }
    }

    #[test]
    fn test_random_table_draw_order() {
        let mut rng = FractalRng::new(7);
        let mut replay = rng.clone();
        let table = random_table(3, &mut rng);
        for state in 0..3 {
            for cell in 0..CELLS {
                assert_eq!(table.row(state)[cell] as u32, replay.next_u32() % 3);
            }
        }
        assert_eq!(rng, replay);
    }

    #[test]
    fn test_all_ones_selector_copies_a() {
        let a = RuleTable::uniform(2, 0);
        let b = RuleTable::uniform(2, 1);
        assert_eq!(crossover(&a, &b, || u32::MAX), a);
    }

    #[test]
    fn test_zero_stream_breeds_copy_of_b() {
        // Selector 0 takes every row from `b`; mutation count 0 % n is zero.
        let a = RuleTable::uniform(2, 0);
        let b = RuleTable::uniform(2, 1);
        let mut rng = StepRng::new(0, 0);
        assert_eq!(breed(&a, &b, &mut rng), b);
    }

    #[test]
    fn test_selector_refreshes_every_32_rows() {
        let a = RuleTable::uniform(40, 0);
        let b = RuleTable::uniform(40, 1);
        let mut words = [u32::MAX, 0].into_iter();
        let child = crossover(&a, &b, || words.next().unwrap());
        for i in 0..32 {
            assert_eq!(child.row(i), a.row(i));
        }
        for i in 32..40 {
            assert_eq!(child.row(i), b.row(i));
        }
    }

    #[test]
    fn test_mutation_decodes_word() {
        // Every draw is 0x0000_2103: count 3 % 4 = 3, row 3 % 4 = 3,
        // cell (0x21) % 9 = 6, value (0x2) % 4 = 2.
        let mut table = RuleTable::uniform(4, 0);
        let mut rng = StepRng::new(0x2103, 0);
        mutate(&mut table, &mut rng);
        assert_eq!(table.row(3)[6], 2);
        assert_eq!(table_distance(&table, &RuleTable::uniform(4, 0)), 1);
    }

    #[test]
    fn test_table_distance() {
        let a = RuleTable::uniform(3, 0);
        let b = RuleTable::uniform(3, 1);
        assert_eq!(table_distance(&a, &a), 0);
        assert_eq!(table_distance(&a, &b), 27);
    }

    proptest! {
        #[test]
        fn test_crossover_rows_come_from_a_parent(seed in any::<u64>(), n in 1usize..64) {
            let mut rng = FractalRng::new(seed);
            let a = random_table(n, &mut rng);
            let b = random_table(n, &mut rng);
            let child = crossover(&a, &b, || rng.next_u32());
            for i in 0..n {
                prop_assert!(child.row(i) == a.row(i) || child.row(i) == b.row(i));
            }
        }

        #[test]
        fn test_breed_stays_in_range(seed in any::<u64>(), n in 1usize..32) {
            let mut rng = FractalRng::new(seed);
            let a = random_table(n, &mut rng);
            let b = random_table(n, &mut rng);
            let child = breed(&a, &b, &mut rng);
            prop_assert_eq!(child.ncolors(), n);
            prop_assert!(child.rows().iter().flatten().all(|&v| (v as usize) < n));
        }
    }
}
