//! Fitness evaluation against a fixed target image.

use rayon::prelude::*;

use crate::compute::{Image, LocalMeans, render_into};
use crate::schema::RuleTable;

/// Scores rule tables by rendering them and comparing against the target.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    target: LocalMeans,
}

impl FitnessEvaluator {
    /// Create an evaluator for `target`; its local means are computed once.
    pub fn new(target: &Image) -> Self {
        Self {
            target: LocalMeans::of(target),
        }
    }

    /// Edge length tables are rendered at.
    pub fn resolution(&self) -> usize {
        self.target.size()
    }

    /// Render `table` into `scratch` and score it.
    pub fn evaluate(&self, table: &RuleTable, scratch: &mut Image) -> f64 {
        debug_assert_eq!(scratch.size(), self.resolution());
        render_into(table, scratch);
        self.target.score(scratch)
    }

    /// Score every table, in parallel. Scores line up with `tables`.
    ///
    /// Each rayon job owns its scratch image; the returned vector is complete
    /// before this call returns.
    pub fn evaluate_population(&self, tables: &[RuleTable]) -> Vec<f64> {
        let resolution = self.resolution();
        tables
            .par_iter()
            .map_init(
                || Image::uniform(resolution, 0),
                |scratch, table| self.evaluate(table, scratch),
            )
            .collect()
    }
}
