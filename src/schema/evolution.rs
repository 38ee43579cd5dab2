//! Progress and result records produced by the evolution engine.

use crate::compute::Image;

use super::RuleTable;

/// Snapshot emitted once per generation.
#[derive(Debug, Clone)]
pub struct EvolutionProgress {
    /// Index of the generation that was just evaluated.
    pub generation: u64,
    /// Best score ever observed (lower is better).
    pub best_score: f64,
    /// Generation in which `best_score` was achieved.
    pub best_generation: u64,
    /// Best score within this generation.
    pub generation_best: f64,
    /// Present only when this generation beat the previous best.
    pub improvement: Option<Improvement>,
}

impl EvolutionProgress {
    /// Whether this generation produced a new best.
    pub fn improved(&self) -> bool {
        self.improvement.is_some()
    }
}

/// The new best individual and its rendering.
#[derive(Debug, Clone)]
pub struct Improvement {
    pub table: RuleTable,
    pub image: Image,
}

/// Summary returned once the engine is cancelled.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Best table found, if at least one generation completed.
    pub best: Option<RuleTable>,
    pub stats: EvolutionStats,
}

/// Run statistics.
#[derive(Debug, Clone)]
pub struct EvolutionStats {
    pub generations: u64,
    pub total_evaluations: u64,
    pub best_score: f64,
    pub best_generation: u64,
    pub elapsed_seconds: f64,
    pub evaluations_per_second: f64,
}
