//! Generational search over rule tables.
//!
//! Each generation evaluates the whole population in parallel, ranks it,
//! rebuilds it in place (elites, offspring of the breeding pool, fresh random
//! tables) and reports whether the best score improved.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rand::RngCore;

use crate::compute::{FractalRng, Image, render};
use crate::schema::{
    ConfigError, EvolutionConfig, EvolutionProgress, EvolutionResult, EvolutionStats,
    Improvement, MAX_COLORS, RuleTable,
};

use super::fitness::FitnessEvaluator;
use super::genome::{breed, random_table, table_distance};

/// Score of one individual together with its population slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    pub score: f64,
    pub index: usize,
}

/// Order individuals by ascending score, ties broken by slot index.
pub fn rank(scores: &[f64]) -> Vec<Ranked> {
    let mut ranking: Vec<Ranked> = scores
        .iter()
        .enumerate()
        .map(|(index, &score)| Ranked { score, index })
        .collect();
    ranking.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.index.cmp(&b.index)));
    ranking
}

/// Evolution engine that runs the search.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    ncolors: usize,
    rng: FractalRng,
    evaluator: FitnessEvaluator,
    population: Vec<RuleTable>,
    generation: u64,
    best_score: f64,
    best_generation: u64,
    best: Option<RuleTable>,
    cancelled: Arc<AtomicBool>,
}

impl EvolutionEngine {
    /// Create an engine for `target`, whose pixels are color indices below
    /// `ncolors`. The population is initialized immediately.
    pub fn new(
        config: EvolutionConfig,
        target: &Image,
        ncolors: usize,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if target.size() != config.resolution {
            return Err(ConfigError::TargetSize {
                actual: target.size(),
                expected: config.resolution,
            });
        }
        if ncolors == 0 || ncolors > MAX_COLORS || target.max_value() as usize >= ncolors {
            return Err(ConfigError::InvalidColorCount(ncolors));
        }

        let seed = config.random_seed.unwrap_or_else(rand::random);
        log::info!(
            "Evolving {} tables of {} colors at {}x{} (seed {:#018x})",
            config.population.size,
            ncolors,
            config.resolution,
            config.resolution,
            seed
        );

        let mut engine = Self {
            evaluator: FitnessEvaluator::new(target),
            rng: FractalRng::new(seed),
            config,
            ncolors,
            population: Vec::new(),
            generation: 0,
            best_score: f64::INFINITY,
            best_generation: 0,
            best: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        };
        engine.initialize();
        Ok(engine)
    }

    /// Get cancellation handle. Checked between generations.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Replace the population with fresh random tables and forget the best.
    pub fn initialize(&mut self) {
        self.population = (0..self.config.population.size)
            .map(|_| random_table(self.ncolors, &mut self.rng))
            .collect();
        self.generation = 0;
        self.best_score = f64::INFINITY;
        self.best_generation = 0;
        self.best = None;
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn ncolors(&self) -> usize {
        self.ncolors
    }

    pub fn population(&self) -> &[RuleTable] {
        &self.population
    }

    /// Number of completed generations.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Best score so far; infinite before the first generation.
    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    pub fn best(&self) -> Option<&RuleTable> {
        self.best.as_ref()
    }

    /// Run a single generation: evaluate, rank, breed, report.
    pub fn step_generation(&mut self) -> EvolutionProgress {
        let scores = self.evaluator.evaluate_population(&self.population);
        let ranking = rank(&scores);

        let pool: Vec<RuleTable> = ranking
            .iter()
            .take(self.config.population.breed_size)
            .map(|r| self.population[r.index].clone())
            .collect();
        let generation_best = ranking[0].score;

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Generation {}: best {:.6}, median {:.6}, pool diversity {:.2}",
                self.generation,
                generation_best,
                ranking[ranking.len() / 2].score,
                pool_diversity(&pool)
            );
        }

        self.breed_next_generation(&pool);

        let improvement = if generation_best < self.best_score {
            self.best_score = generation_best;
            self.best_generation = self.generation;
            let table = pool[0].clone();
            let image = render(&table, self.config.resolution);
            self.best = Some(table.clone());
            log::info!(
                "Generation {}: new best score {:.6}",
                self.generation,
                generation_best
            );
            Some(Improvement { table, image })
        } else {
            None
        };

        let progress = EvolutionProgress {
            generation: self.generation,
            best_score: self.best_score,
            best_generation: self.best_generation,
            generation_best,
            improvement,
        };
        self.generation += 1;
        progress
    }

    /// Rebuild the population from the ranked breeding pool.
    fn breed_next_generation(&mut self, pool: &[RuleTable]) {
        let size = self.config.population.size;
        let keep = self.config.population.keep_size;
        let regen_start = size - self.config.population.regen_size;
        let breed_size = pool.len();

        // Elitism
        for (slot, elite) in self.population.iter_mut().zip(pool).take(keep) {
            slot.clone_from(elite);
        }

        // Offspring
        for slot in keep..regen_start {
            let select = self.rng.next_u32();
            let a = select as usize % breed_size;
            let b = (select >> 16) as usize % breed_size;
            self.population[slot] = breed(&pool[a], &pool[b], &mut self.rng);
        }

        // Regeneration
        for slot in regen_start..size {
            self.population[slot] = random_table(self.ncolors, &mut self.rng);
        }
    }

    /// Run until cancelled, reporting every generation.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> EvolutionResult
    where
        F: FnMut(&EvolutionProgress),
    {
        let start_time = Instant::now();
        let first_generation = self.generation;

        while !self.cancelled.load(Ordering::Relaxed) {
            let progress = self.step_generation();
            callback(&progress);
        }

        let elapsed = start_time.elapsed().as_secs_f64();
        let generations = self.generation - first_generation;
        let total_evaluations = generations * self.config.population.size as u64;
        log::info!(
            "Stopped after {} generations, best score {:.6} (generation {})",
            generations,
            self.best_score,
            self.best_generation
        );

        EvolutionResult {
            best: self.best.clone(),
            stats: EvolutionStats {
                generations,
                total_evaluations,
                best_score: self.best_score,
                best_generation: self.best_generation,
                elapsed_seconds: elapsed,
                evaluations_per_second: if elapsed > 0.0 {
                    total_evaluations as f64 / elapsed
                } else {
                    0.0
                },
            },
        }
    }

    /// Run until cancelled (blocking).
    pub fn run(&mut self) -> EvolutionResult {
        self.run_with_callback(|_| {})
    }
}

/// Mean pairwise entry distance within the breeding pool.
fn pool_diversity(pool: &[RuleTable]) -> f64 {
    let mut total = 0usize;
    let mut count = 0usize;
    for (i, a) in pool.iter().enumerate() {
        for b in &pool[i + 1..] {
            total += table_distance(a, b);
            count += 1;
        }
    }
    if count > 0 {
        total as f64 / count as f64
    } else {
        0.0
    }
}
