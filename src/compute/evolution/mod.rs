//! Evolutionary search for rule tables that approximate a target image.
//!
//! # Overview
//!
//! - **Genome Operations** (`genome`): random tables, row crossover, point mutation
//! - **Fitness** (`fitness`): parallel render-and-score against the target
//! - **Search** (`search`): the generational loop with elitism and regeneration
//! - **Progress Archive** (`archive`): artifacts written on every improvement
//!
//! # Example
//!
//! ```rust,no_run
//! use fractal_automata::compute::Image;
//! use fractal_automata::compute::evolution::EvolutionEngine;
//! use fractal_automata::schema::EvolutionConfig;
//!
//! let target = Image::uniform(81, 0);
//! let mut engine = EvolutionEngine::new(EvolutionConfig::default(), &target, 2).unwrap();
//! for _ in 0..10 {
//!     let progress = engine.step_generation();
//!     println!("{} {:.3}", progress.generation, progress.best_score);
//! }
//! ```
//!
//! # Generation layout
//!
//! After ranking, slots `[0, keep)` hold the elites, `[keep, size - regen)`
//! hold offspring of two parents drawn from the best `breed_size`, and the
//! final `regen` slots are fresh random tables.

mod archive;
mod fitness;
mod genome;
mod search;

pub use archive::{PROGRESS_FILE, ProgressArchive, RULESET_FILE, VIDEO_FILE};
pub use fitness::FitnessEvaluator;
pub use genome::{breed, crossover, mutate, random_table, table_distance};
pub use search::{EvolutionEngine, Ranked, rank};
