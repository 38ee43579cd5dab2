//! Fractal Automata - Evolving self-similar rule tables toward a target image.
//!
//! A rule table maps each color to nine successor colors, one per cell of a
//! 3×3 subdivision. Rendering starts every pixel in color 0 and repeatedly
//! descends into the cell containing it, so a table of a few dozen bytes
//! describes an image at any power-of-three resolution. The crate searches
//! for tables whose rendering resembles a given target.
//!
//! # Architecture
//!
//! - `schema`: Rule tables, their text format, configuration and progress records
//! - `compute`: RNG, renderer, scorer and the evolutionary engine
//! - `pnm`: PGM/PPM codecs for targets and progress artifacts
//!
//! # Example
//!
//! ```rust
//! use fractal_automata::{
//!     compute::{render, score},
//!     schema::RuleTable,
//! };
//!
//! // State 0 keeps its corners and center, everything else becomes state 1.
//! let table = RuleTable::from_rows(vec![[0, 1, 0, 1, 0, 1, 0, 1, 0], [1; 9]]).unwrap();
//! let image = render(&table, 27);
//!
//! assert_eq!(score(&image, &image), 0.0);
//! println!("{}", table.to_text(3));
//! ```

pub mod compute;
pub mod pnm;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::{EvolutionEngine, ProgressArchive};
pub use compute::{FractalRng, Image, render, score};
pub use schema::{EvolutionConfig, RuleTable, Ruleset};
