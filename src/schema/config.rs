//! Configuration types for the evolutionary search.
//!
//! Every field defaults to the compile-time constants below, so an empty JSON
//! object (`{}`) is a valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Edge length of the target image (3⁴).
pub const TARGET_RESOLUTION: usize = 81;
/// Number of rule tables per generation.
pub const POPULATION: usize = 200;
/// Best tables carried forward unchanged.
pub const KEEP_SIZE: usize = 4;
/// Best tables eligible as parents.
pub const BREED_SIZE: usize = 10;
/// Slots refilled with fresh random tables every generation.
pub const REGEN_SIZE: usize = 5;
/// Pixel replication factor for progress images.
pub const SCALE: usize = 10;

/// Top-level configuration for an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Edge length of the target image; must be a power of three.
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    /// Population and selection sizes.
    #[serde(default)]
    pub population: PopulationConfig,
    /// Progress artifact settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// Random seed for reproducibility. `None` draws one from the OS.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            population: PopulationConfig::default(),
            output: OutputConfig::default(),
            random_seed: None,
        }
    }
}

fn default_resolution() -> usize {
    TARGET_RESOLUTION
}

/// Population and selection sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of individuals in population.
    #[serde(default = "default_population_size")]
    pub size: usize,
    /// Elitism: number of best individuals copied unchanged.
    #[serde(default = "default_keep_size")]
    pub keep_size: usize,
    /// Number of best individuals parents are drawn from.
    #[serde(default = "default_breed_size")]
    pub breed_size: usize,
    /// Number of fresh random individuals injected each generation.
    #[serde(default = "default_regen_size")]
    pub regen_size: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_population_size(),
            keep_size: default_keep_size(),
            breed_size: default_breed_size(),
            regen_size: default_regen_size(),
        }
    }
}

fn default_population_size() -> usize {
    POPULATION
}
fn default_keep_size() -> usize {
    KEEP_SIZE
}
fn default_breed_size() -> usize {
    BREED_SIZE
}
fn default_regen_size() -> usize {
    REGEN_SIZE
}

/// Where and how progress artifacts are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving `progress.pgm`, `video.ppm` and `best.txt`.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Each rendered pixel becomes a `scale × scale` block.
    #[serde(default = "default_scale")]
    pub scale: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            scale: default_scale(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_scale() -> usize {
    SCALE
}

impl EvolutionConfig {
    /// Number of ternary subdivision levels implied by the resolution.
    pub fn iterations(&self) -> u32 {
        crate::compute::iterations_for(self.resolution)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !crate::compute::is_power_of_three(self.resolution) {
            return Err(ConfigError::InvalidResolution(self.resolution));
        }
        let p = &self.population;
        if p.size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if p.breed_size == 0 || p.breed_size > p.size {
            return Err(ConfigError::InvalidBreedSize {
                breed_size: p.breed_size,
                size: p.size,
            });
        }
        if p.keep_size > p.breed_size {
            return Err(ConfigError::KeepExceedsBreed {
                keep_size: p.keep_size,
                breed_size: p.breed_size,
            });
        }
        if p.keep_size + p.regen_size > p.size {
            return Err(ConfigError::Overcommitted {
                keep_size: p.keep_size,
                regen_size: p.regen_size,
                size: p.size,
            });
        }
        if self.output.scale == 0 {
            return Err(ConfigError::InvalidScale);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Resolution {0} is not a power of three")]
    InvalidResolution(usize),
    #[error("Population size must be non-zero")]
    EmptyPopulation,
    #[error("Breeding pool of {breed_size} must be between 1 and population size {size}")]
    InvalidBreedSize { breed_size: usize, size: usize },
    #[error("Cannot keep {keep_size} elites from a breeding pool of {breed_size}")]
    KeepExceedsBreed { keep_size: usize, breed_size: usize },
    #[error("{keep_size} elites plus {regen_size} regenerated exceed population size {size}")]
    Overcommitted {
        keep_size: usize,
        regen_size: usize,
        size: usize,
    },
    #[error("Output scale must be non-zero")]
    InvalidScale,
    #[error("Color count must be between 1 and 256, got {0}")]
    InvalidColorCount(usize),
    #[error("Target image is {actual}x{actual}, expected {expected}x{expected}")]
    TargetSize { actual: usize, expected: usize },
}
