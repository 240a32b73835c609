//! # Generation Module
//!
//! Procedural cave generation for 2D and 3D tile grids.
//!
//! The pipeline fills a grid with seeded noise, smooths it with a cellular
//! automaton, prunes small wall and room regions, and finally connects the
//! surviving rooms with carved passages so every open tile is reachable from
//! every other. Each stage lives in its own module and can be used alone.

pub mod cave;
pub mod fill;
pub mod passages;
pub mod regions;
pub mod rooms;
pub mod smoothing;

pub use cave::*;
pub use fill::*;
pub use passages::*;
pub use regions::*;
pub use rooms::*;
pub use smoothing::*;

use crate::config::MAX_GRID_EXTENT;
use crate::grid::Coord;
use crate::{GrottoError, GrottoResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for cave generation.
///
/// Every field takes part in the output: two identical configurations always
/// generate identical caves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Grid depth in tiles (ignored by 2D generation)
    pub depth: u32,
    /// Number of cellular smoothing passes
    pub smooths: u32,
    /// Probability that an interior tile starts as wall (0.45 to 0.55 gives caves)
    pub fill: f64,
    /// Seed text, hashed to the RNG seed
    pub seed: String,
    /// Wall regions smaller than this are opened up
    pub wall_threshold: usize,
    /// Room regions smaller than this are filled in
    pub room_threshold: usize,
    /// Radius of carved passages
    pub passage_width: u32,
    /// Width of the solid frame around the grid
    pub border_width: u32,
}

impl CaveConfig {
    /// Creates the default 2D configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use grotto::CaveConfig;
    ///
    /// let config = CaveConfig::new("granite");
    /// assert_eq!(config.width, 64);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            width: 64,
            height: 64,
            depth: 1,
            smooths: 4,
            fill: 0.5,
            seed: seed.into(),
            wall_threshold: 5,
            room_threshold: 5,
            passage_width: 2,
            border_width: 2,
        }
    }

    /// Creates the default 3D configuration with the given seed.
    pub fn new_3d(seed: impl Into<String>) -> Self {
        Self {
            width: 32,
            height: 32,
            depth: 32,
            smooths: 2,
            fill: 0.5,
            seed: seed.into(),
            wall_threshold: 5,
            room_threshold: 5,
            passage_width: 2,
            border_width: 0,
        }
    }

    /// Creates a configuration for testing with smaller, faster maps.
    pub fn for_testing(seed: impl Into<String>) -> Self {
        Self {
            width: 32,
            height: 24,
            depth: 1,
            smooths: 3,
            fill: 0.48,
            seed: seed.into(),
            wall_threshold: 4,
            room_threshold: 6,
            passage_width: 1,
            border_width: 1,
        }
    }

    /// Sets the grid dimensions.
    pub fn with_size(mut self, width: u32, height: u32, depth: u32) -> Self {
        self.width = width;
        self.height = height;
        self.depth = depth;
        self
    }

    /// Grid extent as a coordinate of the requested dimensionality.
    pub fn size<C: Coord>(&self) -> C {
        C::from_components([
            self.width as i32,
            self.height as i32,
            self.depth.max(1) as i32,
        ])
    }

    /// The integer seed derived from the seed text.
    pub fn seed_value(&self) -> u64 {
        utils::hash_seed(&self.seed)
    }

    /// Checks that the configuration describes a grid that can be built.
    ///
    /// Degenerate but buildable settings (huge thresholds, a border wider than
    /// half the grid) are accepted; they simply produce uninteresting caves.
    pub fn validate(&self) -> GrottoResult<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if value == 0 || value > MAX_GRID_EXTENT {
                return Err(GrottoError::InvalidConfig(format!(
                    "{} must be between 1 and {}, got {}",
                    name, MAX_GRID_EXTENT, value
                )));
            }
        }

        if !self.fill.is_finite() || !(0.0..=1.0).contains(&self.fill) {
            return Err(GrottoError::InvalidConfig(format!(
                "fill must be within [0, 1], got {}",
                self.fill
            )));
        }

        if self.passage_width > MAX_GRID_EXTENT {
            return Err(GrottoError::InvalidConfig(format!(
                "passage_width must be at most {}, got {}",
                MAX_GRID_EXTENT, self.passage_width
            )));
        }

        if !(0.45..=0.55).contains(&self.fill) {
            log::debug!(
                "fill {} is outside the recommended 0.45..=0.55 range",
                self.fill
            );
        }

        Ok(())
    }

    /// Parses a configuration from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> GrottoResult<Self> {
        let config: CaveConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> GrottoResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes the configuration to pretty JSON.
    pub fn to_json(&self) -> GrottoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// Trait for procedural generators.
///
/// Generators are pure: the output depends only on the configuration and the
/// state of the random number generator handed in.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &CaveConfig, rng: &mut StdRng) -> GrottoResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &CaveConfig) -> GrottoResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    /// Hashes seed text to an integer seed.
    ///
    /// Uses 64-bit FNV-1a so the value is stable across platforms, builds and
    /// runs, unlike `std`'s randomly keyed hasher.
    ///
    /// # Examples
    ///
    /// ```
    /// use grotto::generation::utils::hash_seed;
    ///
    /// assert_eq!(hash_seed("cave"), hash_seed("cave"));
    /// assert_ne!(hash_seed("cave"), hash_seed("cavern"));
    /// ```
    pub fn hash_seed(seed: &str) -> u64 {
        seed.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        })
    }

    /// Border width as a signed tile distance.
    ///
    /// Widths beyond `i32::MAX` saturate instead of wrapping, so any frame at
    /// least half the grid wide still walls off every tile.
    pub fn frame_width(border: u32) -> i32 {
        i32::try_from(border).unwrap_or(i32::MAX)
    }

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &CaveConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed_value())
    }
}
