//! Serde-facing engine settings. Every field has a default so partial
//! tables (e.g. a `[spawn]` section with a single key) deserialize.

use serde::{Deserialize, Serialize};

use crate::engine::Board;

/// Tile spawning odds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Probability that a spawned tile is a 4 instead of a 2.
    #[serde(default = "defaults::four_probability")]
    pub four_probability: f64,
    /// Probability that a default-sized spawn places two tiles instead of one.
    #[serde(default = "defaults::two_tiles_probability")]
    pub two_tiles_probability: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            four_probability: defaults::four_probability(),
            two_tiles_probability: defaults::two_tiles_probability(),
        }
    }
}

impl SpawnConfig {
    /// Resolve the 4-tile probability, falling back to 0.1 when out of [0,1].
    pub fn four_probability_or_default(&self) -> f64 {
        match self.four_probability {
            p if (0.0..=1.0).contains(&p) => p,
            _ => defaults::four_probability(),
        }
    }

    /// Resolve the two-tile probability, falling back to 0.4 when out of [0,1].
    pub fn two_tiles_probability_or_default(&self) -> f64 {
        match self.two_tiles_probability {
            p if (0.0..=1.0).contains(&p) => p,
            _ => defaults::two_tiles_probability(),
        }
    }
}

/// When the engine decides that play is over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndRule {
    /// Only a failed post-move spawn ends the game.
    #[default]
    SpawnFailure,
    /// Also end as soon as no direction can displace a tile.
    Exhaustive,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "defaults::size")]
    pub width: usize,
    #[serde(default = "defaults::size")]
    pub height: usize,
    #[serde(default)]
    pub end_rule: EndRule,
    #[serde(default)]
    pub spawn: SpawnConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: defaults::size(),
            height: defaults::size(),
            end_rule: EndRule::default(),
            spawn: SpawnConfig::default(),
        }
    }
}

mod defaults {
    pub fn size() -> usize { super::Board::DEFAULT_SIZE }
    pub fn four_probability() -> f64 { 0.1 }
    pub fn two_tiles_probability() -> f64 { 0.4 }
}
