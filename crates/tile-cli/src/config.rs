use std::io::Read;

use serde::Deserialize;
use tile_engine::{EndRule, EngineConfig, SpawnConfig};

/// Shell settings loaded from TOML. Every key is optional.
///
/// ```toml
/// width = 5
/// height = 5
/// seed = 42
/// end_rule = "exhaustive"
///
/// [spawn]
/// four_probability = 0.1
/// two_tiles_probability = 0.4
///
/// [display]
/// padding = 4
/// clear_screen = true
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::size")]
    pub width: usize,
    #[serde(default = "defaults::size")]
    pub height: usize,
    /// Fixed RNG seed; omitted means a fresh entropy seed per game.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "defaults::end_rule")]
    pub end_rule: EndRule,
    #[serde(default)]
    pub spawn: SpawnConfig,
    #[serde(default)]
    pub display: Display,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Display {
    /// Width each tile value is right-aligned to.
    #[serde(default = "defaults::padding")]
    pub padding: usize,
    /// Emit an ANSI clear-screen before every redraw.
    #[serde(default = "defaults::clear_screen")]
    pub clear_screen: bool,
}

impl Default for Display {
    fn default() -> Self {
        Self { padding: defaults::padding(), clear_screen: defaults::clear_screen() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: defaults::size(),
            height: defaults::size(),
            seed: None,
            end_rule: defaults::end_rule(),
            spawn: SpawnConfig::default(),
            display: Display::default(),
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let cfg: Self = toml::from_str(&contents)?;
        Ok(cfg)
    }

    /// Engine-facing slice of the settings.
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            width: self.width,
            height: self.height,
            end_rule: self.end_rule,
            spawn: self.spawn,
        }
    }
}

mod defaults {
    use tile_engine::{Board, EndRule};

    pub fn size() -> usize { Board::DEFAULT_SIZE }
    // The interactive shell needs the game to actually end.
    pub fn end_rule() -> EndRule { EndRule::Exhaustive }
    pub fn padding() -> usize { 4 }
    pub fn clear_screen() -> bool { true }
}
