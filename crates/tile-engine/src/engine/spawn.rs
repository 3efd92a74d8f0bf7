use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::state::{Board, Tile};
use crate::config::SpawnConfig;
use crate::error::{EngineError, Result};

/// Places new tiles into empty cells using an injected RNG.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawner {
    config: SpawnConfig,
}

impl Default for Spawner {
    fn default() -> Self {
        Spawner::new(SpawnConfig::default())
    }
}

impl Spawner {
    pub fn new(config: SpawnConfig) -> Self {
        Spawner { config }
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// Fill up to `count` distinct empty cells, chosen uniformly at random.
    ///
    /// With `count == None` the amount is drawn from the configured
    /// distribution (one tile, or two with `two_tiles_probability`). Each new
    /// tile is a 4 with `four_probability`, otherwise a 2. Requests larger
    /// than the number of empty cells fill every empty cell.
    ///
    /// Fails with [`EngineError::NoSpace`] when the board has no empty cell.
    ///
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use tile_engine::{Board, Spawner};
    /// let mut board = Board::new(4, 4).unwrap();
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let placed = Spawner::default().fill(&mut board, &mut rng, Some(5)).unwrap();
    /// assert_eq!(placed.len(), 5);
    /// assert_eq!(board.empty_cells().len(), 11);
    /// ```
    pub fn fill<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        rng: &mut R,
        count: Option<usize>,
    ) -> Result<Vec<Tile>> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return Err(EngineError::NoSpace);
        }

        let wanted = count.unwrap_or_else(|| self.draw_count(rng));
        let amount = wanted.min(empty.len());
        let chosen: Vec<_> = empty.choose_multiple(rng, amount).copied().collect();

        let mut placed = Vec::with_capacity(amount);
        for pos in chosen {
            let value = self.draw_value(rng);
            let idx = board.index(pos);
            board.cells[idx] = Some(value);
            placed.push(Tile { pos, value });
        }
        debug!(
            "spawned {} tile(s) ({} requested, {} empty before)",
            placed.len(),
            wanted,
            empty.len()
        );
        Ok(placed)
    }

    fn draw_count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        if rng.gen_bool(self.config.two_tiles_probability_or_default()) { 2 } else { 1 }
    }

    fn draw_value<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if rng.gen_bool(self.config.four_probability_or_default()) { 4 } else { 2 }
    }
}
