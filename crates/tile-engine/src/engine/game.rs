use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ops;
use super::spawn::Spawner;
use super::state::{Board, Direction, MoveRecord, Pos, Tile};
use crate::config::{EndRule, EngineConfig};
use crate::error::{EngineError, Result};

/// One game session: a board, its spawner and RNG, and the sticky
/// ended flag.
///
/// ```
/// use tile_engine::{Direction, Engine};
/// let mut engine = Engine::with_seed(4, 4, 42).unwrap();
/// engine.set_value(2, 0, Some(2)).unwrap();
/// engine.set_value(3, 0, Some(2)).unwrap();
/// let moves = engine.move_tiles(Direction::Left, false).unwrap();
/// assert_eq!(moves.len(), 2);
/// assert_eq!(engine.value(0, 0).unwrap(), Some(4));
/// ```
#[derive(Debug, Clone)]
pub struct Engine<R = StdRng> {
    board: Board,
    spawner: Spawner,
    end_rule: EndRule,
    rng: R,
    ended: bool,
}

impl Engine<StdRng> {
    /// Empty `width` x `height` board with an entropy-seeded RNG.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Empty board whose spawns are reproducible from `seed`.
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Self> {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(width: usize, height: usize, rng: R) -> Result<Self> {
        let config = EngineConfig {
            width,
            height,
            ..EngineConfig::default()
        };
        Self::from_config(&config, rng)
    }

    pub fn from_config(config: &EngineConfig, rng: R) -> Result<Self> {
        Ok(Engine {
            board: Board::new(config.width, config.height)?,
            spawner: Spawner::new(config.spawn),
            end_rule: config.end_rule,
            rng,
            ended: false,
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.board.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.board.height()
    }

    #[inline]
    pub fn end_rule(&self) -> EndRule {
        self.end_rule
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn value(&self, x: usize, y: usize) -> Result<Option<u32>> {
        self.board.value(x, y)
    }

    pub fn set_value(&mut self, x: usize, y: usize, value: Option<u32>) -> Result<&mut Self> {
        self.board.set_value(x, y, value)?;
        Ok(self)
    }

    pub fn empty_cells(&self) -> Vec<Pos> {
        self.board.empty_cells()
    }

    pub fn occupied_cells(&self) -> Vec<Tile> {
        self.board.occupied_cells()
    }

    /// True if any direction would still displace a tile.
    pub fn has_legal_move(&self) -> bool {
        ops::has_legal_move(&self.board)
    }

    /// Spawn tiles into empty cells; see [`Spawner::fill`].
    pub fn fill_random_tiles(&mut self, count: Option<usize>) -> Result<Vec<Tile>> {
        self.spawner.fill(&mut self.board, &mut self.rng, count)
    }

    /// Apply one move action.
    ///
    /// Fails with [`EngineError::GameEnded`] without touching the board once
    /// the game is over. When `auto_spawn` is set and at least one tile moved,
    /// new tiles are spawned afterwards; a spawn that finds no empty cell
    /// ends the game and the call fails with `GameEnded`.
    pub fn move_tiles(&mut self, direction: Direction, auto_spawn: bool) -> Result<Vec<MoveRecord>> {
        if self.ended {
            return Err(EngineError::GameEnded);
        }

        let moves = ops::slide(&mut self.board, direction);
        if moves.is_empty() {
            if self.end_rule == EndRule::Exhaustive && !self.has_legal_move() {
                return Err(self.end());
            }
            return Ok(moves);
        }
        debug!("move {direction}: {} record(s)", moves.len());
        self.finish_move(moves, auto_spawn)
    }

    /// Like [`Engine::move_tiles`] but takes a direction name. Names that are
    /// not a direction are a no-op and yield `Ok(None)`.
    pub fn move_named(&mut self, name: &str, auto_spawn: bool) -> Result<Option<Vec<MoveRecord>>> {
        match name.parse::<Direction>() {
            Ok(direction) => self.move_tiles(direction, auto_spawn).map(Some),
            Err(_) => {
                debug!("ignoring unknown direction {name:?}");
                Ok(None)
            }
        }
    }

    fn finish_move(&mut self, moves: Vec<MoveRecord>, auto_spawn: bool) -> Result<Vec<MoveRecord>> {
        if auto_spawn {
            match self.fill_random_tiles(None) {
                Ok(_) => {}
                Err(EngineError::NoSpace) => return Err(self.end()),
                Err(e) => return Err(e),
            }
        }
        if self.end_rule == EndRule::Exhaustive && !self.has_legal_move() {
            self.end();
        }
        Ok(moves)
    }

    fn end(&mut self) -> EngineError {
        if !self.ended {
            info!(
                "game ended on {}x{} board, highest tile {:?}",
                self.width(),
                self.height(),
                self.board.highest_tile()
            );
        }
        self.ended = true;
        EngineError::GameEnded
    }
}
