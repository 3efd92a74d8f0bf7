//! tile-engine: the move/merge core of a 2048-style sliding puzzle.
//!
//! This crate provides:
//! - A rectangular `Board` of optional power-of-two tiles
//! - The slide/merge kernel (`slide`) with merge-once-per-move semantics
//! - A seedable `Spawner` and an `Engine` session with sticky game-over
//!
//! Quick start:
//! ```
//! use tile_engine::{Direction, Engine, EngineError};
//!
//! // Deterministic spawns with a seeded engine
//! let mut engine = Engine::with_seed(4, 4, 42).unwrap();
//! engine.fill_random_tiles(Some(2)).unwrap();
//!
//! match engine.move_tiles(Direction::Left, true) {
//!     Ok(moves) => println!("{} tile(s) moved\n{}", moves.len(), engine.board()),
//!     Err(EngineError::GameEnded) => println!("game over"),
//!     Err(e) => panic!("{e}"),
//! }
//! ```
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;

pub use config::{EndRule, EngineConfig, SpawnConfig};
pub use engine::{
    can_slide, has_legal_move, slide, Board, Direction, Engine, MoveRecord, Pos, Spawner, Tile,
};
pub use error::EngineError;
