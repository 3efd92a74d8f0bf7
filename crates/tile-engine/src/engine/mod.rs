//! Engine module: rectangular board, slide/merge ops, tile spawning and the
//! game session that ties them together. Public API stays small.
//!
//! - `Board` is the flat row-major grid with checked accessors.
//! - `ops` holds the slide/merge kernel and legal-move checks.
//! - `Spawner` places new tiles with an injected RNG.
//! - `Engine` owns one board and latches the ended state.

mod game;
mod ops;
mod spawn;
pub mod state;

pub use game::Engine;
pub use ops::{can_slide, has_legal_move, slide};
pub use spawn::Spawner;
pub use state::{Board, Direction, MoveRecord, Pos, Tile};
