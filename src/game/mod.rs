// src/game/mod.rs
mod board;
pub mod manager;
mod movement;
mod phase;
mod placement;
mod types;

pub use board::*;
pub use manager::*;
pub use movement::{is_hero, legal_moves, resolve_move, MoveCommand, MoveOutcome};
pub use phase::*;
pub use placement::*;
pub use types::*;
