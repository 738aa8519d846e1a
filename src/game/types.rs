// src/game/types.rs
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::phase::{Phase, SetupFlags};
use crate::enums::PlayerId;

/// Canonical state sent to both players after every accepted mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: Board,
    pub turn: PlayerId,
    pub player_setup: SetupFlags,
    pub phase: Phase,
}
