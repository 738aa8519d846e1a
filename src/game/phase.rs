// src/game/phase.rs
use serde::{Deserialize, Serialize};

use crate::enums::{PlayerId, PLAYERS};
use crate::errors::{GameError, GameResult, MoveRejection, PlacementRejection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Phase {
    Setup,
    Play,
    GameOver { winner: PlayerId },
}

/// Per-player setup completion, on the wire as `{"A": bool, "B": bool}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupFlags {
    #[serde(rename = "A")]
    pub a: bool,
    #[serde(rename = "B")]
    pub b: bool,
}

impl SetupFlags {
    pub fn get(&self, player: PlayerId) -> bool {
        match player {
            PlayerId::A => self.a,
            PlayerId::B => self.b,
        }
    }

    fn set(&mut self, player: PlayerId) {
        match player {
            PlayerId::A => self.a = true,
            PlayerId::B => self.b = true,
        }
    }

    pub fn all(&self) -> bool {
        PLAYERS.iter().all(|&p| self.get(p))
    }
}

/// Setup -> Play -> GameOver. Nothing leaves GameOver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    phase: Phase,
    setup: SetupFlags,
    current_turn: PlayerId,
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Setup,
            setup: SetupFlags::default(),
            current_turn: PlayerId::FIRST,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn setup_flags(&self) -> SetupFlags {
        self.setup
    }

    pub fn current_turn(&self) -> PlayerId {
        self.current_turn
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Gate for placements.
    pub fn require_setup(&self, player: PlayerId) -> GameResult<()> {
        match self.phase {
            Phase::Setup => Ok(()),
            Phase::Play => Err(GameError::placement(player, PlacementRejection::NotSetupPhase)),
            Phase::GameOver { winner } => Err(GameError::GameOver { winner }),
        }
    }

    /// Gate for moves: play phase and the caller's turn.
    pub fn require_turn(&self, player: PlayerId) -> GameResult<()> {
        match self.phase {
            Phase::Setup => Err(GameError::invalid_move(player, MoveRejection::NotPlayPhase)),
            Phase::GameOver { winner } => Err(GameError::GameOver { winner }),
            Phase::Play if player != self.current_turn => {
                Err(GameError::not_player_turn(self.current_turn, player))
            }
            Phase::Play => Ok(()),
        }
    }

    /// Record that `player` finished setup. Returns true when this call moved
    /// the match into the play phase.
    pub fn mark_setup_complete(&mut self, player: PlayerId) -> bool {
        self.setup.set(player);
        if self.phase == Phase::Setup && self.setup.all() {
            self.phase = Phase::Play;
            self.current_turn = PlayerId::FIRST;
            log::info!("Setup complete, player {} opens play", self.current_turn);
            true
        } else {
            false
        }
    }

    pub fn advance_turn(&mut self) {
        if self.phase == Phase::Play {
            self.current_turn = self.current_turn.opponent();
        }
    }

    pub fn finish(&mut self, winner: PlayerId) {
        if self.phase == Phase::Play {
            self.phase = Phase::GameOver { winner };
        }
    }
}
