use thiserror::Error;

use crate::enums::{Direction, PlayerId};

/// Top-level error type for the server process
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {details}")]
    Configuration { details: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rule rejections raised by the engine. None of these are fatal: the
/// boundary layer turns every one into a private rejection notice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid placement for player {player}: {reason}")]
    InvalidPlacement {
        player: PlayerId,
        reason: PlacementRejection,
    },

    #[error("Invalid move for player {player}: {reason}")]
    InvalidMove {
        player: PlayerId,
        reason: MoveRejection,
    },

    #[error("Not player's turn: current={current_player}, attempted={attempted_player}")]
    NotPlayerTurn {
        current_player: PlayerId,
        attempted_player: PlayerId,
    },

    #[error("Game is over, player {winner} won")]
    GameOver { winner: PlayerId },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementRejection {
    #[error("setup phase has ended")]
    NotSetupPhase,

    #[error("all units already placed")]
    QuotaExhausted,

    #[error("row {row} is not the home row {home_row}")]
    WrongRow { row: usize, home_row: usize },

    #[error("column {col} is off the board")]
    OutOfBounds { col: usize },

    #[error("cell ({row}, {col}) is occupied")]
    Occupied { row: usize, col: usize },

    #[error("only {placed} of the required units placed")]
    SetupIncomplete { placed: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("play phase has not started")]
    NotPlayPhase,

    #[error("malformed command '{command}'")]
    MalformedCommand { command: String },

    #[error("unknown direction '{token}'")]
    UnknownDirection { token: String },

    #[error("no unit named '{unit}'")]
    UnknownUnit { unit: String },

    #[error("direction {direction} is not a diagonal")]
    StraightDirection { direction: Direction },

    #[error("destination is off the board")]
    OutOfBounds,

    #[error("destination ({row}, {col}) holds an own unit")]
    OwnUnitAtDestination { row: usize, col: usize },

    #[error("path blocked by own unit at ({row}, {col})")]
    PathBlocked { row: usize, col: usize },
}

/// Network/WebSocket errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Message serialization failed: {details}")]
    SerializationFailed { details: String },

    #[error("Message deserialization failed: {details}")]
    DeserializationFailed { details: String },

    #[error("Connection closed: {connection_id}")]
    ConnectionClosed { connection_id: String },
}

/// Result type aliases for convenience
pub type GameResult<T> = Result<T, GameError>;
pub type NetworkResult<T> = Result<T, NetworkError>;
pub type ServerResult<T> = Result<T, ServerError>;

/// Helper methods for creating common errors
impl GameError {
    pub fn placement(player: PlayerId, reason: PlacementRejection) -> Self {
        Self::InvalidPlacement { player, reason }
    }

    pub fn invalid_move(player: PlayerId, reason: MoveRejection) -> Self {
        Self::InvalidMove { player, reason }
    }

    pub fn not_player_turn(current: PlayerId, attempted: PlayerId) -> Self {
        Self::NotPlayerTurn {
            current_player: current,
            attempted_player: attempted,
        }
    }
}

impl NetworkError {
    pub fn serialization_failed(details: impl Into<String>) -> Self {
        Self::SerializationFailed {
            details: details.into(),
        }
    }

    pub fn deserialization_failed(details: impl Into<String>) -> Self {
        Self::DeserializationFailed {
            details: details.into(),
        }
    }
}
