// Skirmish Server Library - Core Module Organization
//
// Authoritative engine and synchronization server for two-player 5x5 grid
// skirmish matches.

// Core game data structures and enums
pub mod config;
pub mod enums;
pub mod errors;
pub mod game;

// Bots used by the simulator
pub mod players;

// Server implementation
pub mod application;
pub mod connections;
pub mod server;
pub mod websocket;

// Re-export common types for convenient access
pub use crate::application::GameService;
pub use crate::config::{Rules, ServerConfig};
pub use crate::enums::{Direction, PlayerId};
pub use crate::errors::{GameError, GameResult, NetworkError, ServerError};
pub use crate::game::{GameManager, GameSnapshot, MoveCommand, MoveOutcome, Phase, Placement};
pub use crate::websocket::{WebSocketService, WsMessage};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
