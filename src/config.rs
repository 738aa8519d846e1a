use clap::Parser;
use std::net::SocketAddr;

use crate::errors::{ServerError, ServerResult};

pub const BOARD_SIZE: usize = 5;
pub const UNITS_PER_PLAYER: usize = 5;

/// Unit name prefixes that get path capture while moving.
pub const HERO_PREFIXES: [&str; 2] = ["H1", "H2"];

/// Rule switches for the engine. `Rules::default()` is the reference ruleset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rules {
    /// Honor `L`/`R`/`F`/`B`. Off by default: only diagonal tokens resolve.
    pub allow_straight_moves: bool,
}

/// Command line configuration for the game server.
#[derive(Debug, Clone, Parser)]
#[command(name = "skirmish", version, about = "Authoritative server for 5x5 grid skirmish matches")]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "SKIRMISH_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "SKIRMISH_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Let straight-axis tokens (L, R, F, B) resolve as moves
    #[arg(long)]
    pub allow_straight_moves: bool,
}

impl ServerConfig {
    pub fn rules(&self) -> Rules {
        Rules {
            allow_straight_moves: self.allow_straight_moves,
        }
    }

    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ServerError::Configuration {
                details: format!("invalid listen address {}:{}: {e}", self.host, self.port),
            })
    }
}
