use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::Rules;
use crate::connections::{Connection, ConnectionRegistry};
use crate::enums::PlayerId;
use crate::errors::{GameError, NetworkResult};
use crate::game::{GameManager, GameSnapshot, MoveOutcome, Placement, PlacementOutcome};
use crate::websocket::WsMessage;

/// The match and its connection map behind one lock.
struct MatchState {
    game: GameManager,
    registry: ConnectionRegistry,
}

/// Core application service: owns the one match and serializes every
/// mutation of it. Connection tasks hand it decoded messages.
pub struct GameService {
    state: Mutex<MatchState>,
}

impl GameService {
    pub fn new(rules: Rules) -> Self {
        Self {
            state: Mutex::new(MatchState {
                game: GameManager::new(rules),
                registry: ConnectionRegistry::new(),
            }),
        }
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.state.lock().await.game.snapshot()
    }

    /// Route one inbound message. Rejections go back to `origin` only;
    /// accepted mutations are broadcast to both seats.
    pub async fn handle_message(&self, origin: Arc<dyn Connection>, message: WsMessage) {
        let mut state = self.state.lock().await;
        let MatchState { game, registry } = &mut *state;

        let result = match message {
            WsMessage::Setup { player, character } => {
                registry.bind(player, &origin);
                Self::handle_setup(game, registry, origin.as_ref(), player, &character)
            }
            WsMessage::PlayerSetupComplete { player } => {
                let outcome = game.complete_setup(player);
                Self::publish_setup(game, registry, origin.as_ref(), player, outcome)
            }
            WsMessage::Move { player, command } => {
                Self::handle_move(game, registry, origin.as_ref(), player, &command)
            }
            WsMessage::Update { .. } | WsMessage::InvalidMove | WsMessage::GameOver { .. } => {
                log::warn!(
                    "Connection {} sent a server-only message, ignoring",
                    origin.id()
                );
                Ok(())
            }
        };

        if let Err(e) = result {
            log::error!("❌ Failed to deliver reply for connection {}: {}", origin.id(), e);
        }
    }

    fn handle_setup(
        game: &mut GameManager,
        registry: &ConnectionRegistry,
        origin: &dyn Connection,
        player: PlayerId,
        placement: &Placement,
    ) -> NetworkResult<()> {
        let outcome = game.place_unit(player, placement);
        Self::publish_setup(game, registry, origin, player, outcome)
    }

    fn publish_setup(
        game: &GameManager,
        registry: &ConnectionRegistry,
        origin: &dyn Connection,
        player: PlayerId,
        outcome: Result<PlacementOutcome, GameError>,
    ) -> NetworkResult<()> {
        match outcome {
            Ok(outcome) => {
                if outcome.play_started {
                    log::info!("🎮 Both players ready, play begins");
                } else if outcome.setup_complete {
                    log::info!("Player {} finished setup", player);
                }
                Self::broadcast_state(game, registry)
            }
            Err(e) => Self::reject(registry, origin, e),
        }
    }

    fn handle_move(
        game: &mut GameManager,
        registry: &ConnectionRegistry,
        origin: &dyn Connection,
        player: PlayerId,
        command: &str,
    ) -> NetworkResult<()> {
        match game.process_move(player, command) {
            Ok(MoveOutcome::Updated { next_turn }) => {
                log::info!("Player {} played {}, player {} to move", player, command, next_turn);
                Self::broadcast_state(game, registry)
            }
            Ok(MoveOutcome::GameOver { winner }) => {
                Self::broadcast_state(game, registry)?;
                registry.broadcast(&WsMessage::GameOver { winner })?;
                Ok(())
            }
            Err(e) => Self::reject(registry, origin, e),
        }
    }

    fn broadcast_state(game: &GameManager, registry: &ConnectionRegistry) -> NetworkResult<()> {
        let delivered = registry.broadcast(&WsMessage::Update {
            game_state: game.snapshot(),
        })?;
        log::debug!("State update delivered to {} connection(s)", delivered);
        Ok(())
    }

    fn reject(
        registry: &ConnectionRegistry,
        origin: &dyn Connection,
        error: GameError,
    ) -> NetworkResult<()> {
        log::warn!("Rejected request from connection {}: {}", origin.id(), error);
        registry.unicast(origin, &WsMessage::InvalidMove)
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}
