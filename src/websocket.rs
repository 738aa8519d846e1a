use axum::extract::ws::{Message, WebSocket};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::GameService;
use crate::connections::{ChannelConnection, Connection};
use crate::enums::PlayerId;
use crate::errors::{NetworkError, NetworkResult};
use crate::game::{GameSnapshot, Placement};

/// Every message of the game protocol, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    // client -> server
    Setup {
        player: PlayerId,
        character: Placement,
    },

    PlayerSetupComplete {
        player: PlayerId,
    },

    Move {
        player: PlayerId,
        command: String,
    },

    // server -> client(s)
    Update {
        #[serde(rename = "gameState")]
        game_state: GameSnapshot,
    },

    InvalidMove,

    GameOver {
        winner: PlayerId,
    },
}

impl WsMessage {
    pub fn decode(text: &str) -> NetworkResult<Self> {
        serde_json::from_str(text).map_err(|e| NetworkError::deserialization_failed(e.to_string()))
    }
}

/// WebSocket service that handles real-time communication
/// This is purely an infrastructure concern - no business logic here
#[derive(Clone)]
pub struct WebSocketService {
    game_service: Arc<GameService>,
}

impl WebSocketService {
    pub fn new(game_service: Arc<GameService>) -> Self {
        Self { game_service }
    }

    pub fn game_service(&self) -> &Arc<GameService> {
        &self.game_service
    }

    /// Handle a new WebSocket connection
    pub async fn handle_connection(&self, socket: WebSocket) {
        let connection_id = format!("conn_{}", uuid::Uuid::new_v4());
        log::info!("🔌 WebSocket connected: {}", connection_id);

        // Split socket for concurrent read/write
        let (mut sender, mut receiver) = socket.split();
        let (tx, mut outbound) = mpsc::unbounded_channel::<String>();
        let connection: Arc<dyn Connection> =
            Arc::new(ChannelConnection::new(connection_id.clone(), tx));

        // Task to forward queued messages to this client
        let connection_id_for_updates = connection_id.clone();
        let mut update_task = tokio::spawn(async move {
            while let Some(text) = outbound.recv().await {
                if let Err(e) = sender.send(Message::Text(text.into())).await {
                    log::error!(
                        "Failed to send message to connection {}: {:?}",
                        connection_id_for_updates,
                        e
                    );
                    break; // Client disconnected
                }
            }
        });

        // Task to handle incoming messages
        let game_service = self.game_service.clone();
        let connection_id_for_messages = connection_id.clone();
        let mut message_task = tokio::spawn(async move {
            while let Some(Ok(message)) = receiver.next().await {
                match message {
                    Message::Text(text) => {
                        log::debug!(
                            "🔍 Connection {} received: {}",
                            connection_id_for_messages,
                            text.as_str()
                        );
                        match WsMessage::decode(text.as_str()) {
                            Ok(ws_message) => {
                                game_service
                                    .handle_message(connection.clone(), ws_message)
                                    .await;
                            }
                            Err(e) => {
                                log::warn!(
                                    "Dropping malformed message from connection {}: {}",
                                    connection_id_for_messages,
                                    e
                                );
                            }
                        }
                    }
                    Message::Close(_) => {
                        log::info!("WebSocket connection {} closed", connection_id_for_messages);
                        break;
                    }
                    _ => {
                        // Ignore other message types
                    }
                }
            }
        });

        // Wait for either task to complete (client disconnect or error)
        tokio::select! {
            _ = &mut update_task => {
                message_task.abort();
            }
            _ = &mut message_task => {
                update_task.abort();
            }
        }

        log::info!("WebSocket connection {} terminated", connection_id);
    }
}
