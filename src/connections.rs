use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::enums::PlayerId;
use crate::errors::{NetworkError, NetworkResult};
use crate::websocket::WsMessage;

/// Outbound half of a client connection as seen by the game core.
pub trait Connection: Send + Sync {
    fn id(&self) -> &str;

    fn is_open(&self) -> bool;

    fn send_text(&self, text: String) -> NetworkResult<()>;
}

/// Connection backed by a channel that a socket writer task drains.
#[derive(Clone)]
pub struct ChannelConnection {
    id: String,
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelConnection {
    pub fn new(id: impl Into<String>, tx: mpsc::UnboundedSender<String>) -> Self {
        Self { id: id.into(), tx }
    }

    /// New connection plus the receiver its writer should drain.
    pub fn pair(id: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(id, tx), rx)
    }
}

impl fmt::Debug for ChannelConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelConnection")
            .field("id", &self.id)
            .field("open", &self.is_open())
            .finish()
    }
}

impl Connection for ChannelConnection {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    fn send_text(&self, text: String) -> NetworkResult<()> {
        self.tx.send(text).map_err(|_| NetworkError::ConnectionClosed {
            connection_id: self.id.clone(),
        })
    }
}

pub fn encode(message: &WsMessage) -> NetworkResult<String> {
    serde_json::to_string(message).map_err(|e| NetworkError::serialization_failed(e.to_string()))
}

/// Player seat -> connection. A seat is bound once and never rebound.
#[derive(Default)]
pub struct ConnectionRegistry {
    slots: HashMap<PlayerId, Arc<dyn Connection>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `player` to `connection` unless the seat is already taken.
    /// Returns true when the seat is (now) held by this connection.
    pub fn bind(&mut self, player: PlayerId, connection: &Arc<dyn Connection>) -> bool {
        match self.slots.get(&player) {
            Some(existing) if existing.id() == connection.id() => true,
            Some(existing) => {
                log::warn!(
                    "Player {} is bound to {}, ignoring rebind from {}",
                    player,
                    existing.id(),
                    connection.id()
                );
                false
            }
            None => {
                log::info!("🔗 Player {} bound to connection {}", player, connection.id());
                self.slots.insert(player, Arc::clone(connection));
                true
            }
        }
    }

    pub fn connection(&self, player: PlayerId) -> Option<&Arc<dyn Connection>> {
        self.slots.get(&player)
    }

    /// Send to every bound, open connection. Returns how many received it.
    pub fn broadcast(&self, message: &WsMessage) -> NetworkResult<usize> {
        let text = encode(message)?;
        let mut delivered = 0;
        for (player, connection) in &self.slots {
            if !connection.is_open() {
                continue;
            }
            match connection.send_text(text.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => log::error!("Failed to deliver to player {}: {}", player, e),
            }
        }
        Ok(delivered)
    }

    /// Reply to a single connection, bound or not.
    pub fn unicast(&self, connection: &dyn Connection, message: &WsMessage) -> NetworkResult<()> {
        connection.send_text(encode(message)?)
    }
}
