use axum::http::Method;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::application::GameService;
use crate::config::ServerConfig;
use crate::errors::ServerResult;
use crate::game::GameSnapshot;
use crate::websocket::WebSocketService;

async fn health() -> &'static str {
    "Hello from the skirmish server!"
}

/// Current canonical state, same shape as an `update` message's `gameState`.
async fn get_state(State(service): State<WebSocketService>) -> Json<GameSnapshot> {
    Json(service.game_service().snapshot().await)
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<WebSocketService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move { service.handle_connection(socket).await })
}

pub fn router(game_service: Arc<GameService>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/", get(ws_handler))
        .route("/health", get(health))
        .route("/state", get(get_state))
        .with_state(WebSocketService::new(game_service))
        .layer(cors)
}

pub async fn serve(config: ServerConfig) -> ServerResult<()> {
    let addr = config.socket_addr()?;
    let rules = config.rules();
    if rules.allow_straight_moves {
        log::info!("Straight-axis moves enabled");
    }

    let app = router(Arc::new(GameService::new(rules)));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Starting skirmish server on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
