//! Duel Relay Service
//!
//! Accepts signed duel moves over HTTP and submits them to the duel engine on
//! behalf of their signers. Whoever posts a move only pays for it; the signer
//! remains the actor.

mod config;
mod handlers;
mod models;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::RelayConfig;
use handlers::*;
use state::AppState;

fn create_router(state: AppState) -> Router {
    Router::new()
        // Moves
        .route("/duel/move", post(submit_move))
        .route("/duel/challenge", post(challenge))
        .route("/duel/defend", post(defend))
        .route("/duel/reveal-challenge", post(reveal_challenge))
        .route("/duel/reveal-defend", post(reveal_defend))
        .route("/duel/claim-winning", post(claim_winning))
        // Queries
        .route("/duel/game", get(get_game))
        .route("/duel/defender", get(get_defender))
        .route("/duel/challenger", get(get_challenger))
        .route("/duel/last-state-hash", get(get_last_state_hash))
        .route("/duel/opponent/:address", get(get_opponent))
        .route("/duel/winner", get(get_winner))
        .route("/duel/events", get(get_events))
        .route("/duel/history", get(get_history))
        // Chain
        .route("/chain/mine", post(mine))
        .route("/chain/height", get(chain_height))
        // Health
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RelayConfig::from_env();
    tracing::info!(
        "Window {} blocks per move, winner rule {}",
        config.engine.max_blocks_per_move,
        config.engine.rule
    );

    let app = create_router(AppState::new(config.engine));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Duel relay starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
