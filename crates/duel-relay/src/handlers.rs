//! HTTP API handlers.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use duel_core::{protocol::chain_digest, Address, BlockClock, DuelError, MoveKind, Submission};
use serde_json::json;
use tracing::{info, warn};

use crate::models::*;
use crate::state::AppState;

/// Header naming the account that paid for a relayed submission
pub const SUBMITTER_HEADER: &str = "X-Submitter";

/// Application error type
#[derive(Debug)]
pub enum AppError {
    Duel(DuelError),
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Duel(err) => match err {
                DuelError::SignatureInvalid => StatusCode::UNAUTHORIZED,
                DuelError::StaleOrReplayedMove { .. }
                | DuelError::NotYourTurn
                | DuelError::MoveNotAllowed
                | DuelError::TooLate
                | DuelError::NoGameYet
                | DuelError::SomebodyStillPlaying => StatusCode::CONFLICT,
                DuelError::RevealMismatch | DuelError::MalformedCommitment => StatusCode::BAD_REQUEST,
                DuelError::NotTheWinner => StatusCode::FORBIDDEN,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Duel(err) => json!({"error": err.to_string(), "kind": err.kind()}),
            AppError::BadRequest(msg) => json!({"error": msg, "kind": "bad_request"}),
        };
        (status, Json(body)).into_response()
    }
}

impl From<DuelError> for AppError {
    fn from(err: DuelError) -> Self {
        AppError::Duel(err)
    }
}

// ============ Moves ============

pub async fn submit_move(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, AppError> {
    let action = req
        .action
        .ok_or_else(|| AppError::BadRequest("missing action".to_string()))?;
    relay_move(&state, &headers, action, req).await
}

pub async fn challenge(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, AppError> {
    relay_move(&state, &headers, MoveKind::Challenge, req).await
}

pub async fn defend(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, AppError> {
    relay_move(&state, &headers, MoveKind::Defend, req).await
}

pub async fn reveal_challenge(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, AppError> {
    relay_move(&state, &headers, MoveKind::RevealChallenge, req).await
}

pub async fn reveal_defend(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, AppError> {
    relay_move(&state, &headers, MoveKind::RevealDefend, req).await
}

pub async fn claim_winning(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, AppError> {
    relay_move(&state, &headers, MoveKind::ClaimWinning, req).await
}

async fn relay_move(
    state: &AppState,
    headers: &HeaderMap,
    action: MoveKind,
    req: MoveRequest,
) -> Result<Json<MoveResponse>, AppError> {
    if let Some(named) = req.action.filter(|named| *named != action) {
        return Err(AppError::BadRequest(format!(
            "action {} does not match route {}",
            named, action
        )));
    }

    let signed = req.into_signed();
    let submitter = submitter_from_header(headers).unwrap_or(signed.actor);
    let submission = Submission::new(submitter, action, signed);

    let mut gateway = state.gateway().await;
    let receipt = gateway.relay(&submission)?;
    let last_state_hash = gateway.engine().last_state_hash();

    Ok(Json(MoveResponse::new(receipt, last_state_hash)))
}

/// Submitter is recorded for auditing only, so a bad header is not fatal
fn submitter_from_header(headers: &HeaderMap) -> Option<Address> {
    let raw = headers.get(SUBMITTER_HEADER)?.to_str().ok()?;
    match raw.parse() {
        Ok(address) => Some(address),
        Err(err) => {
            warn!("Ignoring {} header {:?}: {}", SUBMITTER_HEADER, raw, err);
            None
        }
    }
}

// ============ Queries ============

pub async fn get_game(State(state): State<AppState>) -> impl IntoResponse {
    let gateway = state.gateway().await;
    let engine = gateway.engine();
    Json(json!({
        "game": engine.game(),
        "rule": engine.rule_name(),
        "height": gateway.chain().height(),
    }))
}

pub async fn get_defender(State(state): State<AppState>) -> impl IntoResponse {
    let defender = state.gateway().await.engine().defender();
    Json(json!({"defender": defender}))
}

pub async fn get_challenger(State(state): State<AppState>) -> impl IntoResponse {
    let challenger = state.gateway().await.engine().challenger();
    Json(json!({"challenger": challenger}))
}

pub async fn get_last_state_hash(State(state): State<AppState>) -> impl IntoResponse {
    let last_state_hash = state.gateway().await.engine().last_state_hash();
    Json(json!({"last_state_hash": last_state_hash}))
}

pub async fn get_opponent(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let address: Address = address
        .parse()
        .map_err(|err| AppError::BadRequest(format!("invalid address: {}", err)))?;
    let opponent = state.gateway().await.engine().opponent(&address);
    Ok(Json(json!({"address": address, "opponent": opponent})))
}

pub async fn get_winner(State(state): State<AppState>) -> Json<WinnerResponse> {
    let gateway = state.gateway().await;
    let engine = gateway.engine();
    Json(WinnerResponse {
        winner: engine.who_wins(),
        timeout_winner: engine.timeout_winner(gateway.chain().height()),
    })
}

pub async fn get_events(State(state): State<AppState>) -> impl IntoResponse {
    let events = state.gateway().await.engine().events().to_vec();
    Json(json!({"events": events}))
}

pub async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let gateway = state.gateway().await;
    let history = gateway.engine().history().to_vec();
    Json(HistoryResponse {
        derived_hash: chain_digest(&history),
        history,
    })
}

// ============ Chain control ============

pub async fn mine(
    State(state): State<AppState>,
    Json(req): Json<MineRequest>,
) -> Json<HeightResponse> {
    let height = state.chain().mine(req.blocks);
    info!("Mined {} block(s), height now {}", req.blocks, height);
    Json(HeightResponse { height })
}

pub async fn chain_height(State(state): State<AppState>) -> Json<HeightResponse> {
    Json(HeightResponse {
        height: state.chain().height(),
    })
}

pub async fn health() -> &'static str {
    "ok"
}
