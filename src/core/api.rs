//! HTTP + WebSocket API for Passcam
//!
//! Endpoints:
//! - POST /session/new - Create new capture session
//! - GET /session/{id} - Current capture output
//! - DELETE /session/{id} - End session
//! - POST /session/{id}/action - Dispatch one action
//! - POST /session/{id}/photo - Upload captured photo bytes
//! - GET /session/{id}/photo - Download the photo held for review
//! - WS /ws/{id} - Live outputs, inbound text frames are actions
//! - GET /health - Health check

use axum::{
    body::Bytes,
    extract::{Path, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, broadcast::error::RecvError, RwLock};
use tracing::{info, warn};

use crate::core::{CaptureConfig, CaptureStateMachine};
use crate::types::{Action, CaptureOutput, CapturedPhoto};
use crate::Result;

/// One camera session
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub machine: CaptureStateMachine,
    pub update_tx: broadcast::Sender<CaptureOutput>,
}

/// App state. Dispatch happens under the write lock, so each session has
/// at most one writer at a time.
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
    pub config: CaptureConfig,
    next_session: AtomicU64,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Create the API router
pub fn create_router(config: CaptureConfig) -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        config,
        next_session: AtomicU64::new(1),
    });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session).delete(delete_session))
        .route("/session/:id/action", post(post_action))
        .route("/session/:id/photo", post(upload_photo).get(download_photo))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session
async fn create_session(State(state): State<Arc<AppState>>) -> Json<NewSessionResponse> {
    let session_id = generate_session_id(&state);
    let (tx, _) = broadcast::channel(100);

    let session = Session {
        id: session_id.clone(),
        machine: CaptureStateMachine::with_config(state.config),
        update_tx: tx,
    };

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), session);
    info!(session = %session_id, "session created");

    Json(NewSessionResponse {
        websocket_url: format!("/ws/{}", session_id),
        session_id,
    })
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> std::result::Result<Json<CaptureOutput>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(session.machine.current_output()))
}

/// End session. Dropping it closes the broadcast channel, which ends any
/// WebSocket forwarding its outputs.
async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    let mut sessions = state.sessions.write().await;
    match sessions.remove(&id) {
        Some(session) => {
            info!(
                session = %session.id,
                dispatches = session.machine.dispatch_count(),
                ready_pct = session.machine.readiness().percentage(),
                "session ended"
            );
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

/// Dispatch one action
async fn post_action(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(action): Json<Action>,
) -> std::result::Result<Json<CaptureOutput>, StatusCode> {
    dispatch_to_session(&state, &id, action)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Store uploaded bytes as the captured photo
async fn upload_photo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> std::result::Result<Json<CaptureOutput>, StatusCode> {
    if body.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let photo = CapturedPhoto::new(body.to_vec());
    dispatch_to_session(&state, &id, Action::PhotoCaptured(photo))
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Return the photo held for review
async fn download_photo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> std::result::Result<impl IntoResponse, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let photo = session.machine.captured_photo().ok_or(StatusCode::NOT_FOUND)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::ETAG, format!("\"{}\"", photo.digest)),
        ],
        photo.bytes.clone(),
    ))
}

/// Dispatch under the write lock and broadcast the result.
/// `None` when the session does not exist.
async fn dispatch_to_session(state: &AppState, id: &str, action: Action) -> Option<CaptureOutput> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(id)?;

    let output = session.machine.dispatch(action);
    // No subscribers is fine
    let _ = session.update_tx.send(output.clone());
    Some(output)
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> std::result::Result<impl IntoResponse, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = session.update_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, state, id, rx).await;
    }))
}

/// Handle WebSocket connection: outputs out, actions in
async fn handle_websocket(
    socket: WebSocket,
    state: Arc<AppState>,
    id: String,
    mut rx: broadcast::Receiver<CaptureOutput>,
) {
    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(output) => {
                    let json = serde_json::to_string(&output).unwrap_or_default();
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "websocket client lagging, outputs dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            match message {
                Message::Text(text) => match serde_json::from_str::<Action>(&text) {
                    Ok(action) => {
                        if dispatch_to_session(&state, &id, action).await.is_none() {
                            break;
                        }
                    }
                    Err(e) => warn!(error = %e, "ignoring malformed websocket action"),
                },
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}

/// Generate session ID
fn generate_session_id(state: &AppState) -> String {
    let seq = state.next_session.fetch_add(1, Ordering::Relaxed);
    format!("session_{:x}_{}", chrono::Utc::now().timestamp_millis(), seq)
}

/// Run the API server
pub async fn run_server(addr: &str, config: CaptureConfig) -> Result<()> {
    let router = create_router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "passcam API listening");
    println!("📸 Passcam API running on {}", addr);
    println!("  POST /session/new         - Create session");
    println!("  GET  /session/:id         - Get status");
    println!("  DELETE /session/:id       - End session");
    println!("  POST /session/:id/action  - Dispatch action");
    println!("  POST /session/:id/photo   - Upload photo");
    println!("  GET  /session/:id/photo   - Download photo");
    println!("  WS   /ws/:id              - Live updates");
    println!("  GET  /health              - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
