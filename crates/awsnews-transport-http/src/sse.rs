//! MCP over server-sent events.
//!
//! A client opens `GET /sse` and first receives an `endpoint` event whose
//! data is the URL to POST JSON-RPC messages to
//! (`/messages/?session_id=<id>`). Each POST is acknowledged with
//! `202 Accepted`; the reply, if any, arrives on the event stream as a
//! `message` event.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
};
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::router::{authorize, AppState};

/// Path clients POST their messages to.
pub const MESSAGES_PATH: &str = "/messages/";

/// Replies buffered per session before the sending task waits.
const SESSION_BUFFER: usize = 32;

/// Open SSE sessions, keyed by session id.
///
/// Each entry holds the sending half of the channel feeding that
/// session's event stream.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<String, mpsc::Sender<String>>>>,
}

impl SessionRegistry {
    /// Registers a new session and returns its guard and reply receiver.
    ///
    /// The session stays registered until the guard is dropped.
    pub fn open(&self) -> (SessionGuard, mpsc::Receiver<String>) {
        let id = Uuid::new_v4().simple().to_string();
        let (tx, rx) = mpsc::channel(SESSION_BUFFER);
        self.lock().insert(id.clone(), tx);
        let guard = SessionGuard {
            id,
            registry: self.clone(),
        };
        (guard, rx)
    }

    /// Sender for the session's event stream, if the session is open.
    pub fn sender(&self, id: &str) -> Option<mpsc::Sender<String>> {
        self.lock().get(id).cloned()
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn close(&self, id: &str) {
        self.lock().remove(id);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, mpsc::Sender<String>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps a session registered; unregisters it on drop.
pub struct SessionGuard {
    id: String,
    registry: SessionRegistry,
}

impl SessionGuard {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.registry.close(&self.id);
        debug!(session_id = %self.id, "SSE session closed");
    }
}

/// `GET /sse`: opens a session and streams its replies.
pub(crate) async fn handle_sse(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let (guard, rx) = state.sessions.open();
    info!(session_id = %guard.id(), "SSE session opened");

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("{MESSAGES_PATH}?session_id={}", guard.id()));

    // The guard rides along with the stream so the session ends with the connection.
    let replies = stream::unfold((rx, guard), |(mut rx, guard)| async move {
        let Some(json) = rx.recv().await else {
            return None;
        };
        let event = Event::default().event("message").data(json);
        Some((Ok::<_, Infallible>(event), (rx, guard)))
    });
    let events = stream::iter([Ok::<_, Infallible>(endpoint)]).chain(replies);

    Sse::new(events)
        .keep_alive(KeepAlive::default())
        .into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageQuery {
    session_id: Option<String>,
}

/// `POST /messages/?session_id=<id>`: accepts one JSON-RPC message for a session.
pub(crate) async fn handle_post_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MessageQuery>,
    body: String,
) -> Response {
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let Some(session_id) = query.session_id.filter(|id| !id.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "session_id is required").into_response();
    };
    let Some(tx) = state.sessions.sender(&session_id) else {
        warn!(%session_id, "message for unknown SSE session");
        return (StatusCode::NOT_FOUND, "Could not find session").into_response();
    };

    let handler = Arc::clone(&state.handler);
    tokio::spawn(async move {
        let Some(output) = handler.handle_message(&body).await else {
            return;
        };
        match output.to_json() {
            Ok(json) => {
                if tx.send(json).await.is_err() {
                    debug!(%session_id, "SSE session closed before the reply was sent");
                }
            }
            Err(e) => warn!(%session_id, error = %e, "failed to serialize reply"),
        }
    });

    (StatusCode::ACCEPTED, "Accepted").into_response()
}
