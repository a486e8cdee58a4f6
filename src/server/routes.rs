/// HTTP handlers
///
/// Request bodies are read leniently: a missing or malformed body counts
/// as an empty question rather than a 4xx, so the page always gets an
/// `answer` to show.

use crate::core::Reply;
use crate::kb::HotspotMarker;
use crate::server::page::INDEX_HTML;
use crate::server::state::SharedState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;
use tracing::{debug, info, warn};

const EMPTY_QUESTION: &str = "Please ask a question.";
const EMPTY_SUPPORT: &str = "I'm here whenever you want to talk.";

/// Body of `/ask`, `/chat` and `/support`; `q` and `message` are interchangeable
#[derive(Debug, Default, Deserialize)]
pub struct AskRequest {
    #[serde(default, alias = "message")]
    pub q: String,
}

impl AskRequest {
    fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }
        serde_json::from_slice(body).unwrap_or_else(|e| {
            debug!(error = %e, "unreadable request body, treating as empty");
            Self::default()
        })
    }
}

#[derive(Serialize)]
struct AskResponse<'a> {
    ok: bool,
    #[serde(flatten)]
    reply: &'a Reply,
}

#[derive(Debug, Serialize)]
pub struct SupportResponse {
    pub answer: String,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn ask(State(state): State<SharedState>, body: Bytes) -> Response {
    let request = AskRequest::from_body(&body);
    let question = request.q.trim();

    if question.is_empty() {
        return Json(json!({ "ok": false, "answer": EMPTY_QUESTION })).into_response();
    }

    let reply = state.matcher.answer(question);
    info!(question = %question, answer = %reply.answer(), "ask");

    Json(AskResponse {
        ok: true,
        reply: &reply,
    })
    .into_response()
}

pub async fn support(State(state): State<SharedState>, body: Bytes) -> Json<SupportResponse> {
    let request = AskRequest::from_body(&body);
    let message = request.q.trim();

    if message.is_empty() {
        return Json(SupportResponse {
            answer: EMPTY_SUPPORT.to_string(),
        });
    }

    let answer = state.responder.respond(message, &mut rand::thread_rng());
    info!(message = %message, answer = %answer, "support");

    // Reply even if the log write fails
    if let Err(e) = state.chat_log.append(message, &answer).await {
        warn!(error = %e, path = %state.chat_log.path().display(), "could not append to chat log");
    }

    Json(SupportResponse { answer })
}

pub async fn map_image(State(state): State<SharedState>) -> Response {
    match tokio::fs::read(&state.map_path).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, content_type(&state.map_path))],
            bytes,
        )
            .into_response(),
        Err(e) => {
            debug!(error = %e, path = %state.map_path.display(), "map image unavailable");
            (StatusCode::NOT_FOUND, "Map image not found").into_response()
        }
    }
}

pub async fn hotspots(State(state): State<SharedState>) -> Json<Vec<HotspotMarker>> {
    Json(state.matcher.knowledge_base().hotspots())
}

pub async fn places(State(state): State<SharedState>) -> Json<Vec<String>> {
    Json(state.matcher.knowledge_base().sorted_keys())
}

fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
