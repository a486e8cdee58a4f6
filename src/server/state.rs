use crate::config::AssistConfig;
use crate::core::{Matcher, SupportResponder};
use crate::error::Result;
use crate::store::ChatLog;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a request handler needs
///
/// The matcher and responder are immutable after startup; the chat log
/// serializes its own writes.
pub struct AppState {
    pub matcher: Matcher,
    pub responder: SupportResponder,
    pub chat_log: ChatLog,
    pub map_path: PathBuf,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(
        matcher: Matcher,
        responder: SupportResponder,
        chat_log: ChatLog,
        map_path: PathBuf,
    ) -> SharedState {
        Arc::new(Self {
            matcher,
            responder,
            chat_log,
            map_path,
        })
    }

    pub async fn from_config(config: &AssistConfig) -> Result<SharedState> {
        Ok(Self::new(
            config.matcher()?,
            config.responder()?,
            config.chat_log().await?,
            config.paths.map_image.clone(),
        ))
    }
}
