// Configuration for campus-assist
//
// Loaded from `config.toml`; every field has a default so a missing or
// partial file is fine. Lookup order: `$CAMPUS_ASSIST_CONFIG`, then
// `~/.campus-assist/config.toml`.

use crate::core::matcher::{MatcherOptions, DEFAULT_FUZZY_THRESHOLD};
use crate::core::responder::DEFAULT_FILE_RESPONSES;
use crate::core::{Matcher, SupportResponder};
use crate::error::{AssistError, Result};
use crate::kb::KnowledgeBase;
use crate::store::{ChatLog, ResponsesFile};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Environment variable that points at an explicit config file
pub const CONFIG_ENV: &str = "CAMPUS_ASSIST_CONFIG";

const DATA_DIR: &str = ".campus-assist";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AssistConfig {
    /// Load configuration from a TOML string
    ///
    /// # Errors
    /// Returns `AssistError::Toml` if the TOML is invalid, or
    /// `AssistError::Config` if a value is out of range.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load from the default locations, falling back to defaults
    ///
    /// An explicit `$CAMPUS_ASSIST_CONFIG` that does not exist is an error;
    /// a missing file in the home directory is not.
    pub fn load() -> Result<Self> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(explicit);
            if !path.is_file() {
                return Err(AssistError::Config(format!(
                    "{} points at '{}', which does not exist",
                    CONFIG_ENV,
                    path.display()
                )));
            }
            return Self::from_file(&path);
        }

        let default_path = data_dir().join("config.toml");
        if default_path.is_file() {
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// The configured knowledge base, or the built-in campus
    pub fn knowledge_base(&self) -> Result<KnowledgeBase> {
        match &self.paths.knowledge_base {
            Some(path) => {
                let kb = KnowledgeBase::from_file(path)?;
                info!(path = %path.display(), places = kb.len(), "loaded knowledge base");
                Ok(kb)
            }
            None => Ok(KnowledgeBase::builtin()),
        }
    }

    pub fn matcher(&self) -> Result<Matcher> {
        let options = MatcherOptions {
            fuzzy_threshold: self.matcher.fuzzy_threshold,
        };
        Ok(Matcher::new(Arc::new(self.knowledge_base()?), options))
    }

    /// Support responder with the responses file merged in
    ///
    /// The responses file is seeded with defaults the first time.
    pub fn responder(&self) -> Result<SupportResponder> {
        ResponsesFile::ensure(&self.paths.responses, DEFAULT_FILE_RESPONSES)?;
        let learned = ResponsesFile::load(&self.paths.responses)?;
        Ok(SupportResponder::new().with_file_responses(learned))
    }

    pub async fn chat_log(&self) -> Result<ChatLog> {
        ChatLog::new(&self.paths.chat_history).await
    }

    fn validate(&self) -> Result<()> {
        if self.matcher.fuzzy_threshold > 100 {
            return Err(AssistError::Config(format!(
                "matcher.fuzzy_threshold must be 0-100, got {}",
                self.matcher.fuzzy_threshold
            )));
        }
        Ok(())
    }
}

/// `~/.campus-assist`, or the current directory when there is no home
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DATA_DIR))
        .unwrap_or_else(|| PathBuf::from(DATA_DIR))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the web server listens on
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Map image served at `/map`
    #[serde(default = "default_map_image")]
    pub map_image: PathBuf,
    /// Append-only support chat history
    #[serde(default = "default_chat_history")]
    pub chat_history: PathBuf,
    /// `key:value` responses file for the support chat
    #[serde(default = "default_responses")]
    pub responses: PathBuf,
    /// Custom knowledge base; the built-in campus is used when unset
    #[serde(default)]
    pub knowledge_base: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            map_image: default_map_image(),
            chat_history: default_chat_history(),
            responses: default_responses(),
            knowledge_base: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum fuzzy score (0-100) for a place to match
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: u8,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: default_fuzzy_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error. `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}

fn default_map_image() -> PathBuf {
    PathBuf::from("gjbc_map.png")
}

fn default_chat_history() -> PathBuf {
    data_dir().join("chat_history.txt")
}

fn default_responses() -> PathBuf {
    data_dir().join("responses.txt")
}

fn default_fuzzy_threshold() -> u8 {
    DEFAULT_FUZZY_THRESHOLD
}

fn default_log_level() -> String {
    "info".to_string()
}
