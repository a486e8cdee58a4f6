/// campus-assist library
///
/// Campus question answering, a small support chat and a handful of
/// engineering calculators, shared by the CLI and the web server.

pub mod calc;
pub mod config;
pub mod core;
pub mod error;
pub mod kb;
pub mod logging;
pub mod server;
pub mod store;

// Re-exports for convenience
pub use config::AssistConfig;
pub use error::{AssistError, Result};
