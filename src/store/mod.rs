/// Flat-file storage
///
/// The append-only chat history and the editable responses file.

pub mod chat_log;
pub mod responses_file;

pub use chat_log::{ChatEntry, ChatLog};
pub use responses_file::ResponsesFile;
