// Append-only chat history
//
// One record per exchange, written as two timestamped lines followed by a
// blank line:
//
// ```text
// 2026-10-18T14:03:11.512093 User: I'm stressed about exams
// 2026-10-18T14:03:11.512093 Bot: It's okay to feel stressed...
// ```

use crate::error::Result;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// One (timestamp, user message, bot reply) triple
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatEntry {
    pub timestamp: NaiveDateTime,
    pub user: String,
    pub bot: String,
}

/// Chat log file shared by every request handler
#[derive(Clone)]
pub struct ChatLog {
    path: PathBuf,
    // Serializes appends so two records never interleave
    write_lock: Arc<Mutex<()>>,
}

impl ChatLog {
    /// Open (or prepare) a chat log at `path`
    ///
    /// The file itself is created on first append; parent directories are
    /// created now so a bad path fails early.
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        Ok(Self {
            path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one exchange
    pub async fn append(&self, user: &str, bot: &str) -> Result<ChatEntry> {
        let entry = ChatEntry {
            timestamp: Local::now().naive_local(),
            user: flatten(user),
            bot: flatten(bot),
        };

        let ts = entry.timestamp.format(TIMESTAMP_FORMAT);
        let record = format!("{ts} User: {}\n{ts} Bot: {}\n\n", entry.user, entry.bot);

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(record.as_bytes()).await?;
        file.flush().await?;

        debug!(path = %self.path.display(), "chat exchange logged");
        Ok(entry)
    }

    /// Read every well-formed record back, oldest first
    ///
    /// A missing file is an empty history. Malformed blocks are skipped.
    pub async fn entries(&self) -> Result<Vec<ChatEntry>> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for block in text.split("\n\n") {
            let block = block.trim();
            if block.is_empty() {
                continue;
            }
            match parse_block(block) {
                Some(entry) => entries.push(entry),
                None => warn!(path = %self.path.display(), "skipping malformed chat log record"),
            }
        }

        Ok(entries)
    }

    /// The newest `limit` records, oldest first
    pub async fn recent(&self, limit: usize) -> Result<Vec<ChatEntry>> {
        let mut entries = self.entries().await?;
        let skip = entries.len().saturating_sub(limit);
        Ok(entries.split_off(skip))
    }
}

// Records are line-based; keep each message on one line.
fn flatten(text: &str) -> String {
    text.replace('\0', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_line<'a>(line: &'a str, speaker: &str) -> Option<(NaiveDateTime, &'a str)> {
    let (ts, rest) = line.split_once(' ')?;
    let timestamp = NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).ok()?;
    let message = rest.strip_prefix(speaker)?.strip_prefix(": ").or_else(|| {
        // Empty messages are written as "User: " and trimmed to "User:"
        rest.strip_prefix(speaker)?.strip_prefix(':')
    })?;
    Some((timestamp, message))
}

fn parse_block(block: &str) -> Option<ChatEntry> {
    let mut lines = block.lines();
    let (timestamp, user) = parse_line(lines.next()?, "User")?;
    let (_, bot) = parse_line(lines.next()?, "Bot")?;
    if lines.next().is_some() {
        return None;
    }

    Some(ChatEntry {
        timestamp,
        user: user.to_string(),
        bot: bot.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_append_and_read_back() {
        let temp = TempDir::new().unwrap();
        let log = ChatLog::new(temp.path().join("logs").join("chat_history.txt"))
            .await
            .unwrap();

        log.append("I'm stressed", "Take a deep breath.").await.unwrap();
        log.append("thanks", "You're welcome.").await.unwrap();

        let entries = log.entries().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].user, "I'm stressed");
        assert_eq!(entries[0].bot, "Take a deep breath.");
        assert_eq!(entries[1].user, "thanks");
        assert!(entries[0].timestamp <= entries[1].timestamp);
    }

    #[tokio::test]
    async fn test_file_format() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("chat.txt");
        let log = ChatLog::new(&path).await.unwrap();

        log.append("hello", "Hi!").await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(" User: hello"));
        assert!(lines[1].ends_with(" Bot: Hi!"));
        assert_eq!(lines[2], "");
        assert!(raw.ends_with("\n\n"));

        // Local time, microseconds, no offset: 2026-10-18T14:03:11.512093
        let (ts, _) = lines[0].split_once(' ').unwrap();
        assert_eq!(ts.len(), 26);
        assert!(!ts.ends_with('Z') && !ts.contains('+'));
        assert!(NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).is_ok());
        assert_eq!(lines[1].split_once(' ').unwrap().0, ts);
    }

    #[tokio::test]
    async fn test_multiline_messages_are_flattened() {
        let temp = TempDir::new().unwrap();
        let log = ChatLog::new(temp.path().join("chat.txt")).await.unwrap();

        log.append("line one\nline two", "a\n\nb").await.unwrap();

        let entries = log.entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user, "line one line two");
        assert_eq!(entries[0].bot, "a b");
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let log = ChatLog::new(temp.path().join("nope.txt")).await.unwrap();
        assert!(log.entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_blocks_skipped() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("chat.txt");
        std::fs::write(
            &path,
            "garbage without structure\n\n\
             2026-10-18T10:00:00.000000 User: hi\n2026-10-18T10:00:00.000000 Bot: hello\n\n",
        )
        .unwrap();

        let log = ChatLog::new(&path).await.unwrap();
        let entries = log.entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].bot, "hello");
    }

    #[tokio::test]
    async fn test_recent() {
        let temp = TempDir::new().unwrap();
        let log = ChatLog::new(temp.path().join("chat.txt")).await.unwrap();

        for i in 0..5 {
            log.append(&format!("msg {}", i), "ok").await.unwrap();
        }

        let recent = log.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].user, "msg 3");
        assert_eq!(recent[1].user, "msg 4");

        assert_eq!(log.recent(50).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_concurrent_appends_do_not_interleave() {
        let temp = TempDir::new().unwrap();
        let log = ChatLog::new(temp.path().join("chat.txt")).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..20 {
            let log = log.clone();
            handles.push(tokio::spawn(async move {
                log.append(&format!("user {}", i), &format!("bot {}", i))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let entries = log.entries().await.unwrap();
        assert_eq!(entries.len(), 20);
        for entry in entries {
            let n = entry.user.trim_start_matches("user ");
            assert_eq!(entry.bot, format!("bot {}", n));
        }
    }
}
