// Editable `key:value` responses file for the support chat
//
// Users can teach the bot new keywords by adding lines. Order is kept; a key
// that shows up twice keeps its first position and takes the later value.

use crate::error::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

pub struct ResponsesFile;

impl ResponsesFile {
    /// Write `defaults` to `path` unless the file already exists
    ///
    /// # Returns
    /// * `Ok(true)` - The file was created
    /// * `Ok(false)` - The file was already there and left untouched
    pub fn ensure(path: &Path, defaults: &[(&str, &str)]) -> Result<bool> {
        if path.is_file() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let body: String = defaults
            .iter()
            .map(|(key, value)| format!("{}:{}\n", key, value))
            .collect();
        fs::write(path, body)?;

        info!(path = %path.display(), entries = defaults.len(), "created responses file");
        Ok(true)
    }

    /// Load responses from `path`; a missing file is an empty list
    pub fn load(path: &Path) -> Result<Vec<(String, String)>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Vec<(String, String)> {
        let mut responses: Vec<(String, String)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for line in text.lines() {
            let Some((key, value)) = line.trim().split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim().to_string();
            if key.is_empty() {
                continue;
            }

            match positions.get(&key) {
                Some(&i) => responses[i].1 = value,
                None => {
                    positions.insert(key.clone(), responses.len());
                    responses.push((key, value));
                }
            }
        }

        responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse() {
        let parsed = ResponsesFile::parse(
            "Stress : breathe\nno colon here\n:empty key\nexam:good luck: you got this\n",
        );
        assert_eq!(
            parsed,
            vec![
                ("stress".to_string(), "breathe".to_string()),
                ("exam".to_string(), "good luck: you got this".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicate_key_keeps_position_takes_last_value() {
        let parsed = ResponsesFile::parse("a:1\nb:2\na:3\n");
        assert_eq!(parsed[0], ("a".to_string(), "3".to_string()));
        assert_eq!(parsed[1], ("b".to_string(), "2".to_string()));
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_ensure_creates_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data").join("responses.txt");

        assert!(ResponsesFile::ensure(&path, &[("hello", "hi there")]).unwrap());
        assert!(!ResponsesFile::ensure(&path, &[("other", "ignored")]).unwrap());

        let loaded = ResponsesFile::load(&path).unwrap();
        assert_eq!(loaded, vec![("hello".to_string(), "hi there".to_string())]);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let loaded = ResponsesFile::load(&temp.path().join("missing.txt")).unwrap();
        assert!(loaded.is_empty());
    }
}
