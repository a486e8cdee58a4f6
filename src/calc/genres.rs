// Reading-genre statistics
//
// Inverts a student → genres mapping into genre → students and computes,
// for every genre, how many genres its readers like on average.

use crate::error::{AssistError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreReport {
    /// genre → students who listed it
    pub readers_by_genre: BTreeMap<String, BTreeSet<String>>,
    /// genre → average number of genres per reader of that genre (2 decimals)
    pub average_genres: BTreeMap<String, f64>,
}

/// Parse `name: genre, genre, ...` lines
///
/// Blank lines are skipped. A repeated name replaces the earlier entry.
pub fn parse_readers(text: &str) -> Result<BTreeMap<String, BTreeSet<String>>> {
    let mut readers = BTreeMap::new();

    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (name, genres) = line.split_once(':').ok_or_else(|| {
            AssistError::Generic(format!(
                "line {}: expected 'name: genre, genre', got '{}'",
                n + 1,
                line
            ))
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AssistError::Generic(format!("line {}: missing student name", n + 1)));
        }

        let genres: BTreeSet<String> = genres
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();

        readers.insert(name.to_string(), genres);
    }

    Ok(readers)
}

pub fn aggregate(readers: &BTreeMap<String, BTreeSet<String>>) -> GenreReport {
    let mut readers_by_genre: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for (student, genres) in readers {
        for genre in genres {
            readers_by_genre
                .entry(genre.clone())
                .or_default()
                .insert(student.clone());
        }
    }

    let average_genres = readers_by_genre
        .iter()
        .map(|(genre, students)| {
            let total: usize = students.iter().map(|s| readers[s].len()).sum();
            let avg = total as f64 / students.len() as f64;
            (genre.clone(), (avg * 100.0).round() / 100.0)
        })
        .collect();

    GenreReport {
        readers_by_genre,
        average_genres,
    }
}
