// Copyright (c) 2025 Weighted Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Word-list files for bulk loading.
//!
//! One entry per line: a word, optionally followed by its weight. Blank lines
//! and lines starting with `#` are ignored.
//!
//! ```text
//! # fruit
//! apple 5
//! app   3
//! banana
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data_structures::weighted_trie::Weight;

/// Errors raised while reading a word list.
#[derive(Debug, thiserror::Error)]
pub enum WordListError {
    /// The file could not be read.
    #[error("Failed to read word list: {0}")]
    Io(#[from] std::io::Error),

    /// The weight column is not a number.
    #[error("Line {line}: invalid weight '{value}'")]
    InvalidWeight {
        /// 1-based line number.
        line: usize,
        /// The text found in the weight column.
        value: String,
    },

    /// More than two columns on a line.
    #[error("Line {line}: expected 'word [weight]'")]
    TooManyFields {
        /// 1-based line number.
        line: usize,
    },
}

/// One parsed word-list line.
#[derive(Debug, Clone, PartialEq)]
pub struct WordEntry {
    /// The word as written in the file
    pub word: String,

    /// Explicit weight, or `None` to use the default
    pub weight: Option<Weight>,
}

impl WordEntry {
    /// Splits the entry into the pair accepted by `WeightedTrie::add_words`.
    pub fn into_pair(self) -> (String, Option<Weight>) {
        (self.word, self.weight)
    }
}

/// Parses a word list from any buffered reader.
pub fn parse_word_list<R: BufRead>(reader: R) -> Result<Vec<WordEntry>, WordListError> {
    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let mut fields = line.split_whitespace();

        // Blank lines have no first field
        let word = match fields.next() {
            Some(word) if !word.starts_with('#') => word,
            _ => continue,
        };
        let weight = fields.next();
        if fields.next().is_some() {
            return Err(WordListError::TooManyFields { line: idx + 1 });
        }

        let weight = weight
            .map(|value| {
                value.parse::<Weight>().map_err(|_| WordListError::InvalidWeight {
                    line: idx + 1,
                    value: value.to_string(),
                })
            })
            .transpose()?;

        entries.push(WordEntry {
            word: word.to_string(),
            weight,
        });
    }

    tracing::debug!(entries = entries.len(), "parsed word list");
    Ok(entries)
}

/// Reads and parses a word-list file.
pub fn read_word_list<P: AsRef<Path>>(path: P) -> Result<Vec<WordEntry>, WordListError> {
    let file = File::open(path.as_ref())?;
    parse_word_list(BufReader::new(file))
}
