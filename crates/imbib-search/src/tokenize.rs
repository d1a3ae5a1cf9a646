//! Query tokenizer.
//!
//! Splits a raw query into free words, quoted phrases, and field-qualified
//! clauses.
//!
//! # Syntax
//!
//! ```text
//! author:Smith "RNA structure" title:"deep learning" 2020
//! ```
//!
//! - `"..."`: phrase (matched as one contiguous run)
//! - `field:value`, `field:"a phrase"`: field-qualified clause
//! - Everything else: free text, including `unknown:value`
//!
//! Tokenizing never fails. Malformed input degrades to literal tokens.

use serde::{Deserialize, Serialize};

use crate::field::FieldName;

/// One parsed unit of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Original text, including field prefix and quotes
    pub raw: String,
    /// Text used for comparison, original casing preserved
    pub value: String,
    /// Field qualifier, if any
    pub field: Option<FieldName>,
    /// Whether the value came from a quoted run
    pub is_phrase: bool,
}

impl Token {
    /// A free-text word, taken verbatim.
    pub fn literal(word: &str) -> Self {
        Self {
            raw: word.to_string(),
            value: word.to_string(),
            field: None,
            is_phrase: false,
        }
    }

    /// An unqualified quoted phrase.
    pub fn phrase(raw: &str, value: &str) -> Self {
        Self {
            raw: raw.to_string(),
            value: value.to_string(),
            field: None,
            is_phrase: true,
        }
    }

    /// A field-qualified clause.
    pub fn field(raw: &str, field: FieldName, value: &str, is_phrase: bool) -> Self {
        Self {
            raw: raw.to_string(),
            value: value.to_string(),
            field: Some(field),
            is_phrase,
        }
    }
}

/// A tokenized query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub original: String,
    pub tokens: Vec<Token>,
}

impl ParsedQuery {
    /// Whether the query produced no tokens (the "match everything" signal).
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Tokenize a query string.
pub fn tokenize(query: &str) -> ParsedQuery {
    let mut tokens = Vec::new();
    let len = query.len();
    let mut pos = 0;

    while pos < len {
        let rest = query[pos..].trim_start();
        if rest.is_empty() {
            break;
        }
        let start = len - rest.len();

        // Quoted phrase
        if rest.starts_with('"') {
            match find_quote(query, start + 1) {
                Some(close) => {
                    let inner = query[start + 1..close].trim();
                    if !inner.is_empty() {
                        tokens.push(Token::phrase(&query[start..=close], inner));
                    }
                    pos = close + 1;
                }
                None => {
                    // Unclosed quote: the rest of the query is plain words
                    tokens.extend(query[start..].split_whitespace().map(Token::literal));
                    break;
                }
            }
            continue;
        }

        let end = word_end(query, start);
        let word = &query[start..end];
        pos = end;

        match split_field(word) {
            Some((field, value)) if value.starts_with('"') => {
                let open = end - value.len();
                match find_quote(query, open + 1) {
                    Some(close) => {
                        let inner = query[open + 1..close].trim();
                        if !inner.is_empty() {
                            tokens.push(Token::field(&query[start..=close], field, inner, true));
                        }
                        pos = close + 1;
                    }
                    None => {
                        let stripped = value.trim_start_matches('"');
                        if !stripped.is_empty() {
                            tokens.push(Token::field(word, field, stripped, false));
                        }
                    }
                }
            }
            Some((field, value)) => {
                if !value.is_empty() {
                    tokens.push(Token::field(word, field, value, false));
                }
            }
            None => tokens.push(Token::literal(word)),
        }
    }

    ParsedQuery {
        original: query.to_string(),
        tokens,
    }
}

/// Split `name:rest` when `name` is a recognized field.
fn split_field(word: &str) -> Option<(FieldName, &str)> {
    let (name, rest) = word.split_once(':')?;
    FieldName::from_name(name).map(|field| (field, rest))
}

fn find_quote(query: &str, from: usize) -> Option<usize> {
    query[from..].find('"').map(|i| from + i)
}

fn word_end(query: &str, start: usize) -> usize {
    query[start..]
        .find(char::is_whitespace)
        .map(|i| start + i)
        .unwrap_or(query.len())
}
