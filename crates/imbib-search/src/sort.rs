//! Deterministic result ordering.
//!
//! Ranking: strength > score > record id (ascending).

use std::cmp::Ordering;
use std::fmt;

use crate::matcher::TokenMatch;
use crate::record::SearchableRecord;
use crate::score::{score, Assessment, MatchStrength};

/// A record that matched every query token.
pub struct MatchResult<'a, R: ?Sized> {
    pub record: &'a R,
    pub token_matches: Vec<TokenMatch>,
    pub strength: MatchStrength,
    pub score: u64,
}

impl<'a, R: ?Sized> MatchResult<'a, R> {
    /// Build a result, deriving strength and score from the token matches.
    pub fn new(record: &'a R, token_matches: Vec<TokenMatch>) -> Self {
        let Assessment { strength, score } = score(&token_matches);
        Self {
            record,
            token_matches,
            strength,
            score,
        }
    }
}

// Manual impls: the result only borrows the record, so `R` needs no bounds.
impl<R: ?Sized> Clone for MatchResult<'_, R> {
    fn clone(&self) -> Self {
        Self {
            record: self.record,
            token_matches: self.token_matches.clone(),
            strength: self.strength,
            score: self.score,
        }
    }
}

impl<R: SearchableRecord + ?Sized> fmt::Debug for MatchResult<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResult")
            .field("record", &self.record.id())
            .field("token_matches", &self.token_matches)
            .field("strength", &self.strength)
            .field("score", &self.score)
            .finish()
    }
}

/// Return a sorted copy of `results`. The input is left untouched.
pub fn sort_results<'a, R: SearchableRecord + ?Sized>(
    results: &[MatchResult<'a, R>],
) -> Vec<MatchResult<'a, R>> {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| compare_results(a, b));
    sorted
}

fn compare_results<R: SearchableRecord + ?Sized>(
    a: &MatchResult<'_, R>,
    b: &MatchResult<'_, R>,
) -> Ordering {
    b.strength
        .cmp(&a.strength)
        .then_with(|| b.score.cmp(&a.score))
        .then_with(|| a.record.id().cmp(b.record.id()))
}
