//! Search pipeline: tokenize → match → score → sort.
//!
//! Each token narrows the candidate set left by the previous one, so adding a
//! token can only remove results. The engine holds nothing but its config and
//! can be shared across threads.

use crate::config::{EmptyQuery, SearchConfig};
use crate::matcher::{match_token_with, MatchOptions, TokenMatch};
use crate::record::SearchableRecord;
use crate::sort::{sort_results, MatchResult};
use crate::tokenize::{tokenize, ParsedQuery, Token};

/// Runs queries over record snapshots.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Tokenize `query` and rank the matching records.
    pub fn search<'a, R: SearchableRecord>(
        &self,
        query: &str,
        records: &'a [R],
    ) -> Vec<MatchResult<'a, R>> {
        self.search_parsed(&tokenize(query), records)
    }

    /// Rank the records matching an already tokenized query.
    pub fn search_parsed<'a, R: SearchableRecord>(
        &self,
        query: &ParsedQuery,
        records: &'a [R],
    ) -> Vec<MatchResult<'a, R>> {
        if query.is_empty() {
            return match self.config.empty_query {
                EmptyQuery::MatchAll => records
                    .iter()
                    .map(|record| MatchResult::new(record, Vec::new()))
                    .collect(),
                EmptyQuery::MatchNone => Vec::new(),
            };
        }

        let options = self.config.match_options();
        let mut candidates: Vec<(&'a R, Vec<TokenMatch>)> = records
            .iter()
            .map(|record| (record, Vec::with_capacity(query.tokens.len())))
            .collect();

        for token in &query.tokens {
            candidates = narrow(candidates, token, &options);
            tracing::trace!(token = %token.raw, remaining = candidates.len(), "token applied");
            if candidates.is_empty() {
                break;
            }
        }

        let results: Vec<MatchResult<'a, R>> = candidates
            .into_iter()
            .map(|(record, matches)| MatchResult::new(record, matches))
            .collect();

        let mut ranked = sort_results(&results);
        if let Some(limit) = self.config.limit {
            ranked.truncate(limit);
        }

        tracing::debug!(
            query = %query.original,
            tokens = query.tokens.len(),
            records = records.len(),
            matched = results.len(),
            returned = ranked.len(),
            "search complete"
        );
        ranked
    }

    /// Match a single record against a query.
    ///
    /// Stops at the first token that fails. Returns `None` when the record
    /// does not match every token.
    pub fn evaluate<'a, R: SearchableRecord + ?Sized>(
        &self,
        query: &ParsedQuery,
        record: &'a R,
    ) -> Option<MatchResult<'a, R>> {
        let options = self.config.match_options();
        let matches = query
            .tokens
            .iter()
            .map(|token| match_token_with(token, record, &options))
            .take_while(TokenMatch::matched)
            .collect::<Vec<_>>();

        (matches.len() == query.tokens.len()).then(|| MatchResult::new(record, matches))
    }
}

/// Keep the candidates that match `token`, recording how they matched.
fn narrow<'a, R: SearchableRecord>(
    candidates: Vec<(&'a R, Vec<TokenMatch>)>,
    token: &Token,
    options: &MatchOptions,
) -> Vec<(&'a R, Vec<TokenMatch>)> {
    candidates
        .into_iter()
        .filter_map(|(record, mut matches)| {
            let outcome = match_token_with(token, record, options);
            outcome.matched().then(|| {
                matches.push(outcome);
                (record, matches)
            })
        })
        .collect()
}

/// Search with the default configuration.
pub fn search<'a, R: SearchableRecord>(query: &str, records: &'a [R]) -> Vec<MatchResult<'a, R>> {
    SearchEngine::default().search(query, records)
}
