//! Per-token matching against a record.
//!
//! Field-qualified tokens only look at their mapped attribute. Unqualified
//! phrases look at the default surface (title, abstract, authors, container).
//! Free words are tried against every searchable surface and the best hit is
//! kept for scoring.

use serde::{Deserialize, Serialize};

use crate::acronym::{has_consecutive_uppercase, match_with_uppercase_sensitivity};
use crate::field::FieldName;
use crate::normalize::{folded_contains, normalize, normalized_contains};
use crate::record::{IdentifierKind, SearchableRecord};
use crate::tokenize::Token;

/// Ranking tier of a surface. Declared low to high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceTier {
    Secondary,
    Neutral,
    Primary,
}

/// A record attribute that satisfied a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Title,
    Author,
    Abstract,
    Keyword,
    Tag,
    Doi,
    Pmid,
    Pmcid,
    Isbn,
    Url,
    Year,
    Container,
}

impl Surface {
    pub fn tier(&self) -> SurfaceTier {
        match self {
            Surface::Title | Surface::Author => SurfaceTier::Primary,
            Surface::Abstract | Surface::Tag | Surface::Container => SurfaceTier::Secondary,
            Surface::Keyword
            | Surface::Doi
            | Surface::Pmid
            | Surface::Pmcid
            | Surface::Isbn
            | Surface::Url
            | Surface::Year => SurfaceTier::Neutral,
        }
    }

    fn from_identifier(kind: IdentifierKind) -> Self {
        match kind {
            IdentifierKind::Doi => Surface::Doi,
            IdentifierKind::Pmid => Surface::Pmid,
            IdentifierKind::Pmcid => Surface::Pmcid,
            IdentifierKind::Isbn => Surface::Isbn,
            IdentifierKind::Url => Surface::Url,
        }
    }
}

/// How a token matched. Declared weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Textual containment
    Contains,
    /// Field value equal to the whole attribute (after normalization)
    Exact,
    /// Identifier field match, or a free word equal to an identifier
    Identifier,
}

/// The surface and kind of a successful token match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hit {
    pub surface: Surface,
    pub kind: MatchKind,
}

impl Hit {
    pub fn new(surface: Surface, kind: MatchKind) -> Self {
        Self { surface, kind }
    }

    /// Whether this hit counts toward the exact tier.
    pub fn is_exact(&self) -> bool {
        matches!(self.kind, MatchKind::Exact | MatchKind::Identifier)
    }

    fn rank(&self) -> (MatchKind, SurfaceTier) {
        (self.kind, self.surface.tier())
    }
}

/// Outcome of matching one token against one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenMatch {
    pub hit: Option<Hit>,
}

impl TokenMatch {
    pub fn miss() -> Self {
        Self { hit: None }
    }

    pub fn matched(&self) -> bool {
        self.hit.is_some()
    }
}

/// Knobs for token matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Require exact case for uppercase runs in free words
    pub acronym_sensitive: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            acronym_sensitive: true,
        }
    }
}

/// Match a token against a record with default options.
pub fn match_token<R: SearchableRecord + ?Sized>(token: &Token, record: &R) -> TokenMatch {
    match_token_with(token, record, &MatchOptions::default())
}

/// Match a token against a record.
pub fn match_token_with<R: SearchableRecord + ?Sized>(
    token: &Token,
    record: &R,
    options: &MatchOptions,
) -> TokenMatch {
    let hit = match token.field {
        Some(field) => {
            let text = TextQuery::new(&token.value, token.is_phrase, options);
            match_field(field, &text, record)
        }
        None if token.is_phrase => match_phrase(&token.value, record),
        None => {
            let text = TextQuery::new(free_text(&token.value), false, options);
            match_free_text(&text, record)
        }
    };
    TokenMatch { hit }
}

/// Comparison text for a free word: stray quotes from an unclosed phrase are
/// dropped unless nothing else is left.
fn free_text(value: &str) -> &str {
    let stripped = value.trim_matches('"');
    if stripped.is_empty() {
        value
    } else {
        stripped
    }
}

/// A token value prepared for comparison against record text.
struct TextQuery<'a> {
    value: &'a str,
    lowered: String,
    normalized: String,
    phrase: bool,
    case_sensitive: bool,
}

impl<'a> TextQuery<'a> {
    fn new(value: &'a str, phrase: bool, options: &MatchOptions) -> Self {
        Self {
            value,
            lowered: value.to_lowercase(),
            normalized: normalize(value),
            phrase,
            case_sensitive: options.acronym_sensitive && has_consecutive_uppercase(value),
        }
    }

    fn matches(&self, target: &str) -> bool {
        if self.phrase {
            return !self.normalized.is_empty() && normalize(target).contains(&self.normalized);
        }
        if self.case_sensitive {
            return match_with_uppercase_sensitivity(self.value, target);
        }
        match_with_uppercase_sensitivity(&self.lowered, target)
            || folded_contains(self.value, target)
    }

    fn kind_for(&self, target: &str) -> MatchKind {
        if !self.normalized.is_empty() && self.normalized == normalize(target) {
            MatchKind::Exact
        } else {
            MatchKind::Contains
        }
    }

    /// Best hit over several candidate strings on one surface.
    fn hit_any<'t, I>(&self, surface: Surface, targets: I) -> Option<Hit>
    where
        I: IntoIterator<Item = &'t str>,
    {
        targets
            .into_iter()
            .filter(|t| self.matches(t))
            .map(|t| Hit::new(surface, self.kind_for(t)))
            .max_by_key(Hit::rank)
    }
}

fn match_field<R: SearchableRecord + ?Sized>(
    field: FieldName,
    text: &TextQuery<'_>,
    record: &R,
) -> Option<Hit> {
    match field {
        FieldName::Author => {
            let names = author_names(record);
            text.hit_any(Surface::Author, names.iter().map(String::as_str))
        }
        FieldName::Title => text.hit_any(Surface::Title, record.title()),
        FieldName::Year => record
            .year()
            .filter(|year| year.to_string() == text.value.trim())
            .map(|_| Hit::new(Surface::Year, MatchKind::Exact)),
        FieldName::Doi => identifier_prefix(record, IdentifierKind::Doi, text.value),
        FieldName::Pmid => identifier_prefix(record, IdentifierKind::Pmid, text.value),
        FieldName::Pmcid => identifier_prefix(record, IdentifierKind::Pmcid, text.value),
        FieldName::Url => text.hit_any(Surface::Url, record.identifier(IdentifierKind::Url)),
        FieldName::Keyword => {
            text.hit_any(Surface::Keyword, record.keywords().iter().map(String::as_str))
        }
        FieldName::Tag => text.hit_any(Surface::Tag, record.tags().iter().map(String::as_str)),
    }
}

/// Case-insensitive exact-or-prefix identifier match.
fn identifier_prefix<R: SearchableRecord + ?Sized>(
    record: &R,
    kind: IdentifierKind,
    value: &str,
) -> Option<Hit> {
    let wanted = value.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    record
        .identifier(kind)
        .filter(|id| id.trim().to_lowercase().starts_with(&wanted))
        .map(|_| Hit::new(Surface::from_identifier(kind), MatchKind::Identifier))
}

/// Unqualified phrase: normalized containment over the default surface.
fn match_phrase<R: SearchableRecord + ?Sized>(value: &str, record: &R) -> Option<Hit> {
    let contains = |target: &str| normalized_contains(value, target);
    let authors = author_names(record);

    let surfaces = [
        (Surface::Title, record.title().is_some_and(contains)),
        (Surface::Author, authors.iter().any(|name| contains(name))),
        (Surface::Abstract, record.abstract_text().is_some_and(contains)),
        (Surface::Container, record.container_title().is_some_and(contains)),
    ];

    surfaces
        .into_iter()
        .filter(|(_, matched)| *matched)
        .map(|(surface, _)| Hit::new(surface, MatchKind::Contains))
        .max_by_key(Hit::rank)
}

/// Free word: every searchable surface, best hit wins.
fn match_free_text<R: SearchableRecord + ?Sized>(text: &TextQuery<'_>, record: &R) -> Option<Hit> {
    let authors = author_names(record);
    let mut hits = Vec::new();

    if record.title().is_some_and(|t| text.matches(t)) {
        hits.push(Hit::new(Surface::Title, MatchKind::Contains));
    }
    if authors.iter().any(|name| text.matches(name)) {
        hits.push(Hit::new(Surface::Author, MatchKind::Contains));
    }
    if record.abstract_text().is_some_and(|t| text.matches(t)) {
        hits.push(Hit::new(Surface::Abstract, MatchKind::Contains));
    }
    if record.keywords().iter().any(|k| text.matches(k)) {
        hits.push(Hit::new(Surface::Keyword, MatchKind::Contains));
    }
    if record.tags().iter().any(|t| text.matches(t)) {
        hits.push(Hit::new(Surface::Tag, MatchKind::Contains));
    }
    for kind in IdentifierKind::ALL {
        let Some(id) = record.identifier(kind) else {
            continue;
        };
        let surface = Surface::from_identifier(kind);
        if id.trim().eq_ignore_ascii_case(text.value.trim()) {
            hits.push(Hit::new(surface, MatchKind::Identifier));
        } else if text.matches(id) {
            hits.push(Hit::new(surface, MatchKind::Contains));
        }
    }
    if record.container_title().is_some_and(|t| text.matches(t)) {
        hits.push(Hit::new(Surface::Container, MatchKind::Contains));
    }

    hits.into_iter().max_by_key(Hit::rank)
}

/// Every matchable author string: individual parts plus "Given Family".
fn author_names<R: SearchableRecord + ?Sized>(record: &R) -> Vec<String> {
    record
        .authors()
        .iter()
        .flat_map(|author| {
            let mut names: Vec<String> = author.name_parts().into_iter().map(str::to_string).collect();
            if names.len() > 1 {
                names.push(author.full_name());
            }
            names
        })
        .collect()
}
