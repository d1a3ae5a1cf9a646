//! Field vocabulary for field-qualified query clauses.
//!
//! A query fragment `name:value` is field-qualified only when `name` is one of
//! the names below. The set is part of the saved-query contract: adding a name
//! is backward compatible, renaming or removing one is not.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// A recognized field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Author,
    Title,
    Year,
    Doi,
    Pmid,
    Pmcid,
    Url,
    Keyword,
    Tag,
}

impl FieldName {
    /// Every recognized field, in vocabulary order.
    pub const ALL: [FieldName; 9] = [
        FieldName::Author,
        FieldName::Title,
        FieldName::Year,
        FieldName::Doi,
        FieldName::Pmid,
        FieldName::Pmcid,
        FieldName::Url,
        FieldName::Keyword,
        FieldName::Tag,
    ];

    /// Query-syntax name (the part before the colon).
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Author => "author",
            FieldName::Title => "title",
            FieldName::Year => "year",
            FieldName::Doi => "doi",
            FieldName::Pmid => "pmid",
            FieldName::Pmcid => "pmcid",
            FieldName::Url => "url",
            FieldName::Keyword => "keyword",
            FieldName::Tag => "tag",
        }
    }

    /// Look up a field by its query-syntax name.
    ///
    /// Names are matched exactly; `Author:` is not a field prefix.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_str() == name)
    }

    /// Whether values for this field are identifiers (exact-or-prefix match).
    pub fn is_identifier(&self) -> bool {
        matches!(self, FieldName::Doi | FieldName::Pmid | FieldName::Pmcid)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| SearchError::UnknownField(s.to_string()))
    }
}
