//! Searchable record view and the CSL-JSON reference model.
//!
//! The engine reads records through [`SearchableRecord`] and never mutates
//! them. [`Reference`] is the stock implementation for snapshots handed over
//! by the library store as CSL-JSON.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// Identifier attributes a record may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Doi,
    Pmid,
    Pmcid,
    Isbn,
    Url,
}

impl IdentifierKind {
    pub const ALL: [IdentifierKind; 5] = [
        IdentifierKind::Doi,
        IdentifierKind::Pmid,
        IdentifierKind::Pmcid,
        IdentifierKind::Isbn,
        IdentifierKind::Url,
    ];
}

/// An author name, either structured or a single literal (institutions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorName {
    Literal {
        literal: String,
    },
    Personal {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        family: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        given: Option<String>,
    },
}

impl AuthorName {
    /// A personal name with a family name and optional given name.
    pub fn personal(family: impl Into<String>, given: Option<&str>) -> Self {
        AuthorName::Personal {
            family: Some(family.into()),
            given: given.map(str::to_string),
        }
    }

    /// A literal name such as a consortium or institution.
    pub fn literal(name: impl Into<String>) -> Self {
        AuthorName::Literal { literal: name.into() }
    }

    /// The individual name parts that can be matched on their own.
    pub fn name_parts(&self) -> Vec<&str> {
        match self {
            AuthorName::Literal { literal } => vec![literal.as_str()],
            AuthorName::Personal { family, given } => {
                family.iter().chain(given.iter()).map(String::as_str).collect()
            }
        }
    }

    /// Format as "Given Family" for display and phrase matching.
    pub fn full_name(&self) -> String {
        match self {
            AuthorName::Literal { literal } => literal.clone(),
            AuthorName::Personal { family, given } => match (given, family) {
                (Some(given), Some(family)) => format!("{} {}", given, family),
                (Some(only), None) | (None, Some(only)) => only.clone(),
                (None, None) => String::new(),
            },
        }
    }
}

/// Read-only view of a bibliographic record.
pub trait SearchableRecord {
    /// Stable record identifier (citation key), used as the final sort key.
    fn id(&self) -> &str;
    fn title(&self) -> Option<&str>;
    fn authors(&self) -> &[AuthorName];
    fn year(&self) -> Option<i32>;
    fn identifier(&self, kind: IdentifierKind) -> Option<&str>;
    fn keywords(&self) -> &[String];
    fn tags(&self) -> &[String];
    fn abstract_text(&self) -> Option<&str>;
    /// Journal, book, or proceedings title.
    fn container_title(&self) -> Option<&str>;
}

/// CSL-JSON `issued` date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issued {
    #[serde(rename = "date-parts", default)]
    pub date_parts: Vec<Vec<i32>>,
}

/// A bibliographic reference in CSL-JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "author", default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<AuthorName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued: Option<Issued>,
    #[serde(rename = "DOI", default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(rename = "PMID", default, skip_serializing_if = "Option::is_none")]
    pub pmid: Option<String>,
    #[serde(rename = "PMCID", default, skip_serializing_if = "Option::is_none")]
    pub pmcid: Option<String>,
    #[serde(rename = "ISBN", default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        rename = "keyword",
        default,
        deserialize_with = "deserialize_keywords",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(rename = "container-title", default, skip_serializing_if = "Option::is_none")]
    pub container_title: Option<String>,
}

impl Reference {
    /// Create an empty reference with the given identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: AuthorName) -> Self {
        self.authors.push(author);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.issued = Some(Issued {
            date_parts: vec![vec![year]],
        });
        self
    }

    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    pub fn with_pmid(mut self, pmid: impl Into<String>) -> Self {
        self.pmid = Some(pmid.into());
        self
    }

    pub fn with_pmcid(mut self, pmcid: impl Into<String>) -> Self {
        self.pmcid = Some(pmcid.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.abstract_text = Some(text.into());
        self
    }

    pub fn with_container_title(mut self, container: impl Into<String>) -> Self {
        self.container_title = Some(container.into());
        self
    }
}

impl SearchableRecord for Reference {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn authors(&self) -> &[AuthorName] {
        &self.authors
    }

    fn year(&self) -> Option<i32> {
        self.issued
            .as_ref()
            .and_then(|issued| issued.date_parts.first())
            .and_then(|parts| parts.first())
            .copied()
    }

    fn identifier(&self, kind: IdentifierKind) -> Option<&str> {
        match kind {
            IdentifierKind::Doi => self.doi.as_deref(),
            IdentifierKind::Pmid => self.pmid.as_deref(),
            IdentifierKind::Pmcid => self.pmcid.as_deref(),
            IdentifierKind::Isbn => self.isbn.as_deref(),
            IdentifierKind::Url => self.url.as_deref(),
        }
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn abstract_text(&self) -> Option<&str> {
        self.abstract_text.as_deref()
    }

    fn container_title(&self) -> Option<&str> {
        self.container_title.as_deref()
    }
}

/// CSL-JSON allows `keyword` as one delimited string or as a list.
fn deserialize_keywords<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum KeywordField {
        Joined(String),
        List(Vec<String>),
    }

    let keywords = match KeywordField::deserialize(deserializer)? {
        KeywordField::Joined(joined) => joined
            .split([',', ';'])
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect(),
        KeywordField::List(list) => list,
    };
    Ok(keywords)
}

/// Parse a CSL-JSON array snapshot into references.
pub fn parse_snapshot(json: &str) -> Result<Vec<Reference>> {
    let references: Vec<Reference> = serde_json::from_str(json)?;
    tracing::debug!(count = references.len(), "parsed reference snapshot");
    Ok(references)
}
