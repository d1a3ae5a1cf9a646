//! imbib-search: reference search and ranking for imbib libraries.
//!
//! Turns a free-text query into a deterministically ordered list of matching
//! records:
//!
//! ```text
//! query → tokenize → match_token (per record) → score → sort_results
//! ```
//!
//! - Normalization: NFKC, lowercase, diacritic stripping, punctuation folding
//! - Query syntax: free words, `"quoted phrases"`, `field:value` clauses
//! - Acronym rule: `AI` only matches `AI`, while `ai` matches any casing
//! - Ranking: exact > strong > weak, then score, then record id
//!
//! The engine performs no I/O and keeps no state between calls. Record
//! snapshots come from the library store; formatting is left to callers.
//!
//! ```
//! use imbib_search::{search, AuthorName, Reference};
//!
//! let library = vec![
//!     Reference::new("Smith-2024")
//!         .with_title("Deep Learning for RNA structure")
//!         .with_author(AuthorName::personal("Smith", None)),
//!     Reference::new("Jones-2023").with_title("deep learning basics"),
//! ];
//!
//! let results = search("author:Smith \"RNA structure\"", &library);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].record.id, "Smith-2024");
//! ```

pub mod acronym;
pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod matcher;
pub mod normalize;
pub mod record;
pub mod score;
pub mod sort;
pub mod tokenize;

pub use acronym::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use field::*;
pub use matcher::*;
pub use normalize::*;
pub use record::*;
pub use score::*;
pub use sort::*;
pub use tokenize::*;
