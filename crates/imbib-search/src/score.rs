//! Match-strength classification and tie-break scoring.
//!
//! Tiers are checked in order: exact, then weak (any secondary-only token),
//! then strong (any primary token). Anything left over is weak.
//!
//! The score leads with the number of tokens that hit a primary surface.
//! Surface weights and exact bonuses only order records with the same
//! primary count.

use serde::{Deserialize, Serialize};

use crate::matcher::{SurfaceTier, TokenMatch};

const NEUTRAL_WEIGHT: u64 = 2;
const SECONDARY_WEIGHT: u64 = 1;
const EXACT_BONUS: u64 = 1;

/// Largest minor score a single token can contribute.
const MAX_TOKEN_MINOR: u64 = NEUTRAL_WEIGHT + EXACT_BONUS;

/// Coarse match quality. Declared weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrength {
    /// Some token did not match; never appears in results
    None,
    Weak,
    Strong,
    Exact,
}

/// Strength plus tie-break score for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub strength: MatchStrength,
    pub score: u64,
}

/// Classify a record's token matches.
pub fn score(token_matches: &[TokenMatch]) -> Assessment {
    let Some(hits) = token_matches.iter().map(|m| m.hit).collect::<Option<Vec<_>>>() else {
        return Assessment {
            strength: MatchStrength::None,
            score: 0,
        };
    };

    let strength = if hits.iter().all(|h| h.is_exact()) {
        MatchStrength::Exact
    } else if hits.iter().any(|h| h.surface.tier() == SurfaceTier::Secondary) {
        MatchStrength::Weak
    } else if hits.iter().any(|h| h.surface.tier() == SurfaceTier::Primary) {
        MatchStrength::Strong
    } else {
        MatchStrength::Weak
    };

    let primary = hits
        .iter()
        .filter(|h| h.surface.tier() == SurfaceTier::Primary)
        .count() as u64;
    let minor: u64 = hits
        .iter()
        .map(|h| {
            let weight = match h.surface.tier() {
                SurfaceTier::Primary => 0,
                SurfaceTier::Neutral => NEUTRAL_WEIGHT,
                SurfaceTier::Secondary => SECONDARY_WEIGHT,
            };
            if h.is_exact() {
                weight + EXACT_BONUS
            } else {
                weight
            }
        })
        .sum();

    // minor never reaches the stride, so one more primary token always wins
    let stride = hits.len() as u64 * MAX_TOKEN_MINOR + 1;
    let score = primary.saturating_mul(stride).saturating_add(minor);

    Assessment { strength, score }
}
