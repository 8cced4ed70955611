//! Post-scoring filters over the candidate score map.
//!
//! Chained like candidate filters: the output map of one is the input of
//! the next in strategy order. The usual recipe is threshold → top-score →
//! salience.

use crate::document::{SurfaceElement, SurfaceId};
use crate::resolver::ResolutionContext;
use crate::salience::{self, SalienceType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Candidate scores, keyed in document order so downstream tie-breaks
/// iterate deterministically.
pub type ScoreMap = BTreeMap<SurfaceId, i32>;

/// One post-scoring stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostScoringFilter {
    /// Drop candidates scoring below the minimum.
    Threshold(i32),
    /// Keep only candidates sharing the maximum score.
    TopScore,
    /// Break remaining ties with a salience strategy.
    Salience(SalienceType),
}

impl PostScoringFilter {
    /// Apply the stage, producing a fresh score map.
    #[must_use]
    pub fn apply(
        &self,
        ctx: &ResolutionContext<'_>,
        expr: &SurfaceElement,
        scores: &ScoreMap,
    ) -> ScoreMap {
        if scores.is_empty() {
            return ScoreMap::new();
        }
        match self {
            PostScoringFilter::Threshold(min) => scores
                .iter()
                .filter(|(_, &score)| score >= *min)
                .map(|(&id, &score)| (id, score))
                .collect(),
            PostScoringFilter::TopScore => {
                let max = scores.values().copied().max().unwrap_or(0);
                scores
                    .iter()
                    .filter(|(_, &score)| score == max)
                    .map(|(&id, &score)| (id, score))
                    .collect()
            }
            PostScoringFilter::Salience(kind) => {
                if scores.len() <= 1 {
                    return scores.clone();
                }
                let tied: Vec<SurfaceId> = scores.keys().copied().collect();
                let selected = salience::select(*kind, ctx, expr, &tied);
                scores
                    .iter()
                    .filter(|(id, _)| selected.contains(id))
                    .map(|(&id, &score)| (id, score))
                    .collect()
            }
        }
    }
}

impl std::fmt::Display for PostScoringFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostScoringFilter::Threshold(min) => write!(f, "threshold:{min}"),
            PostScoringFilter::TopScore => write!(f, "top-score"),
            PostScoringFilter::Salience(kind) => write!(f, "salience:{kind}"),
        }
    }
}
