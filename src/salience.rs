//! Salience strategies for breaking ties among equally-scored candidates.
//!
//! When the top-score filter leaves more than one candidate, a salience
//! strategy picks one by structural or discourse prominence. Each strategy
//! is deterministic except [`SalienceType::FreqCount`], whose final
//! tie-break follows concept-count map iteration order and is therefore
//! unspecified; callers needing a stable choice should configure a
//! different strategy.

use crate::document::{DependencyKind, Document, SurfaceElement, SurfaceId};
use crate::expression::cataphoric_pattern;
use crate::resolver::ResolutionContext;
use serde::{Deserialize, Serialize};

/// Tie-breaking strategy among equally-scored candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SalienceType {
    /// Linear discourse proximity with a subsumption/conjunction walk.
    Proximity,
    /// Parse-tree graph distance with a three-level lexicographic
    /// tie-break.
    ParseTree,
    /// Document-first candidate by span order.
    FirstTerm,
    /// Focus tracking; currently delegates to [`SalienceType::FirstTerm`].
    FocusTerm,
    /// Most frequent ontology concept in the document.
    FreqCount,
}

impl SalienceType {
    /// Human-readable label; also the registry key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SalienceType::Proximity => "proximity",
            SalienceType::ParseTree => "parse-tree",
            SalienceType::FirstTerm => "first-term",
            SalienceType::FocusTerm => "focus-term",
            SalienceType::FreqCount => "freq-count",
        }
    }

    /// Parse from registry key.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "proximity" => Some(SalienceType::Proximity),
            "parse-tree" => Some(SalienceType::ParseTree),
            "first-term" => Some(SalienceType::FirstTerm),
            "focus-term" => Some(SalienceType::FocusTerm),
            "freq-count" => Some(SalienceType::FreqCount),
            _ => None,
        }
    }
}

impl std::fmt::Display for SalienceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Select among tied candidates. Returns one candidate for every strategy
/// except degenerate inputs (empty tie set) or a [`SalienceType::FreqCount`]
/// set with no concepts at all, where the tie survives.
#[must_use]
pub fn select(
    kind: SalienceType,
    ctx: &ResolutionContext<'_>,
    expr: &SurfaceElement,
    tied: &[SurfaceId],
) -> Vec<SurfaceId> {
    if tied.len() <= 1 {
        return tied.to_vec();
    }
    match kind {
        SalienceType::Proximity => proximity(ctx.doc(), expr, tied),
        SalienceType::ParseTree => parse_tree(ctx.doc(), expr, tied),
        SalienceType::FirstTerm | SalienceType::FocusTerm => first_term(ctx.doc(), tied),
        SalienceType::FreqCount => freq_count(ctx, tied),
    }
}

// =============================================================================
// Proximity
// =============================================================================

fn proximity(doc: &Document, expr: &SurfaceElement, tied: &[SurfaceId]) -> Vec<SurfaceId> {
    let span_key = |id: SurfaceId| {
        let el = doc.element(id);
        (el.spans.start(), el.spans.end())
    };

    let mut closest = if cataphoric_pattern(doc, expr) {
        // Cataphoric: the leftmost candidate is the nearest postcedent.
        tied.iter().copied().min_by_key(|&id| span_key(id))
    } else {
        // Anaphoric: rightmost among those preceding the expression.
        tied.iter()
            .copied()
            .filter(|&id| doc.element(id).spans.end() <= expr.spans.start())
            .max_by_key(|&id| span_key(id))
    }
    .unwrap_or_else(|| {
        log::debug!("no candidate on the preferred side of {}; taking leftmost", expr.id);
        tied.iter().copied().min_by_key(|&id| span_key(id)).expect("tied is non-empty")
    });

    // Fixpoint walk: a candidate that subsumes or conjunction-dominates the
    // current closest replaces it. Bounded by the candidate count.
    for _ in 0..tied.len() {
        let mut replaced = false;
        for &c in tied {
            if c == closest {
                continue;
            }
            let cand = doc.element(c);
            let current = doc.element(closest);
            if cand.spans.strictly_subsumes(&current.spans)
                || conjunction_dominates(doc, c, closest)
            {
                closest = c;
                replaced = true;
            }
        }
        if !replaced {
            break;
        }
    }
    vec![closest]
}

/// Does `governor` coordinate `dependent` — either through a conj edge or
/// by carrying its span as one part of a coordinated multi-span?
fn conjunction_dominates(doc: &Document, governor: SurfaceId, dependent: SurfaceId) -> bool {
    let gov = doc.element(governor);
    let dep = doc.element(dependent);
    if gov.spans.is_discontinuous() && dep.spans.parts().iter().all(|p| gov.spans.has_part(p)) {
        return true;
    }
    gov.sentence == dep.sentence
        && doc.dependents_of(governor).any(|e| {
            e.dependent == dependent && e.kind() == DependencyKind::Conj
        })
}

// =============================================================================
// ParseTree
// =============================================================================

fn parse_tree(doc: &Document, expr: &SurfaceElement, tied: &[SurfaceId]) -> Vec<SurfaceId> {
    let distance = |id: SurfaceId| -> usize {
        let cand = doc.element(id);
        if cand.sentence == expr.sentence {
            if let Some(tree) = doc.sentence_of(expr.id).parse.as_ref() {
                if let Some(d) = tree.distance(expr.id, id) {
                    return d;
                }
            }
        }
        // Cross-sentence approximation (also the fallback when a parse is
        // missing, with depth 0 contributions).
        depth_or_zero(doc, expr.id) + depth_or_zero(doc, id)
            + 2 * doc.sentence_distance(expr.id, id)
    };

    // Strict three-level lexicographic tie-break after minimum distance:
    // shortest depth-to-root, then latest sentence, then leftmost span.
    let mut ranked: Vec<SurfaceId> = tied.to_vec();
    ranked.sort_by_key(|&id| {
        let cand = doc.element(id);
        (
            distance(id),
            depth_or_zero(doc, id),
            std::cmp::Reverse(cand.sentence),
            cand.spans.start(),
            cand.spans.end(),
        )
    });
    vec![ranked[0]]
}

fn depth_or_zero(doc: &Document, id: SurfaceId) -> usize {
    match doc.sentence_of(id).parse.as_ref().and_then(|t| t.depth(id)) {
        Some(d) => d,
        None => {
            log::debug!("no parse depth for {id}; using 0");
            0
        }
    }
}

// =============================================================================
// FirstTerm / FreqCount
// =============================================================================

fn first_term(doc: &Document, tied: &[SurfaceId]) -> Vec<SurfaceId> {
    let first = tied
        .iter()
        .copied()
        .min_by_key(|&id| {
            let el = doc.element(id);
            (el.spans.start(), el.spans.end())
        })
        .expect("tied is non-empty");
    vec![first]
}

fn freq_count(ctx: &ResolutionContext<'_>, tied: &[SurfaceId]) -> Vec<SurfaceId> {
    let doc = ctx.doc();
    let best = |id: SurfaceId| -> usize {
        doc.element(id)
            .concepts()
            .iter()
            .map(|c| ctx.concept_count(c))
            .max()
            .unwrap_or(0)
    };
    let max = tied.iter().copied().map(best).max().unwrap_or(0);
    if max == 0 {
        // No concepts anywhere; the tie stands.
        return tied.to_vec();
    }
    let top: Vec<SurfaceId> = tied.iter().copied().filter(|&id| best(id) == max).collect();
    if top.len() == 1 {
        return top;
    }
    // Tie among equally frequent concepts: follow the count map's
    // iteration order. The map is a HashMap, so the pick is unspecified.
    for (concept, _) in ctx.concept_counts() {
        if let Some(&id) = top
            .iter()
            .find(|&&id| doc.element(id).concepts().contains(&concept.as_str()))
        {
            return vec![id];
        }
    }
    top
}

// =============================================================================
// Tests
// =============================================================================
