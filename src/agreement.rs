//! Agreement checks and the weighted-vote scoring engine.
//!
//! Each [`ScoringFunction`] is an independent boolean compatibility test
//! between the expression and one candidate. A candidate's total score is
//! the plain sum of each configured function's weight where its test holds
//! and its floor (default 0) where it does not — there is no cross-function
//! interaction, which is why per-strategy weight tuning, not engine logic,
//! is the tuning lever.

use crate::document::{DependencyKind, Document, SurfaceElement, SurfaceId};
use crate::filters::ScoreMap;
use crate::lexicon::{self, Animacy, Gender, Number, Person, ANIMATE_SEM_TYPES};
use crate::resolver::ResolutionContext;
use crate::semantics::SemKind;
use serde::{Deserialize, Serialize};

// =============================================================================
// Morphological features
// =============================================================================

/// Grammatical number of an element: pronoun table first, then POS tag,
/// with coordination forcing plural.
#[must_use]
pub fn number_of(el: &SurfaceElement) -> Number {
    if let Some(f) = lexicon::pronoun_features(&el.lemma) {
        return f.number;
    }
    if el.spans.is_discontinuous() || el.has_kind(SemKind::Conjunction) {
        return Number::Plural;
    }
    let tag = el.tag.to_ascii_uppercase();
    match tag.as_str() {
        "NNS" | "NNPS" => Number::Plural,
        "NN" | "NNP" => Number::Singular,
        _ => Number::Either,
    }
}

/// Grammatical gender: only pronouns carry one.
#[must_use]
pub fn gender_of(el: &SurfaceElement) -> Gender {
    lexicon::pronoun_features(&el.lemma).map_or(Gender::Either, |f| f.gender)
}

/// Grammatical person: non-pronouns are third person.
#[must_use]
pub fn person_of(el: &SurfaceElement) -> Person {
    lexicon::pronoun_features(&el.lemma).map_or(Person::Third, |f| f.person)
}

/// Animacy: pronoun table first, then the animate semantic-type list.
#[must_use]
pub fn animacy_of(el: &SurfaceElement) -> Animacy {
    if let Some(f) = lexicon::pronoun_features(&el.lemma) {
        return f.animacy;
    }
    let types = el.sem_types();
    if types.is_empty() {
        return Animacy::Either;
    }
    if types.iter().any(|t| ANIMATE_SEM_TYPES.contains(t)) {
        Animacy::Animate
    } else {
        Animacy::Inanimate
    }
}

/// Suffix-stripping stem for the relaxed string match. Collapses common
/// inflections and nominalizations (inhibits/inhibited/inhibition).
#[must_use]
pub fn stem(word: &str) -> String {
    let mut s = word.to_ascii_lowercase();
    // Plural before nominalization, so "mutations" and "mutation" meet.
    if s.len() > 2 && !s.ends_with("ss") {
        if let Some(base) = s.strip_suffix('s') {
            s = base.to_string();
        }
    }
    if let Some(base) = s.strip_suffix("ation") {
        s = base.to_string();
    } else if s.ends_with("tion") || s.ends_with("sion") {
        s.truncate(s.len() - 3);
    } else if let Some(base) = s.strip_suffix("ing") {
        s = base.to_string();
    } else if s.len() > 3 {
        if let Some(base) = s.strip_suffix("ed") {
            s = base.to_string();
        }
    }
    let bytes = s.as_bytes();
    if bytes.len() > 2 && bytes[bytes.len() - 1] == bytes[bytes.len() - 2] {
        s.pop();
    }
    s
}

// =============================================================================
// ScoringFunction
// =============================================================================

/// One pluggable agreement test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringFunction {
    /// Grammatical number compatibility.
    Number,
    /// Grammatical gender compatibility.
    Gender,
    /// Grammatical person compatibility.
    Person,
    /// Animacy compatibility.
    Animacy,
    /// Overlap of semantic-type strings.
    SemanticType,
    /// Case-insensitive exact surface match.
    ExactString,
    /// Relaxed head-lemma stem match.
    Stem,
    /// Syntactic-appositive compatibility (appos edge or comma-adjacent
    /// nominals).
    Appositive,
    /// Linear adjacency within the sentence.
    Adjacency,
    /// "Label: Value" construct between candidate and expression.
    KeyValue,
    /// Semantic coercion through the configured head-noun table.
    Coercion,
}

impl ScoringFunction {
    /// Human-readable label; also the registry key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ScoringFunction::Number => "number",
            ScoringFunction::Gender => "gender",
            ScoringFunction::Person => "person",
            ScoringFunction::Animacy => "animacy",
            ScoringFunction::SemanticType => "semantic-type",
            ScoringFunction::ExactString => "exact-string",
            ScoringFunction::Stem => "stem",
            ScoringFunction::Appositive => "appositive",
            ScoringFunction::Adjacency => "adjacency",
            ScoringFunction::KeyValue => "key-value",
            ScoringFunction::Coercion => "coercion",
        }
    }

    /// Parse from registry key.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        [
            ScoringFunction::Number,
            ScoringFunction::Gender,
            ScoringFunction::Person,
            ScoringFunction::Animacy,
            ScoringFunction::SemanticType,
            ScoringFunction::ExactString,
            ScoringFunction::Stem,
            ScoringFunction::Appositive,
            ScoringFunction::Adjacency,
            ScoringFunction::KeyValue,
            ScoringFunction::Coercion,
        ]
        .into_iter()
        .find(|f| f.as_str() == label.to_ascii_lowercase())
    }

    /// Does the agreement test hold between expression and candidate?
    #[must_use]
    pub fn agrees(
        &self,
        ctx: &ResolutionContext<'_>,
        expr: &SurfaceElement,
        cand: &SurfaceElement,
    ) -> bool {
        let doc = ctx.doc();
        match self {
            ScoringFunction::Number => number_of(expr).compatible(number_of(cand)),
            ScoringFunction::Gender => gender_of(expr).compatible(gender_of(cand)),
            ScoringFunction::Person => person_of(expr).compatible(person_of(cand)),
            ScoringFunction::Animacy => animacy_of(expr).compatible(animacy_of(cand)),
            ScoringFunction::SemanticType => {
                let cand_types = cand.sem_types();
                expr.sem_types().iter().any(|t| cand_types.contains(t))
            }
            ScoringFunction::ExactString => expr.text.eq_ignore_ascii_case(&cand.text),
            ScoringFunction::Stem => stem(&expr.lemma) == stem(&cand.lemma),
            ScoringFunction::Appositive => appositive_compatible(doc, expr, cand),
            ScoringFunction::Adjacency => adjacent(doc, expr, cand),
            ScoringFunction::KeyValue => key_value_pair(doc, expr, cand),
            ScoringFunction::Coercion => cand
                .sem_types()
                .iter()
                .any(|t| ctx.lexicon().coerces(&expr.lemma, t)),
        }
    }
}

impl std::fmt::Display for ScoringFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn appositive_compatible(doc: &Document, expr: &SurfaceElement, cand: &SurfaceElement) -> bool {
    if expr.sentence != cand.sentence {
        return false;
    }
    let appos_edge = doc
        .sentence_of(expr.id)
        .dependencies
        .iter()
        .any(|e| {
            e.kind() == DependencyKind::Appositive
                && ((e.governor == expr.id && e.dependent == cand.id)
                    || (e.governor == cand.id && e.dependent == expr.id))
        });
    if appos_edge {
        return true;
    }
    // Comma-adjacent nominals: "aspirin, a cyclooxygenase inhibitor".
    expr.is_nominal()
        && cand.is_nominal()
        && doc.text_between(expr.id, cand.id).trim() == ","
}

fn adjacent(doc: &Document, expr: &SurfaceElement, cand: &SurfaceElement) -> bool {
    if expr.sentence != cand.sentence {
        return false;
    }
    let sentence = doc.sentence_of(expr.id);
    let pos_a = sentence.elements.iter().position(|&e| e == expr.id);
    let pos_b = sentence.elements.iter().position(|&e| e == cand.id);
    match (pos_a, pos_b) {
        (Some(a), Some(b)) => a.abs_diff(b) == 1,
        _ => false,
    }
}

fn key_value_pair(doc: &Document, expr: &SurfaceElement, cand: &SurfaceElement) -> bool {
    if expr.sentence != cand.sentence {
        return false;
    }
    lexicon::KEY_VALUE_SEPARATOR.is_match(doc.text_between(expr.id, cand.id))
}

// =============================================================================
// Scorer and engine
// =============================================================================

/// One configured (function, weight, floor) triple of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorer {
    /// The agreement test
    pub function: ScoringFunction,
    /// Contribution when the test holds
    pub weight: i32,
    /// Contribution when it does not (default 0)
    #[serde(default)]
    pub floor: i32,
}

impl Scorer {
    /// A scorer with the default floor of 0.
    #[must_use]
    pub const fn new(function: ScoringFunction, weight: i32) -> Self {
        Self {
            function,
            weight,
            floor: 0,
        }
    }

    /// Override the disagreement floor.
    #[must_use]
    pub const fn with_floor(mut self, floor: i32) -> Self {
        self.floor = floor;
        self
    }
}

/// Score all candidates against the expression. Purely additive: each
/// function is evaluated independently and its weight or floor summed.
#[must_use]
pub fn score_candidates(
    ctx: &ResolutionContext<'_>,
    expr: &SurfaceElement,
    scorers: &[Scorer],
    candidates: &[SurfaceId],
) -> ScoreMap {
    let doc = ctx.doc();
    let mut scores = ScoreMap::new();
    for &cid in candidates {
        let cand = doc.element(cid);
        let total: i32 = scorers
            .iter()
            .map(|s| {
                if s.function.agrees(ctx, expr, cand) {
                    s.weight
                } else {
                    s.floor
                }
            })
            .sum();
        log::debug!("score {} -> {} = {}", expr.id, cid, total);
        scores.insert(cid, total);
    }
    scores
}

// =============================================================================
// Tests
// =============================================================================
