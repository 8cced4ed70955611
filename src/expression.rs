//! Coreferential expression types and their recognizers.
//!
//! Each [`ExpressionType`] is stateless classification metadata with a
//! deterministic recognizer over a surface element's lexical and syntactic
//! features. Pronoun subtypes check a closed lexical list intersected with a
//! maximality constraint (the pronoun must not be embedded in a larger NP).
//! NP subtypes compute the maximal span their determiner/adjective
//! dependencies subsume; a computation that does not grow the span yields
//! no expression at all, so a bare head never counts as its own determiner
//! phrase.
//!
//! Several types can be simultaneously true for one element ("its" is both
//! possessive and, lexically, a zero-article candidate). Disambiguation is
//! the resolver driver's strategy-order responsibility, not the
//! recognizer's.

use crate::document::{DependencyKind, Document, SurfaceElement};
use crate::lexicon::{
    self, Lexicon, ALL_DETERMINERS, DEFINITE_DETERMINERS, DEMONSTRATIVE_DETERMINERS,
    DEMONSTRATIVE_PRONOUNS, DISCOURSE_ADJECTIVES, DISTRIBUTIVE_DETERMINERS,
    DISTRIBUTIVE_PRONOUNS, INDEFINITE_DETERMINERS, INDEFINITE_PRONOUNS, PERSONAL_PRONOUNS,
    POSSESSIVE_PRONOUNS, RECIPROCAL_PRONOUNS, RELATIVE_PRONOUNS,
};
use crate::span::{MultiSpan, Span};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// =============================================================================
// ExpressionType
// =============================================================================

/// Closed enumeration of referring-expression subtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpressionType {
    /// he, she, it, they, ...
    PersonalPronoun,
    /// his, her, its, their, ...
    PossessivePronoun,
    /// this, that, these, those (pronominal use)
    DemonstrativePronoun,
    /// each, either, both, ...
    DistributivePronoun,
    /// each other, one another
    ReciprocalPronoun,
    /// who, which, that, ...
    RelativePronoun,
    /// one, some, others, ...
    IndefinitePronoun,
    /// "the protein"
    DefiniteNP,
    /// "a protein"
    IndefiniteNP,
    /// bare hypernym NP ("patients", "treatment")
    ZeroArticleNP,
    /// "this protein"
    DemonstrativeNP,
    /// "each sample"
    DistributiveNP,
}

impl ExpressionType {
    /// All subtypes, in recognition-priority order (pronouns first).
    pub const ALL: [ExpressionType; 12] = [
        ExpressionType::PersonalPronoun,
        ExpressionType::PossessivePronoun,
        ExpressionType::DemonstrativePronoun,
        ExpressionType::DistributivePronoun,
        ExpressionType::ReciprocalPronoun,
        ExpressionType::RelativePronoun,
        ExpressionType::IndefinitePronoun,
        ExpressionType::DefiniteNP,
        ExpressionType::IndefiniteNP,
        ExpressionType::DemonstrativeNP,
        ExpressionType::DistributiveNP,
        ExpressionType::ZeroArticleNP,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExpressionType::PersonalPronoun => "personal-pronoun",
            ExpressionType::PossessivePronoun => "possessive-pronoun",
            ExpressionType::DemonstrativePronoun => "demonstrative-pronoun",
            ExpressionType::DistributivePronoun => "distributive-pronoun",
            ExpressionType::ReciprocalPronoun => "reciprocal-pronoun",
            ExpressionType::RelativePronoun => "relative-pronoun",
            ExpressionType::IndefinitePronoun => "indefinite-pronoun",
            ExpressionType::DefiniteNP => "definite-np",
            ExpressionType::IndefiniteNP => "indefinite-np",
            ExpressionType::ZeroArticleNP => "zero-article-np",
            ExpressionType::DemonstrativeNP => "demonstrative-np",
            ExpressionType::DistributiveNP => "distributive-np",
        }
    }

    /// Parse from label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == label.to_ascii_lowercase())
    }

    /// Is this a pronoun subtype?
    #[must_use]
    pub const fn is_pronominal(&self) -> bool {
        matches!(
            self,
            ExpressionType::PersonalPronoun
                | ExpressionType::PossessivePronoun
                | ExpressionType::DemonstrativePronoun
                | ExpressionType::DistributivePronoun
                | ExpressionType::ReciprocalPronoun
                | ExpressionType::RelativePronoun
                | ExpressionType::IndefinitePronoun
        )
    }

    /// Is this a full-NP subtype (the nominal-types closed set consulted by
    /// the anaphoricity gate)?
    #[must_use]
    pub const fn is_nominal_phrase(&self) -> bool {
        matches!(
            self,
            ExpressionType::DefiniteNP
                | ExpressionType::IndefiniteNP
                | ExpressionType::ZeroArticleNP
                | ExpressionType::DemonstrativeNP
                | ExpressionType::DistributiveNP
        )
    }

    /// Does the recognizer accept this surface element?
    #[must_use]
    pub fn recognize(&self, doc: &Document, el: &SurfaceElement, lex: &Lexicon) -> bool {
        match self {
            ExpressionType::PersonalPronoun => {
                in_list(el, &PERSONAL_PRONOUNS) && is_maximal(doc, el)
            }
            ExpressionType::PossessivePronoun => in_list(el, &POSSESSIVE_PRONOUNS),
            ExpressionType::DemonstrativePronoun => {
                in_list(el, &DEMONSTRATIVE_PRONOUNS) && is_maximal(doc, el) && !is_embedded(doc, el)
            }
            ExpressionType::DistributivePronoun => {
                in_list(el, &DISTRIBUTIVE_PRONOUNS) && is_maximal(doc, el) && !is_embedded(doc, el)
            }
            ExpressionType::ReciprocalPronoun => {
                RECIPROCAL_PRONOUNS.contains(el.text.to_ascii_lowercase().as_str())
            }
            ExpressionType::RelativePronoun => {
                in_list(el, &RELATIVE_PRONOUNS) && el.is_pronominal()
            }
            ExpressionType::IndefinitePronoun => {
                in_list(el, &INDEFINITE_PRONOUNS) && is_maximal(doc, el) && !is_embedded(doc, el)
            }
            ExpressionType::DefiniteNP
            | ExpressionType::IndefiniteNP
            | ExpressionType::DemonstrativeNP
            | ExpressionType::DistributiveNP => self.np_span(doc, el).is_some(),
            ExpressionType::ZeroArticleNP => recognize_zero_article(doc, el, lex),
        }
    }

    /// For NP subtypes: the maximal span the subtype's determiner/adjective
    /// dependencies subsume, or `None` when the element does not qualify.
    ///
    /// Returns `None` rather than a trivial match when the computation does
    /// not grow the span beyond the starting element's own head span.
    #[must_use]
    pub fn np_span(&self, doc: &Document, el: &SurfaceElement) -> Option<MultiSpan> {
        let determiners: &HashSet<&str> = match self {
            ExpressionType::DefiniteNP => &DEFINITE_DETERMINERS,
            ExpressionType::IndefiniteNP => &INDEFINITE_DETERMINERS,
            ExpressionType::DemonstrativeNP => &DEMONSTRATIVE_DETERMINERS,
            ExpressionType::DistributiveNP => &DISTRIBUTIVE_DETERMINERS,
            _ => return None,
        };
        if !el.is_nominal() || el.is_pronominal() {
            return None;
        }
        maximal_np_span(doc, el, determiners)
    }
}

impl std::fmt::Display for ExpressionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Recognizer internals
// =============================================================================

fn in_list(el: &SurfaceElement, list: &HashSet<&str>) -> bool {
    list.contains(el.lemma.to_ascii_lowercase().as_str())
        || list.contains(el.text.to_ascii_lowercase().as_str())
}

/// Maximal, non-embedded instance: nothing NP-internal hangs below it.
fn is_maximal(doc: &Document, el: &SurfaceElement) -> bool {
    !doc.dependents_of(el.id)
        .any(|e| e.kind() == DependencyKind::NpInternal)
}

/// Embedded instance: the element itself functions as a determiner or
/// modifier of a larger NP ("this" in "this protein").
fn is_embedded(doc: &Document, el: &SurfaceElement) -> bool {
    doc.governors_of(el.id)
        .any(|e| e.kind() == DependencyKind::NpInternal)
}

/// Compute the maximal determiner-phrase span for `el`.
///
/// The dependency route unions the element's span with all its
/// determiner/adjective dependents, provided at least one determiner
/// dependent's lemma is in `determiners`; a union that equals the original
/// span yields `None`. With no such dependencies, the lexical-prefix
/// fallback accepts a chunk whose text starts with a listed determiner and
/// continues past it.
fn maximal_np_span(
    doc: &Document,
    el: &SurfaceElement,
    determiners: &HashSet<&str>,
) -> Option<MultiSpan> {
    let mut det_match = false;
    let mut parts: Vec<Span> = el.spans.parts().to_vec();
    for edge in doc.dependents_of(el.id) {
        let label = edge.label.to_ascii_lowercase();
        if label != "det" && label != "amod" {
            continue;
        }
        let dep = doc.element(edge.dependent);
        if label == "det" && determiners.contains(dep.lemma.to_ascii_lowercase().as_str()) {
            det_match = true;
        }
        parts.extend_from_slice(dep.spans.parts());
    }
    if det_match {
        let union = MultiSpan::from_parts(parts).ok()?;
        if union == el.spans {
            return None;
        }
        return Some(union);
    }

    // Lexical-prefix fallback for chunk-style elements that already include
    // their determiner.
    let lower = el.text.to_ascii_lowercase();
    for det in determiners {
        if let Some(rest) = lower.strip_prefix(det) {
            if let Some(rest) = rest.strip_prefix(' ') {
                if !rest.trim().is_empty() {
                    return Some(el.spans.clone());
                }
            }
        }
    }
    None
}

fn recognize_zero_article(doc: &Document, el: &SurfaceElement, lex: &Lexicon) -> bool {
    if !el.is_nominal() || el.is_pronominal() {
        return false;
    }
    // Negative condition: no determiner or discourse adjective, attached or
    // in the surface prefix.
    for edge in doc.dependents_of(el.id) {
        let label = edge.label.to_ascii_lowercase();
        if label != "det" && label != "amod" {
            continue;
        }
        let dep_lemma = doc.element(edge.dependent).lemma.to_ascii_lowercase();
        if ALL_DETERMINERS.contains(dep_lemma.as_str())
            || DISCOURSE_ADJECTIVES.contains(dep_lemma.as_str())
        {
            return false;
        }
    }
    let lower = el.text.to_ascii_lowercase();
    let first_word = lower.split_whitespace().next().unwrap_or("");
    if ALL_DETERMINERS.contains(first_word) || DISCOURSE_ADJECTIVES.contains(first_word) {
        return false;
    }
    // Positive condition: the head must be a licensed hypernym.
    lex.is_hypernym(&el.lemma)
}

/// Cataphoric pattern: a pronoun preceding every nominal of its sentence,
/// with at least one nominal following ("In its active form, the enzyme
/// ...").
#[must_use]
pub fn cataphoric_pattern(doc: &Document, el: &SurfaceElement) -> bool {
    if !el.is_pronominal() {
        return false;
    }
    let sentence = doc.sentence_of(el.id);
    let mut has_following = false;
    for &other in &sentence.elements {
        if other == el.id {
            continue;
        }
        let o = doc.element(other);
        if !o.is_nominal() || o.is_pronominal() {
            continue;
        }
        if o.spans.end() <= el.spans.start() {
            return false;
        }
        if o.spans.start() >= el.spans.end() {
            has_following = true;
        }
    }
    has_following
}

/// Pleonastic "it": an expletive dependency when the parser marks one, else
/// the surface pattern over the remainder of the sentence.
#[must_use]
pub fn is_pleonastic_it(doc: &Document, el: &SurfaceElement) -> bool {
    if el.lemma.to_ascii_lowercase() != "it" {
        return false;
    }
    if doc
        .governors_of(el.id)
        .any(|e| e.label.eq_ignore_ascii_case("expl"))
    {
        return true;
    }
    let sentence = doc.sentence_of(el.id);
    let tail = Span::new(el.spans.start(), sentence.span.end);
    lexicon::PLEONASTIC_IT.is_match(doc.slice(&tail))
}

// =============================================================================
// Tests
// =============================================================================
