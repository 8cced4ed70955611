//! Semantic annotations attached to surface elements.
//!
//! Readers and upstream annotators attach zero or more [`SemItem`]s to a
//! surface element: named entities, predicates, relations, coreferential
//! expressions, and conjunction markers. Filters and scoring functions only
//! ever inspect these annotations; they never create them.

use serde::{Deserialize, Serialize};

/// Kind of semantic annotation carried by a surface element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemKind {
    /// Named entity (a protein, a drug, a disorder).
    Entity,
    /// Predicate (an event or state trigger).
    Predicate,
    /// Relation between other annotations.
    Relation,
    /// Coreferential expression (a mention awaiting or under resolution).
    Expression,
    /// Coordination marker joining conjuncts.
    Conjunction,
}

impl SemKind {
    /// Human-readable label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SemKind::Entity => "entity",
            SemKind::Predicate => "predicate",
            SemKind::Relation => "relation",
            SemKind::Expression => "expression",
            SemKind::Conjunction => "conjunction",
        }
    }

    /// Parse from a label string.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "entity" => Some(SemKind::Entity),
            "predicate" => Some(SemKind::Predicate),
            "relation" => Some(SemKind::Relation),
            "expression" => Some(SemKind::Expression),
            "conjunction" => Some(SemKind::Conjunction),
            _ => None,
        }
    }
}

impl std::fmt::Display for SemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One semantic annotation: a kind, a semantic-type string from the source
/// annotation scheme (e.g. "Protein", "Disorder", "Drug"), and an optional
/// ontology concept identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SemItem {
    /// Annotation kind
    pub kind: SemKind,
    /// Semantic type string from the annotation scheme
    pub sem_type: String,
    /// Ontology concept identifier, if linked
    pub concept: Option<String>,
}

impl SemItem {
    /// Create a new semantic item.
    #[must_use]
    pub fn new(kind: SemKind, sem_type: impl Into<String>) -> Self {
        Self {
            kind,
            sem_type: sem_type.into(),
            concept: None,
        }
    }

    /// Attach an ontology concept identifier.
    #[must_use]
    pub fn with_concept(mut self, concept: impl Into<String>) -> Self {
        self.concept = Some(concept.into());
        self
    }
}
