//! Coreference relation types and chains.
//!
//! A [`CoreferenceType`] fixes the search direction (which side of the
//! expression candidates may come from) and the two semantic roles used when
//! the final relation is materialized. A [`SurfaceElementChain`] carries one
//! resolution outcome from the driver to chain construction; a
//! [`CoreferenceChain`] is the merged, role-tagged result.

use crate::document::SurfaceId;
use crate::expression::ExpressionType;
use serde::{Deserialize, Serialize};

// =============================================================================
// Search direction and coreference type
// =============================================================================

/// Which side of the expression candidates are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchDirection {
    /// Candidates precede the expression
    Backward,
    /// Candidates follow the expression
    Forward,
    /// Candidates may be on either side
    Both,
}

/// Closed enumeration of coreference relation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoreferenceType {
    /// Backward-looking reference ("TP53 ... it")
    Anaphora,
    /// Forward-looking reference ("In its active form, the enzyme ...")
    Cataphora,
    /// Apposition ("aspirin, a cyclooxygenase inhibitor")
    Appositive,
    /// Predicate nominative ("aspirin is an NSAID")
    PredicateNominative,
    /// Hypernymic/ontological reference ("the drug" for a named compound)
    Ontological,
}

impl CoreferenceType {
    /// All types.
    pub const ALL: [CoreferenceType; 5] = [
        CoreferenceType::Anaphora,
        CoreferenceType::Cataphora,
        CoreferenceType::Appositive,
        CoreferenceType::PredicateNominative,
        CoreferenceType::Ontological,
    ];

    /// The search direction this relation type constrains candidates to.
    #[must_use]
    pub const fn search_direction(&self) -> SearchDirection {
        match self {
            CoreferenceType::Anaphora => SearchDirection::Backward,
            CoreferenceType::Cataphora => SearchDirection::Forward,
            CoreferenceType::Appositive
            | CoreferenceType::PredicateNominative
            | CoreferenceType::Ontological => SearchDirection::Both,
        }
    }

    /// Role names for (expression, referent) when the relation is
    /// materialized.
    #[must_use]
    pub const fn roles(&self) -> (&'static str, &'static str) {
        match self {
            CoreferenceType::Anaphora => ("Anaphor", "Antecedent"),
            CoreferenceType::Cataphora => ("Cataphor", "Postcedent"),
            CoreferenceType::Appositive
            | CoreferenceType::PredicateNominative
            | CoreferenceType::Ontological => ("Expression", "Referent"),
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CoreferenceType::Anaphora => "anaphora",
            CoreferenceType::Cataphora => "cataphora",
            CoreferenceType::Appositive => "appositive",
            CoreferenceType::PredicateNominative => "predicate-nominative",
            CoreferenceType::Ontological => "ontological",
        }
    }

    /// Parse from label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == label.to_ascii_lowercase())
    }
}

impl std::fmt::Display for CoreferenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Resolution outcome
// =============================================================================

/// One resolution outcome: which strategy resolved which expression to which
/// referent set. Transient; consumed by chain construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceElementChain {
    /// Coreference type of the strategy that produced this link
    pub coref_type: CoreferenceType,
    /// Expression type of the strategy that produced this link
    pub expr_type: ExpressionType,
    /// The resolved expression
    pub expression: SurfaceId,
    /// The final referent set (non-empty)
    pub referents: Vec<SurfaceId>,
}

impl SurfaceElementChain {
    /// Create a resolution link.
    #[must_use]
    pub fn new(
        coref_type: CoreferenceType,
        expr_type: ExpressionType,
        expression: SurfaceId,
        referents: Vec<SurfaceId>,
    ) -> Self {
        Self {
            coref_type,
            expr_type,
            expression,
            referents,
        }
    }

    /// All elements the link touches, expression first.
    #[must_use]
    pub fn elements(&self) -> Vec<SurfaceId> {
        let mut out = Vec::with_capacity(1 + self.referents.len());
        out.push(self.expression);
        out.extend_from_slice(&self.referents);
        out
    }
}

// =============================================================================
// Merged chains
// =============================================================================

/// One role-tagged member of a [`CoreferenceChain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainArgument {
    /// Semantic role ("Anaphor", "Antecedent", ...)
    pub role: String,
    /// The element filling the role
    pub element: SurfaceId,
}

/// A merged coreference chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreferenceChain {
    /// Chain identifier, unique within a document
    pub id: u64,
    /// Relation type the chain was seeded from
    pub coref_type: CoreferenceType,
    /// Role-tagged members, in insertion order
    pub arguments: Vec<ChainArgument>,
}

impl CoreferenceChain {
    /// Create a chain from one resolution link.
    #[must_use]
    pub fn from_link(id: u64, link: &SurfaceElementChain) -> Self {
        let (expr_role, ref_role) = link.coref_type.roles();
        let mut arguments = vec![ChainArgument {
            role: expr_role.to_string(),
            element: link.expression,
        }];
        arguments.extend(link.referents.iter().map(|&r| ChainArgument {
            role: ref_role.to_string(),
            element: r,
        }));
        Self {
            id,
            coref_type: link.coref_type,
            arguments,
        }
    }

    /// Does the chain contain an element, in any role?
    #[must_use]
    pub fn contains(&self, id: SurfaceId) -> bool {
        self.arguments.iter().any(|a| a.element == id)
    }

    /// Absorb a link's members, skipping elements already present.
    pub fn absorb(&mut self, link: &SurfaceElementChain) {
        let (expr_role, ref_role) = link.coref_type.roles();
        if !self.contains(link.expression) {
            self.arguments.push(ChainArgument {
                role: expr_role.to_string(),
                element: link.expression,
            });
        }
        for &r in &link.referents {
            if !self.contains(r) {
                self.arguments.push(ChainArgument {
                    role: ref_role.to_string(),
                    element: r,
                });
            }
        }
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    /// A chain with a single member.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.arguments.len() == 1
    }

    /// Member elements, in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = SurfaceId> + '_ {
        self.arguments.iter().map(|a| a.element)
    }
}

// =============================================================================
// Tests
// =============================================================================
