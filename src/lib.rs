//! # anaphor
//!
//! Rule-driven coreference resolution for biomedical and clinical text.
//!
//! Given a syntactically and semantically annotated [`Document`], the
//! resolver determines which earlier or later mentions a pronoun, definite
//! noun phrase, or other referring expression corefers with, producing
//! per-expression links and merged coreference chains.
//!
//! - **Recognizers**: classify surface elements into referring-expression
//!   subtypes ([`ExpressionType`])
//! - **Filters**: gate expressions and prune candidates
//!   ([`ExpressionFilter`], [`CandidateFilter`])
//! - **Scoring**: weighted-vote agreement checks ([`ScoringFunction`])
//! - **Salience**: tie-breaking among equal scores ([`SalienceType`])
//! - **Strategies**: one recipe per (coreference type, expression type)
//!   pair ([`Strategy`], [`Configuration`])
//!
//! Parsing and tokenization are assumed supplied; this crate only consumes
//! annotations.
//!
//! ## Quick Start
//!
//! ```rust
//! use anaphor::{Document, Resolver, Span, SurfaceElement, SemItem, SemKind};
//!
//! // "TP53 is mutated. It drives tumor growth."
//! let mut doc = Document::new("TP53 is mutated. It drives tumor growth.");
//! let s0 = doc.add_sentence(Span::new(0, 16));
//! let s1 = doc.add_sentence(Span::new(17, 40));
//! let tp53 = doc
//!     .push_element(
//!         s0,
//!         SurfaceElement::new(Span::new(0, 4), "TP53", "tp53", "NN")
//!             .with_semantics(SemItem::new(SemKind::Entity, "Protein")),
//!     )
//!     .unwrap();
//! doc.push_element(s1, SurfaceElement::new(Span::new(17, 19), "It", "it", "PRP"))
//!     .unwrap();
//!
//! let resolver = Resolver::default();
//! let links = resolver.resolve(&doc);
//! assert_eq!(links.len(), 1);
//! assert_eq!(links[0].referents, vec![tp53]);
//! ```
//!
//! ## Design
//!
//! - **Per-document contexts**: all mutable state (chain registry, concept
//!   counts) lives in a [`ResolutionContext`] built per document; documents
//!   can be processed in parallel with no shared state.
//! - **Pure filters**: every filter returns a fresh collection; strategies
//!   compose them with explicit union/minus combinators.
//! - **Soft-fail refusal**: a filter invoked under an incompatible
//!   coreference type logs a warning and degrades instead of erroring.
//! - **Configure by name**: strategies can be built from string keys via
//!   the [`Registry`]; unknown keys fail at build time.

#![warn(missing_docs)]

mod agreement;
mod coref;
mod document;
mod error;
mod expression;
mod filters;
mod lexicon;
mod resolver;
mod salience;
mod semantics;
mod span;
mod strategy;

pub use agreement::{
    animacy_of, gender_of, number_of, person_of, score_candidates, stem, Scorer, ScoringFunction,
};
pub use coref::{
    ChainArgument, CoreferenceChain, CoreferenceType, SearchDirection, SurfaceElementChain,
};
pub use document::{
    DependencyEdge, DependencyKind, Document, ParseNode, ParseTree, Sentence, SurfaceElement,
    SurfaceId, SyntacticFlags,
};
pub use error::{Error, Result};
pub use expression::{cataphoric_pattern, is_pleonastic_it, ExpressionType};
pub use filters::{
    default_candidate_stages, run_stages, CandidateFilter, CandidateStage, Combinator,
    ExpressionFilter, PostScoringFilter, ScoreMap, WINDOW_ALL, WINDOW_SECTION,
};
pub use lexicon::{Animacy, Gender, Lexicon, Number, Person, PronounEntry};
pub use resolver::{ChainDecision, ResolutionContext, Resolver};
pub use salience::{select as select_salient, SalienceType};
pub use semantics::{SemItem, SemKind};
pub use span::{MultiSpan, Span};
pub use strategy::{Configuration, Registry, ScorerSpec, Strategy, StrategySpec};
