//! The resolution driver and its per-document context.
//!
//! One [`ResolutionContext`] exists per document per run: it carries the
//! document reference, the evolving chain registry, and the ontology
//! concept counts. Nothing is shared across documents, so documents can be
//! resolved on separate threads with separate contexts.
//!
//! The driver makes a single pass over surface elements in document order.
//! For each element and each configured coreference type (in order of first
//! appearance), the first strategy whose expression type recognizes the
//! element and whose expression filters all pass claims it for that type;
//! the claimed strategy's stages then run strictly in sequence, and an
//! empty candidate or score set at any stage ends processing for that
//! (expression, type) with no referent — no retry, no fallback to a later
//! strategy.

use crate::agreement::score_candidates;
use crate::coref::{CoreferenceChain, CoreferenceType, SurfaceElementChain};
use crate::document::{Document, SurfaceElement, SurfaceId};
use crate::filters::run_stages;
use crate::lexicon::Lexicon;
use crate::strategy::{Configuration, Strategy};
use std::collections::HashMap;

// =============================================================================
// ResolutionContext
// =============================================================================

/// Per-document resolution state. Built fresh for every document; never
/// shared.
#[derive(Debug)]
pub struct ResolutionContext<'d> {
    doc: &'d Document,
    lexicon: &'d Lexicon,
    chains: Vec<CoreferenceChain>,
    concept_counts: HashMap<String, usize>,
    next_chain_id: u64,
}

impl<'d> ResolutionContext<'d> {
    /// Create a context over a document, counting ontology concepts up
    /// front.
    #[must_use]
    pub fn new(doc: &'d Document, lexicon: &'d Lexicon) -> Self {
        let mut concept_counts: HashMap<String, usize> = HashMap::new();
        for el in doc.elements() {
            for concept in el.concepts() {
                *concept_counts.entry(concept.to_string()).or_insert(0) += 1;
            }
        }
        Self {
            doc,
            lexicon,
            chains: Vec::new(),
            concept_counts,
            next_chain_id: 0,
        }
    }

    /// The document under resolution.
    #[must_use]
    pub fn doc(&self) -> &'d Document {
        self.doc
    }

    /// The lexical overrides in effect.
    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        self.lexicon
    }

    /// Chains formed so far.
    #[must_use]
    pub fn chains(&self) -> &[CoreferenceChain] {
        &self.chains
    }

    /// Is the element a member of any chain formed so far?
    #[must_use]
    pub fn in_any_chain(&self, id: SurfaceId) -> bool {
        self.chains.iter().any(|c| c.contains(id))
    }

    /// Chains containing the element.
    pub fn chains_containing(&self, id: SurfaceId) -> impl Iterator<Item = &CoreferenceChain> {
        self.chains.iter().filter(move |c| c.contains(id))
    }

    /// Document-wide count of one ontology concept.
    #[must_use]
    pub fn concept_count(&self, concept: &str) -> usize {
        self.concept_counts.get(concept).copied().unwrap_or(0)
    }

    /// All concept counts. Iteration order is unspecified (HashMap); the
    /// freq-count salience tie-break inherits that, by design.
    #[must_use]
    pub fn concept_counts(&self) -> &HashMap<String, usize> {
        &self.concept_counts
    }

    /// Decide how a new link joins the chain set.
    #[must_use]
    pub fn chain_decision(&self, link: &SurfaceElementChain) -> ChainDecision {
        for (idx, chain) in self.chains.iter().enumerate() {
            if link.elements().iter().any(|&e| chain.contains(e)) {
                return ChainDecision::MergeInto(idx);
            }
        }
        ChainDecision::CreateNew
    }

    /// Apply a link to the chain registry according to [`Self::chain_decision`].
    pub fn merge_link(&mut self, link: &SurfaceElementChain) {
        match self.chain_decision(link) {
            ChainDecision::MergeInto(idx) => self.chains[idx].absorb(link),
            ChainDecision::CreateNew => {
                let id = self.next_chain_id;
                self.next_chain_id += 1;
                self.chains.push(CoreferenceChain::from_link(id, link));
            }
        }
    }

    /// Consume the context, yielding the merged chains.
    #[must_use]
    pub fn into_chains(self) -> Vec<CoreferenceChain> {
        self.chains
    }
}

/// How one resolution link joins the existing chain set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainDecision {
    /// Merge into the chain at this registry index.
    MergeInto(usize),
    /// Start a new chain.
    CreateNew,
}

// =============================================================================
// Resolver
// =============================================================================

/// The resolution driver: a configuration applied to documents.
#[derive(Debug, Clone)]
pub struct Resolver {
    config: Configuration,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Configuration::biomedical())
    }
}

impl Resolver {
    /// Create a resolver over a configuration.
    #[must_use]
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    /// The configuration in effect.
    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Resolve a document to per-expression links, in document order.
    #[must_use]
    pub fn resolve(&self, doc: &Document) -> Vec<SurfaceElementChain> {
        let mut ctx = ResolutionContext::new(doc, self.config.lexicon());
        self.resolve_with(&mut ctx)
    }

    /// Resolve a document and merge the links into coreference chains.
    #[must_use]
    pub fn resolve_to_chains(&self, doc: &Document) -> Vec<CoreferenceChain> {
        let mut ctx = ResolutionContext::new(doc, self.config.lexicon());
        let _links = self.resolve_with(&mut ctx);
        ctx.into_chains()
    }

    /// The driver loop over an externally owned context.
    pub fn resolve_with(&self, ctx: &mut ResolutionContext<'_>) -> Vec<SurfaceElementChain> {
        let doc = ctx.doc();
        let type_order = self.config.coref_type_order();
        let ids: Vec<SurfaceId> = doc.elements().map(|e| e.id).collect();
        let mut links = Vec::new();

        for &expr_id in &ids {
            let expr = doc.element(expr_id);
            for &coref_type in &type_order {
                let Some(strategy) = self.claim(ctx, coref_type, expr) else {
                    continue;
                };
                if let Some(link) = self.run_strategy(ctx, strategy, expr) {
                    log::debug!(
                        "resolved {} as {} -> {:?}",
                        expr_id,
                        strategy.coref_type,
                        link.referents
                    );
                    ctx.merge_link(&link);
                    links.push(link);
                }
            }
        }
        links
    }

    /// The first strategy of this coreference type whose expression type
    /// recognizes the element and whose gates all pass.
    fn claim(
        &self,
        ctx: &ResolutionContext<'_>,
        coref_type: CoreferenceType,
        expr: &SurfaceElement,
    ) -> Option<&Strategy> {
        self.config.strategies().iter().find(|s| {
            s.coref_type == coref_type
                && s.expr_type.recognize(ctx.doc(), expr, ctx.lexicon())
                && s.expression_filters
                    .iter()
                    .all(|f| f.allows(ctx, coref_type, s.expr_type, expr))
        })
    }

    /// Run one claimed strategy to a terminal state: `Some` referent set or
    /// `None` (unresolved; empty at some stage).
    fn run_strategy(
        &self,
        ctx: &ResolutionContext<'_>,
        strategy: &Strategy,
        expr: &SurfaceElement,
    ) -> Option<SurfaceElementChain> {
        let doc = ctx.doc();
        // Candidates seed from every other surface element; the stage
        // pipeline narrows direction, window, syntax, and semantics.
        let seed: Vec<SurfaceId> = doc
            .elements()
            .map(|e| e.id)
            .filter(|&id| id != expr.id)
            .collect();
        let candidates = run_stages(
            ctx,
            expr,
            strategy.coref_type,
            strategy.expr_type,
            &seed,
            &strategy.candidate_stages,
        );
        if candidates.is_empty() {
            return None;
        }
        let mut scores = score_candidates(ctx, expr, &strategy.scorers, &candidates);
        for post in &strategy.post_filters {
            scores = post.apply(ctx, expr, &scores);
            if scores.is_empty() {
                return None;
            }
        }
        Some(SurfaceElementChain::new(
            strategy.coref_type,
            strategy.expr_type,
            expr.id,
            scores.keys().copied().collect(),
        ))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::{SemItem, SemKind};
    use crate::span::{MultiSpan, Span};

    #[test]
    fn test_empty_document_resolves_to_nothing() {
        let doc = Document::new("");
        let resolver = Resolver::default();
        assert!(resolver.resolve(&doc).is_empty());
        assert!(resolver.resolve_to_chains(&doc).is_empty());
    }

    #[test]
    fn test_context_concept_counts() {
        let mut doc = Document::new("TP53 TP53 EGFR");
        let s = doc.add_sentence(Span::new(0, 14));
        for (a, b, concept) in [(0, 4, "PR:1"), (5, 9, "PR:1"), (10, 14, "PR:2")] {
            let id = doc
                .push_element(s, SurfaceElement::new(MultiSpan::single(a, b), "x", "x", "NN"))
                .unwrap();
            doc.attach_semantics(
                id,
                SemItem::new(SemKind::Entity, "Protein").with_concept(concept),
            )
            .unwrap();
        }
        let lexicon = Lexicon::default();
        let ctx = ResolutionContext::new(&doc, &lexicon);
        assert_eq!(ctx.concept_count("PR:1"), 2);
        assert_eq!(ctx.concept_count("PR:2"), 1);
        assert_eq!(ctx.concept_count("PR:3"), 0);
    }

    #[test]
    fn test_chain_decision_merge_vs_create() {
        let doc = Document::new("");
        let lexicon = Lexicon::default();
        let mut ctx = ResolutionContext::new(&doc, &lexicon);

        let link1 = SurfaceElementChain::new(
            CoreferenceType::Anaphora,
            crate::expression::ExpressionType::PersonalPronoun,
            SurfaceId(2),
            vec![SurfaceId(0)],
        );
        assert_eq!(ctx.chain_decision(&link1), ChainDecision::CreateNew);
        ctx.merge_link(&link1);

        // Shares the antecedent: merges.
        let link2 = SurfaceElementChain::new(
            CoreferenceType::Anaphora,
            crate::expression::ExpressionType::DefiniteNP,
            SurfaceId(5),
            vec![SurfaceId(0)],
        );
        assert_eq!(ctx.chain_decision(&link2), ChainDecision::MergeInto(0));
        ctx.merge_link(&link2);

        // Disjoint: new chain.
        let link3 = SurfaceElementChain::new(
            CoreferenceType::Anaphora,
            crate::expression::ExpressionType::PersonalPronoun,
            SurfaceId(9),
            vec![SurfaceId(7)],
        );
        assert_eq!(ctx.chain_decision(&link3), ChainDecision::CreateNew);
        ctx.merge_link(&link3);

        let chains = ctx.into_chains();
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].len(), 3);
        assert_eq!(chains[0].id, 0);
        assert_eq!(chains[1].id, 1);
    }

    #[test]
    fn test_strategy_lookup_is_exposed() {
        let resolver = Resolver::default();
        assert!(resolver
            .configuration()
            .lookup(
                CoreferenceType::Anaphora,
                crate::expression::ExpressionType::PersonalPronoun
            )
            .is_some());
    }
}
