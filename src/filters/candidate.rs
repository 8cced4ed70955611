//! Candidate pruning filters and their composition.
//!
//! Each filter maps a candidate list to a (usually smaller) list without
//! mutating its input. Strategies compose filters through explicit
//! [`Combinator`]s: `Refine` feeds the running set into the next filter,
//! `Union` and `Minus` run the filter over the original seed and combine
//! set-wise. The combination is not commutative; the default composition
//! (semantic-class ∪ noun-phrase) ∖ verb-phrase depends on exactly this
//! ordering.

use crate::coref::{CoreferenceType, SearchDirection};
use crate::document::{DependencyEdge, DependencyKind, SurfaceElement, SurfaceId};
use crate::expression::ExpressionType;
use crate::lexicon;
use crate::resolver::ResolutionContext;
use crate::semantics::SemKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Window sentinel: no window restriction.
pub const WINDOW_ALL: i32 = -1;
/// Window sentinel: candidates must share the expression's section.
pub const WINDOW_SECTION: i32 = -2;

// =============================================================================
// CandidateFilter
// =============================================================================

/// One pruning rule over the candidate set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CandidateFilter {
    /// Keep candidates strictly before the expression; refuses under
    /// forward-only search.
    PriorDiscourse,
    /// Keep candidates strictly after the expression; refuses under
    /// backward-only search.
    SubsequentDiscourse,
    /// Keep candidates within a sentence window (`k >= 0`), the same
    /// section ([`WINDOW_SECTION`]), or anywhere ([`WINDOW_ALL`]). Always
    /// excludes span-overlapping or identical candidates.
    WindowSize(i32),
    /// Exclude candidates directly linked to the expression by a short
    /// dependency path. Refuses for appositive-flavored coreference types,
    /// relative pronouns, and reflexives, where linkage is expected.
    SyntaxBased,
    /// Keep candidates carrying a semantic item of one of these kinds.
    SemanticClass(Vec<SemKind>),
    /// Keep candidates carrying one of these semantic-type strings.
    SemanticType(Vec<String>),
    /// Keep nominal candidates.
    NounPhrase,
    /// Keep verbal candidates.
    VerbPhrase,
    /// Keep same-sentence, non-overlapping candidates; refuses outside
    /// bidirectional search.
    SameSentence,
    /// Drop expression-typed candidates that belong to no chain yet.
    SingletonMention,
    /// The hard-coded (semantic-class ∪ noun-phrase) ∖ verb-phrase
    /// composite.
    Default,
}

impl CandidateFilter {
    /// Human-readable label; also the registry key (parameters excluded).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateFilter::PriorDiscourse => "prior-discourse",
            CandidateFilter::SubsequentDiscourse => "subsequent-discourse",
            CandidateFilter::WindowSize(_) => "window",
            CandidateFilter::SyntaxBased => "syntax",
            CandidateFilter::SemanticClass(_) => "semantic-class",
            CandidateFilter::SemanticType(_) => "semantic-type",
            CandidateFilter::NounPhrase => "noun-phrase",
            CandidateFilter::VerbPhrase => "verb-phrase",
            CandidateFilter::SameSentence => "same-sentence",
            CandidateFilter::SingletonMention => "singleton-mention",
            CandidateFilter::Default => "default",
        }
    }

    /// Apply the filter. The input is never mutated; the returned list is a
    /// fresh subset (or, on refusal by the syntax filter, a fresh copy).
    #[must_use]
    pub fn filter(
        &self,
        ctx: &ResolutionContext<'_>,
        expr: &SurfaceElement,
        coref_type: CoreferenceType,
        expr_type: ExpressionType,
        candidates: &[SurfaceId],
    ) -> Vec<SurfaceId> {
        if candidates.is_empty() {
            return Vec::new();
        }
        let doc = ctx.doc();
        let direction = coref_type.search_direction();
        match self {
            CandidateFilter::PriorDiscourse => {
                if direction == SearchDirection::Forward {
                    log::warn!(
                        "prior-discourse filter refused under {coref_type} (forward search)"
                    );
                    return Vec::new();
                }
                candidates
                    .iter()
                    .copied()
                    .filter(|&c| doc.element(c).spans.end() <= expr.spans.start())
                    .collect()
            }
            CandidateFilter::SubsequentDiscourse => {
                if direction == SearchDirection::Backward {
                    log::warn!(
                        "subsequent-discourse filter refused under {coref_type} (backward search)"
                    );
                    return Vec::new();
                }
                candidates
                    .iter()
                    .copied()
                    .filter(|&c| doc.element(c).spans.start() >= expr.spans.end())
                    .collect()
            }
            CandidateFilter::WindowSize(window) => {
                let window = *window;
                if window == WINDOW_SECTION && !doc.has_sections() {
                    log::warn!("section window requested but document has no sections");
                    return candidates.to_vec();
                }
                if window < 0 && window != WINDOW_ALL && window != WINDOW_SECTION {
                    log::warn!("unknown window sentinel {window}; treating as unrestricted");
                }
                candidates
                    .iter()
                    .copied()
                    .filter(|&c| {
                        let cand = doc.element(c);
                        if cand.spans == expr.spans || cand.spans.overlaps(&expr.spans) {
                            return false;
                        }
                        if window == WINDOW_SECTION {
                            let es = doc.section_of(&expr.span());
                            let cs = doc.section_of(&cand.span());
                            return es.is_some() && es == cs;
                        }
                        if window >= 0 {
                            return doc.sentence_distance(expr.id, c) <= window as usize;
                        }
                        true
                    })
                    .collect()
            }
            CandidateFilter::SyntaxBased => {
                if matches!(
                    coref_type,
                    CoreferenceType::Appositive
                        | CoreferenceType::PredicateNominative
                        | CoreferenceType::Ontological
                ) {
                    log::warn!("syntax filter refused under {coref_type}; passing through");
                    return candidates.to_vec();
                }
                if expr_type == ExpressionType::RelativePronoun {
                    log::warn!("syntax filter refused for relative pronouns; passing through");
                    return candidates.to_vec();
                }
                if lexicon::is_reflexive(&expr.lemma) {
                    log::warn!("syntax filter refused for reflexive pronouns; passing through");
                    return candidates.to_vec();
                }
                candidates
                    .iter()
                    .copied()
                    .filter(|&c| {
                        match doc.dependency_path(expr.id, c, 2) {
                            Some(path) => !syntactically_linked(&path),
                            None => true,
                        }
                    })
                    .collect()
            }
            CandidateFilter::SemanticClass(kinds) => candidates
                .iter()
                .copied()
                .filter(|&c| {
                    let cand = doc.element(c);
                    if is_relative_pronoun(ctx, cand) {
                        return false;
                    }
                    kinds.iter().any(|&k| cand.has_kind(k))
                })
                .collect(),
            CandidateFilter::SemanticType(types) => candidates
                .iter()
                .copied()
                .filter(|&c| {
                    let cand = doc.element(c);
                    if is_relative_pronoun(ctx, cand) {
                        return false;
                    }
                    cand.sem_types().iter().any(|t| types.iter().any(|x| x == t))
                })
                .collect(),
            CandidateFilter::NounPhrase => candidates
                .iter()
                .copied()
                .filter(|&c| doc.element(c).is_nominal())
                .collect(),
            CandidateFilter::VerbPhrase => candidates
                .iter()
                .copied()
                .filter(|&c| doc.element(c).is_verbal())
                .collect(),
            CandidateFilter::SameSentence => {
                if direction != SearchDirection::Both {
                    log::warn!("same-sentence filter refused under {coref_type}");
                    return Vec::new();
                }
                candidates
                    .iter()
                    .copied()
                    .filter(|&c| {
                        let cand = doc.element(c);
                        cand.sentence == expr.sentence && !cand.spans.overlaps(&expr.spans)
                    })
                    .collect()
            }
            CandidateFilter::SingletonMention => candidates
                .iter()
                .copied()
                .filter(|&c| {
                    let cand = doc.element(c);
                    !cand.has_kind(SemKind::Expression) || ctx.in_any_chain(c)
                })
                .collect(),
            CandidateFilter::Default => {
                let class = CandidateFilter::SemanticClass(vec![SemKind::Entity, SemKind::Expression])
                    .filter(ctx, expr, coref_type, expr_type, candidates);
                let np = CandidateFilter::NounPhrase
                    .filter(ctx, expr, coref_type, expr_type, candidates);
                let vp = CandidateFilter::VerbPhrase
                    .filter(ctx, expr, coref_type, expr_type, candidates);
                minus(&union(&class, &np), &vp)
            }
        }
    }
}

fn is_relative_pronoun(ctx: &ResolutionContext<'_>, el: &SurfaceElement) -> bool {
    ExpressionType::RelativePronoun.recognize(ctx.doc(), el, ctx.lexicon())
}

/// Is this short dependency path a direct syntactic link?
///
/// A path through an appositive edge is never a link (apposition is handled
/// by its own coreference type).
fn syntactically_linked(path: &[&DependencyEdge]) -> bool {
    let kinds: Vec<DependencyKind> = path.iter().map(|e| e.kind()).collect();
    if kinds.contains(&DependencyKind::Appositive) {
        return false;
    }
    match kinds.len() {
        1 => kinds[0].is_linking(),
        2 => {
            let has = |k: DependencyKind| kinds.contains(&k);
            // Verbal indicator: subject on one edge, object/prep on the other.
            let verbal = has(DependencyKind::Subject)
                && (has(DependencyKind::Object) || has(DependencyKind::Prep));
            // Nominal indicator: two NP-internal/prep edges.
            let nominal = kinds
                .iter()
                .all(|k| matches!(*k, DependencyKind::NpInternal | DependencyKind::Prep));
            let short = kinds.iter().all(DependencyKind::is_linking);
            verbal || nominal || short
        }
        _ => false,
    }
}

// =============================================================================
// Composition
// =============================================================================

/// How a stage's output joins the running candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combinator {
    /// Run the filter over the running set (sequential intersection).
    Refine,
    /// Run the filter over the original seed; union into the running set.
    Union,
    /// Run the filter over the original seed; subtract from the running set.
    Minus,
}

/// One stage of a strategy's candidate pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateStage {
    /// The filter to run
    pub filter: CandidateFilter,
    /// How its output joins the running set
    pub combinator: Combinator,
}

impl CandidateStage {
    /// A refining stage (the common case).
    #[must_use]
    pub fn refine(filter: CandidateFilter) -> Self {
        Self {
            filter,
            combinator: Combinator::Refine,
        }
    }
}

/// Run a strategy's candidate stages over the seeded set.
#[must_use]
pub fn run_stages(
    ctx: &ResolutionContext<'_>,
    expr: &SurfaceElement,
    coref_type: CoreferenceType,
    expr_type: ExpressionType,
    seed: &[SurfaceId],
    stages: &[CandidateStage],
) -> Vec<SurfaceId> {
    let mut current: Vec<SurfaceId> = seed.to_vec();
    for stage in stages {
        match stage.combinator {
            Combinator::Refine => {
                current = stage
                    .filter
                    .filter(ctx, expr, coref_type, expr_type, &current);
            }
            Combinator::Union => {
                let add = stage.filter.filter(ctx, expr, coref_type, expr_type, seed);
                current = union(&current, &add);
            }
            Combinator::Minus => {
                let sub = stage.filter.filter(ctx, expr, coref_type, expr_type, seed);
                current = minus(&current, &sub);
            }
        }
    }
    current
}

/// Order-preserving set union (document order; ids order elements).
fn union(a: &[SurfaceId], b: &[SurfaceId]) -> Vec<SurfaceId> {
    let set: BTreeSet<SurfaceId> = a.iter().chain(b.iter()).copied().collect();
    set.into_iter().collect()
}

/// Order-preserving set difference.
fn minus(a: &[SurfaceId], b: &[SurfaceId]) -> Vec<SurfaceId> {
    let drop: BTreeSet<SurfaceId> = b.iter().copied().collect();
    a.iter().copied().filter(|id| !drop.contains(id)).collect()
}

/// The default composite as an explicit stage list:
/// (semantic-class ∪ noun-phrase) ∖ verb-phrase.
#[must_use]
pub fn default_candidate_stages() -> Vec<CandidateStage> {
    vec![
        CandidateStage::refine(CandidateFilter::SemanticClass(vec![
            SemKind::Entity,
            SemKind::Expression,
        ])),
        CandidateStage {
            filter: CandidateFilter::NounPhrase,
            combinator: Combinator::Union,
        },
        CandidateStage {
            filter: CandidateFilter::VerbPhrase,
            combinator: Combinator::Minus,
        },
    ]
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::semantics::SemItem;
    use crate::span::{MultiSpan, Span};
    use crate::strategy::Configuration;

    /// "TP53 regulates apoptosis. The protein binds DNA. It is mutated."
    fn fixture() -> (Document, Vec<SurfaceId>) {
        let text = "TP53 regulates apoptosis. The protein binds DNA. It is mutated.";
        let mut doc = Document::new(text);
        let s0 = doc.add_sentence(Span::new(0, 25));
        let s1 = doc.add_sentence(Span::new(26, 48));
        let s2 = doc.add_sentence(Span::new(49, 63));
        let mut ids = Vec::new();
        ids.push(
            doc.push_element(
                s0,
                SurfaceElement::new(MultiSpan::single(0, 4), "TP53", "tp53", "NN")
                    .with_semantics(SemItem::new(SemKind::Entity, "Protein")),
            )
            .unwrap(),
        );
        ids.push(
            doc.push_element(
                s0,
                SurfaceElement::new(MultiSpan::single(5, 14), "regulates", "regulate", "VBZ"),
            )
            .unwrap(),
        );
        ids.push(
            doc.push_element(
                s0,
                SurfaceElement::new(MultiSpan::single(15, 24), "apoptosis", "apoptosis", "NN")
                    .with_semantics(SemItem::new(SemKind::Entity, "Process")),
            )
            .unwrap(),
        );
        ids.push(
            doc.push_element(
                s1,
                SurfaceElement::new(MultiSpan::single(26, 37), "The protein", "protein", "NN")
                    .nominal()
                    .with_semantics(SemItem::new(SemKind::Expression, "DefiniteNP")),
            )
            .unwrap(),
        );
        ids.push(
            doc.push_element(
                s1,
                SurfaceElement::new(MultiSpan::single(38, 43), "binds", "bind", "VBZ"),
            )
            .unwrap(),
        );
        ids.push(
            doc.push_element(
                s1,
                SurfaceElement::new(MultiSpan::single(44, 47), "DNA", "dna", "NN")
                    .with_semantics(SemItem::new(SemKind::Entity, "Nucleotide")),
            )
            .unwrap(),
        );
        ids.push(
            doc.push_element(
                s2,
                SurfaceElement::new(MultiSpan::single(49, 51), "It", "it", "PRP")
                    .with_semantics(SemItem::new(SemKind::Expression, "PersonalPronoun")),
            )
            .unwrap(),
        );
        (doc, ids)
    }

    fn all_but(ids: &[SurfaceId], expr: SurfaceId) -> Vec<SurfaceId> {
        ids.iter().copied().filter(|&i| i != expr).collect()
    }

    #[test]
    fn test_prior_discourse_keeps_left_only() {
        let (doc, ids) = fixture();
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let it = doc.element(ids[6]);
        let candidates = all_but(&ids, ids[6]);

        let out = CandidateFilter::PriorDiscourse.filter(
            &ctx,
            it,
            CoreferenceType::Anaphora,
            ExpressionType::PersonalPronoun,
            &candidates,
        );
        assert_eq!(out, candidates, "everything precedes the final pronoun");

        // Idempotent.
        let twice = CandidateFilter::PriorDiscourse.filter(
            &ctx,
            it,
            CoreferenceType::Anaphora,
            ExpressionType::PersonalPronoun,
            &out,
        );
        assert_eq!(out, twice);
    }

    #[test]
    fn test_prior_discourse_refuses_forward_search() {
        let (doc, ids) = fixture();
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let it = doc.element(ids[6]);
        let candidates = all_but(&ids, ids[6]);

        let out = CandidateFilter::PriorDiscourse.filter(
            &ctx,
            it,
            CoreferenceType::Cataphora,
            ExpressionType::PersonalPronoun,
            &candidates,
        );
        assert!(out.is_empty(), "refusal contributes nothing");
    }

    #[test]
    fn test_window_monotone_and_excludes_overlap() {
        let (doc, ids) = fixture();
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let it = doc.element(ids[6]);
        let candidates = all_but(&ids, ids[6]);

        let w0 = CandidateFilter::WindowSize(0).filter(
            &ctx,
            it,
            CoreferenceType::Anaphora,
            ExpressionType::PersonalPronoun,
            &candidates,
        );
        let w1 = CandidateFilter::WindowSize(1).filter(
            &ctx,
            it,
            CoreferenceType::Anaphora,
            ExpressionType::PersonalPronoun,
            &candidates,
        );
        let all = CandidateFilter::WindowSize(WINDOW_ALL).filter(
            &ctx,
            it,
            CoreferenceType::Anaphora,
            ExpressionType::PersonalPronoun,
            &candidates,
        );
        assert!(w0.iter().all(|id| w1.contains(id)));
        assert!(w1.iter().all(|id| all.contains(id)));
        assert!(w0.is_empty(), "nothing shares the pronoun's sentence");
        assert_eq!(w1.len(), 3, "sentence 1 elements fall inside window 1");
        assert_eq!(all.len(), candidates.len());
    }

    #[test]
    fn test_default_composite_union_then_minus() {
        // Candidates: A nominal entity, B verbal, C nominal and verbal.
        let text = "kinase phosphorylates signaling";
        let mut doc = Document::new(text);
        let s = doc.add_sentence(Span::new(0, text.len()));
        let a = doc
            .push_element(
                s,
                SurfaceElement::new(MultiSpan::single(0, 6), "kinase", "kinase", "NN")
                    .with_semantics(SemItem::new(SemKind::Entity, "Protein")),
            )
            .unwrap();
        let b = doc
            .push_element(
                s,
                SurfaceElement::new(
                    MultiSpan::single(7, 21),
                    "phosphorylates",
                    "phosphorylate",
                    "VBZ",
                ),
            )
            .unwrap();
        let c = doc
            .push_element(
                s,
                SurfaceElement::new(MultiSpan::single(22, 31), "signaling", "signaling", "NN")
                    .verbal(),
            )
            .unwrap();
        let expr_id = doc
            .push_element(s, SurfaceElement::new(MultiSpan::single(0, 0), "it", "it", "PRP"))
            .unwrap();

        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let expr = doc.element(expr_id);
        let candidates = vec![a, b, c];

        let out = CandidateFilter::Default.filter(
            &ctx,
            expr,
            CoreferenceType::Anaphora,
            ExpressionType::PersonalPronoun,
            &candidates,
        );
        // (class {A} ∪ np {A, C}) ∖ vp {B, C} = {A}
        assert_eq!(out, vec![a]);
    }

    #[test]
    fn test_same_sentence_refusal_under_anaphora() {
        let (doc, ids) = fixture();
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let it = doc.element(ids[6]);
        let candidates = all_but(&ids, ids[6]);

        let out = CandidateFilter::SameSentence.filter(
            &ctx,
            it,
            CoreferenceType::Anaphora,
            ExpressionType::PersonalPronoun,
            &candidates,
        );
        assert!(out.is_empty());

        let ok = CandidateFilter::SameSentence.filter(
            &ctx,
            doc.element(ids[3]),
            CoreferenceType::Appositive,
            ExpressionType::DefiniteNP,
            &candidates,
        );
        assert!(ok.iter().all(|&c| doc.element(c).sentence == 1));
    }

    #[test]
    fn test_syntax_filter_excludes_linked_subject() {
        // "TP53 regulates apoptosis": apoptosis (dobj) must not corefer
        // with TP53 (nsubj) of the same verb.
        let (mut doc, ids) = fixture();
        doc.add_dependency(0, DependencyEdge::new("nsubj", ids[1], ids[0]))
            .unwrap();
        doc.add_dependency(0, DependencyEdge::new("dobj", ids[1], ids[2]))
            .unwrap();
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let apoptosis = doc.element(ids[2]);

        let out = CandidateFilter::SyntaxBased.filter(
            &ctx,
            apoptosis,
            CoreferenceType::Anaphora,
            ExpressionType::ZeroArticleNP,
            &[ids[0]],
        );
        assert!(out.is_empty(), "verbal indicator path marks the pair linked");
    }

    #[test]
    fn test_syntax_filter_appositive_carveout() {
        let (mut doc, ids) = fixture();
        doc.add_dependency(0, DependencyEdge::new("appos", ids[0], ids[2]))
            .unwrap();
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let apoptosis = doc.element(ids[2]);

        let out = CandidateFilter::SyntaxBased.filter(
            &ctx,
            apoptosis,
            CoreferenceType::Anaphora,
            ExpressionType::ZeroArticleNP,
            &[ids[0]],
        );
        assert_eq!(out, vec![ids[0]], "appositive edges are not linkage");
    }

    #[test]
    fn test_syntax_filter_refuses_for_appositive_type() {
        let (doc, ids) = fixture();
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let protein = doc.element(ids[3]);
        let candidates = all_but(&ids, ids[3]);

        let out = CandidateFilter::SyntaxBased.filter(
            &ctx,
            protein,
            CoreferenceType::Appositive,
            ExpressionType::DefiniteNP,
            &candidates,
        );
        assert_eq!(out, candidates, "refusal passes everything through");
    }

    #[test]
    fn test_singleton_filter() {
        let (doc, ids) = fixture();
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let it = doc.element(ids[6]);

        // ids[3] carries Expression semantics and is in no chain: dropped.
        // ids[0] has only Entity semantics: passes.
        let out = CandidateFilter::SingletonMention.filter(
            &ctx,
            it,
            CoreferenceType::Anaphora,
            ExpressionType::PersonalPronoun,
            &[ids[0], ids[3]],
        );
        assert_eq!(out, vec![ids[0]]);
    }

    #[test]
    fn test_empty_input_short_circuits() {
        let (doc, ids) = fixture();
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let it = doc.element(ids[6]);
        let out = CandidateFilter::WindowSize(3).filter(
            &ctx,
            it,
            CoreferenceType::Anaphora,
            ExpressionType::PersonalPronoun,
            &[],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_default_stage_list_matches_composite() {
        // Over an unrefined seed, the explicit stage list and the single
        // composite filter compute the same set.
        let (doc, ids) = fixture();
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let it = doc.element(ids[6]);
        let seed = all_but(&ids, ids[6]);

        let via_stages = run_stages(
            &ctx,
            it,
            CoreferenceType::Anaphora,
            ExpressionType::PersonalPronoun,
            &seed,
            &default_candidate_stages(),
        );
        let via_composite = CandidateFilter::Default.filter(
            &ctx,
            it,
            CoreferenceType::Anaphora,
            ExpressionType::PersonalPronoun,
            &seed,
        );
        assert_eq!(via_stages, via_composite);
    }

    #[test]
    fn test_run_stages_refine_then_union_minus() {
        let (doc, ids) = fixture();
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let it = doc.element(ids[6]);
        let seed = all_but(&ids, ids[6]);

        let stages = vec![
            CandidateStage::refine(CandidateFilter::PriorDiscourse),
            CandidateStage::refine(CandidateFilter::WindowSize(WINDOW_ALL)),
            CandidateStage::refine(CandidateFilter::Default),
        ];
        let out = run_stages(
            &ctx,
            it,
            CoreferenceType::Anaphora,
            ExpressionType::PersonalPronoun,
            &seed,
            &stages,
        );
        // Nominal, non-verbal survivors only.
        assert!(out.contains(&ids[0]));
        assert!(out.contains(&ids[2]));
        assert!(out.contains(&ids[5]));
        assert!(!out.contains(&ids[1]));
        assert!(!out.contains(&ids[4]));
    }
}
