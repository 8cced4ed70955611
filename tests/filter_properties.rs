//! Property-based tests for filter and scoring invariants.
//!
//! These verify the contracts that hold for all inputs: directional
//! filters are idempotent, window filters are monotone in the window size,
//! salience selection is deterministic, and scores are exactly additive.

use anaphor::{
    score_candidates, select_salient, CandidateFilter, Configuration, CoreferenceType, Document,
    ExpressionType, ResolutionContext, SalienceType, Scorer, ScoringFunction, SemItem, SemKind,
    Span, SurfaceElement, SurfaceId,
};
use proptest::prelude::*;

/// One candidate per sentence, each ten characters wide, followed by a
/// final sentence holding the pronoun expression.
fn build_doc(num_candidates: usize, plural_mask: u64) -> (Document, Vec<SurfaceId>, SurfaceId) {
    let text = "x".repeat((num_candidates + 1) * 10);
    let mut doc = Document::new(text);
    let mut ids = Vec::new();
    for i in 0..num_candidates {
        let s = doc.add_sentence(Span::new(i * 10, i * 10 + 10));
        let tag = if plural_mask & (1 << i) != 0 { "NNS" } else { "NN" };
        let id = doc
            .push_element(
                s,
                SurfaceElement::new(Span::new(i * 10, i * 10 + 4), format!("c{i}"), format!("c{i}"), tag)
                    .with_semantics(SemItem::new(SemKind::Entity, "Protein")),
            )
            .unwrap();
        ids.push(id);
    }
    let s = doc.add_sentence(Span::new(num_candidates * 10, num_candidates * 10 + 10));
    let expr = doc
        .push_element(
            s,
            SurfaceElement::new(
                Span::new(num_candidates * 10, num_candidates * 10 + 2),
                "it",
                "it",
                "PRP",
            ),
        )
        .unwrap();
    (doc, ids, expr)
}

proptest! {
    #[test]
    fn prior_discourse_is_idempotent(
        num_candidates in 1..=12usize,
        plural_mask in any::<u64>(),
    ) {
        let (doc, ids, expr) = build_doc(num_candidates, plural_mask);
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let expr_el = doc.element(expr);

        let once = CandidateFilter::PriorDiscourse.filter(
            &ctx, expr_el, CoreferenceType::Anaphora, ExpressionType::PersonalPronoun, &ids,
        );
        // Exactly the strictly-left subset.
        for &id in &once {
            prop_assert!(doc.element(id).spans.end() <= expr_el.spans.start());
        }
        prop_assert_eq!(once.len(), ids.len(), "every candidate precedes the final pronoun");

        let twice = CandidateFilter::PriorDiscourse.filter(
            &ctx, expr_el, CoreferenceType::Anaphora, ExpressionType::PersonalPronoun, &once,
        );
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn window_size_is_monotone(
        num_candidates in 1..=12usize,
        k1 in 0i32..8,
        delta in 0i32..8,
    ) {
        let (doc, ids, expr) = build_doc(num_candidates, 0);
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let expr_el = doc.element(expr);
        let k2 = k1 + delta;

        let small = CandidateFilter::WindowSize(k1).filter(
            &ctx, expr_el, CoreferenceType::Anaphora, ExpressionType::PersonalPronoun, &ids,
        );
        let large = CandidateFilter::WindowSize(k2).filter(
            &ctx, expr_el, CoreferenceType::Anaphora, ExpressionType::PersonalPronoun, &ids,
        );
        for id in &small {
            prop_assert!(large.contains(id), "window {} ⊆ window {}", k1, k2);
        }
    }

    #[test]
    fn salience_selection_is_deterministic(
        num_candidates in 2..=10usize,
        kind_idx in 0..4usize,
    ) {
        let kind = [
            SalienceType::Proximity,
            SalienceType::ParseTree,
            SalienceType::FirstTerm,
            SalienceType::FocusTerm,
        ][kind_idx];
        let (doc, ids, expr) = build_doc(num_candidates, 0);
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let expr_el = doc.element(expr);

        let first = select_salient(kind, &ctx, expr_el, &ids);
        let second = select_salient(kind, &ctx, expr_el, &ids);
        prop_assert_eq!(&first, &second, "same inputs, same selection");
        prop_assert_eq!(first.len(), 1, "{} selects exactly one", kind);
    }

    #[test]
    fn scores_are_exactly_additive(
        num_candidates in 1..=8usize,
        plural_mask in any::<u64>(),
        w_number in 0i32..5,
        w_person in 0i32..5,
        w_string in 0i32..5,
    ) {
        let (doc, ids, expr) = build_doc(num_candidates, plural_mask);
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let expr_el = doc.element(expr);

        let scorers = [
            Scorer::new(ScoringFunction::Number, w_number),
            Scorer::new(ScoringFunction::Person, w_person),
            Scorer::new(ScoringFunction::ExactString, w_string),
        ];
        let scores = score_candidates(&ctx, expr_el, &scorers, &ids);

        for &id in &ids {
            let cand = doc.element(id);
            let mut expected = 0;
            for s in &scorers {
                if s.function.agrees(&ctx, expr_el, cand) {
                    expected += s.weight;
                }
            }
            prop_assert_eq!(scores.get(&id).copied(), Some(expected));
            // "it" never matches "cN" exactly, and person always agrees, so
            // the bound is easy to state:
            prop_assert!(expected <= w_number + w_person);
        }
    }

    #[test]
    fn all_false_predicates_score_zero(
        num_candidates in 1..=8usize,
        w in 1i32..5,
    ) {
        // Plural candidates against singular "it", compared on number and
        // surface string only: every predicate is false, so the total must
        // be exactly zero, never negative.
        let (doc, ids, expr) = build_doc(num_candidates, u64::MAX);
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let expr_el = doc.element(expr);

        let scorers = [
            Scorer::new(ScoringFunction::Number, w),
            Scorer::new(ScoringFunction::ExactString, w),
        ];
        let scores = score_candidates(&ctx, expr_el, &scorers, &ids);
        for &id in &ids {
            prop_assert_eq!(scores.get(&id).copied(), Some(0));
        }
    }

    #[test]
    fn subsequent_discourse_mirrors_prior(
        num_candidates in 1..=12usize,
    ) {
        let (doc, ids, expr) = build_doc(num_candidates, 0);
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let expr_el = doc.element(expr);

        // Everything precedes the expression, so the forward filter under
        // cataphora keeps nothing; the backward filter under anaphora
        // keeps everything. Their outputs partition the candidate set.
        let forward = CandidateFilter::SubsequentDiscourse.filter(
            &ctx, expr_el, CoreferenceType::Cataphora, ExpressionType::PersonalPronoun, &ids,
        );
        let backward = CandidateFilter::PriorDiscourse.filter(
            &ctx, expr_el, CoreferenceType::Anaphora, ExpressionType::PersonalPronoun, &ids,
        );
        prop_assert!(forward.is_empty());
        prop_assert_eq!(backward.len(), ids.len());
    }
}
