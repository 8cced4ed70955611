//! Per-mention gates deciding whether an expression needs resolution.

use crate::coref::CoreferenceType;
use crate::document::{DependencyKind, SurfaceElement};
use crate::expression::{cataphoric_pattern, is_pleonastic_it, ExpressionType};
use crate::lexicon::{self, NONREFERENTIAL_RELATIVES};
use crate::resolver::ResolutionContext;
use serde::{Deserialize, Serialize};

/// A boolean gate over a recognized expression. `true` means the expression
/// proceeds to candidate collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpressionFilter {
    /// Nominal mentions looking backward, unless already resolved
    /// syntactically (appositive-dominated or post-modified).
    Anaphoricity,
    /// Forward-looking mentions only; mutually exclusive with
    /// [`ExpressionFilter::Anaphoricity`].
    Cataphoricity,
    /// Third-person pronouns only.
    ThirdPerson,
    /// Drops relative lemmas that never corefer (when/why/how/what).
    CoreferentialRelative,
    /// Drops pleonastic "it".
    NonPleonastic,
}

impl ExpressionFilter {
    /// Human-readable label; also the registry key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExpressionFilter::Anaphoricity => "anaphoricity",
            ExpressionFilter::Cataphoricity => "cataphoricity",
            ExpressionFilter::ThirdPerson => "third-person",
            ExpressionFilter::CoreferentialRelative => "coreferential-relative",
            ExpressionFilter::NonPleonastic => "non-pleonastic",
        }
    }

    /// Parse from registry key.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "anaphoricity" => Some(ExpressionFilter::Anaphoricity),
            "cataphoricity" => Some(ExpressionFilter::Cataphoricity),
            "third-person" => Some(ExpressionFilter::ThirdPerson),
            "coreferential-relative" => Some(ExpressionFilter::CoreferentialRelative),
            "non-pleonastic" => Some(ExpressionFilter::NonPleonastic),
            _ => None,
        }
    }

    /// Does the expression need resolution under this gate?
    #[must_use]
    pub fn allows(
        &self,
        ctx: &ResolutionContext<'_>,
        coref_type: CoreferenceType,
        expr_type: ExpressionType,
        expr: &SurfaceElement,
    ) -> bool {
        let doc = ctx.doc();
        match self {
            ExpressionFilter::Anaphoricity => {
                if !expr_type.is_nominal_phrase() {
                    return false;
                }
                if coref_type == CoreferenceType::Cataphora {
                    return false;
                }
                // Dominated by a syntactic appositive: the referent is
                // already explicit.
                if doc
                    .governors_of(expr.id)
                    .any(|e| e.kind() == DependencyKind::Appositive)
                {
                    return false;
                }
                // Post-modification carries its own referential anchor.
                !doc.dependents_of(expr.id).any(|e| {
                    let dep = doc.element(e.dependent);
                    dep.spans.start() >= expr.spans.end()
                        && matches!(
                            e.kind(),
                            DependencyKind::Prep | DependencyKind::NpInternal
                        )
                })
            }
            ExpressionFilter::Cataphoricity => {
                if coref_type != CoreferenceType::Cataphora {
                    return false;
                }
                !expr_type.is_pronominal() || cataphoric_pattern(doc, expr)
            }
            ExpressionFilter::ThirdPerson => lexicon::pronoun_features(&expr.lemma)
                .is_some_and(|f| f.person == lexicon::Person::Third),
            ExpressionFilter::CoreferentialRelative => {
                !NONREFERENTIAL_RELATIVES.contains(expr.lemma.to_ascii_lowercase().as_str())
            }
            ExpressionFilter::NonPleonastic => !is_pleonastic_it(doc, expr),
        }
    }
}

impl std::fmt::Display for ExpressionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DependencyEdge, Document};
    use crate::span::{MultiSpan, Span};
    use crate::strategy::Configuration;

    fn ctx_doc(text: &str) -> Document {
        let mut doc = Document::new(text.to_string());
        doc.add_sentence(Span::new(0, text.len()));
        doc
    }

    #[test]
    fn test_third_person_gate() {
        let doc = {
            let mut d = ctx_doc("it and I");
            d.push_element(0, SurfaceElement::new(MultiSpan::single(0, 2), "it", "it", "PRP"))
                .unwrap();
            d.push_element(0, SurfaceElement::new(MultiSpan::single(7, 8), "I", "i", "PRP"))
                .unwrap();
            d
        };
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let it = doc.element(crate::document::SurfaceId(0));
        let i = doc.element(crate::document::SurfaceId(1));
        assert!(ExpressionFilter::ThirdPerson.allows(
            &ctx,
            CoreferenceType::Anaphora,
            ExpressionType::PersonalPronoun,
            it
        ));
        assert!(!ExpressionFilter::ThirdPerson.allows(
            &ctx,
            CoreferenceType::Anaphora,
            ExpressionType::PersonalPronoun,
            i
        ));
    }

    #[test]
    fn test_anaphoricity_rejects_appositive_dominated() {
        let mut doc = ctx_doc("aspirin, the inhibitor, was given");
        let aspirin = doc
            .push_element(
                0,
                SurfaceElement::new(MultiSpan::single(0, 7), "aspirin", "aspirin", "NN"),
            )
            .unwrap();
        let inhibitor = doc
            .push_element(
                0,
                SurfaceElement::new(
                    MultiSpan::single(9, 22),
                    "the inhibitor",
                    "inhibitor",
                    "NN",
                )
                .nominal(),
            )
            .unwrap();
        doc.add_dependency(0, DependencyEdge::new("appos", aspirin, inhibitor))
            .unwrap();
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());

        assert!(!ExpressionFilter::Anaphoricity.allows(
            &ctx,
            CoreferenceType::Anaphora,
            ExpressionType::DefiniteNP,
            doc.element(inhibitor)
        ));
        // A free-standing definite NP passes.
        let mut doc2 = ctx_doc("the inhibitor was given");
        let free = doc2
            .push_element(
                0,
                SurfaceElement::new(
                    MultiSpan::single(0, 13),
                    "the inhibitor",
                    "inhibitor",
                    "NN",
                )
                .nominal(),
            )
            .unwrap();
        let ctx2 = ResolutionContext::new(&doc2, config.lexicon());
        assert!(ExpressionFilter::Anaphoricity.allows(
            &ctx2,
            CoreferenceType::Anaphora,
            ExpressionType::DefiniteNP,
            doc2.element(free)
        ));
    }

    #[test]
    fn test_anaphoricity_and_cataphoricity_mutually_exclusive() {
        let mut doc = ctx_doc("the enzyme");
        let np = doc
            .push_element(
                0,
                SurfaceElement::new(MultiSpan::single(0, 10), "the enzyme", "enzyme", "NN")
                    .nominal(),
            )
            .unwrap();
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        let el = doc.element(np);

        assert!(ExpressionFilter::Anaphoricity.allows(
            &ctx,
            CoreferenceType::Anaphora,
            ExpressionType::DefiniteNP,
            el
        ));
        assert!(!ExpressionFilter::Anaphoricity.allows(
            &ctx,
            CoreferenceType::Cataphora,
            ExpressionType::DefiniteNP,
            el
        ));
        assert!(!ExpressionFilter::Cataphoricity.allows(
            &ctx,
            CoreferenceType::Anaphora,
            ExpressionType::DefiniteNP,
            el
        ));
        assert!(ExpressionFilter::Cataphoricity.allows(
            &ctx,
            CoreferenceType::Cataphora,
            ExpressionType::DefiniteNP,
            el
        ));
    }

    #[test]
    fn test_nonreferential_relative_dropped() {
        let mut doc = ctx_doc("when it started");
        let when = doc
            .push_element(0, SurfaceElement::new(MultiSpan::single(0, 4), "when", "when", "WRB"))
            .unwrap();
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        assert!(!ExpressionFilter::CoreferentialRelative.allows(
            &ctx,
            CoreferenceType::Anaphora,
            ExpressionType::RelativePronoun,
            doc.element(when)
        ));
    }

    #[test]
    fn test_pleonastic_it_dropped() {
        let mut doc = ctx_doc("It is likely that the dose was too low");
        let it = doc
            .push_element(0, SurfaceElement::new(MultiSpan::single(0, 2), "It", "it", "PRP"))
            .unwrap();
        let config = Configuration::biomedical();
        let ctx = ResolutionContext::new(&doc, config.lexicon());
        assert!(!ExpressionFilter::NonPleonastic.allows(
            &ctx,
            CoreferenceType::Anaphora,
            ExpressionType::PersonalPronoun,
            doc.element(it)
        ));
    }
}
