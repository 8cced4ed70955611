//! Strategy records, the configuration they form, and by-name construction.
//!
//! A [`Strategy`] is the immutable recipe for one (coreference type,
//! expression type) pair: expression gates, candidate stages, scorers, and
//! post-scoring filters, all in application order. The full ordered set is
//! a [`Configuration`], built once at pipeline initialization and read-only
//! afterwards.
//!
//! Components can be constructed by name through the [`Registry`], keeping
//! properties-file ergonomics without any runtime class loading: unknown
//! names fail at configuration-build time with a configuration error.

use crate::agreement::{Scorer, ScoringFunction};
use crate::coref::CoreferenceType;
use crate::error::{Error, Result};
use crate::expression::ExpressionType;
use crate::filters::{
    CandidateFilter, CandidateStage, Combinator, ExpressionFilter, PostScoringFilter, WINDOW_ALL,
    WINDOW_SECTION,
};
use crate::lexicon::Lexicon;
use crate::salience::SalienceType;
use crate::semantics::SemKind;
use serde::{Deserialize, Serialize};

// =============================================================================
// Strategy
// =============================================================================

/// The immutable recipe for resolving one expression type under one
/// coreference type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    /// Coreference type this strategy resolves
    pub coref_type: CoreferenceType,
    /// Expression type this strategy applies to
    pub expr_type: ExpressionType,
    /// Gates deciding whether a recognized expression needs resolution
    pub expression_filters: Vec<ExpressionFilter>,
    /// Candidate pruning stages, in application order
    pub candidate_stages: Vec<CandidateStage>,
    /// Agreement scorers (function, weight, floor)
    pub scorers: Vec<Scorer>,
    /// Post-scoring stages, in application order
    pub post_filters: Vec<PostScoringFilter>,
}

// =============================================================================
// Configuration
// =============================================================================

/// The ordered strategy set plus the lexical overrides it runs with.
///
/// Strategy order is meaningful twice over: within one coreference type the
/// first strategy whose expression type recognizes a mention claims it
/// (which is how possessive-pronoun beats zero-article-NP for "its"), and
/// the order of first appearance of coreference types fixes the per-type
/// resolution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    strategies: Vec<Strategy>,
    lexicon: Lexicon,
}

impl Configuration {
    /// Create a configuration from an ordered strategy list.
    #[must_use]
    pub fn new(strategies: Vec<Strategy>, lexicon: Lexicon) -> Self {
        Self {
            strategies,
            lexicon,
        }
    }

    /// The ordered strategies.
    #[must_use]
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// The lexical overrides.
    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Strategy lookup by exact key.
    #[must_use]
    pub fn lookup(
        &self,
        coref_type: CoreferenceType,
        expr_type: ExpressionType,
    ) -> Option<&Strategy> {
        self.strategies
            .iter()
            .find(|s| s.coref_type == coref_type && s.expr_type == expr_type)
    }

    /// Coreference types in order of first appearance.
    #[must_use]
    pub fn coref_type_order(&self) -> Vec<CoreferenceType> {
        let mut order = Vec::new();
        for s in &self.strategies {
            if !order.contains(&s.coref_type) {
                order.push(s.coref_type);
            }
        }
        order
    }

    /// Serialize the strategy table to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rebuild a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The default table for biomedical abstracts and full text.
    #[must_use]
    pub fn biomedical() -> Self {
        use CoreferenceType::*;
        use ExpressionType::*;
        let strategies = vec![
            // Cataphora first: the cataphoricity gate only passes true
            // forward-looking pronouns, so ordinary pronouns fall through
            // to the anaphora strategies below.
            pronoun_strategy(
                Cataphora,
                PersonalPronoun,
                vec![
                    ExpressionFilter::Cataphoricity,
                    ExpressionFilter::NonPleonastic,
                    ExpressionFilter::ThirdPerson,
                ],
                forward_stages(1),
                5,
            ),
            pronoun_strategy(
                Cataphora,
                PossessivePronoun,
                vec![ExpressionFilter::Cataphoricity, ExpressionFilter::ThirdPerson],
                forward_stages(1),
                5,
            ),
            pronoun_strategy(
                Anaphora,
                PersonalPronoun,
                vec![
                    ExpressionFilter::CoreferentialRelative,
                    ExpressionFilter::NonPleonastic,
                    ExpressionFilter::ThirdPerson,
                ],
                backward_stages(2, true),
                5,
            ),
            pronoun_strategy(
                Anaphora,
                PossessivePronoun,
                vec![ExpressionFilter::ThirdPerson],
                backward_stages(2, true),
                5,
            ),
            Strategy {
                coref_type: Anaphora,
                expr_type: DemonstrativePronoun,
                expression_filters: vec![ExpressionFilter::CoreferentialRelative],
                candidate_stages: backward_stages(2, true),
                scorers: vec![
                    Scorer::new(ScoringFunction::Number, 2),
                    Scorer::new(ScoringFunction::SemanticType, 1),
                ],
                post_filters: proximity_post(2),
            },
            Strategy {
                coref_type: Anaphora,
                expr_type: DistributivePronoun,
                expression_filters: vec![],
                candidate_stages: backward_stages(1, false),
                scorers: vec![
                    Scorer::new(ScoringFunction::Number, 1),
                    Scorer::new(ScoringFunction::SemanticType, 1),
                ],
                post_filters: proximity_post(1),
            },
            Strategy {
                coref_type: Anaphora,
                expr_type: ReciprocalPronoun,
                expression_filters: vec![],
                candidate_stages: backward_stages(0, false),
                scorers: vec![Scorer::new(ScoringFunction::Number, 1)],
                post_filters: proximity_post(1),
            },
            Strategy {
                coref_type: Anaphora,
                expr_type: RelativePronoun,
                expression_filters: vec![ExpressionFilter::CoreferentialRelative],
                candidate_stages: backward_stages(0, false),
                scorers: vec![
                    Scorer::new(ScoringFunction::Adjacency, 2),
                    Scorer::new(ScoringFunction::SemanticType, 1),
                ],
                post_filters: proximity_post(2),
            },
            Strategy {
                coref_type: Anaphora,
                expr_type: IndefinitePronoun,
                expression_filters: vec![],
                candidate_stages: backward_stages(2, true),
                scorers: vec![
                    Scorer::new(ScoringFunction::Number, 1),
                    Scorer::new(ScoringFunction::Animacy, 1),
                ],
                post_filters: proximity_post(2),
            },
            Strategy {
                coref_type: Anaphora,
                expr_type: DefiniteNP,
                expression_filters: vec![ExpressionFilter::Anaphoricity],
                candidate_stages: np_backward_stages(WINDOW_ALL),
                scorers: vec![
                    Scorer::new(ScoringFunction::ExactString, 3),
                    Scorer::new(ScoringFunction::Stem, 2),
                    Scorer::new(ScoringFunction::SemanticType, 2),
                    Scorer::new(ScoringFunction::Number, 1),
                    Scorer::new(ScoringFunction::Coercion, 2),
                ],
                post_filters: vec![
                    PostScoringFilter::Threshold(3),
                    PostScoringFilter::TopScore,
                    PostScoringFilter::Salience(SalienceType::ParseTree),
                ],
            },
            Strategy {
                coref_type: Anaphora,
                expr_type: DemonstrativeNP,
                expression_filters: vec![ExpressionFilter::Anaphoricity],
                candidate_stages: np_backward_stages(4),
                scorers: vec![
                    Scorer::new(ScoringFunction::Stem, 2),
                    Scorer::new(ScoringFunction::SemanticType, 2),
                    Scorer::new(ScoringFunction::Number, 1),
                    Scorer::new(ScoringFunction::Coercion, 2),
                ],
                post_filters: proximity_post(3),
            },
            Strategy {
                coref_type: Anaphora,
                expr_type: ZeroArticleNP,
                expression_filters: vec![ExpressionFilter::Anaphoricity],
                candidate_stages: np_backward_stages(WINDOW_ALL),
                scorers: vec![
                    Scorer::new(ScoringFunction::Coercion, 3),
                    Scorer::new(ScoringFunction::SemanticType, 2),
                    Scorer::new(ScoringFunction::Stem, 1),
                    Scorer::new(ScoringFunction::Number, 1),
                ],
                post_filters: vec![
                    PostScoringFilter::Threshold(3),
                    PostScoringFilter::TopScore,
                    PostScoringFilter::Salience(SalienceType::FreqCount),
                ],
            },
            Strategy {
                coref_type: Anaphora,
                expr_type: DistributiveNP,
                expression_filters: vec![ExpressionFilter::Anaphoricity],
                candidate_stages: np_backward_stages(2),
                scorers: vec![
                    Scorer::new(ScoringFunction::SemanticType, 2),
                    Scorer::new(ScoringFunction::Stem, 1),
                ],
                post_filters: vec![
                    PostScoringFilter::Threshold(2),
                    PostScoringFilter::TopScore,
                    PostScoringFilter::Salience(SalienceType::FirstTerm),
                ],
            },
            // Appositive-flavored relations search both directions inside
            // the sentence.
            appositive_strategy(Appositive, DefiniteNP),
            appositive_strategy(Appositive, IndefiniteNP),
            appositive_strategy(Appositive, ZeroArticleNP),
            Strategy {
                coref_type: PredicateNominative,
                expr_type: IndefiniteNP,
                expression_filters: vec![],
                candidate_stages: same_sentence_stages(),
                scorers: vec![
                    Scorer::new(ScoringFunction::Number, 2),
                    Scorer::new(ScoringFunction::SemanticType, 1),
                    Scorer::new(ScoringFunction::Stem, 1),
                ],
                post_filters: proximity_post(3),
            },
            Strategy {
                coref_type: Ontological,
                expr_type: DefiniteNP,
                expression_filters: vec![],
                candidate_stages: vec![
                    CandidateStage::refine(CandidateFilter::WindowSize(WINDOW_SECTION)),
                    CandidateStage::refine(CandidateFilter::Default),
                ],
                scorers: vec![
                    Scorer::new(ScoringFunction::Coercion, 3),
                    Scorer::new(ScoringFunction::Number, 1),
                ],
                post_filters: vec![
                    PostScoringFilter::Threshold(4),
                    PostScoringFilter::TopScore,
                    PostScoringFilter::Salience(SalienceType::FirstTerm),
                ],
            },
        ];
        Self::new(strategies, Lexicon::default())
    }

    /// The default table for clinical narrative (notes, discharge
    /// summaries): wider windows, the key-value heuristic for
    /// "Label: Value" constructs, and proximity salience throughout since
    /// parse trees are often unavailable.
    #[must_use]
    pub fn clinical() -> Self {
        use CoreferenceType::*;
        use ExpressionType::*;
        let mut base = Self::biomedical();
        for s in &mut base.strategies {
            for pf in &mut s.post_filters {
                if let PostScoringFilter::Salience(kind) = pf {
                    if *kind == SalienceType::ParseTree {
                        *kind = SalienceType::Proximity;
                    }
                }
            }
            for stage in &mut s.candidate_stages {
                if let CandidateFilter::WindowSize(w) = &mut stage.filter {
                    if *w >= 0 {
                        *w += 2;
                    }
                }
            }
        }
        base.strategies.push(Strategy {
            coref_type: PredicateNominative,
            expr_type: ZeroArticleNP,
            expression_filters: vec![],
            candidate_stages: same_sentence_stages(),
            scorers: vec![
                Scorer::new(ScoringFunction::KeyValue, 3),
                Scorer::new(ScoringFunction::SemanticType, 1),
            ],
            post_filters: proximity_post(3),
        });
        base
    }
}

// =============================================================================
// Table-building helpers
// =============================================================================

fn pronoun_scorers() -> Vec<Scorer> {
    vec![
        Scorer::new(ScoringFunction::Number, 2),
        Scorer::new(ScoringFunction::Gender, 1),
        Scorer::new(ScoringFunction::Person, 1),
        Scorer::new(ScoringFunction::Animacy, 2),
    ]
}

fn pronoun_strategy(
    coref_type: CoreferenceType,
    expr_type: ExpressionType,
    expression_filters: Vec<ExpressionFilter>,
    candidate_stages: Vec<CandidateStage>,
    threshold: i32,
) -> Strategy {
    Strategy {
        coref_type,
        expr_type,
        expression_filters,
        candidate_stages,
        scorers: pronoun_scorers(),
        post_filters: proximity_post(threshold),
    }
}

fn appositive_strategy(coref_type: CoreferenceType, expr_type: ExpressionType) -> Strategy {
    Strategy {
        coref_type,
        expr_type,
        expression_filters: vec![],
        candidate_stages: same_sentence_stages(),
        scorers: vec![
            Scorer::new(ScoringFunction::Appositive, 3),
            Scorer::new(ScoringFunction::SemanticType, 1),
            Scorer::new(ScoringFunction::Number, 1),
        ],
        post_filters: proximity_post(4),
    }
}

fn proximity_post(threshold: i32) -> Vec<PostScoringFilter> {
    vec![
        PostScoringFilter::Threshold(threshold),
        PostScoringFilter::TopScore,
        PostScoringFilter::Salience(SalienceType::Proximity),
    ]
}

fn backward_stages(window: i32, syntax: bool) -> Vec<CandidateStage> {
    let mut stages = vec![
        CandidateStage::refine(CandidateFilter::PriorDiscourse),
        CandidateStage::refine(CandidateFilter::WindowSize(window)),
    ];
    if syntax {
        stages.push(CandidateStage::refine(CandidateFilter::SyntaxBased));
    }
    stages.push(CandidateStage::refine(CandidateFilter::Default));
    stages
}

fn np_backward_stages(window: i32) -> Vec<CandidateStage> {
    vec![
        CandidateStage::refine(CandidateFilter::PriorDiscourse),
        CandidateStage::refine(CandidateFilter::WindowSize(window)),
        CandidateStage::refine(CandidateFilter::SyntaxBased),
        CandidateStage::refine(CandidateFilter::Default),
        CandidateStage::refine(CandidateFilter::SingletonMention),
    ]
}

fn forward_stages(window: i32) -> Vec<CandidateStage> {
    vec![
        CandidateStage::refine(CandidateFilter::SubsequentDiscourse),
        CandidateStage::refine(CandidateFilter::WindowSize(window)),
        CandidateStage::refine(CandidateFilter::SyntaxBased),
        CandidateStage::refine(CandidateFilter::Default),
    ]
}

fn same_sentence_stages() -> Vec<CandidateStage> {
    vec![
        CandidateStage::refine(CandidateFilter::SameSentence),
        CandidateStage::refine(CandidateFilter::Default),
    ]
}

// =============================================================================
// By-name construction
// =============================================================================

/// Serializable by-name description of one strategy, the shape a
/// properties-style table deserializes into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySpec {
    /// Coreference type label
    pub coref_type: String,
    /// Expression type label
    pub expression_type: String,
    /// Expression filter keys
    #[serde(default)]
    pub expression_filters: Vec<String>,
    /// Candidate stage keys ("prior-discourse", "window:2",
    /// "union:noun-phrase", "minus:verb-phrase", ...)
    #[serde(default)]
    pub candidate_stages: Vec<String>,
    /// Scorer triples
    #[serde(default)]
    pub scorers: Vec<ScorerSpec>,
    /// Post filter keys ("threshold:4", "top-score", "salience:proximity")
    #[serde(default)]
    pub post_filters: Vec<String>,
}

/// Serializable (function, weight, floor) triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerSpec {
    /// Scoring function key
    pub function: String,
    /// Weight on agreement
    pub weight: i32,
    /// Floor on disagreement (default 0)
    #[serde(default)]
    pub floor: i32,
}

/// Resolves string keys to pipeline components at configuration-build time.
#[derive(Debug, Default)]
pub struct Registry;

impl Registry {
    /// Create the registry of built-in components.
    #[must_use]
    pub fn new() -> Self {
        Registry
    }

    /// Build a candidate stage from a key. An optional `union:`/`minus:`
    /// prefix selects the combinator; the remainder names the filter with
    /// an optional `:`-separated parameter.
    pub fn candidate_stage(&self, key: &str) -> Result<CandidateStage> {
        let (combinator, rest) = if let Some(rest) = key.strip_prefix("union:") {
            (Combinator::Union, rest)
        } else if let Some(rest) = key.strip_prefix("minus:") {
            (Combinator::Minus, rest)
        } else {
            (Combinator::Refine, key)
        };
        Ok(CandidateStage {
            filter: self.candidate_filter(rest)?,
            combinator,
        })
    }

    /// Build a candidate filter from a `name[:param]` key.
    pub fn candidate_filter(&self, key: &str) -> Result<CandidateFilter> {
        let (name, param) = split_key(key);
        match name {
            "prior-discourse" => Ok(CandidateFilter::PriorDiscourse),
            "subsequent-discourse" => Ok(CandidateFilter::SubsequentDiscourse),
            "window" => {
                let param =
                    param.ok_or_else(|| Error::config("window filter requires a parameter"))?;
                let window = match param.to_ascii_uppercase().as_str() {
                    "ALL" => WINDOW_ALL,
                    "SECTION" => WINDOW_SECTION,
                    n => n.parse::<i32>().map_err(|_| {
                        Error::config(format!("bad window parameter '{n}'"))
                    })?,
                };
                if window < 0 && window != WINDOW_ALL && window != WINDOW_SECTION {
                    return Err(Error::config(format!("bad window size {window}")));
                }
                Ok(CandidateFilter::WindowSize(window))
            }
            "syntax" => Ok(CandidateFilter::SyntaxBased),
            "semantic-class" => {
                let param = param
                    .ok_or_else(|| Error::config("semantic-class filter requires kinds"))?;
                let kinds = param
                    .split('+')
                    .map(|k| {
                        SemKind::from_label(k)
                            .ok_or_else(|| Error::config(format!("unknown semantic kind '{k}'")))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(CandidateFilter::SemanticClass(kinds))
            }
            "semantic-type" => {
                let param =
                    param.ok_or_else(|| Error::config("semantic-type filter requires types"))?;
                Ok(CandidateFilter::SemanticType(
                    param.split('+').map(str::to_string).collect(),
                ))
            }
            "noun-phrase" => Ok(CandidateFilter::NounPhrase),
            "verb-phrase" => Ok(CandidateFilter::VerbPhrase),
            "same-sentence" => Ok(CandidateFilter::SameSentence),
            "singleton-mention" => Ok(CandidateFilter::SingletonMention),
            "default" => Ok(CandidateFilter::Default),
            other => Err(Error::config(format!("unknown candidate filter '{other}'"))),
        }
    }

    /// Build an expression filter from its key.
    pub fn expression_filter(&self, key: &str) -> Result<ExpressionFilter> {
        ExpressionFilter::from_label(key)
            .ok_or_else(|| Error::config(format!("unknown expression filter '{key}'")))
    }

    /// Build a post-scoring filter from a `name[:param]` key.
    pub fn post_filter(&self, key: &str) -> Result<PostScoringFilter> {
        let (name, param) = split_key(key);
        match name {
            "threshold" => {
                let param =
                    param.ok_or_else(|| Error::config("threshold requires a minimum"))?;
                let min = param
                    .parse::<i32>()
                    .map_err(|_| Error::config(format!("bad threshold '{param}'")))?;
                Ok(PostScoringFilter::Threshold(min))
            }
            "top-score" => Ok(PostScoringFilter::TopScore),
            "salience" => {
                let param =
                    param.ok_or_else(|| Error::config("salience requires a strategy name"))?;
                let kind = SalienceType::from_label(param)
                    .ok_or_else(|| Error::config(format!("unknown salience '{param}'")))?;
                Ok(PostScoringFilter::Salience(kind))
            }
            other => Err(Error::config(format!("unknown post filter '{other}'"))),
        }
    }

    /// Build a scorer from its spec.
    pub fn scorer(&self, spec: &ScorerSpec) -> Result<Scorer> {
        let function = ScoringFunction::from_label(&spec.function).ok_or_else(|| {
            Error::config(format!("unknown scoring function '{}'", spec.function))
        })?;
        Ok(Scorer {
            function,
            weight: spec.weight,
            floor: spec.floor,
        })
    }

    /// Build a full strategy from its by-name spec.
    pub fn strategy(&self, spec: &StrategySpec) -> Result<Strategy> {
        let coref_type = CoreferenceType::from_label(&spec.coref_type).ok_or_else(|| {
            Error::config(format!("unknown coreference type '{}'", spec.coref_type))
        })?;
        let expr_type = ExpressionType::from_label(&spec.expression_type).ok_or_else(|| {
            Error::config(format!("unknown expression type '{}'", spec.expression_type))
        })?;
        Ok(Strategy {
            coref_type,
            expr_type,
            expression_filters: spec
                .expression_filters
                .iter()
                .map(|k| self.expression_filter(k))
                .collect::<Result<_>>()?,
            candidate_stages: spec
                .candidate_stages
                .iter()
                .map(|k| self.candidate_stage(k))
                .collect::<Result<_>>()?,
            scorers: spec
                .scorers
                .iter()
                .map(|s| self.scorer(s))
                .collect::<Result<_>>()?,
            post_filters: spec
                .post_filters
                .iter()
                .map(|k| self.post_filter(k))
                .collect::<Result<_>>()?,
        })
    }

    /// Build a whole configuration from by-name specs.
    pub fn configuration(&self, specs: &[StrategySpec], lexicon: Lexicon) -> Result<Configuration> {
        let strategies = specs
            .iter()
            .map(|s| self.strategy(s))
            .collect::<Result<Vec<_>>>()?;
        Ok(Configuration::new(strategies, lexicon))
    }
}

fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once(':') {
        Some((name, param)) => (name.trim(), Some(param.trim())),
        None => (key.trim(), None),
    }
}

// =============================================================================
// Tests
// =============================================================================
