//! Filter stages of the resolution pipeline.
//!
//! Three filter families gate the pipeline at different points:
//!
//! - [`ExpressionFilter`]: does this mention need resolution at all?
//! - [`CandidateFilter`]: prune the referent candidate set, composed by
//!   explicit union/minus combinators per strategy.
//! - [`PostScoringFilter`]: threshold, top-score selection, and salience
//!   tie-breaking over the score map.
//!
//! Every filter is a pure function of its inputs. A filter invoked under an
//! incompatible coreference type refuses to run — it logs a warning and
//! degrades (directional filters contribute nothing; the syntax filter
//! passes everything through) instead of erroring.

mod candidate;
mod expression;
mod post;

pub use candidate::{
    default_candidate_stages, run_stages, CandidateFilter, CandidateStage, Combinator,
    WINDOW_ALL, WINDOW_SECTION,
};
pub use expression::ExpressionFilter;
pub use post::{PostScoringFilter, ScoreMap};
