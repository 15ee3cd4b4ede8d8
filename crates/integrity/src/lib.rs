//! # Template-aware logic similarity
//!
//! Final stage of the pipeline. Given a candidate's logic tokens, a set of
//! prior submissions and optional template (starter) code, finds the prior
//! whose logic overlaps most with the candidate and decides whether the
//! overlap is high enough to flag.
//!
//! ## Algorithm
//!
//! 1. Template tokens are subtracted from the candidate and from every prior,
//!    one occurrence per template occurrence ([`subtract`]).
//! 2. If nothing of the candidate survives, the score is 0 and no match is
//!    recorded.
//! 3. Each prior is scored with a weighted (multiset) Jaccard similarity on
//!    the 0–100 scale ([`similarity`]).
//! 4. The first prior reaching the highest score is reported; a best score of
//!    0 reports no match.
//! 5. The score is rounded and flagged at or above
//!    [`IntegrityConfig::flag_threshold`] (70 by default).
//!
//! `logic_hash` is always the fingerprint of the candidate's *full* token
//! sequence, template tokens included.
//!
//! ## Example
//!
//! ```
//! use integrity::{check_integrity, PriorSubmission};
//! use logic::LogicToken::*;
//!
//! let candidate = [FuncDef, Print, For, If];
//! let priors = [PriorSubmission::tokenized("sub-7", vec![FuncDef, Print, While, If])];
//! let verdict = check_integrity(&candidate, &priors, &[FuncDef, Print]);
//!
//! assert_eq!(verdict.similarity_score, 33);
//! assert!(!verdict.flagged);
//! assert_eq!(verdict.matching_submission_id.as_deref(), Some("sub-7"));
//! ```

mod counts;
mod engine;
pub mod metrics;
mod similarity;
mod types;

pub use crate::counts::TokenCounts;
pub use crate::engine::{check_integrity, IntegrityEngine};
pub use crate::metrics::{set_integrity_metrics, IntegrityMetrics};
pub use crate::similarity::{similarity, similarity_counts, subtract, subtract_budget};
pub use crate::types::{
    CandidateScore, IntegrityConfig, IntegrityError, IntegrityReport, IntegrityRequest,
    IntegrityVerdict, PriorSource, PriorSubmission, SubmissionRecord,
};
