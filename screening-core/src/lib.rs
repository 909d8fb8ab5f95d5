//! Sanctions name screening core
//!
//! Fuzzy matching of a free-text name against listed persons and entities:
//! normalization, edit distance, similarity scoring, per-subject best match
//! and the filter/rank scan that produces ranked hits.

#![forbid(unsafe_code)]

pub mod annotation;
pub mod audit;
pub mod config;
pub mod distance;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod screening;
pub mod similarity;
pub mod types;

pub use annotation::{AnnotatedMatch, CountryDirectory};
pub use audit::{MatchSummary, ScreeningSummary};
pub use config::{CountryInfo, ScreeningConfig};
pub use distance::edit_distance;
pub use error::{Result, ScreeningError};
pub use matcher::best_match;
pub use normalize::normalize;
pub use screening::{screen, CancellationToken, ScreeningEngine};
pub use similarity::similarity;
pub use types::{
    BestMatch, EntityDetails, MatchResult, MatchedOn, PersonDetails, ScreeningOutcome,
    ScreeningQuery, ScreeningSubject, SubjectKind, SubjectRecord, TargetFilter,
};
