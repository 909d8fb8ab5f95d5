use crate::error::{Result, ScreeningError};
use crate::types::{MatchedOn, ScreeningOutcome, ScreeningQuery, SubjectKind, TargetFilter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Owned record of one screening run, kept for the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreeningSummary {
    pub screening_id: Uuid,
    pub screened_at: DateTime<Utc>,
    pub query_text: String,
    pub threshold: u8,
    pub target_filter: TargetFilter,
    pub countries: Vec<String>,
    pub scanned: usize,
    pub skipped: usize,
    /// Hits in rank order.
    pub matches: Vec<MatchSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSummary {
    pub subject_id: String,
    pub kind: SubjectKind,
    pub primary_name: String,
    pub source_country: String,
    pub score: u8,
    pub matched_on: MatchedOn,
}

impl ScreeningSummary {
    pub fn new(query: &ScreeningQuery, outcome: &ScreeningOutcome<'_>) -> Self {
        Self {
            screening_id: Uuid::new_v4(),
            screened_at: Utc::now(),
            query_text: query.query_text.clone(),
            threshold: query.threshold,
            target_filter: query.target_filter,
            countries: query.country_filter.iter().cloned().collect(),
            scanned: outcome.scanned,
            skipped: outcome.skipped,
            matches: outcome
                .matches
                .iter()
                .map(|hit| MatchSummary {
                    subject_id: hit.subject.id().to_string(),
                    kind: hit.subject.kind(),
                    primary_name: hit.subject.primary_name().to_string(),
                    source_country: hit.subject.source_country().to_string(),
                    score: hit.score,
                    matched_on: hit.matched_on,
                })
                .collect(),
        }
    }

    pub fn hit_count(&self) -> usize {
        self.matches.len()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScreeningError::Serialization(e.to_string()))
    }
}
