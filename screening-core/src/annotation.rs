//! Country annotations for screening hits
//!
//! Display names and "list may be stale" advisories are looked up after
//! ranking and attached to each hit. They never influence scores or order.

use crate::config::{CountryInfo, ScreeningConfig};
use crate::types::{MatchResult, MatchedOn, ScreeningSubject};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct CountryDirectory {
    countries: BTreeMap<String, CountryInfo>,
}

impl CountryDirectory {
    pub fn new(countries: BTreeMap<String, CountryInfo>) -> Self {
        Self {
            countries: countries
                .into_iter()
                .map(|(code, info)| (code.trim().to_ascii_uppercase(), info))
                .collect(),
        }
    }

    pub fn from_config(config: &ScreeningConfig) -> Self {
        Self::new(config.countries.clone())
    }

    /// Display name for `code`, falling back to the code itself.
    pub fn display_name<'d>(&'d self, code: &'d str) -> &'d str {
        self.lookup(code).map(|info| info.name.as_str()).unwrap_or(code)
    }

    pub fn advisory(&self, code: &str) -> Option<&str> {
        self.lookup(code).and_then(|info| info.advisory.as_deref())
    }

    pub fn annotate<'a, 'd>(&'d self, hit: &MatchResult<'a>) -> AnnotatedMatch<'a, 'd> {
        let code = hit.subject.source_country();
        AnnotatedMatch {
            subject: hit.subject,
            score: hit.score,
            matched_on: hit.matched_on,
            country_name: self
                .lookup(code)
                .map(|info| info.name.clone())
                .unwrap_or_else(|| code.to_string()),
            advisory: self.advisory(code),
        }
    }

    pub fn annotate_all<'a, 'd>(&'d self, hits: &[MatchResult<'a>]) -> Vec<AnnotatedMatch<'a, 'd>> {
        hits.iter().map(|hit| self.annotate(hit)).collect()
    }

    fn lookup(&self, code: &str) -> Option<&CountryInfo> {
        self.countries.get(&code.trim().to_ascii_uppercase())
    }
}

/// A ranked hit with its country display data attached.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedMatch<'a, 'd> {
    pub subject: &'a ScreeningSubject,
    pub score: u8,
    pub matched_on: MatchedOn,
    pub country_name: String,
    pub advisory: Option<&'d str>,
}
