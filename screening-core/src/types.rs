use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fields every screened subject exposes to the matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectRecord {
    pub id: String,
    pub source_country: String,
    pub primary_name: String,
    pub aliases: Vec<String>,
}

impl SubjectRecord {
    /// Build a record, dropping blank aliases.
    pub fn new(
        id: impl Into<String>,
        source_country: impl Into<String>,
        primary_name: impl Into<String>,
        aliases: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_country: source_country.into(),
            primary_name: primary_name.into(),
            aliases: aliases
                .into_iter()
                .filter(|alias| !alias.trim().is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersonDetails {
    pub date_of_birth: Option<String>,
    pub place_of_birth: Option<String>,
    pub nationality: Option<String>,
    pub designation: Option<String>,
    pub listed_on: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityDetails {
    pub registration_number: Option<String>,
    pub address: Option<String>,
    pub leaders: Vec<String>,
    pub listed_on: Option<String>,
}

/// A listed person or entity. Variant details are carried through for
/// reporting and never inspected by the matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScreeningSubject {
    Person {
        #[serde(flatten)]
        record: SubjectRecord,
        #[serde(default)]
        details: PersonDetails,
    },
    Entity {
        #[serde(flatten)]
        record: SubjectRecord,
        #[serde(default)]
        details: EntityDetails,
    },
}

impl ScreeningSubject {
    pub fn person(record: SubjectRecord, details: PersonDetails) -> Self {
        ScreeningSubject::Person { record, details }
    }

    pub fn entity(record: SubjectRecord, details: EntityDetails) -> Self {
        ScreeningSubject::Entity { record, details }
    }

    pub fn record(&self) -> &SubjectRecord {
        match self {
            ScreeningSubject::Person { record, .. } | ScreeningSubject::Entity { record, .. } => {
                record
            }
        }
    }

    pub fn kind(&self) -> SubjectKind {
        match self {
            ScreeningSubject::Person { .. } => SubjectKind::Person,
            ScreeningSubject::Entity { .. } => SubjectKind::Entity,
        }
    }

    pub fn id(&self) -> &str {
        &self.record().id
    }

    pub fn source_country(&self) -> &str {
        &self.record().source_country
    }

    pub fn primary_name(&self) -> &str {
        &self.record().primary_name
    }

    pub fn aliases(&self) -> &[String] {
        &self.record().aliases
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Person,
    Entity,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetFilter {
    Person,
    Entity,
    #[default]
    Both,
}

impl TargetFilter {
    pub fn admits(&self, kind: SubjectKind) -> bool {
        match self {
            TargetFilter::Both => true,
            TargetFilter::Person => kind == SubjectKind::Person,
            TargetFilter::Entity => kind == SubjectKind::Entity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreeningQuery {
    pub query_text: String,
    pub target_filter: TargetFilter,
    /// Country codes to search, stored upper-case.
    pub country_filter: BTreeSet<String>,
    /// Inclusive lower bound, 0-100.
    pub threshold: u8,
}

impl ScreeningQuery {
    pub fn new<I, S>(
        query_text: impl Into<String>,
        target_filter: TargetFilter,
        countries: I,
        threshold: u8,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            query_text: query_text.into(),
            target_filter,
            country_filter: countries
                .into_iter()
                .map(|code| code.as_ref().trim().to_ascii_uppercase())
                .filter(|code| !code.is_empty())
                .collect(),
            threshold,
        }
    }

    /// Same query with a different threshold.
    pub fn with_threshold(&self, threshold: u8) -> Self {
        Self {
            threshold,
            ..self.clone()
        }
    }

    pub fn includes_country(&self, code: &str) -> bool {
        self.country_filter
            .iter()
            .any(|selected| selected.trim().eq_ignore_ascii_case(code.trim()))
    }

    /// Whether a subject passes the country and target filters.
    pub fn selects(&self, subject: &ScreeningSubject) -> bool {
        self.target_filter.admits(subject.kind()) && self.includes_country(subject.source_country())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchedOn {
    Name,
    Alias,
}

/// Best score of a query against one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMatch {
    pub score: u8,
    pub matched_on: MatchedOn,
}

/// A subject that met the threshold. Borrows the subject from the scanned
/// slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    pub subject: &'a ScreeningSubject,
    pub score: u8,
    pub matched_on: MatchedOn,
}

/// Result of a completed scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreeningOutcome<'a> {
    /// Hits ranked by descending score, ties in input order.
    pub matches: Vec<MatchResult<'a>>,
    /// Subjects that passed the filters and were scored.
    pub scanned: usize,
    /// Subjects skipped because their primary name was blank.
    pub skipped: usize,
}

impl<'a> ScreeningOutcome<'a> {
    pub fn is_clear(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn top(&self) -> Option<&MatchResult<'a>> {
        self.matches.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str, country: &str, name: &str) -> ScreeningSubject {
        ScreeningSubject::person(
            SubjectRecord::new(id, country, name, Vec::new()),
            PersonDetails::default(),
        )
    }

    #[test]
    fn test_blank_aliases_dropped() {
        let record = SubjectRecord::new(
            "ML-001",
            "ML",
            "BANDE Hama",
            vec!["".to_string(), "  ".to_string(), "Balobo".to_string()],
        );
        assert_eq!(record.aliases, vec!["Balobo".to_string()]);
    }

    #[test]
    fn test_target_filter() {
        assert!(TargetFilter::Both.admits(SubjectKind::Person));
        assert!(TargetFilter::Both.admits(SubjectKind::Entity));
        assert!(TargetFilter::Person.admits(SubjectKind::Person));
        assert!(!TargetFilter::Person.admits(SubjectKind::Entity));
        assert!(!TargetFilter::Entity.admits(SubjectKind::Person));
    }

    #[test]
    fn test_country_filter_case_insensitive() {
        let query = ScreeningQuery::new("x", TargetFilter::Both, ["ml", " bf "], 80);
        assert!(query.country_filter.contains("ML"));
        assert!(query.country_filter.contains("BF"));
        assert!(query.selects(&person("1", "ml", "A")));
        assert!(query.selects(&person("2", "BF", "B")));
        assert!(!query.selects(&person("3", "NE", "C")));
    }

    #[test]
    fn test_deserialized_country_filter_trimmed() {
        let query: ScreeningQuery = serde_json::from_value(serde_json::json!({
            "query_text": "Hama Bande",
            "target_filter": "both",
            "country_filter": [" ml"],
            "threshold": 80
        }))
        .unwrap();
        assert!(query.includes_country("ML"));
        assert!(query.selects(&person("1", "ML", "BANDE Hama")));
    }

    #[test]
    fn test_subject_serde_tagged() {
        let subject = person("ML-001", "ML", "BANDE Hama");
        let json = serde_json::to_value(&subject).unwrap();
        assert_eq!(json["kind"], "person");
        assert_eq!(json["primary_name"], "BANDE Hama");

        let back: ScreeningSubject = serde_json::from_value(json).unwrap();
        assert_eq!(back, subject);
    }
}
