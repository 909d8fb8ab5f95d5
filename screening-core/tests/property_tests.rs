//! Property-based tests for the matching pipeline
//!
//! These tests verify properties that must hold for all names, not just the
//! fixed cases in the unit tests.

use proptest::prelude::*;
use screening_core::*;

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 éÉüÜçÇñ'.,-]{0,24}"
}

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z ]{0,12}".prop_map(|s| normalize(&s))
}

fn subject(id: usize, name: &str) -> ScreeningSubject {
    ScreeningSubject::person(
        SubjectRecord::new(format!("ML-{id:04}"), "ML", name, Vec::new()),
        PersonDetails::default(),
    )
}

// ============================================================================
// Normalizer / Scorer
// ============================================================================

proptest! {
    /// Property: normalize(normalize(s)) == normalize(s)
    #[test]
    fn normalize_idempotent(s in name_strategy()) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    /// Property: keys only hold lower-case ASCII letters, digits and single spaces
    #[test]
    fn normalize_output_charset(s in name_strategy()) {
        let key = normalize(&s);
        prop_assert!(key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
        prop_assert!(!key.contains("  "));
        prop_assert_eq!(key.trim(), key.as_str());
    }

    /// Property: similarity(a, b) == similarity(b, a)
    #[test]
    fn similarity_symmetric(a in name_strategy(), b in name_strategy()) {
        prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
    }

    /// Property: similarity stays within 0..=100
    #[test]
    fn similarity_bounded(a in name_strategy(), b in name_strategy()) {
        prop_assert!(similarity(&a, &b) <= 100);
    }

    /// Property: a searchable name is a perfect match for itself
    #[test]
    fn similarity_self_is_100(s in name_strategy()) {
        prop_assume!(!normalize(&s).is_empty());
        prop_assert_eq!(similarity(&s, &s), 100);
    }

    /// Property: anything against a blank name scores 0
    #[test]
    fn similarity_blank_is_zero(s in name_strategy()) {
        prop_assert_eq!(similarity(&s, ""), 0);
        prop_assert_eq!(similarity("", &s), 0);
    }
}

// ============================================================================
// Distance Engine
// ============================================================================

proptest! {
    /// Property: d(a, a) == 0
    #[test]
    fn distance_identity(a in key_strategy()) {
        prop_assert_eq!(edit_distance(&a, &a), 0);
    }

    /// Property: d(a, b) == d(b, a)
    #[test]
    fn distance_symmetric(a in key_strategy(), b in key_strategy()) {
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
    }

    /// Property: d(a, c) <= d(a, b) + d(b, c)
    #[test]
    fn distance_triangle_inequality(
        a in key_strategy(),
        b in key_strategy(),
        c in key_strategy(),
    ) {
        prop_assert!(edit_distance(&a, &c) <= edit_distance(&a, &b) + edit_distance(&b, &c));
    }

    /// Property: d("", s) == len(s)
    #[test]
    fn distance_from_empty(s in key_strategy()) {
        prop_assert_eq!(edit_distance("", &s), s.chars().count());
    }
}

// ============================================================================
// Screening Engine
// ============================================================================

proptest! {
    /// Property: a subject scoring exactly the threshold is a hit, one point
    /// above the score it is not
    #[test]
    fn threshold_boundary_inclusive(query in "[a-z]{1,8} [a-z]{1,8}", name in "[a-z]{1,8} [a-z]{1,8}") {
        let subjects = vec![subject(0, &name)];
        let aliases: [&str; 0] = [];
        let score = best_match(&query, &name, &aliases).score;

        let at = ScreeningQuery::new(query.as_str(), TargetFilter::Both, ["ML"], score);
        prop_assert_eq!(screen(&at, &subjects).unwrap().matches.len(), 1);

        if score < 100 {
            let above = at.with_threshold(score + 1);
            prop_assert!(screen(&above, &subjects).unwrap().matches.is_empty());
        }
    }

    /// Property: results are sorted by descending score and ties keep input order
    #[test]
    fn ranking_stable(names in prop::collection::vec("[a-c]{1,4}", 1..40)) {
        let subjects: Vec<_> = names.iter().enumerate().map(|(i, n)| subject(i, n)).collect();
        let query = ScreeningQuery::new("abc", TargetFilter::Both, ["ML"], 0);

        let outcome = screen(&query, &subjects).unwrap();
        prop_assert_eq!(outcome.matches.len(), subjects.len());
        for pair in outcome.matches.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].subject.id() < pair[1].subject.id());
            }
        }
    }

    /// Property: the sharded scan returns exactly what the sequential scan does
    #[test]
    fn sharded_scan_matches_sequential(
        names in prop::collection::vec("[a-d]{1,5}( [a-d]{1,5})?", 0..80),
        workers in 2usize..9,
    ) {
        let subjects: Vec<_> = names.iter().enumerate().map(|(i, n)| subject(i, n)).collect();
        let engine = ScreeningEngine::new(ScreeningConfig {
            workers,
            parallel_min_subjects: 0,
            ..ScreeningConfig::default()
        });
        let query = ScreeningQuery::new("abc dab", TargetFilter::Both, ["ML"], 30);

        let sharded = engine.screen(&query, &subjects).unwrap();
        let sequential = screen(&query, &subjects).unwrap();
        prop_assert_eq!(sharded, sequential);
    }
}
