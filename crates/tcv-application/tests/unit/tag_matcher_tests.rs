//! Tag matching tests

use proptest::prelude::*;
use tcv_application::TagMatcher;
use tcv_domain::TagSet;

fn tags(values: &[&str]) -> TagSet {
    values.iter().copied().collect()
}

#[test]
fn test_empty_request_matches_everything() {
    assert!(TagMatcher::matches(&tags(&[]), &tags(&[])));
    assert!(TagMatcher::matches(&tags(&["slow"]), &tags(&[])));
}

#[test]
fn test_any_shared_tag_matches() {
    let requested = tags(&["smoke", "fast"]);

    assert!(TagMatcher::matches(&tags(&["smoke"]), &requested));
    assert!(TagMatcher::matches(&tags(&["fast", "db"]), &requested));
    assert!(!TagMatcher::matches(&tags(&["slow"]), &requested));
}

#[test]
fn test_untagged_candidate_is_excluded_by_a_request() {
    assert!(!TagMatcher::matches(&tags(&[]), &tags(&["smoke"])));
}

#[test]
fn test_matching_is_case_sensitive() {
    assert!(!TagMatcher::matches(&tags(&["Smoke"]), &tags(&["smoke"])));
}

proptest! {
    #[test]
    fn prop_matches_iff_intersection_non_empty(
        declared in proptest::collection::btree_set("[a-d]", 0..4),
        requested in proptest::collection::btree_set("[a-d]", 1..4),
    ) {
        let expected = declared.intersection(&requested).next().is_some();
        let declared: TagSet = declared.into_iter().collect();
        let requested: TagSet = requested.into_iter().collect();

        prop_assert_eq!(TagMatcher::matches(&declared, &requested), expected);
    }

    #[test]
    fn prop_matching_is_symmetric_for_non_empty_sets(
        a in proptest::collection::btree_set("[a-f]", 1..5),
        b in proptest::collection::btree_set("[a-f]", 1..5),
    ) {
        let a: TagSet = a.into_iter().collect();
        let b: TagSet = b.into_iter().collect();

        prop_assert_eq!(TagMatcher::matches(&a, &b), TagMatcher::matches(&b, &a));
    }
}
