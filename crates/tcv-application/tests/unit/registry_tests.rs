//! Tests for the link-time test class registry

use crate::test_utils::{Plain, pass};
use tcv_application::{
    CandidateClass, CandidateSource, LinkedCandidates, TEST_CLASSES, TestClassEntry,
    linked_classes,
};

#[linkme::distributed_slice(TEST_CLASSES)]
static REGISTERED_PLAIN: TestClassEntry = TestClassEntry {
    name: "RegisteredPlain",
    factory: registered_plain,
};

fn registered_plain() -> CandidateClass {
    CandidateClass::builder::<Plain>("RegisteredPlain")
        .tag("registry")
        .test("Registered", pass)
        .build()
}

#[test]
fn test_registered_class_is_linked() {
    assert!(TEST_CLASSES.iter().any(|entry| entry.name == "RegisteredPlain"));
}

#[test]
fn test_linked_candidates_builds_registered_classes() {
    let classes = LinkedCandidates.candidates();

    let class = classes
        .iter()
        .find(|class| class.name() == "RegisteredPlain")
        .expect("registered class should be discovered");
    assert!(class.tags().contains("registry"));
    assert_eq!(class.methods().len(), 1);
    assert_eq!(linked_classes().len(), classes.len());
}

#[test]
fn test_vec_is_a_candidate_source() {
    let classes = vec![registered_plain()];

    assert_eq!(classes.candidates().len(), 1);
}
