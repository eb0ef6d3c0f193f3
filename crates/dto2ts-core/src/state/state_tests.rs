#![allow(non_snake_case)]

use super::*;

fn declaration(name: &str, text: &str) -> EmittedDeclaration {
    EmittedDeclaration {
        qualified_name: name.to_string(),
        simple_name: crate::naming::simple_name(name).to_string(),
        text: text.to_string(),
        comment: None,
    }
}

#[test]
fn TraversalState___new___is_empty() {
    let state = TraversalState::new();

    assert!(state.is_empty());
    assert_eq!(state.completed_len(), 0);
}

#[test]
fn TraversalState___mark_in_progress___guards_reentry() {
    let mut state = TraversalState::new();

    assert!(state.mark_in_progress("a.A"));
    assert!(!state.mark_in_progress("a.A"));
    assert!(state.is_in_progress("a.A"));
    assert!(!state.is_completed("a.A"));
}

#[test]
fn TraversalState___store___moves_name_to_completed() {
    let mut state = TraversalState::new();
    state.mark_in_progress("a.A");

    let stored = state.store(declaration("a.A", "interface A {\n}\n"));

    assert!(stored);
    assert!(state.is_completed("a.A"));
    assert!(!state.is_in_progress("a.A"));
    assert_eq!(state.in_progress_len(), 0);
}

#[test]
fn TraversalState___store_twice___keeps_first_declaration() {
    let mut state = TraversalState::new();
    state.store(declaration("a.A", "first"));

    let stored = state.store(declaration("a.A", "second"));

    assert!(!stored);
    assert_eq!(state.get("a.A").unwrap().text, "first");
    assert_eq!(state.completed_len(), 1);
}

#[test]
fn TraversalState___completed_name___cannot_be_marked_again() {
    let mut state = TraversalState::new();
    state.mark_in_progress("a.A");
    state.store(declaration("a.A", "x"));

    assert!(!state.mark_in_progress("a.A"));
}

#[test]
fn TraversalState___declarations___follow_discovery_order() {
    let mut state = TraversalState::new();
    state.mark_in_progress("a.Root");
    state.mark_in_progress("a.Child");
    state.store(declaration("a.Child", "child"));
    state.store(declaration("a.Root", "root"));

    let names: Vec<&str> = state
        .declarations()
        .map(|d| d.qualified_name.as_str())
        .collect();

    assert_eq!(names, vec!["a.Root", "a.Child"]);
}

#[test]
fn TraversalState___abandon___drops_name_without_declaration() {
    let mut state = TraversalState::new();
    state.mark_in_progress("a.Api");

    state.abandon("a.Api");

    assert!(!state.is_known("a.Api"));
    assert_eq!(state.declarations().count(), 0);
}

#[test]
fn TraversalState___clear___forgets_previous_traversal() {
    let mut state = TraversalState::new();
    state.mark_in_progress("a.B");
    state.store(declaration("a.A", "x"));

    state.clear();

    assert!(state.is_empty());
    assert!(!state.is_known("a.A"));
    assert!(!state.is_known("a.B"));
    assert!(state.mark_in_progress("a.A"));
}

#[test]
fn TraversalState___assign_name___reserves_name_for_one_class() {
    let mut state = TraversalState::new();

    assert!(state.assign_name("com.acme.QryTranrq", "QRYReq"));
    assert!(state.assign_name("com.acme.QryTranrq", "QRYReq"));
    assert!(!state.assign_name("com.acme.OtherTranrq", "QRYReq"));

    assert_eq!(state.assigned_name("com.acme.QryTranrq"), Some("QRYReq"));
    assert_eq!(state.assigned_name("com.acme.OtherTranrq"), None);
}

#[test]
fn TraversalState___clear___releases_assigned_names() {
    let mut state = TraversalState::new();
    state.assign_name("com.acme.QryTranrq", "QRYReq");

    state.clear();

    assert_eq!(state.assigned_name("com.acme.QryTranrq"), None);
    assert!(state.assign_name("com.acme.OtherTranrq", "QRYReq"));
}
