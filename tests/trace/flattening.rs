//! Flattening nested attribute trees.

use devscope::foundation::{ErrorKind, ParseError, Value};
use devscope::trace::{AttributeNode, Flattener};
use proptest::prelude::*;

#[test]
fn primary_types_are_coerced() {
    let state = Flattener::new()
        .flatten(&[
            AttributeNode::primary("n", "Integer", " 7 "),
            AttributeNode::primary("x", "Float", "0.25"),
            AttributeNode::primary("on", "Boolean", "True"),
            AttributeNode::primary("off", "Boolean", "yes"),
        ])
        .unwrap();

    assert_eq!(state.get("n"), Some(&Value::Int(7)));
    assert_eq!(state.get("x"), Some(&Value::Float(0.25)));
    assert_eq!(state.get("on"), Some(&Value::Bool(true)));
    assert_eq!(state.get("off"), Some(&Value::Bool(false)));
}

#[test]
fn bad_integer_names_the_attribute() {
    let err = Flattener::new()
        .flatten(&[AttributeNode::nested(
            "job",
            vec![AttributeNode::primary("id", "Integer", "three")],
        )])
        .unwrap_err();

    let ErrorKind::Parse(parse) = &err.kind else {
        panic!("expected parse error, got {:?}", err.kind);
    };
    assert_eq!(
        parse,
        &ParseError::InvalidInteger {
            attribute: "id".to_string(),
            text: "three".to_string(),
        }
    );
    let stack = err.context.expect("context").stack;
    assert_eq!(stack, vec!["job".to_string(), "id".to_string()]);
}

#[test]
fn nesting_past_the_limit_fails() {
    let mut node = AttributeNode::primary("leaf", "Integer", "1");
    for depth in 0..200 {
        node = AttributeNode::nested(format!("n{depth}"), vec![node]);
    }
    let err = Flattener::new().flatten(&[node]).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Parse(ParseError::DepthExceeded { limit: 64 })
    ));
}

// =============================================================================
// Properties
// =============================================================================

fn attribute_tree() -> impl Strategy<Value = AttributeNode> {
    let leaf = ("[a-z]{1,3}", any::<i32>())
        .prop_map(|(name, n)| AttributeNode::primary(name, "Integer", n.to_string()));
    leaf.prop_recursive(4, 32, 4, |inner| {
        ("[a-z]{1,3}", prop::collection::vec(inner, 0..4))
            .prop_map(|(name, children)| AttributeNode::nested(name, children))
    })
}

fn distinct_names(nodes: &[AttributeNode]) -> bool {
    let mut names: Vec<&str> = nodes.iter().filter_map(|n| n.name.as_deref()).collect();
    let len = names.len();
    names.sort_unstable();
    names.dedup();
    names.len() == len && nodes.iter().all(|n| distinct_names(n.children().unwrap_or(&[])))
}

proptest! {
    #[test]
    fn leaf_count_matches_entries(nodes in prop::collection::vec(attribute_tree(), 0..5)) {
        prop_assume!(distinct_names(&nodes));
        let state = Flattener::new().flatten(&nodes).unwrap();
        let leaves: usize = nodes.iter().map(AttributeNode::leaf_count).sum();
        prop_assert_eq!(state.len(), leaves);
    }

    #[test]
    fn paths_are_dotted_names(nodes in prop::collection::vec(attribute_tree(), 0..5)) {
        let state = Flattener::new().flatten(&nodes).unwrap();
        for path in state.paths() {
            prop_assert!(!path.is_empty());
            prop_assert!(path.split('.').all(|segment| !segment.is_empty()));
        }
    }
}
