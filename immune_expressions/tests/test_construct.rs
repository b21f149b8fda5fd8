mod common;

use common::*;
use immune_expressions::{ExprError, Node, Operation, Value};

#[test]
fn every_catalog_tag_builds_a_node() {
    for op in Operation::ALL {
        let node = match op.arity() {
            0 if op == Operation::Number => Node::new(op, None, None, Some(Value::Number(1.5))),
            0 => Node::new(op, None, None, Some("x".into())),
            1 => Node::from_tag(op.tag(), Some(x()), None, None),
            _ => Node::from_tag(op.tag(), Some(x()), Some(n(2.0)), None),
        };
        assert_eq!(node.map(|n| n.operation()), Ok(op));
    }
}

#[test]
fn unknown_tags_are_rejected() {
    for tag in ["pow", "exp", "", "++"] {
        assert_eq!(
            Node::from_tag(tag, Some(x()), Some(y()), None),
            Err(ExprError::InvalidOperation(tag.to_string()))
        );
    }
}

#[test]
fn shape_must_match_the_operation() {
    let malformed = |r: Result<Node, ExprError>| matches!(r, Err(ExprError::MalformedNode { .. }));
    assert!(malformed(Node::new(Operation::Number, None, None, None)));
    assert!(malformed(Node::new(Operation::Number, None, None, Some("x".into()))));
    assert!(malformed(Node::new(Operation::Variable, Some(x()), None, Some("x".into()))));
    assert!(malformed(Node::new(Operation::Sin, None, None, None)));
    assert!(malformed(Node::new(Operation::Sin, Some(x()), Some(y()), None)));
    assert!(malformed(Node::new(Operation::Plus, Some(x()), None, None)));
    assert!(malformed(Node::new(Operation::Plus, Some(x()), Some(y()), Some(Value::Number(1.0)))));
    assert!(malformed(Node::unary(Operation::Plus, x())));
    assert!(malformed(Node::binary(Operation::Cos, x(), y())));
}

#[test]
fn heights_and_counts() {
    assert_eq!(n(1.0).height(), 1);
    assert_eq!(Node::sin(x()).height(), 2);
    assert_eq!(target_expr().height(), 4);
    assert_eq!(Node::plus(x(), Node::cos(Node::sin(y()))).height(), 4);
}

#[test]
fn clones_are_independent() {
    let original = target_expr();
    let mut copy = original.clone();
    if let Node::Binary(_, left, _) = &mut copy {
        **left = n(0.0);
    }
    assert_ne!(copy, original);
    assert_eq!(original, target_expr());
}
