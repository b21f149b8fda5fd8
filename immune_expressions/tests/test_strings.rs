mod common;

use common::*;
use immune_expressions::{Expression, Node, string_tree};

#[test]
fn binary_nodes_are_parenthesised() {
    assert_eq!(string_tree(&Node::plus(x(), n(2.0))), "(x + 2.0)");
    assert_eq!(string_tree(&Node::divide(n(-0.5), y())), "(-0.5 / y)");
}

#[test]
fn unary_nodes_use_call_syntax() {
    assert_eq!(Node::sin(Node::cos(x())).to_string(), "sin(cos(x))");
}

#[test]
fn target_renders_fully() {
    let e = Expression::new(target_expr(), vars(&["x"]));
    assert_eq!(e.to_string(), "((x * x) + (x * sin(x)))");
}

#[test]
fn fractional_numbers_keep_their_digits() {
    assert_eq!(n(1.25).to_string(), "1.25");
    assert_eq!(n(3.0).to_string(), "3.0");
}
