use proptest::prelude::*;
use proptest::strategy::{BoxedStrategy, Union};

use crate::expression::Expression;
use crate::node::Node;
use crate::operation::{BinaryOp, UnaryOp};

pub fn arb_unary_op() -> impl Strategy<Value = UnaryOp> {
    proptest::sample::select(UnaryOp::ALL.to_vec())
}

pub fn arb_binary_op() -> impl Strategy<Value = BinaryOp> {
    proptest::sample::select(BinaryOp::ALL.to_vec())
}

pub fn arb_leaf(variables: Vec<String>, number_range: std::ops::Range<f64>) -> BoxedStrategy<Node> {
    let mut leaf_choices: Vec<BoxedStrategy<Node>> = vec![number_range.prop_map(Node::Number).boxed()];
    if !variables.is_empty() {
        leaf_choices.push(proptest::sample::select(variables).prop_map(Node::Variable).boxed());
    }
    Union::new(leaf_choices).boxed()
}

/// Trees of height at most `max_height` (at least 1) over `variables`.
pub fn arb_node(variables: Vec<String>, max_height: u32) -> BoxedStrategy<Node> {
    let leaf = arb_leaf(variables, -10.0..10.0);
    let depth = max_height.saturating_sub(1);
    leaf.prop_recursive(depth, 64, 2, |inner| {
        prop_oneof![
            (arb_unary_op(), inner.clone()).prop_map(|(op, c)| Node::Unary(op, Box::new(c))),
            (arb_binary_op(), inner.clone(), inner)
                .prop_map(|(op, l, r)| Node::Binary(op, Box::new(l), Box::new(r))),
        ]
    })
    .boxed()
}

pub fn arb_expression(variables: Vec<String>, max_height: u32) -> BoxedStrategy<Expression> {
    let vars = variables.clone();
    arb_node(variables, max_height)
        .prop_map(move |root| Expression::new(root, vars.clone()))
        .boxed()
}
