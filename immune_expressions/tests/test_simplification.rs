mod common;

use approx::assert_relative_eq;
use common::*;
use immune_expressions::{Expression, Node, simplify_pass};
use proptest::prelude::*;

fn simplified(mut node: Node) -> Node {
    node.simplify();
    node
}

#[test]
fn equal_numbers_subtract_to_zero() {
    let s = simplified(Node::minus(n(2.0), n(2.0)));
    assert_eq!(s, n(0.0));
    assert!(s.left().is_none() && s.right().is_none());
}

#[test]
fn sine_of_zero_folds() {
    assert_eq!(simplified(Node::sin(n(0.0))), n(0.0));
}

#[test]
fn variable_over_itself_is_one() {
    assert_eq!(simplified(Node::divide(x(), x())), n(1.0));
}

#[test]
fn variable_minus_itself_is_zero() {
    assert_eq!(simplified(Node::minus(x(), x())), n(0.0));
}

#[test]
fn multiplying_by_one_is_dropped() {
    assert_eq!(simplified(Node::multiply(x(), n(1.0))), x());
    assert_eq!(simplified(Node::multiply(n(1.0), x())), x());
}

#[test]
fn different_variables_are_left_alone() {
    let e = Node::divide(x(), y());
    assert_eq!(simplified(e.clone()), e);
}

#[test]
fn numbers_round_to_three_decimals() {
    let s = simplified(Node::plus(x(), n(0.123456)));
    assert_eq!(s, Node::plus(x(), n(0.123)));
}

#[test]
fn nested_constants_collapse_over_several_passes() {
    // ((2 * 3) + cos(0)) * x
    let mut e = Node::multiply(Node::plus(Node::multiply(n(2.0), n(3.0)), Node::cos(n(0.0))), x());
    assert!(e.simplify() >= 2);
    assert_eq!(e, Node::multiply(n(7.0), x()));
    assert!(!simplify_pass(&mut e));
}

#[test]
fn expression_simplify_reaches_a_fixed_point() {
    let mut e = Expression::new(Node::minus(Node::divide(x(), x()), Node::minus(y(), y())), vars(&["x", "y"]));
    e.simplify();
    assert_eq!(e.root, n(1.0));
}

fn arb_polynomial() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![Just(x()), Just(y())];
    leaf.prop_recursive(4, 32, 2, |inner| {
        (0..3usize, inner.clone(), inner).prop_map(|(op, l, r)| match op {
            0 => Node::plus(l, r),
            1 => Node::minus(l, r),
            _ => Node::multiply(l, r),
        })
    })
}

proptest! {
    #[test]
    fn simplification_preserves_value_of_polynomials(root in arb_polynomial(), xv in -3.0f64..3.0, yv in -3.0f64..3.0) {
        let bindings = [("x", xv), ("y", yv)];
        let before = root.evaluate(&bindings).unwrap();
        let after = simplified(root).evaluate(&bindings).unwrap();
        assert_relative_eq!(before, after, epsilon = 1e-9, max_relative = 1e-9);
    }

    #[test]
    fn simplification_never_grows_a_tree(root in immune_expressions::proptest_utils::arb_node(vars(&["x"]), 5)) {
        let size = root.count_nodes();
        let height = root.height();
        let s = simplified(root);
        prop_assert!(s.count_nodes() <= size);
        prop_assert!(s.height() <= height);
    }
}
