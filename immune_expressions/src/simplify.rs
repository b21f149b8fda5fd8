use crate::node::Node;
use crate::operation::BinaryOp;

/// Decimal places kept on numeric leaves.
pub const NUMBER_DECIMALS: i32 = 3;

enum Fold {
    Value(f64),
    KeepLeft,
    KeepRight,
}

pub fn round_to_decimals(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (v * scale).round() / scale
}

fn fold_rule(node: &Node) -> Option<Fold> {
    match node {
        Node::Unary(op, child) => child.value().map(|x| Fold::Value(op.apply(x))),
        Node::Binary(op, left, right) => match (op, &**left, &**right) {
            (_, Node::Number(a), Node::Number(b)) => Some(Fold::Value(op.apply(*a, *b))),
            (BinaryOp::Divide, Node::Variable(a), Node::Variable(b)) if a == b => Some(Fold::Value(1.0)),
            (BinaryOp::Minus, Node::Variable(a), Node::Variable(b)) if a == b => Some(Fold::Value(0.0)),
            (BinaryOp::Multiply | BinaryOp::Divide, _, Node::Number(one)) if *one == 1.0 => Some(Fold::KeepLeft),
            (BinaryOp::Multiply, Node::Number(one), _) if *one == 1.0 => Some(Fold::KeepRight),
            _ => None,
        },
        Node::Number(_) | Node::Variable(_) => None,
    }
}

/// One simplification pass over the subtree rooted at `node`.
///
/// Returns `true` if a folding rule fired anywhere. A node that folds is not
/// descended into during the same pass. Rounding numeric leaves never counts
/// as a change.
pub fn simplify_pass(node: &mut Node) -> bool {
    if let Node::Number(v) = node {
        *v = round_to_decimals(*v, NUMBER_DECIMALS);
        return false;
    }

    if let Some(fold) = fold_rule(node) {
        let replacement = match (fold, &mut *node) {
            (Fold::Value(v), _) => Node::Number(v),
            (Fold::KeepLeft, Node::Binary(_, left, _)) => std::mem::replace(&mut **left, Node::Number(0.0)),
            (Fold::KeepRight, Node::Binary(_, _, right)) => std::mem::replace(&mut **right, Node::Number(0.0)),
            _ => return false,
        };
        *node = replacement;
        return true;
    }

    match node {
        Node::Unary(_, child) => simplify_pass(child),
        Node::Binary(_, left, right) => {
            let left_changed = simplify_pass(left);
            let right_changed = simplify_pass(right);
            left_changed || right_changed
        }
        Node::Number(_) | Node::Variable(_) => false,
    }
}

/// Repeat [`simplify_pass`] until a pass reports no change.
///
/// Returns the number of passes that changed the tree.
pub fn simplify_in_place(node: &mut Node) -> usize {
    let mut passes = 0;
    while simplify_pass(node) {
        passes += 1;
    }
    passes
}

impl Node {
    pub fn simplify(&mut self) -> usize {
        simplify_in_place(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_alone_is_not_a_change() {
        let mut n = Node::number(1.23456);
        assert!(!simplify_pass(&mut n));
        assert_eq!(n, Node::number(1.235));
    }

    #[test]
    fn folded_node_is_not_descended_in_the_same_pass() {
        // sin(2.0) - sin(2.0): both children fold in the first pass, the parent in the second.
        let mut e = Node::minus(Node::sin(Node::number(2.0)), Node::sin(Node::number(2.0)));
        assert!(simplify_pass(&mut e));
        assert!(e.is_binary());
        assert!(simplify_pass(&mut e));
        assert_eq!(e, Node::number(0.0));
        assert!(!simplify_pass(&mut e));
    }

    #[test]
    fn one_times_subtree_keeps_the_subtree() {
        let inner = Node::plus(Node::variable("x"), Node::variable("y"));
        let mut e = Node::multiply(Node::number(1.0), inner.clone());
        assert_eq!(simplify_in_place(&mut e), 1);
        assert_eq!(e, inner);
    }

    #[test]
    fn division_by_one_keeps_numerator() {
        let mut e = Node::divide(Node::cos(Node::variable("x")), Node::number(1.0));
        simplify_in_place(&mut e);
        assert_eq!(e, Node::cos(Node::variable("x")));
    }
}
