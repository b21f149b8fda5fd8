//! In-place tree edits backing each mutation kind.
//!
//! Each function picks its target uniformly from the nodes it can act on and
//! returns `false` when there is none.

use fastrand::Rng;
use immune_expressions::random::{random_binary_op, random_unary_op};
use immune_expressions::{GenOptions, Node, random_node};

use crate::random::choose;

fn pick(rng: &mut Rng, root: &Node, filter: impl FnMut(&Node) -> bool) -> Option<usize> {
    choose(rng, &root.positions_where(filter)).copied()
}

pub(crate) fn perturb_number_in_place(rng: &mut Rng, root: &mut Node) -> bool {
    let Some(i) = pick(rng, root, Node::is_number) else {
        return false;
    };
    let Some(Node::Number(v)) = root.nth_mut(i) else {
        return false;
    };
    let roll = rng.f64();
    if roll < 0.45 {
        *v += rng.f64();
    } else if roll < 0.9 {
        *v -= rng.f64();
    } else {
        *v = v.round();
    }
    true
}

pub(crate) fn substitute_variable_in_place(rng: &mut Rng, root: &mut Node, variables: &[String]) -> bool {
    let Some(name) = choose(rng, variables).cloned() else {
        return false;
    };
    let Some(i) = pick(rng, root, Node::is_variable) else {
        return false;
    };
    match root.nth_mut(i) {
        Some(Node::Variable(v)) => {
            *v = name;
            true
        }
        _ => false,
    }
}

pub(crate) fn substitute_unary_in_place(rng: &mut Rng, root: &mut Node) -> bool {
    let Some(i) = pick(rng, root, Node::is_unary) else {
        return false;
    };
    match root.nth_mut(i) {
        Some(Node::Unary(op, _)) => {
            *op = random_unary_op(rng);
            true
        }
        _ => false,
    }
}

pub(crate) fn substitute_binary_in_place(rng: &mut Rng, root: &mut Node) -> bool {
    let Some(i) = pick(rng, root, Node::is_binary) else {
        return false;
    };
    match root.nth_mut(i) {
        Some(Node::Binary(op, _, _)) => {
            *op = random_binary_op(rng);
            true
        }
        _ => false,
    }
}

/// Replace a non-root inner node with a fresh subtree.
///
/// The new subtree is at most `root_height - selected_height` tall, and never
/// taller than the room left below its position, so the tree height bound
/// holds.
pub(crate) fn replace_subtree_in_place(
    rng: &mut Rng,
    root: &mut Node,
    variables: &[String],
    options: &GenOptions,
) -> bool {
    let root_height = root.height();
    let candidates: Vec<(usize, usize, usize)> = root
        .preorder()
        .enumerate()
        .skip(1)
        .filter(|(_, (_, n))| n.height() > 1)
        .map(|(i, (depth, n))| (i, depth, n.height()))
        .collect();
    let Some(&(i, depth, selected_height)) = choose(rng, &candidates) else {
        return false;
    };
    let room = root_height + 1 - depth;
    let max_height = (root_height - selected_height).min(room).max(1);
    let subtree = random_node(rng, max_height, variables, options);
    match root.nth_mut(i) {
        Some(slot) => {
            *slot = subtree;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> Vec<String> {
        vec!["x".into(), "y".into()]
    }

    #[test]
    fn number_perturbation_touches_only_numbers() {
        let mut rng = Rng::with_seed(3);
        let mut no_numbers = Node::plus(Node::variable("x"), Node::variable("y"));
        assert!(!perturb_number_in_place(&mut rng, &mut no_numbers));

        let mut changed = 0;
        for _ in 0..100 {
            let mut e = Node::plus(Node::variable("x"), Node::number(2.5));
            assert!(perturb_number_in_place(&mut rng, &mut e));
            assert_eq!(e.left(), Some(&Node::variable("x")));
            if e.right() != Some(&Node::number(2.5)) {
                changed += 1;
            }
        }
        assert!(changed > 80);
    }

    #[test]
    fn variable_substitution_uses_the_given_names() {
        let mut rng = Rng::with_seed(5);
        for _ in 0..50 {
            let mut e = Node::sin(Node::variable("x"));
            assert!(substitute_variable_in_place(&mut rng, &mut e, &vars()));
            let name = e.variable_names().next().unwrap().to_string();
            assert!(vars().contains(&name));
        }
        let mut leaf = Node::number(1.0);
        assert!(!substitute_variable_in_place(&mut rng, &mut leaf, &vars()));
    }

    #[test]
    fn operator_substitution_keeps_arity() {
        let mut rng = Rng::with_seed(8);
        let mut e = Node::multiply(Node::cos(Node::variable("x")), Node::number(1.0));
        for _ in 0..20 {
            assert!(substitute_unary_in_place(&mut rng, &mut e));
            assert!(substitute_binary_in_place(&mut rng, &mut e));
            assert!(e.is_binary());
            assert!(e.left().is_some_and(Node::is_unary));
            assert_eq!(e.height(), 3);
        }
        let mut leaf = Node::variable("x");
        assert!(!substitute_unary_in_place(&mut rng, &mut leaf));
        assert!(!substitute_binary_in_place(&mut rng, &mut leaf));
    }

    #[test]
    fn subtree_replacement_needs_a_non_root_inner_node() {
        let mut rng = Rng::with_seed(13);
        let mut shallow = Node::plus(Node::variable("x"), Node::number(1.0));
        assert!(!replace_subtree_in_place(&mut rng, &mut shallow, &vars(), &GenOptions::default()));

        for _ in 0..100 {
            let mut e = Node::plus(Node::sin(Node::cos(Node::variable("x"))), Node::variable("y"));
            assert!(replace_subtree_in_place(&mut rng, &mut e, &vars(), &GenOptions::default()));
            assert!(e.height() <= 4);
        }
    }
}
