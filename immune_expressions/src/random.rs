//! Random expression generation.
//!
//! Trees are grown breadth-first from a binary root. A frontier node only gets
//! children when that keeps the tree within the height limit; every node left
//! without children once the frontier is exhausted becomes a number or a
//! variable.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use fastrand::Rng;

use crate::expression::Expression;
use crate::node::Node;
use crate::operation::{BinaryOp, UnaryOp};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenOptions {
    /// Probability of drawing a binary operator outright; otherwise the
    /// operator is drawn uniformly from unary and binary operators together.
    pub binary_probability: f64,
    /// Bounds for freshly generated numeric leaves.
    pub number_min: f64,
    pub number_max: f64,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            binary_probability: 0.6,
            number_min: -10.0,
            number_max: 10.0,
        }
    }
}

impl GenOptions {
    pub fn number_range(&self) -> RangeInclusive<f64> {
        self.number_min..=self.number_max
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Branch {
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl Branch {
    fn arity(self) -> usize {
        match self {
            Branch::Unary(_) => 1,
            Branch::Binary(_) => 2,
        }
    }
}

struct Draft {
    op: Branch,
    depth: usize,
    children: Vec<usize>,
}

pub fn random_binary_op(rng: &mut Rng) -> BinaryOp {
    BinaryOp::ALL[rng.usize(..BinaryOp::ALL.len())]
}

pub fn random_unary_op(rng: &mut Rng) -> UnaryOp {
    UnaryOp::ALL[rng.usize(..UnaryOp::ALL.len())]
}

fn random_branch(rng: &mut Rng, options: &GenOptions) -> Branch {
    if rng.f64() < options.binary_probability {
        return Branch::Binary(random_binary_op(rng));
    }
    let n_unary = UnaryOp::ALL.len();
    let pick = rng.usize(..n_unary + BinaryOp::ALL.len());
    if pick < n_unary {
        Branch::Unary(UnaryOp::ALL[pick])
    } else {
        Branch::Binary(BinaryOp::ALL[pick - n_unary])
    }
}

pub fn random_number(rng: &mut Rng, options: &GenOptions) -> f64 {
    let (lo, hi) = (options.number_min, options.number_max);
    if hi <= lo {
        return lo;
    }
    lo + rng.f64() * (hi - lo)
}

/// A number or a variable with equal probability. Without variables the leaf
/// is always a number.
pub fn random_leaf(rng: &mut Rng, variables: &[String], options: &GenOptions) -> Node {
    if variables.is_empty() || rng.bool() {
        Node::Number(random_number(rng, options))
    } else {
        Node::Variable(variables[rng.usize(..variables.len())].clone())
    }
}

/// Generate a random tree of height at most `max_height` (at least 1).
pub fn random_node(rng: &mut Rng, max_height: usize, variables: &[String], options: &GenOptions) -> Node {
    let max_height = max_height.max(1);
    let mut drafts = vec![Draft {
        op: Branch::Binary(random_binary_op(rng)),
        depth: 1,
        children: Vec::new(),
    }];
    let mut frontier = VecDeque::from([0usize]);

    while let Some(i) = frontier.pop_front() {
        let child_depth = drafts[i].depth + 1;
        if child_depth > max_height {
            continue;
        }
        for _ in 0..drafts[i].op.arity() {
            let idx = drafts.len();
            drafts.push(Draft {
                op: random_branch(rng, options),
                depth: child_depth,
                children: Vec::new(),
            });
            drafts[i].children.push(idx);
            frontier.push_back(idx);
        }
    }

    build(rng, &drafts, 0, variables, options)
}

fn build(rng: &mut Rng, drafts: &[Draft], i: usize, variables: &[String], options: &GenOptions) -> Node {
    let draft = &drafts[i];
    match (draft.op, draft.children.as_slice()) {
        (Branch::Unary(op), &[c]) => Node::Unary(op, Box::new(build(rng, drafts, c, variables, options))),
        (Branch::Binary(op), &[l, r]) => {
            let left = build(rng, drafts, l, variables, options);
            let right = build(rng, drafts, r, variables, options);
            Node::Binary(op, Box::new(left), Box::new(right))
        }
        _ => random_leaf(rng, variables, options),
    }
}

impl Expression {
    /// Generate a random expression over `variables` with height at most
    /// `max_height`.
    pub fn random(rng: &mut Rng, max_height: usize, variables: &[String], options: &GenOptions) -> Self {
        Expression::new(random_node(rng, max_height, variables, options), variables.to_vec())
    }
}
