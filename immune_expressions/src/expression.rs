use std::collections::BTreeSet;

use crate::bindings::Bindings;
use crate::error::ExprError;
use crate::node::Node;
use crate::simplify::simplify_in_place;

/// An expression tree together with the variable names it may draw from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expression {
    pub root: Node,
    pub variables: Vec<String>,
}

impl Expression {
    pub fn new(root: Node, variables: Vec<String>) -> Self {
        Self { root, variables }
    }

    pub fn evaluate<B: Bindings + ?Sized>(&self, bindings: &B) -> Result<f64, ExprError> {
        self.root.evaluate(bindings)
    }

    pub fn height(&self) -> usize {
        self.root.height()
    }

    pub fn count_nodes(&self) -> usize {
        self.root.count_nodes()
    }

    /// Simplify to a fixed point; returns the number of passes that changed the tree.
    pub fn simplify(&mut self) -> usize {
        simplify_in_place(&mut self.root)
    }

    pub fn used_variables(&self) -> BTreeSet<&str> {
        self.root.variable_names().collect()
    }

    /// Whether every variable referenced by the tree is in `variables`.
    pub fn references_only(&self, variables: &[String]) -> bool {
        self.root.variable_names().all(|name| variables.iter().any(|v| v == name))
    }
}
