#![deny(unsafe_code)]

pub mod bindings;
pub mod error;
pub mod evaluate;
pub mod expression;
pub mod node;
pub mod node_utils;
pub mod operation;
pub mod random;
pub mod simplify;
pub mod strings;

#[cfg(feature = "serde")]
pub mod wire;

#[cfg(feature = "proptest")]
pub mod proptest_utils;

pub use fastrand;

pub use crate::bindings::Bindings;
pub use crate::error::ExprError;
pub use crate::expression::Expression;
pub use crate::node::{Node, Value};
pub use crate::node_utils::Preorder;
pub use crate::operation::{BinaryOp, DIVISION_EPSILON, Operation, UnaryOp};
pub use crate::random::{GenOptions, random_leaf, random_node};
pub use crate::simplify::{NUMBER_DECIMALS, simplify_in_place, simplify_pass};
pub use crate::strings::{print_tree, string_tree};
