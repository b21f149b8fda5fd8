use core::fmt;

use crate::operation::Operation;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprError {
    /// The operation tag is not part of the catalog.
    InvalidOperation(String),
    /// Children or payload do not match the operation's arity/kind.
    MalformedNode { op: Operation, reason: &'static str },
    /// Evaluation referenced a variable with no binding.
    UndefinedVariable(String),
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::InvalidOperation(tag) => write!(f, "unsupported operation {tag:?}"),
            ExprError::MalformedNode { op, reason } => {
                write!(f, "malformed {} node: {reason}", op.tag())
            }
            ExprError::UndefinedVariable(name) => write!(f, "no value bound for variable {name:?}"),
        }
    }
}

impl std::error::Error for ExprError {}
