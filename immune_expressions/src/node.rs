use crate::error::ExprError;
use crate::operation::{BinaryOp, Operation, UnaryOp};

/// A node of an expression tree.
///
/// Each variant fixes which payload and how many children exist, so a node can
/// never carry both a value and children. Children are owned; `clone` is a
/// deep copy and in-place edits never reach another tree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::wire::WireNode", into = "crate::wire::WireNode")
)]
pub enum Node {
    Number(f64),
    Variable(String),
    Unary(UnaryOp, Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
}

/// Leaf payload accepted by [`Node::new`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Variable(String),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(name: &str) -> Self {
        Value::Variable(name.to_string())
    }
}

impl From<String> for Value {
    fn from(name: String) -> Self {
        Value::Variable(name)
    }
}

impl Node {
    /// Build a node from an operation plus optional children and payload.
    ///
    /// Fails with [`ExprError::MalformedNode`] when the parts do not match the
    /// operation: leaves need their payload and no children, operators need
    /// exactly `arity` children and no payload.
    pub fn new(op: Operation, left: Option<Node>, right: Option<Node>, value: Option<Value>) -> Result<Self, ExprError> {
        let malformed = |reason| Err(ExprError::MalformedNode { op, reason });
        match op {
            Operation::Number | Operation::Variable => {
                if left.is_some() || right.is_some() {
                    return malformed("leaf nodes take no children");
                }
                match (op, value) {
                    (Operation::Number, Some(Value::Number(v))) => Ok(Node::Number(v)),
                    (Operation::Variable, Some(Value::Variable(name))) => Ok(Node::Variable(name)),
                    (Operation::Number, _) => malformed("number node requires a numeric value"),
                    _ => malformed("variable node requires a variable name"),
                }
            }
            _ if value.is_some() => malformed("operator nodes carry no value"),
            Operation::Sin | Operation::Cos => match (left, right) {
                (Some(child), None) => Node::unary(op, child),
                _ => malformed("unary nodes take exactly one (left) child"),
            },
            Operation::Plus | Operation::Minus | Operation::Multiply | Operation::Divide => match (left, right) {
                (Some(l), Some(r)) => Node::binary(op, l, r),
                _ => malformed("binary nodes take exactly two children"),
            },
        }
    }

    /// Like [`Node::new`], but resolves the operation from its tag first.
    ///
    /// An unknown tag fails with [`ExprError::InvalidOperation`].
    pub fn from_tag(tag: &str, left: Option<Node>, right: Option<Node>, value: Option<Value>) -> Result<Self, ExprError> {
        let op = Operation::from_tag(tag)?;
        Node::new(op, left, right, value)
    }

    pub fn number(v: f64) -> Self {
        Node::Number(v)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Node::Variable(name.into())
    }

    pub fn unary(op: Operation, child: Node) -> Result<Self, ExprError> {
        let op = UnaryOp::try_from(op).map_err(|op| ExprError::MalformedNode {
            op,
            reason: "not a unary operation",
        })?;
        Ok(Node::Unary(op, Box::new(child)))
    }

    pub fn binary(op: Operation, left: Node, right: Node) -> Result<Self, ExprError> {
        let op = BinaryOp::try_from(op).map_err(|op| ExprError::MalformedNode {
            op,
            reason: "not a binary operation",
        })?;
        Ok(Node::Binary(op, Box::new(left), Box::new(right)))
    }

    pub fn sin(child: Node) -> Self {
        Node::Unary(UnaryOp::Sin, Box::new(child))
    }

    pub fn cos(child: Node) -> Self {
        Node::Unary(UnaryOp::Cos, Box::new(child))
    }

    pub fn plus(left: Node, right: Node) -> Self {
        Node::Binary(BinaryOp::Plus, Box::new(left), Box::new(right))
    }

    pub fn minus(left: Node, right: Node) -> Self {
        Node::Binary(BinaryOp::Minus, Box::new(left), Box::new(right))
    }

    pub fn multiply(left: Node, right: Node) -> Self {
        Node::Binary(BinaryOp::Multiply, Box::new(left), Box::new(right))
    }

    pub fn divide(left: Node, right: Node) -> Self {
        Node::Binary(BinaryOp::Divide, Box::new(left), Box::new(right))
    }

    pub fn operation(&self) -> Operation {
        match self {
            Node::Number(_) => Operation::Number,
            Node::Variable(_) => Operation::Variable,
            Node::Unary(op, _) => Operation::from(*op),
            Node::Binary(op, _, _) => Operation::from(*op),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Node::Number(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Node::Variable(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Number(_) | Node::Variable(_))
    }

    pub fn is_unary(&self) -> bool {
        matches!(self, Node::Unary(..))
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Node::Binary(..))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Node::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Variable(name) => Some(name),
            _ => None,
        }
    }

    pub fn left(&self) -> Option<&Node> {
        match self {
            Node::Unary(_, child) => Some(child),
            Node::Binary(_, left, _) => Some(left),
            _ => None,
        }
    }

    pub fn right(&self) -> Option<&Node> {
        match self {
            Node::Binary(_, _, right) => Some(right),
            _ => None,
        }
    }

    /// Height of the subtree rooted here. Leaves have height 1.
    pub fn height(&self) -> usize {
        if self.is_leaf() {
            return 1;
        }
        let left = self.left().map(Node::height).unwrap_or(0);
        let right = self.right().map(Node::height).unwrap_or(0);
        left.max(right) + 1
    }
}
