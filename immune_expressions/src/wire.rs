//! Serde representation of nodes.
//!
//! Each node is written as its operation tag plus either its payload or its
//! children, e.g. `{"op":"+","children":[{"op":"variable","name":"x"},{"op":"number","value":1.0}]}`.
//! Decoding resolves the tag against the catalog and re-checks node shape.

use serde::{Deserialize, Serialize};

use crate::error::ExprError;
use crate::node::{Node, Value};
use crate::operation::Operation;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireNode {
    pub op: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WireNode>,
}

impl From<Node> for WireNode {
    fn from(node: Node) -> Self {
        let op = node.operation();
        match node {
            Node::Number(v) => WireNode {
                op,
                value: Some(v),
                name: None,
                children: Vec::new(),
            },
            Node::Variable(name) => WireNode {
                op,
                value: None,
                name: Some(name),
                children: Vec::new(),
            },
            Node::Unary(_, child) => WireNode {
                op,
                value: None,
                name: None,
                children: vec![WireNode::from(*child)],
            },
            Node::Binary(_, left, right) => WireNode {
                op,
                value: None,
                name: None,
                children: vec![WireNode::from(*left), WireNode::from(*right)],
            },
        }
    }
}

impl TryFrom<WireNode> for Node {
    type Error = ExprError;

    fn try_from(wire: WireNode) -> Result<Self, Self::Error> {
        let WireNode {
            op,
            value,
            name,
            children,
        } = wire;
        if children.len() > 2 {
            return Err(ExprError::MalformedNode {
                op,
                reason: "more than two children",
            });
        }
        let mut children = children.into_iter().map(Node::try_from);
        let left = children.next().transpose()?;
        let right = children.next().transpose()?;
        let payload = match (op, value, name) {
            (Operation::Number, Some(v), None) => Some(Value::Number(v)),
            (Operation::Variable, None, Some(name)) => Some(Value::Variable(name)),
            (_, None, None) => None,
            _ => {
                return Err(ExprError::MalformedNode {
                    op,
                    reason: "payload does not match operation",
                })
            }
        };
        Node::new(op, left, right, payload)
    }
}
