//! The fixed operation catalog.
//!
//! Every operator is a plain tag dispatched through `match`, so it can travel
//! over the wire as its symbolic tag and be mapped back on the other side.

use core::fmt;
use core::str::FromStr;

use crate::error::ExprError;

/// Divisor substituted for an exact zero so that division stays total.
pub const DIVISION_EPSILON: f64 = 1e-6;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    #[cfg_attr(feature = "serde", serde(rename = "number"))]
    Number,
    #[cfg_attr(feature = "serde", serde(rename = "variable"))]
    Variable,
    #[cfg_attr(feature = "serde", serde(rename = "+"))]
    Plus,
    #[cfg_attr(feature = "serde", serde(rename = "-"))]
    Minus,
    #[cfg_attr(feature = "serde", serde(rename = "*"))]
    Multiply,
    #[cfg_attr(feature = "serde", serde(rename = "/"))]
    Divide,
    #[cfg_attr(feature = "serde", serde(rename = "sin"))]
    Sin,
    #[cfg_attr(feature = "serde", serde(rename = "cos"))]
    Cos,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Sin,
    Cos,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::Number,
        Operation::Variable,
        Operation::Plus,
        Operation::Minus,
        Operation::Multiply,
        Operation::Divide,
        Operation::Sin,
        Operation::Cos,
    ];
    pub const UNARY: [Operation; 2] = [Operation::Sin, Operation::Cos];
    pub const BINARY: [Operation; 4] = [
        Operation::Plus,
        Operation::Minus,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub const fn arity(self) -> u8 {
        match self {
            Operation::Number | Operation::Variable => 0,
            Operation::Sin | Operation::Cos => 1,
            Operation::Plus | Operation::Minus | Operation::Multiply | Operation::Divide => 2,
        }
    }

    pub const fn is_leaf(self) -> bool {
        self.arity() == 0
    }

    pub const fn is_unary(self) -> bool {
        self.arity() == 1
    }

    pub const fn is_binary(self) -> bool {
        self.arity() == 2
    }

    /// Stable wire tag.
    pub const fn tag(self) -> &'static str {
        match self {
            Operation::Number => "number",
            Operation::Variable => "variable",
            Operation::Plus => "+",
            Operation::Minus => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
            Operation::Sin => "sin",
            Operation::Cos => "cos",
        }
    }

    /// Symbol used when printing an expression.
    pub const fn symbol(self) -> &'static str {
        self.tag()
    }

    /// Look up a catalog operation by wire tag or by its long name
    /// (`"MINUS"`, `"division"`, `"identity"`, ...).
    pub fn from_tag(tag: &str) -> Result<Self, ExprError> {
        if let Some(op) = Self::ALL.iter().copied().find(|op| op.tag() == tag) {
            return Ok(op);
        }
        let op = match tag.to_ascii_lowercase().as_str() {
            "number" | "const" | "constant" => Operation::Number,
            "variable" | "identity" | "var" => Operation::Variable,
            "plus" | "add" => Operation::Plus,
            "minus" | "sub" => Operation::Minus,
            "multiply" | "multiplication" | "mul" => Operation::Multiply,
            "divide" | "division" | "div" => Operation::Divide,
            "sin" => Operation::Sin,
            "cos" => Operation::Cos,
            _ => return Err(ExprError::InvalidOperation(tag.to_string())),
        };
        Ok(op)
    }
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 2] = [UnaryOp::Sin, UnaryOp::Cos];

    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            UnaryOp::Sin => x.sin(),
            UnaryOp::Cos => x.cos(),
        }
    }
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 4] = [
        BinaryOp::Plus,
        BinaryOp::Minus,
        BinaryOp::Multiply,
        BinaryOp::Divide,
    ];

    #[inline]
    pub fn apply(self, x: f64, y: f64) -> f64 {
        match self {
            BinaryOp::Plus => x + y,
            BinaryOp::Minus => x - y,
            BinaryOp::Multiply => x * y,
            BinaryOp::Divide => {
                if y == 0.0 {
                    x / DIVISION_EPSILON
                } else {
                    x / y
                }
            }
        }
    }
}

impl From<UnaryOp> for Operation {
    fn from(op: UnaryOp) -> Self {
        match op {
            UnaryOp::Sin => Operation::Sin,
            UnaryOp::Cos => Operation::Cos,
        }
    }
}

impl From<BinaryOp> for Operation {
    fn from(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Plus => Operation::Plus,
            BinaryOp::Minus => Operation::Minus,
            BinaryOp::Multiply => Operation::Multiply,
            BinaryOp::Divide => Operation::Divide,
        }
    }
}

impl TryFrom<Operation> for UnaryOp {
    type Error = Operation;

    fn try_from(op: Operation) -> Result<Self, Self::Error> {
        match op {
            Operation::Sin => Ok(UnaryOp::Sin),
            Operation::Cos => Ok(UnaryOp::Cos),
            other => Err(other),
        }
    }
}

impl TryFrom<Operation> for BinaryOp {
    type Error = Operation;

    fn try_from(op: Operation) -> Result<Self, Self::Error> {
        match op {
            Operation::Plus => Ok(BinaryOp::Plus),
            Operation::Minus => Ok(BinaryOp::Minus),
            Operation::Multiply => Ok(BinaryOp::Multiply),
            Operation::Divide => Ok(BinaryOp::Divide),
            other => Err(other),
        }
    }
}

impl FromStr for Operation {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Operation::from(*self).symbol())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Operation::from(*self).symbol())
    }
}
