use crate::bindings::Bindings;
use crate::error::ExprError;
use crate::node::Node;

impl Node {
    /// Evaluate the subtree rooted here.
    ///
    /// A variable without a binding is an error; division by zero is not (see
    /// [`crate::operation::DIVISION_EPSILON`]).
    pub fn evaluate<B: Bindings + ?Sized>(&self, bindings: &B) -> Result<f64, ExprError> {
        match self {
            Node::Number(v) => Ok(*v),
            Node::Variable(name) => bindings
                .value_of(name)
                .ok_or_else(|| ExprError::UndefinedVariable(name.clone())),
            Node::Unary(op, child) => Ok(op.apply(child.evaluate(bindings)?)),
            Node::Binary(op, left, right) => {
                let l = left.evaluate(bindings)?;
                let r = right.evaluate(bindings)?;
                Ok(op.apply(l, r))
            }
        }
    }

    /// Evaluate a subtree that contains no variables.
    pub fn evaluate_constant(&self) -> Result<f64, ExprError> {
        self.evaluate(&[] as &[(&str, f64)])
    }
}
