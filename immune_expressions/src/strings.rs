use core::fmt;

use crate::expression::Expression;
use crate::node::Node;

/// Render a numeric literal so that it always reads as a float (`2.0`, `-0.5`).
pub fn string_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

/// Fully parenthesised infix for binary nodes, `op(x)` for unary ones.
pub fn string_tree(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Number(v) => out.push_str(&string_number(*v)),
        Node::Variable(name) => out.push_str(name),
        Node::Unary(op, child) => {
            out.push_str(&op.to_string());
            out.push('(');
            write_node(out, child);
            out.push(')');
        }
        Node::Binary(op, left, right) => {
            out.push('(');
            write_node(out, left);
            out.push(' ');
            out.push_str(&op.to_string());
            out.push(' ');
            write_node(out, right);
            out.push(')');
        }
    }
}

pub fn print_tree(expr: &Expression) {
    println!("{}", string_tree(&expr.root));
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&string_tree(self))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}
