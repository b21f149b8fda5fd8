use immune_expressions::Node;

#[allow(dead_code)]
pub fn x() -> Node {
    Node::variable("x")
}

#[allow(dead_code)]
pub fn y() -> Node {
    Node::variable("y")
}

#[allow(dead_code)]
pub fn n(v: f64) -> Node {
    Node::number(v)
}

#[allow(dead_code)]
pub fn vars(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// x * x + x * sin(x)
#[allow(dead_code)]
pub fn target_expr() -> Node {
    Node::plus(Node::multiply(x(), x()), Node::multiply(x(), Node::sin(x())))
}
