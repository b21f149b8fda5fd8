use crate::node::Node;

/// Preorder traversal yielding `(depth, node)`; the root has depth 1.
pub struct Preorder<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        match node {
            Node::Unary(_, child) => self.stack.push((depth + 1, child)),
            Node::Binary(_, left, right) => {
                self.stack.push((depth + 1, right));
                self.stack.push((depth + 1, left));
            }
            Node::Number(_) | Node::Variable(_) => {}
        }
        Some((depth, node))
    }
}

impl Node {
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![(1, self)] }
    }

    pub fn count_nodes(&self) -> usize {
        self.preorder().count()
    }

    /// Preorder positions of every node matching `filter`.
    pub fn positions_where(&self, mut filter: impl FnMut(&Node) -> bool) -> Vec<usize> {
        self.preorder()
            .enumerate()
            .filter_map(|(i, (_, n))| filter(n).then_some(i))
            .collect()
    }

    pub fn nth(&self, index: usize) -> Option<&Node> {
        self.preorder().nth(index).map(|(_, n)| n)
    }

    /// Mutable access to the node at preorder position `index`.
    pub fn nth_mut(&mut self, index: usize) -> Option<&mut Node> {
        let mut remaining = index;
        nth_mut_impl(self, &mut remaining)
    }

    pub fn has_numbers(&self) -> bool {
        self.preorder().any(|(_, n)| n.is_number())
    }

    pub fn has_variables(&self) -> bool {
        self.preorder().any(|(_, n)| n.is_variable())
    }

    /// Names of all variables referenced in the subtree, in preorder.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.preorder().filter_map(|(_, n)| n.name())
    }

    pub fn all_numbers_finite(&self) -> bool {
        self.preorder().all(|(_, n)| n.value().map_or(true, f64::is_finite))
    }
}

fn nth_mut_impl<'a>(node: &'a mut Node, remaining: &mut usize) -> Option<&'a mut Node> {
    if *remaining == 0 {
        return Some(node);
    }
    *remaining -= 1;
    match node {
        Node::Unary(_, child) => nth_mut_impl(child, remaining),
        Node::Binary(_, left, right) => {
            let left_size = left.count_nodes();
            if *remaining < left_size {
                nth_mut_impl(left, remaining)
            } else {
                *remaining -= left_size;
                nth_mut_impl(right, remaining)
            }
        }
        Node::Number(_) | Node::Variable(_) => None,
    }
}
