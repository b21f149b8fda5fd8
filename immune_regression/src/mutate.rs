use fastrand::Rng;
use immune_expressions::{Expression, GenOptions};

use crate::mutation_functions::{
    perturb_number_in_place, replace_subtree_in_place, substitute_binary_in_place, substitute_unary_in_place,
    substitute_variable_in_place,
};
use crate::options::MutationWeights;
use crate::random::weighted_index;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MutationKind {
    NumberPerturbation,
    VariableSubstitution,
    UnaryOperatorSubstitution,
    BinaryOperatorSubstitution,
    SubtreeReplacement,
}

impl MutationKind {
    /// In the same order as the fields of [`MutationWeights`].
    pub const ALL: [MutationKind; 5] = [
        MutationKind::NumberPerturbation,
        MutationKind::VariableSubstitution,
        MutationKind::UnaryOperatorSubstitution,
        MutationKind::BinaryOperatorSubstitution,
        MutationKind::SubtreeReplacement,
    ];
}

/// A mutated copy plus what was done to it.
#[derive(Clone, Debug)]
pub struct Mutation {
    pub expr: Expression,
    pub kind: MutationKind,
    /// `false` when the chosen kind found nothing to act on; `expr` is then an
    /// unchanged copy.
    pub applied: bool,
}

pub fn sample_mutation(rng: &mut Rng, weights: &MutationWeights) -> MutationKind {
    let idx = weighted_index(rng, &weights.as_array()).unwrap_or_else(|| rng.usize(..MutationKind::ALL.len()));
    MutationKind::ALL[idx]
}

/// Produces mutated copies of expressions; the source is never modified.
#[derive(Clone, Debug, Default)]
pub struct Mutator {
    pub weights: MutationWeights,
    pub generation: GenOptions,
}

impl Mutator {
    pub fn new(weights: MutationWeights, generation: GenOptions) -> Self {
        Self { weights, generation }
    }

    pub fn mutate(&self, rng: &mut Rng, expr: &Expression) -> Mutation {
        let kind = sample_mutation(rng, &self.weights);
        self.mutate_with(rng, expr, kind)
    }

    pub fn mutate_with(&self, rng: &mut Rng, expr: &Expression, kind: MutationKind) -> Mutation {
        let mut copy = expr.clone();
        let root = &mut copy.root;
        let applied = match kind {
            MutationKind::NumberPerturbation => perturb_number_in_place(rng, root),
            MutationKind::VariableSubstitution => substitute_variable_in_place(rng, root, &expr.variables),
            MutationKind::UnaryOperatorSubstitution => substitute_unary_in_place(rng, root),
            MutationKind::BinaryOperatorSubstitution => substitute_binary_in_place(rng, root),
            MutationKind::SubtreeReplacement => {
                replace_subtree_in_place(rng, root, &expr.variables, &self.generation)
            }
        };
        Mutation {
            expr: copy,
            kind,
            applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use immune_expressions::Node;

    use super::*;

    #[test]
    fn zero_weights_are_never_drawn() {
        let weights = MutationWeights {
            number_perturbation: 0.0,
            variable_substitution: 0.0,
            unary_operator_substitution: 0.0,
            binary_operator_substitution: 1.0,
            subtree_replacement: 0.0,
        };
        let mut rng = Rng::with_seed(0);
        for _ in 0..100 {
            assert_eq!(sample_mutation(&mut rng, &weights), MutationKind::BinaryOperatorSubstitution);
        }
    }

    #[test]
    fn empty_pool_returns_unchanged_copy() {
        let expr = Expression::new(Node::variable("x"), vec!["x".into()]);
        let mut rng = Rng::with_seed(1);
        let m = Mutator::default().mutate_with(&mut rng, &expr, MutationKind::NumberPerturbation);
        assert!(!m.applied);
        assert_eq!(m.expr, expr);
    }

    #[test]
    fn source_is_left_untouched() {
        let expr = Expression::new(
            Node::plus(Node::sin(Node::variable("x")), Node::number(3.0)),
            vec!["x".into()],
        );
        let before = expr.clone();
        let mut rng = Rng::with_seed(2);
        let mutator = Mutator::default();
        for kind in MutationKind::ALL {
            let _ = mutator.mutate_with(&mut rng, &expr, kind);
        }
        assert_eq!(expr, before);
    }
}
