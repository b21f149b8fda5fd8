use immune_expressions::{ExprError, Expression};

use crate::fitness::FitnessFunction;

/// A scored candidate ("lymphocyte").
#[derive(Clone, Debug, PartialEq)]
pub struct PopMember {
    pub expr: Expression,
    pub score: f64,
}

impl PopMember {
    pub fn new(expr: Expression, score: f64) -> Self {
        Self { expr, score }
    }

    pub fn scored(expr: Expression, fitness: &FitnessFunction<'_>) -> Result<Self, ExprError> {
        let score = fitness.score(&expr)?;
        Ok(Self { expr, score })
    }
}
