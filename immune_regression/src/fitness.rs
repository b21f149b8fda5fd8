use immune_expressions::{ExprError, Expression, Node};

use crate::dataset::Dataset;

/// Euclidean error of an expression over a sample set; lower is better and
/// 0 is an exact fit.
#[derive(Clone, Copy, Debug)]
pub struct FitnessFunction<'a> {
    dataset: &'a Dataset,
}

impl<'a> FitnessFunction<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn score(&self, expr: &Expression) -> Result<f64, ExprError> {
        self.score_node(&expr.root)
    }

    pub fn score_node(&self, root: &Node) -> Result<f64, ExprError> {
        let mut sum = 0.0;
        for (row, expected) in self.dataset.rows() {
            let residual = root.evaluate(&row)? - expected;
            sum += residual * residual;
        }
        Ok(sum.sqrt())
    }
}

/// Total order on scores for ranking: ascending, with NaN after everything.
pub(crate) fn rank_key(score: f64) -> f64 {
    if score.is_nan() { f64::INFINITY } else { score }
}
