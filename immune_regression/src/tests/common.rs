use immune_expressions::{Expression, Node};
use ndarray::{Array1, Array2};

use crate::{Dataset, Options};

pub(crate) fn vars() -> Vec<String> {
    vec!["x".to_string()]
}

/// y = x^2 on evenly spaced points in [-2, 2].
pub(crate) fn squares(n_rows: usize) -> Dataset {
    let xs: Vec<f64> = (0..n_rows)
        .map(|i| -2.0 + 4.0 * i as f64 / (n_rows - 1) as f64)
        .collect();
    let y = Array1::from_iter(xs.iter().map(|x| x * x));
    let x = Array2::from_shape_vec((n_rows, 1), xs).unwrap();
    Dataset::new(x, y, vars()).unwrap()
}

/// y = exp(x) on evenly spaced points in [-2, 2]; no catalog tree fits it
/// exactly, so runs over it always use their whole generation budget.
pub(crate) fn exponential(n_rows: usize) -> Dataset {
    let xs: Vec<f64> = (0..n_rows)
        .map(|i| -2.0 + 4.0 * i as f64 / (n_rows - 1) as f64)
        .collect();
    let y = Array1::from_iter(xs.iter().map(|x| x.exp()));
    let x = Array2::from_shape_vec((n_rows, 1), xs).unwrap();
    Dataset::new(x, y, vars()).unwrap()
}

pub(crate) fn x_squared() -> Expression {
    Expression::new(Node::multiply(Node::variable("x"), Node::variable("x")), vars())
}

pub(crate) fn small_options(population_size: usize, max_generations: usize) -> Options {
    Options {
        seed: 17,
        population_size,
        max_generations,
        accuracy: 0.0,
        ..Default::default()
    }
}
