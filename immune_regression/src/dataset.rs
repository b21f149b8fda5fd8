use core::fmt;
use std::collections::BTreeMap;

use fastrand::Rng;
use immune_expressions::Bindings;
use ndarray::{Array1, Array2, ArrayView1};

use crate::random::uniform;

#[derive(Clone, Debug, PartialEq)]
pub enum DatasetError {
    Shape { rows: usize, columns: usize, expected: usize, names: usize },
    MissingVariable { row: usize, name: String },
    Empty,
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Shape {
                rows,
                columns,
                expected,
                names,
            } => write!(
                f,
                "inputs are {rows}x{columns} with {names} variable name(s), but {expected} expected value(s)"
            ),
            DatasetError::MissingVariable { row, name } => {
                write!(f, "sample {row} has no value for variable {name:?}")
            }
            DatasetError::Empty => write!(f, "sample set is empty"),
        }
    }
}

impl std::error::Error for DatasetError {}

/// One sample point: a variable assignment and the expected output there.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub inputs: BTreeMap<String, f64>,
    pub expected: f64,
}

impl Sample {
    pub fn new<'a>(inputs: impl IntoIterator<Item = (&'a str, f64)>, expected: f64) -> Self {
        Self {
            inputs: inputs.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            expected,
        }
    }
}

/// Source of the sample set a search is fitted against.
pub trait SampleDataSource {
    fn load(&self) -> Result<Dataset, DatasetError>;
}

impl SampleDataSource for Dataset {
    fn load(&self) -> Result<Dataset, DatasetError> {
        Ok(self.clone())
    }
}

impl SampleDataSource for [Sample] {
    fn load(&self) -> Result<Dataset, DatasetError> {
        Dataset::from_samples(self)
    }
}

impl SampleDataSource for Vec<Sample> {
    fn load(&self) -> Result<Dataset, DatasetError> {
        Dataset::from_samples(self)
    }
}

/// Points drawn uniformly from `[-half_width, half_width]` per variable and
/// labelled by `target`.
pub struct SyntheticSource<F> {
    pub variables: Vec<String>,
    pub n_samples: usize,
    pub half_width: f64,
    pub seed: u64,
    pub target: F,
}

impl<F: Fn(&[f64]) -> f64> SampleDataSource for SyntheticSource<F> {
    fn load(&self) -> Result<Dataset, DatasetError> {
        let mut rng = Rng::with_seed(self.seed);
        let n_vars = self.variables.len();
        let mut x = Array2::<f64>::zeros((self.n_samples, n_vars));
        let mut y = Array1::<f64>::zeros(self.n_samples);
        for (i, mut row) in x.rows_mut().into_iter().enumerate() {
            for v in row.iter_mut() {
                *v = uniform(&mut rng, -self.half_width, self.half_width);
            }
            let inputs: Vec<f64> = row.to_vec();
            y[i] = (self.target)(&inputs);
        }
        Dataset::new(x, y, self.variables.clone())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    /// Row-major inputs with shape `(n_rows, n_variables)`.
    pub x: Array2<f64>,
    /// Expected output per row.
    pub y: Array1<f64>,
    pub variable_names: Vec<String>,
}

impl Dataset {
    pub fn new(x: Array2<f64>, y: Array1<f64>, variable_names: Vec<String>) -> Result<Self, DatasetError> {
        let x = x.as_standard_layout().to_owned();
        let (rows, columns) = x.dim();
        if y.len() != rows || variable_names.len() != columns {
            return Err(DatasetError::Shape {
                rows,
                columns,
                expected: y.len(),
                names: variable_names.len(),
            });
        }
        Ok(Self { x, y, variable_names })
    }

    /// Build from explicit samples. Variable names are the union of all
    /// sample keys; every sample must bind every name.
    pub fn from_samples(samples: &[Sample]) -> Result<Self, DatasetError> {
        let first = samples.first().ok_or(DatasetError::Empty)?;
        let names: Vec<String> = first.inputs.keys().cloned().collect();
        let mut x = Array2::<f64>::zeros((samples.len(), names.len()));
        let mut y = Array1::<f64>::zeros(samples.len());
        for (i, sample) in samples.iter().enumerate() {
            if let Some(extra) = sample.inputs.keys().find(|k| !names.contains(k)) {
                return Err(DatasetError::MissingVariable {
                    row: i,
                    name: extra.clone(),
                });
            }
            for (j, name) in names.iter().enumerate() {
                x[[i, j]] = *sample.inputs.get(name).ok_or_else(|| DatasetError::MissingVariable {
                    row: i,
                    name: name.clone(),
                })?;
            }
            y[i] = sample.expected;
        }
        Dataset::new(x, y, names)
    }

    pub fn n_rows(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn row(&self, i: usize) -> Row<'_> {
        Row {
            names: &self.variable_names,
            values: self.x.row(i),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = (Row<'_>, f64)> {
        (0..self.n_rows()).map(move |i| (self.row(i), self.y[i]))
    }
}

/// A dataset row viewed as variable bindings.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    names: &'a [String],
    values: ArrayView1<'a, f64>,
}

impl Bindings for Row<'_> {
    fn value_of(&self, name: &str) -> Option<f64> {
        let j = self.names.iter().position(|n| n == name)?;
        self.values.get(j).copied()
    }
}
