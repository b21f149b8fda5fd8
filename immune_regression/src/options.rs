use core::fmt;

use immune_expressions::GenOptions;

use crate::dataset::Dataset;

#[rustfmt::skip]
macro_rules! immune_mutation_weights_spec {
    ($m:ident) => {
        $m! {
            number_perturbation:
                (f64, 1.0, "mw-number-perturbation"),
            variable_substitution:
                (f64, 1.0, "mw-variable-substitution"),
            unary_operator_substitution:
                (f64, 1.0, "mw-unary-operator-substitution"),
            binary_operator_substitution:
                (f64, 1.0, "mw-binary-operator-substitution"),
            subtree_replacement:
                (f64, 1.0, "mw-subtree-replacement"),
        }
    };
}

#[rustfmt::skip]
macro_rules! immune_options_spec {
    ($m:ident) => {
        $m! {
            values {
                seed:
                    (u64, 0, "seed"),
                population_size:
                    (usize, 100, "population-size"),
                max_generations:
                    (usize, 30, "max-generations"),
                max_height:
                    (usize, 4, "max-height"),
                accuracy:
                    (f64, 0.001, "accuracy"),
                migration_fraction:
                    (f64, 0.5, "migration-fraction"),
            }
            neg_flags {
                simplify_result:
                    (true, no_simplify_result, "no-simplify-result"),
            }
            pos_flags {
                progress:
                    (false, progress, "progress"),
            }
        }
    };
}

#[rustfmt::skip]
macro_rules! __define_mutation_weights {
    ( $( $name:ident: ($ty:ty, $default:expr, $cli_long:literal), )* ) => {
        /// Relative odds of each mutation kind; only ratios matter.
        #[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
        #[cfg_attr(feature = "serde", serde(default))]
        #[derive(Clone, Debug, PartialEq)]
        pub struct MutationWeights {
            $(pub $name: $ty,)*
        }

        impl Default for MutationWeights {
            fn default() -> Self {
                Self { $($name: $default,)* }
            }
        }

        impl MutationWeights {
            pub(crate) fn as_array(&self) -> Vec<f64> {
                vec![$(self.$name,)*]
            }
        }
    };
}

immune_mutation_weights_spec!(__define_mutation_weights);

macro_rules! __define_options {
    (
        values { $( $name:ident: ($ty:ty, $default:expr, $cli_long:literal), )* }
        neg_flags { $( $iname:ident: ($bdefault:expr, $cli_name:ident, $cli_blong:literal), )* }
        pos_flags { $( $pname:ident: ($pdefault:expr, $cli_pname:ident, $cli_plong:literal), )* }
    ) => {
        #[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
        #[cfg_attr(feature = "serde", serde(default))]
        #[derive(Clone, Debug, PartialEq)]
        pub struct Options {
            $(pub $name: $ty,)*
            $(pub $iname: bool,)*
            $(pub $pname: bool,)*

            pub generation: GenOptions,
            pub mutation_weights: MutationWeights,
        }

        impl Default for Options {
            fn default() -> Self {
                Self {
                    $($name: $default,)*
                    $($iname: $bdefault,)*
                    $($pname: $pdefault,)*
                    generation: GenOptions::default(),
                    mutation_weights: MutationWeights::default(),
                }
            }
        }
    };
}

immune_options_spec!(__define_options);

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    PopulationTooSmall(usize),
    ZeroHeight,
    NoVariables,
    NoSamples,
    InvalidAccuracy(f64),
    InvalidProbability { name: &'static str, value: f64 },
    InvalidNumberRange { min: f64, max: f64 },
    NoMutationWeight,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::PopulationTooSmall(n) => {
                write!(f, "population_size must be at least 2 (got {n})")
            }
            ConfigError::ZeroHeight => write!(f, "max_height must be at least 1"),
            ConfigError::NoVariables => write!(f, "the sample set declares no variables"),
            ConfigError::NoSamples => write!(f, "the sample set is empty"),
            ConfigError::InvalidAccuracy(a) => write!(f, "accuracy must be finite and non-negative (got {a})"),
            ConfigError::InvalidProbability { name, value } => {
                write!(f, "{name} must lie in [0, 1] (got {value})")
            }
            ConfigError::InvalidNumberRange { min, max } => {
                write!(f, "number range [{min}, {max}] is empty or not finite")
            }
            ConfigError::NoMutationWeight => write!(f, "at least one mutation weight must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

impl Options {
    /// Check the options against the sample set a search will run on.
    pub fn validate(&self, dataset: &Dataset) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.max_height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if dataset.variable_names.is_empty() {
            return Err(ConfigError::NoVariables);
        }
        if dataset.is_empty() {
            return Err(ConfigError::NoSamples);
        }
        if !self.accuracy.is_finite() || self.accuracy < 0.0 {
            return Err(ConfigError::InvalidAccuracy(self.accuracy));
        }
        check_probability("migration_fraction", self.migration_fraction)?;
        check_probability("binary_probability", self.generation.binary_probability)?;
        let (min, max) = (self.generation.number_min, self.generation.number_max);
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(ConfigError::InvalidNumberRange { min, max });
        }
        if !self
            .mutation_weights
            .as_array()
            .iter()
            .any(|w| w.is_finite() && *w > 0.0)
        {
            return Err(ConfigError::NoMutationWeight);
        }
        Ok(())
    }

    /// Largest number of migrants merged into one generation.
    pub fn migration_cap(&self) -> usize {
        (self.migration_fraction * self.population_size as f64).ceil() as usize
    }
}

#[cfg(feature = "cli")]
pub(crate) mod cli_args {
    use clap::Args;

    use super::{MutationWeights, Options};

    macro_rules! __define_mutation_weights_args {
        ( $( $name:ident: ($ty:ty, $default:expr, $cli_long:literal), )* ) => {
            #[derive(Args, Debug, Clone, Default)]
            pub struct MutationWeightsArgs {
                $(#[arg(long = $cli_long)] pub $name: Option<$ty>,)*
            }

            impl MutationWeightsArgs {
                pub fn apply_to(&self, w: &mut MutationWeights) {
                    $(if let Some(v) = self.$name { w.$name = v; })*
                }
            }
        };
    }

    immune_mutation_weights_spec!(__define_mutation_weights_args);

    macro_rules! __define_options_args {
        (
            values { $( $name:ident: ($ty:ty, $default:expr, $cli_long:literal), )* }
            neg_flags { $( $iname:ident: ($bdefault:expr, $cli_name:ident, $cli_blong:literal), )* }
            pos_flags { $( $pname:ident: ($pdefault:expr, $cli_pname:ident, $cli_plong:literal), )* }
        ) => {
            #[derive(Args, Debug, Clone, Default)]
            pub struct OptionsArgs {
                $(
                    #[arg(long = $cli_long)]
                    pub $name: Option<$ty>,
                )*

                $(
                    #[arg(long = $cli_blong)]
                    pub $cli_name: bool,
                )*

                $(
                    #[arg(long = $cli_plong)]
                    pub $cli_pname: bool,
                )*

                #[arg(long)]
                pub binary_probability: Option<f64>,

                #[arg(long, allow_hyphen_values = true)]
                pub number_min: Option<f64>,

                #[arg(long, allow_hyphen_values = true)]
                pub number_max: Option<f64>,

                #[command(flatten)]
                pub mutation_weights: MutationWeightsArgs,
            }

            impl OptionsArgs {
                pub fn apply_to(&self, opt: &mut Options) {
                    $(
                        if let Some(v) = self.$name {
                            opt.$name = v;
                        }
                    )*

                    $(
                        if self.$cli_name {
                            opt.$iname = false;
                        }
                    )*

                    $(
                        if self.$cli_pname {
                            opt.$pname = true;
                        }
                    )*

                    if let Some(p) = self.binary_probability {
                        opt.generation.binary_probability = p;
                    }
                    if let Some(v) = self.number_min {
                        opt.generation.number_min = v;
                    }
                    if let Some(v) = self.number_max {
                        opt.generation.number_max = v;
                    }
                    self.mutation_weights.apply_to(&mut opt.mutation_weights);
                }
            }
        };
    }

    immune_options_spec!(__define_options_args);
}
