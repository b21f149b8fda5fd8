pub(crate) mod dataset;
pub(crate) mod fitness;
pub(crate) mod migration;
pub(crate) mod mutate;
pub(crate) mod mutation_functions;
pub(crate) mod options;
pub(crate) mod pop_member;
pub(crate) mod population;
pub mod prelude;
pub(crate) mod progress_bars;
pub(crate) mod random;
pub(crate) mod search_utils;
pub(crate) mod stop_controller;

#[cfg(feature = "exchange")]
pub mod exchange;

#[cfg(feature = "cli")]
pub mod cli;

pub use dataset::{Dataset, DatasetError, Row, Sample, SampleDataSource, SyntheticSource};
pub use fitness::FitnessFunction;
pub use migration::{Exchanger, RandomExchanger};
pub use mutate::{Mutation, MutationKind, Mutator, sample_mutation};
pub use options::{ConfigError, MutationWeights, Options};
pub use pop_member::PopMember;
pub use population::Population;
pub use search_utils::{SearchEngine, SearchError, SearchResult, immune_search, immune_search_with_exchanger};
pub use stop_controller::StopReason;

pub use immune_expressions;

#[cfg(test)]
mod tests;
