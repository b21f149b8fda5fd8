//! Convenience re-exports for examples and quickstarts.

pub use crate::dataset::{Dataset, Sample, SampleDataSource, SyntheticSource};
pub use crate::migration::{Exchanger, RandomExchanger};
pub use crate::options::{MutationWeights, Options};
pub use crate::search_utils::{SearchEngine, SearchResult, immune_search};
pub use crate::stop_controller::StopReason;

#[cfg(feature = "exchange")]
pub use crate::exchange::{ExchangeConfig, Framing, PeerExchanger, RingTopology};

// Re-export the tree model so callers (and examples) don't need to depend on
// `immune_expressions` directly.
pub use immune_expressions::{Bindings, Expression, GenOptions, Node, Operation, print_tree, string_tree};
