pub mod args;
mod node;

pub use args::{Cli, FramingCli};
pub use node::{node_options, run};
