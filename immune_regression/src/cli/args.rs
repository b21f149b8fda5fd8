// CLI argument parsing.

use std::net::{IpAddr, Ipv4Addr};

use clap::{Parser, ValueEnum};

use crate::exchange::{Framing, RingTopology};
use crate::options::cli_args::OptionsArgs;

#[rustfmt::skip]
#[derive(Parser, Debug, Clone)]
#[command(name = "immune-node")]
#[command(about = "Run one node of a ring of immune-style symbolic regression searches")]
pub struct Cli {
    /// Index of this node in the ring (0-based).
    pub index: usize,

    /// Number of nodes in the ring.
    pub count: usize,

    /// Host every node listens on.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST), env = "IMMUNE_HOST")]
    pub host: IpAddr,

    /// Port of node 0; node i listens on base-port + i.
    #[arg(long, default_value_t = RingTopology::DEFAULT_BASE_PORT, env = "IMMUNE_BASE_PORT")]
    pub base_port: u16,

    /// How replies are delimited on the wire.
    #[arg(long, value_enum, default_value_t = FramingCli::Close)]
    pub framing: FramingCli,

    /// Pause after a failed fetch, in milliseconds.
    #[arg(long, default_value_t = 200)]
    pub retry_delay_ms: u64,

    /// Pause after a successful fetch, in milliseconds.
    #[arg(long, default_value_t = 50)]
    pub fetch_interval_ms: u64,

    /// Give up on a fetch after this many milliseconds.
    #[arg(long)]
    pub fetch_timeout_ms: Option<u64>,

    /// Number of synthetic sample points.
    #[arg(long, default_value_t = 50)]
    pub samples: usize,

    /// Sample points are drawn from [-half-width, half-width].
    #[arg(long, default_value_t = 25.0)]
    pub half_width: f64,

    /// Seed for the synthetic sample set (shared by all nodes by default).
    #[arg(long, default_value_t = 0)]
    pub sample_seed: u64,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub options: OptionsArgs,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum FramingCli {
    Close,
    Length,
}

impl From<FramingCli> for Framing {
    fn from(f: FramingCli) -> Self {
        match f {
            FramingCli::Close => Framing::CloseDelimited,
            FramingCli::Length => Framing::LengthPrefixed,
        }
    }
}
