use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use tracing::info;

use super::args::Cli;
use crate::dataset::{SampleDataSource, SyntheticSource};
use crate::exchange::{ExchangeConfig, PeerExchanger, RingTopology};
use crate::options::Options;
use crate::search_utils::{SearchEngine, SearchResult};

/// Node defaults; flags override them.
pub fn node_options(cli: &Cli) -> Options {
    let mut options = Options {
        population_size: 150,
        max_generations: 150,
        max_height: 4,
        ..Default::default()
    };
    cli.options.apply_to(&mut options);
    options.seed = options.seed.wrapping_add(cli.index as u64);
    options
}

/// x * x + x * sin(x)
fn target(v: &[f64]) -> f64 {
    let x = v[0];
    x * x + x * x.sin()
}

pub async fn run(cli: Cli) -> Result<()> {
    ensure!(cli.count > 0, "the ring needs at least one node");
    ensure!(cli.samples > 0, "at least one sample point is required");
    let ring = RingTopology::with_address(cli.index, cli.count, cli.host, cli.base_port)
        .context("invalid ring layout")?;

    let config = ExchangeConfig {
        framing: cli.framing.into(),
        retry_delay: Duration::from_millis(cli.retry_delay_ms),
        fetch_interval: Duration::from_millis(cli.fetch_interval_ms),
        fetch_timeout: cli.fetch_timeout_ms.map(Duration::from_millis),
        ..ExchangeConfig::for_ring(&ring)
    };
    let exchanger = Arc::new(
        PeerExchanger::bind(config)
            .await
            .with_context(|| format!("failed to listen on {}", ring.listen_addr()))?,
    );

    let dataset = SyntheticSource {
        variables: vec!["x".to_string()],
        n_samples: cli.samples,
        half_width: cli.half_width,
        seed: cli.sample_seed,
        target,
    }
    .load()
    .context("failed to build the sample set")?;

    let options = node_options(&cli);
    info!(
        node = ring.index(),
        nodes = ring.count(),
        upstream = ring.upstream(),
        population = options.population_size,
        generations = options.max_generations,
        "starting node"
    );

    let engine = SearchEngine::new(dataset, options)
        .context("invalid search options")?
        .with_exchanger(exchanger.clone());
    let result = tokio::task::spawn_blocking(move || engine.run_to_completion())
        .await
        .context("search task panicked")?
        .context("search failed")?;
    exchanger.shutdown();

    print_result(&result, cli.json)
}

fn print_result(result: &SearchResult, json: bool) -> Result<()> {
    if json {
        let out = serde_json::json!({
            "expression": result.best.expr.to_string(),
            "tree": &result.best.expr,
            "score": result.best.score,
            "generations": result.generations,
            "stop_reason": format!("{:?}", result.stop_reason),
            "history": &result.history,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", result.best.expr);
        println!("score: {:.6} after {} generation(s)", result.best.score, result.generations);
    }
    Ok(())
}
