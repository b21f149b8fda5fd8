use core::fmt;
use std::sync::Arc;

use fastrand::Rng;
use immune_expressions::{ExprError, Expression};
use tracing::{debug, info};

use crate::dataset::Dataset;
use crate::fitness::FitnessFunction;
use crate::migration::{Exchanger, migrate_into};
use crate::mutate::Mutator;
use crate::options::{ConfigError, Options};
use crate::pop_member::PopMember;
use crate::population::Population;
use crate::progress_bars::SearchProgress;
use crate::stop_controller::{StopController, StopReason};

#[derive(Clone, Debug, PartialEq)]
pub enum SearchError {
    Config(ConfigError),
    Expr(ExprError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Config(e) => write!(f, "invalid search configuration: {e}"),
            SearchError::Expr(e) => write!(f, "evaluation failed: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Config(e) => Some(e),
            SearchError::Expr(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SearchError {
    fn from(e: ConfigError) -> Self {
        SearchError::Config(e)
    }
}

impl From<ExprError> for SearchError {
    fn from(e: ExprError) -> Self {
        SearchError::Expr(e)
    }
}

#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Best candidate found; simplified unless disabled in the options, and
    /// scored after simplification.
    pub best: PopMember,
    pub generations: usize,
    /// Best score after each generation.
    pub history: Vec<f64>,
    pub stop_reason: StopReason,
}

/// Generational immune search over one sample set.
///
/// Each [`step`](SearchEngine::step) keeps the better half of the ranked
/// population and refills it with one mutated copy of each of the best kept
/// members. With an [`Exchanger`] attached, the kept expressions are offered
/// to peers and the latest received batch is merged in.
pub struct SearchEngine {
    dataset: Dataset,
    options: Options,
    mutator: Mutator,
    population: Population,
    exchanger: Option<Arc<dyn Exchanger>>,
    rng: Rng,
    generations: usize,
    history: Vec<f64>,
    controller: StopController,
    stop_reason: Option<StopReason>,
    progress: SearchProgress,
    progress_finished: bool,
}

impl SearchEngine {
    pub fn new(dataset: Dataset, options: Options) -> Result<Self, SearchError> {
        options.validate(&dataset)?;
        let mut rng = Rng::with_seed(options.seed);
        let fitness = FitnessFunction::new(&dataset);
        let members = (0..options.population_size)
            .map(|_| {
                let expr = Expression::random(
                    &mut rng,
                    options.max_height,
                    &dataset.variable_names,
                    &options.generation,
                );
                PopMember::scored(expr, &fitness)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut population = Population::new(members);
        population.rank();

        let mut stop_reason = None;
        if options.max_generations == 0 {
            stop_reason = Some(StopReason::MaxGenerations);
        }
        debug!(
            population = options.population_size,
            variables = dataset.variable_names.len(),
            samples = dataset.n_rows(),
            "initialized search"
        );

        Ok(Self {
            mutator: Mutator::new(options.mutation_weights.clone(), options.generation.clone()),
            controller: StopController::from_options(&options),
            progress: SearchProgress::new(&options),
            dataset,
            options,
            population,
            exchanger: None,
            rng,
            generations: 0,
            history: Vec::new(),
            stop_reason,
            progress_finished: false,
        })
    }

    pub fn with_exchanger(mut self, exchanger: Arc<dyn Exchanger>) -> Self {
        self.exchanger = Some(exchanger);
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn is_finished(&self) -> bool {
        self.stop_reason.is_some()
    }

    pub fn best(&self) -> &PopMember {
        // The population holds at least two members from construction on.
        &self.population.members[0]
    }

    /// Run one generation. Returns `false` without doing anything once the
    /// search has finished.
    pub fn step(&mut self) -> Result<bool, ExprError> {
        if self.is_finished() {
            self.finish_progress();
            return Ok(false);
        }

        let fitness = FitnessFunction::new(&self.dataset);
        let n = self.population.len();
        let n_mutated = n / 2;
        let kept = n - n_mutated;
        self.population.members.truncate(kept);

        let mut children = Vec::with_capacity(n_mutated);
        for parent in &self.population.members[..n_mutated] {
            let mutation = self.mutator.mutate(&mut self.rng, &parent.expr);
            children.push(PopMember::scored(mutation.expr, &fitness)?);
        }

        if let Some(exchanger) = &self.exchanger {
            exchanger.publish(self.population.members.iter().map(|m| m.expr.clone()).collect());
            let received = exchanger.fetch_latest();
            if !received.is_empty() {
                let placed = migrate_into(
                    &mut self.population,
                    kept,
                    received,
                    &self.dataset.variable_names,
                    self.options.migration_cap(),
                    &fitness,
                )?;
                debug!(generation = self.generations + 1, migrants = placed, "merged migrants");
            }
        }

        self.population.members.extend(children);
        self.population.rank();
        self.generations += 1;

        let best = self.best().clone();
        self.history.push(best.score);
        debug!(generation = self.generations, best = best.score, "generation complete");

        self.stop_reason = self.controller.should_stop(self.generations, best.score);
        let remaining = if self.stop_reason.is_some() {
            0
        } else {
            self.options.max_generations.saturating_sub(self.generations)
        };
        self.progress.on_generation_complete(&best, remaining);
        if self.is_finished() {
            self.finish_progress();
        }
        Ok(true)
    }

    pub fn run_to_completion(mut self) -> Result<SearchResult, ExprError> {
        while self.step()? {}
        self.into_result()
    }

    /// The best candidate so far, simplified and rescored, plus the run
    /// statistics.
    pub fn into_result(mut self) -> Result<SearchResult, ExprError> {
        self.finish_progress();
        let mut best = self.best().clone();
        if self.options.simplify_result {
            best.expr.simplify();
            best.score = FitnessFunction::new(&self.dataset).score(&best.expr)?;
        }
        let stop_reason = self.stop_reason.unwrap_or(StopReason::MaxGenerations);
        info!(
            generations = self.generations,
            score = best.score,
            reason = ?stop_reason,
            expr = %best.expr,
            "search finished"
        );
        Ok(SearchResult {
            best,
            generations: self.generations,
            history: self.history,
            stop_reason,
        })
    }

    fn finish_progress(&mut self) {
        if !self.progress_finished {
            self.progress.finish();
            self.progress_finished = true;
        }
    }
}

pub fn immune_search(dataset: Dataset, options: Options) -> Result<SearchResult, SearchError> {
    Ok(SearchEngine::new(dataset, options)?.run_to_completion()?)
}

pub fn immune_search_with_exchanger(
    dataset: Dataset,
    options: Options,
    exchanger: Arc<dyn Exchanger>,
) -> Result<SearchResult, SearchError> {
    Ok(SearchEngine::new(dataset, options)?
        .with_exchanger(exchanger)
        .run_to_completion()?)
}
