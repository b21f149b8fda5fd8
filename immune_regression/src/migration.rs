use std::sync::{Arc, Mutex, PoisonError};

use fastrand::Rng;
use immune_expressions::{ExprError, Expression, GenOptions};
use tracing::trace;

use crate::fitness::FitnessFunction;
use crate::pop_member::PopMember;
use crate::population::Population;

/// Collaborator that shares candidates with other searches.
///
/// Both calls must return promptly: `publish` replaces the batch offered to
/// others and `fetch_latest` returns whatever was received most recently,
/// which may be stale or empty.
pub trait Exchanger: Send + Sync {
    fn publish(&self, batch: Vec<Expression>);
    fn fetch_latest(&self) -> Vec<Expression>;
}

impl<E: Exchanger + ?Sized> Exchanger for Arc<E> {
    fn publish(&self, batch: Vec<Expression>) {
        (**self).publish(batch)
    }

    fn fetch_latest(&self) -> Vec<Expression> {
        (**self).fetch_latest()
    }
}

/// Local stand-in for a peer: every fetch returns freshly generated trees.
#[derive(Debug)]
pub struct RandomExchanger {
    variables: Vec<String>,
    max_height: usize,
    batch_size: usize,
    generation: GenOptions,
    rng: Mutex<Rng>,
    offered: Mutex<Arc<Vec<Expression>>>,
}

impl RandomExchanger {
    pub fn new(variables: Vec<String>, max_height: usize, batch_size: usize, seed: u64) -> Self {
        Self {
            variables,
            max_height,
            batch_size,
            generation: GenOptions::default(),
            rng: Mutex::new(Rng::with_seed(seed)),
            offered: Mutex::new(Arc::new(Vec::new())),
        }
    }

    pub fn with_generation(mut self, generation: GenOptions) -> Self {
        self.generation = generation;
        self
    }

    /// The batch most recently published.
    pub fn offered(&self) -> Arc<Vec<Expression>> {
        self.offered.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Exchanger for RandomExchanger {
    fn publish(&self, batch: Vec<Expression>) {
        *self.offered.lock().unwrap_or_else(PoisonError::into_inner) = Arc::new(batch);
    }

    fn fetch_latest(&self) -> Vec<Expression> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (0..self.batch_size)
            .map(|_| Expression::random(&mut rng, self.max_height, &self.variables, &self.generation))
            .collect()
    }
}

/// Score usable migrants and let them replace the weakest of the first `kept`
/// members.
///
/// Migrants referencing variables outside `variables` are dropped, and at
/// most `cap` are merged. Survivors adopt the local variable list.
pub(crate) fn migrate_into(
    pop: &mut Population,
    kept: usize,
    migrants: Vec<Expression>,
    variables: &[String],
    cap: usize,
    fitness: &FitnessFunction<'_>,
) -> Result<usize, ExprError> {
    let room = cap.min(kept.saturating_sub(1));
    let mut scored = Vec::with_capacity(room);
    for mut expr in migrants {
        if scored.len() == room {
            break;
        }
        if !expr.references_only(variables) {
            trace!(expr = %expr, "dropping migrant with foreign variables");
            continue;
        }
        expr.variables = variables.to_vec();
        scored.push(PopMember::scored(expr, fitness)?);
    }
    Ok(pop.replace_weakest(kept, scored))
}
