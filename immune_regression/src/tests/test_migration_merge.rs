use std::sync::{Arc, Mutex};

use immune_expressions::{Expression, Node};

use super::common::{exponential, small_options, squares, x_squared};
use crate::{Exchanger, Options, RandomExchanger, SearchEngine};

/// Hands out a fixed batch and records what was published.
#[derive(Default)]
struct Scripted {
    batch: Vec<Expression>,
    published: Mutex<Vec<usize>>,
}

impl Exchanger for Scripted {
    fn publish(&self, batch: Vec<Expression>) {
        self.published.lock().unwrap().push(batch.len());
    }

    fn fetch_latest(&self) -> Vec<Expression> {
        self.batch.clone()
    }
}

#[test]
fn kept_members_are_published_each_generation() {
    let ex = Arc::new(Scripted::default());
    let mut engine = SearchEngine::new(exponential(9), small_options(9, 3))
        .unwrap()
        .with_exchanger(ex.clone());
    while engine.step().unwrap() {}
    assert_eq!(*ex.published.lock().unwrap(), [5, 5, 5]);
}

#[test]
fn an_exact_migrant_takes_over() {
    let ex = Arc::new(Scripted {
        batch: vec![x_squared()],
        ..Default::default()
    });
    let mut engine = SearchEngine::new(squares(9), small_options(10, 3))
        .unwrap()
        .with_exchanger(ex);
    engine.step().unwrap();
    assert_eq!(engine.best().score, 0.0);
    assert_eq!(engine.population().len(), 10);
}

#[test]
fn migrants_with_foreign_variables_are_ignored() {
    let foreign = Expression::new(Node::variable("z"), vec!["z".to_string()]);
    let ex = Arc::new(Scripted {
        batch: vec![foreign; 4],
        ..Default::default()
    });
    let mut engine = SearchEngine::new(squares(9), small_options(10, 3))
        .unwrap()
        .with_exchanger(ex);
    while engine.step().unwrap() {}
    for m in &engine.population().members {
        assert!(m.expr.references_only(&["x".to_string()]));
    }
}

#[test]
fn migration_is_capped() {
    let batch: Vec<Expression> = (0..20)
        .map(|i| Expression::new(Node::plus(Node::variable("x"), Node::number(1000.0 + i as f64)), vec!["x".into()]))
        .collect();
    let ex = Arc::new(Scripted {
        batch: batch.clone(),
        ..Default::default()
    });
    let options = Options {
        migration_fraction: 0.2,
        ..small_options(10, 1)
    };
    let mut engine = SearchEngine::new(squares(9), options).unwrap().with_exchanger(ex);
    engine.step().unwrap();
    let migrants = engine
        .population()
        .members
        .iter()
        .filter(|m| batch.contains(&m.expr))
        .count();
    assert_eq!(migrants, 2);
    assert!(!batch.contains(&engine.best().expr));
}

#[test]
fn random_exchanger_keeps_the_search_running() {
    let ex = Arc::new(RandomExchanger::new(vec!["x".into()], 4, 5, 3));
    let result = SearchEngine::new(exponential(9), small_options(10, 5))
        .unwrap()
        .with_exchanger(ex.clone())
        .run_to_completion()
        .unwrap();
    assert_eq!(result.generations, 5);
    assert_eq!(ex.offered().len(), 5);
}
