use std::sync::Arc;

use immune_regression::prelude::*;
use immune_regression::immune_search_with_exchanger;

fn squares() -> Dataset {
    SyntheticSource {
        variables: vec!["x".into()],
        n_samples: 25,
        half_width: 3.0,
        seed: 11,
        target: |v: &[f64]| v[0] * v[0],
    }
    .load()
    .unwrap()
}

#[test]
fn search_improves_on_its_first_generation() {
    let options = Options {
        seed: 3,
        population_size: 50,
        max_generations: 30,
        accuracy: 0.5,
        ..Default::default()
    };
    let result = immune_search(squares(), options).unwrap();
    assert!(result.generations >= 1 && result.generations <= 30);
    assert!(result.history.last().unwrap() <= result.history.first().unwrap());
    if result.stop_reason == StopReason::AccuracyReached {
        assert!(*result.history.last().unwrap() <= 0.5);
    }
    assert!(result.best.expr.height() <= 4);
}

#[test]
fn four_point_square_run_never_gets_worse() {
    let samples: Vec<Sample> = [(0.0, 0.0), (1.0, 1.0), (2.0, 4.0), (3.0, 9.0)]
        .into_iter()
        .map(|(x, y)| Sample::new([("x", x)], y))
        .collect();
    let dataset = samples.load().unwrap();
    for seed in 0..5 {
        let options = Options {
            seed,
            population_size: 50,
            max_generations: 30,
            accuracy: 0.5,
            ..Default::default()
        };
        let result = immune_search(dataset.clone(), options).unwrap();
        assert!(result.generations >= 1 && result.generations <= 30);
        assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
        assert!(result.history.last().unwrap() <= result.history.first().unwrap());
        assert!(result.best.expr.height() <= 4);
    }
}

#[test]
fn random_migrants_do_not_break_the_search() {
    let options = Options {
        seed: 8,
        population_size: 30,
        max_generations: 20,
        accuracy: 0.0,
        ..Default::default()
    };
    let exchanger = Arc::new(RandomExchanger::new(vec!["x".into()], 4, 10, 1));
    let result = immune_search_with_exchanger(squares(), options, exchanger.clone()).unwrap();
    assert!(result.generations <= 20);
    assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(exchanger.offered().len(), 15);
}

#[test]
fn samples_can_be_given_as_records() {
    let samples: Vec<Sample> = (-5..=5)
        .map(|i| {
            let x = i as f64;
            Sample::new([("x", x)], 2.0 * x + 1.0)
        })
        .collect();
    let options = Options {
        population_size: 20,
        max_generations: 5,
        ..Default::default()
    };
    let result = immune_search(samples.load().unwrap(), options).unwrap();
    assert!(result.best.score.is_finite());
    assert!(result.best.expr.references_only(&["x".to_string()]));
}
