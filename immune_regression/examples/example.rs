use immune_regression::prelude::*;

// Fits y = x * x + x * sin(x) on a single node, without peers.

fn main() {
    let dataset = SyntheticSource {
        variables: vec!["x".to_string()],
        n_samples: 50,
        half_width: 25.0,
        seed: 0,
        target: |v: &[f64]| v[0] * v[0] + v[0] * v[0].sin(),
    }
    .load()
    .unwrap();

    let options = Options {
        population_size: 150,
        max_generations: 150,
        max_height: 4,
        accuracy: 1e-3,
        ..Default::default()
    };

    let result = immune_search(dataset, options).unwrap();
    println!("generations: {} ({:?})", result.generations, result.stop_reason);
    println!("error:       {}", result.best.score);
    println!("expression:  {}", result.best.expr);
    print_tree(&result.best.expr);
}
