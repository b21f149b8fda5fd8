mod common;

use common::*;
use immune_expressions::fastrand::Rng;
use immune_expressions::{Expression, GenOptions, random_node};
use proptest::prelude::*;

proptest! {
    #[test]
    fn generated_trees_respect_max_height(seed in any::<u64>(), max_height in 1usize..7, p in 0.6f64..0.75) {
        let mut rng = Rng::with_seed(seed);
        let options = GenOptions { binary_probability: p, ..Default::default() };
        let node = random_node(&mut rng, max_height, &vars(&["x", "y"]), &options);
        prop_assert!(node.height() <= max_height);
        prop_assert!(node.variable_names().all(|v| v == "x" || v == "y"));
    }

    #[test]
    fn arbitrary_expressions_stay_within_height(e in immune_expressions::proptest_utils::arb_expression(vars(&["x"]), 4)) {
        prop_assert!(e.height() <= 4);
        prop_assert!(e.references_only(&e.variables));
    }
}

#[test]
fn leaves_are_numbers_without_variables() {
    let mut rng = Rng::with_seed(42);
    let e = Expression::random(&mut rng, 5, &[], &GenOptions::default());
    assert!(!e.root.has_variables());
    assert!(e.evaluate(&[("x", 0.0)]).is_ok());
}

#[test]
fn same_seed_same_tree() {
    let v = vars(&["x"]);
    let a = random_node(&mut Rng::with_seed(9), 4, &v, &GenOptions::default());
    let b = random_node(&mut Rng::with_seed(9), 4, &v, &GenOptions::default());
    assert_eq!(a, b);
}
