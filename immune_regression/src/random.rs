use fastrand::Rng;

pub(crate) fn choose<'a, T>(rng: &mut Rng, values: &'a [T]) -> Option<&'a T> {
    if values.is_empty() {
        None
    } else {
        Some(&values[rng.usize(0..values.len())])
    }
}

/// Index drawn proportionally to `weights`. Non-positive and non-finite
/// weights never win; `None` if nothing can be drawn.
pub(crate) fn weighted_index(rng: &mut Rng, weights: &[f64]) -> Option<usize> {
    let usable = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
    let total: f64 = weights.iter().copied().map(usable).sum();
    if total <= 0.0 {
        return None;
    }
    let mut target = rng.f64() * total;
    let mut last = None;
    for (i, w) in weights.iter().copied().map(usable).enumerate() {
        if w == 0.0 {
            continue;
        }
        if target < w {
            return Some(i);
        }
        target -= w;
        last = Some(i);
    }
    last
}

pub(crate) fn uniform(rng: &mut Rng, lo: f64, hi: f64) -> f64 {
    lo + rng.f64() * (hi - lo)
}
