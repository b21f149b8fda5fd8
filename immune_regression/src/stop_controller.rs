use crate::options::Options;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The best score reached the requested accuracy.
    AccuracyReached,
    /// The generation budget ran out.
    MaxGenerations,
}

#[derive(Clone, Debug)]
pub(crate) struct StopController {
    max_generations: usize,
    accuracy: f64,
}

impl StopController {
    pub(crate) fn from_options(options: &Options) -> Self {
        Self {
            max_generations: options.max_generations,
            accuracy: options.accuracy,
        }
    }

    /// Checked after each completed generation. Accuracy wins over the
    /// generation budget when both apply.
    pub(crate) fn should_stop(&self, generations: usize, best_score: f64) -> Option<StopReason> {
        if best_score <= self.accuracy {
            return Some(StopReason::AccuracyReached);
        }
        if generations >= self.max_generations {
            return Some(StopReason::MaxGenerations);
        }
        None
    }
}
