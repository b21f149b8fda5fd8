#[cfg(feature = "progress")]
mod imp {
    use std::io::IsTerminal;
    use std::time::{Duration, Instant};

    use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

    use crate::options::Options;
    use crate::pop_member::PopMember;

    pub(crate) struct SearchProgress {
        show: bool,
        bar: ProgressBar,
        msg_min_interval: Duration,
        last_msg_update: Instant,
    }

    impl SearchProgress {
        pub(crate) fn new(options: &Options) -> Self {
            let show = options.progress && std::io::stderr().is_terminal();
            let bar = if show {
                let pb = ProgressBar::new(options.max_generations as u64);
                pb.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
                pb.set_prefix(format!("Evolving for {} generations...", options.max_generations));
                match ProgressStyle::with_template("{prefix} {wide_bar} {pos:>5}/{len:5} [{elapsed_precise}]\n{msg}") {
                    Ok(style) => pb.set_style(style),
                    Err(_) => pb.set_style(ProgressStyle::default_bar()),
                }
                pb
            } else {
                ProgressBar::hidden()
            };
            Self {
                show,
                bar,
                msg_min_interval: Duration::from_millis(250),
                last_msg_update: Instant::now(),
            }
        }

        pub(crate) fn on_generation_complete(&mut self, best: &PopMember, generations_remaining: usize) {
            if !self.show {
                return;
            }
            self.bar.inc(1);
            let now = Instant::now();
            if now.duration_since(self.last_msg_update) < self.msg_min_interval && generations_remaining != 0 {
                return;
            }
            self.bar
                .set_message(format!("Best: {:<10.3e}  {}", best.score, best.expr));
            self.last_msg_update = now;
        }

        pub(crate) fn finish(&self) {
            if self.show {
                self.bar.finish();
            }
        }
    }
}

#[cfg(not(feature = "progress"))]
mod imp {
    use crate::options::Options;
    use crate::pop_member::PopMember;

    pub(crate) struct SearchProgress;

    impl SearchProgress {
        pub(crate) fn new(_options: &Options) -> Self {
            Self
        }

        pub(crate) fn on_generation_complete(&mut self, _best: &PopMember, _generations_remaining: usize) {}

        pub(crate) fn finish(&self) {}
    }
}

pub(crate) use imp::SearchProgress;
