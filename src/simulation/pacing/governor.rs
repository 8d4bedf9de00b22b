use crate::domain::config::PacingConfig;

/// Adaptive frame target.
///
/// `overused = elapsed - target`. A tick costing more than 2/3 of the target
/// over budget grows the target by one step; a tick finishing with more than
/// half the target to spare shrinks it, never below the minimum. Both need
/// `adapt_after` consecutive ticks in the same direction.
#[derive(Clone, Debug)]
pub struct FrameGovernor {
    target_ms: f64,
    min_ms: f64,
    step_ms: f64,
    adapt_after: u32,
    over_streak: u32,
    under_streak: u32,
}

impl FrameGovernor {
    pub fn new(pacing: &PacingConfig) -> Self {
        Self {
            target_ms: pacing.target_ms.max(pacing.min_ms),
            min_ms: pacing.min_ms,
            step_ms: pacing.step_ms,
            adapt_after: pacing.adapt_after.max(1),
            over_streak: 0,
            under_streak: 0,
        }
    }

    pub fn target_ms(&self) -> f64 {
        self.target_ms
    }

    pub fn min_ms(&self) -> f64 {
        self.min_ms
    }

    /// Feed the wall time of the tick that just ran; returns the new target.
    pub fn adapt(&mut self, elapsed_ms: f64) -> f64 {
        let overused = elapsed_ms - self.target_ms;
        if overused > self.target_ms * 2.0 / 3.0 {
            self.under_streak = 0;
            self.over_streak += 1;
            if self.over_streak >= self.adapt_after {
                self.over_streak = 0;
                self.target_ms += self.step_ms;
                log::debug!("frame target raised to {:.1} ms", self.target_ms);
            }
        } else if overused < -self.target_ms / 2.0 {
            self.over_streak = 0;
            self.under_streak += 1;
            if self.under_streak >= self.adapt_after && self.target_ms > self.min_ms {
                self.under_streak = 0;
                self.target_ms = (self.target_ms - self.step_ms).max(self.min_ms);
                log::debug!("frame target lowered to {:.1} ms", self.target_ms);
            }
        } else {
            self.over_streak = 0;
            self.under_streak = 0;
        }
        self.target_ms
    }

    /// Sleep hint: what is left of the target after `elapsed_ms`
    pub fn remaining_ms(&self, elapsed_ms: f64) -> f64 {
        (self.target_ms - elapsed_ms).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pacing(target: f64, min: f64, adapt_after: u32) -> PacingConfig {
        PacingConfig { target_ms: target, min_ms: min, step_ms: 1.0, adapt_after }
    }

    #[test]
    fn grows_when_badly_over_budget() {
        let mut g = FrameGovernor::new(&pacing(10.0, 10.0, 1));
        // overused 6 < 6.67: steady
        assert_eq!(g.adapt(16.0), 10.0);
        // overused 7 > 6.67
        assert_eq!(g.adapt(17.0), 11.0);
    }

    #[test]
    fn shrinks_but_not_below_minimum() {
        let mut g = FrameGovernor::new(&pacing(12.0, 10.0, 1));
        assert_eq!(g.adapt(1.0), 11.0);
        assert_eq!(g.adapt(1.0), 10.0);
        assert_eq!(g.adapt(1.0), 10.0);
    }

    #[test]
    fn needs_consecutive_ticks_before_moving() {
        let mut g = FrameGovernor::new(&pacing(10.0, 5.0, 3));
        assert_eq!(g.adapt(20.0), 10.0);
        assert_eq!(g.adapt(20.0), 10.0);
        // streak broken
        assert_eq!(g.adapt(10.0), 10.0);
        assert_eq!(g.adapt(20.0), 10.0);
        assert_eq!(g.adapt(20.0), 10.0);
        assert_eq!(g.adapt(20.0), 11.0);
    }

    #[test]
    fn remaining_never_negative() {
        let g = FrameGovernor::new(&PacingConfig::default());
        assert_eq!(g.remaining_ms(4.0), 6.0);
        assert_eq!(g.remaining_ms(40.0), 0.0);
    }
}
