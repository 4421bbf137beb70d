/// Describes the time scale of a timed animation: a start delay, a per-pass duration, a possibly
/// fractional number of repetitions and whether each repetition plays back in reverse.
///
/// Time scales convert elapsed time (since the animation was submitted) into the normalized
/// position used to sample [`LayerAnimation`](crate::layer::LayerAnimation) values, and tell the
/// headless runner when a spring run is due to complete.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeScale {
    delay: f32,
    duration: f32,
    repeat_count: f32,
    autoreverse: bool,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self {
            delay: 0.0,
            duration: 1.0,
            repeat_count: 1.0,
            autoreverse: false,
        }
    }
}

impl TimeScale {
    /// Creates a time scale.
    ///
    /// # Arguments
    ///
    /// * `duration` - Length of a single forward pass.
    /// * `delay` - Time before the first pass begins.
    /// * `repeat_count` - Number of cycles to play. Zero or negative counts play once.
    /// * `autoreverse` - Whether every cycle plays forward and then backward, doubling its length.
    pub fn new(duration: f32, delay: f32, repeat_count: f32, autoreverse: bool) -> Self {
        Self {
            delay,
            duration,
            repeat_count,
            autoreverse,
        }
    }

    /// Length of one cycle, including the reverse pass if any.
    pub fn cycle_duration(&self) -> f32 {
        if self.autoreverse {
            self.duration * 2.0
        } else {
            self.duration
        }
    }

    /// Total time from submission until the last cycle ends, including the delay.
    pub fn total_duration(&self) -> f32 {
        self.delay + self.cycle_duration() * self.effective_repeats()
    }

    fn effective_repeats(&self) -> f32 {
        if self.repeat_count > 0.0 {
            self.repeat_count
        } else {
            1.0
        }
    }

    /// Computes the normalized position for some elapsed `time`.
    ///
    /// # Returns
    ///
    /// The position between `0.0` and `1.0`. While reversing, the position declines from `1.0`
    /// back to `0.0` during the second half of each cycle.
    ///
    /// If the `time` is nowhere on the timeline, returns a [`TimeScaleOutOfBounds`] error.
    pub fn get_normalized_time(&self, time: f32) -> Result<f32, TimeScaleOutOfBounds> {
        let time = time - self.delay;
        if time < 0.0 {
            return Err(TimeScaleOutOfBounds::NotStarted);
        }
        if self.duration <= 0.0 || time > self.cycle_duration() * self.effective_repeats() {
            return Err(TimeScaleOutOfBounds::Ended);
        }
        let cycle = self.cycle_duration();
        // Hold at the end of a completed cycle instead of wrapping to zero, so that the terminal
        // value is actually reached.
        let (quot, rem) = (time / cycle, time % cycle);
        let cycle_time = if rem == 0.0 && quot >= 1.0 { cycle } else { rem };
        let position = cycle_time / self.duration;
        Ok(if position > 1.0 { 2.0 - position } else { position })
    }

    /// The position at which the animation rests once it has ended.
    pub fn end_position(&self) -> f32 {
        let repeats = self.effective_repeats();
        let fraction = repeats - repeats.floor();
        let position = if fraction == 0.0 { 1.0 } else { fraction };
        match self.autoreverse {
            // A whole number of reversing cycles returns to the start.
            true if fraction == 0.0 => 0.0,
            true if position > 0.5 => (1.0 - position) * 2.0,
            true => position * 2.0,
            false => position,
        }
    }
}

/// Error produced by [`TimeScale::get_normalized_time`], specifying which boundary is exceeded by
/// a given time.
#[derive(Debug, Eq, PartialEq)]
pub enum TimeScaleOutOfBounds {
    /// The animation has not started, because the time is within the configured delay.
    NotStarted,
    /// The last cycle has already ended.
    Ended,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_before_delay_then_not_started() {
        let timescale = TimeScale::new(10.0, 2.0, 1.0, false);

        assert_eq!(
            timescale.get_normalized_time(0.0),
            Err(TimeScaleOutOfBounds::NotStarted)
        );
        assert_eq!(
            timescale.get_normalized_time(1.99),
            Err(TimeScaleOutOfBounds::NotStarted)
        );
    }

    #[test]
    fn when_after_delay_then_subtracts_delay() {
        let timescale = TimeScale::new(10.0, 2.0, 1.0, false);

        assert_eq!(timescale.get_normalized_time(2.0), Ok(0.0));
        assert_eq!(timescale.get_normalized_time(7.0), Ok(0.5));
        assert_eq!(timescale.get_normalized_time(12.0), Ok(1.0));
        assert_eq!(
            timescale.get_normalized_time(12.5),
            Err(TimeScaleOutOfBounds::Ended)
        );
    }

    #[test]
    fn when_repeating_then_normalized_by_cycle() {
        let timescale = TimeScale::new(20.0, 0.0, 2.0, false);

        assert_eq!(timescale.get_normalized_time(5.0), Ok(0.25));
        assert_eq!(timescale.get_normalized_time(20.0), Ok(1.0));
        assert_eq!(timescale.get_normalized_time(25.0), Ok(0.25));
        assert_eq!(timescale.get_normalized_time(40.0), Ok(1.0));
        assert_eq!(
            timescale.get_normalized_time(41.0),
            Err(TimeScaleOutOfBounds::Ended)
        );
    }

    #[test]
    fn when_autoreversing_then_peaks_at_end_of_forward_pass() {
        let timescale = TimeScale::new(10.0, 0.0, 1.0, true);

        assert_eq!(timescale.cycle_duration(), 20.0);
        assert_eq!(timescale.get_normalized_time(5.0), Ok(0.5));
        assert_eq!(timescale.get_normalized_time(10.0), Ok(1.0));
        assert_eq!(timescale.get_normalized_time(15.0), Ok(0.5));
        assert_eq!(timescale.get_normalized_time(20.0), Ok(0.0));
    }

    #[test]
    fn zero_repeat_count_plays_once() {
        let timescale = TimeScale::new(4.0, 1.0, 0.0, false);

        assert_eq!(timescale.total_duration(), 5.0);
    }

    #[test]
    fn end_position_depends_on_reverse_and_fraction() {
        assert_eq!(TimeScale::new(1.0, 0.0, 1.0, false).end_position(), 1.0);
        assert_eq!(TimeScale::new(1.0, 0.0, 2.0, true).end_position(), 0.0);
        assert_eq!(TimeScale::new(1.0, 0.0, 1.5, false).end_position(), 0.5);
        assert_eq!(TimeScale::new(1.0, 0.0, 1.25, true).end_position(), 0.5);
    }
}
