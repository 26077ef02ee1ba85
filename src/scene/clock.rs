/// Animation time owned by the render loop.
///
/// Advances with wall-clock deltas scaled by `speed`; never runs backwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    elapsed: f32,
    pub speed: f32,
    pub paused: bool,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl AnimationClock {
    pub fn new(speed: f32) -> Self {
        Self {
            elapsed: 0.0,
            speed,
            paused: false,
        }
    }

    pub fn time(&self) -> f32 {
        self.elapsed
    }

    pub fn advance(&mut self, dt: f32) {
        if self.paused || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let step = dt * self.speed.max(0.0);
        if step.is_finite() {
            self.elapsed += step;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn advances_uniformly_with_speed() {
        let mut clock = AnimationClock::new(2.0);
        for _ in 0..60 {
            clock.advance(1.0 / 60.0);
        }
        assert_abs_diff_eq!(clock.time(), 2.0, epsilon = 1e-4);
    }

    #[test]
    fn is_monotonic_and_ignores_bad_deltas() {
        let mut clock = AnimationClock::default();
        clock.advance(0.5);
        let before = clock.time();
        clock.advance(-1.0);
        clock.advance(f32::NAN);
        clock.advance(f32::INFINITY);
        assert_eq!(clock.time(), before);

        clock.speed = -3.0;
        clock.advance(1.0);
        assert_eq!(clock.time(), before);
    }

    #[test]
    fn pause_and_reset() {
        let mut clock = AnimationClock::default();
        clock.toggle_pause();
        clock.advance(1.0);
        assert_eq!(clock.time(), 0.0);
        clock.toggle_pause();
        clock.advance(1.0);
        assert_eq!(clock.time(), 1.0);
        clock.reset();
        assert_eq!(clock.time(), 0.0);
        assert!(!clock.paused);
    }
}
