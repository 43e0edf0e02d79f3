//! Scalar tweens
//!
//! A tween owns its own clock. It only advances while `Playing`; pausing
//! freezes the clock, resuming continues from the frozen point.

use std::f32::consts::PI;

/// Easing curve, `t` in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    #[default]
    SineInOut,
}

impl Ease {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::SineInOut => 0.5 * (1.0 - (PI * t).cos()),
        }
    }
}

/// How many extra cycles to play after the first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Count(u32),
    Infinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenState {
    Playing,
    Paused,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    /// Seconds per direction
    duration: f32,
    ease: Ease,
    /// Play back to `from` after reaching `to`
    yoyo: bool,
    repeat: Repeat,
    /// Seconds since start (wrapped for infinite tweens)
    elapsed: f32,
    state: TweenState,
}

impl Tween {
    /// Single forward run, playing immediately
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(f32::EPSILON),
            ease: Ease::Linear,
            yoyo: false,
            repeat: Repeat::Count(0),
            elapsed: 0.0,
            state: TweenState::Playing,
        }
    }

    /// Endless yoyo between `rest` and `peak`, the install button heartbeat
    pub fn pulse(rest: f32, peak: f32, duration: f32) -> Self {
        Self::new(rest, peak, duration)
            .with_ease(Ease::SineInOut)
            .with_yoyo(true)
            .with_repeat(Repeat::Infinite)
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    #[inline]
    pub fn state(&self) -> TweenState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == TweenState::Playing
    }

    /// Length of one cycle (forward, plus back when yoyo)
    #[inline]
    fn cycle(&self) -> f32 {
        if self.yoyo {
            self.duration * 2.0
        } else {
            self.duration
        }
    }

    /// Total running time, `None` when endless
    fn total(&self) -> Option<f32> {
        match self.repeat {
            Repeat::Count(n) => Some(self.cycle() * (n as f32 + 1.0)),
            Repeat::Infinite => None,
        }
    }

    /// Advance the clock by `dt` seconds (no-op unless playing)
    pub fn advance(&mut self, dt: f32) {
        if self.state != TweenState::Playing || dt <= 0.0 {
            return;
        }

        self.elapsed += dt;

        match self.total() {
            Some(total) => {
                if self.elapsed >= total {
                    self.elapsed = total;
                    self.state = TweenState::Finished;
                }
            }
            None => {
                // Keep the clock small so precision holds over long sessions
                self.elapsed %= self.cycle();
            }
        }
    }

    /// Current eased value
    pub fn value(&self) -> f32 {
        if self.state == TweenState::Finished {
            return if self.yoyo { self.from } else { self.to };
        }

        let phase = self.elapsed % self.cycle();
        let t = if phase < self.duration {
            phase / self.duration
        } else {
            1.0 - (phase - self.duration) / self.duration
        };

        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    /// Freeze at the current value
    pub fn pause(&mut self) {
        if self.state == TweenState::Playing {
            self.state = TweenState::Paused;
        }
    }

    /// Continue from where `pause` left off
    pub fn resume(&mut self) {
        if self.state == TweenState::Paused {
            self.state = TweenState::Playing;
        }
    }

    /// Rewind and play from the start
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.state = TweenState::Playing;
    }

    /// Halt for good, settling on the resting value
    pub fn stop(&mut self) {
        self.elapsed = 0.0;
        self.state = TweenState::Finished;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_sine_in_out_curve() {
        assert_eq!(Ease::SineInOut.apply(0.0), 0.0);
        assert!(approx(Ease::SineInOut.apply(0.5), 0.5));
        assert!(approx(Ease::SineInOut.apply(1.0), 1.0));
        // Slow start
        assert!(Ease::SineInOut.apply(0.1) < 0.1);
        // Out of range is clamped
        assert_eq!(Ease::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_pulse_shape() {
        let mut pulse = Tween::pulse(1.0, 1.1, 0.8);
        assert!(approx(pulse.value(), 1.0));

        pulse.advance(0.4);
        assert!(approx(pulse.value(), 1.05));

        // Peak at the end of the forward leg
        pulse.advance(0.4);
        assert!(approx(pulse.value(), 1.1));

        // Back to rest after the return leg
        pulse.advance(0.8);
        assert!(approx(pulse.value(), 1.0));

        // Still going
        pulse.advance(0.8 * 2.0 * 100.0 + 0.8);
        assert!(pulse.is_playing());
        assert!(approx(pulse.value(), 1.1));
    }

    #[test]
    fn test_pulse_stays_in_range() {
        let mut pulse = Tween::pulse(1.0, 1.1, 0.8);
        for _ in 0..1000 {
            pulse.advance(1.0 / 60.0);
            let v = pulse.value();
            assert!((1.0..=1.1 + 1e-5).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn test_pause_freezes_and_resume_continues() {
        let mut pulse = Tween::pulse(1.0, 1.1, 0.8);
        pulse.advance(0.3);
        let frozen = pulse.value();

        pulse.pause();
        assert_eq!(pulse.state(), TweenState::Paused);
        pulse.advance(5.0);
        assert_eq!(pulse.value(), frozen);

        pulse.resume();
        assert!(pulse.is_playing());
        pulse.advance(0.1);
        assert!(approx(
            pulse.value(),
            1.0 + 0.1 * Ease::SineInOut.apply(0.4 / 0.8)
        ));
    }

    #[test]
    fn test_finite_tween_finishes() {
        let mut tween = Tween::new(0.0, 10.0, 1.0).with_repeat(Repeat::Count(1));
        tween.advance(1.5);
        assert!(approx(tween.value(), 5.0));
        assert!(tween.is_playing());

        tween.advance(1.0);
        assert_eq!(tween.state(), TweenState::Finished);
        assert_eq!(tween.value(), 10.0);

        // Finished tweens ignore resume
        tween.resume();
        assert_eq!(tween.state(), TweenState::Finished);
    }

    #[test]
    fn test_stop_and_restart() {
        let mut pulse = Tween::pulse(1.0, 1.1, 0.8);
        pulse.advance(0.8);
        pulse.stop();
        assert_eq!(pulse.value(), 1.0);
        pulse.advance(0.4);
        assert_eq!(pulse.value(), 1.0);

        pulse.restart();
        assert!(pulse.is_playing());
        pulse.advance(0.8);
        assert!(approx(pulse.value(), 1.1));
    }
}
