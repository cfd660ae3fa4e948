//! Time drivers for the stock animators.
//!
//! A [`Tween`] only tracks elapsed time. Bounded tweens map it to an eased
//! progress in `[0, 1]`; endless ones feed periodic motion through
//! [`Tween::wave`].

use std::f32::consts::TAU;

/// Shape of a normalized progress curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Starts slow.
    QuadIn,
    /// Ends slow.
    QuadOut,
    /// Slow at both ends.
    SmoothStep,
    /// Snaps most of the way early, then settles.
    #[default]
    ExpoOut,
}

impl Easing {
    /// Maps `t` (clamped to `[0, 1]`) through the curve. Every curve fixes 0 and 1.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadIn => t * t,
            Self::QuadOut => t * (2.0 - t),
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::ExpoOut if t >= 1.0 => 1.0,
            Self::ExpoOut => 1.0 - (-10.0 * t).exp2(),
        }
    }
}

/// Elapsed time of one animator, optionally bounded by a duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    elapsed: f32,
    duration: Option<f32>,
    easing: Easing,
}

impl Tween {
    /// Runs for `duration` seconds, then holds at progress 1.
    #[must_use]
    pub const fn bounded(duration: f32, easing: Easing) -> Self {
        Self {
            elapsed: 0.0,
            duration: Some(duration),
            easing,
        }
    }

    /// Runs forever; progress stays 0.
    #[must_use]
    pub const fn endless() -> Self {
        Self {
            elapsed: 0.0,
            duration: None,
            easing: Easing::Linear,
        }
    }

    /// Moves forward by `dt` seconds. Negative steps are ignored.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
        if let Some(duration) = self.duration {
            self.elapsed = self.elapsed.min(duration.max(0.0));
        }
    }

    /// Seconds since start or the last reset.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Eased progress.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self.duration {
            Some(duration) if duration > 0.0 => self.easing.apply(self.elapsed / duration),
            Some(_) => 1.0,
            None => 0.0,
        }
    }

    /// Value between `from` and `to` at the current progress.
    #[must_use]
    pub fn lerp(&self, from: f32, to: f32) -> f32 {
        from + (to - from) * self.progress()
    }

    /// Sine of the elapsed time at `frequency` cycles per second.
    #[must_use]
    pub fn wave(&self, frequency: f32) -> f32 {
        (self.elapsed * frequency * TAU).sin()
    }

    /// Whether a bounded tween has run its full duration.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.duration.is_some_and(|d| self.elapsed >= d)
    }

    /// Back to zero elapsed time.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_fix_endpoints() {
        for easing in [Easing::Linear, Easing::QuadIn, Easing::QuadOut, Easing::SmoothStep, Easing::ExpoOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
        assert!(Easing::QuadIn.apply(0.5) < 0.5);
        assert!(Easing::QuadOut.apply(0.5) > 0.5);
        assert!(Easing::ExpoOut.apply(0.3) > 0.8);
    }

    #[test]
    fn test_bounded_holds_at_end() {
        let mut tween = Tween::bounded(2.0, Easing::Linear);
        tween.advance(0.5);
        assert_eq!(tween.lerp(1.0, 0.0), 0.75);
        tween.advance(-3.0);
        assert_eq!(tween.elapsed(), 0.5);
        tween.advance(10.0);
        assert_eq!(tween.elapsed(), 2.0);
        assert!(tween.finished());

        tween.reset();
        assert_eq!(tween.progress(), 0.0);
        assert!(Tween::bounded(0.0, Easing::QuadIn).finished());
    }

    #[test]
    fn test_endless_waves() {
        let mut tween = Tween::endless();
        tween.advance(0.25);
        assert!((tween.wave(1.0) - 1.0).abs() < 1e-5);
        assert_eq!(tween.progress(), 0.0);
        assert!(!tween.finished());
    }
}
