//! Stock animators.

use super::tween::{Easing, Tween};
use super::{AnimationFrame, Animator};
use crate::geometry::Vec2;

/// Bobs the entity up and down along a sine wave.
#[derive(Debug, Clone)]
pub struct FloatUpDownAnimator {
    /// Cycles per second.
    pub speed: f32,
    /// Peak displacement in pixels.
    pub distance: f32,
    clock: Tween,
    enabled: bool,
}

impl FloatUpDownAnimator {
    /// Creates an animator with the given speed and distance.
    #[must_use]
    pub const fn new(speed: f32, distance: f32) -> Self {
        Self {
            speed,
            distance,
            clock: Tween::endless(),
            enabled: true,
        }
    }
}

impl Default for FloatUpDownAnimator {
    fn default() -> Self {
        Self::new(1.0, 5.0)
    }
}

impl Animator for FloatUpDownAnimator {
    fn update(&mut self, frame: &mut AnimationFrame<'_>, dt: f32) {
        self.clock.advance(dt);
        frame.presentation.offset += Vec2::new(0.0, self.clock.wave(self.speed) * self.distance);
    }

    fn reset(&mut self) {
        self.clock.reset();
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Fades opacity from 1 to 0 over a duration.
#[derive(Debug, Clone)]
pub struct FadeOutAnimator {
    tween: Tween,
    enabled: bool,
}

impl FadeOutAnimator {
    /// Creates a fade with the given duration in seconds.
    #[must_use]
    pub const fn new(duration: f32, easing: Easing) -> Self {
        Self {
            tween: Tween::bounded(duration, easing),
            enabled: true,
        }
    }

    /// Current opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.tween.lerp(1.0, 0.0)
    }
}

impl Default for FadeOutAnimator {
    fn default() -> Self {
        Self::new(1.0, Easing::Linear)
    }
}

impl Animator for FadeOutAnimator {
    fn update(&mut self, frame: &mut AnimationFrame<'_>, dt: f32) {
        self.tween.advance(dt);
        frame.presentation.opacity = self.opacity();
    }

    fn reset(&mut self) {
        self.tween.reset();
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn finished(&self) -> bool {
        self.tween.finished()
    }
}

/// Reveals the entity's text a few characters at a time.
#[derive(Debug, Clone)]
pub struct TypeWriterAnimator {
    /// Characters revealed per second.
    pub chars_per_second: f32,
    clock: Tween,
    revealed: usize,
    total: usize,
    enabled: bool,
}

impl TypeWriterAnimator {
    /// Creates a typewriter at the given speed.
    #[must_use]
    pub const fn new(chars_per_second: f32) -> Self {
        Self {
            chars_per_second,
            clock: Tween::endless(),
            revealed: 0,
            total: usize::MAX,
            enabled: true,
        }
    }

    /// Characters revealed so far.
    #[must_use]
    pub const fn revealed(&self) -> usize {
        self.revealed
    }
}

impl Default for TypeWriterAnimator {
    fn default() -> Self {
        Self::new(30.0)
    }
}

impl Animator for TypeWriterAnimator {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn update(&mut self, frame: &mut AnimationFrame<'_>, dt: f32) {
        self.clock.advance(dt);
        self.total = frame.text.map_or(0, |t| t.chars().count());
        let shown = (self.clock.elapsed() * self.chars_per_second).floor().max(0.0) as usize;
        self.revealed = shown.min(self.total);
        frame.presentation.visible_chars = Some(self.revealed);
    }

    fn reset(&mut self) {
        self.clock.reset();
        self.revealed = 0;
        self.total = usize::MAX;
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn finished(&self) -> bool {
        self.revealed >= self.total
    }
}

/// Oscillates the drawn scale.
#[derive(Debug, Clone)]
pub struct PulseAnimator {
    /// Pulses per second.
    pub frequency: f32,
    /// Peak scale change (0.1 means 90%..110%).
    pub amplitude: f32,
    clock: Tween,
    enabled: bool,
}

impl PulseAnimator {
    /// Creates a pulse.
    #[must_use]
    pub const fn new(frequency: f32, amplitude: f32) -> Self {
        Self {
            frequency,
            amplitude,
            clock: Tween::endless(),
            enabled: true,
        }
    }
}

impl Default for PulseAnimator {
    fn default() -> Self {
        Self::new(1.0, 0.1)
    }
}

impl Animator for PulseAnimator {
    fn update(&mut self, frame: &mut AnimationFrame<'_>, dt: f32) {
        self.clock.advance(dt);
        frame.presentation.scale *= 1.0 + self.clock.wave(self.frequency) * self.amplitude;
    }

    fn reset(&mut self) {
        self.clock.reset();
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::Presentation;
    use crate::geometry::Rect;

    fn run(animator: &mut dyn Animator, text: Option<&str>, dt: f32) -> Presentation {
        let mut p = Presentation::IDENTITY;
        let mut frame = AnimationFrame {
            presentation: &mut p,
            rect: Rect::ZERO,
            text,
        };
        animator.update(&mut frame, dt);
        p
    }

    #[test]
    fn test_float_up_down_bounded() {
        let mut a = FloatUpDownAnimator::new(1.0, 5.0);
        let p = run(&mut a, None, 0.25);
        assert!((p.offset.y - 5.0).abs() < 1e-4);
        let p = run(&mut a, None, 0.5);
        assert!((p.offset.y + 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_fade_out_and_reset() {
        let mut a = FadeOutAnimator::new(1.0, Easing::Linear);
        assert!((run(&mut a, None, 0.25).opacity - 0.75).abs() < 1e-5);
        assert_eq!(run(&mut a, None, 1.0).opacity, 0.0);
        assert!(a.finished());

        a.reset();
        assert!(!a.finished());
        assert!((run(&mut a, None, 0.5).opacity - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_typewriter_reveals() {
        let mut a = TypeWriterAnimator::new(10.0);
        assert_eq!(run(&mut a, Some("hello"), 0.25).visible_chars, Some(2));
        assert_eq!(run(&mut a, Some("hello"), 1.0).visible_chars, Some(5));
        assert!(a.finished());
    }

    #[test]
    fn test_pulse_scales() {
        let mut a = PulseAnimator::new(1.0, 0.1);
        let p = run(&mut a, None, 0.25);
        assert!((p.scale - 1.1).abs() < 1e-4);
    }
}
