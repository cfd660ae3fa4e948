//! Per-entity animators.
//!
//! An animator owns its progress and writes only to the entity's transient
//! [`Presentation`]. Presentation is reset at the start of every update, then
//! every enabled animator runs in attachment order; when two write the same
//! field the later one wins. Animators never touch declared geometry, so
//! layout stays a pure function of the tree.

mod builtin;
mod tween;

pub use builtin::{FadeOutAnimator, FloatUpDownAnimator, PulseAnimator, TypeWriterAnimator};
pub use tween::{Easing, Tween};

use crate::entity::EntityId;
use crate::geometry::{Rect, Vec2};
use crate::style::Color;

/// Transient visual state written by animators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    /// Added to the laid-out position at draw and hit-test time.
    pub offset: Vec2,
    /// Multiplies every color alpha.
    pub opacity: f32,
    /// Scales the drawn rect around its center.
    pub scale: f32,
    /// Limits how many characters of the entity's text are drawn.
    pub visible_chars: Option<usize>,
    /// Replaces the resolved fill color.
    pub tint: Option<Color>,
}

impl Presentation {
    /// No visual change.
    pub const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        opacity: 1.0,
        scale: 1.0,
        visible_chars: None,
        tint: None,
    };

    /// Restores [`Presentation::IDENTITY`].
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Applies offset and scale to a laid-out rect.
    #[must_use]
    pub fn apply(&self, rect: Rect) -> Rect {
        let moved = rect.translate(self.offset);
        if (self.scale - 1.0).abs() > f32::EPSILON {
            moved.scale_centered(self.scale)
        } else {
            moved
        }
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// What an animator sees during one update.
#[derive(Debug)]
pub struct AnimationFrame<'a> {
    /// Writable presentation of the animated entity.
    pub presentation: &'a mut Presentation,
    /// Rect from the previous layout.
    pub rect: Rect,
    /// Entity text, for kinds that carry text.
    pub text: Option<&'a str>,
}

/// Behaviour attached to one entity.
pub trait Animator {
    /// Advances by `dt` seconds and writes into the frame.
    fn update(&mut self, frame: &mut AnimationFrame<'_>, dt: f32);

    /// Restarts progress from the beginning.
    fn reset(&mut self);

    /// Whether the animator runs.
    fn enabled(&self) -> bool;

    /// Enables or disables the animator. Disabled animators keep their progress.
    fn set_enabled(&mut self, enabled: bool);

    /// Whether a one-shot animation has completed.
    fn finished(&self) -> bool {
        false
    }
}

/// Stable reference to an attached animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimatorHandle {
    /// Owning entity.
    pub entity: EntityId,
    /// Position in the entity's animator list.
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_apply() {
        let mut p = Presentation::IDENTITY;
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(p.apply(rect), rect);

        p.offset = Vec2::new(5.0, 0.0);
        p.scale = 2.0;
        assert_eq!(p.apply(rect), Rect::new(0.0, -5.0, 20.0, 20.0));

        p.reset();
        assert_eq!(p, Presentation::IDENTITY);
    }
}
