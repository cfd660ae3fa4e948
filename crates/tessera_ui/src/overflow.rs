//! Panel overflow policies and the shared scroll state.

use crate::geometry::{Rect, Vec2};

/// What a container does with children that extend past its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Children draw outside the container.
    #[default]
    Visible,
    /// Children are clipped to the container.
    Clip,
    /// Clipped, with a vertical scrollbar.
    VerticalScroll,
    /// Clipped, scrollable on both axes.
    Scroll,
}

impl Overflow {
    /// Whether children are clipped.
    #[must_use]
    pub const fn clips(self) -> bool {
        !matches!(self, Self::Visible)
    }

    /// Whether the container scrolls vertically.
    #[must_use]
    pub const fn scrolls(self) -> bool {
        matches!(self, Self::VerticalScroll | Self::Scroll)
    }

    /// Whether the container scrolls horizontally.
    #[must_use]
    pub const fn scrolls_x(self) -> bool {
        matches!(self, Self::Scroll)
    }
}

/// Scroll offset shared by a container and its scrollbar.
///
/// `offset` always lies in `[0, max]` where `max = max(0, content - visible)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    offset: Vec2,
    max: Vec2,
    visible: Vec2,
}

impl ScrollState {
    /// Creates a state with nothing to scroll.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: Vec2::ZERO,
            max: Vec2::ZERO,
            visible: Vec2::ZERO,
        }
    }

    /// Current offset.
    #[must_use]
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Largest reachable offset.
    #[must_use]
    pub const fn max(&self) -> Vec2 {
        self.max
    }

    /// Whether there is anything to scroll vertically.
    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.max.y > 0.0 || self.max.x > 0.0
    }

    /// Updates the content and visible extents, re-clamping the offset.
    pub fn set_extent(&mut self, content: Vec2, visible: Vec2) {
        self.visible = visible;
        self.max = (content - visible).max(Vec2::ZERO);
        self.clamp();
    }

    /// Sets the offset; returns true if it changed.
    pub fn scroll_to(&mut self, offset: Vec2) -> bool {
        let before = self.offset;
        self.offset = offset;
        self.clamp();
        before != self.offset
    }

    /// Moves the offset; returns true if it changed.
    pub fn scroll_by(&mut self, delta: Vec2) -> bool {
        self.scroll_to(self.offset + delta)
    }

    /// Jumps to the end of the content.
    pub fn scroll_to_end(&mut self) {
        self.offset = self.max;
    }

    /// Vertical position as a fraction of the scroll range, for the scrollbar.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.max.y > 0.0 {
            self.offset.y / self.max.y
        } else {
            0.0
        }
    }

    /// Sets the vertical position from a scrollbar fraction.
    pub fn set_fraction(&mut self, fraction: f32) -> bool {
        let y = fraction.clamp(0.0, 1.0) * self.max.y;
        self.scroll_to(Vec2::new(self.offset.x, y))
    }

    /// Scrollbar thumb inside `track`, sized by the visible share of the content.
    #[must_use]
    pub fn thumb_rect(&self, track: Rect) -> Rect {
        let content = self.visible.y + self.max.y;
        let share = if content > 0.0 { (self.visible.y / content).clamp(0.1, 1.0) } else { 1.0 };
        let height = track.height * share;
        let y = track.y + (track.height - height) * self.fraction();
        Rect::new(track.x, y, track.width, height)
    }

    fn clamp(&mut self) {
        self.offset.x = self.offset.x.clamp(0.0, self.max.x);
        self.offset.y = self.offset.y.clamp(0.0, self.max.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_clamped_on_every_write() {
        let mut s = ScrollState::new();
        s.set_extent(Vec2::new(100.0, 300.0), Vec2::new(100.0, 100.0));
        assert_eq!(s.max(), Vec2::new(0.0, 200.0));

        assert!(s.scroll_by(Vec2::new(50.0, 500.0)));
        assert_eq!(s.offset(), Vec2::new(0.0, 200.0));

        s.scroll_to(Vec2::new(0.0, -5.0));
        assert_eq!(s.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_content_shrink_reclamps() {
        let mut s = ScrollState::new();
        s.set_extent(Vec2::new(0.0, 300.0), Vec2::new(0.0, 100.0));
        s.scroll_to_end();
        s.set_extent(Vec2::new(0.0, 150.0), Vec2::new(0.0, 100.0));
        assert_eq!(s.offset().y, 50.0);
        assert!((s.fraction() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_scrollbar_view_in_sync() {
        let mut s = ScrollState::new();
        s.set_extent(Vec2::new(0.0, 400.0), Vec2::new(0.0, 100.0));
        s.set_fraction(0.5);
        assert_eq!(s.offset().y, 150.0);

        let thumb = s.thumb_rect(Rect::new(0.0, 0.0, 10.0, 100.0));
        assert_eq!(thumb.height, 25.0);
        assert_eq!(thumb.y, 37.5);
    }

    #[test]
    fn test_overflow_flags() {
        assert!(!Overflow::Visible.clips());
        assert!(Overflow::Clip.clips() && !Overflow::Clip.scrolls());
        assert!(Overflow::VerticalScroll.scrolls() && !Overflow::VerticalScroll.scrolls_x());
    }
}
