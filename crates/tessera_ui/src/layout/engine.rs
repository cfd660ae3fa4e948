//! Anchor resolution.
//!
//! Pure functions of (anchor, offset, declared size, parent content rect,
//! sibling cursor) -> destination rect. Nothing here touches the entity tree.

use super::anchor::{Anchor, Length, Size};
use crate::geometry::{Rect, Vec2};

/// Tolerance used when deciding whether an inline entity still fits its row.
const FIT_EPSILON: f32 = 0.01;

/// Kind-specific size lookup for [`Length::Intrinsic`] axes.
///
/// Values are screen pixels (already scaled). `None` means the kind has no
/// intrinsic size on that axis and the axis fills instead.
pub trait IntrinsicSize {
    /// Intrinsic width.
    fn width(&mut self) -> Option<f32>;
    /// Intrinsic height, knowing the resolved width.
    fn height(&mut self, width: f32) -> Option<f32>;
}

/// Fixed intrinsic size, or none at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedIntrinsic(pub Option<Vec2>);

impl IntrinsicSize for FixedIntrinsic {
    fn width(&mut self) -> Option<f32> {
        self.0.map(|v| v.x)
    }

    fn height(&mut self, _width: f32) -> Option<f32> {
        self.0.map(|v| v.y)
    }
}

/// Placement inputs for one entity. Pixel values are unscaled.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutRequest {
    /// Anchor.
    pub anchor: Anchor,
    /// Declared size.
    pub size: Size,
    /// Offset from the anchor point.
    pub offset: Vec2,
    /// Spacing before the entity.
    pub space_before: Vec2,
    /// Spacing after the entity.
    pub space_after: Vec2,
}

/// Running auto-flow position, one per parent, advanced in child order.
///
/// Coordinates are relative to the parent's content rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlowCursor {
    /// Horizontal position inside the current row.
    pub x: f32,
    /// Top of the current row.
    pub row_top: f32,
    /// Tallest entity (including spacing) in the current row.
    pub row_height: f32,
    /// Whether any entity was placed in the current row.
    pub row_open: bool,
}

impl FlowCursor {
    /// Creates a cursor at the content origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bottom of the auto-flow content placed so far.
    #[must_use]
    pub fn extent(&self) -> f32 {
        self.row_top + self.row_height
    }

    /// Closes the current row; the next entity lands below it.
    fn break_row(&mut self) {
        if self.row_open {
            self.row_top += self.row_height;
        }
        self.x = 0.0;
        self.row_height = 0.0;
        self.row_open = false;
    }

    /// Accounts for an entity placed at the cursor.
    fn advance(&mut self, width: f32, height: f32) {
        self.x += width;
        self.row_height = self.row_height.max(height);
        self.row_open = true;
    }
}

/// Resolves one axis of a declared size.
///
/// `available` is the space left for fill (the remaining row for auto-flow),
/// `parent` the full content extent that fractions are taken of. The result
/// is never negative: a degenerate size clamps to zero.
pub fn resolve_length(
    length: Length,
    available: f32,
    parent: f32,
    margins: f32,
    scale: f32,
    intrinsic: impl FnOnce() -> Option<f32>,
) -> f32 {
    let available = available.max(0.0);
    let value = match length {
        Length::Pixels(px) => px * scale,
        Length::Fraction(f) => f * parent.max(0.0),
        Length::Fill => available - margins,
        Length::Intrinsic => intrinsic().unwrap_or(available - margins),
    };
    value.max(0.0)
}

/// Resolves width then height.
fn resolve_size(
    size: Size,
    available: Vec2,
    parent: Vec2,
    margins: Vec2,
    scale: f32,
    intrinsic: &mut dyn IntrinsicSize,
) -> Vec2 {
    let width = resolve_length(size.width, available.x, parent.x, margins.x, scale, || intrinsic.width());
    let height = resolve_length(size.height, available.y, parent.y, margins.y, scale, || {
        intrinsic.height(width)
    });
    Vec2::new(width, height)
}

/// Position of a static anchor. Right and bottom anchors mirror the offset
/// so a positive offset always points into the parent.
#[must_use]
pub fn anchor_position(anchor: Anchor, content: Rect, size: Vec2, offset: Vec2) -> Vec2 {
    let left = content.x + offset.x;
    let center_x = content.x + (content.width - size.x) * 0.5 + offset.x;
    let right = content.right() - size.x - offset.x;
    let top = content.y + offset.y;
    let center_y = content.y + (content.height - size.y) * 0.5 + offset.y;
    let bottom = content.bottom() - size.y - offset.y;

    match anchor {
        Anchor::TopLeft | Anchor::Auto | Anchor::AutoInline | Anchor::AutoInlineNoBreak => {
            Vec2::new(left, top)
        }
        Anchor::TopCenter | Anchor::AutoCenter => Vec2::new(center_x, top),
        Anchor::TopRight => Vec2::new(right, top),
        Anchor::CenterLeft => Vec2::new(left, center_y),
        Anchor::Center => Vec2::new(center_x, center_y),
        Anchor::CenterRight => Vec2::new(right, center_y),
        Anchor::BottomLeft => Vec2::new(left, bottom),
        Anchor::BottomCenter => Vec2::new(center_x, bottom),
        Anchor::BottomRight => Vec2::new(right, bottom),
    }
}

/// Computes the destination rect of one entity inside `content`.
///
/// Static anchors ignore `cursor`; auto-flow anchors read and advance it.
pub fn place(
    request: &LayoutRequest,
    content: Rect,
    cursor: &mut FlowCursor,
    scale: f32,
    intrinsic: &mut dyn IntrinsicSize,
) -> Rect {
    let offset = request.offset * scale;
    let before = request.space_before * scale;
    let after = request.space_after * scale;
    let margins = before + after;

    if !request.anchor.is_auto() {
        let size = resolve_size(request.size, content.size(), content.size(), margins, scale, intrinsic);
        let pos = anchor_position(request.anchor, content, size, offset);
        return Rect::from_pos_size(pos, size);
    }

    match request.anchor {
        Anchor::Auto | Anchor::AutoCenter => cursor.break_row(),
        _ => {}
    }

    let remaining = |c: &FlowCursor| Vec2::new(content.width - c.x, content.height - c.row_top);
    let mut size = resolve_size(request.size, remaining(&*cursor), content.size(), margins, scale, intrinsic);

    let overflows = cursor.x + before.x + size.x > content.width + FIT_EPSILON;
    if request.anchor == Anchor::AutoInline && cursor.row_open && overflows {
        cursor.break_row();
        size = resolve_size(request.size, remaining(&*cursor), content.size(), margins, scale, intrinsic);
    }

    let x = if request.anchor == Anchor::AutoCenter {
        content.x + (content.width - size.x) * 0.5 + offset.x
    } else {
        content.x + cursor.x + before.x + offset.x
    };
    let y = content.y + cursor.row_top + before.y + offset.y;

    if request.anchor == Anchor::AutoCenter {
        cursor.advance(content.width.max(before.x + size.x + after.x), before.y + size.y + after.y);
    } else {
        cursor.advance(before.x + size.x + after.x, before.y + size.y + after.y);
    }

    Rect::new(x, y, size.x, size.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(anchor: Anchor, w: f32, h: f32) -> LayoutRequest {
        LayoutRequest {
            anchor,
            size: Size::from((w, h)),
            ..LayoutRequest::default()
        }
    }

    #[test]
    fn test_static_anchors() {
        let content = Rect::new(0.0, 0.0, 200.0, 100.0);
        let mut cursor = FlowCursor::new();
        let mut none = FixedIntrinsic(None);

        let r = place(&req(Anchor::BottomRight, 20.0, 10.0), content, &mut cursor, 1.0, &mut none);
        assert_eq!(r, Rect::new(180.0, 90.0, 20.0, 10.0));

        let r = place(&req(Anchor::Center, 20.0, 10.0), content, &mut cursor, 1.0, &mut none);
        assert_eq!(r, Rect::new(90.0, 45.0, 20.0, 10.0));

        // static anchors never touch the cursor
        assert_eq!(cursor, FlowCursor::new());
    }

    #[test]
    fn test_mirrored_offset() {
        let content = Rect::new(0.0, 0.0, 200.0, 100.0);
        let mut request = req(Anchor::TopRight, 20.0, 10.0);
        request.offset = Vec2::new(5.0, 5.0);
        let r = place(&request, content, &mut FlowCursor::new(), 1.0, &mut FixedIntrinsic(None));
        assert_eq!(r.position(), Vec2::new(175.0, 5.0));
    }

    #[test]
    fn test_inline_wraps() {
        let content = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut cursor = FlowCursor::new();
        let mut none = FixedIntrinsic(None);

        let a = place(&req(Anchor::AutoInline, 60.0, 10.0), content, &mut cursor, 1.0, &mut none);
        let b = place(&req(Anchor::AutoInline, 30.0, 20.0), content, &mut cursor, 1.0, &mut none);
        let c = place(&req(Anchor::AutoInline, 30.0, 10.0), content, &mut cursor, 1.0, &mut none);

        assert_eq!(a.position(), Vec2::new(0.0, 0.0));
        assert_eq!(b.position(), Vec2::new(60.0, 0.0));
        // row closed at height 20
        assert_eq!(c.position(), Vec2::new(0.0, 20.0));
    }

    #[test]
    fn test_no_break_overflows() {
        let content = Rect::new(0.0, 0.0, 50.0, 100.0);
        let mut cursor = FlowCursor::new();
        let mut none = FixedIntrinsic(None);

        place(&req(Anchor::AutoInlineNoBreak, 40.0, 10.0), content, &mut cursor, 1.0, &mut none);
        let b = place(&req(Anchor::AutoInlineNoBreak, 40.0, 10.0), content, &mut cursor, 1.0, &mut none);
        assert_eq!(b.position(), Vec2::new(40.0, 0.0));
    }

    #[test]
    fn test_fill_never_negative() {
        let content = Rect::new(0.0, 0.0, 0.0, 0.0);
        let mut request = req(Anchor::TopLeft, 0.0, 0.0);
        request.space_before = Vec2::new(5.0, 5.0);
        let r = place(&request, content, &mut FlowCursor::new(), 1.0, &mut FixedIntrinsic(None));
        assert_eq!(r.size(), Vec2::ZERO);
    }

    #[test]
    fn test_inline_fractions_share_row() {
        let content = Rect::new(0.0, 0.0, 90.0, 100.0);
        let mut cursor = FlowCursor::new();
        let mut none = FixedIntrinsic(None);
        let third = req(Anchor::AutoInline, 1.0 / 3.0, 10.0);

        let rects: Vec<Rect> = (0..3)
            .map(|_| place(&third, content, &mut cursor, 1.0, &mut none))
            .collect();
        assert!((rects[2].x - 60.0).abs() < 1e-3);
        assert_eq!(rects[2].y, 0.0);
    }

    #[test]
    fn test_scale_skips_fractions() {
        let content = Rect::new(0.0, 0.0, 200.0, 100.0);
        let r = place(&req(Anchor::TopLeft, 0.5, 40.0), content, &mut FlowCursor::new(), 2.0, &mut FixedIntrinsic(None));
        assert_eq!(r.width, 100.0);
        assert_eq!(r.height, 80.0);
    }
}
