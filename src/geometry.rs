//! Pure window geometry: placement, clamping, and drag/resize deltas.
//!
//! All coordinates are logical cells. Origins are signed (`i32`) so a window
//! may be dragged or centered partially off the viewport without wrapping;
//! sizes stay unsigned.

use ratatui::prelude::Rect;

/// Minimum window size enforced while resizing.
pub const WINDOW_MIN_WIDTH: u16 = 12;
pub const WINDOW_MIN_HEIGHT: u16 = 4;

/// Minimum number of header cells a dragged window must keep inside the
/// desktop so the user can grab its chrome again.
pub const MIN_VISIBLE_MARGIN: u16 = 4;

/// Signed window rectangle: signed origin with unsigned size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl WinRect {
    pub fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The on-screen portion of this rect, clipped to `bounds`.
    pub fn visible_in(&self, bounds: Rect) -> Rect {
        let left = self.x.max(bounds.x as i32);
        let top = self.y.max(bounds.y as i32);
        let right = (self.x + self.width as i32).min(bounds.x as i32 + bounds.width as i32);
        let bottom = (self.y + self.height as i32).min(bounds.y as i32 + bounds.height as i32);
        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        let col = column as i32;
        let row = row as i32;
        col >= self.x
            && col < self.x + self.width as i32
            && row >= self.y
            && row < self.y + self.height as i32
    }
}

/// Edge or corner grabbed during a resize drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    fn moves_left_edge(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    fn moves_top_edge(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    fn moves_right_edge(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    fn moves_bottom_edge(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Default placement: center a `width x height` window inside `viewport`.
///
/// Integer halving, and the result is deliberately not clamped; a viewport
/// smaller than the default size yields a negative origin rather than an
/// error.
pub fn centered(viewport: Rect, width: u16, height: u16) -> WinRect {
    let x = viewport.x as i32 + viewport.width as i32 / 2 - width as i32 / 2;
    let y = viewport.y as i32 + viewport.height as i32 / 2 - height as i32 / 2;
    WinRect::new(x, y, width, height)
}

/// Apply a header drag: offset the window origin by the pointer delta.
///
/// The header row is kept at least `MIN_VISIBLE_MARGIN` cells inside the
/// desktop horizontally and never above its top edge, so the window stays
/// grabbable.
pub fn apply_move_drag(
    initial: WinRect,
    start_col: u16,
    start_row: u16,
    column: u16,
    row: u16,
    bounds: Rect,
) -> WinRect {
    let dx = column as i32 - start_col as i32;
    let dy = row as i32 - start_row as i32;
    let mut x = initial.x + dx;
    let mut y = initial.y + dy;

    let margin = MIN_VISIBLE_MARGIN as i32;
    let left_limit = bounds.x as i32 - initial.width as i32 + margin;
    let right_limit = bounds.x as i32 + bounds.width as i32 - margin;
    x = x.clamp(left_limit, right_limit.max(left_limit));

    let top = bounds.y as i32;
    let bottom = top + bounds.height as i32 - 1;
    y = y.clamp(top, bottom.max(top));

    WinRect::new(x, y, initial.width, initial.height)
}

/// Apply an edge/corner resize drag to `initial`, enforcing the minimum
/// window size. When a left/top edge shrinks past the minimum the origin is
/// pushed back so the opposite edge stays fixed.
pub fn apply_resize_drag(
    initial: WinRect,
    edge: ResizeEdge,
    start_col: u16,
    start_row: u16,
    column: u16,
    row: u16,
) -> WinRect {
    let dx = column as i32 - start_col as i32;
    let dy = row as i32 - start_row as i32;
    let mut x = initial.x;
    let mut y = initial.y;
    let mut width = initial.width as i32;
    let mut height = initial.height as i32;

    if edge.moves_left_edge() {
        x += dx;
        width -= dx;
    } else if edge.moves_right_edge() {
        width += dx;
    }
    if edge.moves_top_edge() {
        y += dy;
        height -= dy;
    } else if edge.moves_bottom_edge() {
        height += dy;
    }

    let min_w = WINDOW_MIN_WIDTH as i32;
    let min_h = WINDOW_MIN_HEIGHT as i32;
    if width < min_w {
        if edge.moves_left_edge() {
            x -= min_w - width;
        }
        width = min_w;
    }
    if height < min_h {
        if edge.moves_top_edge() {
            y -= min_h - height;
        }
        height = min_h;
    }

    WinRect::new(x, y, width.min(u16::MAX as i32) as u16, height.min(u16::MAX as i32) as u16)
}
