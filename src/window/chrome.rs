//! Window chrome layout: where the header, caption buttons, and resize
//! handles live for a given window frame, and what a pointer press on them
//! means. Rendering lives in `ui`; this module only answers hit-tests so
//! the shell and the renderer cannot disagree about geometry.

use crate::geometry::{ResizeEdge, WinRect};

/// Cells reserved at the right of the header for the minimize, maximize,
/// and close buttons (three buttons, two cells each).
const BUTTON_CELLS: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Drag,
    Minimize,
    Maximize,
    Close,
}

/// The header is the top border row of the frame.
pub fn header_row(frame: WinRect) -> i32 {
    frame.y
}

/// Interior content area, inside the one-cell border and below the header.
pub fn content_rect(frame: WinRect) -> WinRect {
    WinRect::new(
        frame.x + 1,
        frame.y + 1,
        frame.width.saturating_sub(2),
        frame.height.saturating_sub(2),
    )
}

/// Classify a pointer press on the header row.
pub fn header_action_at(frame: WinRect, column: u16, row: u16) -> Option<HeaderAction> {
    let col = column as i32;
    if row as i32 != header_row(frame) || col < frame.x || col >= frame.x + frame.width as i32 {
        return None;
    }
    let right = frame.x + frame.width as i32 - 1;
    // Buttons sit flush against the right border corner.
    let buttons_start = right - BUTTON_CELLS;
    if col > buttons_start && col <= right - 1 {
        let slot = (col - buttons_start - 1) / 2;
        return Some(match slot {
            0 => HeaderAction::Minimize,
            1 => HeaderAction::Maximize,
            _ => HeaderAction::Close,
        });
    }
    if col == right {
        // Top-right corner stays a resize handle, not a button.
        return None;
    }
    Some(HeaderAction::Drag)
}

/// Column where the caption buttons begin (used by the renderer).
pub fn buttons_start(frame: WinRect) -> i32 {
    frame.x + frame.width as i32 - 1 - BUTTON_CELLS
}

/// Classify a pointer press on the window border as a resize grab.
/// Corners win over edges; the header row (minus its corners) is excluded
/// because it belongs to drag/caption handling.
pub fn resize_edge_at(frame: WinRect, column: u16, row: u16) -> Option<ResizeEdge> {
    let col = column as i32;
    let row = row as i32;
    let left = frame.x;
    let right = frame.x + frame.width as i32 - 1;
    let top = frame.y;
    let bottom = frame.y + frame.height as i32 - 1;
    if col < left || col > right || row < top || row > bottom {
        return None;
    }
    let on_left = col == left;
    let on_right = col == right;
    let on_top = row == top;
    let on_bottom = row == bottom;
    match (on_left, on_right, on_top, on_bottom) {
        (true, _, true, _) => Some(ResizeEdge::TopLeft),
        (_, true, true, _) => Some(ResizeEdge::TopRight),
        (true, _, _, true) => Some(ResizeEdge::BottomLeft),
        (_, true, _, true) => Some(ResizeEdge::BottomRight),
        (true, _, _, _) => Some(ResizeEdge::Left),
        (_, true, _, _) => Some(ResizeEdge::Right),
        (_, _, _, true) => Some(ResizeEdge::Bottom),
        // Top edge between the corners is the header.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> WinRect {
        WinRect::new(10, 5, 40, 12)
    }

    #[test]
    fn header_press_classification() {
        let f = frame();
        // Plain header cell drags.
        assert_eq!(header_action_at(f, 15, 5), Some(HeaderAction::Drag));
        // Button cells, right to left: close, maximize, minimize.
        let right = 10 + 40 - 1;
        assert_eq!(header_action_at(f, (right - 1) as u16, 5), Some(HeaderAction::Close));
        assert_eq!(header_action_at(f, (right - 3) as u16, 5), Some(HeaderAction::Maximize));
        assert_eq!(header_action_at(f, (right - 5) as u16, 5), Some(HeaderAction::Minimize));
        // Off the header row.
        assert_eq!(header_action_at(f, 15, 6), None);
    }

    #[test]
    fn corner_beats_edge() {
        let f = frame();
        assert_eq!(resize_edge_at(f, 10, 5), Some(ResizeEdge::TopLeft));
        assert_eq!(resize_edge_at(f, 49, 16), Some(ResizeEdge::BottomRight));
        assert_eq!(resize_edge_at(f, 10, 8), Some(ResizeEdge::Left));
        assert_eq!(resize_edge_at(f, 49, 8), Some(ResizeEdge::Right));
        assert_eq!(resize_edge_at(f, 20, 16), Some(ResizeEdge::Bottom));
        // Header interior is not a resize handle.
        assert_eq!(resize_edge_at(f, 20, 5), None);
        // Interior is nothing.
        assert_eq!(resize_edge_at(f, 20, 8), None);
    }
}
