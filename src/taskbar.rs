//! The bottom taskbar: start button, one entry per open window, and the
//! tray (theme toggle, volume, wifi, clock).
//!
//! Hit rectangles are recorded when the bar is laid out each frame and
//! consulted by the shell's mouse dispatch, so hit-testing and rendering
//! can never disagree.

use ratatui::layout::Rect;

use crate::geometry::rect_contains;
use crate::window::{Window, WindowId};

/// Widest a window button may grow, icon and padding included.
const MAX_BUTTON_WIDTH: u16 = 18;
const START_WIDTH: u16 = 3;
const TRAY_ICON_WIDTH: u16 = 3;

#[derive(Debug, Clone)]
pub struct WindowButton {
    pub id: WindowId,
    pub rect: Rect,
}

#[derive(Debug, Default)]
pub struct Taskbar {
    area: Rect,
    start: Rect,
    buttons: Vec<WindowButton>,
    theme: Rect,
    volume: Rect,
    wifi: Rect,
    clock: Rect,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split `area` into the desktop region and the one-row bar at the
    /// bottom.
    pub fn split_area(area: Rect) -> (Rect, Rect) {
        let bar_height = 1u16.min(area.height);
        let desktop = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height.saturating_sub(bar_height),
        };
        let bar = Rect {
            x: area.x,
            y: area.y + desktop.height,
            width: area.width,
            height: bar_height,
        };
        (desktop, bar)
    }

    /// Recompute all hit rectangles for this frame.
    pub fn arrange(&mut self, bar: Rect, windows: &[Window], clock_width: u16) {
        self.area = bar;
        self.buttons.clear();
        if bar.width == 0 || bar.height == 0 {
            self.start = Rect::default();
            self.theme = Rect::default();
            self.volume = Rect::default();
            self.wifi = Rect::default();
            self.clock = Rect::default();
            return;
        }
        let y = bar.y;
        self.start = Rect {
            x: bar.x,
            y,
            width: START_WIDTH.min(bar.width),
            height: 1,
        };

        // Tray grows leftward from the right edge: clock, wifi, volume,
        // theme toggle.
        let mut tray_x = bar.x + bar.width;
        let mut take = |width: u16| -> Rect {
            if tray_x <= bar.x + width {
                return Rect::default();
            }
            tray_x -= width;
            Rect {
                x: tray_x,
                y,
                width,
                height: 1,
            }
        };
        self.clock = take(clock_width + 2);
        self.wifi = take(TRAY_ICON_WIDTH);
        self.volume = take(TRAY_ICON_WIDTH);
        self.theme = take(TRAY_ICON_WIDTH);

        // Window buttons fill the middle, creation order, truncated evenly
        // when space runs short.
        let list_start = self.start.x + self.start.width + 1;
        let list_end = tray_x.saturating_sub(1);
        let available = list_end.saturating_sub(list_start);
        if windows.is_empty() || available == 0 {
            return;
        }
        let per_button = (available / windows.len() as u16)
            .min(MAX_BUTTON_WIDTH)
            .max(4);
        let mut x = list_start;
        for window in windows {
            if x + per_button > list_end {
                break;
            }
            self.buttons.push(WindowButton {
                id: window.id.clone(),
                rect: Rect {
                    x,
                    y,
                    width: per_button.saturating_sub(1),
                    height: 1,
                },
            });
            x += per_button;
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn start_rect(&self) -> Rect {
        self.start
    }

    pub fn buttons(&self) -> &[WindowButton] {
        &self.buttons
    }

    pub fn theme_rect(&self) -> Rect {
        self.theme
    }

    pub fn volume_rect(&self) -> Rect {
        self.volume
    }

    pub fn wifi_rect(&self) -> Rect {
        self.wifi
    }

    pub fn clock_rect(&self) -> Rect {
        self.clock
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.area, column, row)
    }

    pub fn hit_start(&self, column: u16, row: u16) -> bool {
        rect_contains(self.start, column, row)
    }

    pub fn hit_window(&self, column: u16, row: u16) -> Option<&WindowId> {
        self.buttons
            .iter()
            .find(|button| rect_contains(button.rect, column, row))
            .map(|button| &button.id)
    }

    pub fn hit_theme(&self, column: u16, row: u16) -> bool {
        rect_contains(self.theme, column, row)
    }

    pub fn hit_volume(&self, column: u16, row: u16) -> bool {
        rect_contains(self.volume, column, row)
    }

    pub fn hit_wifi(&self, column: u16, row: u16) -> bool {
        rect_contains(self.wifi, column, row)
    }
}
