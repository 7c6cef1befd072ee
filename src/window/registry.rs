//! The window registry: the one authoritative collection of open windows.
//!
//! All lifecycle and stacking mutations funnel through here. Operations on
//! ids that are not present are silent no-ops by design: ids only ever come
//! from the registry itself, so a miss means the window was already closed,
//! not a caller error worth reporting.

use std::time::{SystemTime, UNIX_EPOCH};

use ratatui::prelude::Rect;

use super::{Window, WindowData, WindowId};
use crate::apps::AppDescriptor;
use crate::geometry::{WinRect, centered};

/// First z-index handed out; leaves stacking room below for desktop chrome.
const INITIAL_Z: u64 = 1000;

#[derive(Debug, Default)]
pub struct WindowRegistry {
    /// Creation order. Stacking is derived from `z_index`, never from this
    /// ordering; the taskbar reads this ordering directly.
    windows: Vec<Window>,
    active: Option<WindowId>,
    next_z: u64,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            active: None,
            next_z: INITIAL_Z,
        }
    }

    /// Open a new window for `descriptor`, centered in `viewport`, and make
    /// it active. Returns the new id.
    pub fn open(&mut self, descriptor: &AppDescriptor, data: WindowData, viewport: Rect) -> WindowId {
        self.open_at(descriptor, data, viewport, now_millis())
    }

    /// `open` with an explicit creation timestamp. The id is derived from
    /// the timestamp, so two same-millisecond opens of one app collide; the
    /// registry takes no corrective action.
    pub fn open_at(
        &mut self,
        descriptor: &AppDescriptor,
        data: WindowData,
        viewport: Rect,
        creation_millis: u64,
    ) -> WindowId {
        let id = WindowId::new(descriptor.id, creation_millis);
        let frame = centered(viewport, descriptor.default_width, descriptor.default_height);
        let z_index = self.bump_z();
        tracing::debug!(window_id = %id, app = %descriptor.id, z = z_index, "opened window");
        self.windows.push(Window {
            id: id.clone(),
            app: descriptor.id,
            title: descriptor.name.to_string(),
            icon: descriptor.icon,
            component: descriptor.component,
            frame,
            minimized: false,
            maximized: false,
            z_index,
            data,
        });
        self.active = Some(id.clone());
        id
    }

    /// Remove the window. If it was active, the active reference becomes
    /// none; it is never reassigned to another window.
    pub fn close(&mut self, id: &WindowId) {
        let before = self.windows.len();
        self.windows.retain(|window| &window.id != id);
        if self.windows.len() != before {
            tracing::debug!(window_id = %id, "closed window");
        }
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
    }

    /// Toggle the minimized flag.
    pub fn minimize(&mut self, id: &WindowId) {
        if let Some(window) = self.get_mut(id) {
            window.minimized = !window.minimized;
        }
    }

    /// Toggle the maximized flag. The stored frame is left untouched so
    /// toggling back restores the prior geometry.
    pub fn maximize(&mut self, id: &WindowId) {
        if let Some(window) = self.get_mut(id) {
            window.maximized = !window.maximized;
        }
    }

    /// Raise the window to the top of the stack, un-minimize it, and make
    /// it active.
    pub fn focus(&mut self, id: &WindowId) {
        if !self.contains(id) {
            return;
        }
        let z_index = self.bump_z();
        if let Some(window) = self.get_mut(id) {
            window.z_index = z_index;
            window.minimized = false;
        }
        self.active = Some(id.clone());
    }

    /// The taskbar click convention: clicking the entry of the active,
    /// visible window hides it; clicking any other entry brings that window
    /// to the front.
    pub fn taskbar_click(&mut self, id: &WindowId) {
        let active_and_visible = self.active.as_ref() == Some(id)
            && self.get(id).is_some_and(|window| !window.minimized);
        if active_and_visible {
            self.minimize(id);
        } else {
            self.focus(id);
        }
    }

    /// Direct position overwrite from the drag handler. Callers must not
    /// invoke this while the window is maximized.
    pub fn set_position(&mut self, id: &WindowId, x: i32, y: i32) {
        if let Some(window) = self.get_mut(id) {
            window.frame.x = x;
            window.frame.y = y;
        }
    }

    /// Direct size overwrite from the resize handler. Same caveat as
    /// [`set_position`](Self::set_position).
    pub fn set_size(&mut self, id: &WindowId, width: u16, height: u16) {
        if let Some(window) = self.get_mut(id) {
            window.frame.width = width;
            window.frame.height = height;
        }
    }

    pub fn set_frame(&mut self, id: &WindowId, frame: WinRect) {
        if let Some(window) = self.get_mut(id) {
            window.frame = frame;
        }
    }

    /// Drop every window and the active reference (the restart path).
    pub fn clear(&mut self) {
        self.windows.clear();
        self.active = None;
    }

    pub fn get(&self, id: &WindowId) -> Option<&Window> {
        self.windows.iter().find(|window| &window.id == id)
    }

    fn get_mut(&mut self, id: &WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|window| &window.id == id)
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.get(id).is_some()
    }

    /// All windows in creation order (taskbar order).
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn active_id(&self) -> Option<&WindowId> {
        self.active.as_ref()
    }

    pub fn active(&self) -> Option<&Window> {
        self.active.as_ref().and_then(|id| self.get(id))
    }

    /// Windows in stacking order, back to front (ascending z-index).
    pub fn stacking(&self) -> Vec<&Window> {
        let mut stacked: Vec<&Window> = self.windows.iter().collect();
        stacked.sort_by_key(|window| window.z_index);
        stacked
    }

    /// The topmost visible window, if any.
    pub fn topmost_visible(&self) -> Option<&Window> {
        self.windows
            .iter()
            .filter(|window| window.visible())
            .max_by_key(|window| window.z_index)
    }

    fn bump_z(&mut self) -> u64 {
        let z = self.next_z;
        // Monotone ordinal; never compacted or reused. An in-memory session
        // cannot realistically approach u64 wraparound.
        self.next_z += 1;
        z
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
