//! Transient overlay state: context menu, start menu, and tray dialogs.
//!
//! One owner for everything that dismisses on an outside click. Replacing
//! the context menu wholesale is the mutual-exclusion rule: at most one
//! menu can exist because there is only one slot.

use crate::apps::AppId;
use crate::system::SystemAction;

/// What a menu entry does when activated. A closed set: menu entries can
/// only trigger operations the shell itself exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Placeholder entries the desktop menu carries without behavior yet.
    NoOp,
    /// Force a full repaint of the terminal.
    Refresh,
    OpenApp(AppId),
    System(SystemAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub icon: Option<&'static str>,
    pub action: MenuAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub x: u16,
    pub y: u16,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Default)]
pub struct OverlayState {
    context_menu: Option<ContextMenu>,
    start_menu_open: bool,
    wifi_dialog_open: bool,
    volume_dialog_open: bool,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the context menu wholesale; `None` closes it. Opening a new
    /// menu implicitly discards any prior one.
    pub fn set_context_menu(&mut self, menu: Option<ContextMenu>) {
        self.context_menu = menu;
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    pub fn toggle_start_menu(&mut self) {
        self.start_menu_open = !self.start_menu_open;
    }

    pub fn close_start_menu(&mut self) {
        self.start_menu_open = false;
    }

    pub fn start_menu_open(&self) -> bool {
        self.start_menu_open
    }

    /// Compound dismissal for a click on the bare desktop: both the start
    /// menu and any context menu go away. Clicks inside an overlay never
    /// reach this (the shell consumes them at the overlay boundary).
    pub fn dismiss_desktop_click(&mut self) {
        self.start_menu_open = false;
        self.context_menu = None;
    }

    pub fn set_wifi_dialog(&mut self, open: bool) {
        self.wifi_dialog_open = open;
    }

    pub fn toggle_wifi_dialog(&mut self) {
        self.wifi_dialog_open = !self.wifi_dialog_open;
    }

    pub fn wifi_dialog_open(&self) -> bool {
        self.wifi_dialog_open
    }

    pub fn set_volume_dialog(&mut self, open: bool) {
        self.volume_dialog_open = open;
    }

    pub fn toggle_volume_dialog(&mut self) {
        self.volume_dialog_open = !self.volume_dialog_open;
    }

    pub fn volume_dialog_open(&self) -> bool {
        self.volume_dialog_open
    }

    /// Whether any outside-click-dismissable overlay is up.
    pub fn any_menu_open(&self) -> bool {
        self.start_menu_open || self.context_menu.is_some()
    }
}

/// The desktop right-click menu, as shipped: View and Sort by are inert,
/// Refresh repaints, Personalize opens Settings.
pub fn desktop_context_menu(x: u16, y: u16) -> ContextMenu {
    ContextMenu {
        x,
        y,
        items: vec![
            MenuItem {
                label: "View",
                icon: Some("👁"),
                action: MenuAction::NoOp,
            },
            MenuItem {
                label: "Sort by",
                icon: Some("⇅"),
                action: MenuAction::NoOp,
            },
            MenuItem {
                label: "Refresh",
                icon: Some("⟳"),
                action: MenuAction::Refresh,
            },
            MenuItem {
                label: "Personalize",
                icon: Some("🎨"),
                action: MenuAction::OpenApp(AppId::Settings),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_a_menu_replaces_the_previous_one() {
        let mut overlays = OverlayState::new();
        overlays.set_context_menu(Some(desktop_context_menu(5, 5)));
        overlays.set_context_menu(Some(desktop_context_menu(20, 8)));
        let menu = overlays.context_menu().expect("menu open");
        assert_eq!((menu.x, menu.y), (20, 8));
    }

    #[test]
    fn desktop_click_dismisses_menu_and_start_menu_together() {
        let mut overlays = OverlayState::new();
        overlays.toggle_start_menu();
        overlays.set_context_menu(Some(desktop_context_menu(5, 5)));
        assert!(overlays.any_menu_open());

        overlays.dismiss_desktop_click();
        assert!(!overlays.start_menu_open());
        assert!(overlays.context_menu().is_none());
    }

    #[test]
    fn dialogs_are_independent() {
        let mut overlays = OverlayState::new();
        overlays.toggle_wifi_dialog();
        overlays.toggle_volume_dialog();
        assert!(overlays.wifi_dialog_open() && overlays.volume_dialog_open());
        overlays.toggle_wifi_dialog();
        assert!(!overlays.wifi_dialog_open());
        assert!(overlays.volume_dialog_open());
    }

    #[test]
    fn start_menu_toggle_round_trip() {
        let mut overlays = OverlayState::new();
        overlays.toggle_start_menu();
        assert!(overlays.start_menu_open());
        overlays.close_start_menu();
        assert!(!overlays.start_menu_open());
        overlays.close_start_menu();
        assert!(!overlays.start_menu_open());
    }
}
