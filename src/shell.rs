//! The desktop shell: one context object owning the window registry, the
//! system-action machine, the overlay coordinator, and the per-frame hit
//! layout. All user input funnels through [`DeskShell::handle_event`]; the
//! single-threaded event loop is the only writer, so every mutation is
//! atomic from the caller's point of view.

use std::time::Instant;

use chrono::{DateTime, Local};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::apps::{AppId, catalog, search};
use crate::config::Config;
use crate::geometry::{
    ResizeEdge, WinRect, apply_move_drag, apply_resize_drag, rect_contains,
};
use crate::overlay::{ContextMenu, MenuAction, OverlayState, desktop_context_menu};
use crate::system::{SystemAction, SystemState};
use crate::taskbar::Taskbar;
use crate::theme::Theme;
use crate::window::chrome::{self, HeaderAction};
use crate::window::{WindowData, WindowId, WindowRegistry};

const START_MENU_WIDTH: u16 = 36;
const START_MENU_MAX_HEIGHT: u16 = 22;
const CONTEXT_MENU_WIDTH: u16 = 20;
const DIALOG_WIDTH: u16 = 38;
const DIALOG_HEIGHT: u16 = 9;

/// Which full-screen surface the shell is presenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Desktop,
    /// A system action is pending; the boot/shutdown animation is showing.
    Transition(SystemAction),
    Locked,
    PoweredOff,
}

#[derive(Debug, Clone)]
struct MoveDrag {
    id: WindowId,
    initial: WinRect,
    start_col: u16,
    start_row: u16,
}

#[derive(Debug, Clone)]
struct ResizeDrag {
    id: WindowId,
    edge: ResizeEdge,
    initial: WinRect,
    start_col: u16,
    start_row: u16,
}

/// Screen-space placement of one window this frame (maximized windows get
/// the whole desktop region).
#[derive(Debug, Clone)]
pub struct WindowHit {
    pub id: WindowId,
    pub frame: WinRect,
    pub maximized: bool,
}

#[derive(Debug, Clone)]
pub struct StartMenuLayout {
    pub rect: Rect,
    pub search_box: Rect,
    pub items: Vec<(AppId, Rect)>,
    pub lock: Rect,
    pub restart: Rect,
    pub shutdown: Rect,
}

#[derive(Debug, Clone)]
pub struct ContextMenuLayout {
    pub rect: Rect,
    /// Row rect per menu item, same order as the menu's item list.
    pub items: Vec<Rect>,
}

/// All hit rectangles for the current frame, rebuilt by
/// [`DeskShell::arrange`] before every render pass.
#[derive(Debug, Default, Clone)]
pub struct FrameLayout {
    pub desktop: Rect,
    /// Launcher icons along the left edge, underneath all windows.
    pub desktop_icons: Vec<(AppId, Rect)>,
    /// Stacking order, back to front.
    pub windows: Vec<WindowHit>,
    pub start_menu: Option<StartMenuLayout>,
    pub context_menu: Option<ContextMenuLayout>,
    pub wifi_dialog: Option<Rect>,
    pub volume_dialog: Option<Rect>,
    pub power_button: Option<Rect>,
}

pub struct DeskShell {
    config: Config,
    theme: Theme,
    registry: WindowRegistry,
    system: SystemState,
    overlays: OverlayState,
    taskbar: Taskbar,
    frame: FrameLayout,
    clock: DateTime<Local>,
    start_search: String,
    unlock_input: String,
    unlock_error: bool,
    drag: Option<MoveDrag>,
    resize: Option<ResizeDrag>,
    hard_redraw: bool,
}

impl DeskShell {
    pub fn new(config: Config) -> Self {
        let theme = Theme {
            mode: config.theme,
            wallpaper: config.wallpaper,
        };
        Self {
            config,
            theme,
            registry: WindowRegistry::new(),
            system: SystemState::new(),
            overlays: OverlayState::new(),
            taskbar: Taskbar::new(),
            frame: FrameLayout::default(),
            clock: Local::now(),
            start_search: String::new(),
            unlock_input: String::new(),
            unlock_error: false,
            drag: None,
            resize: None,
            hard_redraw: false,
        }
    }

    pub fn surface(&self) -> Surface {
        if let Some(pending) = self.system.pending() {
            return Surface::Transition(pending.action);
        }
        if self.system.is_locked() {
            return Surface::Locked;
        }
        if self.system.is_shutdown_complete() {
            return Surface::PoweredOff;
        }
        Surface::Desktop
    }

    // ------------------------------------------------------------------
    // Operations exposed to leaf applications and menus
    // ------------------------------------------------------------------

    /// Open a catalog application, centered in the desktop region.
    pub fn open_app(&mut self, app: AppId, data: WindowData) -> WindowId {
        self.registry
            .open(app.descriptor(), data, self.frame.desktop)
    }

    /// Open the browser app on `url`, defaulting the scheme to https.
    pub fn open_browser_with_url(&mut self, url: &str) -> WindowId {
        let url = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("https://{url}")
        };
        self.open_app(AppId::Browser, WindowData::Url { url })
    }

    /// Hand a URL to the real system browser.
    pub fn open_external(&mut self, url: &str) {
        if let Err(error) = webbrowser::open(url) {
            tracing::warn!(%url, %error, "failed to open system browser");
        }
    }

    pub fn perform_system_action(&mut self, action: SystemAction, now: Instant) {
        self.system.perform(action, now);
        // The start menu hosts the power buttons; it closes with the click.
        self.overlays.close_start_menu();
    }

    /// Idle-branch update: advance system timers and the taskbar clock.
    pub fn tick(&mut self, now: Instant) {
        if self.system.tick(now) == Some(SystemAction::Restart) {
            // A restart boots into an empty session.
            self.registry.clear();
            self.overlays.dismiss_desktop_click();
        }
        self.clock = Local::now();
    }

    /// One-shot flag telling the runner to clear the terminal buffer.
    pub fn take_hard_redraw(&mut self) -> bool {
        std::mem::take(&mut self.hard_redraw)
    }

    // ------------------------------------------------------------------
    // Per-frame layout
    // ------------------------------------------------------------------

    /// Rebuild every hit rectangle for a frame of the given size. Must run
    /// before `handle_event` so pointer dispatch sees current geometry.
    pub fn arrange(&mut self, area: Rect) {
        let (desktop, bar) = Taskbar::split_area(area);
        let clock_width = self.clock_text().chars().count() as u16;
        self.taskbar.arrange(bar, self.registry.windows(), clock_width);

        let mut layout = FrameLayout {
            desktop,
            ..FrameLayout::default()
        };

        layout.desktop_icons = desktop_icon_rects(desktop);

        for window in self.registry.stacking() {
            if !window.visible() {
                continue;
            }
            let frame = if window.maximized {
                WinRect::new(
                    desktop.x as i32,
                    desktop.y as i32,
                    desktop.width,
                    desktop.height,
                )
            } else {
                window.frame
            };
            layout.windows.push(WindowHit {
                id: window.id.clone(),
                frame,
                maximized: window.maximized,
            });
        }

        if self.overlays.start_menu_open() {
            layout.start_menu = Some(self.arrange_start_menu(desktop));
        }
        if let Some(menu) = self.overlays.context_menu() {
            layout.context_menu = Some(arrange_context_menu(menu, desktop));
        }
        if self.overlays.wifi_dialog_open() {
            layout.wifi_dialog = Some(centered_box(desktop, DIALOG_WIDTH, DIALOG_HEIGHT));
        }
        if self.overlays.volume_dialog_open() {
            layout.volume_dialog = Some(centered_box(desktop, DIALOG_WIDTH, DIALOG_HEIGHT - 2));
        }
        if self.system.is_shutdown_complete() {
            let button = Rect {
                x: area.x + area.width.saturating_sub(14) / 2,
                y: (area.y + area.height / 2).saturating_add(2),
                width: 14.min(area.width),
                height: 1,
            };
            layout.power_button = Some(button);
        }

        self.frame = layout;
    }

    fn arrange_start_menu(&self, desktop: Rect) -> StartMenuLayout {
        let height = START_MENU_MAX_HEIGHT.min(desktop.height);
        let width = START_MENU_WIDTH.min(desktop.width);
        let rect = Rect {
            x: desktop.x + 1.min(desktop.width.saturating_sub(width)),
            y: desktop.y + desktop.height - height,
            width,
            height,
        };
        let search_box = Rect {
            x: rect.x + 2,
            y: rect.y + 1,
            width: rect.width.saturating_sub(4),
            height: 1,
        };
        let mut items = Vec::new();
        let first_row = rect.y + 3;
        let last_row = rect.y + height.saturating_sub(3);
        let mut row = first_row;
        for descriptor in search(&self.start_search) {
            if row >= last_row {
                break;
            }
            items.push((
                descriptor.id,
                Rect {
                    x: rect.x + 1,
                    y: row,
                    width: rect.width.saturating_sub(2),
                    height: 1,
                },
            ));
            row += 1;
        }
        // Power row: lock, restart, shutdown side by side.
        let power_y = rect.y + height.saturating_sub(2);
        let segment = rect.width.saturating_sub(2) / 3;
        let power = |index: u16| Rect {
            x: rect.x + 1 + index * segment,
            y: power_y,
            width: segment,
            height: 1,
        };
        StartMenuLayout {
            rect,
            search_box,
            items,
            lock: power(0),
            restart: power(1),
            shutdown: power(2),
        }
    }

    // ------------------------------------------------------------------
    // Event dispatch
    // ------------------------------------------------------------------

    /// Route one input event. Returns true when the event was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Mouse(mouse) => self.on_mouse(*mouse),
            Event::Key(key) => self.on_key(*key),
            _ => false,
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::Down(button) => self.on_mouse_down(button, mouse.column, mouse.row),
            MouseEventKind::Drag(MouseButton::Left) => self.on_mouse_drag(mouse.column, mouse.row),
            MouseEventKind::Up(MouseButton::Left) => {
                let was_dragging = self.drag.is_some() || self.resize.is_some();
                self.drag = None;
                self.resize = None;
                was_dragging
            }
            _ => false,
        }
    }

    fn on_mouse_down(&mut self, button: MouseButton, column: u16, row: u16) -> bool {
        match self.surface() {
            Surface::Desktop => self.desktop_mouse_down(button, column, row),
            Surface::PoweredOff => {
                if let Some(rect) = self.frame.power_button
                    && rect_contains(rect, column, row)
                {
                    self.system.power_on();
                }
                true
            }
            // The lock screen is keyboard-driven; transitions swallow input.
            Surface::Locked | Surface::Transition(_) => true,
        }
    }

    fn desktop_mouse_down(&mut self, button: MouseButton, column: u16, row: u16) -> bool {
        // Overlays first: a press inside one is consumed at its boundary
        // and never reaches the desktop handler below.
        if let Some(layout) = self.frame.context_menu.clone() {
            if rect_contains(layout.rect, column, row) {
                if button == MouseButton::Left
                    && let Some(index) = layout
                        .items
                        .iter()
                        .position(|item| rect_contains(*item, column, row))
                    && let Some(menu) = self.overlays.context_menu()
                    && let Some(item) = menu.items.get(index)
                {
                    let action = item.action;
                    self.overlays.set_context_menu(None);
                    self.run_menu_action(action);
                }
                return true;
            }
            // Any press outside the menu bounds dismisses it; the press
            // then continues to whatever is underneath.
            self.overlays.set_context_menu(None);
        }

        if let Some(rect) = self.frame.wifi_dialog {
            if rect_contains(rect, column, row) {
                return true;
            }
            self.overlays.set_wifi_dialog(false);
        }
        if let Some(rect) = self.frame.volume_dialog {
            if rect_contains(rect, column, row) {
                return true;
            }
            self.overlays.set_volume_dialog(false);
        }

        if let Some(menu) = self.frame.start_menu.clone() {
            if rect_contains(menu.rect, column, row) {
                if button == MouseButton::Left {
                    self.start_menu_click(&menu, column, row);
                }
                return true;
            }
            self.overlays.close_start_menu();
        }

        if self.taskbar.contains(column, row) {
            self.taskbar_click(column, row);
            return true;
        }

        if let Some(hit) = self.topmost_window_at(column, row) {
            self.window_mouse_down(hit, column, row);
            return true;
        }

        // Icons sit underneath windows; a press that got this far is on
        // bare desktop or an icon.
        if button == MouseButton::Left
            && let Some((app, _)) = self
                .frame
                .desktop_icons
                .iter()
                .find(|(_, rect)| rect_contains(*rect, column, row))
                .copied()
        {
            self.open_app(app, WindowData::None);
            return true;
        }

        match button {
            MouseButton::Right => {
                self.overlays
                    .set_context_menu(Some(desktop_context_menu(column, row)));
            }
            _ => self.overlays.dismiss_desktop_click(),
        }
        true
    }

    fn start_menu_click(&mut self, menu: &StartMenuLayout, column: u16, row: u16) {
        let now = Instant::now();
        if rect_contains(menu.lock, column, row) {
            self.perform_system_action(SystemAction::Lock, now);
        } else if rect_contains(menu.restart, column, row) {
            self.perform_system_action(SystemAction::Restart, now);
        } else if rect_contains(menu.shutdown, column, row) {
            self.perform_system_action(SystemAction::Shutdown, now);
        } else if let Some((app, _)) = menu
            .items
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
            .copied()
        {
            self.launch_from_start_menu(app);
        }
    }

    fn launch_from_start_menu(&mut self, app: AppId) {
        self.open_app(app, WindowData::None);
        self.overlays.close_start_menu();
        self.start_search.clear();
    }

    fn taskbar_click(&mut self, column: u16, row: u16) {
        if self.taskbar.hit_start(column, row) {
            self.overlays.toggle_start_menu();
        } else if self.taskbar.hit_theme(column, row) {
            self.theme.mode = self.theme.mode.toggled();
        } else if self.taskbar.hit_volume(column, row) {
            self.overlays.toggle_volume_dialog();
        } else if self.taskbar.hit_wifi(column, row) {
            self.overlays.toggle_wifi_dialog();
        } else if let Some(id) = self.taskbar.hit_window(column, row).cloned() {
            self.registry.taskbar_click(&id);
        }
    }

    fn topmost_window_at(&self, column: u16, row: u16) -> Option<WindowHit> {
        self.frame
            .windows
            .iter()
            .rev()
            .find(|hit| hit.frame.contains(column, row))
            .cloned()
    }

    fn window_mouse_down(&mut self, hit: WindowHit, column: u16, row: u16) {
        // Pressing anywhere in a window raises and activates it, exactly as
        // a pointer-down on the window surface does in the desktop UI.
        self.registry.focus(&hit.id);

        if !hit.maximized
            && let Some(edge) = chrome::resize_edge_at(hit.frame, column, row)
        {
            self.resize = Some(ResizeDrag {
                id: hit.id,
                edge,
                initial: hit.frame,
                start_col: column,
                start_row: row,
            });
            return;
        }

        match chrome::header_action_at(hit.frame, column, row) {
            Some(HeaderAction::Minimize) => self.registry.minimize(&hit.id),
            Some(HeaderAction::Maximize) => self.registry.maximize(&hit.id),
            Some(HeaderAction::Close) => self.registry.close(&hit.id),
            Some(HeaderAction::Drag) if !hit.maximized => {
                self.drag = Some(MoveDrag {
                    id: hit.id,
                    initial: hit.frame,
                    start_col: column,
                    start_row: row,
                });
            }
            _ => {}
        }
    }

    fn on_mouse_drag(&mut self, column: u16, row: u16) -> bool {
        if let Some(drag) = &self.drag {
            let moved = apply_move_drag(
                drag.initial,
                drag.start_col,
                drag.start_row,
                column,
                row,
                self.frame.desktop,
            );
            self.registry.set_position(&drag.id.clone(), moved.x, moved.y);
            return true;
        }
        if let Some(resize) = &self.resize {
            let resized = apply_resize_drag(
                resize.initial,
                resize.edge,
                resize.start_col,
                resize.start_row,
                column,
                row,
            );
            self.registry.set_frame(&resize.id.clone(), resized);
            return true;
        }
        false
    }

    fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match self.surface() {
            Surface::Transition(_) => true,
            Surface::PoweredOff => {
                if key.code == KeyCode::Enter {
                    self.system.power_on();
                }
                true
            }
            Surface::Locked => {
                self.lock_screen_key(key);
                true
            }
            Surface::Desktop => self.desktop_key(key),
        }
    }

    fn lock_screen_key(&mut self, key: KeyEvent) {
        self.unlock_error = false;
        match key.code {
            KeyCode::Char(c) => self.unlock_input.push(c),
            KeyCode::Backspace => {
                self.unlock_input.pop();
            }
            KeyCode::Enter => {
                // Any non-empty credential unlocks; the gate is cosmetic.
                if self.unlock_input.is_empty() {
                    self.unlock_error = true;
                } else {
                    self.system.unlock();
                    self.unlock_input.clear();
                }
            }
            _ => {}
        }
    }

    fn desktop_key(&mut self, key: KeyEvent) -> bool {
        if self.overlays.start_menu_open() {
            match key.code {
                KeyCode::Esc => self.overlays.close_start_menu(),
                KeyCode::Backspace => {
                    self.start_search.pop();
                }
                KeyCode::Enter => {
                    if let Some(descriptor) = search(&self.start_search).first() {
                        let app = descriptor.id;
                        self.launch_from_start_menu(app);
                    }
                }
                KeyCode::Char(c) => self.start_search.push(c),
                _ => return false,
            }
            return true;
        }
        match key.code {
            KeyCode::Esc if self.overlays.any_menu_open() => {
                self.overlays.dismiss_desktop_click();
                true
            }
            // Hand the focused browser window's URL to the real browser.
            KeyCode::Char('o') => {
                if let Some(window) = self.registry.active()
                    && let WindowData::Url { url } = &window.data
                {
                    let url = url.clone();
                    self.open_external(&url);
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Read accessors for the renderer and tests
    // ------------------------------------------------------------------

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn system(&self) -> &SystemState {
        &self.system
    }

    pub fn overlays(&self) -> &OverlayState {
        &self.overlays
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn frame_layout(&self) -> &FrameLayout {
        &self.frame
    }

    pub fn start_search(&self) -> &str {
        &self.start_search
    }

    pub fn unlock_input(&self) -> &str {
        &self.unlock_input
    }

    pub fn unlock_error(&self) -> bool {
        self.unlock_error
    }

    pub fn clock_text(&self) -> String {
        self.clock.format(&self.config.clock_format).to_string()
    }
}

/// Launcher column down the left edge of the desktop, one catalog entry
/// per slot, as many as fit.
fn desktop_icon_rects(desktop: Rect) -> Vec<(AppId, Rect)> {
    const ICON_WIDTH: u16 = 14;
    const ICON_STEP: u16 = 2;
    if desktop.width < ICON_WIDTH + 2 {
        return Vec::new();
    }
    let mut icons = Vec::new();
    let mut y = desktop.y + 1;
    for descriptor in catalog() {
        if y + 1 > desktop.y + desktop.height {
            break;
        }
        icons.push((
            descriptor.id,
            Rect {
                x: desktop.x + 2,
                y,
                width: ICON_WIDTH,
                height: 1,
            },
        ));
        y += ICON_STEP;
    }
    icons
}

fn centered_box(desktop: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(desktop.width);
    let height = height.min(desktop.height);
    Rect {
        x: desktop.x + (desktop.width - width) / 2,
        y: desktop.y + (desktop.height - height) / 2,
        width,
        height,
    }
}

fn arrange_context_menu(menu: &ContextMenu, desktop: Rect) -> ContextMenuLayout {
    let width = CONTEXT_MENU_WIDTH.min(desktop.width.max(1));
    let height = (menu.items.len() as u16 + 2).min(desktop.height.max(1));
    let max_x = (desktop.x + desktop.width).saturating_sub(width);
    let max_y = (desktop.y + desktop.height).saturating_sub(height);
    let rect = Rect {
        x: menu.x.min(max_x).max(desktop.x),
        y: menu.y.min(max_y).max(desktop.y),
        width,
        height,
    };
    let items = (0..menu.items.len() as u16)
        .map(|index| Rect {
            x: rect.x + 1,
            y: rect.y + 1 + index,
            width: rect.width.saturating_sub(2),
            height: 1,
        })
        .collect();
    ContextMenuLayout { rect, items }
}

impl DeskShell {
    fn run_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::NoOp => {}
            MenuAction::Refresh => self.hard_redraw = true,
            MenuAction::OpenApp(app) => {
                self.open_app(app, WindowData::None);
            }
            MenuAction::System(action) => {
                self.perform_system_action(action, Instant::now());
            }
        }
    }
}
