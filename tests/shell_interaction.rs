//! Pointer-driven desktop scenarios: taskbar toggling, window chrome,
//! menus, and drag interactions, replayed as synthetic mouse events.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use deskshell::apps::AppId;
use deskshell::config::Config;
use deskshell::geometry::WINDOW_MIN_WIDTH;
use deskshell::shell::DeskShell;
use deskshell::window::{WindowData, WindowId};

const AREA: Rect = Rect {
    x: 0,
    y: 0,
    width: 120,
    height: 40,
};

fn shell_with(apps: &[AppId]) -> (DeskShell, Vec<WindowId>) {
    let mut shell = DeskShell::new(Config::default());
    shell.arrange(AREA);
    let ids = apps
        .iter()
        .map(|&app| shell.open_app(app, WindowData::None))
        .collect();
    shell.arrange(AREA);
    (shell, ids)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn click(shell: &mut DeskShell, column: u16, row: u16) {
    shell.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), column, row));
    shell.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), column, row));
    shell.arrange(AREA);
}

fn right_click(shell: &mut DeskShell, column: u16, row: u16) {
    shell.handle_event(&mouse(MouseEventKind::Down(MouseButton::Right), column, row));
    shell.arrange(AREA);
}

#[test]
fn taskbar_button_toggles_the_active_window() {
    let (mut shell, ids) = shell_with(&[AppId::Notepad]);
    let button = shell.taskbar().buttons()[0].rect;

    // Active and visible: the click minimizes.
    click(&mut shell, button.x, button.y);
    assert!(shell.registry().get(&ids[0]).unwrap().minimized);
    assert_eq!(shell.registry().active_id(), Some(&ids[0]));

    // Minimized: the click restores and raises.
    click(&mut shell, button.x, button.y);
    let window = shell.registry().get(&ids[0]).unwrap();
    assert!(!window.minimized);
    assert_eq!(shell.registry().topmost_visible().unwrap().id, ids[0]);
}

#[test]
fn taskbar_button_focuses_an_inactive_window() {
    let (mut shell, ids) = shell_with(&[AppId::Notepad, AppId::Terminal]);
    assert_eq!(shell.registry().active_id(), Some(&ids[1]));

    let first_button = shell.taskbar().buttons()[0].rect;
    click(&mut shell, first_button.x, first_button.y);
    assert_eq!(shell.registry().active_id(), Some(&ids[0]));
    assert!(!shell.registry().get(&ids[0]).unwrap().minimized);
}

#[test]
fn caption_buttons_minimize_maximize_and_close() {
    let (mut shell, ids) = shell_with(&[AppId::Browser]);
    let frame = shell.registry().get(&ids[0]).unwrap().frame;
    let header = frame.y as u16;
    let right = (frame.x + frame.width as i32 - 1) as u16;

    // Maximize toggles without touching the stored frame.
    click(&mut shell, right - 3, header);
    assert!(shell.registry().get(&ids[0]).unwrap().maximized);
    assert_eq!(shell.registry().get(&ids[0]).unwrap().frame, frame);

    // While maximized the window covers the desktop; its buttons moved to
    // the desktop's top-right corner.
    let layout = shell.frame_layout().windows.last().unwrap().frame;
    let max_right = (layout.x + layout.width as i32 - 1) as u16;
    let max_header = layout.y as u16;
    click(&mut shell, max_right - 5, max_header);
    assert!(shell.registry().get(&ids[0]).unwrap().minimized);

    // Restore through the taskbar, then close.
    let button = shell.taskbar().buttons()[0].rect;
    click(&mut shell, button.x, button.y);
    let layout = shell.frame_layout().windows.last().unwrap().frame;
    let max_right = (layout.x + layout.width as i32 - 1) as u16;
    click(&mut shell, max_right - 1, layout.y as u16);
    assert!(shell.registry().is_empty());
    assert_eq!(shell.registry().active_id(), None);
}

#[test]
fn header_drag_moves_and_corner_drag_resizes() {
    let (mut shell, ids) = shell_with(&[AppId::Calculator]);
    let frame = shell.registry().get(&ids[0]).unwrap().frame;

    // Drag the header five cells right, two down.
    let grab = ((frame.x + 2) as u16, frame.y as u16);
    shell.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), grab.0, grab.1));
    shell.handle_event(&mouse(
        MouseEventKind::Drag(MouseButton::Left),
        grab.0 + 5,
        grab.1 + 2,
    ));
    shell.handle_event(&mouse(
        MouseEventKind::Up(MouseButton::Left),
        grab.0 + 5,
        grab.1 + 2,
    ));
    let moved = shell.registry().get(&ids[0]).unwrap().frame;
    assert_eq!((moved.x, moved.y), (frame.x + 5, frame.y + 2));
    assert_eq!((moved.width, moved.height), (frame.width, frame.height));
    shell.arrange(AREA);

    // Grab the bottom-right corner and shrink hard; the minimum holds.
    let corner = (
        (moved.x + moved.width as i32 - 1) as u16,
        (moved.y + moved.height as i32 - 1) as u16,
    );
    shell.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), corner.0, corner.1));
    shell.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), moved.x as u16, corner.1));
    shell.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), moved.x as u16, corner.1));
    let resized = shell.registry().get(&ids[0]).unwrap().frame;
    assert_eq!(resized.width, WINDOW_MIN_WIDTH);
    assert_eq!((resized.x, resized.y), (moved.x, moved.y));
}

#[test]
fn desktop_click_dismisses_start_and_context_menus_together() {
    let (mut shell, _) = shell_with(&[]);
    let start = shell.taskbar().start_rect();
    click(&mut shell, start.x, start.y);
    right_click(&mut shell, 40, 10);
    assert!(shell.overlays().start_menu_open());
    assert!(shell.overlays().context_menu().is_some());

    click(&mut shell, 100, 25);
    assert!(!shell.overlays().start_menu_open());
    assert!(shell.overlays().context_menu().is_none());
}

#[test]
fn context_menu_personalize_opens_settings() {
    let (mut shell, _) = shell_with(&[]);
    right_click(&mut shell, 30, 8);
    let layout = shell.frame_layout().context_menu.clone().expect("menu laid out");
    // Personalize is the last entry.
    let rect = *layout.items.last().expect("items");
    click(&mut shell, rect.x, rect.y);

    assert!(shell.overlays().context_menu().is_none());
    assert_eq!(shell.registry().windows().len(), 1);
    assert_eq!(shell.registry().windows()[0].app, AppId::Settings);
}

#[test]
fn start_menu_search_launches_the_first_hit() {
    let (mut shell, _) = shell_with(&[]);
    let start = shell.taskbar().start_rect();
    click(&mut shell, start.x, start.y);

    for ch in "calcu".chars() {
        shell.handle_event(&Event::Key(KeyEvent::new(
            KeyCode::Char(ch),
            KeyModifiers::NONE,
        )));
    }
    shell.handle_event(&Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));

    assert_eq!(shell.registry().windows().len(), 1);
    assert_eq!(shell.registry().windows()[0].app, AppId::Calculator);
    assert!(!shell.overlays().start_menu_open());
    assert_eq!(shell.start_search(), "");
}

#[test]
fn clicks_inside_a_dialog_do_not_fall_through() {
    let (mut shell, ids) = shell_with(&[AppId::Notepad]);
    let wifi = shell.taskbar().wifi_rect();
    click(&mut shell, wifi.x, wifi.y);
    let dialog = shell.frame_layout().wifi_dialog.expect("dialog open");

    // The dialog overlaps the centered window; clicking it must not focus
    // or move anything underneath.
    let z_before = shell.registry().get(&ids[0]).unwrap().z_index;
    click(&mut shell, dialog.x + 2, dialog.y + 2);
    assert!(shell.overlays().wifi_dialog_open());
    assert_eq!(shell.registry().get(&ids[0]).unwrap().z_index, z_before);

    // Outside the dialog closes it.
    click(&mut shell, 1, 1);
    assert!(!shell.overlays().wifi_dialog_open());
}

#[test]
fn desktop_icon_click_launches_the_app() {
    let (mut shell, _) = shell_with(&[]);
    let (app, rect) = shell.frame_layout().desktop_icons[0];
    click(&mut shell, rect.x, rect.y);
    assert_eq!(shell.registry().windows().len(), 1);
    assert_eq!(shell.registry().windows()[0].app, app);
}

#[test]
fn windows_cover_desktop_icons() {
    // A maximized window spans the icon column; the click lands on the
    // window body and must not launch anything underneath.
    let (mut shell, ids) = shell_with(&[AppId::Maps]);
    let frame = shell.registry().get(&ids[0]).unwrap().frame;
    let right = (frame.x + frame.width as i32 - 1) as u16;
    click(&mut shell, right - 3, frame.y as u16); // maximize button

    let (_, rect) = shell.frame_layout().desktop_icons[2];
    click(&mut shell, rect.x, rect.y);
    assert_eq!(shell.registry().windows().len(), 1);
    assert_eq!(shell.registry().active_id(), Some(&ids[0]));
}

#[test]
fn theme_toggle_flips_the_mode() {
    let (mut shell, _) = shell_with(&[]);
    let mode = shell.theme().mode;
    let toggle = shell.taskbar().theme_rect();
    click(&mut shell, toggle.x, toggle.y);
    assert_eq!(shell.theme().mode, mode.toggled());
}
