//! End-to-end system action flows driven through the shell.

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;

use deskshell::apps::AppId;
use deskshell::config::Config;
use deskshell::shell::{DeskShell, Surface};
use deskshell::system::SystemAction;
use deskshell::window::WindowData;

fn shell() -> DeskShell {
    let mut shell = DeskShell::new(Config::default());
    shell.arrange(Rect::new(0, 0, 120, 40));
    shell
}

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn restart_clears_the_session_after_its_delay() {
    let mut shell = shell();
    shell.open_app(AppId::Notepad, WindowData::None);
    shell.open_app(AppId::Terminal, WindowData::None);
    assert_eq!(shell.registry().windows().len(), 2);

    let t0 = Instant::now();
    shell.perform_system_action(SystemAction::Restart, t0);
    assert_eq!(shell.surface(), Surface::Transition(SystemAction::Restart));

    // Mid-transition: the session is still intact.
    shell.tick(t0 + Duration::from_millis(3000));
    assert_eq!(shell.registry().windows().len(), 2);

    shell.tick(t0 + SystemAction::Restart.delay());
    assert_eq!(shell.surface(), Surface::Desktop);
    assert!(shell.registry().is_empty());
    assert_eq!(shell.registry().active_id(), None);
}

#[test]
fn superseding_action_cancels_the_earlier_one() {
    let mut shell = shell();
    let t0 = Instant::now();
    shell.perform_system_action(SystemAction::Lock, t0);
    shell.perform_system_action(SystemAction::Shutdown, t0 + Duration::from_millis(300));

    // Past the lock deadline: the lock must not take effect.
    shell.tick(t0 + Duration::from_millis(1200));
    assert_eq!(shell.surface(), Surface::Transition(SystemAction::Shutdown));
    assert!(!shell.system().is_locked());

    shell.tick(t0 + Duration::from_millis(300) + SystemAction::Shutdown.delay());
    assert_eq!(shell.surface(), Surface::PoweredOff);
}

#[test]
fn powered_off_screen_accepts_enter_to_power_on() {
    let mut shell = shell();
    let t0 = Instant::now();
    shell.perform_system_action(SystemAction::Shutdown, t0);
    shell.tick(t0 + SystemAction::Shutdown.delay());
    assert_eq!(shell.surface(), Surface::PoweredOff);

    // Random keys are swallowed; Enter powers back on.
    assert!(shell.handle_event(&press(KeyCode::Char('x'))));
    assert_eq!(shell.surface(), Surface::PoweredOff);
    shell.handle_event(&press(KeyCode::Enter));
    assert_eq!(shell.surface(), Surface::Desktop);
}

#[test]
fn lock_screen_gates_on_any_nonempty_password() {
    let mut shell = shell();
    shell.open_app(AppId::Browser, WindowData::None);
    let t0 = Instant::now();
    shell.perform_system_action(SystemAction::Lock, t0);
    shell.tick(t0 + SystemAction::Lock.delay());
    assert_eq!(shell.surface(), Surface::Locked);

    // Keyboard input is captured by the lock screen, not the desktop.
    shell.handle_event(&press(KeyCode::Enter));
    assert!(shell.unlock_error());
    assert_eq!(shell.surface(), Surface::Locked);

    for ch in "hunter2".chars() {
        shell.handle_event(&press(KeyCode::Char(ch)));
    }
    assert!(!shell.unlock_error());
    shell.handle_event(&press(KeyCode::Enter));
    assert_eq!(shell.surface(), Surface::Desktop);

    // The session survived the lock.
    assert_eq!(shell.registry().windows().len(), 1);
}

#[test]
fn transition_swallows_desktop_input() {
    let mut shell = shell();
    let t0 = Instant::now();
    shell.perform_system_action(SystemAction::Shutdown, t0);

    assert!(shell.handle_event(&press(KeyCode::Esc)));
    assert!(shell.registry().is_empty());
    assert_eq!(shell.surface(), Surface::Transition(SystemAction::Shutdown));
}
