//! Rendering for every shell surface.
//!
//! Windows live in signed coordinates and may hang partially off the
//! desktop, so all drawing goes through clip-aware cell helpers instead of
//! whole-widget rendering; a window clipped at the viewport edge simply
//! loses the cells that fall outside.

use std::time::Instant;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};

use crate::geometry::WinRect;
use crate::shell::{ContextMenuLayout, DeskShell, StartMenuLayout, Surface, WindowHit};
use crate::system::SystemAction;
use crate::theme::Theme;
use crate::window::{Window, WindowData, chrome};

const START_GLYPH: &str = "⊞";
const THEME_GLYPH: &str = "◐";
const VOLUME_GLYPH: &str = "♫";
const WIFI_GLYPH: &str = "∿";
const CAPTION_BUTTONS: &str = "─ ▢ ✕";
const PROGRESS_WIDTH: u16 = 30;

pub fn render(frame: &mut Frame<'_>, shell: &DeskShell) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    match shell.surface() {
        Surface::Desktop => render_desktop(buf, area, shell),
        Surface::Transition(action) => render_transition(buf, area, shell, action),
        Surface::Locked => render_lock_screen(buf, area, shell),
        Surface::PoweredOff => render_powered_off(buf, area, shell),
    }
}

fn render_desktop(buf: &mut Buffer, area: Rect, shell: &DeskShell) {
    let theme = shell.theme();
    let layout = shell.frame_layout();

    fill(buf, layout.desktop, Style::default().bg(theme.desktop_bg()));

    let icon_style = Style::default()
        .bg(theme.desktop_bg())
        .fg(theme.header_active_fg());
    for (app, rect) in &layout.desktop_icons {
        let descriptor = app.descriptor();
        let label = format!("{} {}", descriptor.icon, descriptor.name);
        set_string_in(buf, *rect, &label, icon_style);
    }

    for hit in &layout.windows {
        if let Some(window) = shell.registry().get(&hit.id) {
            let active = shell.registry().active_id() == Some(&hit.id);
            render_window(buf, layout.desktop, theme, window, hit, active);
        }
    }

    render_taskbar(buf, shell);

    if let Some(menu) = &layout.start_menu {
        render_start_menu(buf, theme, shell, menu);
    }
    if let Some(rect) = layout.volume_dialog {
        render_volume_dialog(buf, theme, rect);
    }
    if let Some(rect) = layout.wifi_dialog {
        render_wifi_dialog(buf, theme, rect);
    }
    if let Some(menu) = &layout.context_menu {
        render_context_menu(buf, theme, shell, menu);
    }
}

fn render_window(
    buf: &mut Buffer,
    desktop: Rect,
    theme: &Theme,
    window: &Window,
    hit: &WindowHit,
    active: bool,
) {
    let frame = hit.frame;
    let clip = frame.visible_in(desktop);
    if clip.width == 0 || clip.height == 0 {
        return;
    }

    let body = Style::default().bg(theme.window_bg()).fg(theme.window_fg());
    let border = Style::default().bg(theme.window_bg()).fg(theme.border());
    let header = if active {
        Style::default()
            .bg(theme.header_active_bg())
            .fg(theme.header_active_fg())
    } else {
        Style::default()
            .bg(theme.header_inactive_bg())
            .fg(theme.header_inactive_fg())
    };

    let right = frame.x + frame.width as i32 - 1;
    let bottom = frame.y + frame.height as i32 - 1;

    // Header row: icon, title, caption buttons flush right.
    for col in frame.x..=right {
        put(buf, clip, col, frame.y, " ", header);
    }
    let caption = format!(" {} {}", window.icon, window.title);
    let caption_width = (chrome::buttons_start(frame) - frame.x).max(0) as usize;
    put_str(
        buf,
        clip,
        frame.x,
        frame.y,
        &truncate_to_width(&caption, caption_width),
        header,
    );
    put_str(
        buf,
        clip,
        chrome::buttons_start(frame) + 1,
        frame.y,
        CAPTION_BUTTONS,
        header,
    );

    // Body rows inside the side borders.
    for row in (frame.y + 1)..bottom {
        put(buf, clip, frame.x, row, "│", border);
        for col in (frame.x + 1)..right {
            put(buf, clip, col, row, " ", body);
        }
        put(buf, clip, right, row, "│", border);
    }

    // Bottom border.
    put(buf, clip, frame.x, bottom, "└", border);
    for col in (frame.x + 1)..right {
        put(buf, clip, col, bottom, "─", border);
    }
    put(buf, clip, right, bottom, "┘", border);

    render_window_content(buf, theme, window, frame, clip);
}

/// Placeholder face of the hosted application: centered icon and name plus
/// the handoff payload, if any.
fn render_window_content(
    buf: &mut Buffer,
    theme: &Theme,
    window: &Window,
    frame: WinRect,
    clip: Rect,
) {
    let content = chrome::content_rect(frame);
    if content.width == 0 || content.height == 0 {
        return;
    }
    let style = Style::default().bg(theme.window_bg()).fg(theme.window_fg());
    let banner = format!("{}  {}", window.icon, window.title);
    let banner = truncate_to_width(&banner, content.width as usize);
    let x = content.x + (content.width as i32 - banner.chars().count() as i32) / 2;
    let y = content.y + content.height as i32 / 2 - 1;
    put_str(buf, clip, x, y, &banner, style);

    let payload = match &window.data {
        WindowData::None => None,
        WindowData::File { path } => Some(path.as_str()),
        WindowData::Url { url } => Some(url.as_str()),
        WindowData::Text { body } => Some(body.as_str()),
    };
    if let Some(text) = payload {
        let line = truncate_to_width(text, content.width as usize);
        let x = content.x + (content.width as i32 - line.chars().count() as i32) / 2;
        put_str(
            buf,
            clip,
            x,
            y + 1,
            &line,
            Style::default().bg(theme.window_bg()).fg(theme.accent()),
        );
    }
}

fn render_taskbar(buf: &mut Buffer, shell: &DeskShell) {
    let theme = shell.theme();
    let taskbar = shell.taskbar();
    let bar = taskbar.area();
    if bar.width == 0 || bar.height == 0 {
        return;
    }
    let base = Style::default().bg(theme.taskbar_bg()).fg(theme.taskbar_fg());
    fill(buf, bar, base);

    let start_style = if shell.overlays().start_menu_open() {
        base.bg(theme.taskbar_active_bg())
    } else {
        base
    };
    set_string_in(buf, taskbar.start_rect(), &format!(" {START_GLYPH} "), start_style);

    for button in taskbar.buttons() {
        let Some(window) = shell.registry().get(&button.id) else {
            continue;
        };
        let active = shell.registry().active_id() == Some(&button.id);
        let style = if active && !window.minimized {
            base.bg(theme.taskbar_active_bg())
        } else if window.minimized {
            base.fg(theme.taskbar_minimized_fg())
        } else {
            base
        };
        fill(buf, button.rect, style);
        let label = format!(" {} {}", window.icon, window.title);
        set_string_in(buf, button.rect, &label, style);
    }

    set_string_in(buf, taskbar.theme_rect(), &format!(" {THEME_GLYPH} "), base);
    set_string_in(buf, taskbar.volume_rect(), &format!(" {VOLUME_GLYPH} "), base);
    set_string_in(buf, taskbar.wifi_rect(), &format!(" {WIFI_GLYPH} "), base);
    set_string_in(buf, taskbar.clock_rect(), &format!(" {}", shell.clock_text()), base);
}

fn render_start_menu(buf: &mut Buffer, theme: &Theme, shell: &DeskShell, menu: &StartMenuLayout) {
    let base = Style::default().bg(theme.menu_bg()).fg(theme.menu_fg());
    fill(buf, menu.rect, base);
    draw_border(buf, menu.rect, base.fg(theme.border()));

    // Search box; the caret is implied by the trailing underscore.
    let query = format!("⌕ {}_", shell.start_search());
    set_string_in(
        buf,
        menu.search_box,
        &truncate_to_width(&query, menu.search_box.width as usize),
        base.add_modifier(Modifier::UNDERLINED),
    );

    // Enter launches the first hit, so it gets the selection highlight.
    for (index, (app, rect)) in menu.items.iter().enumerate() {
        let descriptor = app.descriptor();
        let style = if index == 0 {
            Style::default()
                .bg(theme.menu_selected_bg())
                .fg(theme.menu_selected_fg())
        } else {
            base
        };
        fill(buf, *rect, style);
        let label = format!(" {} {}", descriptor.icon, descriptor.name);
        set_string_in(buf, *rect, &truncate_to_width(&label, rect.width as usize), style);
    }

    let power = base.fg(theme.danger());
    set_string_in(buf, menu.lock, " ⛉ Lock", base.fg(theme.accent()));
    set_string_in(buf, menu.restart, " ⟳ Restart", power);
    set_string_in(buf, menu.shutdown, " ⏻ Shut down", power);
}

fn render_context_menu(buf: &mut Buffer, theme: &Theme, shell: &DeskShell, layout: &ContextMenuLayout) {
    let Some(menu) = shell.overlays().context_menu() else {
        return;
    };
    let base = Style::default().bg(theme.menu_bg()).fg(theme.menu_fg());
    fill(buf, layout.rect, base);
    draw_border(buf, layout.rect, base.fg(theme.border()));
    for (item, rect) in menu.items.iter().zip(&layout.items) {
        let icon = item.icon.unwrap_or(" ");
        let label = format!("{icon} {}", item.label);
        set_string_in(buf, *rect, &truncate_to_width(&label, rect.width as usize), base);
    }
}

fn render_wifi_dialog(buf: &mut Buffer, theme: &Theme, rect: Rect) {
    let base = Style::default().bg(theme.dialog_bg()).fg(theme.dialog_fg());
    fill(buf, rect, base);
    draw_border(buf, rect, base.fg(theme.border()));
    set_string_in(buf, row_of(rect, 0), &format!(" {WIFI_GLYPH} Wi-Fi"), base.add_modifier(Modifier::BOLD));
    // Static neighborhood; the radio itself is simulated.
    let networks = [
        ("HomeNet-5G", "▂▄▆█", true),
        ("CoffeeHouse", "▂▄▆_", false),
        ("Neighbor's Wi-Fi", "▂▄__", false),
        ("xfinitywifi", "▂___", false),
    ];
    for (index, (name, bars, connected)) in networks.iter().enumerate() {
        let style = if *connected { base.fg(theme.accent()) } else { base };
        let suffix = if *connected { "  connected" } else { "" };
        let line = format!("  {bars}  {name}{suffix}");
        set_string_in(buf, row_of(rect, index as u16 + 2), &line, style);
    }
}

fn render_volume_dialog(buf: &mut Buffer, theme: &Theme, rect: Rect) {
    let base = Style::default().bg(theme.dialog_bg()).fg(theme.dialog_fg());
    fill(buf, rect, base);
    draw_border(buf, rect, base.fg(theme.border()));
    set_string_in(buf, row_of(rect, 0), &format!(" {VOLUME_GLYPH} Volume"), base.add_modifier(Modifier::BOLD));
    let track_width = rect.width.saturating_sub(8) as usize;
    let filled = track_width * 7 / 10;
    let slider: String = (0..track_width)
        .map(|cell| if cell < filled { '█' } else { '░' })
        .collect();
    set_string_in(buf, row_of(rect, 2), &format!("  {slider} 70"), base.fg(theme.accent()));
}

fn render_transition(buf: &mut Buffer, area: Rect, shell: &DeskShell, action: SystemAction) {
    let theme = shell.theme();
    let base = Style::default().bg(theme.screen_bg()).fg(theme.header_active_fg());
    fill(buf, area, base);

    let label = format!("{}…", action.label());
    center_string(buf, area, area.height / 2, &label, base.add_modifier(Modifier::BOLD));

    if let Some(progress) = shell.system().pending_progress(Instant::now()) {
        let width = PROGRESS_WIDTH.min(area.width) as usize;
        let filled = (progress * width as f64) as usize;
        let bar: String = (0..width)
            .map(|cell| if cell < filled { '█' } else { '░' })
            .collect();
        center_string(buf, area, area.height / 2 + 2, &bar, base.fg(theme.accent()));
    }
}

fn render_lock_screen(buf: &mut Buffer, area: Rect, shell: &DeskShell) {
    let theme = shell.theme();
    let base = Style::default().bg(theme.screen_bg()).fg(theme.header_active_fg());
    fill(buf, area, base);

    let mid = area.height / 2;
    center_string(buf, area, mid.saturating_sub(4), &shell.clock_text(), base.add_modifier(Modifier::BOLD));

    let masked: String = shell.unlock_input().chars().map(|_| '•').collect();
    let prompt = format!("Password: {masked}_");
    center_string(buf, area, mid, &prompt, base);
    if shell.unlock_error() {
        center_string(
            buf,
            area,
            mid + 2,
            "Enter a password to unlock",
            base.fg(theme.danger()),
        );
    } else {
        center_string(buf, area, mid + 2, "Press Enter to unlock", base.fg(theme.border()));
    }
}

fn render_powered_off(buf: &mut Buffer, area: Rect, shell: &DeskShell) {
    let theme = shell.theme();
    let base = Style::default().bg(ratatui::style::Color::Black).fg(theme.header_active_fg());
    fill(buf, area, base);

    center_string(
        buf,
        area,
        area.height / 2,
        "It's now safe to turn off your computer.",
        base,
    );
    if let Some(button) = shell.frame_layout().power_button {
        let style = base.fg(theme.accent()).add_modifier(Modifier::BOLD);
        set_string_in(buf, button, "⏻ Power on", style);
    }
}

// ----------------------------------------------------------------------
// Cell helpers
// ----------------------------------------------------------------------

/// Set one cell at signed coordinates if it falls inside `clip`.
fn put(buf: &mut Buffer, clip: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    if x < clip.x as i32
        || x >= clip.x as i32 + clip.width as i32
        || y < clip.y as i32
        || y >= clip.y as i32 + clip.height as i32
    {
        return;
    }
    if let Some(cell) = buf.cell_mut(Position::new(x as u16, y as u16)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

/// Write a string starting at signed coordinates, clipping per character.
fn put_str(buf: &mut Buffer, clip: Rect, x: i32, y: i32, text: &str, style: Style) {
    for (offset, ch) in text.chars().enumerate() {
        put(buf, clip, x + offset as i32, y, ch.encode_utf8(&mut [0; 4]), style);
    }
}

/// Write a string inside `rect`, truncated to its width.
fn set_string_in(buf: &mut Buffer, rect: Rect, text: &str, style: Style) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    put_str(
        buf,
        rect,
        rect.x as i32,
        rect.y as i32,
        &truncate_to_width(text, rect.width as usize),
        style,
    );
}

fn center_string(buf: &mut Buffer, area: Rect, row: u16, text: &str, style: Style) {
    let text = truncate_to_width(text, area.width as usize);
    let x = area.x as i32 + (area.width as i32 - text.chars().count() as i32) / 2;
    put_str(buf, area, x, area.y as i32 + row as i32, &text, style);
}

fn fill(buf: &mut Buffer, rect: Rect, style: Style) {
    for y in rect.y..rect.y.saturating_add(rect.height) {
        for x in rect.x..rect.x.saturating_add(rect.width) {
            put(buf, rect, x as i32, y as i32, " ", style);
        }
    }
}

fn draw_border(buf: &mut Buffer, rect: Rect, style: Style) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    let left = rect.x as i32;
    let right = left + rect.width as i32 - 1;
    let top = rect.y as i32;
    let bottom = top + rect.height as i32 - 1;
    put(buf, rect, left, top, "┌", style);
    put(buf, rect, right, top, "┐", style);
    put(buf, rect, left, bottom, "└", style);
    put(buf, rect, right, bottom, "┘", style);
    for col in (left + 1)..right {
        put(buf, rect, col, top, "─", style);
        put(buf, rect, col, bottom, "─", style);
    }
    for row in (top + 1)..bottom {
        put(buf, rect, left, row, "│", style);
        put(buf, rect, right, row, "│", style);
    }
}

/// Truncate to at most `width` characters, appending `…` when cut short.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn row_of(rect: Rect, offset: u16) -> Rect {
    Rect {
        x: rect.x + 1,
        y: rect.y + 1 + offset,
        width: rect.width.saturating_sub(2),
        height: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::AppId;
    use crate::config::Config;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(shell: &mut DeskShell) -> Buffer {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).expect("test terminal");
        terminal
            .draw(|frame| {
                shell.arrange(frame.area());
                render(frame, shell);
            })
            .expect("draw");
        terminal.backend().buffer().clone()
    }

    fn cell_symbol(buf: &Buffer, x: u16, y: u16) -> &str {
        buf.cell(Position::new(x, y)).map(|c| c.symbol()).unwrap_or("")
    }

    #[test]
    fn desktop_with_a_window_renders_its_title() {
        let mut shell = DeskShell::new(Config::default());
        shell.arrange(Rect::new(0, 0, 120, 40));
        shell.open_app(AppId::Notepad, crate::window::WindowData::None);
        let buf = draw(&mut shell);

        let rendered: String = (0..120)
            .flat_map(|x| (0..40).map(move |y| (x, y)))
            .map(|(x, y)| cell_symbol(&buf, x, y).to_string())
            .collect();
        assert!(rendered.contains('N'));
    }

    #[test]
    fn offscreen_window_portion_is_clipped() {
        use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

        let mut shell = DeskShell::new(Config::default());
        shell.arrange(Rect::new(0, 0, 120, 40));
        let id = shell.open_app(AppId::Terminal, crate::window::WindowData::None);
        shell.arrange(Rect::new(0, 0, 120, 40));

        // Drag the header hard left so most of the frame leaves the desktop.
        let frame = shell.registry().get(&id).expect("window").frame;
        let header = (frame.x as u16 + 2, frame.y as u16);
        let mouse = |kind, column, row| {
            Event::Mouse(MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            })
        };
        shell.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), header.0, header.1));
        shell.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 0, header.1));
        shell.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 0, header.1));

        assert!(shell.registry().get(&id).expect("window").frame.x < 0);
        // Rendering with a negative origin must clip, not panic.
        let _ = draw(&mut shell);
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 7), "hello …");
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn lock_screen_shows_masked_input() {
        let mut shell = DeskShell::new(Config::default());
        shell.arrange(Rect::new(0, 0, 120, 40));
        let t0 = Instant::now();
        shell.perform_system_action(SystemAction::Lock, t0);
        shell.tick(t0 + SystemAction::Lock.delay());
        let buf = draw(&mut shell);
        let row: String = (0..120).map(|x| cell_symbol(&buf, x, 20).to_string()).collect();
        assert!(row.contains("Password:"));
    }
}
