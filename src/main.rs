use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{DisableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use deskshell::config::Config;
use deskshell::drivers::InputDriver;
use deskshell::drivers::console::ConsoleDriver;
use deskshell::event_loop::{ControlFlow, EventLoop};
use deskshell::shell::DeskShell;
use deskshell::{tracing_sub, ui};

/// A desktop OS simulation for the terminal.
#[derive(Debug, Parser)]
#[command(name = "deskshell", version, about)]
struct Cli {
    /// Path to a config file (default: ~/.config/deskshell/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Event-loop poll interval in milliseconds; overrides the config.
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Disable mouse capture (keyboard-only session).
    #[arg(long)]
    no_mouse: bool,

    /// Append debug logs to this file. Without it, nothing is logged: the
    /// alternate screen owns the terminal.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(log_file) = &cli.log_file {
        tracing_sub::init_to_file(log_file)?;
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .unwrap_or_else(|error| {
        eprintln!("deskshell: {error}; falling back to defaults");
        Config::default()
    });
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_ms = tick_ms;
    }
    if cli.no_mouse {
        config.mouse = false;
    }

    let mouse = config.mouse;
    let poll_interval = Duration::from_millis(config.tick_ms.max(1));
    let mut shell = DeskShell::new(config);

    enable_raw_mode()?;
    crossterm::execute!(io::stdout(), EnterAlternateScreen)?;
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal(mouse);
        default_hook(info);
    }));

    let mut driver = ConsoleDriver::new();
    if mouse {
        driver.set_mouse_capture(true)?;
    }

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = EventLoop::new(driver, poll_interval).run(|_, event| {
        match event {
            Some(Event::Key(key))
                if key.kind == KeyEventKind::Press
                    && key.code == KeyCode::Char('q')
                    && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                return Ok(ControlFlow::Quit);
            }
            Some(Event::Resize(..)) => {
                terminal.clear()?;
            }
            Some(event) => {
                shell.handle_event(&event);
            }
            None => shell.tick(Instant::now()),
        }

        if shell.take_hard_redraw() {
            terminal.clear()?;
        }
        terminal.draw(|frame| {
            shell.arrange(frame.area());
            ui::render(frame, &shell);
        })?;
        Ok(ControlFlow::Continue)
    });

    restore_terminal(mouse);
    result
}

fn restore_terminal(mouse: bool) {
    if mouse {
        let _ = crossterm::execute!(io::stdout(), DisableMouseCapture);
    }
    let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}
