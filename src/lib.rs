//! deskshell: a desktop OS simulation for the terminal.
//!
//! The crate is organized around one coordinator, [`shell::DeskShell`],
//! which owns the window registry, the system-action machine, and the
//! overlay state; `main` wires it to a crossterm-backed event loop and the
//! ratatui renderer.

pub mod apps;
pub mod config;
pub mod drivers;
pub mod event_loop;
pub mod geometry;
pub mod overlay;
pub mod shell;
pub mod system;
pub mod taskbar;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
