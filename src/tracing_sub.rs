use std::fs::OpenOptions;
use std::path::Path;

use tracing::Level;

/// Initialize the tracing subscriber writing to `log_file`.
///
/// The shell owns the alternate screen, so log output must never reach
/// stdout/stderr while it is running; everything goes to a file. Safe to
/// call multiple times; subsequent calls are no-ops for the global
/// subscriber.
pub fn init_to_file(log_file: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(file)
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
    Ok(())
}
