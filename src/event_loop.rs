use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// The single message pump driving the shell.
///
/// All input polling happens here; the handler closure routes events into
/// the desktop shell. The handler is also invoked with `None` whenever the
/// poll interval elapses without input — that idle branch is what advances
/// the taskbar clock and the system-action timers, so the shell never needs
/// a background thread.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    /// Run until the handler returns [`ControlFlow::Quit`].
    ///
    /// When input arrives the queue is drained before the next render pass;
    /// processing one event per poll would let a mouse drag outrun the
    /// frame rate and feel laggy.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
