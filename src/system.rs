//! Lock/shutdown/restart sequencing.
//!
//! Each action arms a single pending transition with an absolute deadline;
//! the event loop's idle branch drives [`SystemState::tick`]. Re-arming
//! replaces the pending transition wholesale, which is what makes the
//! previous timer impossible to fire: there is exactly one deadline slot
//! and `tick` only ever reads the current one.

use std::time::{Duration, Instant};

/// Presentation delays for the corresponding boot/shutdown animations.
pub const LOCK_DELAY: Duration = Duration::from_millis(800);
pub const SHUTDOWN_DELAY: Duration = Duration::from_millis(4500);
pub const RESTART_DELAY: Duration = Duration::from_millis(6000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemAction {
    Lock,
    Shutdown,
    Restart,
}

impl SystemAction {
    pub fn delay(self) -> Duration {
        match self {
            SystemAction::Lock => LOCK_DELAY,
            SystemAction::Shutdown => SHUTDOWN_DELAY,
            SystemAction::Restart => RESTART_DELAY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SystemAction::Lock => "Locking",
            SystemAction::Shutdown => "Shutting down",
            SystemAction::Restart => "Restarting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAction {
    pub action: SystemAction,
    pub deadline: Instant,
    armed_at: Instant,
}

#[derive(Debug, Default)]
pub struct SystemState {
    pending: Option<PendingAction>,
    locked: bool,
    shutdown_complete: bool,
}

impl SystemState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `action`. Any previously pending transition is discarded, so a
    /// superseded action's effect can never apply.
    pub fn perform(&mut self, action: SystemAction, now: Instant) {
        tracing::debug!(?action, "system action armed");
        self.pending = Some(PendingAction {
            action,
            deadline: now + action.delay(),
            armed_at: now,
        });
    }

    /// Advance the machine. Returns the action that completed this tick,
    /// if any, so the shell can apply its side effects (restart clears the
    /// window registry).
    pub fn tick(&mut self, now: Instant) -> Option<SystemAction> {
        let pending = self.pending?;
        if now < pending.deadline {
            return None;
        }
        self.pending = None;
        match pending.action {
            SystemAction::Lock => self.locked = true,
            SystemAction::Shutdown => self.shutdown_complete = true,
            // Restart lands back in the idle "booted" state.
            SystemAction::Restart => {
                self.locked = false;
                self.shutdown_complete = false;
            }
        }
        tracing::debug!(action = ?pending.action, "system action completed");
        Some(pending.action)
    }

    /// Clears the lock unconditionally; the credential gate lives in the
    /// lock-screen UI, not here.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Leave the powered-off terminal state.
    pub fn power_on(&mut self) {
        self.shutdown_complete = false;
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_shutdown_complete(&self) -> bool {
        self.shutdown_complete
    }

    /// Idle means the desktop is interactive: nothing pending, not locked,
    /// not powered off.
    pub fn is_idle(&self) -> bool {
        self.pending.is_none() && !self.locked && !self.shutdown_complete
    }

    /// Fraction of the pending delay already elapsed, for the progress UI.
    pub fn pending_progress(&self, now: Instant) -> Option<f64> {
        let pending = self.pending.as_ref()?;
        let total = pending.action.delay().as_millis() as f64;
        let elapsed = now
            .saturating_duration_since(pending.armed_at)
            .as_millis() as f64;
        Some((elapsed / total).clamp(0.0, 1.0))
    }
}
