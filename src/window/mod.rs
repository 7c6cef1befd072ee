pub mod chrome;
mod registry;

use std::fmt;

use crate::apps::{AppComponent, AppId};
use crate::geometry::WinRect;

pub use registry::WindowRegistry;

/// Window identifier: `{app-slug}-{creation-millis}`.
///
/// Two windows of the same app opened within the same millisecond collide;
/// the registry tolerates this rather than guarding against it, matching the
/// timestamp-granularity scheme the shell has always used.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(app: AppId, creation_millis: u64) -> Self {
        Self(format!("{}-{}", app.slug(), creation_millis))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handoff payload from the opener to the hosted application.
///
/// The shell never interprets this beyond displaying it; it is a closed set
/// of the handoff shapes leaf applications actually use.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WindowData {
    #[default]
    None,
    File {
        path: String,
    },
    Url {
        url: String,
    },
    Text {
        body: String,
    },
}

/// A single open window. Passive record: every mutation goes through
/// [`WindowRegistry`], which keeps ids unique and z-indices monotone.
#[derive(Debug, Clone)]
pub struct Window {
    pub id: WindowId,
    /// Originating catalog entry; lookup-only back-reference.
    pub app: AppId,
    // Snapshots from the descriptor at open time. Descriptor edits after
    // creation do not propagate.
    pub title: String,
    pub icon: &'static str,
    pub component: AppComponent,
    /// Restored geometry; ignored for layout while `maximized` is set, but
    /// retained so un-maximizing puts the window back where it was.
    pub frame: WinRect,
    pub minimized: bool,
    pub maximized: bool,
    pub z_index: u64,
    pub data: WindowData,
}

impl Window {
    /// Whether the window participates in desktop layout this frame.
    /// A window may be minimized and maximized at once; minimized wins for
    /// rendering and the maximized flag survives until toggled off.
    pub fn visible(&self) -> bool {
        !self.minimized
    }
}
