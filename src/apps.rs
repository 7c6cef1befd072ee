//! The installed-application catalog.
//!
//! Applications are identified by a closed enum rather than free-form string
//! keys: the shell can only open things it actually knows how to host, and
//! icon/component resolution is a total match instead of a runtime namespace
//! lookup. Descriptors are static; a `Window` snapshots the fields it needs
//! at open time and never reads the catalog again.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AppId {
    FileManager,
    TextEditor,
    CodeEditor,
    Terminal,
    Calculator,
    Paint,
    Snake,
    Minesweeper,
    Chess,
    MusicPlayer,
    PhotoGallery,
    Calendar,
    Weather,
    Maps,
    Clock,
    TaskManager,
    Notepad,
    Camera,
    Browser,
    Settings,
    Email,
    VideoPlayer,
}

/// Which hosted component renders inside a window of this app.
///
/// Mirrors the catalog one-to-one today, but is snapshotted separately onto
/// each window so a descriptor change cannot retarget an open window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppComponent {
    FileManager,
    TextEditor,
    CodeEditor,
    Terminal,
    Calculator,
    Paint,
    Snake,
    Minesweeper,
    Chess,
    MusicPlayer,
    PhotoGallery,
    Calendar,
    Weather,
    Maps,
    Clock,
    TaskManager,
    Notepad,
    Camera,
    Browser,
    Settings,
    Email,
    VideoPlayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppDescriptor {
    pub id: AppId,
    pub name: &'static str,
    pub icon: &'static str,
    pub component: AppComponent,
    pub default_width: u16,
    pub default_height: u16,
}

macro_rules! descriptor {
    ($id:ident, $name:literal, $icon:literal, $w:literal x $h:literal) => {
        AppDescriptor {
            id: AppId::$id,
            name: $name,
            icon: $icon,
            component: AppComponent::$id,
            default_width: $w,
            default_height: $h,
        }
    };
}

static CATALOG: &[AppDescriptor] = &[
    descriptor!(FileManager, "File Manager", "🗀", 70 x 20),
    descriptor!(TextEditor, "Text Editor", "🖹", 64 x 18),
    descriptor!(CodeEditor, "Code Editor", "❮❯", 72 x 22),
    descriptor!(Terminal, "Terminal", "▚", 64 x 18),
    descriptor!(Calculator, "Calculator", "🖩", 28 x 16),
    descriptor!(Paint, "Paint", "🖌", 66 x 20),
    descriptor!(Snake, "Snake", "⌁", 40 x 18),
    descriptor!(Minesweeper, "Minesweeper", "☀", 36 x 16),
    descriptor!(Chess, "Chess", "♞", 44 x 20),
    descriptor!(MusicPlayer, "Music Player", "♫", 50 x 14),
    descriptor!(PhotoGallery, "Photo Gallery", "🖻", 66 x 20),
    descriptor!(Calendar, "Calendar", "🗓", 58 x 20),
    descriptor!(Weather, "Weather", "☂", 46 x 16),
    descriptor!(Maps, "Maps", "🗺", 70 x 22),
    descriptor!(Clock, "Clock", "◷", 40 x 14),
    descriptor!(TaskManager, "Task Manager", "☰", 56 x 18),
    descriptor!(Notepad, "Notepad", "🗈", 48 x 16),
    descriptor!(Camera, "Camera", "📷", 56 x 18),
    descriptor!(Browser, "Browser", "🌐", 76 x 24),
    descriptor!(Settings, "Settings", "⚙", 60 x 20),
    descriptor!(Email, "Email", "✉", 68 x 20),
    descriptor!(VideoPlayer, "Video Player", "▶", 64 x 20),
];

/// The static, ordered application catalog (start-menu order).
pub fn catalog() -> &'static [AppDescriptor] {
    CATALOG
}

impl AppId {
    pub fn descriptor(self) -> &'static AppDescriptor {
        // The catalog is total over AppId; a miss would be a construction bug.
        CATALOG
            .iter()
            .find(|descriptor| descriptor.id == self)
            .unwrap_or(&CATALOG[0])
    }

    /// Stable slug used in window ids.
    pub fn slug(self) -> &'static str {
        match self {
            AppId::FileManager => "files",
            AppId::TextEditor => "textedit",
            AppId::CodeEditor => "code",
            AppId::Terminal => "terminal",
            AppId::Calculator => "calc",
            AppId::Paint => "paint",
            AppId::Snake => "snake",
            AppId::Minesweeper => "mines",
            AppId::Chess => "chess",
            AppId::MusicPlayer => "music",
            AppId::PhotoGallery => "photos",
            AppId::Calendar => "calendar",
            AppId::Weather => "weather",
            AppId::Maps => "maps",
            AppId::Clock => "clock",
            AppId::TaskManager => "tasks",
            AppId::Notepad => "notepad",
            AppId::Camera => "camera",
            AppId::Browser => "browser",
            AppId::Settings => "settings",
            AppId::Email => "email",
            AppId::VideoPlayer => "video",
        }
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

/// Case-insensitive name filter for the start-menu search box.
pub fn search(query: &str) -> Vec<&'static AppDescriptor> {
    let needle = query.to_lowercase();
    CATALOG
        .iter()
        .filter(|descriptor| descriptor.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_total_and_distinct() {
        for descriptor in catalog() {
            assert_eq!(descriptor.id.descriptor().id, descriptor.id);
            assert!(descriptor.default_width > 0 && descriptor.default_height > 0);
        }
        let mut slugs: Vec<_> = catalog().iter().map(|d| d.id.slug()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), catalog().len());
    }

    #[test]
    fn search_filters_by_substring() {
        let hits = search("edit");
        let names: Vec<_> = hits.iter().map(|d| d.name).collect();
        assert!(names.contains(&"Text Editor"));
        assert!(names.contains(&"Code Editor"));
        assert!(!names.contains(&"Snake"));
    }

    #[test]
    fn empty_search_returns_everything() {
        assert_eq!(search("").len(), catalog().len());
    }
}
