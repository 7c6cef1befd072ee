use ratatui::style::Color;
use serde::{Deserialize, Serialize};

// Centralized theme palette. Terminal cells cannot blend a real gradient,
// so each wallpaper maps to the dominant color of the original gradient
// pair.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Wallpaper {
    #[default]
    Indigo,
    Rose,
    Sky,
    Mint,
    Sunset,
}

impl Wallpaper {
    pub fn color(self) -> Color {
        match self {
            Wallpaper::Indigo => Color::Rgb(102, 126, 234),
            Wallpaper::Rose => Color::Rgb(240, 147, 251),
            Wallpaper::Sky => Color::Rgb(79, 172, 254),
            Wallpaper::Mint => Color::Rgb(67, 233, 123),
            Wallpaper::Sunset => Color::Rgb(250, 112, 154),
        }
    }

    pub fn all() -> [Wallpaper; 5] {
        [
            Wallpaper::Indigo,
            Wallpaper::Rose,
            Wallpaper::Sky,
            Wallpaper::Mint,
            Wallpaper::Sunset,
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Theme {
    pub mode: ThemeMode,
    pub wallpaper: Wallpaper,
}

impl Theme {
    fn dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    pub fn desktop_bg(&self) -> Color {
        self.wallpaper.color()
    }

    pub fn window_bg(&self) -> Color {
        if self.dark() { Color::Black } else { Color::White }
    }

    pub fn window_fg(&self) -> Color {
        if self.dark() { Color::White } else { Color::Black }
    }

    pub fn header_active_bg(&self) -> Color {
        Color::Blue
    }

    pub fn header_active_fg(&self) -> Color {
        Color::White
    }

    pub fn header_inactive_bg(&self) -> Color {
        Color::DarkGray
    }

    pub fn header_inactive_fg(&self) -> Color {
        Color::Gray
    }

    pub fn border(&self) -> Color {
        Color::DarkGray
    }

    pub fn taskbar_bg(&self) -> Color {
        if self.dark() { Color::Black } else { Color::Gray }
    }

    pub fn taskbar_fg(&self) -> Color {
        if self.dark() { Color::White } else { Color::Black }
    }

    pub fn taskbar_active_bg(&self) -> Color {
        Color::Blue
    }

    pub fn taskbar_minimized_fg(&self) -> Color {
        Color::DarkGray
    }

    pub fn menu_bg(&self) -> Color {
        if self.dark() { Color::Black } else { Color::White }
    }

    pub fn menu_fg(&self) -> Color {
        if self.dark() { Color::White } else { Color::Black }
    }

    pub fn menu_selected_bg(&self) -> Color {
        Color::Blue
    }

    pub fn menu_selected_fg(&self) -> Color {
        Color::White
    }

    pub fn dialog_bg(&self) -> Color {
        if self.dark() { Color::Black } else { Color::White }
    }

    pub fn dialog_fg(&self) -> Color {
        if self.dark() { Color::White } else { Color::Black }
    }

    pub fn accent(&self) -> Color {
        Color::Cyan
    }

    pub fn danger(&self) -> Color {
        Color::Red
    }

    pub fn screen_bg(&self) -> Color {
        // Lock/boot/shutdown surfaces are always dark, matching the
        // original full-screen gradients.
        Color::Rgb(24, 18, 43)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_toggle_round_trips() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }

    #[test]
    fn wallpapers_have_distinct_colors() {
        let mut colors: Vec<_> = Wallpaper::all()
            .iter()
            .map(|w| format!("{:?}", w.color()))
            .collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 5);
    }
}
