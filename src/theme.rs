//! Light/dark theme with a persisted preference.
//!
//! The initial theme is, in order: the saved preference, the terminal's
//! reported background (`COLORFGBG`), then light.  Toggling saves the new
//! choice so it survives restarts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// Colours the UI draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub error: Color,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label for the toggle hint: names the theme a toggle switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Dark Mode",
            Theme::Dark => "Light Mode",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                fg: Color::Black,
                bg: Color::White,
                muted: Color::Gray,
                accent: Color::Blue,
                highlight: Color::LightBlue,
                error: Color::Red,
            },
            Theme::Dark => Palette {
                fg: Color::White,
                bg: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                highlight: Color::DarkGray,
                error: Color::LightRed,
            },
        }
    }

    /// Theme implied by a `COLORFGBG` value such as `15;0`.
    ///
    /// The last field is the background colour index; the dark half of the
    /// 16-colour palette means a dark terminal.
    pub fn from_colorfgbg(value: &str) -> Option<Self> {
        let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        match bg {
            0..=6 | 8 => Some(Theme::Dark),
            7 | 9..=15 => Some(Theme::Light),
            _ => None,
        }
    }
}

/// Tracks the active theme and where the preference is stored.
#[derive(Debug)]
pub struct ThemeManager {
    path: PathBuf,
    current: Theme,
}

impl ThemeManager {
    /// Resolve the initial theme.  `system` is the terminal's hint, if any.
    pub fn load(path: impl Into<PathBuf>, system: Option<Theme>) -> Self {
        let path = path.into();
        let current = Self::saved(&path).or(system).unwrap_or(Theme::Light);
        tracing::debug!(theme = current.as_str(), path = %path.display(), "theme resolved");
        Self { path, current }
    }

    /// Read the system hint from the environment.
    pub fn system_theme() -> Option<Theme> {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|v| Theme::from_colorfgbg(&v))
    }

    fn saved(path: &Path) -> Option<Theme> {
        fs::read_to_string(path)
            .ok()
            .and_then(|s| Theme::parse(&s))
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Switch theme and persist the choice.
    pub fn toggle(&mut self) -> io::Result<Theme> {
        self.apply(self.current.toggled())
    }

    pub fn apply(&mut self, theme: Theme) -> io::Result<Theme> {
        self.current = theme;
        fs::write(&self.path, theme.as_str())?;
        tracing::info!(theme = theme.as_str(), "theme changed");
        Ok(theme)
    }
}
