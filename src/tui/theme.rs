//! Theme support for the TUI.
//!
//! Built-in color themes selected by name from the `[ui]` config section.

use ratatui::style::Color;

/// A complete color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Theme name for display and configuration
    pub name: String,
    /// Headers, titles and the selected menu entry
    pub primary: Color,
    /// Section headings
    pub secondary: Color,
    /// Key hints and highlights
    pub accent: Color,
    /// Main text color
    pub text: Color,
    /// Dimmed text color (descriptions, secondary info)
    pub text_dim: Color,
    /// Muted text color (hints, footers)
    pub text_muted: Color,
    /// Background color (Reset uses terminal default)
    pub background: Color,
    /// Selected item background
    pub selected_bg: Color,
    /// Border color
    pub border: Color,
    /// Contraction phases (hold, pulse squeeze)
    pub squeeze: Color,
    /// Relaxation phases
    pub rest: Color,
    /// Chart bars
    pub chart: Color,
    /// Success indicator color
    pub success: Color,
    /// Warning indicator color (paused, confirmations)
    pub warning: Color,
    /// Error indicator color
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    /// Default theme - works well on both light and dark terminals.
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            primary: Color::Rgb(56, 189, 248),      // Sky
            secondary: Color::Rgb(99, 102, 241),    // Indigo
            accent: Color::Rgb(250, 204, 21),       // Yellow
            text: Color::White,
            text_dim: Color::Rgb(156, 163, 175),    // Gray-400
            text_muted: Color::Rgb(107, 114, 128),  // Gray-500
            background: Color::Reset,
            selected_bg: Color::Rgb(55, 65, 81),    // Gray-700
            border: Color::Rgb(75, 85, 99),         // Gray-600
            squeeze: Color::Rgb(239, 68, 68),       // Red
            rest: Color::Rgb(34, 197, 94),          // Green
            chart: Color::Rgb(16, 185, 129),        // Emerald
            success: Color::Rgb(34, 197, 94),
            warning: Color::Rgb(234, 179, 8),
            error: Color::Rgb(239, 68, 68),
        }
    }

    /// Nord theme - arctic, bluish colors.
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            primary: Color::Rgb(136, 192, 208),     // Nord8
            secondary: Color::Rgb(129, 161, 193),   // Nord9
            accent: Color::Rgb(235, 203, 139),      // Nord13
            text: Color::Rgb(236, 239, 244),        // Nord6
            text_dim: Color::Rgb(216, 222, 233),    // Nord5
            text_muted: Color::Rgb(76, 86, 106),    // Nord3
            background: Color::Rgb(46, 52, 64),     // Nord0
            selected_bg: Color::Rgb(59, 66, 82),    // Nord1
            border: Color::Rgb(67, 76, 94),         // Nord2
            squeeze: Color::Rgb(191, 97, 106),      // Nord11
            rest: Color::Rgb(163, 190, 140),        // Nord14
            chart: Color::Rgb(143, 188, 187),       // Nord7
            success: Color::Rgb(163, 190, 140),
            warning: Color::Rgb(208, 135, 112),     // Nord12
            error: Color::Rgb(191, 97, 106),
        }
    }

    /// Dracula theme - dark purple and pink.
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            primary: Color::Rgb(189, 147, 249),     // Purple
            secondary: Color::Rgb(139, 233, 253),   // Cyan
            accent: Color::Rgb(241, 250, 140),      // Yellow
            text: Color::Rgb(248, 248, 242),        // Foreground
            text_dim: Color::Rgb(189, 147, 249),
            text_muted: Color::Rgb(98, 114, 164),   // Comment
            background: Color::Rgb(40, 42, 54),
            selected_bg: Color::Rgb(68, 71, 90),    // Current Line
            border: Color::Rgb(68, 71, 90),
            squeeze: Color::Rgb(255, 121, 198),     // Pink
            rest: Color::Rgb(80, 250, 123),         // Green
            chart: Color::Rgb(80, 250, 123),
            success: Color::Rgb(80, 250, 123),
            warning: Color::Rgb(255, 184, 108),     // Orange
            error: Color::Rgb(255, 85, 85),         // Red
        }
    }

    /// Monochrome theme for terminals without color support.
    pub fn mono() -> Self {
        Self {
            name: "mono".to_string(),
            primary: Color::White,
            secondary: Color::White,
            accent: Color::White,
            text: Color::White,
            text_dim: Color::Gray,
            text_muted: Color::DarkGray,
            background: Color::Reset,
            selected_bg: Color::DarkGray,
            border: Color::Gray,
            squeeze: Color::White,
            rest: Color::Gray,
            chart: Color::White,
            success: Color::White,
            warning: Color::White,
            error: Color::White,
        }
    }

    /// Get a theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_theme()),
            "nord" => Some(Self::nord()),
            "dracula" => Some(Self::dracula()),
            "mono" | "monochrome" => Some(Self::mono()),
            _ => None,
        }
    }

    /// List all available built-in theme names.
    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "nord", "dracula", "mono"]
    }

    /// Color for a session phase label.
    pub fn phase_color(&self, squeeze: bool) -> Color {
        if squeeze {
            self.squeeze
        } else {
            self.rest
        }
    }
}
