//! Static theme catalog.
//!
//! Every theme carries at least one palette, so index 0 is always a valid fallback. Lookups
//! never fail: unknown themes resolve to [`DEFAULT_THEME`] and out-of-range palette indices
//! resolve to the first palette of the resolved theme.

use crate::foundation::core::Color;

/// Theme used whenever a theme id is unknown.
pub const DEFAULT_THEME: &str = "modern";

/// A named dark/light color pair applied to the bitmap, caption and icon tint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ThemePalette {
    /// Display name.
    pub name: &'static str,
    /// Foreground: QR modules, caption text, icon glyph.
    pub dark: Color,
    /// Background: QR light modules.
    pub light: Color,
}

/// A theme and its ordered palettes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ThemeInfo {
    /// Stable identifier used in URLs.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Ordered, never empty.
    pub palettes: &'static [ThemePalette],
}

const fn palette(name: &'static str, dark: Color, light: Color) -> ThemePalette {
    ThemePalette { name, dark, light }
}

static THEMES: &[ThemeInfo] = &[
    ThemeInfo {
        id: "modern",
        name: "Modern",
        palettes: &[
            palette(
                "Classic",
                Color::rgb(0x00, 0x00, 0x00),
                Color::rgb(0xFF, 0xFF, 0xFF),
            ),
            palette(
                "Slate",
                Color::rgb(0x1E, 0x29, 0x3B),
                Color::rgb(0xF8, 0xFA, 0xFC),
            ),
            palette(
                "Midnight",
                Color::rgb(0x31, 0x2E, 0x81),
                Color::rgb(0xF1, 0xF5, 0xF9),
            ),
        ],
    },
    ThemeInfo {
        id: "pastel",
        name: "Pastel",
        palettes: &[
            palette(
                "Ocean",
                Color::rgb(0x5B, 0x8F, 0xB9),
                Color::rgb(0xFA, 0xF3, 0xF0),
            ),
            palette(
                "Lavender",
                Color::rgb(0x9C, 0x6A, 0xDE),
                Color::rgb(0xF9, 0xF5, 0xFF),
            ),
            palette(
                "Mint",
                Color::rgb(0x36, 0xB3, 0x7E),
                Color::rgb(0xE6, 0xFC, 0xEF),
            ),
        ],
    },
    ThemeInfo {
        id: "cartoony",
        name: "Cartoony",
        palettes: &[
            palette(
                "Playful",
                Color::rgb(0xFF, 0x6B, 0x6B),
                Color::rgb(0xFF, 0xF9, 0xC4),
            ),
            palette(
                "Vibrant",
                Color::rgb(0xFF, 0x54, 0x70),
                Color::rgb(0xFD, 0xFF, 0xB6),
            ),
            palette(
                "Bubbly",
                Color::rgb(0xFF, 0x9F, 0x1C),
                Color::rgb(0xCA, 0xFF, 0xBF),
            ),
        ],
    },
    ThemeInfo {
        id: "mono",
        name: "Mono",
        palettes: &[palette(
            "Ink",
            Color::rgb(0x11, 0x18, 0x27),
            Color::rgb(0xFF, 0xFF, 0xFF),
        )],
    },
];

/// All themes in catalog order.
pub fn themes() -> &'static [ThemeInfo] {
    THEMES
}

/// Theme identifiers in catalog order.
pub fn theme_ids() -> impl Iterator<Item = &'static str> {
    THEMES.iter().map(|t| t.id)
}

/// Exact lookup; `None` for unknown ids.
pub fn find_theme(theme_id: &str) -> Option<&'static ThemeInfo> {
    THEMES.iter().find(|t| t.id == theme_id)
}

/// Lookup with fallback to [`DEFAULT_THEME`].
pub fn theme_info(theme_id: &str) -> &'static ThemeInfo {
    find_theme(theme_id).unwrap_or_else(default_theme)
}

fn default_theme() -> &'static ThemeInfo {
    // The catalog is static and starts with the default theme.
    &THEMES[0]
}

/// Ordered palettes for `theme_id`; never empty.
pub fn list_palettes(theme_id: &str) -> &'static [ThemePalette] {
    theme_info(theme_id).palettes
}

/// `index` if it addresses a palette of the resolved theme, else 0.
pub fn clamp_palette_index(theme_id: &str, index: usize) -> usize {
    if index < list_palettes(theme_id).len() {
        index
    } else {
        0
    }
}

/// Resolve a palette. Unknown theme or out-of-range index degrade to a safe default.
pub fn resolve_palette(theme_id: &str, index: usize) -> &'static ThemePalette {
    let palettes = list_palettes(theme_id);
    &palettes[clamp_palette_index(theme_id, index)]
}

#[cfg(test)]
#[path = "../../tests/unit/theme/registry.rs"]
mod tests;
