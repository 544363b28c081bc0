use crate::{
    assets::{icons::Icon, payload::ImagePayload},
    foundation::error::{QrcleError, QrcleResult},
    foundation::math::Fnv1a64,
    theme::registry::{self, ThemePalette},
};

/// Default [`Configuration::palette_index`].
pub const DEFAULT_PALETTE_INDEX: usize = 0;
/// Default [`Configuration::font_size_index`] (`lg`).
pub const DEFAULT_FONT_SIZE_INDEX: usize = 3;

/// Placement of the caption relative to the bitmap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextPosition {
    /// Caption lines stacked above the bitmap.
    #[default]
    Top,
    /// Caption lines stacked below the bitmap.
    Bottom,
    /// One character per row, left of the bitmap.
    Left,
    /// One character per row, right of the bitmap.
    Right,
}

impl TextPosition {
    /// Every position, in selector order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Literal URL tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Exact tag lookup.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    /// `true` for the one-character-per-row placements.
    pub fn is_vertical_caption(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Anchor of the icon badge over the bitmap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IconPosition {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
    Center,
}

impl IconPosition {
    /// Every position, in selector order.
    pub const ALL: [Self; 5] = [
        Self::BottomRight,
        Self::BottomLeft,
        Self::TopRight,
        Self::TopLeft,
        Self::Center,
    ];

    /// Literal URL tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
            Self::TopRight => "top-right",
            Self::TopLeft => "top-left",
            Self::Center => "center",
        }
    }

    /// Human label shown in selectors.
    pub fn label(self) -> &'static str {
        match self {
            Self::BottomRight => "Bottom Right",
            Self::BottomLeft => "Bottom Left",
            Self::TopRight => "Top Right",
            Self::TopLeft => "Top Left",
            Self::Center => "Center",
        }
    }

    /// Exact tag lookup.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

/// One step of the caption font scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontSizeTier {
    /// Short name (`xs` .. `2xl`).
    pub name: &'static str,
    /// Font size in display pixels.
    pub size_px: u32,
    /// Line height in display pixels for stacked caption lines.
    pub line_height_px: u32,
}

/// The fixed caption scale, smallest first.
pub const FONT_SIZE_TIERS: [FontSizeTier; 6] = [
    FontSizeTier {
        name: "xs",
        size_px: 12,
        line_height_px: 16,
    },
    FontSizeTier {
        name: "sm",
        size_px: 14,
        line_height_px: 20,
    },
    FontSizeTier {
        name: "base",
        size_px: 16,
        line_height_px: 24,
    },
    FontSizeTier {
        name: "lg",
        size_px: 18,
        line_height_px: 28,
    },
    FontSizeTier {
        name: "xl",
        size_px: 20,
        line_height_px: 28,
    },
    FontSizeTier {
        name: "2xl",
        size_px: 24,
        line_height_px: 32,
    },
];

/// Tier for `index`; out-of-range indices (stale URLs) fall back to the smallest tier.
pub fn font_size_tier(index: usize) -> &'static FontSizeTier {
    FONT_SIZE_TIERS.get(index).unwrap_or(&FONT_SIZE_TIERS[0])
}

/// Where the Export step finds its bitmap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BitmapRef {
    /// Bitmap carried inline in the URL.
    Inline(ImagePayload),
    /// Bitmap parked in the session store under a short token.
    Session(String),
}

/// Every user-chosen field describing one QR code, as threaded through the URL.
///
/// Required fields are `Option` so that an incomplete URL still decodes; use
/// [`Configuration::require_complete`] before composing or encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    /// Content encoded into the bitmap.
    pub location: Option<String>,
    /// Theme id (unknown ids resolve as the default theme).
    pub theme: Option<String>,
    /// Caption text.
    pub text: Option<String>,
    /// Palette index within the theme; clamped on every theme/index change.
    pub palette_index: usize,
    /// Index into [`FONT_SIZE_TIERS`].
    pub font_size_index: usize,
    pub text_position: TextPosition,
    pub icon: Icon,
    /// Ignored while `icon` is [`Icon::None`].
    pub icon_position: IconPosition,
    /// Present from the Customize → Export transition onward.
    pub qr_image: Option<BitmapRef>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            location: None,
            theme: None,
            text: None,
            palette_index: DEFAULT_PALETTE_INDEX,
            font_size_index: DEFAULT_FONT_SIZE_INDEX,
            text_position: TextPosition::default(),
            icon: Icon::None,
            icon_position: IconPosition::default(),
            qr_image: None,
        }
    }
}

impl Configuration {
    /// Query keys of required fields that are absent or empty, in canonical order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        fn blank(v: &Option<String>) -> bool {
            v.as_deref().is_none_or(str::is_empty)
        }

        let mut missing = Vec::new();
        if blank(&self.location) {
            missing.push(super::codec::KEY_LOCATION);
        }
        if blank(&self.theme) {
            missing.push(super::codec::KEY_THEME);
        }
        if blank(&self.text) {
            missing.push(super::codec::KEY_TEXT);
        }
        missing
    }

    /// Resolve into a complete configuration or fail with
    /// [`QrcleError::ConfigurationIncomplete`]. Required fields are never defaulted.
    pub fn require_complete(&self) -> QrcleResult<ResolvedConfiguration> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(QrcleError::incomplete(missing));
        }
        let (Some(location), Some(theme), Some(text)) = (&self.location, &self.theme, &self.text)
        else {
            return Err(QrcleError::incomplete(self.missing_required()));
        };

        Ok(ResolvedConfiguration {
            location: location.clone(),
            theme: theme.clone(),
            text: text.clone(),
            palette: registry::resolve_palette(theme, self.palette_index),
            font_size: font_size_tier(self.font_size_index),
            text_position: self.text_position,
            icon: self.icon,
            icon_position: self.icon_position,
        })
    }

    /// Re-clamp `palette_index` against the current theme.
    pub fn clamp_palette(&mut self) {
        let theme = self.theme.as_deref().unwrap_or(registry::DEFAULT_THEME);
        self.palette_index = registry::clamp_palette_index(theme, self.palette_index);
    }

    /// The palette this configuration currently resolves to.
    pub fn resolved_palette(&self) -> &'static ThemePalette {
        let theme = self.theme.as_deref().unwrap_or(registry::DEFAULT_THEME);
        registry::resolve_palette(theme, self.palette_index)
    }
}

/// A configuration whose required fields are present and whose palette and font tier are
/// resolved against the static catalogs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfiguration {
    pub location: String,
    pub theme: String,
    pub text: String,
    pub palette: &'static ThemePalette,
    pub font_size: &'static FontSizeTier,
    pub text_position: TextPosition,
    pub icon: Icon,
    pub icon_position: IconPosition,
}

impl ResolvedConfiguration {
    /// Identity of everything that influences the bitmap: content and palette colors.
    pub fn bitmap_fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u8(b'B');
        h.write_str(&self.location);
        h.write_str(&self.palette.dark.to_hex());
        h.write_str(&self.palette.light.to_hex());
        h.finish()
    }

    /// Identity of everything that influences the composed image.
    pub fn composition_fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u8(b'C');
        h.write_u64(self.bitmap_fingerprint());
        h.write_str(&self.text);
        h.write_str(self.font_size.name);
        h.write_str(self.text_position.as_str());
        h.write_str(self.icon.name());
        h.write_str(self.icon_position.as_str());
        h.finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
