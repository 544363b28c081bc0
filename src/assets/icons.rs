//! Fixed icon catalog.
//!
//! Glyphs are outline paths in a 24x24 box, drawn with a 2px round stroke.

/// Side length of the glyph coordinate box.
pub const GLYPH_BOX: f64 = 24.0;

macro_rules! icon_catalog {
    ($($variant:ident => $name:literal : [$($d:literal),* $(,)?]),+ $(,)?) => {
        /// Icon overlay choice. [`Icon::None`] disables the overlay.
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub enum Icon {
            /// No overlay.
            #[default]
            None,
            $(
                #[doc = concat!("`", $name, "` glyph.")]
                $variant,
            )+
        }

        impl Icon {
            /// Every icon in catalog order, starting with [`Icon::None`].
            pub const ALL: &'static [Icon] = &[Icon::None, $(Icon::$variant),+];

            /// Catalog name as it appears in URLs.
            pub fn name(self) -> &'static str {
                match self {
                    Icon::None => "None",
                    $(Icon::$variant => $name,)+
                }
            }

            /// Outline path data, `None` for [`Icon::None`].
            pub fn glyph(self) -> Option<&'static [&'static str]> {
                match self {
                    Icon::None => None,
                    $(Icon::$variant => Some(&[$($d),*]),)+
                }
            }
        }
    };
}

icon_catalog! {
    MapPin => "MapPin": [
        "M20 10c0 4.993-5.539 10.193-7.399 11.799a1 1 0 0 1-1.202 0C9.539 20.193 4 14.993 4 10a8 8 0 0 1 16 0",
        "M15 10a3 3 0 1 1-6 0a3 3 0 1 1 6 0",
    ],
    Link => "Link": [
        "M10 13a5 5 0 0 0 7.54.54l3-3a5 5 0 0 0-7.07-7.07l-1.72 1.71",
        "M14 11a5 5 0 0 0-7.54-.54l-3 3a5 5 0 0 0 7.07 7.07l1.71-1.71",
    ],
    QrCode => "QrCode": [
        "M3 3h5v5H3z",
        "M16 3h5v5h-5z",
        "M3 16h5v5H3z",
        "M21 16h-3a2 2 0 0 0-2 2v3",
        "M21 21v.01",
        "M12 7v3a2 2 0 0 1-2 2H7",
        "M3 12h.01",
        "M12 3h.01",
        "M12 16v.01",
        "M16 12h1",
        "M21 12v.01",
        "M12 21v-1",
    ],
    Globe => "Globe": [
        "M22 12a10 10 0 1 1-20 0a10 10 0 1 1 20 0",
        "M12 2a14.5 14.5 0 0 0 0 20a14.5 14.5 0 0 0 0-20",
        "M2 12h20",
    ],
    Info => "Info": [
        "M22 12a10 10 0 1 1-20 0a10 10 0 1 1 20 0",
        "M12 16v-4",
        "M12 8h.01",
    ],
    Coffee => "Coffee": [
        "M10 2v2",
        "M14 2v2",
        "M16 8a1 1 0 0 1 1 1v8a4 4 0 0 1-4 4H7a4 4 0 0 1-4-4V9a1 1 0 0 1 1-1h14a4 4 0 1 1 0 8h-1",
        "M6 2v2",
    ],
    Store => "Store": [
        "M2 7l4.41-4.41A2 2 0 0 1 7.83 2h8.34a2 2 0 0 1 1.42.59L22 7",
        "M4 12v8a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2v-8",
        "M15 22v-4a2 2 0 0 0-2-2h-2a2 2 0 0 0-2 2v4",
        "M2 7h20",
        "M22 7v3a2 2 0 0 1-2 2a2 2 0 0 1-2-2a2 2 0 0 1-4 0a2 2 0 0 1-4 0a2 2 0 0 1-4 0a2 2 0 0 1-2 2a2 2 0 0 1-2-2V7",
    ],
    Phone => "Phone": [
        "M22 16.92v3a2 2 0 0 1-2.18 2a19.79 19.79 0 0 1-8.63-3.07a19.5 19.5 0 0 1-6-6a19.79 19.79 0 0 1-3.07-8.67A2 2 0 0 1 4.11 2h3a2 2 0 0 1 2 1.72a12.84 12.84 0 0 0 .7 2.81a2 2 0 0 1-.45 2.11L8.09 9.91a16 16 0 0 0 6 6l1.27-1.27a2 2 0 0 1 2.11-.45a12.84 12.84 0 0 0 2.81.7A2 2 0 0 1 22 16.92z",
    ],
    Mail => "Mail": [
        "M4 4h16a2 2 0 0 1 2 2v12a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V6a2 2 0 0 1 2-2z",
        "M22 7l-8.97 5.7a1.94 1.94 0 0 1-2.06 0L2 7",
    ],
    Calendar => "Calendar": [
        "M8 2v4",
        "M16 2v4",
        "M5 4h14a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V6a2 2 0 0 1 2-2z",
        "M3 10h18",
    ],
    Heart => "Heart": [
        "M19 14c1.49-1.46 3-3.21 3-5.5A5.5 5.5 0 0 0 16.5 3c-1.76 0-3 .5-4.5 2c-1.5-1.5-2.74-2-4.5-2A5.5 5.5 0 0 0 2 8.5c0 2.3 1.5 4.05 3 5.5l7 7z",
    ],
    Gift => "Gift": [
        "M4 8h16a1 1 0 0 1 1 1v2a1 1 0 0 1-1 1H4a1 1 0 0 1-1-1V9a1 1 0 0 1 1-1z",
        "M12 8v13",
        "M19 12v7a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2v-7",
        "M7.5 8a2.5 2.5 0 0 1 0-5A4.8 8 0 0 1 12 8a4.8 8 0 0 1 4.5-5a2.5 2.5 0 0 1 0 5",
    ],
    Music => "Music": [
        "M9 18V5l12-2v13",
        "M9 18a3 3 0 1 1-6 0a3 3 0 1 1 6 0",
        "M21 16a3 3 0 1 1-6 0a3 3 0 1 1 6 0",
    ],
    Camera => "Camera": [
        "M14.5 4h-5L7 7H4a2 2 0 0 0-2 2v9a2 2 0 0 0 2 2h16a2 2 0 0 0 2-2V9a2 2 0 0 0-2-2h-3l-2.5-3z",
        "M15 13a3 3 0 1 1-6 0a3 3 0 1 1 6 0",
    ],
    Instagram => "Instagram": [
        "M7 2h10a5 5 0 0 1 5 5v10a5 5 0 0 1-5 5H7a5 5 0 0 1-5-5V7a5 5 0 0 1 5-5z",
        "M16 11.37A4 4 0 1 1 12.63 8A4 4 0 0 1 16 11.37z",
        "M17.5 6.5h.01",
    ],
    Twitter => "Twitter": [
        "M22 4s-.7 2.1-2 3.4c1.6 10-9.4 17.3-18 11.6c2.2.1 4.4-.6 6-2C3 15.5.5 9.6 3 5c2.2 2.6 5.6 4.1 9 4c-.9-4.2 4-6.6 7-3.8c1.1 0 3-1.2 3-1.2z",
    ],
    Facebook => "Facebook": [
        "M18 2h-3a5 5 0 0 0-5 5v3H7v4h3v8h4v-8h3l1-4h-4V7a1 1 0 0 1 1-1h3z",
    ],
    Youtube => "Youtube": [
        "M2.5 17a24.12 24.12 0 0 1 0-10a2 2 0 0 1 1.4-1.4a49.56 49.56 0 0 1 16.2 0A2 2 0 0 1 21.5 7a24.12 24.12 0 0 1 0 10a2 2 0 0 1-1.4 1.4a49.55 49.55 0 0 1-16.2 0A2 2 0 0 1 2.5 17",
        "M10 15l5-3l-5-3z",
    ],
    Linkedin => "Linkedin": [
        "M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-4 0v7h-4v-7a6 6 0 0 1 6-6z",
        "M2 9h4v12H2z",
        "M6 4a2 2 0 1 1-4 0a2 2 0 1 1 4 0",
    ],
    Github => "Github": [
        "M15 22v-4a4.8 4.8 0 0 0-1-3.5c3 0 6-2 6-5.5c.08-1.25-.27-2.48-1-3.5c.28-1.15.28-2.35 0-3.5c0 0-1 0-3 1.5c-2.64-.5-5.36-.5-8 0C6 2 5 2 5 2c-.3 1.15-.3 2.35 0 3.5A5.4 5.4 0 0 0 4 9c0 3.5 3 5.5 6 5.5c-.39.49-.68 1.05-.85 1.65c-.17.6-.22 1.23-.15 1.85v4",
        "M9 18c-4.51 2-5-2-7-2",
    ],
    Bookmark => "Bookmark": [
        "M19 21l-7-4l-7 4V5a2 2 0 0 1 2-2h10a2 2 0 0 1 2 2v16z",
    ],
    Share => "Share": [
        "M21 5a3 3 0 1 1-6 0a3 3 0 1 1 6 0",
        "M9 12a3 3 0 1 1-6 0a3 3 0 1 1 6 0",
        "M21 19a3 3 0 1 1-6 0a3 3 0 1 1 6 0",
        "M8.59 13.51l6.83 3.98",
        "M15.41 6.51l-6.82 3.98",
    ],
    Download => "Download": [
        "M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4",
        "M7 10l5 5l5-5",
        "M12 15V3",
    ],
}

impl Icon {
    /// Exact, case-sensitive catalog lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|icon| icon.name() == name)
    }

    /// Lookup that treats anything unrecognized as [`Icon::None`].
    pub fn parse_lenient(name: &str) -> Self {
        Self::from_name(name).unwrap_or(Self::None)
    }

    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/icons.rs"]
mod tests;
