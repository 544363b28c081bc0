use crate::{config::model::ResolvedConfiguration, theme::registry};

/// Caption characters shown before truncation.
pub const CAPTION_PREVIEW_CHARS: usize = 50;

/// "QR Code Information" panel content.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct InfoSummary {
    /// Label/value rows in display order.
    pub rows: Vec<(&'static str, String)>,
    pub caption: String,
}

impl InfoSummary {
    pub fn from_config(config: &ResolvedConfiguration) -> Self {
        let theme = registry::find_theme(&config.theme)
            .map_or_else(|| config.theme.clone(), |t| t.name.to_owned());

        let mut rows = vec![
            ("Location", config.location.clone()),
            ("Theme", theme),
            ("Palette", config.palette.name.to_owned()),
            ("Text Position", capitalize(config.text_position.as_str())),
            (
                "Font Size",
                format!("{} ({}px)", config.font_size.name, config.font_size.size_px),
            ),
            ("Icon", config.icon.name().to_owned()),
        ];
        if !config.icon.is_none() {
            rows.push(("Icon Position", config.icon_position.label().to_owned()));
        }

        Self {
            rows,
            caption: truncate_caption(&config.text),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }
}

impl std::fmt::Display for InfoSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (label, value) in &self.rows {
            writeln!(f, "{label:<width$}  {value}")?;
        }
        write!(f, "{:<width$}  {}", "Text", self.caption)
    }
}

/// First [`CAPTION_PREVIEW_CHARS`] characters, with `...` appended when cut.
pub fn truncate_caption(text: &str) -> String {
    match text.char_indices().nth(CAPTION_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/steps/info.rs"]
mod tests;
