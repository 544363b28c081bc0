use crate::{
    config::{
        codec::{self, PRESENTATION_KEYS, QueryMap},
        url_state::{Step, StepUrl},
    },
    foundation::error::{QrcleError, QrcleResult},
    theme::registry::DEFAULT_THEME,
};

pub const MSG_MISSING_LOCATION: &str = "Please enter a location";
pub const MSG_MISSING_THEME: &str = "Please select a theme";
pub const MSG_MISSING_TEXT: &str = "Please enter some text content";

/// Validation failure for one form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// Query key of the field.
    pub field: &'static str,
    pub message: &'static str,
}

/// Content form: location, theme and caption.
#[derive(Clone, Debug)]
pub struct CollectStep {
    pub location: String,
    pub theme: String,
    pub text: String,
    /// Presentation params carried over from a previous run.
    carried: QueryMap,
    errors: Vec<FieldError>,
}

impl CollectStep {
    /// Mount from the Collect URL query. Content fields prefill when present.
    pub fn enter(query: &QueryMap) -> Self {
        let config = codec::decode(query);
        let carried = query
            .iter()
            .filter(|(k, _)| PRESENTATION_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            location: config.location.unwrap_or_default(),
            theme: config
                .theme
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_THEME.to_owned()),
            text: config.text.unwrap_or_default(),
            carried,
            errors: Vec::new(),
        }
    }

    pub fn carried(&self) -> &QueryMap {
        &self.carried
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Check every field; an empty result means the form can be submitted.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for (value, field, message) in [
            (&self.location, codec::KEY_LOCATION, MSG_MISSING_LOCATION),
            (&self.theme, codec::KEY_THEME, MSG_MISSING_THEME),
            (&self.text, codec::KEY_TEXT, MSG_MISSING_TEXT),
        ] {
            if value.is_empty() {
                errors.push(FieldError { field, message });
            }
        }
        errors
    }

    /// Customize URL for the current form, or a validation error listing each message.
    #[tracing::instrument(skip(self))]
    pub fn submit(&mut self) -> QrcleResult<StepUrl> {
        self.errors = self.validate();
        if !self.errors.is_empty() {
            let joined: Vec<&str> = self.errors.iter().map(|e| e.message).collect();
            return Err(QrcleError::validation(joined.join("; ")));
        }

        let mut query = self.carried.clone();
        query.insert(codec::KEY_LOCATION.to_owned(), self.location.clone());
        query.insert(codec::KEY_THEME.to_owned(), self.theme.clone());
        query.insert(codec::KEY_TEXT.to_owned(), self.text.clone());
        Ok(StepUrl::new(Step::Customize, query))
    }

    /// The URL reflecting this form (used for reloads).
    pub fn current_url(&self) -> StepUrl {
        StepUrl::new(Step::Collect, self.carried.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/steps/collect.rs"]
mod tests;
