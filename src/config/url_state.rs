use url::{Url, form_urlencoded};

use crate::{
    config::codec::{CANONICAL_KEYS, QueryMap},
    foundation::error::{QrcleError, QrcleResult},
};

/// Base used to resolve relative step URLs.
const BASE_URL: &str = "http://localhost/";

/// Wizard step, addressed by route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    Collect,
    Customize,
    Export,
}

impl Step {
    pub fn route(self) -> &'static str {
        match self {
            Self::Collect => "/",
            Self::Customize => "/preview",
            Self::Export => "/share",
        }
    }

    pub fn from_route(path: &str) -> Option<Self> {
        match path {
            "" | "/" => Some(Self::Collect),
            "/preview" | "/preview/" => Some(Self::Customize),
            "/share" | "/share/" => Some(Self::Export),
            _ => None,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Collect => "collect",
            Self::Customize => "customize",
            Self::Export => "export",
        })
    }
}

/// A step plus its query state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepUrl {
    pub step: Step,
    pub query: QueryMap,
}

impl StepUrl {
    pub fn new(step: Step, query: QueryMap) -> Self {
        Self { step, query }
    }

    /// Relative URL (`/preview?location=...`). Canonical keys come first in fixed order,
    /// then any unknown keys alphabetically.
    pub fn format(&self) -> String {
        if self.query.is_empty() {
            return self.step.route().to_owned();
        }

        let mut ser = form_urlencoded::Serializer::new(String::new());
        for key in CANONICAL_KEYS {
            if let Some(v) = self.query.get(key) {
                ser.append_pair(key, v);
            }
        }
        for (k, v) in &self.query {
            if !CANONICAL_KEYS.contains(&k.as_str()) {
                ser.append_pair(k, v);
            }
        }
        format!("{}?{}", self.step.route(), ser.finish())
    }

    /// Parse an absolute or root-relative step URL. Repeated keys keep their first value.
    pub fn parse(input: &str) -> QrcleResult<Self> {
        let base = Url::parse(BASE_URL)
            .map_err(|e| QrcleError::validation(format!("invalid base url: {e}")))?;
        let url = base
            .join(input.trim())
            .map_err(|e| QrcleError::validation(format!("invalid url \"{input}\": {e}")))?;

        let step = Step::from_route(url.path())
            .ok_or_else(|| QrcleError::validation(format!("unknown route \"{}\"", url.path())))?;

        let mut query = QueryMap::new();
        for (k, v) in url.query_pairs() {
            query.entry(k.into_owned()).or_insert_with(|| v.into_owned());
        }
        Ok(Self { step, query })
    }
}

impl std::fmt::Display for StepUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/url_state.rs"]
mod tests;
