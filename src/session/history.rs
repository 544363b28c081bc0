use crate::config::url_state::StepUrl;

/// Browser-style history stack of step URLs.
#[derive(Clone, Debug)]
pub struct History {
    entries: Vec<StepUrl>,
    index: usize,
}

impl History {
    pub fn new(initial: StepUrl) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &StepUrl {
        &self.entries[self.index]
    }

    /// New entry after the current one; forward entries are dropped.
    pub fn push(&mut self, url: StepUrl) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url);
        self.index = self.entries.len() - 1;
    }

    /// Overwrite the current entry in place.
    pub fn replace(&mut self, url: StepUrl) {
        self.entries[self.index] = url;
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Returns `false` at the oldest entry.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Returns `false` at the newest entry.
    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/history.rs"]
mod tests;
