use crate::{
    assets::payload::ImagePayload,
    encode::qr::QrOptions,
    foundation::error::{QrcleError, QrcleResult},
    layout::model::Composition,
};

/// What the user can do about a step error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Remedy {
    /// Return to the previous step (missing input).
    GoBack,
    /// Repeat the failed operation.
    TryAgain,
}

/// Full-panel error shown in place of the step content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepError {
    pub message: String,
    /// Query keys reported missing, empty for collaborator failures.
    pub missing: Vec<&'static str>,
    pub remedy: Remedy,
}

impl StepError {
    pub fn from_error(err: &QrcleError) -> Self {
        match err {
            QrcleError::ConfigurationIncomplete { missing } => Self {
                message: err.to_string(),
                missing: missing.clone(),
                remedy: Remedy::GoBack,
            },
            other => Self {
                message: other.to_string(),
                missing: Vec::new(),
                remedy: Remedy::TryAgain,
            },
        }
    }

    pub fn is_incomplete(&self) -> bool {
        self.remedy == Remedy::GoBack
    }
}

/// Lifecycle of a step's main content.
#[derive(Clone, Debug, PartialEq)]
pub enum StepState<T> {
    Loading,
    Ready(T),
    Error(StepError),
}

impl<T> StepState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&StepError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Identity of one suspending request: the mounted step instance plus its generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub session: u64,
    pub generation: u64,
}

/// Issues tickets for one mounted step; only the newest ticket is accepted, and nothing is
/// accepted after unmount.
#[derive(Clone, Copy, Debug)]
pub struct RequestTracker {
    session: u64,
    generation: u64,
    mounted: bool,
}

impl RequestTracker {
    pub fn new(session: u64) -> Self {
        Self {
            session,
            generation: 0,
            mounted: true,
        }
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Start a new request, superseding every earlier one.
    pub fn issue(&mut self) -> Ticket {
        self.generation += 1;
        Ticket {
            session: self.session,
            generation: self.generation,
        }
    }

    pub fn accepts(&self, ticket: Ticket) -> bool {
        self.mounted && ticket.session == self.session && ticket.generation == self.generation
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }
}

/// Work a step wants done by a collaborator.
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    Encode {
        ticket: Ticket,
        content: String,
        options: QrOptions,
    },
    Rasterize {
        ticket: Ticket,
        composition: Composition,
        bitmap: ImagePayload,
    },
}

impl Request {
    pub fn ticket(&self) -> Ticket {
        match self {
            Self::Encode { ticket, .. } | Self::Rasterize { ticket, .. } => *ticket,
        }
    }
}

/// Result of a [`Request`], routed back to the step that issued it.
#[derive(Debug)]
pub enum Completion {
    Encoded {
        ticket: Ticket,
        result: QrcleResult<ImagePayload>,
    },
    Rasterized {
        ticket: Ticket,
        result: QrcleResult<ImagePayload>,
    },
}

impl Completion {
    pub fn ticket(&self) -> Ticket {
        match self {
            Self::Encoded { ticket, .. } | Self::Rasterized { ticket, .. } => *ticket,
        }
    }
}

/// Whether a completion changed step state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    Applied,
    Discarded,
}

#[cfg(test)]
#[path = "../../tests/unit/steps/state.rs"]
mod tests;
