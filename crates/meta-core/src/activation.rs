use serde_json::Value;

/// Cause carried by a `Failure` outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureCause {
    pub status: Option<u16>,
    pub message: String,
    /// The backend's own activation id, when the error body happened to
    /// carry one (a failed activation is still assigned an id backend-side).
    /// `ErrorTranslator` derives the response `code` from this when present.
    pub activation_id: Option<String>,
}

impl FailureCause {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), activation_id: None }
    }

    pub fn with_activation_id(mut self, activation_id: impl Into<String>) -> Self {
        self.activation_id = Some(activation_id.into());
        self
    }

    /// Identifier the response's numeric `code` is derived from: the
    /// backend's own activation id if known, else the failure message
    /// itself (still deterministic, just not tied to a backend-issued id).
    pub fn code_source(&self) -> &str {
        self.activation_id.as_deref().unwrap_or(&self.message)
    }
}

impl std::fmt::Display for FailureCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "backend returned status {status}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Result of a single blocking invocation against the action backend.
///
/// The backend returns HTTP 200 with a record for `Success`, HTTP 202 with
/// an id for `Pending`, anything else is `Failure`.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivationOutcome {
    Success(Value),
    Pending(String),
    Failure(FailureCause),
}

impl ActivationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ActivationOutcome::Success(_))
    }
}
