use crate::display::ViewId;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Every failure a single protocol message can cause.
///
/// None of these end the session: the dispatcher logs them and drops the
/// offending message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    UnknownView(ViewId),
    DuplicateView(ViewId),
    Malformed { method: String, reason: String },
    Rendering(String),
}

impl CoreError {
    pub fn malformed(method: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::Malformed {
            method: method.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::UnknownView(_) => "unknown_view",
            CoreError::DuplicateView(_) => "duplicate_view",
            CoreError::Malformed { .. } => "malformed_message",
            CoreError::Rendering(_) => "rendering",
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::UnknownView(id) => write!(f, "unknown view: {}", id),
            CoreError::DuplicateView(id) => write!(f, "view already exists: {}", id),
            CoreError::Malformed { method, reason } => {
                write!(f, "malformed `{}` message: {}", method, reason)
            }
            CoreError::Rendering(msg) => write!(f, "rendering failed: {}", msg),
        }
    }
}

impl std::error::Error for CoreError {}
