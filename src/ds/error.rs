use std::error::Error;
use std::fmt;

/// Error taxonomy for resolution outcomes.
///
/// A resolver that does not recognize a base/property shape must decline
/// silently, never raise. Once it recognizes the shape it owns the outcome
/// and failures surface as one of these variants.
#[derive(Debug)]
pub enum ResolveError {
    /// Recognized pair, but the target property or variable does not exist.
    PropertyNotFound(String),
    /// Recognized pair, target exists, but it is immutable.
    PropertyNotWritable(String),
    /// Recognized invoke target, but no matching method or overload.
    MethodNotFound(String),
    /// A lower-level failure while performing a recognized resolution.
    Evaluation {
        message: String,
        cause: Option<Box<dyn Error>>,
    },
}

impl ResolveError {
    pub fn evaluation(message: impl Into<String>) -> Self {
        ResolveError::Evaluation {
            message: message.into(),
            cause: None,
        }
    }

    pub fn evaluation_caused_by(message: impl Into<String>, cause: Box<dyn Error>) -> Self {
        ResolveError::Evaluation {
            message: message.into(),
            cause: Some(cause),
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::PropertyNotFound(m) => write!(f, "Property not found: {}", m),
            ResolveError::PropertyNotWritable(m) => write!(f, "Property not writable: {}", m),
            ResolveError::MethodNotFound(m) => write!(f, "Method not found: {}", m),
            ResolveError::Evaluation { message, .. } => write!(f, "Evaluation error: {}", message),
        }
    }
}

impl Error for ResolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ResolveError::Evaluation {
                cause: Some(cause), ..
            } => Some(cause.as_ref()),
            _ => None,
        }
    }
}
