//! Error types for rich-text operations

/// Errors surfaced to callers of the rich-text pipeline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RichTextError {
    /// Input could not be turned into a fragment at all
    #[error("Parse error: {0}")]
    Parse(String),
    /// A legacy wrapper carried JSON that is not a valid object
    #[error("Malformed legacy payload in '{attribute}': {message}")]
    MalformedLegacyPayload { attribute: String, message: String },
    /// Neither the attachment nor its attachable supports the operation
    #[error("Attachable '{attachable}' does not support '{capability}'")]
    NoSuchCapability {
        capability: String,
        attachable: String,
    },
    /// Error while writing a fragment back to HTML
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Selector pattern is not understood
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// Why a signed identifier did not yield a record.
///
/// Returned by [`crate::attachables::RecordResolver`] implementations only; the
/// resolver pipeline always turns it into a missing attachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionFailure {
    #[error("signed id is malformed")]
    Malformed,
    #[error("signed id has expired")]
    Expired,
    #[error("record not found")]
    NotFound,
}
