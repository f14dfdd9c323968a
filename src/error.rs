//! Error types shared by the extractor, the classifier and the verdict pipeline.

/// Catastrophic failure while analyzing URL text.
///
/// Malformed URLs and failed TLD lookups are not errors; they degrade into
/// flagged signals instead.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("URL input is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),
    #[error("Failed to compile host pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Failure to load or run the classifier artifact.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Model shape mismatch: {0}")]
    Shape(String),
    #[error("Model produced unknown label {0}")]
    Label(i64),
}

/// Failure while turning signals into a verdict.
#[derive(Debug, thiserror::Error)]
pub enum VerdictError {
    #[error("Missing input: {0}")]
    MissingInput(&'static str),
    #[error("Invalid reputation signal: {0}")]
    InvalidReputation(String),
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),
}
