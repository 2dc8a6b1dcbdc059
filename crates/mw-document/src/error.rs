/// Alias for `Result<T, DocumentError>`.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors from encoding or decoding a world document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The text is not a well-formed document.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
