use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

/// A fatal scan failure. There is no recovery: the first error aborts the
/// whole unit and no partial scope is returned.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("unexpected token `{text}` at byte offset {offset}")]
    UnexpectedToken { text: String, offset: usize },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("unsupported expression `{text}` in attribute argument at byte offset {offset}")]
    UnsupportedAttributeExpression { text: String, offset: usize },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
