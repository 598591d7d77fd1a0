/// Errors from BMP decoding, encoding, and filter application.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("not a recognized bitmap")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BmpError {
    pub(crate) fn invalid_arg(msg: impl Into<String>) -> Self {
        BmpError::InvalidArgument(msg.into())
    }
}
