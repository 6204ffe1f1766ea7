use crate::env::Capability;

/// The webshim error type.
#[derive(Debug, thiserror::Error)]
pub enum ShimError {
    #[error("Internal error: [{0}]")]
    InternalError(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Worker has been terminated")]
    WorkerTerminated,

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("[{0}] is provided by the host")]
    ProvidedByHost(Capability),

    #[error("Host op error: {0}")]
    HostError(#[from] anyhow::Error),

    #[error("I/O error")]
    IOError(#[from] std::io::Error),

    #[error("UTF-8 error")]
    UTF8Error(#[from] std::str::Utf8Error),

    #[error("Invalid argument")]
    InvalidArgument,

    #[error("Usage error: {0}")]
    UsageError(&'static str),
}
