//! Error types for ownercheck-core

use crate::comment_args::DecodeError;
use std::fmt;

/// Result type alias for ownercheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ownercheck operations
#[derive(Debug)]
pub enum Error {
    /// Missing or invalid configuration (environment, flags, token)
    Config(String),

    /// `COMMENT_ARGS` could not be decoded
    Decode(DecodeError),

    /// HTTP/API error
    Http(String),

    /// API rate limit exceeded
    RateLimitExceeded(String),

    /// Runtime error (Tokio, threading, etc.)
    Runtime(String),

    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Decode(err) => write!(f, "Configuration error: {}", err),
            Error::Http(msg) => write!(f, "HTTP error: {}", msg),
            Error::RateLimitExceeded(msg) => write!(f, "Rate limit exceeded: {}", msg),
            Error::Runtime(msg) => write!(f, "Runtime error: {}", msg),
            Error::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Decode(err) => Some(err),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Error::Decode(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // reqwest only echoes the URL, never request headers
        Error::Http(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Http(format!("JSON error: {}", err))
    }
}

/// Fieldless error category for zero-cost pattern matching.
///
/// Single byte representation (`#[repr(u8)]`), `Copy`, no allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Configuration error
    Config,
    /// Comment argument decoding error
    Decode,
    /// HTTP/API error
    Http,
    /// API rate limit exceeded
    RateLimitExceeded,
    /// Runtime error
    Runtime,
    /// I/O operation error
    Io,
}

impl ErrorKind {
    /// Process exit code for a fatal error of this kind.
    ///
    /// `0` and `1` are reserved for the approved and not-approved outcomes.
    #[inline]
    pub const fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Config | ErrorKind::Decode => 2,
            ErrorKind::Http | ErrorKind::RateLimitExceeded | ErrorKind::Runtime | ErrorKind::Io => {
                3
            }
        }
    }
}

impl Error {
    /// Get the error kind, zero allocation, returns a Copy enum.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Decode(_) => ErrorKind::Decode,
            Error::Http(_) => ErrorKind::Http,
            Error::RateLimitExceeded(_) => ErrorKind::RateLimitExceeded,
            Error::Runtime(_) => ErrorKind::Runtime,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Borrow the error message, zero allocation.
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            Error::Config(msg)
            | Error::Http(msg)
            | Error::RateLimitExceeded(msg)
            | Error::Runtime(msg) => msg,
            Error::Decode(_) => "unable to decode COMMENT_ARGS",
            Error::Io(_) => "I/O error",
        }
    }

    /// Exit code the CLI terminates with for this error.
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}
