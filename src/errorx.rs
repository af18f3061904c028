//! Classified errors.
//!
//! An [`Errorx`] carries an HTTP status code, a message authored by
//! application code, and a single boolean deciding whether that message may
//! reach the client. Any error that is *not* an `Errorx` (or does not wrap
//! one) is treated as internal by the request adapter.
use std::{error::Error as StdError, fmt, io};

use axum::http::StatusCode;

// ---

/// An error with a status code and a client-visibility flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Errorx {
    code: StatusCode,
    internal: bool,
    message: String,
}

impl Errorx {
    /// Create a classified error.
    ///
    /// When `internal` is true the adapter answers with a generic 500 and the
    /// message is only written to the logs.
    pub fn new(internal: bool, code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            internal,
            message: message.into(),
        }
    }

    /// A client-visible error answered with `code` and `message`.
    pub fn external(code: StatusCode, message: impl Into<String>) -> Self {
        Self::new(false, code, message)
    }

    /// An error that must stay hidden from the client.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(true, StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn is_internal(&self) -> bool {
        self.internal
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Find the first `Errorx` in the cause chain of `err`.
    ///
    /// Context added with [`anyhow::Context`] is walked through, so
    /// `Err(Errorx::external(..)).context("binding")` is still found.
    pub fn find(err: &anyhow::Error) -> Option<&Errorx> {
        err.chain().next().and_then(Self::find_in)
    }

    /// Same as [`Errorx::find`] for a plain `std::error::Error` source chain.
    ///
    /// An `io::Error` built with `io::Error::other(errx)` is looked into as
    /// well; its `source()` skips the wrapped error itself.
    pub fn find_in<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Errorx> {
        // ---
        let mut next: Option<&'a (dyn StdError + 'static)> = Some(err);
        while let Some(cause) = next {
            if let Some(errx) = cause.downcast_ref::<Errorx>() {
                return Some(errx);
            }
            next = match cause.downcast_ref::<io::Error>().and_then(|e| e.get_ref()) {
                Some(inner) => Some(inner as &(dyn StdError + 'static)),
                None => cause.source(),
            };
        }
        None
    }
}

impl fmt::Display for Errorx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Errorx {}
