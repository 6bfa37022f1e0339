use std::io;

use thiserror::Error;

/// Errors that can occur when reading or writing binary tag data.
///
/// A schematic whose bytes cannot be decompressed, or whose decompressed
/// contents are not a well-formed tag tree, ends up as one of these.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error {
    cause: Box<Cause>,
}

#[derive(Debug, Error)]
enum Cause {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{0}")]
    Owned(Box<str>),
    #[error("{0}")]
    Static(&'static str),
}

impl Error {
    pub(crate) fn new_owned(msg: impl Into<Box<str>>) -> Self {
        Self {
            cause: Box::new(Cause::Owned(msg.into())),
        }
    }

    pub(crate) fn new_static(msg: &'static str) -> Self {
        Self {
            cause: Box::new(Cause::Static(msg)),
        }
    }

    /// Returns the underlying I/O error, if this error came from the reader
    /// or the decompressor rather than from the tag structure itself.
    pub fn io_error(&self) -> Option<&io::Error> {
        match &*self.cause {
            Cause::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self {
            cause: Box::new(Cause::Io(e)),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
