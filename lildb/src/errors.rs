use backtrace::Backtrace;
use serde::{de, ser};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Categorizes the failures LilDb can report.
///
/// Every [LilDbError] carries exactly one kind, which callers can match on to decide
/// how to react (for example, retry an `insert` as an `upsert` on [ErrorKind::DuplicateId]).
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Query errors
    InvalidQuery,

    // Document lifecycle errors
    DuplicateId,
    InvalidId,
    InvalidDataType,
    InvalidOperation,

    // Persistence errors
    NoBackingFile,
    FileExists,
    FileNotFound,
    PermissionDenied,
    IOError,
    EncodingError,

    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidQuery => write!(f, "Invalid query"),
            ErrorKind::DuplicateId => write!(f, "Duplicate id"),
            ErrorKind::InvalidId => write!(f, "Invalid id"),
            ErrorKind::InvalidDataType => write!(f, "Invalid data type"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::NoBackingFile => write!(f, "No backing file"),
            ErrorKind::FileExists => write!(f, "File exists"),
            ErrorKind::FileNotFound => write!(f, "File not found"),
            ErrorKind::PermissionDenied => write!(f, "Permission denied"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// The error type of every fallible LilDb operation.
///
/// It carries a human readable message, an [ErrorKind], an optional cause and
/// the backtrace captured where the error was created. The backtrace is resolved
/// lazily, only when the error is printed with `{:?}`.
#[derive(Clone)]
pub struct LilDbError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<LilDbError>>,
    backtrace: Arc<Backtrace>,
}

impl LilDbError {
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        LilDbError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(Backtrace::new_unresolved()),
        }
    }

    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: LilDbError) -> Self {
        LilDbError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(Backtrace::new_unresolved()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&LilDbError> {
        self.cause.as_deref()
    }
}

impl Display for LilDbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for LilDbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => {
                let mut backtrace = (*self.backtrace).clone();
                backtrace.resolve();
                write!(f, "{}\n{:?}", self.message, backtrace)
            }
        }
    }
}

impl Error for LilDbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

pub type LilDbResult<T> = Result<T, LilDbError>;

impl de::Error for LilDbError {
    fn custom<T: Display>(msg: T) -> Self {
        LilDbError::new(&msg.to_string(), ErrorKind::EncodingError)
    }
}

impl ser::Error for LilDbError {
    fn custom<T: Display>(msg: T) -> Self {
        LilDbError::new(&msg.to_string(), ErrorKind::EncodingError)
    }
}

impl From<std::io::Error> for LilDbError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IOError,
        };
        LilDbError::new(&format!("IO error: {}", err), error_kind)
    }
}

impl From<serde_json::Error> for LilDbError {
    fn from(err: serde_json::Error) -> Self {
        LilDbError::new(&format!("JSON error: {}", err), ErrorKind::EncodingError)
    }
}

impl From<std::string::FromUtf8Error> for LilDbError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        LilDbError::new(
            &format!("UTF-8 encoding error: {}", err),
            ErrorKind::EncodingError,
        )
    }
}

impl From<std::num::ParseIntError> for LilDbError {
    fn from(err: std::num::ParseIntError) -> Self {
        LilDbError::new(
            &format!("Integer parsing error: {}", err),
            ErrorKind::InvalidDataType,
        )
    }
}
