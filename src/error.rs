use std::{backtrace::Backtrace, fmt::Formatter, ops::Deref, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ErrorCode {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    SerDe(#[from] serde_json::error::Error),
    #[error("document at {} is not a JSON object", .path.display())]
    NotAnObject { path: PathBuf },
    #[error("invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, KvError>;

/// Fault raised by the store. Precondition failures (duplicate add, missing
/// remove) are never reported through this type, see [`crate::Outcome`].
#[derive(Error)]
#[error("{inner}")]
pub struct KvError {
    #[source]
    inner: Box<ErrorCode>,
    backtrace: Box<Backtrace>,
}

impl Deref for KvError {
    type Target = ErrorCode;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<ErrorCode> for KvError {
    fn from(value: ErrorCode) -> Self {
        KvError {
            inner: Box::new(value),
            backtrace: Box::new(Backtrace::capture()),
        }
    }
}

impl core::fmt::Debug for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.inner, self.backtrace)
    }
}

impl From<std::env::VarError> for KvError {
    fn from(value: std::env::VarError) -> Self {
        ErrorCode::Config(value.to_string()).into()
    }
}

impl From<serde_json::error::Error> for KvError {
    fn from(value: serde_json::error::Error) -> Self {
        ErrorCode::SerDe(value).into()
    }
}

impl From<std::io::Error> for KvError {
    fn from(value: std::io::Error) -> Self {
        ErrorCode::Io(value).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deref_exposes_code() {
        let err: KvError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(*err, ErrorCode::Io(_)));
        assert_eq!(err.to_string(), "gone");
    }

    #[test]
    fn not_an_object_names_path() {
        let err: KvError = ErrorCode::NotAnObject {
            path: PathBuf::from("/tmp/x.db.json"),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "document at /tmp/x.db.json is not a JSON object"
        );
    }
}
