use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a parsing or tree operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unexpected end of file")]
    EndOfFile,

    #[error("invalid stream: {0}")]
    InvalidStream(#[from] io::Error),

    #[error("invalid skeleton: {0}")]
    InvalidSkeleton(&'static str),

    #[error("invalid joint: {0}")]
    InvalidJoint(&'static str),

    #[error("joint `{0}` already exists")]
    DuplicateName(String),

    #[error("illegal data at line {line}: {reason}")]
    IllegalData { line: usize, reason: String },

    #[error("fatal error: {0}")]
    FatalError(String),
}

impl Error {
    pub(crate) fn illegal<S: Into<String>>(line: usize, reason: S) -> Self {
        Error::IllegalData {
            line,
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Error::EndOfFile => Status::EndOfFile,
            Error::InvalidStream(_) => Status::InvalidStream,
            Error::InvalidSkeleton(_) => Status::InvalidSkeleton,
            Error::InvalidJoint(_) => Status::InvalidJoint,
            Error::DuplicateName(_) => Status::DuplicateName,
            Error::IllegalData { .. } => Status::IllegalData,
            Error::FatalError(_) => Status::FatalError,
        }
    }
}

/// Flat status code for callers that only care about the outcome class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    EndOfFile,
    InvalidStream,
    InvalidSkeleton,
    InvalidJoint,
    DuplicateName,
    IllegalData,
    FatalError,
}

impl Status {
    pub fn of<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(e) => e.status(),
        }
    }
}
