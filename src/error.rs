use crate::domain::account::AccountId;
use crate::domain::validation::Violations;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PayablesError>;

/// Location of an import line that failed, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// 1-based line number in the source stream.
    pub number: u64,
    /// The line as it was read, without its terminator.
    pub content: String,
}

impl std::fmt::Display for LineRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: `{}`", self.number, self.content)
    }
}

fn line_suffix(line: &Option<LineRef>) -> String {
    line.as_ref().map(|l| format!(" ({l})")).unwrap_or_default()
}

#[derive(Error, Debug)]
pub enum PayablesError {
    #[error("Validation error: {violations}{}", line_suffix(.line))]
    Validation {
        violations: Violations,
        line: Option<LineRef>,
    },
    #[error("Format error: expected 5 fields, found {found} ({line})")]
    Format { line: LineRef, found: usize },
    #[error("Parse error: {reason} ({line})")]
    Parse { line: LineRef, reason: String },
    #[error("Account not found: {0}")]
    NotFound(AccountId),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Amount overflow: {0}")]
    AmountOverflow(String),
    #[error("Store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PayablesError {
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }

    /// Line the error refers to, when it came out of an import.
    pub fn line(&self) -> Option<&LineRef> {
        match self {
            Self::Validation { line, .. } => line.as_ref(),
            Self::Format { line, .. } | Self::Parse { line, .. } => Some(line),
            _ => None,
        }
    }
}

impl From<Violations> for PayablesError {
    fn from(violations: Violations) -> Self {
        Self::Validation {
            violations,
            line: None,
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for PayablesError {
    fn from(err: rocksdb::Error) -> Self {
        Self::store(err)
    }
}
