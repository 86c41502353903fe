//! Batch import of accounts from comma-separated lines.
//!
//! Each line carries `due_date, payment_date, amount, description, status`.
//! Lines are parsed and validated strictly in input order; what happens on a
//! bad line depends on the [`ImportPolicy`]. Accepted lines are persisted
//! with a single `save_all` call.

use crate::config::ImportPolicy;
use crate::domain::account::{Account, AccountDraft, NewAccount};
use crate::domain::date::parse_date;
use crate::domain::ports::AccountStore;
use crate::domain::validation::validate;
use crate::error::{PayablesError, Result};
use crate::interfaces::csv::account_reader::{AccountReader, RawLine};
use rust_decimal::Decimal;
use std::io::Read;
use std::str::FromStr;

pub const FIELD_COUNT: usize = 5;

/// A line left out of a lenient import, with the reason.
#[derive(Debug)]
pub struct RejectedLine {
    pub line_number: u64,
    pub line: String,
    pub error: PayablesError,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    /// Persisted accounts, in input order.
    pub imported: Vec<Account>,
    /// Always empty under [`ImportPolicy::Strict`].
    pub rejected: Vec<RejectedLine>,
}

impl ImportReport {
    pub fn count(&self) -> usize {
        self.imported.len()
    }
}

/// Turns one raw line into a validated account.
pub fn parse_line(raw: &RawLine) -> Result<NewAccount> {
    if raw.fields.len() != FIELD_COUNT {
        return Err(PayablesError::Format {
            line: raw.line_ref(),
            found: raw.fields.len(),
        });
    }

    let parse_error = |reason: String| PayablesError::Parse {
        line: raw.line_ref(),
        reason,
    };

    let fields = &raw.fields;
    let due_date = parse_date(&fields[0])
        .map_err(|e| parse_error(format!("invalid due date `{}`: {e}", fields[0])))?;
    let payment_date = match fields[1].as_str() {
        "" => None,
        text => Some(
            parse_date(text).map_err(|e| parse_error(format!("invalid payment date `{text}`: {e}")))?,
        ),
    };
    let amount = Decimal::from_str(&fields[2])
        .map_err(|e| parse_error(format!("invalid amount `{}`: {e}", fields[2])))?;

    let draft = AccountDraft {
        due_date: Some(due_date),
        payment_date,
        amount: Some(amount),
        description: Some(fields[3].clone()),
        status: Some(fields[4].clone()),
    };

    validate(&draft).map_err(|violations| PayablesError::Validation {
        violations,
        line: Some(raw.line_ref()),
    })
}

/// Reads, checks, and persists a whole import stream.
pub struct ImportPipeline<'a> {
    store: &'a dyn AccountStore,
    policy: ImportPolicy,
}

impl<'a> ImportPipeline<'a> {
    pub fn new(store: &'a dyn AccountStore, policy: ImportPolicy) -> Self {
        Self { store, policy }
    }

    /// Parses every line of `source` into a pending batch without touching
    /// the store. Under the strict policy the first bad line is returned as
    /// the error. Failures that belong to no line (I/O) abort under either
    /// policy.
    pub fn prepare<R: Read>(&self, source: R) -> Result<(Vec<NewAccount>, Vec<RejectedLine>)> {
        let mut pending = Vec::new();
        let mut rejected = Vec::new();

        for raw in AccountReader::new(source).lines() {
            let error = match raw.and_then(|raw| parse_line(&raw)) {
                Ok(account) => {
                    pending.push(account);
                    continue;
                }
                Err(error) => error,
            };
            let line = match (self.policy, error.line().cloned()) {
                (ImportPolicy::SkipInvalid, Some(line)) => line,
                _ => return Err(error),
            };
            tracing::warn!(line = line.number, %error, "skipping import line");
            rejected.push(RejectedLine {
                line_number: line.number,
                line: line.content,
                error,
            });
        }

        Ok((pending, rejected))
    }

    pub async fn run<R: Read>(&self, source: R) -> Result<ImportReport> {
        let (pending, rejected) = self.prepare(source)?;

        let imported = if pending.is_empty() {
            Vec::new()
        } else {
            self.store.save_all(pending).await?
        };

        tracing::info!(
            imported = imported.len(),
            rejected = rejected.len(),
            "import finished"
        );
        Ok(ImportReport { imported, rejected })
    }
}
