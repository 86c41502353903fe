use crate::domain::validation::{Rule, Violations};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identity of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a positive monetary amount owed on an account.
///
/// This is a wrapper around `rust_decimal::Decimal` that can only be built
/// from a value greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, Violations> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(Violations::new(vec![Rule::AmountNotPositive]))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = Violations;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unvalidated account fields, as received from a caller or an import line.
///
/// Every field is optional so the validator can report each missing one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountDraft {
    pub due_date: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// A validated account that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub amount: Amount,
    pub description: String,
    pub status: String,
}

impl NewAccount {
    /// Attaches the identity handed out by the store.
    pub fn with_id(self, id: AccountId) -> Account {
        Account {
            id,
            due_date: self.due_date,
            payment_date: self.payment_date,
            amount: self.amount,
            description: self.description,
            status: self.status,
        }
    }
}

/// A persisted payable account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Assigned by the store on creation, never changed afterwards.
    pub id: AccountId,
    pub due_date: NaiveDate,
    /// Absent until the account is paid.
    pub payment_date: Option<NaiveDate>,
    pub amount: Amount,
    pub description: String,
    pub status: String,
}

impl Account {
    /// Replaces every mutable field with the validated values, keeping the id.
    pub fn overwrite(&mut self, fields: NewAccount) {
        self.due_date = fields.due_date;
        self.payment_date = fields.payment_date;
        self.amount = fields.amount;
        self.description = fields.description;
        self.status = fields.status;
    }

    pub fn is_paid_between(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.payment_date
            .is_some_and(|paid| paid >= start && paid <= end)
    }
}
