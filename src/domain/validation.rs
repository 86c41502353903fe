//! Field-level rules every account must satisfy before it reaches the store.
//!
//! Rules are checked independently so a single call reports every violation
//! at once instead of stopping at the first one.

use crate::domain::account::{AccountDraft, Amount, NewAccount};
use serde::Serialize;
use std::fmt;

/// Identifier of a violated account rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    AmountNotPositive,
    MissingDueDate,
    EmptyDescription,
    EmptyStatus,
}

impl Rule {
    pub fn id(&self) -> &'static str {
        match self {
            Rule::AmountNotPositive => "amount_not_positive",
            Rule::MissingDueDate => "missing_due_date",
            Rule::EmptyDescription => "empty_description",
            Rule::EmptyStatus => "empty_status",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Non-empty set of violated rules, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violations(Vec<Rule>);

impl Violations {
    pub(crate) fn new(rules: Vec<Rule>) -> Self {
        debug_assert!(!rules.is_empty(), "violations must name at least one rule");
        Self(rules)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.0
    }

    pub fn contains(&self, rule: Rule) -> bool {
        self.0.contains(&rule)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.0.iter().map(Rule::id).collect();
        f.write_str(&ids.join(", "))
    }
}

impl std::error::Error for Violations {}

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Checks a draft against all account rules.
///
/// Returns the validated account, or every rule the draft breaks.
pub fn validate(draft: &AccountDraft) -> Result<NewAccount, Violations> {
    let mut violated = Vec::new();

    let amount = draft.amount.and_then(|value| Amount::new(value).ok());
    if amount.is_none() {
        violated.push(Rule::AmountNotPositive);
    }
    if draft.due_date.is_none() {
        violated.push(Rule::MissingDueDate);
    }
    if is_blank(draft.description.as_deref()) {
        violated.push(Rule::EmptyDescription);
    }
    if is_blank(draft.status.as_deref()) {
        violated.push(Rule::EmptyStatus);
    }

    match (amount, draft.due_date, violated.is_empty()) {
        (Some(amount), Some(due_date), true) => Ok(NewAccount {
            due_date,
            payment_date: draft.payment_date,
            amount,
            description: draft.description.clone().unwrap_or_default(),
            status: draft.status.clone().unwrap_or_default(),
        }),
        _ => Err(Violations::new(violated)),
    }
}
