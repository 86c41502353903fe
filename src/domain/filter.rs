use crate::domain::account::Account;
use chrono::NaiveDate;

/// One condition an account must meet to match a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    DueOnOrAfter(NaiveDate),
    DueOnOrBefore(NaiveDate),
    /// Needle is stored lowercased.
    DescriptionContains(String),
    PaidOnOrAfter(NaiveDate),
    PaidOnOrBefore(NaiveDate),
}

impl Clause {
    pub fn matches(&self, account: &Account) -> bool {
        match self {
            Clause::DueOnOrAfter(start) => account.due_date >= *start,
            Clause::DueOnOrBefore(end) => account.due_date <= *end,
            Clause::DescriptionContains(needle) => {
                account.description.to_lowercase().contains(needle.as_str())
            }
            Clause::PaidOnOrAfter(start) => account.payment_date.is_some_and(|d| d >= *start),
            Clause::PaidOnOrBefore(end) => account.payment_date.is_some_and(|d| d <= *end),
        }
    }
}

/// Conjunction of clauses over accounts. An empty filter matches everything.
///
/// Store adapters that can evaluate queries natively may walk [`clauses`]
/// and translate each one; the in-memory fallback is [`matches`].
///
/// [`clauses`]: AccountFilter::clauses
/// [`matches`]: AccountFilter::matches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    clauses: Vec<Clause>,
}

impl AccountFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the listing filter from optional criteria. An empty description
    /// adds no clause.
    pub fn from_criteria(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        description: Option<&str>,
    ) -> Self {
        let mut filter = Self::new();
        if let Some(start) = start_date {
            filter = filter.due_from(start);
        }
        if let Some(end) = end_date {
            filter = filter.due_until(end);
        }
        if let Some(needle) = description {
            filter = filter.description_contains(needle);
        }
        filter
    }

    /// Accounts paid within `[start, end]`, both ends inclusive.
    pub fn paid_between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new()
            .with(Clause::PaidOnOrAfter(start))
            .with(Clause::PaidOnOrBefore(end))
    }

    pub fn due_from(self, start: NaiveDate) -> Self {
        self.with(Clause::DueOnOrAfter(start))
    }

    pub fn due_until(self, end: NaiveDate) -> Self {
        self.with(Clause::DueOnOrBefore(end))
    }

    pub fn description_contains(self, needle: &str) -> Self {
        if needle.is_empty() {
            return self;
        }
        self.with(Clause::DescriptionContains(needle.to_lowercase()))
    }

    pub fn with(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn matches(&self, account: &Account) -> bool {
        self.clauses.iter().all(|clause| clause.matches(account))
    }
}
