use crate::domain::account::Account;
use crate::domain::filter::AccountFilter;
use crate::domain::page::{Page, PageRequest};
use crate::domain::ports::AccountStore;
use crate::error::{PayablesError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Read-side queries over an [`AccountStore`].
///
/// Listing loads the full matching set before slicing, so every page costs
/// O(n) in the number of matches. Ordering and totals stay exact that way.
pub struct QueryEngine<'a> {
    store: &'a dyn AccountStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a dyn AccountStore) -> Self {
        Self { store }
    }

    /// Returns one page of the accounts matching `filter`, ordered by due
    /// date, then description, then id.
    pub async fn list(&self, filter: &AccountFilter, request: PageRequest) -> Result<Page<Account>> {
        let mut matches = self.store.find_matching(filter).await?;
        sort_accounts(&mut matches);
        tracing::debug!(
            total = matches.len(),
            page = request.page(),
            page_size = request.page_size(),
            "listing accounts"
        );
        Ok(Page::slice(matches, request))
    }

    /// Sums the amounts of accounts paid within `[start, end]`.
    pub async fn total_paid_in_period(&self, start: NaiveDate, end: NaiveDate) -> Result<Decimal> {
        if start > end {
            return Err(PayablesError::InvalidArgument(format!(
                "start date {start} is after end date {end}"
            )));
        }
        let paid = self
            .store
            .find_matching(&AccountFilter::paid_between(start, end))
            .await?;
        paid.iter()
            .try_fold(Decimal::ZERO, |total, account| {
                total.checked_add(account.amount.value())
            })
            .ok_or_else(|| {
                PayablesError::AmountOverflow(format!(
                    "total paid between {start} and {end} exceeds the decimal range"
                ))
            })
    }
}

/// Deterministic listing order. The id tie-break only matters for accounts
/// that share both due date and description.
pub fn sort_accounts(accounts: &mut [Account]) {
    accounts.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| a.description.cmp(&b.description))
            .then_with(|| a.id.cmp(&b.id))
    });
}
