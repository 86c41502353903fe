use super::account::{Account, AccountId, NewAccount};
use super::filter::AccountFilter;
use crate::error::Result;
use async_trait::async_trait;

/// Persistence boundary for accounts. The store owns id assignment and any
/// concurrency control; callers must not assume writes to one id serialize.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists a new account and returns it with its assigned id.
    async fn create(&self, account: NewAccount) -> Result<Account>;

    /// Replaces a stored account. Fails with `NotFound` for an unknown id.
    async fn update(&self, account: Account) -> Result<Account>;

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>>;

    /// Persists a batch as one unit, preserving input order in the result.
    async fn save_all(&self, accounts: Vec<NewAccount>) -> Result<Vec<Account>>;

    async fn get_all(&self) -> Result<Vec<Account>>;

    /// Accounts matching `filter`, in no particular order.
    async fn find_matching(&self, filter: &AccountFilter) -> Result<Vec<Account>> {
        let accounts = self.get_all().await?;
        Ok(accounts
            .into_iter()
            .filter(|account| filter.matches(account))
            .collect())
    }
}

pub type AccountStoreBox = Box<dyn AccountStore>;
