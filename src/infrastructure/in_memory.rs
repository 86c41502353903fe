use crate::domain::account::{Account, AccountId, NewAccount};
use crate::domain::ports::AccountStore;
use crate::error::{PayablesError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct State {
    last_id: u64,
    accounts: BTreeMap<AccountId, Account>,
}

impl State {
    fn insert_new(&mut self, account: NewAccount) -> Account {
        self.last_id += 1;
        let account = account.with_id(AccountId(self.last_id));
        self.accounts.insert(account.id, account.clone());
        account
    }
}

/// A thread-safe in-memory store for accounts.
///
/// Uses `Arc<RwLock<..>>` so clones share the same data. Ids start at 1 and
/// grow monotonically. Ideal for testing or when persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryAccountStore {
    /// Creates a new, empty in-memory account store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, account: NewAccount) -> Result<Account> {
        let mut state = self.state.write().await;
        Ok(state.insert_new(account))
    }

    async fn update(&self, account: Account) -> Result<Account> {
        let mut state = self.state.write().await;
        match state.accounts.get_mut(&account.id) {
            Some(slot) => {
                *slot = account.clone();
                Ok(account)
            }
            None => Err(PayablesError::NotFound(account.id)),
        }
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        let state = self.state.read().await;
        Ok(state.accounts.get(&id).cloned())
    }

    async fn save_all(&self, accounts: Vec<NewAccount>) -> Result<Vec<Account>> {
        // One write guard for the whole batch.
        let mut state = self.state.write().await;
        Ok(accounts
            .into_iter()
            .map(|account| state.insert_new(account))
            .collect())
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        let state = self.state.read().await;
        Ok(state.accounts.values().cloned().collect())
    }
}
