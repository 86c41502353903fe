use crate::domain::account::{Account, AccountId, NewAccount};
use crate::domain::ports::AccountStore;
use crate::error::{PayablesError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for storing accounts, keyed by big-endian id.
pub const CF_ACCOUNTS: &str = "accounts";
/// Column Family for bookkeeping such as the id sequence.
pub const CF_META: &str = "meta";

const LAST_ID_KEY: &[u8] = b"last_id";

/// A persistent account store backed by RocksDB.
///
/// New accounts and the id sequence bump are written in one `WriteBatch`, so
/// a batch import either lands completely or not at all.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    id_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path, creating the
    /// `accounts` and `meta` column families when missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_accounts = ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default());
        let cf_meta = ColumnFamilyDescriptor::new(CF_META, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_accounts, cf_meta])?;

        Ok(Self {
            db: Arc::new(db),
            id_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            PayablesError::store(std::io::Error::other(format!(
                "{name} column family not found"
            )))
        })
    }

    fn last_id(&self) -> Result<u64> {
        let meta = self.cf(CF_META)?;
        match self.db.get_pinned_cf(meta, LAST_ID_KEY)? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_ref().try_into().map_err(|_| {
                    PayablesError::store(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "corrupt id sequence",
                    ))
                })?;
                Ok(u64::from_be_bytes(raw))
            }
            None => Ok(0),
        }
    }

    fn put_account(&self, batch: &mut WriteBatch, account: &Account) -> Result<()> {
        let value = serde_json::to_vec(account).map_err(PayablesError::store)?;
        batch.put_cf(self.cf(CF_ACCOUNTS)?, account.id.0.to_be_bytes(), value);
        Ok(())
    }

    /// Assigns ids to `accounts` and commits them with the new sequence value.
    async fn insert_batch(&self, accounts: Vec<NewAccount>) -> Result<Vec<Account>> {
        let _guard = self.id_lock.lock().await;
        let mut next = self.last_id()?;
        let mut batch = WriteBatch::default();
        let mut saved = Vec::with_capacity(accounts.len());

        for account in accounts {
            next += 1;
            let account = account.with_id(AccountId(next));
            self.put_account(&mut batch, &account)?;
            saved.push(account);
        }
        batch.put_cf(self.cf(CF_META)?, LAST_ID_KEY, next.to_be_bytes());
        self.db.write(batch)?;

        Ok(saved)
    }
}

#[async_trait]
impl AccountStore for RocksDBStore {
    async fn create(&self, account: NewAccount) -> Result<Account> {
        let mut saved = self.insert_batch(vec![account]).await?;
        saved.pop().ok_or_else(|| {
            PayablesError::store(std::io::Error::other("account was not written"))
        })
    }

    async fn update(&self, account: Account) -> Result<Account> {
        let key = account.id.0.to_be_bytes();
        if self.db.get_pinned_cf(self.cf(CF_ACCOUNTS)?, key)?.is_none() {
            return Err(PayablesError::NotFound(account.id));
        }
        let mut batch = WriteBatch::default();
        self.put_account(&mut batch, &account)?;
        self.db.write(batch)?;
        Ok(account)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        match self.db.get_pinned_cf(self.cf(CF_ACCOUNTS)?, id.0.to_be_bytes())? {
            Some(bytes) => {
                let account = serde_json::from_slice(&bytes).map_err(PayablesError::store)?;
                Ok(Some(account))
            }
            None => Ok(None),
        }
    }

    async fn save_all(&self, accounts: Vec<NewAccount>) -> Result<Vec<Account>> {
        self.insert_batch(accounts).await
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        let handle = self.cf(CF_ACCOUNTS)?;
        let mut accounts = Vec::new();

        for item in self.db.iterator_cf(handle, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            let account: Account = serde_json::from_slice(&value).map_err(PayablesError::store)?;
            accounts.push(account);
        }

        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::Amount;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn new_account(description: &str) -> NewAccount {
        NewAccount {
            due_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            payment_date: NaiveDate::from_ymd_opt(2024, 1, 9),
            amount: Amount::new(dec!(99.90)).unwrap(),
            description: description.to_string(),
            status: "Paid".to_string(),
        }
    }

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).expect("Failed to open RocksDB");

        assert!(store.db.cf_handle(CF_ACCOUNTS).is_some());
        assert!(store.db.cf_handle(CF_META).is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_create_and_find() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();

        let created = store.create(new_account("Rent")).await.unwrap();
        assert_eq!(created.id, AccountId(1));

        let retrieved = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(retrieved, created);
        assert!(store.find_by_id(AccountId(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rocksdb_sequence_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = RocksDBStore::open(dir.path()).unwrap();
            store
                .save_all(vec![new_account("A"), new_account("B")])
                .await
                .unwrap();
        }

        let store = RocksDBStore::open(dir.path()).unwrap();
        let next = store.create(new_account("C")).await.unwrap();
        assert_eq!(next.id, AccountId(3));
        assert_eq!(store.get_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_rocksdb_update() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();

        let mut account = store.create(new_account("Rent")).await.unwrap();
        account.status = "Cancelled".to_string();
        store.update(account.clone()).await.unwrap();
        assert_eq!(
            store.find_by_id(account.id).await.unwrap().unwrap().status,
            "Cancelled"
        );

        let ghost = new_account("Ghost").with_id(AccountId(99));
        assert!(matches!(
            store.update(ghost).await,
            Err(PayablesError::NotFound(AccountId(99)))
        ));
    }
}
