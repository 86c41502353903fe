use crate::application::import::{ImportPipeline, ImportReport};
use crate::application::query::QueryEngine;
use crate::config::ServiceConfig;
use crate::domain::account::{Account, AccountDraft, AccountId};
use crate::domain::filter::AccountFilter;
use crate::domain::page::{Page, PageRequest};
use crate::domain::ports::AccountStoreBox;
use crate::domain::validation::{Rule, Violations, is_blank, validate};
use crate::error::{PayablesError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::Read;

/// Entry point for every account operation.
///
/// `AccountService` holds no mutable state of its own; all of it lives in the
/// store. Updates are read-modify-write, so two concurrent updates of the same
/// id may overwrite each other unless the store prevents it.
pub struct AccountService {
    store: AccountStoreBox,
    config: ServiceConfig,
}

impl AccountService {
    /// Creates a new `AccountService`.
    ///
    /// # Arguments
    ///
    /// * `store` - Where accounts are persisted.
    /// * `config` - Import policy and listing defaults.
    pub fn new(store: AccountStoreBox, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub async fn create_account(&self, draft: AccountDraft) -> Result<Account> {
        let account = validate(&draft)?;
        let created = self.store.create(account).await?;
        tracing::info!(id = %created.id, "account created");
        Ok(created)
    }

    /// Replaces every field of an existing account.
    pub async fn update_account(&self, id: AccountId, draft: AccountDraft) -> Result<Account> {
        let mut existing = self.get_account(id).await?;
        existing.overwrite(validate(&draft)?);
        let updated = self.store.update(existing).await?;
        tracing::info!(id = %id, "account updated");
        Ok(updated)
    }

    pub async fn get_account(&self, id: AccountId) -> Result<Account> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(PayablesError::NotFound(id))
    }

    /// Lists accounts by due-date range and description substring. A missing
    /// page size falls back to the configured default.
    pub async fn list_accounts(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        description: Option<&str>,
        page: usize,
        page_size: Option<usize>,
    ) -> Result<Page<Account>> {
        let request = PageRequest::new(page, page_size.unwrap_or(self.config.default_page_size))?;
        let filter = AccountFilter::from_criteria(start_date, end_date, description);
        QueryEngine::new(self.store.as_ref())
            .list(&filter, request)
            .await
    }

    /// Changes only the status label of an account.
    pub async fn set_status(&self, id: AccountId, status: &str) -> Result<Account> {
        let mut existing = self.get_account(id).await?;
        if is_blank(Some(status)) {
            return Err(Violations::new(vec![Rule::EmptyStatus]).into());
        }
        existing.status = status.to_string();
        let updated = self.store.update(existing).await?;
        tracing::info!(id = %id, status, "account status changed");
        Ok(updated)
    }

    pub async fn total_paid(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<Decimal> {
        QueryEngine::new(self.store.as_ref())
            .total_paid_in_period(start_date, end_date)
            .await
    }

    /// Imports accounts from comma-separated lines using the configured policy.
    pub async fn import_accounts<R: Read>(&self, source: R) -> Result<ImportReport> {
        tracing::info!(policy = ?self.config.import_policy, "starting import");
        ImportPipeline::new(self.store.as_ref(), self.config.import_policy)
            .run(source)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImportPolicy;
    use crate::infrastructure::in_memory::InMemoryAccountStore;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> AccountService {
        AccountService::new(Box::new(InMemoryAccountStore::new()), ServiceConfig::default())
    }

    fn draft(description: &str, due: NaiveDate, amount: Decimal) -> AccountDraft {
        AccountDraft {
            due_date: Some(due),
            payment_date: None,
            amount: Some(amount),
            description: Some(description.to_string()),
            status: Some("Pending".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service();
        let created = service
            .create_account(draft("Rent", date(2024, 1, 15), dec!(1200)))
            .await
            .unwrap();

        let fetched = service.get_account(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_draft() {
        let service = service();
        let err = service
            .create_account(AccountDraft::default())
            .await
            .unwrap_err();

        match err {
            PayablesError::Validation { violations, line } => {
                assert_eq!(violations.rules().len(), 4);
                assert!(line.is_none());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(service.store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_unknown_account() {
        let err = service().get_account(AccountId(9)).await.unwrap_err();
        assert!(matches!(err, PayablesError::NotFound(AccountId(9))));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_id() {
        let service = service();
        let created = service
            .create_account(draft("Rent", date(2024, 1, 15), dec!(1200)))
            .await
            .unwrap();

        let mut changes = draft("Rent (adjusted)", date(2024, 1, 20), dec!(1250));
        changes.payment_date = Some(date(2024, 1, 19));
        changes.status = Some("Paid".to_string());
        let updated = service.update_account(created.id, changes).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.amount.value(), dec!(1250));
        assert_eq!(updated.status, "Paid");
        assert_eq!(service.get_account(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_distinguishes_not_found_from_invalid() {
        let service = service();
        let missing = service
            .update_account(AccountId(1), draft("Rent", date(2024, 1, 1), dec!(1)))
            .await;
        assert!(matches!(missing, Err(PayablesError::NotFound(_))));

        let created = service
            .create_account(draft("Rent", date(2024, 1, 1), dec!(1)))
            .await
            .unwrap();
        let invalid = service
            .update_account(created.id, draft("Rent", date(2024, 1, 1), dec!(0)))
            .await;
        assert!(matches!(invalid, Err(PayablesError::Validation { .. })));
        assert_eq!(
            service.get_account(created.id).await.unwrap().amount.value(),
            dec!(1)
        );
    }

    #[tokio::test]
    async fn test_set_status() {
        let service = service();
        let created = service
            .create_account(draft("Rent", date(2024, 1, 15), dec!(1200)))
            .await
            .unwrap();

        let paid = service.set_status(created.id, "Paid").await.unwrap();
        assert_eq!(paid.status, "Paid");
        assert_eq!(paid.description, "Rent");

        let blank = service.set_status(created.id, " ").await;
        assert!(matches!(blank, Err(PayablesError::Validation { .. })));

        let missing = service.set_status(AccountId(77), "Paid").await;
        assert!(matches!(missing, Err(PayablesError::NotFound(AccountId(77)))));
    }

    #[tokio::test]
    async fn test_list_accounts_uses_default_page_size() {
        let service = service();
        for day in 1..=25 {
            service
                .create_account(draft("Bill", date(2024, 1, day), dec!(5)))
                .await
                .unwrap();
        }

        let page = service
            .list_accounts(None, None, None, 0, None)
            .await
            .unwrap();
        assert_eq!(page.page_size, ServiceConfig::DEFAULT_PAGE_SIZE);
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.total_pages, 2);

        let invalid = service.list_accounts(None, None, None, 0, Some(0)).await;
        assert!(matches!(invalid, Err(PayablesError::InvalidArgument(_))));

        let far = service
            .list_accounts(None, None, None, usize::MAX, Some(2))
            .await
            .unwrap();
        assert!(far.items.is_empty());
        assert_eq!(far.total_matches, 25);
    }

    #[tokio::test]
    async fn test_total_paid() {
        let service = service();
        let mut paid = draft("Rent", date(2024, 1, 15), dec!(100.00));
        paid.payment_date = Some(date(2024, 1, 14));
        service.create_account(paid).await.unwrap();
        service
            .create_account(draft("Electric", date(2024, 1, 20), dec!(50.00)))
            .await
            .unwrap();

        let total = service
            .total_paid(date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();
        assert_eq!(total, dec!(100.00));

        let inverted = service.total_paid(date(2024, 1, 31), date(2024, 1, 1)).await;
        assert!(matches!(inverted, Err(PayablesError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_import_honours_configured_policy() {
        let data = "2024-01-10,,1,Rent,Pending\n2024-01-11,,x,Gas,Pending";

        let strict = service();
        assert!(strict.import_accounts(data.as_bytes()).await.is_err());
        assert!(strict.store.get_all().await.unwrap().is_empty());

        let lenient = AccountService::new(
            Box::new(InMemoryAccountStore::new()),
            ServiceConfig::default().with_import_policy(ImportPolicy::SkipInvalid),
        );
        let report = lenient.import_accounts(data.as_bytes()).await.unwrap();
        assert_eq!(report.count(), 1);
        assert_eq!(report.rejected.len(), 1);
    }
}
