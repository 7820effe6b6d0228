use crate::constants::STORE_NAME;
use crate::errors::DepositError;
use crate::sidecar::{StateStore, StateStoreExt};
use crate::types::{Account, Transaction};
use crate::validation::is_valid_amount;
use std::sync::Arc;

/// **Account balances kept in a state store**
///
/// Each account is one record, keyed by its id.
///
/// Nothing here serializes requests for the same id: a deposit is a load
/// followed by a save, and two overlapping deposits to one account can both
/// load the same balance, so one of the increments is lost.
#[derive(Clone)]
pub struct Accounts {
    store: Arc<dyn StateStore>,
    store_name: String,
}

impl Accounts {
    /// Keeps accounts in the store named [`STORE_NAME`].
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self::with_store_name(store, STORE_NAME)
    }

    pub fn with_store_name(store: Arc<dyn StateStore>, store_name: impl Into<String>) -> Self {
        Accounts {
            store,
            store_name: store_name.into(),
        }
    }

    /// Deposits the transaction's `amount` into the account `id`,
    /// opening the account with a zero balance if it doesn't exist yet.
    ///
    /// Returns the updated account, as persisted.
    ///
    /// A rejected amount touches no state. Otherwise there is exactly one read
    /// and one write.
    ///
    /// # Errors
    /// - Negative amount, `DepositError::InvalidAmount`;
    /// - Attempted overflow (account over-funded), `DepositError::AccountOverFunded`;
    /// - The store failed or holds an unreadable record, `DepositError::State`.
    pub async fn deposit(&self, tx: &Transaction) -> Result<Account, DepositError> {
        if !is_valid_amount(&tx.amount) {
            return Err(DepositError::InvalidAmount(tx.amount));
        }

        let loaded: Option<Account> = self.store.get_json(&self.store_name, &tx.id).await?;
        let mut account = loaded.unwrap_or_else(|| Account::new(tx.id.as_str()));

        account
            .credit(tx.amount)
            .ok_or_else(|| DepositError::AccountOverFunded(tx.id.clone(), tx.amount))?;

        self.store
            .save_json(&self.store_name, &tx.id, &account)
            .await?;

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StateStoreError;
    use crate::sidecar::MemoryStateStore;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts the reads and writes that reach the inner store.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStateStore,
        reads: AtomicUsize,
        writes: AtomicUsize,
    }

    impl CountingStore {
        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StateStore for CountingStore {
        async fn get_state(
            &self,
            store: &str,
            key: &str,
        ) -> Result<Option<Value>, StateStoreError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.get_state(store, key).await
        }

        async fn save_state(
            &self,
            store: &str,
            key: &str,
            value: Value,
        ) -> Result<(), StateStoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.save_state(store, key, value).await
        }
    }

    /// A store whose backend is down.
    struct DownStore;

    #[async_trait]
    impl StateStore for DownStore {
        async fn get_state(&self, _: &str, _: &str) -> Result<Option<Value>, StateStoreError> {
            Err(StateStoreError::Connection("connection refused".to_string()))
        }

        async fn save_state(&self, _: &str, _: &str, _: Value) -> Result<(), StateStoreError> {
            Err(StateStoreError::Connection("connection refused".to_string()))
        }
    }

    fn accounts() -> (Accounts, Arc<CountingStore>) {
        let store = Arc::new(CountingStore::default());
        (Accounts::new(store.clone()), store)
    }

    async fn seed(store: &CountingStore, id: &str, balance: Decimal) {
        let account = Account {
            id: id.to_string(),
            balance,
        };
        store.inner.save_json(STORE_NAME, id, &account).await.unwrap();
    }

    async fn stored(store: &CountingStore, id: &str) -> Option<Account> {
        store.inner.get_json(STORE_NAME, id).await.unwrap()
    }

    #[tokio::test]
    async fn deposit_first_opens_account() {
        let (accounts, store) = accounts();

        let account = accounts
            .deposit(&Transaction::new("17", dec!(99)))
            .await
            .unwrap();

        assert_eq!(account.id, "17");
        assert_eq!(account.balance, dec!(99));
        assert_eq!(stored(&store, "17").await, Some(account));
        assert_eq!((store.reads(), store.writes()), (1, 1));
    }

    #[tokio::test]
    async fn deposit_adds_to_existing_balance() {
        let (accounts, store) = accounts();
        seed(&store, "17", dec!(50)).await;

        let account = accounts
            .deposit(&Transaction::new("17", dec!(25)))
            .await
            .unwrap();

        assert_eq!(account.balance, dec!(75));
        assert_eq!(stored(&store, "17").await.unwrap().balance, dec!(75));
    }

    #[tokio::test]
    async fn deposit_zero_is_recorded() {
        let (accounts, store) = accounts();

        let account = accounts
            .deposit(&Transaction::new("17", Decimal::ZERO))
            .await
            .unwrap();

        assert_eq!(account, Account::new("17"));
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn deposit_is_not_idempotent() {
        let (accounts, store) = accounts();
        seed(&store, "17", dec!(10)).await;
        let tx = Transaction::new("17", dec!(5));

        accounts.deposit(&tx).await.unwrap();
        let account = accounts.deposit(&tx).await.unwrap();

        assert_eq!(account.balance, dec!(20));
        assert_eq!(store.writes(), 2);
    }

    #[tokio::test]
    async fn deposit_keeps_fractions() {
        let (accounts, _) = accounts();

        accounts
            .deposit(&Transaction::new("17", dec!(0.1)))
            .await
            .unwrap();
        let account = accounts
            .deposit(&Transaction::new("17", dec!(0.2)))
            .await
            .unwrap();

        assert_eq!(account.balance, dec!(0.3));
    }

    #[tokio::test]
    async fn deposit_negative_touches_nothing() {
        let (accounts, store) = accounts();
        seed(&store, "17", dec!(50)).await;

        let result = accounts.deposit(&Transaction::new("17", dec!(-5))).await;

        assert!(matches!(result, Err(DepositError::InvalidAmount(amount)) if amount == dec!(-5)));
        assert_eq!((store.reads(), store.writes()), (0, 0));
        assert_eq!(stored(&store, "17").await.unwrap().balance, dec!(50));
    }

    #[tokio::test]
    async fn deposit_reads_record_without_balance() {
        let (accounts, store) = accounts();
        store
            .inner
            .save_state(STORE_NAME, "17", json!({"Id": "17"}))
            .await
            .unwrap();

        let account = accounts
            .deposit(&Transaction::new("17", dec!(3)))
            .await
            .unwrap();

        assert_eq!(account.balance, dec!(3));
    }

    #[tokio::test]
    async fn deposit_err_over_funded() {
        let (accounts, store) = accounts();
        seed(&store, "17", Decimal::MAX).await;

        let result = accounts.deposit(&Transaction::new("17", dec!(1))).await;

        assert!(matches!(result, Err(DepositError::AccountOverFunded(..))));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn deposit_err_store_down() {
        let accounts = Accounts::new(Arc::new(DownStore));

        let result = accounts.deposit(&Transaction::new("17", dec!(1))).await;

        match result {
            Err(err @ DepositError::State(_)) => assert!(err.is_fault()),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn deposit_err_unreadable_record() {
        let (accounts, store) = accounts();
        store
            .inner
            .save_state(STORE_NAME, "17", json!("not an account"))
            .await
            .unwrap();

        let result = accounts.deposit(&Transaction::new("17", dec!(1))).await;

        assert!(matches!(
            result,
            Err(DepositError::State(StateStoreError::Serialisation(_)))
        ));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn deposit_uses_configured_store_name() {
        let store = Arc::new(CountingStore::default());
        let accounts = Accounts::with_store_name(store.clone(), "ledger");

        accounts
            .deposit(&Transaction::new("17", dec!(1)))
            .await
            .unwrap();

        assert!(stored(&store, "17").await.is_none());
        assert!(store.inner.get_state("ledger", "17").await.unwrap().is_some());
    }
}
