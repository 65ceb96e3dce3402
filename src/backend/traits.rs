//! Trait abstraction for the backend to enable mocking in tests

use crate::state::forms::{Catalog, FormData};
use crate::state::{
    Balance, SavedRequest, SendMoneyResponse, Transaction, TransactionConfirmation, User,
};
use anyhow::Result;
use async_trait::async_trait;

/// Backend operations behind the screens
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendTrait: Send + Sync {
    /// Authenticate a user
    async fn login(&self, username: &str, password: &str) -> Result<User>;

    /// Current wallet balance
    async fn get_balance(&self) -> Result<Balance>;

    /// Parse the service catalog
    async fn load_catalog(&self) -> Result<Catalog>;

    /// Submit a filled send-money form
    async fn submit_form(&self, form_data: &FormData) -> Result<SendMoneyResponse>;

    /// Confirm a submitted transfer
    async fn confirm_transaction(
        &self,
        recipient_name: &str,
        amount: f64,
        note: Option<String>,
    ) -> Result<TransactionConfirmation>;

    /// Completed transfers, newest first
    async fn list_transactions(&self) -> Result<Vec<Transaction>>;

    async fn add_transaction(&self, transaction: Transaction) -> Result<()>;

    /// Saved requests, newest first
    async fn list_saved_requests(&self) -> Result<Vec<SavedRequest>>;

    async fn save_request(&self, request: SavedRequest) -> Result<()>;

    /// Look up one saved request by id
    async fn get_request(&self, id: &str) -> Result<SavedRequest>;

    /// Whether a recipient name is acceptable
    async fn validate_recipient(&self, name: &str) -> Result<bool>;
}
