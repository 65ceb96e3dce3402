//! In-memory backend with simulated latency
//!
//! Every call answers from fixed data or from lists held in memory. Delays
//! mimic a remote service and can be switched off.

use super::traits::BackendTrait;
use crate::state::forms::{Catalog, FormData};
use crate::state::{
    Balance, RequestStatus, SavedRequest, SendMoneyResponse, Transaction,
    TransactionConfirmation, TransactionStatus, User,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::RwLock;

const VALID_USERNAMES: [&str; 2] = ["testuser", "testuser@example.com"];
const VALID_PASSWORD: &str = "password123";

const LOGIN_DELAY_MS: u64 = 1500;
const BALANCE_DELAY_MS: u64 = 1000;
const SUBMIT_DELAY_MS: u64 = 2000;
const CONFIRM_DELAY_MS: u64 = 2000;
const LIST_TRANSACTIONS_DELAY_MS: u64 = 1000;
const ADD_TRANSACTION_DELAY_MS: u64 = 500;
const LIST_REQUESTS_DELAY_MS: u64 = 800;
const SAVE_REQUEST_DELAY_MS: u64 = 300;
const GET_REQUEST_DELAY_MS: u64 = 200;
const VALIDATE_RECIPIENT_DELAY_MS: u64 = 500;

/// Backend answering from memory
pub struct InMemoryBackend {
    catalog_path: Option<PathBuf>,
    simulate_latency: bool,
    transactions: RwLock<Vec<Transaction>>,
    saved_requests: RwLock<Vec<SavedRequest>>,
}

impl InMemoryBackend {
    /// Backend seeded with sample history
    pub fn new(catalog_path: Option<PathBuf>, simulate_latency: bool) -> Self {
        Self {
            catalog_path,
            simulate_latency,
            transactions: RwLock::new(sample_transactions()),
            saved_requests: RwLock::new(sample_saved_requests()),
        }
    }

    async fn delay(&self, millis: u64) {
        if self.simulate_latency {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}

/// Recipient shown for a submitted form
pub fn recipient_name(form_data: &FormData) -> String {
    let full_name = form_data.field("full_name");
    let first = form_data.field("firstname");
    let last = form_data.field("lastname");

    if !full_name.is_empty() {
        full_name.to_string()
    } else if !first.is_empty() && !last.is_empty() {
        format!("{first} {last}")
    } else if !last.is_empty() {
        last.to_string()
    } else {
        "Unknown Recipient".to_string()
    }
}

/// Amount field as a number, 0.0 when missing or malformed
pub fn form_amount(form_data: &FormData) -> f64 {
    form_data.field("amount").trim().parse().unwrap_or(0.0)
}

fn transaction_id() -> String {
    format!("TXN{}", Utc::now().timestamp_millis())
}

#[async_trait]
impl BackendTrait for InMemoryBackend {
    async fn login(&self, username: &str, password: &str) -> Result<User> {
        self.delay(LOGIN_DELAY_MS).await;
        if VALID_USERNAMES.contains(&username) && password == VALID_PASSWORD {
            tracing::info!("Login succeeded for {username}");
            Ok(User {
                username: username.to_string(),
            })
        } else {
            Err(anyhow!("Invalid credentials."))
        }
    }

    async fn get_balance(&self) -> Result<Balance> {
        self.delay(BALANCE_DELAY_MS).await;
        Ok(Balance {
            balance: 1250.0,
            currency: "USD".to_string(),
        })
    }

    async fn load_catalog(&self) -> Result<Catalog> {
        Ok(Catalog::load(self.catalog_path.as_deref())?)
    }

    async fn submit_form(&self, form_data: &FormData) -> Result<SendMoneyResponse> {
        self.delay(SUBMIT_DELAY_MS).await;
        let response = SendMoneyResponse {
            transaction_id: transaction_id(),
            status: "SUCCESS".to_string(),
            message: "Money sent successfully via dynamic form".to_string(),
            recipient_name: recipient_name(form_data),
            amount: form_amount(form_data),
            timestamp: Utc::now(),
        };
        tracing::info!(
            "Form submitted: {} to {} ({:.2})",
            response.transaction_id,
            response.recipient_name,
            response.amount
        );
        Ok(response)
    }

    async fn confirm_transaction(
        &self,
        recipient_name: &str,
        amount: f64,
        note: Option<String>,
    ) -> Result<TransactionConfirmation> {
        self.delay(CONFIRM_DELAY_MS).await;
        Ok(TransactionConfirmation {
            transaction_id: transaction_id(),
            recipient_name: recipient_name.to_string(),
            amount,
            note,
            status: "COMPLETED".to_string(),
            timestamp: Utc::now(),
        })
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.delay(LIST_TRANSACTIONS_DELAY_MS).await;
        let mut list = self.transactions.read().await.clone();
        list.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(list)
    }

    async fn add_transaction(&self, transaction: Transaction) -> Result<()> {
        self.delay(ADD_TRANSACTION_DELAY_MS).await;
        self.transactions.write().await.insert(0, transaction);
        Ok(())
    }

    async fn list_saved_requests(&self) -> Result<Vec<SavedRequest>> {
        self.delay(LIST_REQUESTS_DELAY_MS).await;
        let mut list = self.saved_requests.read().await.clone();
        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(list)
    }

    async fn save_request(&self, request: SavedRequest) -> Result<()> {
        self.delay(SAVE_REQUEST_DELAY_MS).await;
        self.saved_requests.write().await.insert(0, request);
        Ok(())
    }

    async fn get_request(&self, id: &str) -> Result<SavedRequest> {
        self.delay(GET_REQUEST_DELAY_MS).await;
        self.saved_requests
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("Request not found"))
    }

    async fn validate_recipient(&self, name: &str) -> Result<bool> {
        self.delay(VALIDATE_RECIPIENT_DELAY_MS).await;
        Ok(name.trim().chars().count() >= 2)
    }
}

fn sample_transactions() -> Vec<Transaction> {
    let now = Utc::now();
    let sample = |name: &str, amount: f64, note: Option<&str>, days_ago: i64| Transaction {
        id: uuid::Uuid::new_v4().to_string(),
        recipient_name: name.to_string(),
        amount,
        note: note.map(str::to_string),
        date: now - ChronoDuration::days(days_ago),
        status: TransactionStatus::Completed,
    };
    vec![
        sample("John Doe", 100.0, Some("Payment for dinner"), 1),
        sample("Jane Smith", 50.0, None, 3),
        sample("Bob Johnson", 25.0, Some("Coffee money"), 7),
    ]
}

fn sample_saved_requests() -> Vec<SavedRequest> {
    let now = Utc::now();
    let form = |service_id: &str, provider_id: &str, fields: &[(&str, &str)]| FormData {
        service_id: service_id.to_string(),
        provider_id: provider_id.to_string(),
        fields: fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
    };
    vec![
        SavedRequest {
            id: "REQ001".to_string(),
            service_name: "Bank Transfer".to_string(),
            provider_name: "ABC Bank".to_string(),
            amount: 250.0,
            form_data: form(
                "bank_transfer",
                "101",
                &[
                    ("amount", "250.0"),
                    ("bank_account_number", "1234567890"),
                    ("firstname", "Ahmed"),
                    ("lastname", "Al-Mansouri"),
                ],
            ),
            timestamp: now - ChronoDuration::hours(2),
            status: RequestStatus::Saved,
        },
        SavedRequest {
            id: "REQ002".to_string(),
            service_name: "Wallet Transfer".to_string(),
            provider_name: "Quick Pay".to_string(),
            amount: 75.5,
            form_data: form(
                "wallet_transfer",
                "502",
                &[
                    ("amount", "75.5"),
                    ("msisdn", "+971501234567"),
                    ("full_name", "Sara Mohammed"),
                    ("gender", "F"),
                ],
            ),
            timestamp: now - ChronoDuration::days(1),
            status: RequestStatus::Submitted,
        },
        SavedRequest {
            id: "REQ003".to_string(),
            service_name: "Bank Transfer".to_string(),
            provider_name: "Global Bank".to_string(),
            amount: 500.0,
            form_data: form(
                "bank_transfer",
                "103",
                &[
                    ("amount", "500.0"),
                    ("bank_account_number", "9876543210"),
                    ("date_of_birth", "1990-05-15"),
                    ("gender", "M"),
                ],
            ),
            timestamp: now - ChronoDuration::days(3),
            status: RequestStatus::Completed,
        },
    ]
}
