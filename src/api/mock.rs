//! Mock backend for testing and demos.
//!
//! Answers questions with canned SQL and result sets, keyed on keywords in
//! the question. Tests can register their own replies, failures, and delays.

use async_trait::async_trait;
use std::time::Duration;

use crate::api::types::{AskResponse, Cell, ResultSet, Row};
use crate::api::Backend;
use crate::error::{AskError, Result};

/// A registered reply for questions matching a pattern.
#[derive(Debug, Clone)]
struct MockRule {
    pattern: String,
    delay: Option<Duration>,
    reply: Result<AskResponse>,
}

/// Mock backend that returns canned answers based on question keywords.
///
/// Used for unit tests and for `--mock` demo runs without a live backend.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    /// Custom rules, checked before the built-in answers.
    rules: Vec<MockRule>,
    /// Delay applied to every reply without a rule-specific delay.
    delay: Option<Duration>,
    /// Health probe result.
    unhealthy: bool,
}

impl MockBackend {
    /// Creates a mock backend with the built-in answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a successful reply for questions containing `pattern`.
    pub fn with_response(mut self, pattern: impl Into<String>, response: AskResponse) -> Self {
        self.rules.push(MockRule {
            pattern: pattern.into(),
            delay: None,
            reply: Ok(response),
        });
        self
    }

    /// Registers a reply that is delayed before it resolves.
    pub fn with_delayed_response(
        mut self,
        pattern: impl Into<String>,
        delay: Duration,
        response: AskResponse,
    ) -> Self {
        self.rules.push(MockRule {
            pattern: pattern.into(),
            delay: Some(delay),
            reply: Ok(response),
        });
        self
    }

    /// Registers a backend failure with the given detail message.
    pub fn with_failure(mut self, pattern: impl Into<String>, detail: impl Into<String>) -> Self {
        self.rules.push(MockRule {
            pattern: pattern.into(),
            delay: None,
            reply: Err(AskError::backend(detail)),
        });
        self
    }

    /// Applies a delay to every built-in reply.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Makes the health probe report the backend as unhealthy.
    pub fn unhealthy(mut self) -> Self {
        self.unhealthy = true;
        self
    }

    /// Picks the reply for a question.
    fn mock_reply(&self, question: &str) -> (Option<Duration>, Result<AskResponse>) {
        let q = question.to_lowercase();

        // Check custom rules first
        for rule in &self.rules {
            if q.contains(&rule.pattern.to_lowercase()) {
                return (rule.delay.or(self.delay), rule.reply.clone());
            }
        }

        // Built-in answers over a small bank schema
        if q.contains("top") && q.contains("balance") {
            return (self.delay, Ok(top_customers_by_balance()));
        }

        if q.contains("recent") && q.contains("transactions") {
            return (self.delay, Ok(recent_transactions()));
        }

        if q.contains("istanbul") && q.contains("accounts") {
            return (self.delay, Ok(accounts_in_istanbul()));
        }

        (self.delay, Ok(list_customers()))
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn ask(&self, question: &str) -> Result<AskResponse> {
        let (delay, reply) = self.mock_reply(question);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        reply
    }

    async fn health(&self) -> Result<bool> {
        Ok(!self.unhealthy)
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

fn text_row(cells: &[Cell]) -> Row {
    cells.to_vec()
}

fn top_customers_by_balance() -> AskResponse {
    AskResponse {
        sql: "SELECT c.first_name, c.last_name, a.balance_try FROM accounts a \
              JOIN customers c ON c.customer_no = a.customer_no \
              ORDER BY a.balance_try DESC LIMIT 5;"
            .to_string(),
        result: Some(ResultSet::with_data(
            vec![
                "first_name".to_string(),
                "last_name".to_string(),
                "balance_try".to_string(),
            ],
            vec![
                text_row(&["Ayşe".into(), "Yılmaz".into(), 152300.75.into()]),
                text_row(&["Mehmet".into(), "Demir".into(), 98450.0.into()]),
                text_row(&["Elif".into(), "Kaya".into(), 87200.5.into()]),
                text_row(&["Can".into(), "Çelik".into(), 65800.25.into()]),
                text_row(&["Zeynep".into(), "Aydın".into(), 54100.0.into()]),
            ],
        )),
    }
}

fn recent_transactions() -> AskResponse {
    AskResponse {
        sql: "SELECT transaction_no, account_no, transaction_type, amount, currency, \
              transaction_time FROM transactions ORDER BY transaction_time DESC LIMIT 20;"
            .to_string(),
        result: Some(ResultSet::with_data(
            vec![
                "transaction_no".to_string(),
                "account_no".to_string(),
                "transaction_type".to_string(),
                "amount".to_string(),
                "currency".to_string(),
                "transaction_time".to_string(),
            ],
            vec![
                text_row(&[
                    90012.into(),
                    1001.into(),
                    "EFT".into(),
                    2500.0.into(),
                    "TRY".into(),
                    "2024-03-14T10:22:00".into(),
                ]),
                text_row(&[
                    90011.into(),
                    1042.into(),
                    "Havale".into(),
                    780.5.into(),
                    "TRY".into(),
                    "2024-03-14T09:41:00".into(),
                ]),
                text_row(&[
                    90010.into(),
                    1007.into(),
                    "ATM".into(),
                    1200.0.into(),
                    "TRY".into(),
                    "2024-03-13T18:05:00".into(),
                ]),
            ],
        )),
    }
}

fn accounts_in_istanbul() -> AskResponse {
    AskResponse {
        sql: "SELECT a.account_no, c.first_name, c.last_name, a.account_type, a.balance_try \
              FROM accounts a JOIN customers c ON c.customer_no = a.customer_no \
              JOIN branches b ON b.branch_code = a.branch_code \
              WHERE b.city = 'İstanbul' OR b.city = 'Istanbul' \
              ORDER BY a.balance_try DESC LIMIT 50;"
            .to_string(),
        result: Some(ResultSet::with_data(
            vec![
                "account_no".to_string(),
                "first_name".to_string(),
                "last_name".to_string(),
                "account_type".to_string(),
                "balance_try".to_string(),
            ],
            vec![
                text_row(&[
                    1001.into(),
                    "Ayşe".into(),
                    "Yılmaz".into(),
                    "Vadesiz".into(),
                    152300.75.into(),
                ]),
                text_row(&[
                    1042.into(),
                    "Mehmet".into(),
                    "Demir".into(),
                    "Vadeli".into(),
                    98450.0.into(),
                ]),
            ],
        )),
    }
}

fn list_customers() -> AskResponse {
    AskResponse {
        sql: "SELECT customer_no, first_name, last_name, residence_city FROM customers \
              ORDER BY customer_no LIMIT 10;"
            .to_string(),
        result: Some(ResultSet::with_data(
            vec![
                "customer_no".to_string(),
                "first_name".to_string(),
                "last_name".to_string(),
                "residence_city".to_string(),
            ],
            vec![
                text_row(&[1.into(), "Ayşe".into(), "Yılmaz".into(), "İstanbul".into()]),
                text_row(&[2.into(), "Mehmet".into(), "Demir".into(), "Ankara".into()]),
                text_row(&[3.into(), "Elif".into(), "Kaya".into(), "İzmir".into()]),
            ],
        )),
    }
}
