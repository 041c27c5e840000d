//! Outbound notification contract.
//!
//! Services publish through [`NotificationDispatcher`] after their state
//! change is committed and never wait for delivery. Failures are logged by
//! the caller and never surface to the client.

use async_trait::async_trait;
use tracing::warn;

use jurist_core::result::AppResult;
use jurist_entity::request::Currency;

/// Fire-and-forget notification sink.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync + 'static {
    /// Tell a lawyer their profile was approved.
    async fn send_approval(&self, email: &str, full_name: &str) -> AppResult<()>;

    /// Tell a lawyer their profile was rejected and why.
    async fn send_rejection(&self, email: &str, full_name: &str, reason: &str) -> AppResult<()>;

    /// Confirm a submission to the client.
    async fn send_request_confirmation(
        &self,
        email: &str,
        contact_name: &str,
        request_number: &str,
    ) -> AppResult<()>;

    /// Announce a new request to approved lawyers.
    async fn notify_lawyers_of_new_request(
        &self,
        emails: &[String],
        request_number: &str,
        description: &str,
        budget_label: &str,
    ) -> AppResult<()>;

    /// Announce a new request on the administrator channel.
    async fn notify_admin_of_new_request(
        &self,
        request_number: &str,
        contact_name: &str,
        description: &str,
    ) -> AppResult<()>;

    /// Announce a new lawyer registration on the administrator channel.
    async fn notify_admin_of_new_lawyer(
        &self,
        full_name: &str,
        email: &str,
        category: &str,
    ) -> AppResult<()>;
}

/// Log a failed publish without propagating it.
pub(crate) fn log_failure(what: &str, result: AppResult<()>) {
    if let Err(e) = result {
        warn!(notification = what, error = %e, "Failed to publish notification");
    }
}

/// Budget rendered for humans: thousands separated by a space, then the
/// currency code (`150 000 KZT`).
pub fn budget_label(budget: i64, currency: Currency) -> String {
    let digits = budget.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    let sign = if budget < 0 { "-" } else { "" };
    format!("{sign}{grouped} {}", currency.code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_label_grouping() {
        assert_eq!(budget_label(150_000, Currency::Kzt), "150 000 KZT");
        assert_eq!(budget_label(0, Currency::Usd), "0 USD");
        assert_eq!(budget_label(999, Currency::Rub), "999 RUB");
        assert_eq!(budget_label(1_000, Currency::Kzt), "1 000 KZT");
        assert_eq!(budget_label(12_345_678, Currency::Kzt), "12 345 678 KZT");
    }
}
