//! Request status, currency and contact channel enumerations.

use std::fmt;
use std::str::FromStr;

use jurist_core::AppError;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a client request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Submitted and waiting in the pool.
    New,
    /// Claimed by exactly one lawyer.
    InProgress,
    /// Finished; no longer visible to lawyers.
    Closed,
    /// Marked as junk by an administrator.
    Spam,
}

impl RequestStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 4] = [Self::New, Self::InProgress, Self::Closed, Self::Spam];

    /// Whether a lawyer may claim a request in this state.
    pub fn is_claimable(&self) -> bool {
        matches!(self, Self::New)
    }

    /// Whether lawyer-facing reads may expose this request.
    pub fn is_visible_to_lawyers(&self) -> bool {
        !matches!(self, Self::Closed | Self::Spam)
    }

    /// Whether a request in this state carries an assignee.
    pub fn requires_assignee(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Return the status as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::InProgress => "IN_PROGRESS",
            Self::Closed => "CLOSED",
            Self::Spam => "SPAM",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NEW" => Ok(Self::New),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "CLOSED" => Ok(Self::Closed),
            "SPAM" => Ok(Self::Spam),
            _ => Err(AppError::invalid_field(
                "status",
                format!("Invalid request status: '{s}'. Expected one of: NEW, IN_PROGRESS, CLOSED, SPAM"),
            )),
        }
    }
}

/// Budget currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "currency", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Kazakhstani tenge.
    #[default]
    Kzt,
    /// US dollar.
    Usd,
    /// Russian rouble.
    Rub,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Kzt => "KZT",
            Self::Usd => "USD",
            Self::Rub => "RUB",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The channel a client prefers to be contacted on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "preferred_contact", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PreferredContact {
    /// Phone call or messenger.
    Phone,
    /// E-mail.
    Email,
    /// No preference.
    #[default]
    Any,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("in_progress".parse::<RequestStatus>().unwrap(), RequestStatus::InProgress);
        assert_eq!("SPAM".parse::<RequestStatus>().unwrap(), RequestStatus::Spam);
        assert!("open".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&RequestStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
    }

    #[test]
    fn test_visibility() {
        assert!(RequestStatus::New.is_visible_to_lawyers());
        assert!(RequestStatus::InProgress.is_visible_to_lawyers());
        assert!(!RequestStatus::Closed.is_visible_to_lawyers());
        assert!(!RequestStatus::Spam.is_visible_to_lawyers());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Currency::default(), Currency::Kzt);
        assert_eq!(PreferredContact::default(), PreferredContact::Any);
    }
}
