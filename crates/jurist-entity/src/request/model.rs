//! Request entity model.

use chrono::{DateTime, Utc};
use jurist_core::types::{LawyerId, RequestId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::{Currency, PreferredContact, RequestStatus};

/// A legal service inquiry submitted by an anonymous client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Unique request identifier.
    pub id: RequestId,
    /// Human-readable number (`REQ-YYYYMMDD-NNNN`).
    pub request_number: String,
    /// Free-text description of the legal problem.
    pub description: String,
    /// Budget in whole currency units.
    pub budget: i64,
    /// Budget currency.
    pub currency: Currency,
    /// Client's name.
    pub contact_name: String,
    /// Client phone in `+7XXXXXXXXXX` form.
    pub phone: String,
    /// Client e-mail (optional).
    pub email: Option<String>,
    /// Preferred contact channel.
    pub preferred_contact: PreferredContact,
    /// Current lifecycle state.
    pub status: RequestStatus,
    /// The lawyer working on the request. Set iff status is `IN_PROGRESS`.
    pub assigned_lawyer_id: Option<LawyerId>,
    /// When the current assignee claimed it.
    pub assigned_at: Option<DateTime<Utc>>,
    /// Submitter's IP address.
    pub ip_address: String,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
    /// When the request was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Request {
    /// Whether a lawyer can claim this request right now.
    pub fn is_claimable(&self) -> bool {
        self.status.is_claimable() && self.assigned_lawyer_id.is_none()
    }

    /// Whether `lawyer_id` is the current assignee.
    pub fn is_assigned_to(&self, lawyer_id: LawyerId) -> bool {
        self.assigned_lawyer_id == Some(lawyer_id)
    }

    /// Project the request into the pool listing view, without contact data.
    pub fn summary(&self) -> RequestSummary {
        RequestSummary {
            id: self.id,
            request_number: self.request_number.clone(),
            description: self.description.clone(),
            budget: self.budget,
            currency: self.currency,
            preferred_contact: self.preferred_contact,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Pool listing projection of a [`Request`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSummary {
    /// Unique request identifier.
    pub id: RequestId,
    /// Human-readable number.
    pub request_number: String,
    /// Problem description.
    pub description: String,
    /// Budget in whole currency units.
    pub budget: i64,
    /// Budget currency.
    pub currency: Currency,
    /// Preferred contact channel.
    pub preferred_contact: PreferredContact,
    /// Lifecycle state.
    pub status: RequestStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

/// Validated data for a new request. The number is allocated at insert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRequest {
    /// Problem description.
    pub description: String,
    /// Budget in whole currency units.
    pub budget: i64,
    /// Budget currency.
    pub currency: Currency,
    /// Client's name.
    pub contact_name: String,
    /// Normalized phone.
    pub phone: String,
    /// Client e-mail.
    pub email: Option<String>,
    /// Preferred contact channel.
    pub preferred_contact: PreferredContact,
    /// Submitter's IP address.
    pub ip_address: String,
}
