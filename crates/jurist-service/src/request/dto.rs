//! Request intake input.

use serde::{Deserialize, Serialize};
use validator::Validate;

use jurist_entity::phone::normalize_phone;
use jurist_entity::request::{Currency, NewRequest, PreferredContact};

use crate::validation::{non_blank, validate_phone};

/// A client submission as received from the public form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    /// Problem description.
    #[validate(length(
        min = 50,
        max = 2000,
        message = "Description must be between 50 and 2000 characters"
    ))]
    pub description: String,
    /// Budget in whole currency units.
    #[validate(range(min = 0, message = "Budget must not be negative"))]
    pub budget: i64,
    /// Budget currency.
    #[serde(default)]
    pub currency: Currency,
    /// Client's name.
    #[validate(length(min = 2, max = 100, message = "Contact name must be between 2 and 100 characters"))]
    pub contact_name: String,
    /// Client phone, in any form [`normalize_phone`] accepts.
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    /// Optional client e-mail.
    #[serde(default)]
    #[validate(email(message = "Invalid e-mail address"))]
    pub email: Option<String>,
    /// Preferred contact channel.
    #[serde(default)]
    pub preferred_contact: PreferredContact,
}

impl SubmitRequest {
    /// Trim free-text fields and drop a blank e-mail.
    pub(crate) fn normalized(mut self) -> Self {
        self.contact_name = self.contact_name.trim().to_string();
        self.email = non_blank(self.email).map(|e| e.to_lowercase());
        self
    }

    /// Convert validated input into a store insert.
    pub(crate) fn into_new_request(self, ip_address: &str) -> NewRequest {
        let phone = normalize_phone(&self.phone).unwrap_or(self.phone);
        NewRequest {
            description: self.description,
            budget: self.budget,
            currency: self.currency,
            contact_name: self.contact_name,
            phone,
            email: self.email,
            preferred_contact: self.preferred_contact,
            ip_address: ip_address.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SubmitRequest {
        SubmitRequest {
            description: "x".repeat(50),
            budget: 150_000,
            currency: Currency::Kzt,
            contact_name: "Dana".to_string(),
            phone: "8 (701) 123-45-67".to_string(),
            email: Some("  ".to_string()),
            preferred_contact: PreferredContact::Any,
        }
    }

    #[test]
    fn test_blank_email_is_dropped_and_phone_normalized() {
        let input = sample().normalized();
        assert!(input.validate().is_ok());
        let new = input.into_new_request("10.0.0.1");
        assert_eq!(new.email, None);
        assert_eq!(new.phone, "+77011234567");
    }

    #[test]
    fn test_field_errors_are_reported() {
        let input = SubmitRequest {
            description: "too short".to_string(),
            phone: "12345".to_string(),
            ..sample()
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("description"));
        assert!(fields.contains_key("phone"));
    }

    #[test]
    fn test_defaults_on_deserialize() {
        let input: SubmitRequest = serde_json::from_value(serde_json::json!({
            "description": "d",
            "budget": 10,
            "contactName": "Dana",
            "phone": "+77011234567"
        }))
        .unwrap();
        assert_eq!(input.currency, Currency::Kzt);
        assert_eq!(input.preferred_contact, PreferredContact::Any);
    }
}
