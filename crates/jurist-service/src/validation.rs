//! Field validators shared by the input types.

use std::borrow::Cow;

use validator::ValidationError;

use jurist_entity::lawyer::is_valid_national_id;
use jurist_entity::phone::normalize_phone;

/// Accepts anything [`normalize_phone`] can turn into `+7XXXXXXXXXX`.
pub(crate) fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if normalize_phone(phone).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("phone")
            .with_message(Cow::Borrowed("Phone must be in format +7XXXXXXXXXX")))
    }
}

/// Accepts a 12-digit IIN with a valid checksum.
pub(crate) fn validate_iin(iin: &str) -> Result<(), ValidationError> {
    if is_valid_national_id(iin) {
        Ok(())
    } else {
        Err(ValidationError::new("iin").with_message(Cow::Borrowed("Invalid IIN")))
    }
}

/// Trimmed value, or `None` when blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
