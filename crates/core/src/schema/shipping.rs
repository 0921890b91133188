//! Shipping addresses ("delivery infos" on the wire).

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::{DeliveryInfoId, UserId};

/// A saved delivery address owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub id: DeliveryInfoId,
    pub name: String,
    pub phone: String,
    pub address: String,
    /// Free-form label such as "Nhà riêng" or "Văn phòng".
    pub tag: String,
    pub user_id: UserId,
}

/// Body of `POST delivery-infos`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateShippingInfo {
    #[validate(length(min = 1, message = "Recipient name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, max = 30, message = "Tag must be 1-30 characters"))]
    pub tag: String,
}

/// Phone numbers are 9-15 digits with an optional leading `+`.
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if (9..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("Invalid phone number".into()))
    }
}
