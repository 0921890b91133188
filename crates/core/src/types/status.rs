//! Status and role enums carried by API payloads.
//!
//! Unknown variants are rejected during deserialization; the backend is
//! expected to send one of the listed values and anything else is treated as
//! a contract violation.

use serde::{Deserialize, Serialize};

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Content and order staff.
    Staff,
    /// Regular shopper or learner.
    Customer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::Staff => write!(f, "STAFF"),
            Self::Customer => write!(f, "CUSTOMER"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "STAFF" => Ok(Self::Staff),
            "CUSTOMER" => Ok(Self::Customer),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Lifecycle of an order on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipping,
    Delivered,
    Cancelled,
}

/// Delivery method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMethod {
    #[default]
    Standard,
    Express,
}

impl std::str::FromStr for DeliveryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STANDARD" => Ok(Self::Standard),
            "EXPRESS" => Ok(Self::Express),
            _ => Err(format!("invalid delivery method: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), "\"CUSTOMER\"");
        let role: Role = serde_json::from_str("\"STAFF\"").unwrap();
        assert_eq!(role, Role::Staff);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(serde_json::from_str::<Role>("\"OWNER\"").is_err());
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_delivery_method_from_str() {
        assert_eq!("express".parse::<DeliveryMethod>().unwrap(), DeliveryMethod::Express);
        assert!("drone".parse::<DeliveryMethod>().is_err());
    }
}
