//! Role and status enums shared by the API records.
//!
//! Wire spellings follow the backend exactly, including the lower-case
//! `admin` role.

use serde::{Deserialize, Serialize};

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Ordinary shopper.
    #[serde(rename = "CUSTOMER")]
    Customer,
    /// Employee of a shop.
    #[serde(rename = "STAFF")]
    Staff,
    /// Shop owner.
    #[serde(rename = "SHOPKEEPER")]
    Shopkeeper,
    /// Platform administrator.
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// The exact string the backend uses for this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Staff => "STAFF",
            Self::Shopkeeper => "SHOPKEEPER",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the backend's role names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid role: {input:?}")]
pub struct ParseRoleError {
    /// The rejected input.
    pub input: String,
}

impl std::str::FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CUSTOMER" => Ok(Self::Customer),
            "STAFF" => Ok(Self::Staff),
            "SHOPKEEPER" => Ok(Self::Shopkeeper),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Order payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Success,
    Failed,
    /// Any status this client does not know about yet.
    #[serde(other)]
    Unknown,
}

/// Kind of in-app notification message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    NewEmployeeApplication,
    NewStoreApplication,
    LowInventory,
    ApplicationApproved,
    ApplicationRejected,
    YouAreFired,
}

impl MessageType {
    /// Short human-readable description.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::NewEmployeeApplication => "new employee application",
            Self::NewStoreApplication => "new store application",
            Self::LowInventory => "low inventory",
            Self::ApplicationApproved => "application approved",
            Self::ApplicationRejected => "application rejected",
            Self::YouAreFired => "employment ended",
        }
    }
}

/// What a review is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewType {
    Product,
    Shop,
}

/// How a coupon's `discountValue` is applied.
///
/// Sent on the wire as the integers `1` and `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum DiscountType {
    /// `discountValue` is a percentage off.
    Percentage,
    /// `discountValue` is a fixed amount off.
    FixedAmount,
}

impl TryFrom<i32> for DiscountType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Percentage),
            2 => Ok(Self::FixedAmount),
            other => Err(format!("invalid discount type: {other}")),
        }
    }
}

impl From<DiscountType> for i32 {
    fn from(value: DiscountType) -> Self {
        match value {
            DiscountType::Percentage => 1,
            DiscountType::FixedAmount => 2,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Role::Shopkeeper).unwrap(),
            "\"SHOPKEEPER\""
        );
        let role: Role = serde_json::from_str("\"STAFF\"").unwrap();
        assert_eq!(role, Role::Staff);
    }

    #[test]
    fn test_role_from_str_is_case_sensitive() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("ADMIN".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_parse_error_keeps_input() {
        let err = "SUPERUSER".parse::<Role>().unwrap_err();
        assert_eq!(err, ParseRoleError { input: "SUPERUSER".to_string() });
        assert_eq!(err.to_string(), "invalid role: \"SUPERUSER\"");
    }

    #[test]
    fn test_role_display_round_trips_from_str() {
        for role in [Role::Customer, Role::Staff, Role::Shopkeeper, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_payment_status_tolerates_unknown_values() {
        let status: PaymentStatus = serde_json::from_str("\"SUCCESS\"").unwrap();
        assert_eq!(status, PaymentStatus::Success);

        let status: PaymentStatus = serde_json::from_str("\"REFUNDED\"").unwrap();
        assert_eq!(status, PaymentStatus::Unknown);
    }

    #[test]
    fn test_message_type_wire_names() {
        let kind: MessageType = serde_json::from_str("\"YOU_ARE_FIRED\"").unwrap();
        assert_eq!(kind, MessageType::YouAreFired);
        assert_eq!(
            serde_json::to_string(&MessageType::LowInventory).unwrap(),
            "\"LOW_INVENTORY\""
        );
    }

    #[test]
    fn test_discount_type_is_numeric_on_the_wire() {
        assert_eq!(serde_json::to_string(&DiscountType::FixedAmount).unwrap(), "2");
        let kind: DiscountType = serde_json::from_str("1").unwrap();
        assert_eq!(kind, DiscountType::Percentage);
        assert!(serde_json::from_str::<DiscountType>("3").is_err());
    }
}
