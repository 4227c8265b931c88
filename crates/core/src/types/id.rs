//! Newtype IDs for type-safe entity references.
//!
//! The backend keys every record with a 32-bit integer. Use the `define_id!`
//! macro to create wrappers that keep a `ProductId` from being passed where a
//! `CartItemId` is expected.

/// Error returned when an ID cannot be parsed from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {input:?}")]
pub struct ParseIdError {
    /// Name of the ID type that failed to parse.
    pub kind: &'static str,
    /// The rejected input.
    pub input: String,
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>`, `Into<i32>` and `FromStr` implementations
///
/// # Example
///
/// ```rust
/// # use tomato_mall_core::define_id;
/// define_id!(WarehouseId);
/// define_id!(BinId);
///
/// let warehouse = WarehouseId::new(1);
/// let bin: BinId = "7".parse().unwrap();
///
/// // These are different types, so this won't compile:
/// // let _: WarehouseId = bin;
/// # assert_eq!(warehouse.as_i32(), 1);
/// # assert_eq!(bin.as_i32(), 7);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::ParseIdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim()
                    .parse::<i32>()
                    .map(Self)
                    .map_err(|_| $crate::types::id::ParseIdError {
                        kind: stringify!($name),
                        input: s.to_owned(),
                    })
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Accounts and storefront entities
define_id!(AccountId);
define_id!(ShopId);
define_id!(ProductId);
define_id!(SpecificationId);
define_id!(StockpileId);
define_id!(AdvertisementId);

// Purchasing
define_id!(CartItemId);
define_id!(OrderId);
define_id!(OrderItemId);
define_id!(CouponId);
define_id!(AccountCouponId);

// Social
define_id!(MessageId);
define_id!(ReviewId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_bare_integer() {
        let id = ProductId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let parsed: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_from_str_trims_whitespace() {
        let id: OrderId = " 17 ".parse().unwrap();
        assert_eq!(id.as_i32(), 17);
    }

    #[test]
    fn test_id_from_str_rejects_garbage() {
        let err = "abc".parse::<ShopId>().unwrap_err();
        assert_eq!(err.kind, "ShopId");
        assert_eq!(err.to_string(), "invalid ShopId: \"abc\"");
    }

    #[test]
    fn test_id_display_matches_path_segment() {
        assert_eq!(format!("/api/orders/{}", OrderId::new(9)), "/api/orders/9");
    }

    #[test]
    fn test_id_conversions() {
        let id = AccountId::from(5);
        let raw: i32 = id.into();
        assert_eq!(raw, 5);
    }
}
