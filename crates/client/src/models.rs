//! Request and response records for the TomatoMall REST API.
//!
//! Field names follow the backend's camelCase JSON. Server-assigned IDs are
//! `Option` so the same record can be sent for creation (no id) and received
//! back. Records are passed through as-is; the client does not validate them.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tomato_mall_core::{
    AccountCouponId, AccountId, AdvertisementId, CartItemId, CouponId, DiscountType, MessageId,
    MessageType, OrderId, OrderItemId, PaymentStatus, Price, ProductId, ReviewId, ReviewType, Role,
    ShopId, SpecificationId, StockpileId, Timestamp,
};

// =============================================================================
// Accounts
// =============================================================================

/// A user account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AccountId>,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
    /// Only sent when creating or changing a password; the backend may echo
    /// a hash back.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "secret_serde::optional"
    )]
    pub password: Option<SecretString>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Shop a staff member works for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<ShopId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_valid_staff: Option<i32>,
}

/// Username/password pair for `POST /api/accounts/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub username: String,
    #[serde(serialize_with = "secret_serde::serialize")]
    pub password: SecretString,
}

impl LoginCredentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

// =============================================================================
// Products
// =============================================================================

/// A product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default, alias = "details")]
    pub detail: Option<String>,
    #[serde(default)]
    pub shop_id: Option<ShopId>,
    #[serde(default, alias = "specification")]
    pub specifications: Vec<Specification>,
}

/// One `item: value` attribute of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SpecificationId>,
    pub item: String,
    pub value: String,
    #[serde(default)]
    pub product_id: Option<ProductId>,
}

/// Inventory of a product. `frozen` units are reserved by unpaid orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stockpile {
    pub id: StockpileId,
    #[serde(rename = "product_id", alias = "productId")]
    pub product_id: ProductId,
    pub amount: i32,
    #[serde(default)]
    pub frozen: i32,
}

impl Stockpile {
    /// Units not reserved by pending orders.
    #[must_use]
    pub const fn available(&self) -> i32 {
        self.amount.saturating_sub(self.frozen)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// One line of the shopping cart, with product details joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub cart_item_id: CartItemId,
    #[serde(default, alias = "accountId")]
    pub user_id: Option<AccountId>,
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl CartItem {
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.line_total(self.quantity)
    }
}

/// Cart contents as returned by `GET /api/cart`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartList {
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
    /// Number of lines.
    #[serde(default)]
    pub total: i32,
    #[serde(default)]
    pub total_amount: Price,
}

/// Body of `POST /api/cart`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddToCart {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Body of `PATCH /api/cart/{id}`.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct QuantityUpdate {
    pub quantity: u32,
}

// =============================================================================
// Orders
// =============================================================================

/// Shipping contact for an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderInfo {
    pub name: String,
    pub location: String,
    pub telephone: String,
    pub email: String,
}

/// Body of `POST /api/cart/checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub cart_item_ids: Vec<CartItemId>,
    pub order_info: OrderInfo,
    pub payment_method: String,
}

/// Coupon applied at checkout, sent as `couponType` / `couponValue` query
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedCoupon {
    pub discount_type: DiscountType,
    pub value: f64,
}

/// An order header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub account_id: AccountId,
    pub total_amount: Price,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub create_time: Option<Timestamp>,
}

/// One product line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub order_item_id: Option<OrderItemId>,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Price,
}

/// Result of `POST /api/orders/{id}/pay`: an HTML form that submits to the
/// payment gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    pub payment_form: String,
    pub order_id: OrderId,
    pub total_amount: Price,
    pub payment_method: String,
}

/// Body of the order pay/cancel calls.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderRef {
    pub order_id: OrderId,
}

// =============================================================================
// Advertisements
// =============================================================================

/// A banner advertisement linking to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AdvertisementId>,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(alias = "image_url")]
    pub img_url: String,
    #[serde(alias = "product_id")]
    pub product_id: ProductId,
}

// =============================================================================
// Shops
// =============================================================================

/// A shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<ShopId>,
    pub name: String,
    #[serde(default, alias = "owner_id")]
    pub owner_id: Option<AccountId>,
    #[serde(default, alias = "icon_url")]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    /// `1` once approved by an administrator.
    #[serde(default)]
    pub is_valid: Option<i32>,
}

impl Shop {
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.is_valid == Some(1)
    }
}

// =============================================================================
// Messages
// =============================================================================

/// An in-app notification between accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MessageId>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub message_type: Option<MessageType>,
    #[serde(default)]
    pub is_read: Option<bool>,
    pub from_user: AccountId,
    pub to_user: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<Timestamp>,
}

impl Message {
    /// Whether the message has been read. Unknown counts as unread.
    #[must_use]
    pub fn is_read(&self) -> bool {
        self.is_read.unwrap_or(false)
    }
}

// =============================================================================
// Reviews
// =============================================================================

/// A product or shop review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ReviewId>,
    pub account_id: AccountId,
    pub content: String,
    pub rate: f64,
    #[serde(rename = "type")]
    pub review_type: ReviewType,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub shop_id: Option<ShopId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
}

// =============================================================================
// Coupons
// =============================================================================

/// A coupon template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CouponId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    #[serde(default)]
    pub start_time: Option<Timestamp>,
    #[serde(default)]
    pub end_time: Option<Timestamp>,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub used_quantity: i32,
    #[serde(default)]
    pub is_valid: Option<i32>,
}

impl Coupon {
    /// Coupons still available to receive.
    #[must_use]
    pub const fn remaining(&self) -> i32 {
        self.quantity.saturating_sub(self.used_quantity)
    }

    /// The query form of this coupon for checkout.
    #[must_use]
    pub const fn applied(&self) -> AppliedCoupon {
        AppliedCoupon {
            discount_type: self.discount_type,
            value: self.discount_value,
        }
    }
}

/// How many of a coupon an account holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCoupon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AccountCouponId>,
    pub account_id: AccountId,
    pub coupon_id: CouponId,
    #[serde(default)]
    pub quantity: i32,
}

// =============================================================================
// Secret (de)serialization
// =============================================================================

mod secret_serde {
    use secrecy::{ExposeSecret, SecretString};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(secret.expose_secret())
    }

    pub mod optional {
        use secrecy::{ExposeSecret, SecretString};
        use serde::{Deserialize, Deserializer, Serializer};

        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(
            secret: &Option<SecretString>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match secret {
                Some(secret) => serializer.serialize_some(secret.expose_secret()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<SecretString>, D::Error> {
            Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_account_password_is_sent_but_not_debugged() {
        let account = Account {
            username: "tomato".to_string(),
            password: Some(SecretString::from("hunter2")),
            role: Some(Role::Customer),
            ..Account::default()
        };
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["password"], "hunter2");
        assert_eq!(value["role"], "CUSTOMER");
        assert!(value.get("id").is_none());
        assert!(!format!("{account:?}").contains("hunter2"));
    }

    #[test]
    fn test_account_deserializes_without_password() {
        let account: Account = serde_json::from_value(json!({
            "id": 3,
            "username": "tomato",
            "name": "Tom",
            "role": "admin",
            "avatar": null
        }))
        .unwrap();
        assert_eq!(account.id, Some(AccountId::new(3)));
        assert_eq!(account.role, Some(Role::Admin));
        assert!(account.password.is_none());
    }

    #[test]
    fn test_login_credentials_body() {
        let creds = LoginCredentials::new("tomato", SecretString::from("pw"));
        assert_eq!(
            serde_json::to_value(&creds).unwrap(),
            json!({"username": "tomato", "password": "pw"})
        );
        assert_eq!(creds.password.expose_secret(), "pw");
    }

    #[test]
    fn test_product_accepts_both_specification_spellings() {
        let a: Product = serde_json::from_value(json!({
            "id": 1, "title": "Book", "price": 12.5, "shopId": 2,
            "specifications": [{"id": 1, "item": "author", "value": "X", "productId": 1}]
        }))
        .unwrap();
        let b: Product = serde_json::from_value(json!({
            "id": 1, "title": "Book", "price": 12.5, "shopId": 2,
            "specification": [{"id": 1, "item": "author", "value": "X", "productId": 1}]
        }))
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.price, Price::from_fen(1250));

        let out = serde_json::to_value(&a).unwrap();
        assert!(out.get("specifications").is_some());
        assert!(out.get("specification").is_none());
    }

    #[test]
    fn test_shop_accepts_id_or_shop_id() {
        let a: Shop = serde_json::from_value(json!({"shopId": 4, "name": "S", "ownerId": 9}))
            .unwrap();
        let b: Shop =
            serde_json::from_value(json!({"id": 4, "name": "S", "owner_id": 9})).unwrap();
        assert_eq!(a.shop_id, Some(ShopId::new(4)));
        assert_eq!(a, b);
        assert_eq!(serde_json::to_value(&a).unwrap()["shopId"], 4);
    }

    #[test]
    fn test_stockpile_uses_snake_case_product_id() {
        let stock: Stockpile =
            serde_json::from_value(json!({"id": 1, "product_id": 5, "amount": 10, "frozen": 3}))
                .unwrap();
        assert_eq!(stock.product_id, ProductId::new(5));
        assert_eq!(stock.available(), 7);
        assert_eq!(serde_json::to_value(stock).unwrap()["product_id"], 5);
    }

    #[test]
    fn test_cart_list_and_line_total() {
        let cart: CartList = serde_json::from_value(json!({
            "cartItems": [{
                "cartItemId": 1, "userId": 2, "productId": 3, "quantity": 2,
                "title": "Pen", "price": 1.5
            }],
            "total": 1,
            "totalAmount": 3.0
        }))
        .unwrap();
        assert_eq!(cart.cart_items.len(), 1);
        assert_eq!(cart.cart_items[0].line_total(), Price::from_fen(300));
        assert_eq!(cart.total_amount, Price::from_fen(300));
    }

    #[test]
    fn test_order_with_epoch_create_time() {
        let order: Order = serde_json::from_value(json!({
            "orderId": 8, "accountId": 2, "totalAmount": 99,
            "paymentMethod": "Alipay", "status": "PENDING",
            "createTime": 1_743_503_400_000_i64
        }))
        .unwrap();
        assert_eq!(order.status, PaymentStatus::Pending);
        assert_eq!(order.total_amount, Price::from_fen(9900));
        assert_eq!(
            order.create_time.unwrap().to_string(),
            "2025-04-01 10:30:00"
        );
    }

    #[test]
    fn test_checkout_request_body() {
        let req = CheckoutRequest {
            cart_item_ids: vec![CartItemId::new(1), CartItemId::new(2)],
            order_info: OrderInfo {
                name: "Tom".to_string(),
                location: "Nanjing".to_string(),
                telephone: "13800000000".to_string(),
                email: "tom@example.com".to_string(),
            },
            payment_method: "Alipay".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["cartItemIds"], json!([1, 2]));
        assert_eq!(value["orderInfo"]["location"], "Nanjing");
        assert_eq!(value["paymentMethod"], "Alipay");
    }

    #[test]
    fn test_review_type_field() {
        let review: Review = serde_json::from_value(json!({
            "id": 1, "accountId": 2, "content": "good", "rate": 4.5,
            "type": "SHOP", "shopId": 3, "createdAt": "2025-04-01T10:30:00"
        }))
        .unwrap();
        assert_eq!(review.review_type, ReviewType::Shop);
        assert_eq!(review.shop_id, Some(ShopId::new(3)));
        assert_eq!(serde_json::to_value(&review).unwrap()["type"], "SHOP");
    }

    #[test]
    fn test_coupon_remaining_and_applied() {
        let coupon: Coupon = serde_json::from_value(json!({
            "id": 1, "name": "Spring", "discountType": 2, "discountValue": 10.0,
            "quantity": 100, "usedQuantity": 40, "isValid": 1
        }))
        .unwrap();
        assert_eq!(coupon.remaining(), 60);
        assert_eq!(coupon.applied().discount_type, DiscountType::FixedAmount);
    }

    #[test]
    fn test_message_read_flag_defaults_to_unread() {
        let message: Message = serde_json::from_value(json!({
            "id": 1, "content": "hi", "messageType": "LOW_INVENTORY",
            "fromUser": 1, "toUser": 2
        }))
        .unwrap();
        assert!(!message.is_read());
        assert_eq!(message.message_type, Some(MessageType::LowInventory));
    }
}
