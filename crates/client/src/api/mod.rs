//! Per-resource API wrappers.
//!
//! Each resource is a borrowed handle on [`ApiClient`] (e.g.
//! `client.products().list_products()`), and every method maps 1:1 onto one
//! backend endpoint.

pub mod accounts;
pub mod advertisements;
pub mod cart;
pub mod coupons;
pub mod images;
pub mod messages;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod shops;

pub use accounts::Accounts;
pub use advertisements::Advertisements;
pub use cart::Cart;
pub use coupons::Coupons;
pub use images::Images;
pub use messages::{Inbox, Messages};
pub use orders::Orders;
pub use products::Products;
pub use reviews::Reviews;
pub use shops::Shops;

use crate::http::ApiClient;

/// API path prefixes.
pub mod paths {
    pub const ACCOUNTS: &str = "/api/accounts";
    pub const PRODUCTS: &str = "/api/products";
    pub const CART: &str = "/api/cart";
    pub const ORDERS: &str = "/api/orders";
    pub const ADVERTISEMENTS: &str = "/api/advertisements";
    pub const SHOPS: &str = "/api/shop";
    pub const MESSAGES: &str = "/api/message";
    pub const REVIEWS: &str = "/api/reviews";
    pub const IMAGES: &str = "/api/image";
    pub const COUPONS: &str = "/api/coupons";
}

/// Percent-encode a free-form path segment such as a username.
pub(crate) fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

impl ApiClient {
    #[must_use]
    pub const fn accounts(&self) -> Accounts<'_> {
        Accounts::new(self)
    }

    #[must_use]
    pub const fn products(&self) -> Products<'_> {
        Products::new(self)
    }

    #[must_use]
    pub const fn cart(&self) -> Cart<'_> {
        Cart::new(self)
    }

    #[must_use]
    pub const fn orders(&self) -> Orders<'_> {
        Orders::new(self)
    }

    #[must_use]
    pub const fn advertisements(&self) -> Advertisements<'_> {
        Advertisements::new(self)
    }

    #[must_use]
    pub const fn shops(&self) -> Shops<'_> {
        Shops::new(self)
    }

    #[must_use]
    pub const fn messages(&self) -> Messages<'_> {
        Messages::new(self)
    }

    #[must_use]
    pub const fn reviews(&self) -> Reviews<'_> {
        Reviews::new(self)
    }

    #[must_use]
    pub const fn images(&self) -> Images<'_> {
        Images::new(self)
    }

    #[must_use]
    pub const fn coupons(&self) -> Coupons<'_> {
        Coupons::new(self)
    }
}
