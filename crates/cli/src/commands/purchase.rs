//! Cart and order commands.

use tomato_mall_client::ApiClient;
use tomato_mall_client::models::{CheckoutRequest, OrderInfo};
use tomato_mall_core::{CartItemId, CouponId, OrderId, ProductId};
use tracing::info;

use super::{CliError, require_account};

/// Show the cart.
///
/// # Errors
///
/// Returns `CliError` if the request fails.
pub async fn show_cart(client: &ApiClient) -> Result<(), CliError> {
    let cart = client.cart().list_cart().await?;
    for item in &cart.cart_items {
        info!(
            "  [{}] {} x{} = {}",
            item.cart_item_id,
            item.title.as_deref().unwrap_or("(untitled)"),
            item.quantity,
            item.line_total()
        );
    }
    info!("{} lines, total {}", cart.total, cart.total_amount);
    Ok(())
}

/// Add a product to the cart.
///
/// # Errors
///
/// Returns `CliError` if the request fails.
pub async fn add(client: &ApiClient, product: ProductId, quantity: u32) -> Result<(), CliError> {
    let item = client.cart().add_to_cart(product, quantity).await?;
    info!("Added cart item {} (x{})", item.cart_item_id, item.quantity);
    Ok(())
}

/// Change a cart line's quantity.
///
/// # Errors
///
/// Returns `CliError` if the request fails.
pub async fn update(client: &ApiClient, item: CartItemId, quantity: u32) -> Result<(), CliError> {
    let result = client.cart().update_cart_item(item, quantity).await?;
    info!("{result}");
    Ok(())
}

/// Remove a cart line.
///
/// # Errors
///
/// Returns `CliError` if the request fails.
pub async fn remove(client: &ApiClient, item: CartItemId) -> Result<(), CliError> {
    let result = client.cart().delete_cart_item(item).await?;
    info!("{result}");
    Ok(())
}

/// Check out the given cart lines, optionally applying a coupon by id.
///
/// # Errors
///
/// Returns `CliError` if a request fails.
pub async fn checkout(
    client: &ApiClient,
    items: Vec<CartItemId>,
    order_info: OrderInfo,
    payment_method: String,
    coupon: Option<CouponId>,
) -> Result<(), CliError> {
    let applied = match coupon {
        Some(id) => Some(client.coupons().get_coupon(id).await?.applied()),
        None => None,
    };
    let request = CheckoutRequest {
        cart_item_ids: items,
        order_info,
        payment_method,
    };
    let order = client.cart().checkout(&request, applied).await?;
    info!(
        "Created order {} for {} ({:?})",
        order.order_id, order.total_amount, order.status
    );
    Ok(())
}

/// List the signed-in account's orders.
///
/// # Errors
///
/// Returns `CliError` if logged out or the request fails.
pub async fn list_orders(client: &ApiClient) -> Result<(), CliError> {
    let account = require_account(client)?;
    let orders = client.orders().list_account_orders(account).await?;
    info!("{} orders", orders.len());
    for order in &orders {
        info!(
            "  [{}] {} {:?} {}",
            order.order_id,
            order.total_amount,
            order.status,
            order
                .create_time
                .as_ref()
                .map_or_else(String::new, ToString::to_string)
        );
    }
    Ok(())
}

/// Show an order's lines.
///
/// # Errors
///
/// Returns `CliError` if the request fails.
pub async fn order_items(client: &ApiClient, id: OrderId) -> Result<(), CliError> {
    let items = client.orders().get_order_items(id).await?;
    for item in &items {
        info!("  product {} x{} @ {}", item.product_id, item.quantity, item.price);
    }
    Ok(())
}

/// Start payment; prints the gateway form.
///
/// # Errors
///
/// Returns `CliError` if the request fails.
pub async fn pay(client: &ApiClient, id: OrderId) -> Result<(), CliError> {
    let payment = client.orders().pay_order(id).await?;
    info!(
        "Order {} ({}) via {}. Submit this form in a browser:",
        payment.order_id, payment.total_amount, payment.payment_method
    );
    info!("{}", payment.payment_form);
    Ok(())
}

/// Cancel an unpaid order.
///
/// # Errors
///
/// Returns `CliError` if the request fails.
pub async fn cancel(client: &ApiClient, id: OrderId) -> Result<(), CliError> {
    let result = client.orders().cancel_order(id).await?;
    info!("{result}");
    Ok(())
}
