//! Products, shops, coupons and uploads.

use std::path::Path;

use tomato_mall_client::ApiClient;
use tomato_mall_client::models::AccountCoupon;
use tomato_mall_core::{CouponId, ProductId, ShopId};
use tracing::info;

use super::{CliError, require_account};

/// List every product.
///
/// # Errors
///
/// Returns `CliError` if the request fails.
pub async fn list_products(client: &ApiClient, shop: Option<ShopId>) -> Result<(), CliError> {
    let products = match shop {
        Some(shop) => client.products().list_shop_products(shop).await?,
        None => client.products().list_products().await?,
    };

    info!("{} products", products.len());
    for product in &products {
        info!(
            "  [{}] {} {}",
            product.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            product.title,
            product.price
        );
    }
    Ok(())
}

/// Show one product with its specifications and stock.
///
/// # Errors
///
/// Returns `CliError` if a request fails.
pub async fn show_product(client: &ApiClient, id: ProductId) -> Result<(), CliError> {
    let products = client.products();
    let (product, stock) = tokio::try_join!(products.get_product(id), products.get_stockpile(id))?;

    info!("{} ({})", product.title, product.price);
    if let Some(description) = &product.description {
        info!("  {description}");
    }
    for spec in &product.specifications {
        info!("  {}: {}", spec.item, spec.value);
    }
    info!(
        "  Stock: {} available ({} reserved)",
        stock.available(),
        stock.frozen
    );
    Ok(())
}

/// List shops.
///
/// # Errors
///
/// Returns `CliError` if the request fails.
pub async fn list_shops(client: &ApiClient) -> Result<(), CliError> {
    let shops = client.shops().list_shops().await?;
    info!("{} shops", shops.len());
    for shop in &shops {
        info!(
            "  [{}] {}{}",
            shop.shop_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            shop.name,
            if shop.is_approved() { "" } else { " (pending)" }
        );
    }
    Ok(())
}

/// List coupons on offer, or the ones the signed-in account holds.
///
/// # Errors
///
/// Returns `CliError` if the request fails or `mine` is set while logged out.
pub async fn list_coupons(client: &ApiClient, mine: bool) -> Result<(), CliError> {
    if mine {
        let account = require_account(client)?;
        let held = client.coupons().list_account_coupons(account).await?;
        info!("{} coupon kinds held", held.len());
        for relation in &held {
            info!("  coupon {} x{}", relation.coupon_id, relation.quantity);
        }
        return Ok(());
    }

    let coupons = client.coupons().list_coupons().await?;
    info!("{} coupons", coupons.len());
    for coupon in &coupons {
        info!(
            "  [{}] {} ({} left)",
            coupon.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            coupon.name,
            coupon.remaining()
        );
    }
    Ok(())
}

/// Claim coupons for the signed-in account.
///
/// # Errors
///
/// Returns `CliError` if logged out or the request fails.
pub async fn receive_coupon(client: &ApiClient, coupon: CouponId, quantity: i32) -> Result<(), CliError> {
    let account_id = require_account(client)?;
    let result = client
        .coupons()
        .receive_coupon(&AccountCoupon {
            id: None,
            account_id,
            coupon_id: coupon,
            quantity,
        })
        .await?;
    info!("{result}");
    Ok(())
}

/// Upload an image file and print its URL.
///
/// # Errors
///
/// Returns `CliError` if the file cannot be read or the upload fails.
pub async fn upload(client: &ApiClient, path: &Path, avatar: bool) -> Result<(), CliError> {
    let url = if avatar {
        let bytes = tokio::fs::read(path).await.map_err(tomato_mall_client::ApiError::from)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("avatar")
            .to_string();
        let form = tomato_mall_client::api::images::image_form(bytes, name)?;
        client.accounts().upload_avatar(form).await?
    } else {
        client.images().upload_image_file(path).await?
    };
    info!("{url}");
    Ok(())
}
