//! Message commands.

use tomato_mall_client::ApiClient;
use tomato_mall_core::MessageId;
use tracing::info;

use super::{CliError, require_account};

/// Show the signed-in account's inbox.
///
/// # Errors
///
/// Returns `CliError` if logged out or a request fails.
pub async fn show(client: &ApiClient) -> Result<(), CliError> {
    require_account(client)?;
    let inbox = client.messages().load_inbox().await?;

    info!("{} unread", inbox.unread_count);
    for message in &inbox.received {
        info!(
            "  {} [{}] from {}: {}",
            if message.is_read() { " " } else { "*" },
            message.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            message.from_user,
            message
                .message_type
                .map_or(message.content.as_str(), |kind| kind.describe())
        );
    }
    info!("{} sent", inbox.sent.len());
    Ok(())
}

/// Mark a message read.
///
/// # Errors
///
/// Returns `CliError` if the request fails.
pub async fn mark_read(client: &ApiClient, id: MessageId) -> Result<(), CliError> {
    let result = client.messages().mark_read(id).await?;
    info!("{result}");
    Ok(())
}
