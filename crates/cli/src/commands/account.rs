//! Login, logout and account inspection.

use secrecy::SecretString;
use tomato_mall_client::models::LoginCredentials;
use tomato_mall_client::{ApiClient, LoginState};
use tracing::info;

use super::CliError;

/// Log in and persist the session.
///
/// # Errors
///
/// Returns `CliError` if the credentials are rejected or the session cannot
/// be stored.
pub async fn login(client: &ApiClient, username: &str, password: SecretString) -> Result<(), CliError> {
    let account = client
        .accounts()
        .sign_in(&LoginCredentials::new(username, password))
        .await?;

    info!(
        "Logged in as {} ({})",
        account.name.as_deref().unwrap_or(&account.username),
        account.role.map_or("unknown role", |role| role.as_str())
    );
    Ok(())
}

/// Forget the stored session.
///
/// # Errors
///
/// Returns `CliError` if the session file cannot be removed.
pub fn logout(client: &ApiClient) -> Result<(), CliError> {
    client.accounts().sign_out()?;
    info!("Logged out");
    Ok(())
}

/// Show the stored login state and, when logged in, the account's role as
/// the backend currently sees it.
///
/// # Errors
///
/// Returns `CliError` if the session cannot be read or the lookup fails.
pub async fn whoami(client: &ApiClient) -> Result<(), CliError> {
    let state = LoginState::from_session(client.session())?;
    let Some(id) = state.account_id.filter(|_| state.is_login) else {
        info!("Not logged in");
        return Ok(());
    };

    let role = client.accounts().get_user_role(id).await?;
    info!("Account {id}");
    info!("  Stored role: {}", state.role.map_or("none", |r| r.as_str()));
    info!("  Server role: {role}");
    if state.role != Some(role) {
        info!("  Roles differ; log in again to refresh the session");
    }
    Ok(())
}
