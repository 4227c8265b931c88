//! Client view lookup.

use tomato_mall_client::routes::{self, Authorization};
use tomato_mall_client::{ApiClient, LoginState};
use tracing::info;

use super::CliError;

/// Resolve a view path and check whether the current session may open it.
///
/// # Errors
///
/// Returns `CliError` if the session cannot be read.
pub fn check(client: &ApiClient, path: &str) -> Result<(), CliError> {
    let Some(matched) = routes::resolve(path) else {
        info!("{path}: no such view");
        return Ok(());
    };

    let state = LoginState::from_session(client.session())?;
    let verdict = match routes::authorize(matched.route, &state) {
        Authorization::Allowed => "allowed",
        Authorization::RedirectToLogin => "login required",
        Authorization::Forbidden => "forbidden for this role",
    };

    info!(
        "{path} -> {} ({}): {verdict}",
        matched.route.name,
        matched.route.title.unwrap_or("untitled")
    );
    for (name, value) in &matched.params {
        info!("  {name} = {value}");
    }
    Ok(())
}
