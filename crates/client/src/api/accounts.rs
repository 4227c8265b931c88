//! Account endpoints and the sign-in flow.

use reqwest::multipart::Form;
use tomato_mall_core::{AccountId, Role};
use tracing::{info, instrument};

use super::{paths, segment};
use crate::error::{ApiError, Result};
use crate::http::ApiClient;
use crate::models::{Account, LoginCredentials};

/// `/api/accounts` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Accounts<'a> {
    client: &'a ApiClient,
}

impl<'a> Accounts<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/accounts/{username}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn get_user_details(&self, username: &str) -> Result<Account> {
        self.client
            .get(&format!("{}/{}", paths::ACCOUNTS, segment(username)))
            .await
    }

    /// `POST /api/accounts` (registration).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn create_account(&self, account: &Account) -> Result<String> {
        self.client.post(paths::ACCOUNTS, account).await
    }

    /// `POST /api/accounts/login`. Returns the session token; does not store it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<String> {
        self.client
            .post(&format!("{}/login", paths::ACCOUNTS), credentials)
            .await
    }

    /// `PUT /api/accounts`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn update_account(&self, account: &Account) -> Result<String> {
        self.client.put(paths::ACCOUNTS, account).await
    }

    /// `PUT /api/accounts/role/{id}` with the role as a JSON string body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn update_user_role(&self, id: AccountId, role: Role) -> Result<String> {
        self.client
            .put(&format!("{}/role/{id}", paths::ACCOUNTS), &role)
            .await
    }

    /// `GET /api/accounts/role/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn get_user_role(&self, id: AccountId) -> Result<Role> {
        self.client
            .get(&format!("{}/role/{id}", paths::ACCOUNTS))
            .await
    }

    /// `POST /api/accounts/image` (multipart field `file`). Returns the URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn upload_avatar(&self, form: Form) -> Result<String> {
        self.client
            .post_multipart(&format!("{}/image", paths::ACCOUNTS), form)
            .await
    }

    /// Log in and store the session.
    ///
    /// The token is stored first so the account lookup is authenticated, then
    /// the role and id from that account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if a request fails, `ApiError::InvalidRequest` if the
    /// account has no id or role, or `ApiError::Session` if the store fails.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn sign_in(&self, credentials: &LoginCredentials) -> Result<Account> {
        let token = self.login(credentials).await?;
        let session = self.client.session();
        session.clear()?;
        session.set_token(&token)?;

        let account = match self.get_user_details(&credentials.username).await {
            Ok(account) => account,
            Err(e) => {
                session.clear()?;
                return Err(e);
            }
        };

        let (Some(id), Some(role)) = (account.id, account.role) else {
            session.clear()?;
            return Err(ApiError::InvalidRequest(format!(
                "account {} has no id or role",
                account.username
            )));
        };

        session.establish(&token, role, id)?;
        info!(account_id = %id, role = %role, "Signed in");
        Ok(account)
    }

    /// Forget the stored session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Session` if the store cannot be cleared.
    pub fn sign_out(&self) -> Result<()> {
        self.client.session().clear()?;
        info!("Signed out");
        Ok(())
    }
}
