//! In-app message endpoints and inbox loading.

use tomato_mall_core::{AccountId, MessageId};
use tracing::{debug, instrument};

use super::paths;
use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};
use crate::models::Message;

/// `/api/message` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Messages<'a> {
    client: &'a ApiClient,
}

/// Unread count plus received and sent messages for one account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inbox {
    pub unread_count: u64,
    pub received: Vec<Message>,
    pub sent: Vec<Message>,
}

impl Inbox {
    /// Received messages not yet read.
    pub fn unread(&self) -> impl Iterator<Item = &Message> {
        self.received.iter().filter(|m| !m.is_read())
    }
}

impl<'a> Messages<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /api/message/send`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn send_message(&self, message: &Message) -> Result<String> {
        self.client
            .post(&format!("{}/send", paths::MESSAGES), message)
            .await
    }

    /// `GET /api/message/received-list/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list_received(&self, account: AccountId) -> Result<Vec<Message>> {
        self.client
            .get(&format!("{}/received-list/{account}", paths::MESSAGES))
            .await
    }

    /// `GET /api/message/sent-list/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn list_sent(&self, account: AccountId) -> Result<Vec<Message>> {
        self.client
            .get(&format!("{}/sent-list/{account}", paths::MESSAGES))
            .await
    }

    /// `PUT /api/message/mark-read/{id}` (no body).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn mark_read(&self, id: MessageId) -> Result<String> {
        self.client
            .call(ApiRequest::put(format!("{}/mark-read/{id}", paths::MESSAGES)))
            .await
    }

    /// `DELETE /api/message/delete/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn delete_message(&self, id: MessageId) -> Result<String> {
        self.client
            .delete(&format!("{}/delete/{id}", paths::MESSAGES))
            .await
    }

    /// `GET /api/message/unread-count/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn unread_count(&self, account: AccountId) -> Result<u64> {
        self.client
            .get(&format!("{}/unread-count/{account}", paths::MESSAGES))
            .await
    }

    /// `GET /api/message/query?fromUserId=&content=`: how many messages with
    /// this content the account has already sent.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn query_message_count(&self, from: AccountId, content: &str) -> Result<i32> {
        self.client
            .call(
                ApiRequest::get(format!("{}/query", paths::MESSAGES))
                    .query("fromUserId", from)
                    .query("content", content),
            )
            .await
    }

    /// Load the inbox of `account`, fetching all three parts concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first `ApiError` in the order unread count, received,
    /// sent. All three requests finish before this returns.
    #[instrument(skip(self))]
    pub async fn load_inbox_for(&self, account: AccountId) -> Result<Inbox> {
        let (unread_count, received, sent) = tokio::join!(
            self.unread_count(account),
            self.list_received(account),
            self.list_sent(account),
        );
        let (unread_count, received, sent) = (unread_count?, received?, sent?);
        debug!(unread_count, received = received.len(), sent = sent.len(), "Loaded inbox");
        Ok(Inbox {
            unread_count,
            received,
            sent,
        })
    }

    /// Load the inbox of the signed-in account. Without a stored account id
    /// this returns an empty inbox and sends nothing.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the session cannot be read or a request fails.
    pub async fn load_inbox(&self) -> Result<Inbox> {
        match self.client.session().account_id()? {
            Some(account) => self.load_inbox_for(account).await,
            None => Ok(Inbox::default()),
        }
    }
}
