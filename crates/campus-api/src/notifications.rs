// Notification endpoints
//
// User-to-user messages: send, list, mark read, unread count. The send
// endpoint takes its parameters in the query string, an inherited quirk
// of the backend contract.

use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Message, PageResponse, UnreadCount};

/// Query parameters for [`ApiClient::list_messages`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendQuery<'a> {
    sender_id: i64,
    receiver_id: i64,
    content: &'a str,
}

impl ApiClient {
    /// Send a message to another user.
    ///
    /// `POST /notification/send?senderId=..&receiverId=..&content=..`
    pub async fn send_message(
        &self,
        sender_id: i64,
        receiver_id: i64,
        content: &str,
    ) -> Result<Message, Error> {
        debug!(sender_id, receiver_id, "sending message");
        self.post_query(
            "/notification/send",
            &SendQuery {
                sender_id,
                receiver_id,
                content,
            },
        )
        .await
    }

    /// Messages for the current user, paged.
    ///
    /// `GET /notification/messages`
    pub async fn list_messages(
        &self,
        query: &MessageQuery,
    ) -> Result<PageResponse<Message>, Error> {
        self.get_query("/notification/messages", query).await
    }

    /// Mark a message as read.
    ///
    /// `POST /notification/messages/{messageId}/read`
    pub async fn mark_message_read(&self, message_id: i64) -> Result<(), Error> {
        debug!(message_id, "marking message read");
        let _: Option<serde_json::Value> = self
            .post_empty(&format!("/notification/messages/{message_id}/read"))
            .await?;
        Ok(())
    }

    /// Count of unread messages for the current user.
    ///
    /// `GET /notification/unread-count`
    pub async fn unread_count(&self) -> Result<UnreadCount, Error> {
        self.get("/notification/unread-count").await
    }
}
