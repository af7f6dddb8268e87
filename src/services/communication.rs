//! Announcements and conversations

use super::{ServiceError, require_filled};
use crate::api::SchoolApi;
use crate::models::{Announcement, Conversation, Message, NewAnnouncement, NewMessage};
use crate::operation::{AsyncOperation, SettlePolicy};

pub struct CommunicationService {
    announcements: AsyncOperation<(), Vec<Announcement>>,
    conversations: AsyncOperation<(), Vec<Conversation>>,
    conversation: AsyncOperation<u64, Conversation>,
    messages: AsyncOperation<u64, Vec<Message>>,
    post_announcement: AsyncOperation<NewAnnouncement, serde_json::Value>,
    send_message: AsyncOperation<NewMessage, serde_json::Value>,
}

impl CommunicationService {
    pub fn new(api: &SchoolApi, policy: SettlePolicy) -> Self {
        let comms = api.communication();

        let announcements = {
            let comms = comms.clone();
            AsyncOperation::bind_with_policy(move |()| comms.announcements(), policy)
        };
        let conversations = {
            let comms = comms.clone();
            AsyncOperation::bind_with_policy(move |()| comms.conversations(), policy)
        };
        let conversation = {
            let comms = comms.clone();
            AsyncOperation::bind_with_policy(move |id| comms.conversation(id), policy)
        };
        let messages = {
            let comms = comms.clone();
            AsyncOperation::bind_with_policy(move |id| comms.messages(id), policy)
        };
        let post_announcement = {
            let comms = comms.clone();
            AsyncOperation::bind_with_policy(
                move |body: NewAnnouncement| comms.create_announcement(&body),
                policy,
            )
        };
        let send_message = AsyncOperation::bind_with_policy(
            move |body: NewMessage| comms.send_message(&body),
            policy,
        );

        Self {
            announcements,
            conversations,
            conversation,
            messages,
            post_announcement,
            send_message,
        }
    }

    pub async fn load_announcements(&self) -> Result<Vec<Announcement>, ServiceError> {
        Ok(self.announcements.invoke(()).await?)
    }

    pub async fn load_conversations(&self) -> Result<Vec<Conversation>, ServiceError> {
        Ok(self.conversations.invoke(()).await?)
    }

    pub async fn conversation(&self, id: u64) -> Result<Conversation, ServiceError> {
        Ok(self.conversation.invoke(id).await?)
    }

    /// Load the messages of one conversation
    pub async fn open_conversation(&self, id: u64) -> Result<Vec<Message>, ServiceError> {
        Ok(self.messages.invoke(id).await?)
    }

    /// Publish an announcement, then refresh the announcement list
    pub async fn post_announcement(
        &self,
        announcement: NewAnnouncement,
    ) -> Result<serde_json::Value, ServiceError> {
        require_filled(&[
            ("title", &announcement.title),
            ("content", &announcement.content),
            ("target", &announcement.target),
            ("sender", &announcement.sender),
        ])?;

        let created = self.post_announcement.invoke(announcement).await?;
        if let Err(e) = self.announcements.invoke(()).await {
            tracing::warn!("Failed to refresh announcements: {}", e);
        }
        Ok(created)
    }

    /// Send a message to a conversation
    ///
    /// Whitespace-only text is rejected without a request; the text is sent
    /// trimmed. The conversation's messages are reloaded afterwards.
    pub async fn send_message(
        &self,
        conversation_id: u64,
        sender_id: u64,
        text: &str,
    ) -> Result<serde_json::Value, ServiceError> {
        let content = text.trim();
        if content.is_empty() {
            return Err(ServiceError::Validation("message is empty".to_string()));
        }

        tracing::debug!("Sending message to conversation {}", conversation_id);
        let sent = self
            .send_message
            .invoke(NewMessage {
                conversation_id,
                content: content.to_string(),
                sender_id,
            })
            .await?;

        if let Err(e) = self.messages.invoke(conversation_id).await {
            tracing::warn!("Failed to refresh messages: {}", e);
        }
        Ok(sent)
    }

    pub fn announcements(&self) -> &AsyncOperation<(), Vec<Announcement>> {
        &self.announcements
    }

    pub fn conversations(&self) -> &AsyncOperation<(), Vec<Conversation>> {
        &self.conversations
    }

    pub fn messages(&self) -> &AsyncOperation<u64, Vec<Message>> {
        &self.messages
    }
}
