//! Announcements and messaging

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub sender: String,
    /// Display date as sent by the server (e.g. "Apr 10")
    #[serde(default)]
    pub date: String,
    /// Audience, e.g. "All", "Parents", "Students"
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub target: String,
    pub sender: String,
}

/// Entry in the conversation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub last_message: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub unread: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u64,
    pub conversation_id: u64,
    pub sender_id: u64,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
}

/// Body of `POST /messages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub conversation_id: u64,
    pub content: String,
    pub sender_id: u64,
}
