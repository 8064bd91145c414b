//! Wire and data models for the webmail API
//!
//! These structs mirror the JSON payloads the server produces and
//! consumes. Field names follow the wire format; `EmailMessage::from`
//! is renamed because the server calls it `from_email`.

use crate::error::{Error, Result};
use crate::folder::Folder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single mail record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    pub id: String,
    #[serde(rename = "from_email")]
    pub from: String,
    pub to: Vec<String>,
    #[serde(default)]
    pub cc: Vec<String>,
    #[serde(default)]
    pub bcc: Vec<String>,
    pub subject: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub folder: Folder,
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl EmailMessage {
    /// Case-insensitive substring match against subject, sender, or
    /// body. An empty term matches everything.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.subject.to_lowercase().contains(&needle)
            || self.from.to_lowercase().contains(&needle)
            || self.body.to_lowercase().contains(&needle)
    }
}

/// The authenticated account's profile, returned on login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub storage_used: u64,
    #[serde(default = "default_quota")]
    pub storage_quota: u64,
}

const fn default_quota() -> u64 {
    1000
}

/// Aggregate per-folder counters for the authenticated account.
///
/// This is a derived summary: the client never updates it locally and
/// refetches it after every mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderStats {
    #[serde(default)]
    pub inbox: u64,
    #[serde(default)]
    pub sent: u64,
    #[serde(default)]
    pub drafts: u64,
    #[serde(default)]
    pub trash: u64,
    #[serde(default)]
    pub spam: u64,
    #[serde(default)]
    pub unread: u64,
    #[serde(default)]
    pub storage_used: u64,
    #[serde(default = "default_quota")]
    pub storage_quota: u64,
}

impl FolderStats {
    /// The message count for one folder.
    #[must_use]
    pub const fn count_for(&self, folder: Folder) -> u64 {
        match folder {
            Folder::Inbox => self.inbox,
            Folder::Sent => self.sent,
            Folder::Drafts => self.drafts,
            Folder::Trash => self.trash,
            Folder::Spam => self.spam,
        }
    }
}

/// An email being composed for sending.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
}

impl OutgoingEmail {
    /// Client-side checks performed before any request is made.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the recipient list is empty or
    /// the subject is blank.
    pub fn validate(&self) -> Result<()> {
        if self.to.iter().all(|addr| addr.trim().is_empty()) {
            return Err(Error::Validation("recipient is required".into()));
        }
        if self.subject.trim().is_empty() {
            return Err(Error::Validation("subject is required".into()));
        }
        Ok(())
    }
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub account: AccountProfile,
}

/// Payload listing one folder's messages.
#[derive(Debug, Clone, Deserialize)]
pub struct FolderListing {
    pub emails: Vec<EmailMessage>,
    #[serde(default)]
    pub total: u64,
}

/// Acknowledgement returned by the send endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SendReceipt {
    pub success: bool,
    pub email_id: String,
    #[serde(default)]
    pub message: String,
}
