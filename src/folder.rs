//! Mailbox folder types
//!
//! Provides a strongly-typed enum for the folders the API knows about
//! instead of raw strings. The server validates folder names against
//! the same closed set, so there is no variant for arbitrary names.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A mailbox folder.
///
/// The API partitions every account's mail into exactly these five
/// folders; folder names appear lowercase on the wire.
///
/// # Examples
///
/// ```
/// use webmail_client::Folder;
///
/// let inbox = Folder::Inbox;
/// assert_eq!(inbox.as_str(), "inbox");
///
/// let folder: Folder = "trash".parse().unwrap();
/// assert_eq!(folder, Folder::Trash);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Folder {
    /// Incoming messages.
    Inbox,
    /// Sent messages.
    Sent,
    /// Draft messages.
    Drafts,
    /// Deleted messages.
    Trash,
    /// Spam / junk messages.
    Spam,
}

impl Folder {
    /// All folders, in display order.
    pub const ALL: [Self; 5] = [
        Self::Inbox,
        Self::Sent,
        Self::Drafts,
        Self::Trash,
        Self::Spam,
    ];

    /// The folder name as it appears in API paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Sent => "sent",
            Self::Drafts => "drafts",
            Self::Trash => "trash",
            Self::Spam => "spam",
        }
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Folder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inbox" => Ok(Self::Inbox),
            "sent" => Ok(Self::Sent),
            "drafts" => Ok(Self::Drafts),
            "trash" => Ok(Self::Trash),
            "spam" => Ok(Self::Spam),
            other => Err(Error::Validation(format!("invalid folder: {other}"))),
        }
    }
}
