//! Mailbox state container
//!
//! Holds the fetched view of the account's mail: one list per folder
//! plus the aggregate counters. Every operation is fetch-and-replace:
//! mutations go to the server first, then the affected folder and the
//! stats are refetched before the new state is visible. There is no
//! optimistic local patching.

use crate::client::WebmailClient;
use crate::error::Result;
use crate::folder::Folder;
use crate::types::{EmailMessage, FolderStats, OutgoingEmail, SendReceipt};
use std::collections::HashMap;
use tracing::debug;

/// Client-side view of the authenticated account's mailbox.
pub struct Mailbox {
    client: WebmailClient,
    folders: HashMap<Folder, Vec<EmailMessage>>,
    stats: FolderStats,
    current: Folder,
}

impl Mailbox {
    /// Wrap an authenticated client. No data is fetched until the
    /// first refresh.
    #[must_use]
    pub fn new(client: WebmailClient) -> Self {
        Self {
            client,
            folders: HashMap::new(),
            stats: FolderStats::default(),
            current: Folder::Inbox,
        }
    }

    /// The underlying client, for auth operations.
    #[must_use]
    pub const fn client(&self) -> &WebmailClient {
        &self.client
    }

    /// The folder mutations refresh against.
    #[must_use]
    pub const fn current_folder(&self) -> Folder {
        self.current
    }

    /// The held message list for a folder. Empty until fetched.
    #[must_use]
    pub fn messages(&self, folder: Folder) -> &[EmailMessage] {
        self.folders.get(&folder).map_or(&[], Vec::as_slice)
    }

    /// The last fetched aggregate counters.
    #[must_use]
    pub const fn stats(&self) -> &FolderStats {
        &self.stats
    }

    /// Switch the active folder and fetch its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails; the previous folder stays
    /// active in that case.
    pub async fn open_folder(&mut self, folder: Folder) -> Result<()> {
        self.refresh_folder(folder).await?;
        self.current = folder;
        Ok(())
    }

    /// Refetch one folder and replace its held list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the held list is left
    /// untouched.
    pub async fn refresh_folder(&mut self, folder: Folder) -> Result<()> {
        let messages = self.client.fetch_folder(folder).await?;
        debug!("Replacing {} with {} messages", folder, messages.len());
        self.folders.insert(folder, messages);
        Ok(())
    }

    /// Refetch the aggregate counters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn refresh_stats(&mut self) -> Result<()> {
        self.stats = self.client.fetch_stats().await?;
        Ok(())
    }

    /// Fetch a single message by id.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown id or a failed request.
    pub async fn message(&self, id: &str) -> Result<EmailMessage> {
        self.client.fetch_message(id).await
    }

    /// Send an email, then refresh the sent folder and stats.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] before any request for an
    /// invalid message, otherwise any server or transport error.
    pub async fn send(&mut self, outgoing: &OutgoingEmail) -> Result<SendReceipt> {
        let receipt = self.client.send(outgoing).await?;
        self.refresh_folder(Folder::Sent).await?;
        self.refresh_stats().await?;
        Ok(receipt)
    }

    /// Move a message to another folder, then refresh the active
    /// folder and stats.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown id or a failed request.
    pub async fn move_message(&mut self, id: &str, target: Folder) -> Result<()> {
        self.client.move_message(id, target).await?;
        self.refresh_folder(self.current).await?;
        self.refresh_stats().await?;
        Ok(())
    }

    /// Delete a message permanently, then refresh the active folder
    /// and stats.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown id or a failed request.
    pub async fn delete_message(&mut self, id: &str) -> Result<()> {
        self.client.delete_message(id).await?;
        self.refresh_folder(self.current).await?;
        self.refresh_stats().await?;
        Ok(())
    }

    /// Change the account password.
    ///
    /// # Errors
    ///
    /// Returns an error when the current password does not match.
    pub async fn change_password(&self, current: &str, new: &str) -> Result<()> {
        self.client.change_password(current, new).await
    }

    /// Filter the active folder's held list by a search term.
    ///
    /// Matches are case-insensitive substrings of the subject, sender,
    /// or body. Operates on held state only; no request is made.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&EmailMessage> {
        self.messages(self.current)
            .iter()
            .filter(|msg| msg.matches(term))
            .collect()
    }
}
