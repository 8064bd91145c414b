//! In-memory account directory and its mutation operations

use crate::error::{Error, Result};
use crate::folder::Folder;
use crate::types::{EmailMessage, OutgoingEmail};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use tracing::info;

/// Password assigned to accounts created through the bulk workflow.
pub const DEFAULT_PASSWORD: &str = "default123";

/// Lifecycle state of a mock account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Suspended,
}

/// A fabricated email account with its own folder map.
#[derive(Clone)]
pub struct MockAccount {
    pub id: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub folders: HashMap<Folder, Vec<EmailMessage>>,
}

impl MockAccount {
    fn new(id: String, username: &str, domain: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email: format!("{username}@{domain}"),
            username: username.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            status: AccountStatus::Active,
            created_at,
            folders: Folder::ALL.iter().map(|f| (*f, Vec::new())).collect(),
        }
    }

    /// Messages in one of this account's folders.
    #[must_use]
    pub fn messages(&self, folder: Folder) -> &[EmailMessage] {
        self.folders.get(&folder).map_or(&[], Vec::as_slice)
    }
}

// The password field is fabricated mock data, but it still stays out
// of log output.
impl fmt::Debug for MockAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockAccount")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("status", &self.status)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// The mock variant's whole world: a list of accounts, each owning its
/// folder map. All operations are plain in-memory mutation.
pub struct MockDirectory {
    accounts: Vec<MockAccount>,
    next_account_id: u64,
    next_email_id: u64,
}

impl Default for MockDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDirectory {
    /// An empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accounts: Vec::new(),
            next_account_id: 1,
            next_email_id: 1,
        }
    }

    /// A directory pre-populated with fabricated sample accounts.
    #[must_use]
    pub fn seeded() -> Self {
        super::data::seed()
    }

    /// All accounts, in creation order.
    #[must_use]
    pub fn accounts(&self) -> &[MockAccount] {
        &self.accounts
    }

    /// Look up an account by id.
    #[must_use]
    pub fn account(&self, id: &str) -> Option<&MockAccount> {
        self.accounts.iter().find(|acc| acc.id == id)
    }

    /// Create one account per username under the given domain.
    ///
    /// Each account gets a unique id, the email `username@domain`, the
    /// default password, and empty folders. Returns the ids of the new
    /// accounts in input order.
    pub fn create_bulk_accounts(&mut self, usernames: &[&str], domain: &str) -> Vec<String> {
        let created_at = Utc::now();
        let mut ids = Vec::with_capacity(usernames.len());

        for username in usernames {
            let id = self.fresh_account_id();
            self.accounts
                .push(MockAccount::new(id.clone(), username, domain, created_at));
            ids.push(id);
        }

        info!("Created {} accounts under {}", ids.len(), domain);
        ids
    }

    /// Replace an account's password.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown account id.
    pub fn update_password(&mut self, account_id: &str, new_password: &str) -> Result<()> {
        let account = self.account_mut(account_id)?;
        account.password = new_password.to_string();
        Ok(())
    }

    /// Remove an account and everything it holds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown account id.
    pub fn delete_account(&mut self, account_id: &str) -> Result<()> {
        let before = self.accounts.len();
        self.accounts.retain(|acc| acc.id != account_id);
        if self.accounts.len() == before {
            return Err(Error::NotFound(format!("account {account_id}")));
        }
        Ok(())
    }

    /// "Send" an email from an account: synthesize the record and
    /// prepend it to that account's sent list. No delivery happens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an invalid message or
    /// [`Error::NotFound`] for an unknown account id.
    pub fn send_message(
        &mut self,
        account_id: &str,
        outgoing: &OutgoingEmail,
    ) -> Result<EmailMessage> {
        outgoing.validate()?;

        let id = self.fresh_email_id();
        let account = self.account_mut(account_id)?;

        let message = EmailMessage {
            id,
            from: account.email.clone(),
            to: outgoing.to.clone(),
            cc: outgoing.cc.clone(),
            bcc: outgoing.bcc.clone(),
            subject: outgoing.subject.clone(),
            body: outgoing.body.clone(),
            timestamp: Utc::now(),
            read: true,
            folder: Folder::Sent,
            attachments: Vec::new(),
        };

        account
            .folders
            .entry(Folder::Sent)
            .or_default()
            .insert(0, message.clone());

        Ok(message)
    }

    /// Filter one account folder by a search term (case-insensitive
    /// substring of subject, sender, or body).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown account id.
    pub fn search(
        &self,
        account_id: &str,
        folder: Folder,
        term: &str,
    ) -> Result<Vec<&EmailMessage>> {
        let account = self
            .account(account_id)
            .ok_or_else(|| Error::NotFound(format!("account {account_id}")))?;
        Ok(account
            .messages(folder)
            .iter()
            .filter(|msg| msg.matches(term))
            .collect())
    }

    // -- private helpers --

    fn account_mut(&mut self, account_id: &str) -> Result<&mut MockAccount> {
        self.accounts
            .iter_mut()
            .find(|acc| acc.id == account_id)
            .ok_or_else(|| Error::NotFound(format!("account {account_id}")))
    }

    fn fresh_account_id(&mut self) -> String {
        let id = format!("acc_{}", self.next_account_id);
        self.next_account_id += 1;
        id
    }

    fn fresh_email_id(&mut self) -> String {
        let id = format!("email_{}", self.next_email_id);
        self.next_email_id += 1;
        id
    }

    /// Insert a pre-built account (seed data only).
    pub(super) fn push_seed_account(&mut self, account: MockAccount) {
        self.accounts.push(account);
    }

    /// Start generated ids past the seed data's range.
    pub(super) const fn reserve_ids(&mut self, account_from: u64, email_from: u64) {
        self.next_account_id = account_from;
        self.next_email_id = email_from;
    }
}
