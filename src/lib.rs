//! Webmail REST client library
//!
//! Two variants of the same mailbox surface:
//!
//! - [`WebmailClient`] + [`Mailbox`] talk to a remote webmail REST API
//!   (bearer-token auth, per-folder fetching, fetch-and-refetch
//!   mutations).
//! - [`mock::MockDirectory`] keeps everything in memory with a bulk
//!   account-creation workflow and no backend at all.
//!
//! Sessions persist through [`SessionStore`] so a process restart can
//! resume without logging in again.

mod client;
mod config;
mod error;
mod folder;
mod mailbox;
pub mod mock;
mod session;
mod types;

pub use client::WebmailClient;
pub use config::ApiConfig;
pub use error::{Error, Result};
pub use folder::Folder;
pub use mailbox::Mailbox;
pub use session::{Session, SessionStore};
pub use types::{
    AccountProfile, EmailMessage, FolderListing, FolderStats, LoginResponse, OutgoingEmail,
    SendReceipt,
};
