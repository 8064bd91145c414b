//! Webmail REST client
//!
//! `WebmailClient` is the only type in the crate that touches the
//! network or durable storage. It owns the bearer token: `login` seeds
//! it, every later request attaches it, `logout` discards it.

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::folder::Folder;
use crate::session::{Session, SessionStore};
use crate::types::{
    AccountProfile, EmailMessage, FolderListing, FolderStats, LoginResponse, OutgoingEmail,
    SendReceipt,
};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Error payload the server attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// Generic `{"success": ..., "message": ...}` acknowledgement.
#[derive(Debug, Deserialize)]
struct Ack {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: String,
}

/// Client for the webmail REST API.
pub struct WebmailClient {
    http: reqwest::Client,
    base_url: String,
    store: Option<SessionStore>,
    session: Mutex<Option<Session>>,
}

impl WebmailClient {
    /// Create a client with no durable session storage.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            store: None,
            session: Mutex::new(None),
        }
    }

    /// Create a client that persists its session through `store`.
    #[must_use]
    pub fn with_session_store(config: &ApiConfig, store: SessionStore) -> Self {
        Self {
            store: Some(store),
            ..Self::new(config)
        }
    }

    // -- auth --

    /// Log in with email and password.
    ///
    /// Sends form-encoded credentials. On success the returned bearer
    /// token is held for all subsequent requests and, when a session
    /// store is configured, persisted alongside the profile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] with the server's message on rejected
    /// credentials, or a transport error if the request fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<AccountProfile> {
        debug!("Logging in as {}", email);

        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await?;

        let login: LoginResponse = Self::check(response).await?.json().await?;
        let session = Session {
            token: login.access_token,
            account: login.account,
        };

        if let Some(store) = &self.store {
            store.save(&session)?;
        }

        let profile = session.account.clone();
        *self.session_guard() = Some(session);

        info!("Logged in as {}", profile.email);
        Ok(profile)
    }

    /// Rehydrate a previously persisted session from storage.
    ///
    /// Returns `true` when a stored session was found and is now
    /// active. Without a configured store this is always `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn restore_session(&self) -> Result<bool> {
        let Some(store) = &self.store else {
            return Ok(false);
        };
        match store.load()? {
            Some(session) => {
                debug!("Restored session for {}", session.account.email);
                *self.session_guard() = Some(session);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop the active session and clear storage unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared; the in-memory
    /// session is discarded regardless.
    pub fn logout(&self) -> Result<()> {
        *self.session_guard() = None;
        if let Some(store) = &self.store {
            store.clear()?;
        }
        info!("Logged out");
        Ok(())
    }

    /// Whether a session is currently active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session_guard().is_some()
    }

    /// The profile of the logged-in account, if any.
    #[must_use]
    pub fn account(&self) -> Option<AccountProfile> {
        self.session_guard().as_ref().map(|s| s.account.clone())
    }

    // -- mailbox operations --

    /// Fetch all messages in a folder, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if no session is active or the request fails.
    pub async fn fetch_folder(&self, folder: Folder) -> Result<Vec<EmailMessage>> {
        let path = format!("/api/emails/{folder}");
        let response = self.authed(self.http.get(self.url(&path)))?.send().await?;
        let listing: FolderListing = Self::check(response).await?.json().await?;

        debug!("Fetched {} messages from {}", listing.emails.len(), folder);
        Ok(listing.emails)
    }

    /// Fetch a single message by id.
    ///
    /// The server marks unread inbox mail as read when it is fetched
    /// this way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] with status 404 for an unknown id.
    pub async fn fetch_message(&self, id: &str) -> Result<EmailMessage> {
        let path = format!("/api/emails/{id}");
        let response = self.authed(self.http.get(self.url(&path)))?.send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Send an email.
    ///
    /// Validates the outgoing message locally first; nothing is sent
    /// for an empty recipient list or a blank subject.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] before any I/O for an invalid
    /// message, otherwise any server or transport error.
    pub async fn send(&self, outgoing: &OutgoingEmail) -> Result<SendReceipt> {
        outgoing.validate()?;

        let response = self
            .authed(self.http.post(self.url("/api/emails/send")))?
            .json(outgoing)
            .send()
            .await?;

        let receipt: SendReceipt = Self::check(response).await?.json().await?;
        info!("Sent email {}", receipt.email_id);
        Ok(receipt)
    }

    /// Move a message to another folder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] with status 404 for an unknown id.
    pub async fn move_message(&self, id: &str, target: Folder) -> Result<()> {
        let path = format!("/api/emails/{id}/move");
        let response = self
            .authed(self.http.put(self.url(&path)))?
            .query(&[("folder", target.as_str())])
            .send()
            .await?;

        let ack: Ack = Self::check(response).await?.json().await?;
        if !ack.success {
            warn!("Move of {} reported failure: {}", id, ack.message);
        }
        debug!("Moved {} to {}", id, target);
        Ok(())
    }

    /// Delete a message permanently.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] with status 404 for an unknown id.
    pub async fn delete_message(&self, id: &str) -> Result<()> {
        let path = format!("/api/emails/{id}");
        let response = self
            .authed(self.http.delete(self.url(&path)))?
            .send()
            .await?;

        let _ack: Ack = Self::check(response).await?.json().await?;
        debug!("Deleted {}", id);
        Ok(())
    }

    /// Fetch the aggregate folder counters for the account.
    ///
    /// # Errors
    ///
    /// Returns an error if no session is active or the request fails.
    pub async fn fetch_stats(&self) -> Result<FolderStats> {
        let response = self
            .authed(self.http.get(self.url("/api/account/stats")))?
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Change the account password.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] with the server's message when the
    /// current password does not match.
    pub async fn change_password(&self, current: &str, new: &str) -> Result<()> {
        let response = self
            .authed(self.http.put(self.url("/api/account/password")))?
            .json(&serde_json::json!({
                "current_password": current,
                "new_password": new,
            }))
            .send()
            .await?;

        let _ack: Ack = Self::check(response).await?.json().await?;
        info!("Password changed");
        Ok(())
    }

    // -- private helpers --

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the bearer token, failing when no session is active.
    fn authed(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let guard = self.session_guard();
        let session = guard
            .as_ref()
            .ok_or_else(|| Error::Auth("not logged in".into()))?;
        Ok(builder.bearer_auth(&session.token))
    }

    fn session_guard(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Convert a non-2xx response into an error, surfacing the
    /// server's `detail` message when present.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response.json::<ErrorDetail>().await.map_or_else(
            |_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            },
            |payload| payload.detail,
        );

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Auth(detail));
        }
        Err(Error::Api {
            status: status.as_u16(),
            detail,
        })
    }
}
