//! Master-password auth for the mock variant
//!
//! The mock build has no backend, so authentication is a single
//! configured master password. A successful login mints a synthetic
//! token and persists it to the token slot; logout clears it.

use crate::error::{Error, Result};
use crate::session::SessionStore;
use chrono::Utc;
use tracing::info;

/// Auth state for the mock variant.
pub struct MasterAuth {
    master_password: String,
    store: SessionStore,
    token: Option<String>,
}

impl MasterAuth {
    #[must_use]
    pub const fn new(master_password: String, store: SessionStore) -> Self {
        Self {
            master_password,
            store,
            token: None,
        }
    }

    /// Startup rehydration: adopt a previously persisted token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn restore(&mut self) -> Result<bool> {
        self.token = self.store.load_token()?;
        Ok(self.token.is_some())
    }

    /// Check the master password; on success mint and persist a
    /// synthetic token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] for a wrong password, or an IO error if
    /// the token cannot be persisted.
    pub fn login(&mut self, password: &str) -> Result<()> {
        if password != self.master_password {
            return Err(Error::Auth("invalid master password".into()));
        }

        let token = format!("master-token-{}", Utc::now().timestamp_millis());
        self.store.save_token(&token)?;
        self.token = Some(token);

        info!("Master login succeeded");
        Ok(())
    }

    /// Drop the token and clear storage unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared; the in-memory
    /// token is discarded regardless.
    pub fn logout(&mut self) -> Result<()> {
        self.token = None;
        self.store.clear()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
