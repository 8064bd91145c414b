//! Session state and durable session storage
//!
//! The server-backed client persists its bearer token and the
//! serialized account profile into two fixed slots so a later process
//! can resume without logging in again. The mock variant persists only
//! a synthetic token. Both slots are cleared together on logout.

use crate::error::Result;
use crate::types::AccountProfile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

const TOKEN_SLOT: &str = "token";
const ACCOUNT_SLOT: &str = "account.json";

/// An authenticated session: bearer token plus the account profile the
/// server returned at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub account: AccountProfile,
}

/// File-backed storage for session state.
///
/// Writes two files under its directory: `token` (the raw bearer
/// token) and `account.json` (the serialized profile).
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store under the platform config directory
    /// (e.g. `~/.config/webmail-client` on Linux).
    ///
    /// Falls back to the current directory when the platform reports
    /// no config directory.
    #[must_use]
    pub fn default_location() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("webmail-client"))
    }

    /// Persist a full session (token + profile).
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or either
    /// slot cannot be written.
    pub fn save(&self, session: &Session) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(TOKEN_SLOT), &session.token)?;
        fs::write(
            self.dir.join(ACCOUNT_SLOT),
            serde_json::to_vec(&session.account)?,
        )?;
        Ok(())
    }

    /// Persist a bare token with no profile (mock variant).
    ///
    /// # Errors
    ///
    /// Returns an error if the token slot cannot be written.
    pub fn save_token(&self, token: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(TOKEN_SLOT), token)?;
        Ok(())
    }

    /// Rehydrate a session from storage.
    ///
    /// Returns `Ok(None)` when either slot is missing. A token with an
    /// unparseable profile is treated as stale: both slots are cleared
    /// and `Ok(None)` is returned.
    ///
    /// # Errors
    ///
    /// Returns an error only on IO failures other than missing files.
    pub fn load(&self) -> Result<Option<Session>> {
        let Some(token) = self.read_slot(TOKEN_SLOT)? else {
            return Ok(None);
        };
        let Some(raw_account) = self.read_slot(ACCOUNT_SLOT)? else {
            return Ok(None);
        };

        match serde_json::from_str::<AccountProfile>(&raw_account) {
            Ok(account) => Ok(Some(Session { token, account })),
            Err(e) => {
                warn!("Discarding stored session with corrupt profile: {e}");
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// Rehydrate a bare token (mock variant).
    ///
    /// # Errors
    ///
    /// Returns an error on IO failures other than a missing file.
    pub fn load_token(&self) -> Result<Option<String>> {
        self.read_slot(TOKEN_SLOT)
    }

    /// Remove both slots. Missing files are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error on IO failures other than missing files.
    pub fn clear(&self) -> Result<()> {
        for slot in [TOKEN_SLOT, ACCOUNT_SLOT] {
            match fs::remove_file(self.dir.join(slot)) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.dir.join(slot)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
