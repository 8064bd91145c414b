//! Mock variant: in-memory account directory
//!
//! Replaces every network call of the server-backed client with local
//! array mutation. Nothing here persists across processes except the
//! synthetic master token (see [`MasterAuth`]), and no integrity is
//! enforced beyond unique generated ids.

mod auth;
mod data;
mod directory;

pub use auth::MasterAuth;
pub use data::SAMPLE_USERNAMES;
pub use directory::{AccountStatus, MockAccount, MockDirectory, DEFAULT_PASSWORD};
