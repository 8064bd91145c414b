//! Fake webmail API server for integration testing
//!
//! An in-process HTTP server that implements the API surface the
//! client talks to: login, folder listing, single-message fetch,
//! send, move, delete, stats, and password change.
//!
//! ## Module layout
//!
//! - `server` -- TCP listener, routing, and connection dispatch
//! - `handlers/` -- one file per endpoint
//! - `state` -- test data model (accounts, mail, tokens, builder)
//! - `http` -- minimal HTTP/1.1 parsing and response helpers

mod http;

pub use server::FakeApiServer;
pub use state::StateBuilder;
