//! # derma-auth
//!
//! Bearer-token handling for the derma CLI.
//!
//! Tokens are issued by the identity provider out of band and pasted in with
//! `derma auth login --token`. This crate stores them (OS keychain via
//! `keyring`, credentials file fallback), checks the `exp` claim, and exposes
//! them to the network layers through [`TokenProvider`].

pub mod error;
pub mod expiry;
pub mod provider;
pub mod token_store;

pub use error::AuthError;
pub use expiry::{EXPIRY_BUFFER_SECS, decode_expiry, is_near_expiry};
pub use provider::{StaticTokenProvider, StoredTokenProvider, TokenProvider};
pub use token_store::{TokenSource, TokenStore};
