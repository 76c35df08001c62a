//! # Xero Sync Library
//!
//! Authenticates against the Xero accounting API with the OAuth2
//! client-credentials grant, caches the access token on disk, pulls ledger
//! accounts and supplier contacts, and stores them as JSON and CSV snapshots
//! behind a small JSON HTTP API.
//!
//! Modules:
//! - `config`: environment-sourced settings and credentials
//! - `cache`: token record and its file store
//! - `sources`: token endpoint, accounting API, authenticator, fetcher
//! - `parser`: flat row types and projection of upstream entities
//! - `sinks`: JSON / CSV snapshot writer
//! - `server`: HTTP surface

pub mod config;
pub mod cache;
pub mod errors;
pub mod sources;
pub mod parser;
pub mod observability;
pub mod server;
pub mod sinks;
pub mod helpers;
pub mod utils;

#[cfg(test)]
mod tests;


pub use crate::errors::SyncError;
pub use crate::parser::rows::{AccountRow, VendorRow};
