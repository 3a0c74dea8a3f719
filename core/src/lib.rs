//! Core components for signing and verifying URLs.
//!
//! A signed url carries a keyed hash of its own canonical form as a query
//! parameter, so a receiver holding the same secret can later confirm the url
//! was issued by a trusted party and was not tampered with. Optionally the url
//! carries an expiry timestamp that is covered by the hash.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **UriSigner**: Immutable configuration (secret, parameter names, optional clock) with `sign` and `check`
//! - **Canonical form**: The url rebuilt with its query parameters sorted by key, see [`UrlParts`]
//! - **Capabilities**: [`Clock`] for reading the current time, [`Env`] for loading [`Config`]
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use urisign_core::{ErrorKind, OsClock, Result, StaticClock, UriSigner};
//!
//! # fn example() -> Result<()> {
//! let signer = UriSigner::new("s3cr3t").with_clock(OsClock);
//!
//! // Sign an url which never expires.
//! let signed = signer.sign("https://example.com/report?id=42", None)?;
//! assert!(signer.check(&signed)?);
//!
//! // Tampering is a plain verification failure.
//! assert!(!signer.check(&signed.replace("id=42", "id=43"))?);
//!
//! // Expired urls are reported as errors.
//! let signed = signer.sign("https://example.com/report", Some(Duration::from_secs(60)))?;
//! let later = signer.clone().with_clock(StaticClock::from_timestamp(i64::from(u32::MAX)));
//! let err = later.check(&signed).unwrap_err();
//! assert!(matches!(err.kind(), ErrorKind::UrlExpired { .. }));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Traits
//!
//! - [`Clock`]: For reading the current time, required by expiring urls
//! - [`Env`]: For environment variable access
//! - [`IncomingRequest`]: For rebuilding the url of an inbound request
//!
//! ## Utilities
//!
//! - [`hash`]: Keyed hashing and constant-time comparison
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod constants;
pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
mod clock;
pub use clock::{Clock, OsClock, StaticClock};
mod env;
pub use env::{Env, OsEnv, StaticEnv};
mod config;
pub use config::Config;
mod url;
pub use url::{QueryParams, UrlParts};
mod request;
pub use request::IncomingRequest;
mod signer;
pub use signer::UriSigner;
