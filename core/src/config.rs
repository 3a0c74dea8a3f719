use std::fmt::{Debug, Formatter};

use crate::constants::*;
use crate::Env;

/// Config carries all the configuration for an [`UriSigner`](crate::UriSigner).
#[derive(Clone, Default)]
pub struct Config {
    /// `secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`URISIGN_SECRET`]
    pub secret: Option<String>,
    /// `hash_parameter` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`URISIGN_HASH_PARAMETER`]
    /// - default: [`DEFAULT_HASH_PARAMETER`]
    pub hash_parameter: Option<String>,
    /// `timestamp_parameter` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`URISIGN_TIMESTAMP_PARAMETER`]
    /// - default: [`DEFAULT_TIMESTAMP_PARAMETER`]
    pub timestamp_parameter: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Set hash_parameter
    pub fn with_hash_parameter(mut self, hash_parameter: impl Into<String>) -> Self {
        self.hash_parameter = Some(hash_parameter.into());
        self
    }

    /// Set timestamp_parameter
    pub fn with_timestamp_parameter(mut self, timestamp_parameter: impl Into<String>) -> Self {
        self.timestamp_parameter = Some(timestamp_parameter.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, env: &impl Env) -> Self {
        if let Some(v) = env.var(URISIGN_SECRET) {
            self.secret.get_or_insert(v);
        }
        if let Some(v) = env.var(URISIGN_HASH_PARAMETER) {
            self.hash_parameter.get_or_insert(v);
        }
        if let Some(v) = env.var(URISIGN_TIMESTAMP_PARAMETER) {
            self.timestamp_parameter.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .field("hash_parameter", &self.hash_parameter)
            .field("timestamp_parameter", &self.timestamp_parameter)
            .finish()
    }
}
