use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::constants::*;
use crate::hash::{base64_hmac_sha256, constant_time_eq};
use crate::time::DateTime;
use crate::url::UrlParts;
use crate::utils::{Redact, Secret};
use crate::{Clock, Config, Error, ErrorKind, IncomingRequest, Result};

/// UriSigner signs urls and checks signed urls.
///
/// The signer appends a keyed hash of the canonical url as a query
/// parameter. Optionally an expiry timestamp is added before hashing, which
/// requires a [`Clock`].
///
/// Configuration is immutable once built, so a single signer can be shared
/// across threads freely.
#[derive(Clone)]
pub struct UriSigner {
    secret: Secret,
    hash_parameter: String,
    timestamp_parameter: String,
    clock: Option<Arc<dyn Clock>>,
}

impl Debug for UriSigner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UriSigner")
            .field("secret", &self.secret)
            .field("hash_parameter", &self.hash_parameter)
            .field("timestamp_parameter", &self.timestamp_parameter)
            .field("clock", &self.clock)
            .finish()
    }
}

impl UriSigner {
    /// Create a signer with default parameter names and no clock.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret),
            hash_parameter: DEFAULT_HASH_PARAMETER.to_string(),
            timestamp_parameter: DEFAULT_TIMESTAMP_PARAMETER.to_string(),
            clock: None,
        }
    }

    /// Create a signer from config.
    ///
    /// Fails if the secret is missing or empty, or if the parameter names are
    /// empty or equal.
    pub fn from_config(config: Config) -> Result<Self> {
        let secret = config
            .secret
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("secret is required to sign urls"))?;
        let hash_parameter = config
            .hash_parameter
            .unwrap_or_else(|| DEFAULT_HASH_PARAMETER.to_string());
        let timestamp_parameter = config
            .timestamp_parameter
            .unwrap_or_else(|| DEFAULT_TIMESTAMP_PARAMETER.to_string());

        if hash_parameter.is_empty() || timestamp_parameter.is_empty() {
            return Err(Error::config_invalid("parameter names must not be empty"));
        }
        if hash_parameter == timestamp_parameter {
            return Err(Error::config_invalid(format!(
                "hash and timestamp parameters must differ, both are {hash_parameter}"
            )));
        }

        Ok(Self::new(secret)
            .with_hash_parameter(hash_parameter)
            .with_timestamp_parameter(timestamp_parameter))
    }

    /// Set the query parameter carrying the hash.
    pub fn with_hash_parameter(mut self, hash_parameter: impl Into<String>) -> Self {
        self.hash_parameter = hash_parameter.into();
        self
    }

    /// Set the query parameter carrying the expiry timestamp.
    pub fn with_timestamp_parameter(mut self, timestamp_parameter: impl Into<String>) -> Self {
        self.timestamp_parameter = timestamp_parameter.into();
        self
    }

    /// Set the clock used to compute and check expiry.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Name of the hash parameter.
    pub fn hash_parameter(&self) -> &str {
        &self.hash_parameter
    }

    /// Name of the timestamp parameter.
    pub fn timestamp_parameter(&self) -> &str {
        &self.timestamp_parameter
    }

    /// Sign an url.
    ///
    /// With `expires_in` of at least one second, an expiry timestamp is added
    /// before hashing. This requires a clock and fails if the url already
    /// carries the timestamp parameter.
    ///
    /// ```
    /// use urisign_core::UriSigner;
    ///
    /// let signer = UriSigner::new("s3cr3t");
    /// let signed = signer.sign("https://example.com/report?id=42", None)?;
    /// assert!(signer.check(&signed)?);
    /// # Ok::<(), urisign_core::Error>(())
    /// ```
    pub fn sign(&self, uri: &str, expires_in: Option<Duration>) -> Result<String> {
        let expires_at = match expires_in.map(|d| d.as_secs()).filter(|secs| *secs > 0) {
            Some(secs) => {
                let now = self.now()?;
                let secs = i64::try_from(secs).unwrap_or(i64::MAX);
                Some(now.saturating_add(secs))
            }
            None => None,
        };

        self.sign_with(uri, expires_at)
    }

    /// Sign an url that expires at the given instant.
    ///
    /// Unlike [`UriSigner::sign`], no clock is needed to sign.
    pub fn sign_until(&self, uri: &str, expires_at: DateTime) -> Result<String> {
        self.sign_with(uri, Some(expires_at.timestamp()))
    }

    fn sign_with(&self, uri: &str, expires_at: Option<i64>) -> Result<String> {
        let parts = UrlParts::parse(uri)?;
        let mut params = parts.query_params();

        if params.remove(&self.hash_parameter).is_some() {
            debug!("dropped existing {} parameter before signing", self.hash_parameter);
        }

        if let Some(expires_at) = expires_at {
            if params.contains(&self.timestamp_parameter) {
                return Err(Error::parameter_conflict(format!(
                    "timestamp parameter already present: {}",
                    self.timestamp_parameter
                )));
            }
            params.insert(self.timestamp_parameter.clone(), expires_at.to_string());
        }

        let canonical = parts.build(&params);
        debug!("canonical uri to sign: {canonical}");

        let hash = self.compute_hash(&canonical);
        params.insert(self.hash_parameter.clone(), hash);

        Ok(parts.build(&params))
    }

    /// Check that an url carries a valid hash.
    ///
    /// - `Ok(false)` if the url is not signed, the hash does not match, or
    ///   the url cannot be parsed.
    /// - `Err` with [`ErrorKind::UrlExpired`] if the hash matches but the
    ///   expiry timestamp has passed.
    /// - `Err` with [`ErrorKind::ConfigInvalid`] if the url carries an expiry
    ///   timestamp but no clock is configured.
    pub fn check(&self, uri: &str) -> Result<bool> {
        match self.verify(uri) {
            Ok(()) => Ok(true),
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::Unsigned | ErrorKind::SignatureMismatch | ErrorKind::RequestInvalid
                ) =>
            {
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Check the url an inbound request was sent to.
    ///
    /// The url is rebuilt from the raw query string of the request, see
    /// [`IncomingRequest`].
    pub fn check_request(&self, req: &impl IncomingRequest) -> Result<bool> {
        self.check(&req.original_url())
    }

    /// Verify an url, reporting every failure as an error.
    ///
    /// Returns [`ErrorKind::Unsigned`] if the hash parameter is missing or
    /// empty and [`ErrorKind::SignatureMismatch`] if it does not match.
    pub fn verify(&self, uri: &str) -> Result<()> {
        let parts = UrlParts::parse(uri)?;
        let mut params = parts.query_params();

        let hash = match params.remove(&self.hash_parameter) {
            Some(v) if !v.is_empty() => v,
            _ => {
                return Err(Error::unsigned(format!(
                    "url has no {} parameter",
                    self.hash_parameter
                )))
            }
        };

        let canonical = parts.build(&params);
        let expected = self.compute_hash(&canonical);
        if !constant_time_eq(expected.as_bytes(), &hash) {
            debug!(
                "hash {:?} mismatch for canonical uri: {canonical}",
                Redact::from(String::from_utf8_lossy(&hash).as_ref())
            );
            return Err(Error::signature_mismatch("url hash does not match"));
        }

        if let Some(v) = params.get(&self.timestamp_parameter) {
            let expires_at = parse_timestamp(v);
            let now = self.now()?;
            if expires_at <= now {
                debug!("signed uri expired at {expires_at}, now is {now}");
                return Err(Error::url_expired(expires_at, now));
            }
        }

        Ok(())
    }

    /// Verify the url an inbound request was sent to.
    pub fn verify_request(&self, req: &impl IncomingRequest) -> Result<()> {
        self.verify(&req.original_url())
    }

    fn compute_hash(&self, canonical: &str) -> String {
        base64_hmac_sha256(self.secret.expose(), canonical.as_bytes())
    }

    fn now(&self) -> Result<i64> {
        self.clock
            .as_ref()
            .map(|clock| clock.now().timestamp())
            .ok_or_else(Error::missing_clock)
    }
}

/// Read the leading decimal integer of a timestamp value.
///
/// Leading ascii whitespace and a sign are accepted, parsing stops at the
/// first non digit: `"123abc"` is `123`, `"soon"` is `0`. Values out of range
/// saturate.
fn parse_timestamp(value: &[u8]) -> i64 {
    let value = value.trim_ascii_start();
    let (negative, digits) = match value.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, value),
    };

    let mut n: i64 = 0;
    for d in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let d = i64::from(d - b'0');
        let next = match negative {
            true => n.checked_mul(10).and_then(|n| n.checked_sub(d)),
            false => n.checked_mul(10).and_then(|n| n.checked_add(d)),
        };
        n = match next {
            Some(n) => n,
            None if negative => return i64::MIN,
            None => return i64::MAX,
        };
    }
    n
}
