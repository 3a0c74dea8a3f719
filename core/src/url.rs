//! Url decomposition and canonical recomposition.

use std::collections::BTreeMap;

use percent_encoding::percent_decode;

use crate::{Error, Result};

/// Query parameters of an url.
///
/// Keys and values are kept as the raw bytes the query encodes, so escapes
/// that are not valid utf-8 (`%FF`) survive parsing unchanged. Keys are
/// unique and kept in byte order, so the serialized form does not depend on
/// the order parameters were inserted or parsed in. When parsing, the last
/// occurrence of a duplicated key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<Vec<u8>, Vec<u8>>);

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` query string.
    ///
    /// `+` decodes to a space, percent escapes decode to their raw byte.
    pub fn parse(query: &str) -> Self {
        query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (decode(k), decode(v)),
                None => (decode(pair), Vec::new()),
            })
            .collect()
    }

    /// Get the raw value of a parameter.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.0.get(key.as_bytes()).map(Vec::as_slice)
    }

    /// Returns true if the parameter is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key.as_bytes())
    }

    /// Set a parameter, returning the previous value if any.
    pub fn insert(
        &mut self,
        key: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
    ) -> Option<Vec<u8>> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a parameter, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Vec<u8>> {
        self.0.remove(key.as_bytes())
    }

    /// Serialize into a query string sorted by key.
    ///
    /// ```shell
    /// [(b, 2), (a, 1)] => "a=1&b=2"
    /// ```
    pub fn to_query_string(&self) -> String {
        let mut s = String::with_capacity(16);

        for (idx, (k, v)) in self.0.iter().enumerate() {
            if idx != 0 {
                s.push('&');
            }

            s.extend(form_urlencoded::byte_serialize(k));
            s.push('=');
            s.extend(form_urlencoded::byte_serialize(v));
        }

        s
    }
}

impl<K: Into<Vec<u8>>, V: Into<Vec<u8>>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

fn decode(input: &str) -> Vec<u8> {
    let replaced = input.replace('+', " ");
    percent_decode(replaced.as_bytes()).collect()
}

/// UrlParts is an url split into its components.
///
/// Every component is optional. An absent component is left out of the
/// rebuilt url together with its separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    /// Scheme without `://`.
    pub scheme: Option<String>,
    /// User of the userinfo.
    pub user: Option<String>,
    /// Password of the userinfo.
    pub password: Option<String>,
    /// Host, IPv6 literals keep their brackets.
    pub host: Option<String>,
    /// Port.
    pub port: Option<u16>,
    /// Path, kept exactly as given.
    pub path: Option<String>,
    /// Raw query without `?`.
    pub query: Option<String>,
    /// Fragment without `#`.
    pub fragment: Option<String>,
}

impl UrlParts {
    /// Split an url into its components.
    ///
    /// Both absolute (`https://host/path`), scheme relative (`//host/path`)
    /// and relative (`/path?query`) urls are accepted. The only failure is a
    /// port that is not a valid `u16`.
    pub fn parse(uri: &str) -> Result<Self> {
        let mut parts = UrlParts::default();

        let rest = match uri.split_once('#') {
            Some((rest, fragment)) => {
                parts.fragment = Some(fragment.to_string());
                rest
            }
            None => uri,
        };
        let rest = match rest.split_once('?') {
            Some((rest, query)) => {
                parts.query = Some(query.to_string());
                rest
            }
            None => rest,
        };

        let authority_and_path = match rest.split_once("://") {
            Some((scheme, rest)) if is_scheme(scheme) => {
                parts.scheme = Some(scheme.to_string());
                Some(rest)
            }
            _ => rest.strip_prefix("//"),
        };

        let path = match authority_and_path {
            Some(v) => {
                let (authority, path) = match v.find('/') {
                    Some(idx) => v.split_at(idx),
                    None => (v, ""),
                };
                parts.parse_authority(authority)?;
                path
            }
            None => rest,
        };
        if !path.is_empty() {
            parts.path = Some(path.to_string());
        }

        Ok(parts)
    }

    fn parse_authority(&mut self, authority: &str) -> Result<()> {
        let host_port = match authority.rsplit_once('@') {
            Some((userinfo, host_port)) => {
                match userinfo.split_once(':') {
                    Some((user, password)) => {
                        self.user = Some(user.to_string());
                        self.password = Some(password.to_string());
                    }
                    None => self.user = Some(userinfo.to_string()),
                }
                host_port
            }
            None => authority,
        };

        let (host, port) = if host_port.starts_with('[') {
            match host_port.find(']') {
                Some(idx) => {
                    let (host, rest) = host_port.split_at(idx + 1);
                    (host, rest.strip_prefix(':'))
                }
                None => (host_port, None),
            }
        } else {
            match host_port.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (host_port, None),
            }
        };

        if !host.is_empty() {
            self.host = Some(host.to_string());
        }
        if let Some(port) = port.filter(|v| !v.is_empty()) {
            self.port = Some(port.parse().map_err(|e| {
                Error::request_invalid(format!("url contains invalid port: {port}")).with_source(
                    anyhow::Error::new(e),
                )
            })?);
        }

        Ok(())
    }

    /// Parse the raw query of this url into parameters.
    pub fn query_params(&self) -> QueryParams {
        self.query
            .as_deref()
            .map(QueryParams::parse)
            .unwrap_or_default()
    }

    /// Rebuild the url in canonical form with the given parameters.
    ///
    /// The raw `query` of `self` is ignored: parameters are always serialized
    /// from `params`, sorted by key.
    pub fn build(&self, params: &QueryParams) -> String {
        let query = params.to_query_string();

        let mut s = String::with_capacity(64 + query.len());
        match &self.scheme {
            Some(scheme) => {
                s.push_str(scheme);
                s.push_str("://");
            }
            // Keep scheme relative urls scheme relative.
            None if self.has_authority() => s.push_str("//"),
            None => {}
        }
        if let Some(user) = &self.user {
            s.push_str(user);
        }
        if let Some(password) = &self.password {
            s.push(':');
            s.push_str(password);
        }
        if self.user.is_some() || self.password.is_some() {
            s.push('@');
        }
        if let Some(host) = &self.host {
            s.push_str(host);
        }
        if let Some(port) = self.port {
            s.push(':');
            s.push_str(&port.to_string());
        }
        if let Some(path) = &self.path {
            s.push_str(path);
        }
        if !query.is_empty() {
            s.push('?');
            s.push_str(&query);
        }
        if let Some(fragment) = &self.fragment {
            s.push('#');
            s.push_str(fragment);
        }

        s
    }

    fn has_authority(&self) -> bool {
        self.host.is_some() || self.user.is_some() || self.password.is_some() || self.port.is_some()
    }
}

/// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}
