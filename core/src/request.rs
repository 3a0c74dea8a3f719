use http::header::HOST;
use http::HeaderMap;
use http::Uri;

/// IncomingRequest exposes the parts of an inbound request needed to
/// rebuild the url it was sent to.
///
/// The query string must be returned exactly as received. Frameworks that
/// expose a normalized uri (decoded, reordered) break the canonical form
/// and therefore the hash.
pub trait IncomingRequest {
    /// Scheme and host, for example `https://example.com:8443`.
    fn scheme_and_host(&self) -> String;

    /// Prefix the application is mounted at, empty by default.
    fn base_path(&self) -> &str {
        ""
    }

    /// Path relative to the base path.
    fn path_info(&self) -> &str;

    /// Raw query string without the leading `?`.
    fn raw_query(&self) -> Option<&str>;

    /// Rebuild the full url as sent by the client.
    fn original_url(&self) -> String {
        let mut s = self.scheme_and_host();
        s.push_str(self.base_path());
        s.push_str(self.path_info());
        if let Some(query) = self.raw_query().filter(|v| !v.is_empty()) {
            s.push('?');
            s.push_str(query);
        }
        s
    }
}

/// Build `scheme://host` from the request uri, falling back to the `Host`
/// header for origin-form uris. The scheme defaults to `http`.
fn scheme_and_host(uri: &Uri, headers: &HeaderMap) -> String {
    let scheme = uri.scheme_str().unwrap_or("http");
    let host = match uri.authority() {
        Some(authority) => authority.as_str(),
        None => headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default(),
    };

    format!("{scheme}://{host}")
}

impl IncomingRequest for http::request::Parts {
    fn scheme_and_host(&self) -> String {
        scheme_and_host(&self.uri, &self.headers)
    }

    fn path_info(&self) -> &str {
        self.uri.path()
    }

    fn raw_query(&self) -> Option<&str> {
        self.uri.query()
    }
}

impl<B> IncomingRequest for http::Request<B> {
    fn scheme_and_host(&self) -> String {
        scheme_and_host(self.uri(), self.headers())
    }

    fn path_info(&self) -> &str {
        self.uri().path()
    }

    fn raw_query(&self) -> Option<&str> {
        self.uri().query()
    }
}
