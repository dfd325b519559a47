//! Inbound request descriptor and target URL building.

/// Descriptor of one inbound proxy request: upstream-relative path plus the
/// raw query string. GET-only; derived per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRequest {
    path: String,
    query: Option<String>,
}

impl ProxyRequest {
    pub fn new(path: impl Into<String>, query: Option<String>) -> Self {
        let path = path.into().trim_start_matches('/').to_string();
        let query = query.filter(|q| !q.is_empty());
        Self { path, query }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// An empty path with no query maps to a local liveness response, not
    /// an upstream call.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.query.is_none()
    }
}

/// Build `base + "/" + path + ("?" + query)?`.
///
/// Shared by the failover executor, the passthrough forwarder, and the
/// prober. The query string is passed through verbatim, never re-encoded.
pub fn build_target(base: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    if let Some(q) = query {
        if !q.is_empty() {
            url.push('?');
            url.push_str(q);
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_target_with_query() {
        assert_eq!(
            build_target("https://a.test", "search", Some("q=test&filter=music_songs")),
            "https://a.test/search?q=test&filter=music_songs"
        );
    }

    #[test]
    fn test_build_target_normalizes_slashes() {
        assert_eq!(build_target("https://a.test/", "/search", None), "https://a.test/search");
    }

    #[test]
    fn test_build_target_empty_path() {
        assert_eq!(build_target("https://a.test", "", None), "https://a.test/");
    }

    #[test]
    fn test_request_empty_detection() {
        assert!(ProxyRequest::new("", None).is_empty());
        assert!(ProxyRequest::new("/", Some(String::new())).is_empty());
        assert!(!ProxyRequest::new("search", None).is_empty());
        assert!(!ProxyRequest::new("", Some("q=x".into())).is_empty());
    }

    #[test]
    fn test_request_strips_leading_slash() {
        let r = ProxyRequest::new("/streams/abc", Some("itag=140".into()));
        assert_eq!(r.path(), "streams/abc");
        assert_eq!(r.query(), Some("itag=140"));
    }
}
