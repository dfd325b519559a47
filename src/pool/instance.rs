//! A single mirror of the rotating upstream service.

use url::Url;

/// One mirror of the Piped API pool.
///
/// An instance is an immutable base URL (scheme + host, no path). Instances
/// are unique within the pool and their configured order defines the
/// rotation sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    base_url: Url,
}

impl Instance {
    /// Parse an instance from a configured base URL string.
    ///
    /// Trailing slashes are stripped so target-URL building stays uniform.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let base_url = Url::parse(raw.trim_end_matches('/'))?;
        Ok(Self { base_url })
    }

    /// The base URL as configured (no trailing slash in the string form).
    pub fn base(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Host name, used for logging and metrics labels.
    pub fn host(&self) -> &str {
        self.base_url.host_str().unwrap_or("unknown")
    }
}

impl std::fmt::Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base())
    }
}
