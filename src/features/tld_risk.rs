use url::Url;

/// Public suffixes that are not considered suspicious. Compared literally.
pub const ALLOWED_TLDS: [&str; 5] = ["com", "org", "net", "edu", "gov"];

/// Reasons a TLD could not be resolved. Never surfaced past the extractor.
#[derive(Debug, thiserror::Error)]
pub enum TldLookupError {
    #[error("URL could not be parsed: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("URL has no domain name")]
    NoDomain,
    #[error("Unknown public suffix for {0}")]
    UnknownSuffix(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TldRisk {
    Allowed,
    Suspicious,
}

/// Resolves the public suffix of a URL against the compiled-in public suffix
/// list and checks it against [`ALLOWED_TLDS`]. Purely local, no network.
#[derive(Debug, Clone, Default)]
pub struct TldRiskAnalyzer;

impl TldRiskAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the public suffix (e.g. `com`, `co.uk`) of an absolute URL.
    pub fn resolve_tld(&self, url: &str) -> Result<String, TldLookupError> {
        let parsed = Url::parse(url)?;
        // IP literals have a host but no domain
        let domain = parsed.domain().ok_or(TldLookupError::NoDomain)?;
        let domain = domain.trim_end_matches('.');

        match psl::suffix(domain.as_bytes()) {
            Some(suffix) if suffix.is_known() => {
                Ok(String::from_utf8_lossy(suffix.as_bytes()).into_owned())
            }
            _ => Err(TldLookupError::UnknownSuffix(domain.to_string())),
        }
    }

    pub fn classify(&self, url: &str) -> TldRisk {
        match self.resolve_tld(url) {
            Ok(tld) if ALLOWED_TLDS.contains(&tld.as_str()) => TldRisk::Allowed,
            Ok(tld) => {
                log::debug!("TLD .{} is outside the allow-list", tld);
                TldRisk::Suspicious
            }
            Err(e) => {
                log::debug!("TLD lookup failed for {:?}: {}", url, e);
                TldRisk::Suspicious
            }
        }
    }

    /// Lookup failures count as suspicious.
    pub fn is_suspicious(&self, url: &str) -> bool {
        self.classify(url) == TldRisk::Suspicious
    }
}
