use super::tld_risk::TldRiskAnalyzer;
use crate::error::ExtractionError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Characters summed into `special_char_count`.
pub const SPECIAL_CHARS: [char; 15] = [
    '@', '?', '&', '|', '=', '_', '~', '%', '/', '*', ':', ',', ';', '$', ' ',
];

/// Lexical signals derived from one URL string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UrlSignals {
    /// Character count of the raw URL.
    pub length: usize,
    pub dot_count: usize,
    pub hyphen_count: usize,
    pub has_https: bool,
    pub has_http: bool,
    pub has_ip_host: bool,
    /// Share of digit characters, 0 for an empty URL.
    pub digit_ratio: f64,
    pub suspicious_tld: bool,
    pub special_char_count: usize,
}

#[derive(Debug, Default)]
struct CharCounts {
    chars: usize,
    dots: usize,
    hyphens: usize,
    digits: usize,
    specials: usize,
}

impl CharCounts {
    fn scan(url: &str) -> Self {
        let mut counts = Self::default();
        for c in url.chars() {
            counts.chars += 1;
            match c {
                '.' => counts.dots += 1,
                '-' => counts.hyphens += 1,
                c if c.is_ascii_digit() => counts.digits += 1,
                c if SPECIAL_CHARS.contains(&c) => counts.specials += 1,
                _ => {}
            }
        }
        counts
    }

    fn digit_ratio(&self) -> f64 {
        if self.chars == 0 {
            0.0
        } else {
            self.digits as f64 / self.chars as f64
        }
    }
}

/// Split out the network location of a URL the way a generic URL splitter
/// does: a scheme is only recognized if it starts with a letter, and the
/// authority exists only when `//` follows it. User-info and port stay in
/// the returned slice.
///
/// Returns `None` when the authority has unbalanced IPv6 brackets.
pub fn authority(url: &str) -> Option<&str> {
    let mut rest = url;
    if let Some(colon) = url.find(':') {
        let scheme = &url[..colon];
        let valid_scheme = scheme
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if valid_scheme {
            rest = &url[colon + 1..];
        }
    }

    let Some(after_slashes) = rest.strip_prefix("//") else {
        return Some("");
    };
    let end = after_slashes
        .find(['/', '?', '#'])
        .unwrap_or(after_slashes.len());
    let netloc = &after_slashes[..end];

    if netloc.contains('[') != netloc.contains(']') {
        return None;
    }
    Some(netloc)
}

/// Turns raw URL text into [`UrlSignals`].
pub struct UrlLexicalAnalyzer {
    ip_host_regex: Regex,
    tld_analyzer: TldRiskAnalyzer,
}

impl UrlLexicalAnalyzer {
    pub fn new() -> Result<Self, ExtractionError> {
        Ok(Self {
            // Four 1-3 digit groups at the start of the host, octets unbounded
            ip_host_regex: Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}")?,
            tld_analyzer: TldRiskAnalyzer::new(),
        })
    }

    /// Extract signals from raw input bytes, e.g. a command-line argument.
    pub fn extract_bytes(&self, raw: &[u8]) -> Result<UrlSignals, ExtractionError> {
        let url = std::str::from_utf8(raw)?;
        self.extract(url)
    }

    pub fn extract(&self, url: &str) -> Result<UrlSignals, ExtractionError> {
        let counts = CharCounts::scan(url);
        let has_ip_host = self.has_ip_host(url);
        let suspicious_tld = self.tld_analyzer.is_suspicious(url);

        let signals = UrlSignals {
            length: counts.chars,
            dot_count: counts.dots,
            hyphen_count: counts.hyphens,
            has_https: url.starts_with("https://"),
            has_http: url.starts_with("http://"),
            has_ip_host,
            digit_ratio: counts.digit_ratio(),
            suspicious_tld,
            special_char_count: counts.specials,
        };

        log::debug!("URL signals for {:?}: {:?}", url, signals);
        Ok(signals)
    }

    fn has_ip_host(&self, url: &str) -> bool {
        match authority(url) {
            Some(host) => self.ip_host_regex.is_match(host),
            None => {
                log::debug!("Could not split authority of {:?}", url);
                false
            }
        }
    }
}
