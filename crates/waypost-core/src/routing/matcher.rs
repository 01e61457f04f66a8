use crate::config::{PatternType, UrlRule};
use regex::RegexBuilder;
use url::Url;

/// A URL canonicalized once before rule evaluation
///
/// Parseable URLs are re-serialized by the `url` crate; anything else is
/// lowercased as-is. Both forms lose a single trailing `/`.
#[derive(Debug, Clone)]
pub struct NormalizedUrl {
    text: String,
    parsed: Option<Url>,
}

impl NormalizedUrl {
    pub fn new(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) => {
                let text = strip_trailing_slash(url.as_str()).to_string();
                Self {
                    text,
                    parsed: Some(url),
                }
            }
            Err(e) => {
                tracing::debug!("Treating {:?} as an opaque string: {}", raw, e);
                Self {
                    text: strip_trailing_slash(&raw.to_lowercase()).to_string(),
                    parsed: None,
                }
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lowercased host, if the URL parsed and has one
    pub fn host(&self) -> Option<String> {
        self.parsed
            .as_ref()
            .and_then(|url| url.host_str())
            .map(|host| host.to_lowercase())
    }
}

fn strip_trailing_slash(s: &str) -> &str {
    s.strip_suffix('/').unwrap_or(s)
}

/// Check whether a rule's pattern matches a normalized URL
///
/// Malformed patterns and unparseable URLs never match; they are not errors.
pub fn matches(url: &NormalizedUrl, rule: &UrlRule) -> bool {
    match rule.pattern_type {
        PatternType::Regex => matches_regex(url, &rule.pattern),
        PatternType::Domain => matches_domain(url, &rule.pattern),
        PatternType::Prefix => matches_prefix(url, &rule.pattern),
    }
}

fn matches_regex(url: &NormalizedUrl, pattern: &str) -> bool {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => re.is_match(url.as_str()),
        Err(e) => {
            tracing::debug!("Invalid regex pattern '{}': {}", pattern, e);
            false
        }
    }
}

fn matches_domain(url: &NormalizedUrl, domain: &str) -> bool {
    let Some(host) = url.host() else {
        return false;
    };

    let domain = domain.to_lowercase();
    let domain = domain.trim_start_matches('.');

    host == domain || host.ends_with(&format!(".{}", domain))
}

fn matches_prefix(url: &NormalizedUrl, prefix: &str) -> bool {
    url.as_str()
        .to_lowercase()
        .starts_with(&prefix.to_lowercase())
}
