use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Complete Waypost configuration: the profile table and the ordered rule list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Persisted for the settings editor; routing never consults it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub browsers: Vec<BrowserProfile>,
    #[serde(default)]
    pub rules: Vec<UrlRule>,
}

/// A browser executable plus the fixed arguments that select one of its profiles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserProfile {
    /// Stable identifier referenced by rules
    pub id: String,
    pub name: String,
    pub executable: String,
    /// Launch arguments, excluding the URL
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// How a rule's pattern is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    /// Case-insensitive regular expression over the normalized URL
    #[serde(alias = "Regex")]
    Regex,
    /// Host equals the domain or is one of its subdomains
    #[default]
    #[serde(alias = "Domain")]
    Domain,
    /// Case-insensitive literal prefix of the normalized URL
    #[serde(alias = "Prefix")]
    Prefix,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Regex => "regex",
            PatternType::Domain => "domain",
            PatternType::Prefix => "prefix",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PatternType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "regex" => Ok(PatternType::Regex),
            "domain" => Ok(PatternType::Domain),
            "prefix" => Ok(PatternType::Prefix),
            other => Err(crate::Error::InvalidRule(format!(
                "Unknown pattern type '{}' (expected regex, domain or prefix)",
                other
            ))),
        }
    }
}

/// A pattern plus the profiles it offers for matching URLs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRule {
    pub pattern: String,
    #[serde(default)]
    pub pattern_type: PatternType,
    /// Profile ids, in the order they should be offered
    #[serde(default)]
    pub profiles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl UrlRule {
    pub fn new(pattern: impl Into<String>, pattern_type: PatternType, profiles: Vec<String>) -> Self {
        Self {
            pattern: pattern.into(),
            pattern_type,
            profiles,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A browser profile found on this machine, not yet part of the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedProfile {
    pub name: String,
    pub executable: String,
    pub args: Vec<String>,
}
