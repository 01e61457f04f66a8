mod dispatch;
mod matcher;

pub use dispatch::{Choice, Dispatch, decide};
pub use matcher::{NormalizedUrl, matches};

use crate::config::{AppConfig, BrowserProfile};
use std::collections::HashSet;

/// Profiles eligible to open a URL, in first-match order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteResult {
    pub matched_profiles: Vec<BrowserProfile>,
    pub has_match: bool,
}

/// Evaluate every rule against a URL and collect the matching profiles
///
/// All matching rules contribute; nothing a rule adds is ever removed. Profile
/// ids are de-duplicated keeping their first position, and ids without a
/// configured profile are dropped.
pub fn route(url: &str, config: &AppConfig) -> RouteResult {
    let normalized = NormalizedUrl::new(url);
    tracing::debug!("Routing {}", normalized.as_str());

    let mut matched_ids: Vec<&str> = Vec::new();
    for (idx, rule) in config.rules.iter().enumerate() {
        if matches(&normalized, rule) {
            tracing::debug!(
                "Rule {} ({} '{}') matched: {:?}",
                idx,
                rule.pattern_type,
                rule.pattern,
                rule.profiles
            );
            matched_ids.extend(rule.profiles.iter().map(String::as_str));
        }
    }

    let mut seen = HashSet::new();
    let matched_profiles: Vec<BrowserProfile> = matched_ids
        .into_iter()
        .filter(|id| seen.insert(*id))
        .filter_map(|id| {
            let profile = config.profile(id);
            if profile.is_none() {
                tracing::debug!("Skipping unknown profile id '{}'", id);
            }
            profile.cloned()
        })
        .collect();

    RouteResult {
        has_match: !matched_profiles.is_empty(),
        matched_profiles,
    }
}
