use super::RouteResult;
use crate::config::{AppConfig, BrowserProfile};

/// What to do with a routed URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Exactly one profile matched; open it without asking
    AutoLaunch(BrowserProfile),
    /// Let the user pick from these candidates
    OfferChoice(Vec<BrowserProfile>),
    /// Nothing matched and no profiles are configured
    ReportNoProfiles,
}

/// Outcome of an interactive pick, delivered exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Chosen {
        profile: BrowserProfile,
        /// Persist a domain rule so the next visit opens directly
        remember: bool,
    },
    Cancelled,
}

/// Decide between launching, asking, and reporting a missing setup
///
/// With zero or several matches the user is asked; when nothing matched the
/// whole profile list is offered instead.
pub fn decide(result: RouteResult, config: &AppConfig) -> Dispatch {
    let mut matched = result.matched_profiles;

    if matched.len() == 1 {
        return Dispatch::AutoLaunch(matched.remove(0));
    }

    let candidates = if matched.is_empty() {
        config.browsers.clone()
    } else {
        matched
    };

    if candidates.is_empty() {
        Dispatch::ReportNoProfiles
    } else {
        Dispatch::OfferChoice(candidates)
    }
}
