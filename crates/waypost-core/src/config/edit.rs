//! Pure edits on an [`AppConfig`] snapshot.
//!
//! Every settings change is a transaction: load a snapshot from the
//! [`ConfigStore`](super::ConfigStore), apply one of these edits, save the result.

use super::types::{AppConfig, BrowserProfile, DetectedProfile, PatternType, UrlRule};
use crate::{Error, Result};
use url::Url;

/// Direction for reordering a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMove {
    Up,
    Down,
}

impl AppConfig {
    /// Look up a profile by id
    pub fn profile(&self, id: &str) -> Option<&BrowserProfile> {
        self.browsers.iter().find(|b| b.id == id)
    }

    /// Derive an id from a display name that is unique within this config
    pub fn generate_id(&self, name: &str) -> String {
        let base = generate_id(name);
        let base = if base.is_empty() {
            "profile".to_string()
        } else {
            base
        };

        if self.profile(&base).is_none() {
            return base;
        }

        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", base, n);
            if self.profile(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    /// Add a new profile and return its generated id
    pub fn add_profile(&mut self, name: &str, executable: &str, args: Vec<String>) -> String {
        let id = self.generate_id(name);
        self.browsers.push(BrowserProfile {
            id: id.clone(),
            name: name.to_string(),
            executable: executable.to_string(),
            args,
            icon: None,
        });
        id
    }

    /// Remove a profile by id
    ///
    /// Rules that reference it are kept; the dangling id is skipped at routing time.
    pub fn remove_profile(&mut self, id: &str) -> Result<BrowserProfile> {
        let idx = self
            .browsers
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| Error::ProfileNotFound(id.to_string()))?;

        if self.default_profile.as_deref() == Some(id) {
            self.default_profile = None;
        }

        Ok(self.browsers.remove(idx))
    }

    /// Set or clear the default profile
    pub fn set_default_profile(&mut self, id: Option<&str>) -> Result<()> {
        if let Some(id) = id {
            if self.profile(id).is_none() {
                return Err(Error::ProfileNotFound(id.to_string()));
            }
        }
        self.default_profile = id.map(str::to_string);
        Ok(())
    }

    /// Add detected profiles that are not configured yet
    ///
    /// A detected profile counts as configured when some existing profile has the
    /// same executable and the same space-joined arguments. Returns the number added.
    pub fn merge_detected(&mut self, detected: &[DetectedProfile]) -> usize {
        let mut added = 0;

        for d in detected {
            let joined = d.args.join(" ");
            let exists = self
                .browsers
                .iter()
                .any(|b| b.executable == d.executable && b.args.join(" ") == joined);

            if !exists {
                self.add_profile(&d.name, &d.executable, d.args.clone());
                added += 1;
            }
        }

        added
    }

    /// Append a rule after validating it
    pub fn add_rule(&mut self, rule: UrlRule) -> Result<()> {
        if rule.pattern.trim().is_empty() {
            return Err(Error::InvalidRule("Pattern is required".to_string()));
        }
        if rule.profiles.is_empty() {
            return Err(Error::InvalidRule(
                "Select at least one profile".to_string(),
            ));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Remove the rule at `index`
    pub fn remove_rule(&mut self, index: usize) -> Result<UrlRule> {
        self.check_rule_index(index)?;
        Ok(self.rules.remove(index))
    }

    /// Move a rule one position up or down, returning its new index
    ///
    /// Moving the first rule up or the last rule down leaves the order unchanged.
    pub fn move_rule(&mut self, index: usize, direction: RuleMove) -> Result<usize> {
        self.check_rule_index(index)?;

        let target = match direction {
            RuleMove::Up if index > 0 => index - 1,
            RuleMove::Down if index + 1 < self.rules.len() => index + 1,
            _ => return Ok(index),
        };

        self.rules.swap(index, target);
        Ok(target)
    }

    /// Record a picker choice as a domain rule for the URL's host
    ///
    /// Returns `None` when the URL has no host to build a rule from. An
    /// identical domain rule already in the list is returned instead of adding
    /// another copy.
    pub fn remember_choice(&mut self, url: &str, profile_id: &str) -> Option<&UrlRule> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?.to_string();

        if let Some(idx) = self.rules.iter().position(|rule| {
            rule.pattern_type == PatternType::Domain
                && rule.pattern.eq_ignore_ascii_case(&host)
                && rule.profiles == [profile_id]
        }) {
            tracing::debug!("Rule {} already sends {} to {}", idx + 1, host, profile_id);
            return self.rules.get(idx);
        }

        tracing::debug!("Remembering {} for {}", profile_id, host);

        self.rules.push(
            UrlRule::new(host.clone(), PatternType::Domain, vec![profile_id.to_string()])
                .with_comment(format!("Auto-created from picker for {}", host)),
        );
        self.rules.last()
    }

    fn check_rule_index(&self, index: usize) -> Result<()> {
        if index >= self.rules.len() {
            return Err(Error::RuleIndex {
                index,
                len: self.rules.len(),
            });
        }
        Ok(())
    }
}

/// Turn a display name into an id: lowercase, spaces and dots become dashes
pub fn generate_id(name: &str) -> String {
    name.to_lowercase()
        .replace([' ', '.'], "-")
        .trim_matches('-')
        .to_string()
}

/// Split an argument line on spaces, honouring double quotes
///
/// Quote characters only group; they are not kept in the result.
pub fn parse_args(text: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;

    for ch in text.chars() {
        match ch {
            '"' => in_quote = !in_quote,
            ' ' if !in_quote => {
                if !current.is_empty() {
                    result.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        result.push(current);
    }

    result
}
