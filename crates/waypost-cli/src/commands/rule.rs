//! URL rule management commands.
//!
//! Rules are numbered from 1 in the order they are evaluated; `rule list`
//! shows the numbers the other commands take.

use crate::OutputFormat;
use anyhow::{Result, bail};
use waypost_core::config::RuleMove;
use waypost_core::{ConfigStore, PatternType, UrlRule};

/// List rules in evaluation order
pub fn list(store: &ConfigStore, format: OutputFormat) -> Result<()> {
    let config = store.try_load()?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&config.rules)?);
        return Ok(());
    }

    if config.rules.is_empty() {
        println!("No rules configured.");
        return Ok(());
    }

    for (idx, rule) in config.rules.iter().enumerate() {
        let profiles: Vec<String> = rule
            .profiles
            .iter()
            .map(|id| match config.profile(id) {
                Some(_) => id.clone(),
                None => format!("{} (missing)", id),
            })
            .collect();

        println!(
            "{:>3}. {:<7} {} -> {}",
            idx + 1,
            rule.pattern_type,
            rule.pattern,
            profiles.join(", ")
        );
        if let Some(comment) = &rule.comment {
            println!("     # {}", comment);
        }
    }

    Ok(())
}

/// Append a rule; every profile id must exist
pub fn add(
    store: &ConfigStore,
    pattern: &str,
    pattern_type: PatternType,
    profiles: Vec<String>,
    comment: Option<String>,
) -> Result<()> {
    let mut config = store.try_load()?;

    for id in &profiles {
        if config.profile(id).is_none() {
            bail!("Profile '{}' not found. See 'waypost profile list'.", id);
        }
    }

    let mut rule = UrlRule::new(pattern.trim(), pattern_type, profiles);
    rule.comment = comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    config.add_rule(rule)?;
    store.save(&config)?;
    println!("✅ Added rule {}", config.rules.len());

    Ok(())
}

/// Remove the rule with the given 1-based number
pub fn remove(store: &ConfigStore, number: usize) -> Result<()> {
    let mut config = store.try_load()?;

    let removed = config.remove_rule(to_index(number)?)?;
    store.save(&config)?;
    println!("✅ Removed rule {} ({} {})", number, removed.pattern_type, removed.pattern);

    Ok(())
}

/// Move a rule one position up or down
pub fn move_rule(store: &ConfigStore, number: usize, direction: RuleMove) -> Result<()> {
    let mut config = store.try_load()?;

    let new_index = config.move_rule(to_index(number)?, direction)?;
    if new_index + 1 != number {
        store.save(&config)?;
    }
    println!("✅ Rule {} is now rule {}", number, new_index + 1);

    Ok(())
}

fn to_index(number: usize) -> Result<usize> {
    if number == 0 {
        bail!("Rule numbers start at 1");
    }
    Ok(number - 1)
}
