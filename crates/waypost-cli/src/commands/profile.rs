//! Browser profile management commands.
//!
//! A profile is a browser executable plus the arguments that select one of its
//! user profiles. Rules refer to profiles by id.
//!
//! # Examples
//!
//! ```bash
//! # Import every profile of the installed browsers
//! waypost profile detect
//!
//! # Add a profile by hand
//! waypost profile add --name "Chrome Work" --exe /usr/bin/google-chrome \
//!     --args '--profile-directory="Profile 1"'
//!
//! # List and remove
//! waypost profile list
//! waypost profile remove chrome-work
//! ```

use crate::OutputFormat;
use anyhow::Result;
use waypost_browser::{BrowserDetector, SystemEnvironment};
use waypost_core::ConfigStore;
use waypost_core::config::parse_args;

/// List configured profiles
pub fn list(store: &ConfigStore, format: OutputFormat) -> Result<()> {
    let config = store.try_load()?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&config.browsers)?);
        return Ok(());
    }

    if config.browsers.is_empty() {
        println!("No profiles configured. Run 'waypost profile detect' to import installed browsers.");
        return Ok(());
    }

    for profile in &config.browsers {
        let marker = if config.default_profile.as_deref() == Some(profile.id.as_str()) {
            "* "
        } else {
            "  "
        };
        println!("{}{:<24} {}", marker, profile.id, profile.name);
        println!("  {:<24} {} {}", "", profile.executable, profile.args.join(" "));
    }

    Ok(())
}

/// Add a profile; `args` is a single argument line with optional double quotes
pub fn add(store: &ConfigStore, name: &str, executable: &str, args: Option<&str>) -> Result<String> {
    let mut config = store.try_load()?;

    let args = args.map(parse_args).unwrap_or_default();
    let id = config.add_profile(name.trim(), executable.trim(), args);

    store.save(&config)?;
    println!("✅ Added profile '{}' ({})", name.trim(), id);

    Ok(id)
}

/// Remove a profile; rules that use it are left as they are
pub fn remove(store: &ConfigStore, id: &str) -> Result<()> {
    let mut config = store.try_load()?;

    let removed = config.remove_profile(id)?;
    let still_used = config
        .rules
        .iter()
        .filter(|rule| rule.profiles.iter().any(|p| p == id))
        .count();

    store.save(&config)?;
    println!("✅ Removed profile '{}' ({})", removed.name, removed.id);

    if still_used > 0 {
        println!(
            "⚠️  {} rule(s) still reference '{}' and will skip it when routing",
            still_used, id
        );
    }

    Ok(())
}

/// Show, set or clear the default profile
pub fn default(store: &ConfigStore, id: Option<&str>, clear: bool) -> Result<()> {
    let mut config = store.try_load()?;

    if !clear && id.is_none() {
        match &config.default_profile {
            Some(default) => println!("{}", default),
            None => println!("No default profile set"),
        }
        return Ok(());
    }

    let id = if clear { None } else { id };
    config.set_default_profile(id)?;
    store.save(&config)?;

    match id {
        Some(id) => println!("✅ Default profile set to '{}'", id),
        None => println!("✅ Default profile cleared"),
    }

    Ok(())
}

/// Detect installed browser profiles and add the ones not configured yet
pub fn detect(store: &ConfigStore, dry_run: bool) -> Result<()> {
    let detected = BrowserDetector::new(SystemEnvironment).detect_all();

    if detected.is_empty() {
        println!("No browser profiles detected.");
        return Ok(());
    }

    if dry_run {
        for d in &detected {
            println!("{:<32} {} {}", d.name, d.executable, d.args.join(" "));
        }
        return Ok(());
    }

    let mut config = store.try_load()?;
    let added = config.merge_detected(&detected);
    if added > 0 {
        store.save(&config)?;
    }

    println!(
        "✅ Detected {} profiles, added {} new ones",
        detected.len(),
        added
    );

    Ok(())
}
