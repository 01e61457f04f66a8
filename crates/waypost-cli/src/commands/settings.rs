use anyhow::Result;
use console::style;
use waypost_core::{AppConfig, ConfigStore};

/// Print the configuration: file location, profiles and rules
pub fn show(store: &ConfigStore) -> Result<()> {
    let config = store.try_load()?;
    print!("{}", render(&config, store));
    Ok(())
}

/// Idle mode: the configuration plus pointers to the editing commands
pub fn idle(store: &ConfigStore) -> Result<()> {
    show(store)?;
    println!();
    println!("Run 'waypost <URL>' to open a link, or 'waypost --help' to edit profiles and rules.");
    Ok(())
}

fn render(config: &AppConfig, store: &ConfigStore) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}\n",
        style("Waypost settings").bold().cyan()
    ));
    output.push_str(&format!("Config file: {}\n", store.path().display()));
    if let Some(default) = &config.default_profile {
        output.push_str(&format!("Default profile: {}\n", default));
    }

    output.push_str(&format!("\n{}\n", style("Profiles").bold()));
    if config.browsers.is_empty() {
        output.push_str("  (none) - add with 'waypost profile detect' or 'waypost profile add'\n");
    }
    for profile in &config.browsers {
        output.push_str(&format!("  {:<24} {}\n", profile.id, profile.name));
    }

    output.push_str(&format!("\n{}\n", style("Rules").bold()));
    if config.rules.is_empty() {
        output.push_str("  (none) - every URL will ask which profile to use\n");
    }
    for (idx, rule) in config.rules.iter().enumerate() {
        output.push_str(&format!(
            "  {:>3}. {:<7} {} -> {}\n",
            idx + 1,
            rule.pattern_type,
            rule.pattern,
            rule.profiles.join(", ")
        ));
    }

    output
}
