use super::picker;
use anyhow::{Result, anyhow, bail};
use waypost_browser::BrowserLauncher;
use waypost_core::{BrowserProfile, Choice, ConfigStore, Dispatch, decide, route};

/// Route a URL and open it in the selected browser profile
///
/// With `dry_run` the browser command is printed instead of started.
pub fn execute(url: &str, store: &ConfigStore, dry_run: bool) -> Result<()> {
    if !is_web_url(url) {
        bail!("'{}' is not an http:// or https:// URL", url);
    }

    let config = store.load();
    let result = route(url, &config);

    match decide(result, &config) {
        Dispatch::AutoLaunch(profile) => {
            tracing::debug!("Single match, launching {}", profile.name);
            launch(&profile, url, dry_run)
        }
        Dispatch::ReportNoProfiles => Err(anyhow!(
            "No browser profiles configured.\n\
             Add one with 'waypost profile detect' or 'waypost profile add'.\n\
             Config file: {}",
            store.path().display()
        )),
        Dispatch::OfferChoice(candidates) => {
            tracing::debug!("Offering {} profiles", candidates.len());

            match picker::pick(url, candidates)? {
                Choice::Chosen { profile, remember } => {
                    if remember {
                        remember_choice(store, config, url, &profile);
                    }
                    launch(&profile, url, dry_run)
                }
                Choice::Cancelled => {
                    tracing::info!("Cancelled, not opening {}", url);
                    Ok(())
                }
            }
        }
    }
}

/// Whether the invocation argument is something Waypost should route
pub fn is_web_url(arg: &str) -> bool {
    let lower = arg.to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Persist a domain rule for the chosen profile; failures only get logged
fn remember_choice(
    store: &ConfigStore,
    mut config: waypost_core::AppConfig,
    url: &str,
    profile: &BrowserProfile,
) {
    let rule_count = config.rules.len();
    if config.remember_choice(url, &profile.id).is_none() {
        tracing::warn!("Cannot remember a choice for {}: no host", url);
        return;
    }

    if !matches!(decide(route(url, &config), &config), Dispatch::AutoLaunch(_)) {
        tracing::warn!(
            "Other rules also match {}, so it will still ask. See 'waypost rule list'.",
            url
        );
    }

    if config.rules.len() == rule_count {
        return;
    }

    if let Err(e) = store.save(&config) {
        tracing::warn!("Failed to save remembered rule: {}", e);
    }
}

fn launch(profile: &BrowserProfile, url: &str, dry_run: bool) -> Result<()> {
    let launcher = BrowserLauncher::new(profile, url);

    if dry_run {
        println!(
            "{} {}",
            launcher.executable().display(),
            launcher.arg_string()
        );
        return Ok(());
    }

    launcher
        .launch()
        .map_err(|e| anyhow!("Failed to launch {}: {}", profile.name, e))
}
