use crate::OutputFormat;
use anyhow::Result;
use console::style;
use serde::Serialize;
use waypost_core::routing::NormalizedUrl;
use waypost_core::{ConfigStore, Dispatch, decide, route};

/// What would happen to a URL, without launching anything
#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub url: String,
    pub normalized: String,
    pub matched: Vec<String>,
    pub decision: String,
    pub candidates: Vec<String>,
}

pub fn build_report(url: &str, store: &ConfigStore) -> RouteReport {
    let config = store.load();
    let result = route(url, &config);
    let matched = result
        .matched_profiles
        .iter()
        .map(|p| p.id.clone())
        .collect();

    let (decision, candidates) = match decide(result, &config) {
        Dispatch::AutoLaunch(profile) => ("launch", vec![profile.id]),
        Dispatch::OfferChoice(profiles) => {
            ("ask", profiles.into_iter().map(|p| p.id).collect())
        }
        Dispatch::ReportNoProfiles => ("no-profiles", vec![]),
    };

    RouteReport {
        url: url.to_string(),
        normalized: NormalizedUrl::new(url).as_str().to_string(),
        matched,
        decision: decision.to_string(),
        candidates,
    }
}

pub fn execute(url: &str, store: &ConfigStore, format: OutputFormat) -> Result<()> {
    let report = build_report(url, store);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Pretty => {
            println!("URL:        {}", style(&report.url).cyan());
            println!("Normalized: {}", report.normalized);
            if report.matched.is_empty() {
                println!("Matched:    (no rule matched)");
            } else {
                println!("Matched:    {}", report.matched.join(", "));
            }
            match report.decision.as_str() {
                "launch" => println!("Decision:   open in {}", style(&report.candidates[0]).green()),
                "ask" => println!("Decision:   ask between {}", report.candidates.join(", ")),
                _ => println!("Decision:   {}", style("no profiles configured").yellow()),
            }
        }
    }

    Ok(())
}
