use crate::{Error, Result};
use waypost_core::config::DetectedProfile;

/// Read the profile list out of a Chromium `Local State` file
///
/// Every entry of `profile.info_cache` becomes one profile selected with
/// `--profile-directory=<folder>`, in the order the file lists them. Entries
/// without a display name fall back to the folder name.
pub fn parse_local_state(
    browser_name: &str,
    executable: &str,
    content: &str,
) -> Result<Vec<DetectedProfile>> {
    let state: serde_json::Value = serde_json::from_str(content)?;

    let info_cache = state
        .get("profile")
        .and_then(|p| p.get("info_cache"))
        .and_then(|c| c.as_object())
        .ok_or_else(|| Error::Detection(format!("{}: no profile.info_cache", browser_name)))?;

    Ok(info_cache
        .iter()
        .map(|(folder, info)| {
            let display_name = info
                .get("name")
                .and_then(|n| n.as_str())
                .unwrap_or(folder);

            DetectedProfile {
                name: format!("{} - {}", browser_name, display_name),
                executable: executable.to_string(),
                args: vec![format!("--profile-directory={}", folder)],
            }
        })
        .collect())
}
