use crate::{Error, Result};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use waypost_core::BrowserProfile;

/// Starts a browser profile on a URL
pub struct BrowserLauncher {
    executable: PathBuf,
    profile_args: Vec<String>,
    url: String,
}

impl BrowserLauncher {
    /// Create a launcher for a profile and the URL to open
    pub fn new(profile: &BrowserProfile, url: &str) -> Self {
        Self {
            executable: PathBuf::from(&profile.executable),
            profile_args: profile.args.clone(),
            url: url.to_string(),
        }
    }

    /// Launch the browser as a detached process
    ///
    /// The child is not waited on and its output is discarded.
    pub fn launch(&self) -> Result<()> {
        let mut command = Command::new(&self.executable);
        self.apply_args(&mut command);

        let child = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| Error::Launch {
                executable: self.executable.clone(),
                source,
            })?;

        tracing::info!(
            "Launched {} (pid {}) with: {}",
            self.executable.display(),
            child.id(),
            self.arg_string()
        );

        Ok(())
    }

    /// Profile arguments followed by the URL
    pub fn build_args(&self) -> Vec<String> {
        let mut args = self.profile_args.clone();
        args.push(self.url.clone());
        args
    }

    /// The quoted, space-joined argument line
    pub fn arg_string(&self) -> String {
        self.build_args()
            .iter()
            .map(|arg| quote_arg(arg))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    // Windows hands the joined line to CreateProcess as-is; elsewhere the
    // unquoted argv is already what the browser would receive.
    #[cfg(windows)]
    fn apply_args(&self, command: &mut Command) {
        use std::os::windows::process::CommandExt;
        command.raw_arg(self.arg_string());
    }

    #[cfg(not(windows))]
    fn apply_args(&self, command: &mut Command) {
        command.args(self.build_args());
    }
}

/// Wrap an argument in double quotes if it has a space and is not already quoted
///
/// Embedded quotes and other shell metacharacters are left alone.
pub fn quote_arg(arg: &str) -> Cow<'_, str> {
    if arg.contains(' ') && !arg.starts_with('"') {
        Cow::Owned(format!("\"{}\"", arg))
    } else {
        Cow::Borrowed(arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(executable: &str, args: &[&str]) -> BrowserProfile {
        BrowserProfile {
            id: "test".to_string(),
            name: "Test".to_string(),
            executable: executable.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            icon: None,
        }
    }

    #[test]
    fn test_url_is_last_argument() {
        let launcher = BrowserLauncher::new(
            &profile("/usr/bin/firefox", &["--profile", "/tmp/ff", "-no-remote"]),
            "https://example.com",
        );

        assert_eq!(
            launcher.build_args(),
            vec!["--profile", "/tmp/ff", "-no-remote", "https://example.com"]
        );
        assert_eq!(launcher.executable(), Path::new("/usr/bin/firefox"));
    }

    #[test]
    fn test_arg_string_quotes_only_spaced_args() {
        let launcher = BrowserLauncher::new(
            &profile("chrome.exe", &["--profile-directory=Default"]),
            "http://a.com/x y",
        );

        assert_eq!(
            launcher.arg_string(),
            r#"--profile-directory=Default "http://a.com/x y""#
        );
    }

    #[test]
    fn test_quote_arg() {
        assert_eq!(quote_arg("--profile-directory=Profile 1"), "\"--profile-directory=Profile 1\"");
        assert_eq!(quote_arg("\"already quoted\""), "\"already quoted\"");
        assert_eq!(quote_arg("plain"), "plain");
        assert_eq!(quote_arg("say \"hi\" now"), "\"say \"hi\" now\"");
    }

    #[test]
    fn test_launch_missing_executable_fails() {
        let launcher = BrowserLauncher::new(
            &profile("/nonexistent/waypost/browser", &[]),
            "https://example.com",
        );

        let err = launcher.launch().unwrap_err();
        assert!(matches!(err, Error::Launch { .. }));
        assert!(err.to_string().contains("/nonexistent/waypost/browser"));
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_spawns_detached_process() {
        let launcher = BrowserLauncher::new(&profile("/bin/sh", &["-c", "exit 0"]), "ignored");
        assert!(launcher.launch().is_ok());
    }
}
