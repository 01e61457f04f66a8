//! Discovery of installed browsers and their user profiles.
//!
//! Chromium-family browsers list their profiles in a `Local State` JSON file
//! inside the user data directory; Firefox keeps them in `profiles.ini`. Any
//! missing file or parse failure just means nothing is detected for that
//! browser.

mod chromium;
mod firefox;

pub use chromium::parse_local_state;
pub use firefox::parse_profiles_ini;

use crate::env::Environment;
use std::path::PathBuf;
use waypost_core::config::DetectedProfile;

/// Which per-user directory a browser's data lives under
#[derive(Debug, Clone, Copy)]
#[cfg_attr(not(windows), allow(dead_code))]
enum DataRoot {
    Home,
    Config,
    LocalData,
}

/// Where to look for one browser
struct BrowserLocation {
    name: &'static str,
    /// Absolute install locations, checked in order
    install_paths: &'static [&'static str],
    /// Install location relative to the local data dir (per-user installs)
    local_install: Option<&'static str>,
    /// Program names looked up on PATH
    programs: &'static [&'static str],
    data_root: DataRoot,
    /// Components of the user data directory below `data_root`
    data_dir: &'static [&'static str],
}

#[cfg(target_os = "linux")]
const CHROMIUM_BROWSERS: &[BrowserLocation] = &[
    BrowserLocation {
        name: "Google Chrome",
        install_paths: &["/usr/bin/google-chrome", "/usr/bin/google-chrome-stable", "/opt/google/chrome/chrome"],
        local_install: None,
        programs: &["google-chrome", "google-chrome-stable"],
        data_root: DataRoot::Config,
        data_dir: &["google-chrome"],
    },
    BrowserLocation {
        name: "Microsoft Edge",
        install_paths: &["/usr/bin/microsoft-edge", "/usr/bin/microsoft-edge-stable"],
        local_install: None,
        programs: &["microsoft-edge", "microsoft-edge-stable"],
        data_root: DataRoot::Config,
        data_dir: &["microsoft-edge"],
    },
    BrowserLocation {
        name: "Vivaldi",
        install_paths: &["/usr/bin/vivaldi", "/usr/bin/vivaldi-stable"],
        local_install: None,
        programs: &["vivaldi", "vivaldi-stable"],
        data_root: DataRoot::Config,
        data_dir: &["vivaldi"],
    },
    BrowserLocation {
        name: "Brave",
        install_paths: &["/usr/bin/brave-browser", "/usr/bin/brave"],
        local_install: None,
        programs: &["brave-browser", "brave"],
        data_root: DataRoot::Config,
        data_dir: &["BraveSoftware", "Brave-Browser"],
    },
    BrowserLocation {
        name: "Chromium",
        install_paths: &["/usr/bin/chromium", "/usr/bin/chromium-browser"],
        local_install: None,
        programs: &["chromium", "chromium-browser"],
        data_root: DataRoot::Config,
        data_dir: &["chromium"],
    },
];

#[cfg(target_os = "macos")]
const CHROMIUM_BROWSERS: &[BrowserLocation] = &[
    BrowserLocation {
        name: "Google Chrome",
        install_paths: &["/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"],
        local_install: None,
        programs: &[],
        data_root: DataRoot::Config,
        data_dir: &["Google", "Chrome"],
    },
    BrowserLocation {
        name: "Microsoft Edge",
        install_paths: &["/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge"],
        local_install: None,
        programs: &[],
        data_root: DataRoot::Config,
        data_dir: &["Microsoft Edge"],
    },
    BrowserLocation {
        name: "Vivaldi",
        install_paths: &["/Applications/Vivaldi.app/Contents/MacOS/Vivaldi"],
        local_install: None,
        programs: &[],
        data_root: DataRoot::Config,
        data_dir: &["Vivaldi"],
    },
    BrowserLocation {
        name: "Brave",
        install_paths: &["/Applications/Brave Browser.app/Contents/MacOS/Brave Browser"],
        local_install: None,
        programs: &[],
        data_root: DataRoot::Config,
        data_dir: &["BraveSoftware", "Brave-Browser"],
    },
    BrowserLocation {
        name: "Chromium",
        install_paths: &["/Applications/Chromium.app/Contents/MacOS/Chromium"],
        local_install: None,
        programs: &[],
        data_root: DataRoot::Config,
        data_dir: &["Chromium"],
    },
];

#[cfg(target_os = "windows")]
const CHROMIUM_BROWSERS: &[BrowserLocation] = &[
    BrowserLocation {
        name: "Google Chrome",
        install_paths: &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ],
        local_install: None,
        programs: &["chrome"],
        data_root: DataRoot::LocalData,
        data_dir: &["Google", "Chrome", "User Data"],
    },
    BrowserLocation {
        name: "Microsoft Edge",
        install_paths: &[
            r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
            r"C:\Program Files\Microsoft\Edge\Application\msedge.exe",
        ],
        local_install: None,
        programs: &["msedge"],
        data_root: DataRoot::LocalData,
        data_dir: &["Microsoft", "Edge", "User Data"],
    },
    BrowserLocation {
        name: "Vivaldi",
        install_paths: &[
            r"C:\Program Files\Vivaldi\Application\vivaldi.exe",
            r"C:\Program Files (x86)\Vivaldi\Application\vivaldi.exe",
        ],
        local_install: Some(r"Vivaldi\Application\vivaldi.exe"),
        programs: &["vivaldi"],
        data_root: DataRoot::LocalData,
        data_dir: &["Vivaldi", "User Data"],
    },
    BrowserLocation {
        name: "Brave",
        install_paths: &[
            r"C:\Program Files\BraveSoftware\Brave-Browser\Application\brave.exe",
            r"C:\Program Files (x86)\BraveSoftware\Brave-Browser\Application\brave.exe",
        ],
        local_install: None,
        programs: &["brave"],
        data_root: DataRoot::LocalData,
        data_dir: &["BraveSoftware", "Brave-Browser", "User Data"],
    },
];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const CHROMIUM_BROWSERS: &[BrowserLocation] = &[];

#[cfg(target_os = "linux")]
const FIREFOX: BrowserLocation = BrowserLocation {
    name: "Firefox",
    install_paths: &["/usr/bin/firefox", "/usr/lib/firefox/firefox"],
    local_install: None,
    programs: &["firefox"],
    data_root: DataRoot::Home,
    data_dir: &[".mozilla", "firefox"],
};

#[cfg(target_os = "macos")]
const FIREFOX: BrowserLocation = BrowserLocation {
    name: "Firefox",
    install_paths: &["/Applications/Firefox.app/Contents/MacOS/firefox"],
    local_install: None,
    programs: &[],
    data_root: DataRoot::Config,
    data_dir: &["Firefox"],
};

#[cfg(target_os = "windows")]
const FIREFOX: BrowserLocation = BrowserLocation {
    name: "Firefox",
    install_paths: &[
        r"C:\Program Files\Mozilla Firefox\firefox.exe",
        r"C:\Program Files (x86)\Mozilla Firefox\firefox.exe",
    ],
    local_install: None,
    programs: &["firefox"],
    data_root: DataRoot::Config,
    data_dir: &["Mozilla", "Firefox"],
};

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const FIREFOX: BrowserLocation = BrowserLocation {
    name: "Firefox",
    install_paths: &[],
    local_install: None,
    programs: &["firefox"],
    data_root: DataRoot::Home,
    data_dir: &[".mozilla", "firefox"],
};

/// Finds browser profiles installed for the current user
pub struct BrowserDetector<E: Environment> {
    env: E,
}

impl<E: Environment> BrowserDetector<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    /// Detect profiles of every supported browser
    ///
    /// Chromium-family browsers come first, Firefox last.
    pub fn detect_all(&self) -> Vec<DetectedProfile> {
        let mut results = Vec::new();

        for browser in CHROMIUM_BROWSERS {
            results.extend(self.detect_chromium(browser));
        }
        results.extend(self.detect_firefox(&FIREFOX));

        tracing::debug!("Detected {} browser profiles", results.len());
        results
    }

    fn detect_chromium(&self, browser: &BrowserLocation) -> Vec<DetectedProfile> {
        let Some(exe) = self.find_executable(browser) else {
            return Vec::new();
        };
        let Some(user_data_dir) = self.data_dir(browser) else {
            return Vec::new();
        };

        let local_state = user_data_dir.join("Local State");
        let content = match self.env.read_to_string(&local_state) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("{}: cannot read {}: {}", browser.name, local_state.display(), e);
                return Vec::new();
            }
        };

        match parse_local_state(browser.name, &exe.to_string_lossy(), &content) {
            Ok(profiles) => profiles,
            Err(e) => {
                tracing::debug!("{}: ignoring {}: {}", browser.name, local_state.display(), e);
                Vec::new()
            }
        }
    }

    fn detect_firefox(&self, browser: &BrowserLocation) -> Vec<DetectedProfile> {
        let Some(exe) = self.find_executable(browser) else {
            return Vec::new();
        };
        let Some(profiles_dir) = self.data_dir(browser) else {
            return Vec::new();
        };

        let ini_path = profiles_dir.join("profiles.ini");
        match self.env.read_to_string(&ini_path) {
            Ok(content) => parse_profiles_ini(&exe.to_string_lossy(), &content, &profiles_dir),
            Err(e) => {
                tracing::debug!("{}: cannot read {}: {}", browser.name, ini_path.display(), e);
                Vec::new()
            }
        }
    }

    /// Install paths first, then per-user installs, then PATH
    fn find_executable(&self, browser: &BrowserLocation) -> Option<PathBuf> {
        let local = browser
            .local_install
            .and_then(|rel| self.env.data_local_dir().map(|dir| dir.join(rel)));

        let found = browser
            .install_paths
            .iter()
            .map(PathBuf::from)
            .chain(local)
            .find(|path| self.env.is_file(path))
            .or_else(|| {
                browser
                    .programs
                    .iter()
                    .find_map(|program| self.env.find_program(program))
            });

        if let Some(path) = &found {
            tracing::debug!("{}: found at {}", browser.name, path.display());
        }
        found
    }

    fn data_dir(&self, browser: &BrowserLocation) -> Option<PathBuf> {
        let root = match browser.data_root {
            DataRoot::Home => self.env.home_dir(),
            DataRoot::Config => self.env.config_dir(),
            DataRoot::LocalData => self.env.data_local_dir(),
        }?;

        Some(browser.data_dir.iter().fold(root, |dir, part| dir.join(part)))
    }
}
