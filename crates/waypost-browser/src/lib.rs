mod detect;
mod env;
mod error;
mod launcher;

pub use detect::{BrowserDetector, parse_local_state, parse_profiles_ini};
pub use env::{Environment, SystemEnvironment};
pub use error::{Error, Result};
pub use launcher::{BrowserLauncher, quote_arg};
