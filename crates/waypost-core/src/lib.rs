pub mod config;
pub mod error;
pub mod routing;

pub use config::{AppConfig, BrowserProfile, ConfigStore, DetectedProfile, PatternType, UrlRule};
pub use error::{Error, Result};
pub use routing::{Choice, Dispatch, RouteResult, decide, route};
