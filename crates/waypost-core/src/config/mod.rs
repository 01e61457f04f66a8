mod edit;
mod store;
mod types;

pub use edit::{RuleMove, generate_id, parse_args};
pub use store::ConfigStore;
pub use types::*;
