//! Configuration loading and validation
//!
//! Configuration lives in a TOML file with kebab-case keys. Loading parses
//! the file, validates it semantically, and can compute a content hash so
//! runs can record which configuration produced a snapshot.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
pub use validation::validate;
