//! Configuration loading and validation
//!
//! Sitewalk is configured through a TOML file with a `[crawler]` table for the
//! crawl itself and an optional `[http]` table for the transport.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, HttpConfig};
pub use validation::validate;
