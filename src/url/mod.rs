//! URL handling for sitewalk
//!
//! This module provides the canonicalization and scope check applied to every
//! href before it can enter the crawl frontier.

mod normalize;

pub use normalize::canonicalize;
