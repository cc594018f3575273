//! Robots.txt compliance
//!
//! Fetching, parsing, and per-domain caching of robots.txt rules. Robots
//! fetch failures are never fatal: a domain whose robots.txt cannot be
//! retrieved gets an allow-everything rule set.

mod cache;
mod parser;

pub use cache::{RobotsCache, RobotsRecord};
pub use parser::RobotsRules;
