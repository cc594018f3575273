//! Robots.txt rule-set wrapper
//!
//! Allow/deny evaluation is delegated to the robotstxt crate. Crawl-delay
//! is parsed by hand because the crate does not expose that directive.

use robotstxt::DefaultMatcher;

/// Parsed robots.txt rules for one domain
#[derive(Debug, Clone)]
pub struct RobotsRules {
    /// Raw robots.txt body; empty when permissive
    content: String,

    /// Permissive rule set installed when robots.txt could not be fetched
    allow_all: bool,
}

impl RobotsRules {
    /// Wraps raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Creates a rule set that permits everything
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Checks whether a URL is allowed for the given user-agent token
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.allow_all || self.content.is_empty() {
            return true;
        }
        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }

    /// Extracts the crawl delay in seconds for the given user-agent token
    ///
    /// Directives are grouped under consecutive User-agent lines. A delay in
    /// a group naming the token specifically wins over one in a `*` group.
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        if self.allow_all || self.content.is_empty() {
            return None;
        }

        let token = user_agent.to_lowercase();
        let mut group: Vec<String> = Vec::new();
        let mut in_agent_lines = false;
        let mut wildcard_delay: Option<f64> = None;
        let mut specific_delay: Option<f64> = None;

        for line in self.content.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            if key == "user-agent" {
                // A User-agent line after other directives starts a new group
                if !in_agent_lines {
                    group.clear();
                }
                group.push(value.to_lowercase());
                in_agent_lines = true;
                continue;
            }
            in_agent_lines = false;

            if key == "crawl-delay" {
                if let Ok(delay) = value.parse::<f64>() {
                    if group.iter().any(|agent| agent == "*") {
                        wildcard_delay = Some(delay);
                    }
                    if group
                        .iter()
                        .any(|agent| agent != "*" && token.contains(agent.as_str()))
                    {
                        specific_delay = Some(delay);
                    }
                }
            }
        }

        specific_delay.or(wildcard_delay)
    }
}
