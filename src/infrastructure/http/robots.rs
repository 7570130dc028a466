//! Minimal robots.txt evaluation: User-agent groups with Disallow/Allow
//! prefix rules. Longest matching rule wins, Allow breaks ties.

/// Parsed exclusion rules for one host, already narrowed to the most
/// specific user-agent group for our crawler.
#[derive(Debug, Clone, Default)]
pub struct RobotsRules {
    /// (path prefix, allowed) pairs from the selected group.
    rules: Vec<(String, bool)>,
}

impl RobotsRules {
    /// Rules that allow everything, used when a host has no robots.txt.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Parse a robots.txt body, selecting the group for `agent` when present
    /// and falling back to the wildcard group.
    pub fn parse(body: &str, agent: &str) -> Self {
        let agent_token = agent
            .split(['/', ' '])
            .next()
            .unwrap_or(agent)
            .to_lowercase();

        let mut wildcard: Vec<(String, bool)> = Vec::new();
        let mut specific: Vec<(String, bool)> = Vec::new();
        let mut current_agents: Vec<String> = Vec::new();
        let mut in_group_body = false;

        for raw in body.lines() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let Some((field, value)) = line.split_once(':') else {
                continue;
            };
            let field = field.trim().to_lowercase();
            let value = value.trim();

            match field.as_str() {
                "user-agent" => {
                    // A user-agent line after rules starts a new group.
                    if in_group_body {
                        current_agents.clear();
                        in_group_body = false;
                    }
                    current_agents.push(value.to_lowercase());
                }
                "disallow" | "allow" => {
                    in_group_body = true;
                    // An empty Disallow means "allow everything".
                    if value.is_empty() {
                        continue;
                    }
                    let allowed = field == "allow";
                    for ua in &current_agents {
                        if ua == "*" {
                            wildcard.push((value.to_string(), allowed));
                        } else if agent_token.contains(ua.as_str()) || ua.contains(&agent_token) {
                            specific.push((value.to_string(), allowed));
                        }
                    }
                }
                _ => {}
            }
        }

        let rules = if specific.is_empty() { wildcard } else { specific };
        Self { rules }
    }

    /// Whether the crawler may fetch this path.
    pub fn allows(&self, path: &str) -> bool {
        let path = if path.is_empty() { "/" } else { path };
        let mut verdict = true;
        let mut best_len = 0;
        for (prefix, allowed) in &self.rules {
            if path.starts_with(prefix.as_str()) {
                let len = prefix.len();
                // Longest match wins; Allow wins a tie.
                if len > best_len || (len == best_len && *allowed) {
                    best_len = len;
                    verdict = *allowed;
                }
            }
        }
        verdict
    }
}
