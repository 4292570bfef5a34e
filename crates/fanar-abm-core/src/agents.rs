//! Stakeholder archetypes and the groups they belong to.
//!
//! The registry is immutable once built. The seven built-in agents are the demo catalogue;
//! an alternative table can be loaded from TOML:
//!
//! ```toml
//! [[agents]]
//! name = "Farmer"
//! groups = ["employed"]
//! ```

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Built-in catalogue, in registry order. Index matters: it feeds the severity formula.
const BUILTIN_AGENTS: &[(&str, &[&str])] = &[
    ("Farmer", &["employed"]),
    ("Trader", &["employed"]),
    ("Urban resident", &["youths", "unemployed", "employed"]),
    ("Government agency", &["institutions"]),
    ("NGO", &["institutions", "women"]),
    ("Women (community)", &["women"]),
    ("Youth (community)", &["youths"]),
];

/// A stakeholder archetype used as one unit of simulated impact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl Agent {
    pub fn new(name: impl Into<String>, groups: &[&str]) -> Self {
        Self {
            name: name.into(),
            groups: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    /// True when this agent is tagged with `group` (groups are stored lower-case).
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

#[derive(Debug, Deserialize)]
struct AgentTable {
    #[serde(default)]
    agents: Vec<Agent>,
}

/// Ordered, validated agent catalogue.
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
}

impl AgentRegistry {
    /// The seven demo stakeholders.
    pub fn builtin() -> Self {
        let agents = BUILTIN_AGENTS
            .iter()
            .map(|(name, groups)| Agent::new(*name, groups))
            .collect();
        Self { agents }
    }

    /// Validate and wrap an injected table. Group names are trimmed, lower-cased and
    /// de-duplicated (first occurrence kept); agent names must be non-empty and unique.
    pub fn new(agents: Vec<Agent>) -> Result<Self, RegistryError> {
        if agents.is_empty() {
            return Err(RegistryError::Invalid("at least one agent is required".into()));
        }

        let mut seen_names = HashSet::new();
        let mut normalized = Vec::with_capacity(agents.len());
        for agent in agents {
            let name = agent.name.trim().to_string();
            if name.is_empty() {
                return Err(RegistryError::Invalid("agent name must not be empty".into()));
            }
            if !seen_names.insert(name.clone()) {
                return Err(RegistryError::Invalid(format!("duplicate agent name: {}", name)));
            }

            let mut groups: Vec<String> = Vec::with_capacity(agent.groups.len());
            for group in agent.groups {
                let group = group.trim().to_lowercase();
                if group.is_empty() {
                    return Err(RegistryError::Invalid(format!(
                        "agent {} has an empty group name",
                        name
                    )));
                }
                if !groups.contains(&group) {
                    groups.push(group);
                }
            }
            normalized.push(Agent { name, groups });
        }

        Ok(Self { agents: normalized })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, RegistryError> {
        let table: AgentTable = toml::from_str(text)?;
        Self::new(table.agents)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Agents in registry order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Union of all group names, in first-seen order.
    pub fn groups(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for group in self.agents.iter().flat_map(|a| a.groups.iter()) {
            if !out.contains(&group.as_str()) {
                out.push(group);
            }
        }
        out
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
