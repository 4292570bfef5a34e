//! Simulation orchestrator: estimate + narrate every agent, then apply the group filter.
//!
//! Pure given its inputs. Callers validate that the policy text is non-empty; a filter that
//! matches nobody yields the `System` / `no data` sentinel, which is a normal result.

use crate::agents::AgentRegistry;
use crate::impact;
use crate::narrative::{self, Language};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const SYSTEM_AGENT: &str = "System";
pub const NO_DATA: &str = "no data";

/// Which agents a simulation reports on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetGroup {
    #[default]
    All,
    Group(String),
}

impl TargetGroup {
    /// Lower-cases the name; empty or `"all"` means every agent.
    pub fn parse(raw: &str) -> Self {
        let group = raw.to_lowercase();
        if group.is_empty() || group == "all" {
            TargetGroup::All
        } else {
            TargetGroup::Group(group)
        }
    }

    pub fn as_group(&self) -> Option<&str> {
        match self {
            TargetGroup::All => None,
            TargetGroup::Group(g) => Some(g),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationRequest {
    pub policy_text: String,
    pub language: Language,
    pub target: TargetGroup,
}

impl SimulationRequest {
    pub fn new(policy_text: impl Into<String>, language: Language, target: TargetGroup) -> Self {
        Self {
            policy_text: policy_text.into(),
            language,
            target,
        }
    }
}

/// One agent's simulated outcome. `groups` is absent on the synthetic `System` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
    pub impact: String,
    pub narrative: String,
}

impl SimulationResult {
    fn no_data(language: Language) -> Self {
        Self {
            agent: SYSTEM_AGENT.to_string(),
            groups: None,
            impact: NO_DATA.to_string(),
            narrative: narrative::no_match(language).to_string(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.agent == SYSTEM_AGENT && self.groups.is_none()
    }
}

/// Shared, read-only simulator over one agent registry.
#[derive(Debug, Clone)]
pub struct Simulator {
    registry: Arc<AgentRegistry>,
}

impl Simulator {
    pub fn new(registry: Arc<AgentRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn run(&self, request: &SimulationRequest) -> Vec<SimulationResult> {
        let target = request.target.as_group();

        let all: Vec<SimulationResult> = self
            .registry
            .agents()
            .iter()
            .enumerate()
            .map(|(i, agent)| {
                let level = impact::estimate(&request.policy_text, i);
                let targeted = target.is_some_and(|g| agent.in_group(g));
                SimulationResult {
                    agent: agent.name.clone(),
                    groups: Some(agent.groups.clone()),
                    impact: level.label().to_string(),
                    narrative: narrative::render(
                        &agent.name,
                        level.label(),
                        request.language,
                        targeted,
                    ),
                }
            })
            .collect();

        let Some(group) = target else {
            return all;
        };

        let filtered: Vec<SimulationResult> = all
            .into_iter()
            .filter(|r| {
                r.groups
                    .as_ref()
                    .is_some_and(|gs| gs.iter().any(|g| g == group))
            })
            .collect();

        if filtered.is_empty() {
            tracing::debug!(group, "no agents in target group");
            return vec![SimulationResult::no_data(request.language)];
        }
        filtered
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(Arc::new(AgentRegistry::builtin()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::Agent;

    fn run(policy: &str, language: Language, target: &str) -> Vec<SimulationResult> {
        Simulator::default().run(&SimulationRequest::new(
            policy,
            language,
            TargetGroup::parse(target),
        ))
    }

    #[test]
    fn all_returns_every_agent_in_registry_order() {
        for policy in ["tax", "Free bus passes for students", "ضريبة"] {
            let results = run(policy, Language::En, "all");
            let names: Vec<&str> = results.iter().map(|r| r.agent.as_str()).collect();
            assert_eq!(names.len(), 7);
            assert_eq!(names[0], "Farmer");
            assert_eq!(names[6], "Youth (community)");
            assert!(results.iter().all(|r| r.groups.is_some()));
            assert!(results.iter().all(|r| !r.narrative.contains("heightened")));
        }
    }

    #[test]
    fn tax_policy_impacts() {
        let results = run("tax", Language::En, "all");
        let impacts: Vec<&str> = results.iter().map(|r| r.impact.as_str()).collect();
        // base 3, step 7 == step 2 mod 5
        assert_eq!(
            impacts,
            vec![
                "significant",
                "no change",
                "moderate",
                "transformative",
                "small",
                "significant",
                "no change",
            ]
        );
        assert_eq!(
            results[0].narrative,
            "Farmer experiences a significant impact due to the proposed policy."
        );
    }

    #[test]
    fn group_filter_keeps_only_members_and_emphasizes_them() {
        for group in ["employed", "youths", "unemployed", "institutions", "women"] {
            let results = run("tax", Language::En, group);
            assert!(!results.is_empty());
            for r in &results {
                assert!(r.groups.as_ref().unwrap().iter().any(|g| g == group));
                assert!(r.narrative.ends_with(" (heightened effect for this group)"));
            }
        }

        let women: Vec<String> = run("tax", Language::En, "women")
            .into_iter()
            .map(|r| r.agent)
            .collect();
        assert_eq!(women, vec!["NGO", "Women (community)"]);
    }

    #[test]
    fn target_group_is_case_insensitive() {
        let upper = run("tax", Language::En, "EMPLOYED");
        let lower = run("tax", Language::En, "employed");
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 3);
    }

    #[test]
    fn unmatched_group_returns_the_sentinel() {
        let results = run("tax", Language::En, "retirees");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].agent, "System");
        assert_eq!(results[0].impact, "no data");
        assert_eq!(results[0].narrative, "No agents match the selected target group.");
        assert!(results[0].groups.is_none());
        assert!(results[0].is_sentinel());

        let arabic = run("tax", Language::Ar, "retirees");
        assert_eq!(arabic[0].narrative, "لا توجد بيانات لوصف هذه الفئة.");
    }

    #[test]
    fn sentinel_serializes_without_groups() {
        let json = serde_json::to_value(&run("tax", Language::En, "nobody")[0]).unwrap();
        assert!(json.get("groups").is_none());
        let json = serde_json::to_value(&run("tax", Language::En, "all")[0]).unwrap();
        assert_eq!(json["groups"], serde_json::json!(["employed"]));
    }

    #[test]
    fn language_changes_only_the_narrative() {
        for target in ["all", "women", "retirees"] {
            let en = run("water rights reform", Language::En, target);
            let ar = run("water rights reform", Language::Ar, target);
            assert_eq!(en.len(), ar.len());
            for (a, b) in en.iter().zip(&ar) {
                assert_eq!(a.agent, b.agent);
                assert_eq!(a.groups, b.groups);
                assert_eq!(a.impact, b.impact);
                assert_ne!(a.narrative, b.narrative);
            }
        }
    }

    #[test]
    fn injected_registry_drives_the_run() {
        let registry = AgentRegistry::new(vec![
            Agent::new("Fisher", &["coastal"]),
            Agent::new("Miner", &["inland"]),
        ])
        .unwrap();
        let sim = Simulator::new(Arc::new(registry));
        let results = sim.run(&SimulationRequest::new(
            "tax",
            Language::En,
            TargetGroup::parse("all"),
        ));
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].impact, "no change");

        let coastal = sim.run(&SimulationRequest::new(
            "tax",
            Language::En,
            TargetGroup::parse("coastal"),
        ));
        assert_eq!(coastal.len(), 1);
        assert_eq!(coastal[0].agent, "Fisher");
    }
}
