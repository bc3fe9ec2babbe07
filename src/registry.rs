//! Build agent registry and active agent selection.
//!
//! The registry holds every known [`BuildAgent`] in a fixed order and asks
//! each one whether it applies to the current environment. In a real CI
//! run at most one provider's detection variable is set. When several
//! match anyway, the first registered one wins and a warning names the
//! others; [`AgentRegistry::detect_strict`] turns that case into an error.

use std::sync::Arc;

use crate::agents::{
    AzurePipelines, BitbucketPipelines, BuildAgent, Buildkite, ContinuaCi, Drone, GitHubActions,
    GitLabCi, Jenkins, MyGet, SpaceAutomation, TeamCity, TravisCi,
};
use crate::environment::Environment;
use crate::error::{BuildAgentError, Result};

/// Ordered collection of build agents.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use buildagent::environment::MemoryEnvironment;
/// use buildagent::AgentRegistry;
///
/// let env = Arc::new(MemoryEnvironment::from_vars(&[("TEAMCITY_VERSION", "2024.1")]));
/// let registry = AgentRegistry::builtin(env);
/// let agent = registry.detect_active_agent().unwrap();
/// assert_eq!(agent.name(), "TeamCity");
/// ```
pub struct AgentRegistry {
    agents: Vec<Box<dyn BuildAgent>>,
}

impl AgentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { agents: Vec::new() }
    }

    /// Create a registry with every built-in agent, reading from `env`.
    ///
    /// Registration order is fixed, which makes "first match wins"
    /// deterministic across runs.
    pub fn builtin(env: Arc<dyn Environment>) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(AzurePipelines::new(env.clone())));
        registry.register(Box::new(BitbucketPipelines::new(env.clone())));
        registry.register(Box::new(Buildkite::new(env.clone())));
        registry.register(Box::new(ContinuaCi::new(env.clone())));
        registry.register(Box::new(Drone::new(env.clone())));
        registry.register(Box::new(GitHubActions::new(env.clone())));
        registry.register(Box::new(GitLabCi::new(env.clone())));
        registry.register(Box::new(Jenkins::new(env.clone())));
        registry.register(Box::new(MyGet::new(env.clone())));
        registry.register(Box::new(SpaceAutomation::new(env.clone())));
        registry.register(Box::new(TeamCity::new(env.clone())));
        registry.register(Box::new(TravisCi::new(env)));
        registry
    }

    /// Append an agent. It is consulted after every agent registered before it.
    pub fn register(&mut self, agent: Box<dyn BuildAgent>) {
        tracing::debug!("Registering build agent '{}'", agent.name());
        self.agents.push(agent);
    }

    /// All registered agents, in registration order.
    pub fn agents(&self) -> impl Iterator<Item = &dyn BuildAgent> {
        self.agents.iter().map(|agent| agent.as_ref())
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Check if no agents are registered.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Every agent whose detection predicate holds, in registration order.
    pub fn matching_agents(&self) -> Vec<&dyn BuildAgent> {
        self.agents()
            .filter(|agent| {
                let applies = agent.can_apply_to_current_context();
                tracing::debug!(
                    "Build agent '{}' via {}: {}",
                    agent.name(),
                    agent.environment_variable(),
                    if applies { "applies" } else { "does not apply" }
                );
                applies
            })
            .collect()
    }

    /// Select the active agent. First match wins.
    pub fn detect_active_agent(&self) -> Option<&dyn BuildAgent> {
        let matching = self.matching_agents();

        if matching.len() > 1 {
            let names: Vec<&str> = matching.iter().map(|agent| agent.name()).collect();
            tracing::warn!(
                "Multiple build agents detected: {}. Using '{}' (first registered).",
                names.join(", "),
                names[0],
            );
        }

        let active = matching.into_iter().next();
        match active {
            Some(agent) => tracing::debug!("Active build agent: {}", agent.name()),
            None => tracing::debug!("No build agent detected"),
        }
        active
    }

    /// Select the active agent, failing if more than one matches.
    pub fn detect_strict(&self) -> Result<Option<&dyn BuildAgent>> {
        let matching = self.matching_agents();
        if matching.len() > 1 {
            return Err(BuildAgentError::AmbiguousAgent {
                agents: matching.iter().map(|agent| agent.name().to_string()).collect(),
            });
        }
        Ok(matching.into_iter().next())
    }

    /// Find an agent by name, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Result<&dyn BuildAgent> {
        self.agents()
            .find(|agent| agent.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| BuildAgentError::UnknownAgent {
                name: name.to_string(),
            })
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
