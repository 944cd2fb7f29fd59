use std::collections::HashMap;
use crate::errors::VulnprobeError;
use crate::models::Scenario;

/// In-memory store of registered scenarios. Registration order is preserved
/// and drives report ordering; scenarios are immutable once registered.
#[derive(Debug, Default)]
pub struct ScenarioRegistry {
    scenarios: Vec<Scenario>,
    index: HashMap<String, usize>,
}

impl ScenarioRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scenario. Fails without mutating the registry if the id is
    /// already present.
    pub fn register(&mut self, scenario: Scenario) -> Result<(), VulnprobeError> {
        if self.index.contains_key(&scenario.id) {
            return Err(VulnprobeError::DuplicateId(scenario.id));
        }
        self.index.insert(scenario.id.clone(), self.scenarios.len());
        self.scenarios.push(scenario);
        Ok(())
    }

    /// Iterate scenarios in registration order. The iterator is restartable;
    /// call again for a fresh pass.
    pub fn list(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn get(&self, id: &str) -> Result<&Scenario, VulnprobeError> {
        self.index
            .get(id)
            .map(|&i| &self.scenarios[i])
            .ok_or_else(|| VulnprobeError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
