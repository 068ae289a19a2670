use crate::entity::{EntityId, EntityKind, Skill};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A place or position that shifts are planned for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub name: String,
    /// Ids of the skills an employee needs to work this spot.
    #[serde(default)]
    pub required_skill_set: BTreeSet<EntityId>,
}

impl Spot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required_skill_set: BTreeSet::new(),
        }
    }

    /// Add a required skill by id.
    pub fn requiring(mut self, skill_id: impl Into<EntityId>) -> Self {
        self.required_skill_set.insert(skill_id.into());
        self
    }
}

impl EntityKind for Spot {
    const NAME: &'static str = "Spot";
    const PATH: &'static str = "spot";
    const REFERENCES: &'static [&'static str] = &[Skill::NAME];

    fn name(&self) -> &str {
        &self.name
    }

    fn references(&self) -> Vec<(&'static str, EntityId)> {
        self.required_skill_set
            .iter()
            .map(|id| (Skill::NAME, *id))
            .collect()
    }
}
