use crate::entity::EntityKind;
use serde::{Deserialize, Serialize};

/// A skill an employee can hold and a spot can require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
}

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl EntityKind for Skill {
    const NAME: &'static str = "Skill";
    const PATH: &'static str = "skill";

    fn name(&self) -> &str {
        &self.name
    }
}
