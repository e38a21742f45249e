use serde::{Deserialize, Serialize};

use crate::skill::SkillChoiceGroup;

/// Static definition of a character origin (background).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginDefinition {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Skills the origin always grants.
    #[serde(default)]
    pub fixed_skills: Vec<String>,
    /// Optional single "choose N of M" group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_choice: Option<SkillChoiceGroup>,
    /// Narrative requirements the table enforces, shown to the player.
    #[serde(default)]
    pub requirements: Vec<String>,
}
