use serde::{Deserialize, Serialize};

use crate::technique::TechniqueBonus;

/// Static definition of a sorcerer clan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClanDefinition {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Great clans may invest in secret techniques.
    #[serde(default)]
    pub privileged: bool,
    /// Automatic technique grades granted by the clan.
    #[serde(default)]
    pub technique_bonuses: Vec<TechniqueBonus>,
}
