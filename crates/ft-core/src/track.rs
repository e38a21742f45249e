use serde::{Deserialize, Serialize};

use crate::technique::TechniqueBonus;

/// Static definition of a narrative track (trilha).
///
/// A track belongs to one class. It may force a skill onto the character
/// and grant automatic technique grades as the character levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDefinition {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Id of the class that may follow this track.
    pub class: String,
    /// Skill the track requires; granted and locked when the track is taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_skill: Option<String>,
    /// Specializations available inside the track.
    #[serde(default)]
    pub sub_paths: Vec<String>,
    /// Automatic technique grades granted by the track.
    #[serde(default)]
    pub technique_bonuses: Vec<TechniqueBonus>,
}

impl TrackDefinition {
    /// Returns true if `sub_path` is one of this track's specializations.
    pub fn has_sub_path(&self, sub_path: &str) -> bool {
        self.sub_paths.iter().any(|s| s == sub_path)
    }
}
