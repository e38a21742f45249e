//! Player selections.
//!
//! A [`CharacterBuild`] is the raw input the wizard hands over: every choice
//! the player made, unvalidated. [`BuildContext`] is the slice of that input
//! the skill, technique, and power components all read.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::attribute::{Attributes, ResourceAttribute};
use crate::error::{CatalogError, CatalogResult};
use crate::skill::TrainingGrade;
use crate::technique::TechniqueGrades;

/// Lowest character level.
pub const MIN_LEVEL: u8 = 1;
/// Highest character level.
pub const MAX_LEVEL: u8 = 20;

/// Narrative context shared by every rules component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildContext {
    /// Character level.
    pub level: u8,
    /// Whether the character studied at the jujutsu school.
    #[serde(default)]
    pub school: bool,
    /// Track id, if the character follows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    /// Sub-path inside the track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_path: Option<String>,
    /// Clan id, if the character belongs to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clan: Option<String>,
}

impl BuildContext {
    /// A context with no school, track, or clan.
    pub fn at_level(level: u8) -> Self {
        Self {
            level,
            school: false,
            track: None,
            sub_path: None,
            clan: None,
        }
    }

    /// Mark the character as a school student.
    pub fn with_school(mut self) -> Self {
        self.school = true;
        self
    }

    /// Follow a track.
    pub fn with_track(mut self, track: impl Into<String>) -> Self {
        self.track = Some(track.into());
        self
    }

    /// Pick a sub-path inside the track.
    pub fn with_sub_path(mut self, sub_path: impl Into<String>) -> Self {
        self.sub_path = Some(sub_path.into());
        self
    }

    /// Join a clan.
    pub fn with_clan(mut self, clan: impl Into<String>) -> Self {
        self.clan = Some(clan.into());
        self
    }
}

/// Equipment contributions to defense and damage reduction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    /// Defense bonus from armor and shields.
    #[serde(default)]
    pub defense: i32,
    /// Damage reduction from armor.
    #[serde(default)]
    pub damage_reduction: i32,
}

/// Every selection a player made for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterBuild {
    /// Character name.
    pub name: String,
    /// Class id.
    pub class: String,
    /// Origin id.
    pub origin: String,
    /// Clan id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clan: Option<String>,
    /// Name of the innate cursed technique; narrative only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub innate_technique: Option<String>,
    /// Character level.
    pub level: u8,
    /// Attribute scores.
    pub attributes: Attributes,
    /// Attribute that feeds cursed energy.
    #[serde(default)]
    pub resource_attribute: ResourceAttribute,
    /// Whether the character studied at the jujutsu school.
    #[serde(default)]
    pub school: bool,
    /// Track id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    /// Sub-path inside the track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_path: Option<String>,
    /// Picks for each class choice group, in group order.
    #[serde(default)]
    pub class_choices: Vec<Vec<String>>,
    /// Picks for the origin choice group.
    #[serde(default)]
    pub origin_choices: Vec<String>,
    /// Freely chosen skills.
    #[serde(default)]
    pub free_skills: Vec<String>,
    /// Grades above "trained" for individual skills.
    #[serde(default)]
    pub skill_grades: BTreeMap<String, TrainingGrade>,
    /// Selected power ids, in selection order.
    #[serde(default)]
    pub powers: Vec<String>,
    /// Technique points the player spent, per category.
    #[serde(default)]
    pub techniques: TechniqueGrades,
    /// Equipment bonuses.
    #[serde(default)]
    pub equipment: Equipment,
}

impl CharacterBuild {
    /// A fresh level-1 build with every optional choice empty.
    pub fn new(
        name: impl Into<String>,
        class: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            origin: origin.into(),
            clan: None,
            innate_technique: None,
            level: MIN_LEVEL,
            attributes: Attributes::uniform(1),
            resource_attribute: ResourceAttribute::default(),
            school: false,
            track: None,
            sub_path: None,
            class_choices: Vec::new(),
            origin_choices: Vec::new(),
            free_skills: Vec::new(),
            skill_grades: BTreeMap::new(),
            powers: Vec::new(),
            techniques: TechniqueGrades::new(),
            equipment: Equipment::default(),
        }
    }

    /// The shared context derived from this build.
    pub fn context(&self) -> BuildContext {
        BuildContext {
            level: self.level,
            school: self.school,
            track: self.track.clone(),
            sub_path: self.sub_path.clone(),
            clan: self.clan.clone(),
        }
    }

    /// Parse a build from JSON.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a build from a JSON file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> CatalogResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::technique::TechniqueCategory;

    #[test]
    fn context_mirrors_build() {
        let mut build = CharacterBuild::new("Yuji", "combatente", "lutador");
        build.level = 6;
        build.school = true;
        build.track = Some("aniquilador".to_string());
        let ctx = build.context();
        assert_eq!(
            ctx,
            BuildContext::at_level(6)
                .with_school()
                .with_track("aniquilador")
        );
    }

    #[test]
    fn minimal_json_uses_defaults() {
        let build = CharacterBuild::from_json(
            r#"{
                "name": "Megumi",
                "class": "feiticeiro",
                "origin": "herdeiro",
                "level": 1,
                "attributes": {
                    "agilidade": 2, "intelecto": 2, "presenca": 2, "vigor": 2, "forca": 1
                },
                "techniques": {"base": 1}
            }"#,
        )
        .unwrap();
        assert_eq!(build.resource_attribute, ResourceAttribute::Intellect);
        assert!(!build.school);
        assert!(build.powers.is_empty());
        assert_eq!(build.techniques.get(TechniqueCategory::Base), 1);
        assert_eq!(build.equipment, Equipment::default());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CharacterBuild::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn json_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.json");
        let build = CharacterBuild::new("Nobara", "especialista", "academico");
        std::fs::write(&path, build.to_json_pretty().unwrap()).unwrap();
        assert_eq!(CharacterBuild::load(&path).unwrap(), build);
    }
}
