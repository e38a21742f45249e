//! The reference catalog.
//!
//! A [`Catalog`] owns every static table the rules read: classes, origins,
//! tracks, clans, and powers, plus the list of known skills and the skill the
//! jujutsu school teaches. Catalogs are loaded once and never mutated;
//! [`Catalog::validate`] rejects broken cross-references up front so rule
//! evaluation never has to.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::class::ClassDefinition;
use crate::clan::ClanDefinition;
use crate::error::{CatalogError, CatalogResult};
use crate::origin::OriginDefinition;
use crate::power::PowerDefinition;
use crate::skill::{SkillChoiceGroup, fold_name};
use crate::track::TrackDefinition;

/// Every reference table of a game system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Name of the rules set.
    pub name: String,
    /// Skill granted by studying at the jujutsu school.
    pub school_skill: String,
    /// Known skill names. When non-empty, every skill a definition mentions
    /// must appear here.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Class definitions.
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
    /// Origin definitions.
    #[serde(default)]
    pub origins: Vec<OriginDefinition>,
    /// Track definitions.
    #[serde(default)]
    pub tracks: Vec<TrackDefinition>,
    /// Clan definitions.
    #[serde(default)]
    pub clans: Vec<ClanDefinition>,
    /// Power definitions.
    #[serde(default)]
    pub powers: Vec<PowerDefinition>,
}

impl Catalog {
    /// An empty catalog; mostly useful as a starting point in tests.
    pub fn empty(name: impl Into<String>, school_skill: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            school_skill: school_skill.into(),
            skills: Vec::new(),
            classes: Vec::new(),
            origins: Vec::new(),
            tracks: Vec::new(),
            clans: Vec::new(),
            powers: Vec::new(),
        }
    }

    /// Parse and validate a catalog from JSON.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read and validate a catalog from a JSON file.
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

    /// Look up a class by id.
    pub fn class(&self, id: &str) -> Option<&ClassDefinition> {
        self.classes.iter().find(|c| c.id == id)
    }

    /// Look up an origin by id.
    pub fn origin(&self, id: &str) -> Option<&OriginDefinition> {
        self.origins.iter().find(|o| o.id == id)
    }

    /// Look up a track by id.
    pub fn track(&self, id: &str) -> Option<&TrackDefinition> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Look up a clan by id.
    pub fn clan(&self, id: &str) -> Option<&ClanDefinition> {
        self.clans.iter().find(|c| c.id == id)
    }

    /// Look up a power by id.
    pub fn power(&self, id: &str) -> Option<&PowerDefinition> {
        self.powers.iter().find(|p| p.id == id)
    }

    /// Tracks open to a class.
    pub fn tracks_for_class<'a>(
        &'a self,
        class_id: &'a str,
    ) -> impl Iterator<Item = &'a TrackDefinition> + 'a {
        self.tracks.iter().filter(move |t| t.class == class_id)
    }

    /// The catalog spelling of a skill, if the skill is known.
    pub fn canonical_skill(&self, name: &str) -> Option<&str> {
        let key = fold_name(name);
        self.skills
            .iter()
            .find(|s| fold_name(s) == key)
            .map(String::as_str)
    }

    /// Check ids, cross-references, and choice groups.
    pub fn validate(&self) -> CatalogResult<()> {
        check_unique("class", self.classes.iter().map(|c| c.id.as_str()))?;
        check_unique("origin", self.origins.iter().map(|o| o.id.as_str()))?;
        check_unique("track", self.tracks.iter().map(|t| t.id.as_str()))?;
        check_unique("clan", self.clans.iter().map(|c| c.id.as_str()))?;
        check_unique("power", self.powers.iter().map(|p| p.id.as_str()))?;

        self.check_skill("catalog", &self.school_skill)?;

        for class in &self.classes {
            let owner = format!("class \"{}\"", class.id);
            for skill in &class.fixed_skills {
                self.check_skill(&owner, skill)?;
            }
            for group in &class.skill_choices {
                self.check_group(&owner, group)?;
            }
        }

        for origin in &self.origins {
            let owner = format!("origin \"{}\"", origin.id);
            for skill in &origin.fixed_skills {
                self.check_skill(&owner, skill)?;
            }
            if let Some(group) = &origin.skill_choice {
                self.check_group(&owner, group)?;
            }
        }

        for track in &self.tracks {
            let owner = format!("track \"{}\"", track.id);
            if self.class(&track.class).is_none() {
                return Err(CatalogError::UnknownReference {
                    owner,
                    kind: "class",
                    id: track.class.clone(),
                });
            }
            if let Some(skill) = &track.required_skill {
                self.check_skill(&owner, skill)?;
            }
            for bonus in &track.technique_bonuses {
                if let Some(sub_path) = &bonus.sub_path
                    && !track.has_sub_path(sub_path)
                {
                    return Err(CatalogError::UnknownReference {
                        owner,
                        kind: "sub-path",
                        id: sub_path.clone(),
                    });
                }
            }
        }

        for power in &self.powers {
            let owner = format!("power \"{}\"", power.id);
            for required in &power.prerequisites.powers {
                if self.power(required).is_none() {
                    return Err(CatalogError::UnknownReference {
                        owner,
                        kind: "power",
                        id: required.clone(),
                    });
                }
            }
            for requirement in &power.prerequisites.skills.items {
                self.check_skill(&owner, &requirement.skill)?;
            }
            for effect in &power.effects {
                if let Some(skill) = &effect.skill {
                    self.check_skill(&owner, skill)?;
                }
            }
        }

        Ok(())
    }

    fn check_skill(&self, owner: &str, skill: &str) -> CatalogResult<()> {
        if self.skills.is_empty() || self.canonical_skill(skill).is_some() {
            return Ok(());
        }
        Err(CatalogError::UnknownReference {
            owner: owner.to_string(),
            kind: "skill",
            id: skill.to_string(),
        })
    }

    fn check_group(&self, owner: &str, group: &SkillChoiceGroup) -> CatalogResult<()> {
        if group.choose == 0 || group.choose > group.options.len() {
            return Err(CatalogError::InvalidChoiceGroup {
                owner: owner.to_string(),
                choose: group.choose,
                options: group.options.len(),
            });
        }
        for option in &group.options {
            self.check_skill(owner, option)?;
        }
        Ok(())
    }
}

fn check_unique<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> CatalogResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;
    use crate::class::{PoolFormula, ResourceFormulas};
    use crate::power::PowerKind;
    use crate::technique::{TechniqueBonus, TechniqueCategory};

    fn formulas() -> ResourceFormulas {
        ResourceFormulas {
            pv: PoolFormula::with_attribute(20, 4, Attribute::Vigor),
            pe: PoolFormula::with_attribute(2, 2, Attribute::Presence),
            ea: PoolFormula::flat(1, 1),
            san: PoolFormula::flat(12, 3),
        }
    }

    fn small_catalog() -> Catalog {
        let mut catalog = Catalog::empty("test", "Feitiçaria");
        catalog.skills = ["Feitiçaria", "Luta", "Tática", "Pontaria"]
            .into_iter()
            .map(String::from)
            .collect();
        catalog.classes.push(ClassDefinition {
            id: "combatente".to_string(),
            name: "Combatente".to_string(),
            free_skill_slots: 1,
            fixed_skills: vec!["Luta".to_string()],
            skill_choices: vec![SkillChoiceGroup::new(1, ["Tática", "Pontaria"])],
            proficiencies: Vec::new(),
            resources: formulas(),
        });
        catalog
    }

    #[test]
    fn valid_catalog_passes() {
        assert!(small_catalog().validate().is_ok());
    }

    #[test]
    fn duplicate_power_ids_rejected() {
        let mut catalog = small_catalog();
        catalog
            .powers
            .push(PowerDefinition::new("a", "A", PowerKind::Manual, "x"));
        catalog
            .powers
            .push(PowerDefinition::new("a", "A again", PowerKind::Manual, "x"));
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::DuplicateId { kind: "power", .. })
        ));
    }

    #[test]
    fn unknown_prerequisite_power_rejected() {
        let mut catalog = small_catalog();
        catalog
            .powers
            .push(PowerDefinition::new("b", "B", PowerKind::Manual, "x").requires("ghost"));
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("unknown power \"ghost\""), "{err}");
    }

    #[test]
    fn unknown_skill_rejected() {
        let mut catalog = small_catalog();
        catalog.classes[0].fixed_skills.push("Dança".to_string());
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::UnknownReference { kind: "skill", .. })
        ));
    }

    #[test]
    fn skill_names_compare_loosely() {
        let mut catalog = small_catalog();
        catalog.classes[0].fixed_skills.push("tatica".to_string());
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.canonical_skill("TATICA"), Some("Tática"));
    }

    #[test]
    fn oversized_choice_group_rejected() {
        let mut catalog = small_catalog();
        catalog.classes[0].skill_choices[0].choose = 3;
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::InvalidChoiceGroup { choose: 3, options: 2, .. })
        ));
    }

    #[test]
    fn track_must_name_existing_class_and_sub_path() {
        let mut catalog = small_catalog();
        catalog.tracks.push(TrackDefinition {
            id: "x".to_string(),
            name: "X".to_string(),
            class: "nobody".to_string(),
            required_skill: None,
            sub_paths: Vec::new(),
            technique_bonuses: Vec::new(),
        });
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::UnknownReference { kind: "class", .. })
        ));

        catalog.tracks[0].class = "combatente".to_string();
        catalog.tracks[0].technique_bonuses.push(
            TechniqueBonus::at_level(TechniqueCategory::Barrier, 15).for_sub_path("dominio"),
        );
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::UnknownReference { kind: "sub-path", .. })
        ));

        catalog.tracks[0].sub_paths.push("dominio".to_string());
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn json_round_trip_validates() {
        let catalog = small_catalog();
        let json = catalog.to_json_pretty().unwrap();
        let back = Catalog::from_json(&json).unwrap();
        assert_eq!(back, catalog);
        assert!(back.class("combatente").is_some());
        assert!(back.origin("nope").is_none());
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            Catalog::from_json("{ not json"),
            Err(CatalogError::Json(_))
        ));
    }
}
