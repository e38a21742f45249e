//! Power definitions.
//!
//! A power is an optional ability gated by prerequisites. Prerequisite
//! groups carry an explicit [`RequirementMode`]; the mode applies to its own
//! group only, and the groups of one power combine with AND.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::skill::TrainingGrade;

/// Whether a power is always on or must be activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerKind {
    /// Always-on effect.
    Passive,
    /// Activated by the player.
    Manual,
}

impl fmt::Display for PowerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passive => write!(f, "passive"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// How the items of a requirement group combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementMode {
    /// Every item must hold.
    #[default]
    All,
    /// At least one item must hold.
    Any,
}

/// A list of requirements with an explicit combination mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementGroup<T> {
    /// How the items combine.
    #[serde(default)]
    pub mode: RequirementMode,
    /// The requirements.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for RequirementGroup<T> {
    fn default() -> Self {
        Self {
            mode: RequirementMode::All,
            items: Vec::new(),
        }
    }
}

impl<T> RequirementGroup<T> {
    /// A group where every item must hold.
    pub fn all(items: Vec<T>) -> Self {
        Self {
            mode: RequirementMode::All,
            items,
        }
    }

    /// A group where one item suffices.
    pub fn any(items: Vec<T>) -> Self {
        Self {
            mode: RequirementMode::Any,
            items,
        }
    }

    /// Returns true if the group has no items (and therefore always holds).
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Minimum score in one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRequirement {
    /// The attribute checked.
    pub attribute: Attribute,
    /// Minimum score.
    pub minimum: u8,
}

impl AttributeRequirement {
    /// Require `attribute` at `minimum` or higher.
    pub fn new(attribute: Attribute, minimum: u8) -> Self {
        Self { attribute, minimum }
    }
}

impl fmt::Display for AttributeRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.attribute, self.minimum)
    }
}

/// Training in a skill, optionally at a minimum grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    /// Skill name; compared without case or accents.
    pub skill: String,
    /// Minimum grade; `None` means any training suffices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<TrainingGrade>,
}

impl SkillRequirement {
    /// Require training in `skill`.
    pub fn trained(skill: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            grade: None,
        }
    }

    /// Require `skill` at `grade` or better.
    pub fn at_grade(skill: impl Into<String>, grade: TrainingGrade) -> Self {
        Self {
            skill: skill.into(),
            grade: Some(grade),
        }
    }
}

impl fmt::Display for SkillRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.grade {
            Some(grade) => write!(f, "{} ({grade})", self.skill),
            None => write!(f, "{}", self.skill),
        }
    }
}

/// Everything a character needs before taking a power.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prerequisites {
    /// Minimum character level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_level: Option<u8>,
    /// Attribute thresholds.
    #[serde(default)]
    pub attributes: RequirementGroup<AttributeRequirement>,
    /// Skill training requirements.
    #[serde(default)]
    pub skills: RequirementGroup<SkillRequirement>,
    /// Ids of powers that must already be selected.
    #[serde(default)]
    pub powers: Vec<String>,
}

impl Prerequisites {
    /// Returns true if `power_id` is one of the required powers.
    pub fn references(&self, power_id: &str) -> bool {
        self.powers.iter().any(|p| p == power_id)
    }
}

/// What a passive effect modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Defense score.
    Defense,
    /// Damage reduction.
    DamageReduction,
    /// Movement speed.
    Speed,
    /// Maximum health.
    Pv,
    /// Maximum effort.
    Pe,
    /// Maximum cursed energy.
    Ea,
    /// Maximum sanity.
    San,
    /// Check bonus in the effect's target skill.
    Skill,
}

/// Magnitude of a passive effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectValue {
    /// The same value at every level.
    Flat(i32),
    /// `base + step × floor(level / every)`.
    PerLevel {
        /// Value before growth.
        base: i32,
        /// Level interval between steps.
        every: u8,
        /// Growth per interval.
        step: i32,
    },
}

impl EffectValue {
    /// Resolve the value at a character level.
    pub fn at_level(&self, level: u8) -> i32 {
        match *self {
            Self::Flat(n) => n,
            Self::PerLevel { base, every, step } => {
                if every == 0 {
                    base
                } else {
                    base + step * i32::from(level / every)
                }
            }
        }
    }
}

/// A modifier a passive power applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassiveEffect {
    /// What the effect modifies.
    pub kind: EffectKind,
    /// How much.
    pub value: EffectValue,
    /// Free-text situation the effect needs; conditional effects are not
    /// folded into computed stats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Target skill for [`EffectKind::Skill`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
}

impl PassiveEffect {
    /// An unconditional effect.
    pub fn new(kind: EffectKind, value: EffectValue) -> Self {
        Self {
            kind,
            value,
            condition: None,
            skill: None,
        }
    }

    /// An unconditional bonus to one skill.
    pub fn skill_bonus(skill: impl Into<String>, value: EffectValue) -> Self {
        Self {
            kind: EffectKind::Skill,
            value,
            condition: None,
            skill: Some(skill.into()),
        }
    }

    /// Restrict the effect to a situation.
    pub fn when(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Returns true if the effect is always active.
    pub fn is_unconditional(&self) -> bool {
        self.condition.is_none()
    }
}

/// Static definition of a power.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerDefinition {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Passive or manual.
    pub kind: PowerKind,
    /// Grouping used by the catalog (e.g. "combate", "energia").
    pub category: String,
    /// Rules text.
    #[serde(default)]
    pub description: String,
    /// What the character needs first.
    #[serde(default)]
    pub prerequisites: Prerequisites,
    /// Modifiers applied while the power is selected.
    #[serde(default)]
    pub effects: Vec<PassiveEffect>,
}

impl PowerDefinition {
    /// Create a power with no prerequisites or effects.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: PowerKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            category: category.into(),
            description: String::new(),
            prerequisites: Prerequisites::default(),
            effects: Vec::new(),
        }
    }

    /// Set the rules text.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Require a minimum character level.
    pub fn min_level(mut self, level: u8) -> Self {
        self.prerequisites.min_level = Some(level);
        self
    }

    /// Replace the attribute requirement group.
    pub fn attributes(mut self, group: RequirementGroup<AttributeRequirement>) -> Self {
        self.prerequisites.attributes = group;
        self
    }

    /// Replace the skill requirement group.
    pub fn skills(mut self, group: RequirementGroup<SkillRequirement>) -> Self {
        self.prerequisites.skills = group;
        self
    }

    /// Require another power.
    pub fn requires(mut self, power_id: impl Into<String>) -> Self {
        self.prerequisites.powers.push(power_id.into());
        self
    }

    /// Add an effect.
    pub fn effect(mut self, effect: PassiveEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_level_growth() {
        let value = EffectValue::PerLevel {
            base: 1,
            every: 5,
            step: 1,
        };
        assert_eq!(value.at_level(1), 1);
        assert_eq!(value.at_level(5), 2);
        assert_eq!(value.at_level(14), 3);
        assert_eq!(EffectValue::Flat(4).at_level(20), 4);
    }

    #[test]
    fn per_level_zero_interval_is_base() {
        let value = EffectValue::PerLevel {
            base: 3,
            every: 0,
            step: 10,
        };
        assert_eq!(value.at_level(20), 3);
    }

    #[test]
    fn builder_collects_prerequisites() {
        let power = PowerDefinition::new("b", "B", PowerKind::Manual, "combate")
            .min_level(3)
            .requires("a")
            .attributes(RequirementGroup::any(vec![
                AttributeRequirement::new(Attribute::Strength, 3),
                AttributeRequirement::new(Attribute::Vigor, 3),
            ]));
        assert_eq!(power.prerequisites.min_level, Some(3));
        assert!(power.prerequisites.references("a"));
        assert!(!power.prerequisites.references("c"));
        assert_eq!(power.prerequisites.attributes.mode, RequirementMode::Any);
    }

    #[test]
    fn deserializes_with_explicit_mode() {
        let json = r#"{
            "id": "fluxo",
            "name": "Fluxo",
            "kind": "passive",
            "category": "energia",
            "prerequisites": {
                "skills": {"mode": "any", "items": [
                    {"skill": "Feitiçaria"},
                    {"skill": "Ocultismo", "grade": "veteran"}
                ]},
                "powers": []
            },
            "effects": [{"kind": "ea", "value": {"per_level": {"base": 2, "every": 4, "step": 1}}}]
        }"#;
        let power: PowerDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(power.prerequisites.skills.mode, RequirementMode::Any);
        assert_eq!(
            power.prerequisites.skills.items[1].grade,
            Some(TrainingGrade::Veteran)
        );
        assert!(power.prerequisites.attributes.is_empty());
        assert_eq!(power.prerequisites.attributes.mode, RequirementMode::All);
        assert_eq!(power.effects[0].value.at_level(8), 4);
    }

    #[test]
    fn conditional_effects() {
        let effect = PassiveEffect::new(EffectKind::Speed, EffectValue::Flat(3));
        assert!(effect.is_unconditional());
        assert!(!effect.when("sem armadura pesada").is_unconditional());
    }
}
