use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::skill::SkillChoiceGroup;

/// Linear growth rule for one resource pool.
///
/// At level 1 the pool is `base + term`; every further level adds
/// `per_level + term`, where `term` is the score of the pool's attribute
/// (zero when the pool has none).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolFormula {
    /// Value at level 1 before the attribute term.
    pub base: i32,
    /// Gain per level after the first, before the attribute term.
    pub per_level: i32,
    /// Attribute added at level 1 and again on every level gained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Attribute>,
}

impl PoolFormula {
    /// A pool with no attribute term.
    pub const fn flat(base: i32, per_level: i32) -> Self {
        Self {
            base,
            per_level,
            attribute: None,
        }
    }

    /// A pool that adds an attribute term at every level.
    pub const fn with_attribute(base: i32, per_level: i32, attribute: Attribute) -> Self {
        Self {
            base,
            per_level,
            attribute: Some(attribute),
        }
    }

    /// Maximum value at `level` given the attribute term.
    pub fn at_level(&self, level: u8, term: i32) -> i32 {
        let extra_levels = i32::from(level.max(1)) - 1;
        self.base + term + (self.per_level + term) * extra_levels
    }
}

/// Pool formulas for health, effort, cursed energy, and sanity.
///
/// The energy formula's `attribute` is ignored: energy always scales with
/// the character's chosen resource attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFormulas {
    /// Pontos de vida.
    pub pv: PoolFormula,
    /// Pontos de esforço.
    pub pe: PoolFormula,
    /// Energia amaldiçoada.
    pub ea: PoolFormula,
    /// Sanidade.
    pub san: PoolFormula,
}

/// Static definition of a playable class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Stable identifier (e.g. `combatente`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free skill slots before the Intelecto bonus.
    pub free_skill_slots: u8,
    /// Skills every member of the class is trained in.
    #[serde(default)]
    pub fixed_skills: Vec<String>,
    /// "Choose N of M" groups the player must fill.
    #[serde(default)]
    pub skill_choices: Vec<SkillChoiceGroup>,
    /// Equipment proficiencies granted by the class.
    #[serde(default)]
    pub proficiencies: Vec<String>,
    /// Resource pool growth rules.
    pub resources: ResourceFormulas,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_one_is_base_plus_term() {
        let pv = PoolFormula::with_attribute(20, 4, Attribute::Vigor);
        assert_eq!(pv.at_level(1, 1), 21);
    }

    #[test]
    fn later_levels_add_per_level_plus_term() {
        let pv = PoolFormula::with_attribute(20, 4, Attribute::Vigor);
        assert_eq!(pv.at_level(2, 1), 26);
        assert_eq!(pv.at_level(5, 2), 22 + 6 * 4);
    }

    #[test]
    fn flat_formula_ignores_term_when_zero() {
        let san = PoolFormula::flat(12, 3);
        assert_eq!(san.at_level(1, 0), 12);
        assert_eq!(san.at_level(4, 0), 21);
    }

    #[test]
    fn level_zero_is_treated_as_one() {
        let pe = PoolFormula::flat(2, 2);
        assert_eq!(pe.at_level(0, 0), 2);
    }
}
