//! Passive power effects folded into numeric modifiers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ft_core::{EffectKind, PowerDefinition, PowerKind};

/// Flat modifiers from selected passive powers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifiers {
    /// Added to defense.
    pub defense: i32,
    /// Added to damage reduction.
    pub damage_reduction: i32,
    /// Added to speed.
    pub speed: i32,
    /// Added to maximum PV.
    pub pv: i32,
    /// Added to maximum PE.
    pub pe: i32,
    /// Added to maximum EA.
    pub ea: i32,
    /// Added to maximum SAN.
    pub san: i32,
    /// Check bonuses per skill.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub skills: BTreeMap<String, i32>,
}

impl StatModifiers {
    /// No modifiers.
    pub fn none() -> Self {
        Self::default()
    }

    /// Add `amount` to the stat an effect kind targets.
    pub fn apply(&mut self, kind: EffectKind, skill: Option<&str>, amount: i32) {
        match kind {
            EffectKind::Defense => self.defense += amount,
            EffectKind::DamageReduction => self.damage_reduction += amount,
            EffectKind::Speed => self.speed += amount,
            EffectKind::Pv => self.pv += amount,
            EffectKind::Pe => self.pe += amount,
            EffectKind::Ea => self.ea += amount,
            EffectKind::San => self.san += amount,
            EffectKind::Skill => {
                if let Some(skill) = skill {
                    *self.skills.entry(skill.to_string()).or_insert(0) += amount;
                }
            }
        }
    }

    /// Returns true if nothing is modified.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Sum the unconditional effects of passive powers at `level`.
///
/// Manual powers and effects with an activation condition are skipped.
pub fn passive_modifiers<'a, I>(powers: I, level: u8) -> StatModifiers
where
    I: IntoIterator<Item = &'a PowerDefinition>,
{
    let mut modifiers = StatModifiers::none();
    for power in powers {
        if power.kind != PowerKind::Passive {
            continue;
        }
        for effect in power.effects.iter().filter(|e| e.is_unconditional()) {
            modifiers.apply(effect.kind, effect.skill.as_deref(), effect.value.at_level(level));
        }
    }
    modifiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_core::{EffectValue, PassiveEffect};

    #[test]
    fn sums_unconditional_passive_effects() {
        let powers = [
            PowerDefinition::new("pele", "Pele de Aço", PowerKind::Passive, "defesa")
                .effect(PassiveEffect::new(EffectKind::DamageReduction, EffectValue::Flat(2))),
            PowerDefinition::new("vital", "Vitalidade", PowerKind::Passive, "defesa").effect(
                PassiveEffect::new(
                    EffectKind::Pv,
                    EffectValue::PerLevel {
                        base: 0,
                        every: 1,
                        step: 1,
                    },
                ),
            ),
            PowerDefinition::new("corrida", "Corrida", PowerKind::Passive, "movimento").effect(
                PassiveEffect::new(EffectKind::Speed, EffectValue::Flat(3)).when("sem armadura"),
            ),
            PowerDefinition::new("golpe", "Golpe", PowerKind::Manual, "combate")
                .effect(PassiveEffect::new(EffectKind::Defense, EffectValue::Flat(5))),
        ];
        let mods = passive_modifiers(&powers, 4);
        assert_eq!(mods.damage_reduction, 2);
        assert_eq!(mods.pv, 4);
        assert_eq!(mods.speed, 0);
        assert_eq!(mods.defense, 0);
    }

    #[test]
    fn skill_effects_accumulate_per_skill() {
        let powers = [
            PowerDefinition::new("a", "A", PowerKind::Passive, "x")
                .effect(PassiveEffect::skill_bonus("Percepção", EffectValue::Flat(2))),
            PowerDefinition::new("b", "B", PowerKind::Passive, "x")
                .effect(PassiveEffect::skill_bonus("Percepção", EffectValue::Flat(1))),
        ];
        let mods = passive_modifiers(&powers, 1);
        assert_eq!(mods.skills.get("Percepção"), Some(&3));
        assert!(!mods.is_empty());
        let none: Vec<PowerDefinition> = Vec::new();
        assert!(passive_modifiers(&none, 1).is_empty());
    }
}
