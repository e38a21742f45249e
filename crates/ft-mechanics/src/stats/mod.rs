//! Derived resource pools and combat stats.
//!
//! Pools grow linearly with level from the class formulas. Energy scales
//! with whichever attribute the player chose as the resource attribute.
//! Defense, damage reduction, and speed come from agility, equipment, and
//! passive power modifiers.

pub mod pool;

pub use pool::{ResourcePool, preserve_fill};

use serde::{Deserialize, Serialize};

use ft_core::build::{MAX_LEVEL, MIN_LEVEL};
use ft_core::{Attribute, Attributes, ClassDefinition, Equipment, PoolFormula, ResourceAttribute};

use crate::powers::StatModifiers;

/// Defense before agility and bonuses.
const BASE_DEFENSE: i32 = 10;
/// Speed in meters before the agility bonus.
const BASE_SPEED: i32 = 9;

/// Speed bonus from agility.
fn agility_speed_bonus(agility: u8) -> i32 {
    match agility {
        5..=u8::MAX => 9,
        4 => 6,
        _ => 0,
    }
}

/// Every value derived from a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedStats {
    /// Pontos de vida.
    pub pv: ResourcePool,
    /// Pontos de esforço.
    pub pe: ResourcePool,
    /// Energia amaldiçoada.
    pub ea: ResourcePool,
    /// Sanidade.
    pub san: ResourcePool,
    /// Defense score.
    pub defense: i32,
    /// Damage reduction.
    pub damage_reduction: i32,
    /// Movement in meters per turn.
    pub speed: i32,
}

impl CalculatedStats {
    /// Keep each pool's fill ratio from `self` against the maxima of `fresh`.
    ///
    /// Combat stats are taken from `fresh` unchanged.
    pub fn recalculate(&self, fresh: CalculatedStats) -> CalculatedStats {
        CalculatedStats {
            pv: self.pv.rescale(fresh.pv.max),
            pe: self.pe.rescale(fresh.pe.max),
            ea: self.ea.rescale(fresh.ea.max),
            san: self.san.rescale(fresh.san.max),
            ..fresh
        }
    }

    /// The four pools with their labels, in sheet order.
    pub fn pools(&self) -> [(&'static str, ResourcePool); 4] {
        [
            ("PV", self.pv),
            ("PE", self.pe),
            ("EA", self.ea),
            ("SAN", self.san),
        ]
    }
}

fn pool_max(formula: &PoolFormula, level: u8, attributes: &Attributes) -> i32 {
    let term = formula
        .attribute
        .map_or(0, |attr| i32::from(attributes.get(attr)));
    formula.at_level(level, term)
}

/// Full pools and combat stats with no equipment or modifiers.
pub fn calculate_stats(
    class: &ClassDefinition,
    level: u8,
    attributes: &Attributes,
    resource: ResourceAttribute,
) -> CalculatedStats {
    calculate_stats_with(
        class,
        level,
        attributes,
        resource,
        &Equipment::default(),
        &StatModifiers::none(),
    )
}

/// Full pools and combat stats including equipment and passive modifiers.
pub fn calculate_stats_with(
    class: &ClassDefinition,
    level: u8,
    attributes: &Attributes,
    resource: ResourceAttribute,
    equipment: &Equipment,
    modifiers: &StatModifiers,
) -> CalculatedStats {
    let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
    let formulas = &class.resources;

    let energy_term = i32::from(attributes.get(resource.attribute()));
    let ea = formulas.ea.at_level(level, energy_term);

    let agility = attributes.get(Attribute::Agility);

    CalculatedStats {
        pv: ResourcePool::full(pool_max(&formulas.pv, level, attributes) + modifiers.pv),
        pe: ResourcePool::full(pool_max(&formulas.pe, level, attributes) + modifiers.pe),
        ea: ResourcePool::full(ea + modifiers.ea),
        san: ResourcePool::full(pool_max(&formulas.san, level, attributes) + modifiers.san),
        defense: BASE_DEFENSE + i32::from(agility) + equipment.defense + modifiers.defense,
        damage_reduction: equipment.damage_reduction + modifiers.damage_reduction,
        speed: BASE_SPEED + agility_speed_bonus(agility) + modifiers.speed,
    }
}
