//! Power eligibility, selection, and cascading removal.
//!
//! A power is eligible when every prerequisite field holds: minimum level,
//! the attribute group, the skill group, and each required power. Attribute
//! and skill groups carry their own `all`/`any` mode. Eligibility is always
//! judged against the other selected powers, never the power itself.
//!
//! Deselecting a power also drops every selected power that depends on it,
//! directly or transitively, in the same call.

pub mod effects;
pub mod graph;

pub use effects::{StatModifiers, passive_modifiers};
pub use graph::PowerGraph;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use ft_core::build::{MAX_LEVEL, MIN_LEVEL};
use ft_core::{
    AttributeRequirement, Attributes, Catalog, PowerDefinition, RequirementGroup,
    RequirementMode, SkillRequirement,
};

use crate::error::{MechError, MechResult};
use crate::skills::SkillProfile;

/// Levels at which a character gains a power pick.
const POWER_STEP_LEVELS: [u8; 7] = [1, 3, 6, 9, 12, 15, 18];

/// Number of powers a character of `level` may hold.
pub fn power_allowance(level: u8) -> usize {
    let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
    POWER_STEP_LEVELS.iter().filter(|&&t| level >= t).count()
}

/// The parts of a build that power prerequisites read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildState {
    /// Character level.
    pub level: u8,
    /// Attribute scores.
    pub attributes: Attributes,
    /// Trained skills with their grades.
    pub skills: SkillProfile,
}

impl BuildState {
    /// Bundle level, attributes, and skills.
    pub fn new(level: u8, attributes: Attributes, skills: SkillProfile) -> Self {
        Self {
            level,
            attributes,
            skills,
        }
    }
}

/// Whether a power may be taken, and what is missing if not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    /// True when every prerequisite holds.
    pub eligible: bool,
    /// One entry per failed prerequisite field.
    pub reasons: Vec<String>,
}

impl Eligibility {
    fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            eligible: reasons.is_empty(),
            reasons,
        }
    }
}

/// Outcome of selecting or deselecting a power.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerToggle {
    /// The selection after the call; unchanged when rejected.
    pub selection: Vec<String>,
    /// The power added, if any.
    pub added: Option<String>,
    /// Powers removed: the toggled power first, then its dependents.
    pub removed: Vec<String>,
    /// Why the selection was refused.
    pub rejection: Option<String>,
}

impl PowerToggle {
    /// Returns true if the toggle was refused.
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }
}

fn group_reason<T, F>(group: &RequirementGroup<T>, holds: F) -> Vec<String>
where
    T: std::fmt::Display,
    F: Fn(&T) -> bool,
{
    if group.is_empty() {
        return Vec::new();
    }
    match group.mode {
        RequirementMode::All => group
            .items
            .iter()
            .filter(|item| !holds(item))
            .map(|item| format!("requires {item}"))
            .collect(),
        RequirementMode::Any => {
            if group.items.iter().any(&holds) {
                Vec::new()
            } else {
                let options: Vec<String> = group.items.iter().map(ToString::to_string).collect();
                vec![format!("requires one of: {}", options.join(", "))]
            }
        }
    }
}

fn attribute_holds(state: &BuildState, requirement: &AttributeRequirement) -> bool {
    state.attributes.get(requirement.attribute) >= requirement.minimum
}

fn skill_holds(state: &BuildState, requirement: &SkillRequirement) -> bool {
    match (state.skills.grade_of(&requirement.skill), requirement.grade) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(have), Some(need)) => have >= need,
    }
}

/// Check a power's prerequisites against a build and the other selected
/// powers.
pub fn evaluate_power(
    power: &PowerDefinition,
    state: &BuildState,
    selected: &[String],
) -> Eligibility {
    let prerequisites = &power.prerequisites;
    let mut reasons = Vec::new();

    if let Some(min_level) = prerequisites.min_level
        && state.level < min_level
    {
        reasons.push(format!("requires level {min_level}"));
    }

    reasons.extend(group_reason(&prerequisites.attributes, |r| attribute_holds(state, r)));
    reasons.extend(group_reason(&prerequisites.skills, |r| skill_holds(state, r)));

    for required in &prerequisites.powers {
        let present = selected
            .iter()
            .any(|id| id == required && id != &power.id);
        if !present {
            reasons.push(format!("requires power {required}"));
        }
    }

    trace!(power = %power.id, reasons = reasons.len(), "evaluated power");
    Eligibility::from_reasons(reasons)
}

/// Select a power if absent, deselect it (with its dependents) if present.
///
/// Selection needs the power to be eligible and a free pick under
/// [`power_allowance`]. A refused selection returns the input unchanged.
pub fn toggle_power(
    catalog: &Catalog,
    graph: &PowerGraph,
    power_id: &str,
    state: &BuildState,
    selected: &[String],
) -> MechResult<PowerToggle> {
    let power = catalog
        .power(power_id)
        .ok_or_else(|| MechError::UnknownPower(power_id.to_string()))?;

    if selected.iter().any(|id| id == power_id) {
        let mut removed = vec![power.id.clone()];
        removed.extend(
            graph
                .dependents_of(power_id)
                .into_iter()
                .filter(|dep| selected.contains(dep)),
        );
        let selection = selected
            .iter()
            .filter(|id| !removed.contains(id))
            .cloned()
            .collect();
        if removed.len() > 1 {
            debug!(power = power_id, cascade = ?&removed[1..], "cascading removal");
        }
        return Ok(PowerToggle {
            selection,
            added: None,
            removed,
            rejection: None,
        });
    }

    let rejected = |reason: String| {
        debug!(power = power_id, %reason, "power selection refused");
        PowerToggle {
            selection: selected.to_vec(),
            added: None,
            removed: Vec::new(),
            rejection: Some(reason),
        }
    };

    let eligibility = evaluate_power(power, state, selected);
    if !eligibility.eligible {
        return Ok(rejected(eligibility.reasons.join("; ")));
    }

    let allowance = power_allowance(state.level);
    if selected.len() >= allowance {
        return Ok(rejected(format!(
            "power allowance reached ({} of {allowance})",
            selected.len()
        )));
    }

    let mut selection = selected.to_vec();
    selection.push(power.id.clone());
    Ok(PowerToggle {
        selection,
        added: Some(power.id.clone()),
        removed: Vec::new(),
        rejection: None,
    })
}

/// Check a whole selection: allowance, duplicates, and each member's
/// prerequisites against the rest.
///
/// Returns one message per problem; empty means the selection is valid.
pub fn validate_selection(
    catalog: &Catalog,
    state: &BuildState,
    selected: &[String],
) -> MechResult<Vec<String>> {
    let mut issues = Vec::new();

    let allowance = power_allowance(state.level);
    if selected.len() > allowance {
        issues.push(format!(
            "{} powers selected, level {} allows {allowance}",
            selected.len(),
            state.level
        ));
    }

    for (index, id) in selected.iter().enumerate() {
        let power = catalog
            .power(id)
            .ok_or_else(|| MechError::UnknownPower(id.clone()))?;
        if selected[..index].contains(id) {
            issues.push(format!("{}: selected more than once", power.name));
            continue;
        }
        let eligibility = evaluate_power(power, state, selected);
        if !eligibility.eligible {
            issues.push(format!("{}: {}", power.name, eligibility.reasons.join("; ")));
        }
    }

    Ok(issues)
}
