//! The rules facade: a validated catalog plus its power graph.
//!
//! [`Rules`] is built once from a [`Catalog`] (loaded from JSON with
//! [`Rules::load`] or taken from [`preset::standard`]) and then shared
//! read-only. Every operation is a pure function of the rules and its
//! arguments.

pub mod preset;

use std::path::Path;

use tracing::{debug, info};

use ft_core::{
    Attributes, BuildContext, Catalog, CharacterBuild, ClanDefinition, ClassDefinition,
    PowerDefinition, ResourceAttribute, TechniqueCategory,
};

use crate::attributes::{Allocation, allocate_attributes};
use crate::error::{MechError, MechResult};
use crate::powers::{self, BuildState, Eligibility, PowerGraph, PowerToggle, StatModifiers};
use crate::sheet::CharacterSheet;
use crate::skills::{self, SkillChoices, SkillConsolidation, SkillToggle};
use crate::stats::{self, CalculatedStats};
use crate::techniques::{TechniqueAllocation, TechniqueStep};
use crate::validate::{self, ValidationIssue};

/// A validated catalog and the prerequisite graph built from it.
#[derive(Debug, Clone)]
pub struct Rules {
    catalog: Catalog,
    graph: PowerGraph,
}

impl Rules {
    /// Validate a catalog and build its power graph.
    pub fn new(catalog: Catalog) -> MechResult<Self> {
        catalog.validate()?;
        let graph = PowerGraph::build(&catalog.powers)?;
        info!(
            catalog = %catalog.name,
            classes = catalog.classes.len(),
            origins = catalog.origins.len(),
            powers = catalog.powers.len(),
            "rules loaded"
        );
        Ok(Self { catalog, graph })
    }

    /// The built-in standard rules.
    pub fn standard() -> MechResult<Self> {
        Self::new(preset::standard())
    }

    /// Parse rules from a JSON catalog.
    pub fn from_json(json: &str) -> MechResult<Self> {
        Self::new(Catalog::from_json(json)?)
    }

    /// Read rules from a JSON catalog file.
    pub fn load(path: &Path) -> MechResult<Self> {
        Self::new(Catalog::load(path)?)
    }

    /// The reference tables.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The power prerequisite graph.
    pub fn graph(&self) -> &PowerGraph {
        &self.graph
    }

    /// Look up a class, failing on unknown ids.
    pub fn class(&self, id: &str) -> MechResult<&ClassDefinition> {
        self.catalog
            .class(id)
            .ok_or_else(|| MechError::UnknownClass(id.to_string()))
    }

    /// Look up a power, failing on unknown ids.
    pub fn power(&self, id: &str) -> MechResult<&PowerDefinition> {
        self.catalog
            .power(id)
            .ok_or_else(|| MechError::UnknownPower(id.to_string()))
    }

    /// Look up an optional clan, failing on unknown ids.
    pub fn clan(&self, id: Option<&str>) -> MechResult<Option<&ClanDefinition>> {
        id.map(|id| {
            self.catalog
                .clan(id)
                .ok_or_else(|| MechError::UnknownClan(id.to_string()))
        })
        .transpose()
    }

    /// Check an attribute spread against the budget for `level`.
    pub fn allocate_attributes(&self, level: u8, attributes: &Attributes) -> Allocation {
        allocate_attributes(level, attributes)
    }

    /// Resolve skill grants for a class, origin, and context.
    pub fn consolidate_skills(
        &self,
        class_id: &str,
        origin_id: &str,
        choices: &SkillChoices,
        context: &BuildContext,
        intellect: u8,
    ) -> MechResult<SkillConsolidation> {
        skills::consolidate_skills(&self.catalog, class_id, origin_id, choices, context, intellect)
    }

    /// Consolidate a build's skills and apply its free picks.
    ///
    /// Free picks that are unknown or refused are reported in
    /// [`SkillConsolidation::issues`].
    pub fn build_skills(&self, build: &CharacterBuild) -> MechResult<SkillConsolidation> {
        let choices = SkillChoices::new(build.class_choices.clone(), build.origin_choices.clone());
        let mut skills = self.consolidate_skills(
            &build.class,
            &build.origin,
            &choices,
            &build.context(),
            build.attributes.intellect,
        )?;
        for pick in &build.free_skills {
            if let SkillToggle::Rejected(reason) = skills.add_free_skill(pick) {
                skills.issues.push(reason);
            }
        }
        Ok(skills)
    }

    /// Level, attributes, and graded skills of a build.
    pub fn build_state(&self, build: &CharacterBuild) -> MechResult<BuildState> {
        let skills = self.build_skills(build)?;
        Ok(BuildState::new(
            build.level,
            build.attributes,
            skills.profile(&build.skill_grades),
        ))
    }

    /// Check one power against a build state and the other selected powers.
    pub fn evaluate_power(
        &self,
        power_id: &str,
        state: &BuildState,
        selected: &[String],
    ) -> MechResult<Eligibility> {
        Ok(powers::evaluate_power(self.power(power_id)?, state, selected))
    }

    /// Select or deselect a power, cascading removals.
    pub fn toggle_power(
        &self,
        power_id: &str,
        state: &BuildState,
        selected: &[String],
    ) -> MechResult<PowerToggle> {
        powers::toggle_power(&self.catalog, &self.graph, power_id, state, selected)
    }

    /// Problems with a whole power selection.
    pub fn validate_powers(
        &self,
        state: &BuildState,
        selected: &[String],
    ) -> MechResult<Vec<String>> {
        powers::validate_selection(&self.catalog, state, selected)
    }

    /// Sum passive effects of the selected powers.
    pub fn passive_modifiers(&self, selected: &[String], level: u8) -> MechResult<StatModifiers> {
        let definitions = selected
            .iter()
            .map(|id| self.power(id))
            .collect::<MechResult<Vec<_>>>()?;
        Ok(powers::passive_modifiers(definitions, level))
    }

    /// Automatic grades and manual spend of a build.
    pub fn technique_allocation(&self, build: &CharacterBuild) -> MechResult<TechniqueAllocation> {
        TechniqueAllocation::from_context(&self.catalog, &build.context(), build.techniques.clone())
    }

    /// Spend one technique point, if the rules allow it.
    pub fn increment_technique_grade(
        &self,
        category: TechniqueCategory,
        allocation: &mut TechniqueAllocation,
        clan_id: Option<&str>,
    ) -> MechResult<TechniqueStep> {
        let clan = self.clan(clan_id)?;
        Ok(allocation.increment(category, clan))
    }

    /// Full pools and combat stats for a class, without equipment or powers.
    pub fn calculate_stats(
        &self,
        class_id: &str,
        level: u8,
        attributes: &Attributes,
        resource: ResourceAttribute,
    ) -> MechResult<CalculatedStats> {
        Ok(stats::calculate_stats(self.class(class_id)?, level, attributes, resource))
    }

    /// Full pools and combat stats for a build, with equipment and the
    /// passive effects of its selected powers.
    pub fn build_stats(&self, build: &CharacterBuild) -> MechResult<CalculatedStats> {
        let class = self.class(&build.class)?;
        let modifiers = self.passive_modifiers(&build.powers, build.level)?;
        debug!(build = %build.name, ?modifiers, "passive modifiers");
        Ok(stats::calculate_stats_with(
            class,
            build.level,
            &build.attributes,
            build.resource_attribute,
            &build.equipment,
            &modifiers,
        ))
    }

    /// Every rule violation and warning in a build.
    pub fn validate(&self, build: &CharacterBuild) -> Vec<ValidationIssue> {
        validate::validate_build(self, build)
    }

    /// The assembled sheet of a build.
    pub fn snapshot(&self, build: &CharacterBuild) -> MechResult<CharacterSheet> {
        CharacterSheet::assemble(self, build)
    }
}
