//! Skill consolidation and free-slot editing.
//!
//! Merges the skills granted by class, origin, the school flag, and the
//! character's track into one [`SkillGrants`] multiset, turns duplicate
//! grants into stacking bonuses, and tracks the pool of freely chosen skills
//! (`class free slots + Intelecto`).

pub mod grants;

pub use grants::{BonusMap, GrantSource, SkillEntry, SkillGrants};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use ft_core::{BuildContext, Catalog, SkillChoiceGroup, TrainingGrade, fold_name};

use crate::error::{MechError, MechResult};

/// The player's picks for every choice group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillChoices {
    /// Picks per class choice group, in group order.
    #[serde(default)]
    pub class: Vec<Vec<String>>,
    /// Picks for the origin choice group.
    #[serde(default)]
    pub origin: Vec<String>,
}

impl SkillChoices {
    /// Picks for class groups and the origin group.
    pub fn new(class: Vec<Vec<String>>, origin: Vec<String>) -> Self {
        Self { class, origin }
    }
}

/// How far a choice group has been filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceStatus {
    /// Which group this is.
    pub source: GrantSource,
    /// Skills the group asks for.
    pub choose: usize,
    /// Valid picks accepted.
    pub chosen: usize,
}

impl ChoiceStatus {
    /// Returns true if every slot of the group is spent.
    pub fn is_filled(&self) -> bool {
        self.chosen >= self.choose
    }
}

/// Outcome of a free-skill edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "detail")]
pub enum SkillToggle {
    /// The skill now occupies a free slot.
    Added(String),
    /// The skill left its free slot.
    Removed(String),
    /// Nothing changed, for the given reason.
    Rejected(String),
}

impl SkillToggle {
    /// Returns true if the edit was refused.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Resolved skills for a class, origin, and context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillConsolidation {
    /// Every grant, by skill.
    pub grants: SkillGrants,
    /// Fill state of each class and origin choice group.
    pub choices: Vec<ChoiceStatus>,
    /// Slots available for free skills.
    pub free_slots: usize,
    /// Picks that were ignored, with reasons.
    pub issues: Vec<String>,
    /// Skill names free picks must come from. Empty accepts any name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub known_skills: Vec<String>,
}

impl SkillConsolidation {
    /// Names of every trained skill.
    pub fn trained(&self) -> Vec<String> {
        self.grants.trained().map(String::from).collect()
    }

    /// Duplicate bonuses.
    pub fn bonuses(&self) -> BonusMap {
        self.grants.bonuses()
    }

    /// Number of free slots in use, counting track skills that no class,
    /// origin, or school grant covers.
    pub fn free_count(&self) -> usize {
        self.grants.slotted().count()
    }

    /// Free slots still open.
    pub fn remaining_free_slots(&self) -> usize {
        self.free_slots.saturating_sub(self.free_count())
    }

    /// Returns true if free skills fit in the free slots.
    pub fn is_within_slots(&self) -> bool {
        self.free_count() <= self.free_slots
    }

    /// Returns true if every choice group is filled.
    pub fn choices_complete(&self) -> bool {
        self.choices.iter().all(ChoiceStatus::is_filled)
    }

    /// Returns true if the skill step of character creation is finished:
    /// every choice group filled and every free slot used.
    pub fn is_complete(&self) -> bool {
        self.choices_complete() && self.free_count() == self.free_slots
    }

    /// Catalog spelling of `skill`, or `None` if the catalog lacks it.
    fn known_skill(&self, skill: &str) -> Option<String> {
        let name = skill.trim();
        if self.known_skills.is_empty() {
            return Some(name.to_string());
        }
        let key = fold_name(name);
        self.known_skills.iter().find(|s| fold_name(s) == key).cloned()
    }

    /// Put a skill into a free slot.
    pub fn add_free_skill(&mut self, skill: &str) -> SkillToggle {
        let Some(name) = self.known_skill(skill) else {
            let reason = format!("'{}' is not a known skill", skill.trim());
            debug!(skill, %reason, "free skill refused");
            return SkillToggle::Rejected(reason);
        };
        let name = name.as_str();
        if let Some(entry) = self.grants.get(name) {
            let reason = if entry.is_locked() {
                format!("'{}' is already trained ({})", entry.name, describe(&entry.sources))
            } else {
                format!("'{}' is already a free skill", entry.name)
            };
            debug!(skill = name, %reason, "free skill refused");
            return SkillToggle::Rejected(reason);
        }
        if self.free_count() >= self.free_slots {
            let reason = format!(
                "no free skill slots left ({} of {} used)",
                self.free_count(),
                self.free_slots
            );
            debug!(skill = name, %reason, "free skill refused");
            return SkillToggle::Rejected(reason);
        }
        self.grants.grant(name, GrantSource::Free);
        SkillToggle::Added(name.to_string())
    }

    /// Take a skill out of its free slot.
    pub fn remove_free_skill(&mut self, skill: &str) -> SkillToggle {
        let Some(entry) = self.grants.get(skill) else {
            return SkillToggle::Rejected(format!("'{}' is not trained", skill.trim()));
        };
        if entry.is_locked() {
            let reason = format!(
                "'{}' is granted by {} and cannot be removed",
                entry.name,
                describe(&entry.sources)
            );
            debug!(skill, %reason, "free skill removal refused");
            return SkillToggle::Rejected(reason);
        }
        let name = entry.name.clone();
        self.grants.revoke(skill, GrantSource::Free);
        SkillToggle::Removed(name)
    }

    /// Add the skill if untrained, remove it if it is a free skill.
    pub fn toggle_free_skill(&mut self, skill: &str) -> SkillToggle {
        if self.grants.contains(skill) {
            self.remove_free_skill(skill)
        } else {
            self.add_free_skill(skill)
        }
    }

    /// Training grades for every trained skill.
    ///
    /// Grades for untrained skills are ignored; trained skills without an
    /// entry are [`TrainingGrade::Trained`].
    pub fn profile(&self, grades: &BTreeMap<String, TrainingGrade>) -> SkillProfile {
        let folded: BTreeMap<String, TrainingGrade> =
            grades.iter().map(|(k, &g)| (fold_name(k), g)).collect();
        let mut profile = SkillProfile::new();
        for name in self.grants.trained() {
            let grade = folded.get(&fold_name(name)).copied().unwrap_or_default();
            profile.set(name, grade);
        }
        profile
    }
}

fn describe(sources: &[GrantSource]) -> String {
    let parts: Vec<String> = sources.iter().map(ToString::to_string).collect();
    parts.join(", ")
}

/// Resolve every skill grant for a class, origin, and context.
///
/// Fixed grants come first, then choice picks, then the school skill, then
/// the track's required skill. A skill granted by several bonus-eligible
/// sides (class, origin, school) gains +2 per side after the first. The
/// track grant locks the skill without a bonus and takes a free slot when no
/// other side covers it. Picks that are not offered by their group, or that
/// overflow it, are dropped and reported in [`SkillConsolidation::issues`].
pub fn consolidate_skills(
    catalog: &Catalog,
    class_id: &str,
    origin_id: &str,
    choices: &SkillChoices,
    context: &BuildContext,
    intellect: u8,
) -> MechResult<SkillConsolidation> {
    let class = catalog
        .class(class_id)
        .ok_or_else(|| MechError::UnknownClass(class_id.to_string()))?;
    let origin = catalog
        .origin(origin_id)
        .ok_or_else(|| MechError::UnknownOrigin(origin_id.to_string()))?;

    let mut grants = SkillGrants::new();
    let mut statuses = Vec::new();
    let mut issues = Vec::new();

    for skill in &class.fixed_skills {
        grants.grant(skill, GrantSource::ClassFixed);
    }
    for skill in &origin.fixed_skills {
        grants.grant(skill, GrantSource::OriginFixed);
    }

    for (index, group) in class.skill_choices.iter().enumerate() {
        let picks = choices.class.get(index).map(Vec::as_slice).unwrap_or_default();
        let source = GrantSource::ClassChoice(index);
        statuses.push(apply_choice_group(&mut grants, group, picks, source, &mut issues));
    }
    if let Some(group) = &origin.skill_choice {
        let source = GrantSource::OriginChoice;
        statuses.push(apply_choice_group(
            &mut grants,
            group,
            &choices.origin,
            source,
            &mut issues,
        ));
    } else if !choices.origin.is_empty() {
        issues.push(format!("origin '{}' has no skill choice", origin.id));
    }
    if choices.class.len() > class.skill_choices.len() {
        issues.push(format!(
            "class '{}' has {} choice group(s), {} given",
            class.id,
            class.skill_choices.len(),
            choices.class.len()
        ));
    }

    if context.school {
        trace!(skill = %catalog.school_skill, "school grant");
        grants.grant(&catalog.school_skill, GrantSource::School);
    }

    if let Some(track_id) = &context.track {
        let track = catalog
            .track(track_id)
            .ok_or_else(|| MechError::UnknownTrack(track_id.clone()))?;
        if let Some(skill) = &track.required_skill {
            trace!(%skill, track = %track.id, "track grant");
            grants.grant(skill, GrantSource::Track);
        }
    }

    let free_slots = usize::from(class.free_skill_slots) + usize::from(intellect);

    Ok(SkillConsolidation {
        grants,
        choices: statuses,
        free_slots,
        issues,
        known_skills: catalog.skills.clone(),
    })
}

fn apply_choice_group(
    grants: &mut SkillGrants,
    group: &SkillChoiceGroup,
    picks: &[String],
    source: GrantSource,
    issues: &mut Vec<String>,
) -> ChoiceStatus {
    let mut chosen = 0;
    for pick in picks {
        let Some(option) = group.canonical(pick) else {
            issues.push(format!("{source}: '{}' is not an option", pick.trim()));
            continue;
        };
        if chosen == group.choose {
            issues.push(format!(
                "{source}: '{option}' ignored, only {} pick(s) allowed",
                group.choose
            ));
            continue;
        }
        if grants.grant(option, source) {
            trace!(skill = option, %source, "choice grant");
            chosen += 1;
        } else {
            issues.push(format!("{source}: '{option}' picked twice"));
        }
    }
    ChoiceStatus {
        source,
        choose: group.choose,
        chosen,
    }
}

/// Training grade per trained skill, as power prerequisites see it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProfile {
    skills: BTreeMap<String, (String, TrainingGrade)>,
}

impl SkillProfile {
    /// No trained skills.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every listed skill at [`TrainingGrade::Trained`].
    pub fn trained_in<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut profile = Self::new();
        for skill in skills {
            profile.set(skill.as_ref(), TrainingGrade::Trained);
        }
        profile
    }

    /// Train a skill at a grade.
    pub fn set(&mut self, skill: &str, grade: TrainingGrade) {
        self.skills
            .insert(fold_name(skill), (skill.trim().to_string(), grade));
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, skill: &str, grade: TrainingGrade) -> Self {
        self.set(skill, grade);
        self
    }

    /// Grade in a skill, or `None` if untrained.
    pub fn grade_of(&self, skill: &str) -> Option<TrainingGrade> {
        self.skills.get(&fold_name(skill)).map(|(_, g)| *g)
    }

    /// Returns true if the skill is trained at any grade.
    pub fn is_trained(&self, skill: &str) -> bool {
        self.grade_of(skill).is_some()
    }

    /// Iterate `(name, grade)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TrainingGrade)> {
        self.skills.values().map(|(n, g)| (n.as_str(), *g))
    }
}
