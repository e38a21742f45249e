//! Technique grade allocation.
//!
//! A character's grade in each technique category is the sum of automatic
//! grades (school, track, clan) and points the player spent. Spent points
//! are capped by a level-derived budget, and every category above the base
//! one needs a minimum base grade first. Automatic grades act as a floor:
//! decrementing never goes below them.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use ft_core::build::{MAX_LEVEL, MIN_LEVEL};
use ft_core::{BuildContext, Catalog, ClanDefinition, TechniqueCategory, TechniqueGrades};

use crate::error::{MechError, MechResult};

/// Levels at which the technique budget grows by one.
const TECHNIQUE_STEP_LEVELS: [u8; 4] = [2, 8, 14, 18];

/// Technique points a character of `level` may spend.
pub fn technique_budget(level: u8) -> u8 {
    let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
    1 + TECHNIQUE_STEP_LEVELS.iter().filter(|&&t| level >= t).count() as u8
}

/// Whether one more grade may go into a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeCheck {
    /// True when the grade may be added.
    pub allowed: bool,
    /// Why not, when refused.
    pub reason: Option<String>,
}

impl GradeCheck {
    fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn deny(reason: String) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// Check the category prerequisites against the current total grades.
///
/// This ignores the point budget; [`TechniqueAllocation::increment`] checks
/// both.
pub fn can_increment(
    category: TechniqueCategory,
    grades: &TechniqueGrades,
    clan: Option<&ClanDefinition>,
) -> GradeCheck {
    if category.requires_privileged_clan() && !clan.is_some_and(|c| c.privileged) {
        return GradeCheck::deny(format!("{category} techniques require a privileged clan"));
    }
    let needed = category.required_base_grade();
    let base = grades.get(TechniqueCategory::Base);
    if base < needed {
        return GradeCheck::deny(format!(
            "{category} requires base grade {needed} (have {base})"
        ));
    }
    GradeCheck::allow()
}

/// Grades granted without spending points.
///
/// School students get one base grade. Track and clan bonuses apply once the
/// character reaches their level and, where a bonus names one, picks its
/// sub-path.
pub fn automatic_bonuses(catalog: &Catalog, context: &BuildContext) -> MechResult<TechniqueGrades> {
    let mut grades = TechniqueGrades::new();
    if context.school {
        grades.add(TechniqueCategory::Base, 1);
    }

    let sub_path = context.sub_path.as_deref();
    if let Some(track_id) = &context.track {
        let track = catalog
            .track(track_id)
            .ok_or_else(|| MechError::UnknownTrack(track_id.clone()))?;
        for bonus in &track.technique_bonuses {
            if bonus.applies(context.level, sub_path) {
                trace!(
                    track = %track.id,
                    category = %bonus.category,
                    grade = bonus.grade,
                    "track bonus"
                );
                grades.add(bonus.category, bonus.grade);
            }
        }
    }

    if let Some(clan_id) = &context.clan {
        let clan = catalog
            .clan(clan_id)
            .ok_or_else(|| MechError::UnknownClan(clan_id.clone()))?;
        for bonus in &clan.technique_bonuses {
            if bonus.applies(context.level, sub_path) {
                trace!(
                    clan = %clan.id,
                    category = %bonus.category,
                    grade = bonus.grade,
                    "clan bonus"
                );
                grades.add(bonus.category, bonus.grade);
            }
        }
    }

    Ok(grades)
}

/// Result of one increment or decrement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueStep {
    /// True when the grade changed.
    pub allowed: bool,
    /// Why not, when refused.
    pub reason: Option<String>,
    /// Total grades after the step.
    pub grades: TechniqueGrades,
}

/// Automatic grades plus the points a player spends on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueAllocation {
    /// Grades from school, track, and clan.
    pub automatic: TechniqueGrades,
    /// Grades bought with technique points.
    pub manual: TechniqueGrades,
    /// Points available at the character's level.
    pub budget: u8,
}

impl TechniqueAllocation {
    /// Start from automatic grades and an existing manual spend.
    pub fn new(automatic: TechniqueGrades, manual: TechniqueGrades, level: u8) -> Self {
        Self {
            automatic,
            manual,
            budget: technique_budget(level),
        }
    }

    /// Resolve automatic grades from the context and wrap a manual spend.
    pub fn from_context(
        catalog: &Catalog,
        context: &BuildContext,
        manual: TechniqueGrades,
    ) -> MechResult<Self> {
        let automatic = automatic_bonuses(catalog, context)?;
        Ok(Self::new(automatic, manual, context.level))
    }

    /// Total grade per category.
    pub fn grades(&self) -> TechniqueGrades {
        self.automatic.combined(&self.manual)
    }

    /// Points spent.
    pub fn spent(&self) -> u32 {
        self.manual.total()
    }

    /// Points left; negative when overspent.
    pub fn remaining(&self) -> i32 {
        i32::from(self.budget) - self.spent() as i32
    }

    fn step(&self, allowed: bool, reason: Option<String>) -> TechniqueStep {
        TechniqueStep {
            allowed,
            reason,
            grades: self.grades(),
        }
    }

    /// Spend a point on a category.
    pub fn increment(
        &mut self,
        category: TechniqueCategory,
        clan: Option<&ClanDefinition>,
    ) -> TechniqueStep {
        if self.remaining() <= 0 {
            let reason = format!("no technique points left ({} of {})", self.spent(), self.budget);
            debug!(%category, %reason, "technique increment refused");
            return self.step(false, Some(reason));
        }
        let check = can_increment(category, &self.grades(), clan);
        if !check.allowed {
            debug!(%category, reason = ?check.reason, "technique increment refused");
            return self.step(false, check.reason);
        }
        self.manual.add(category, 1);
        self.step(true, None)
    }

    /// Take back a point from a category.
    ///
    /// Refused when no manual point sits in the category, or when lowering
    /// the base grade would strand a category that depends on it.
    pub fn decrement(&mut self, category: TechniqueCategory) -> TechniqueStep {
        if self.manual.get(category) == 0 {
            let floor = self.automatic.get(category);
            let reason = if floor > 0 {
                format!("{category} cannot go below its automatic grade {floor}")
            } else {
                format!("{category} is already at grade 0")
            };
            debug!(%category, %reason, "technique decrement refused");
            return self.step(false, Some(reason));
        }

        if category == TechniqueCategory::Base {
            let lowered = self.grades().get(TechniqueCategory::Base) - 1;
            let stranded = self
                .manual
                .iter()
                .map(|(c, _)| c)
                .find(|c| c.required_base_grade() > lowered);
            if let Some(dependent) = stranded {
                let reason = format!(
                    "{dependent} requires base grade {}",
                    dependent.required_base_grade()
                );
                debug!(%category, %reason, "technique decrement refused");
                return self.step(false, Some(reason));
            }
        }

        self.manual.take_one(category);
        self.step(true, None)
    }

    /// Problems with the current manual spend.
    pub fn validate_manual(&self, clan: Option<&ClanDefinition>) -> Vec<String> {
        let mut issues = Vec::new();
        if self.remaining() < 0 {
            issues.push(format!(
                "{} technique point(s) spent, budget is {}",
                self.spent(),
                self.budget
            ));
        }
        let grades = self.grades();
        for (category, _) in self.manual.iter() {
            if let Some(reason) = can_increment(category, &grades, clan).reason {
                issues.push(reason);
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_core::{TechniqueBonus, TrackDefinition};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::empty("test", "Feitiçaria");
        catalog.tracks.push(TrackDefinition {
            id: "mestre_de_barreiras".to_string(),
            name: "Mestre de Barreiras".to_string(),
            class: "feiticeiro".to_string(),
            required_skill: None,
            sub_paths: vec!["anti_barreira".to_string(), "dominio".to_string()],
            technique_bonuses: vec![
                TechniqueBonus::at_level(TechniqueCategory::Barrier, 5),
                TechniqueBonus::at_level(TechniqueCategory::AntiBarrier, 15)
                    .for_sub_path("anti_barreira"),
                TechniqueBonus::at_level(TechniqueCategory::Barrier, 15).for_sub_path("dominio"),
            ],
        });
        catalog.clans.push(clan(true));
        catalog
    }

    fn clan(privileged: bool) -> ClanDefinition {
        ClanDefinition {
            id: "zenin".to_string(),
            name: "Zen'in".to_string(),
            privileged,
            technique_bonuses: vec![TechniqueBonus::at_level(TechniqueCategory::Shikigami, 10)],
        }
    }

    #[test]
    fn budget_steps_at_thresholds() {
        assert_eq!(technique_budget(1), 1);
        assert_eq!(technique_budget(2), 2);
        assert_eq!(technique_budget(8), 3);
        assert_eq!(technique_budget(14), 4);
        assert_eq!(technique_budget(20), 5);
    }

    #[test]
    fn reversed_needs_base_two() {
        let grades: TechniqueGrades = [(TechniqueCategory::Base, 1)].into_iter().collect();
        let check = can_increment(TechniqueCategory::Reversed, &grades, None);
        assert!(!check.allowed);
        assert!(check.reason.unwrap().contains("base grade 2"));

        let grades: TechniqueGrades = [(TechniqueCategory::Base, 2)].into_iter().collect();
        assert!(can_increment(TechniqueCategory::Reversed, &grades, None).allowed);
    }

    #[test]
    fn secret_needs_privileged_clan() {
        let grades: TechniqueGrades = [(TechniqueCategory::Base, 1)].into_iter().collect();
        assert!(!can_increment(TechniqueCategory::Secret, &grades, None).allowed);
        assert!(!can_increment(TechniqueCategory::Secret, &grades, Some(&clan(false))).allowed);
        assert!(can_increment(TechniqueCategory::Secret, &grades, Some(&clan(true))).allowed);
    }

    #[test]
    fn automatic_grades_follow_level_and_sub_path() {
        let catalog = catalog();
        let ctx = BuildContext::at_level(5)
            .with_school()
            .with_track("mestre_de_barreiras");
        let grades = automatic_bonuses(&catalog, &ctx).unwrap();
        assert_eq!(grades.get(TechniqueCategory::Base), 1);
        assert_eq!(grades.get(TechniqueCategory::Barrier), 1);

        let ctx = BuildContext::at_level(15)
            .with_track("mestre_de_barreiras")
            .with_sub_path("dominio")
            .with_clan("zenin");
        let grades = automatic_bonuses(&catalog, &ctx).unwrap();
        assert_eq!(grades.get(TechniqueCategory::Barrier), 2);
        assert_eq!(grades.get(TechniqueCategory::AntiBarrier), 0);
        assert_eq!(grades.get(TechniqueCategory::Shikigami), 1);
    }

    #[test]
    fn unknown_track_or_clan_is_an_error() {
        let catalog = catalog();
        let ctx = BuildContext::at_level(1).with_track("nope");
        assert!(matches!(
            automatic_bonuses(&catalog, &ctx),
            Err(MechError::UnknownTrack(_))
        ));
        let ctx = BuildContext::at_level(1).with_clan("nope");
        assert!(matches!(
            automatic_bonuses(&catalog, &ctx),
            Err(MechError::UnknownClan(_))
        ));
    }

    #[test]
    fn increment_spends_budget_and_checks_prerequisites() {
        let mut alloc = TechniqueAllocation::new(TechniqueGrades::new(), TechniqueGrades::new(), 2);
        assert_eq!(alloc.budget, 2);

        let step = alloc.increment(TechniqueCategory::Barrier, None);
        assert!(!step.allowed);
        assert_eq!(alloc.spent(), 0);

        assert!(alloc.increment(TechniqueCategory::Base, None).allowed);
        let step = alloc.increment(TechniqueCategory::Barrier, None);
        assert!(step.allowed);
        assert_eq!(step.grades.get(TechniqueCategory::Barrier), 1);
        assert_eq!(alloc.remaining(), 0);

        let step = alloc.increment(TechniqueCategory::Base, None);
        assert!(!step.allowed);
        assert!(step.reason.unwrap().contains("no technique points left"));
    }

    #[test]
    fn automatic_base_unlocks_categories() {
        let catalog = catalog();
        let ctx = BuildContext::at_level(1).with_school();
        let mut alloc =
            TechniqueAllocation::from_context(&catalog, &ctx, TechniqueGrades::new()).unwrap();
        let step = alloc.increment(TechniqueCategory::AntiBarrier, None);
        assert!(step.allowed);
        assert_eq!(step.grades.get(TechniqueCategory::Base), 1);
    }

    #[test]
    fn decrement_respects_automatic_floor() {
        let automatic: TechniqueGrades = [(TechniqueCategory::Base, 1)].into_iter().collect();
        let manual: TechniqueGrades = [(TechniqueCategory::Base, 1)].into_iter().collect();
        let mut alloc = TechniqueAllocation::new(automatic, manual, 8);

        assert!(alloc.decrement(TechniqueCategory::Base).allowed);
        let step = alloc.decrement(TechniqueCategory::Base);
        assert!(!step.allowed);
        assert!(step.reason.unwrap().contains("automatic grade 1"));
        assert_eq!(alloc.grades().get(TechniqueCategory::Base), 1);

        assert!(!alloc.decrement(TechniqueCategory::Shikigami).allowed);
    }

    #[test]
    fn decrement_refuses_to_strand_dependents() {
        let manual: TechniqueGrades = [
            (TechniqueCategory::Base, 2),
            (TechniqueCategory::Reversed, 1),
        ]
        .into_iter()
        .collect();
        let mut alloc = TechniqueAllocation::new(TechniqueGrades::new(), manual, 8);
        let step = alloc.decrement(TechniqueCategory::Base);
        assert!(!step.allowed);
        assert!(step.reason.unwrap().contains("base grade 2"));
        assert!(alloc.decrement(TechniqueCategory::Reversed).allowed);
        assert!(alloc.decrement(TechniqueCategory::Base).allowed);
    }

    #[test]
    fn zero_padded_manual_map_decrements_base() {
        let manual: TechniqueGrades = serde_json::from_str(
            r#"{"base":1,"barrier":0,"reversed":0,"anti_barrier":0,"shikigami":0,"secret":0}"#,
        )
        .unwrap();
        let mut alloc = TechniqueAllocation::new(TechniqueGrades::new(), manual, 1);
        assert!(alloc.validate_manual(None).is_empty());
        assert!(alloc.decrement(TechniqueCategory::Base).allowed);
        assert!(alloc.grades().is_empty());
    }

    #[test]
    fn validate_manual_reports_overspend_and_missing_base() {
        let manual: TechniqueGrades = [
            (TechniqueCategory::Barrier, 1),
            (TechniqueCategory::Secret, 1),
        ]
        .into_iter()
        .collect();
        let alloc = TechniqueAllocation::new(TechniqueGrades::new(), manual, 1);
        let issues = alloc.validate_manual(None);
        assert_eq!(issues.len(), 3);
        assert!(issues[0].contains("budget is 1"));
    }
}
