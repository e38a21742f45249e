//! Assembled character sheets.
//!
//! A [`CharacterSheet`] is the read-only view of a build after every rules
//! component has run: display names instead of ids, each trained skill with
//! its sources and total bonus, selected powers, technique grades, and the
//! derived stats. Storage and the wizard UI consume this shape.

use serde::{Deserialize, Serialize};

use ft_core::{
    Attributes, CharacterBuild, PowerKind, ResourceAttribute, TechniqueGrades, TrainingGrade,
};

use crate::error::MechResult;
use crate::rules::Rules;
use crate::skills::GrantSource;
use crate::stats::CalculatedStats;

/// One trained skill on the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLine {
    /// Skill name.
    pub name: String,
    /// Training grade.
    pub grade: TrainingGrade,
    /// Every source that granted it.
    pub sources: Vec<GrantSource>,
    /// Bonus from duplicate grants.
    pub duplicate_bonus: i32,
    /// Bonus from passive powers.
    pub power_bonus: i32,
}

impl SkillLine {
    /// Grade bonus plus every other bonus.
    pub fn total(&self) -> i32 {
        self.grade.bonus() + self.duplicate_bonus + self.power_bonus
    }

    /// Returns true if the skill cannot be dropped.
    pub fn is_locked(&self) -> bool {
        self.sources.iter().any(|s| !s.is_removable())
    }

    /// Returns true if the skill takes one of the free slots.
    pub fn uses_free_slot(&self) -> bool {
        !self.sources.iter().any(|s| s.awards_bonus())
    }
}

/// One selected power on the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerLine {
    /// Power id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Passive or manual.
    pub kind: PowerKind,
    /// Rules text.
    pub description: String,
    /// Situational effects that are not folded into the stats.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<String>,
}

/// A build with every derived value resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSheet {
    /// Character name.
    pub name: String,
    /// Class display name.
    pub class: String,
    /// Origin display name.
    pub origin: String,
    /// Clan display name.
    pub clan: Option<String>,
    /// Track display name.
    pub track: Option<String>,
    /// Sub-path inside the track.
    pub sub_path: Option<String>,
    /// Innate cursed technique.
    pub innate_technique: Option<String>,
    /// Character level.
    pub level: u8,
    /// Attribute scores.
    pub attributes: Attributes,
    /// Attribute feeding cursed energy.
    pub resource_attribute: ResourceAttribute,
    /// Class proficiencies.
    pub proficiencies: Vec<String>,
    /// Trained skills, sorted by name.
    pub skills: Vec<SkillLine>,
    /// Free skill slots available.
    pub free_slots: usize,
    /// Selected powers, in selection order.
    pub powers: Vec<PowerLine>,
    /// Grades from school, track, and clan.
    pub automatic_techniques: TechniqueGrades,
    /// Total technique grades.
    pub techniques: TechniqueGrades,
    /// Pools and combat stats.
    pub stats: CalculatedStats,
}

impl CharacterSheet {
    /// Run every rules component over a build.
    ///
    /// Unknown ids are errors; rule violations are not. Use
    /// [`crate::validate_build`] to see those.
    pub fn assemble(rules: &Rules, build: &CharacterBuild) -> MechResult<Self> {
        let catalog = rules.catalog();
        let class = rules.class(&build.class)?;
        let skills = rules.build_skills(build)?;
        let profile = skills.profile(&build.skill_grades);
        let modifiers = rules.passive_modifiers(&build.powers, build.level)?;
        let techniques = rules.technique_allocation(build)?;
        let stats = rules.build_stats(build)?;

        let origin = catalog
            .origin(&build.origin)
            .map_or_else(|| build.origin.clone(), |o| o.name.clone());
        let clan = rules
            .clan(build.clan.as_deref())?
            .map(|c| c.name.clone());
        let track = build
            .track
            .as_deref()
            .and_then(|id| catalog.track(id))
            .map(|t| t.name.clone());

        let skill_lines = skills
            .grants
            .entries()
            .map(|entry| SkillLine {
                name: entry.name.clone(),
                grade: profile.grade_of(&entry.name).unwrap_or_default(),
                sources: entry.sources.clone(),
                duplicate_bonus: entry.bonus(),
                power_bonus: modifiers
                    .skills
                    .iter()
                    .filter(|(skill, _)| ft_core::same_skill(skill, &entry.name))
                    .map(|(_, bonus)| *bonus)
                    .sum(),
            })
            .collect();

        let mut power_lines = Vec::new();
        for id in &build.powers {
            let power = rules.power(id)?;
            power_lines.push(PowerLine {
                id: power.id.clone(),
                name: power.name.clone(),
                kind: power.kind,
                description: power.description.clone(),
                conditions: power
                    .effects
                    .iter()
                    .filter_map(|e| e.condition.clone())
                    .collect(),
            });
        }

        Ok(Self {
            name: build.name.clone(),
            class: class.name.clone(),
            origin,
            clan,
            track,
            sub_path: build.sub_path.clone(),
            innate_technique: build.innate_technique.clone(),
            level: build.level,
            attributes: build.attributes,
            resource_attribute: build.resource_attribute,
            proficiencies: class.proficiencies.clone(),
            skills: skill_lines,
            free_slots: skills.free_slots,
            powers: power_lines,
            automatic_techniques: techniques.automatic.clone(),
            techniques: techniques.grades(),
            stats,
        })
    }

    /// The line for a skill, if trained.
    pub fn skill(&self, name: &str) -> Option<&SkillLine> {
        self.skills
            .iter()
            .find(|line| ft_core::same_skill(&line.name, name))
    }

    /// Returns true if the power is on the sheet.
    pub fn has_power(&self, id: &str) -> bool {
        self.powers.iter().any(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_core::TechniqueCategory;

    fn maki() -> CharacterBuild {
        let mut build = CharacterBuild::new("Maki", "combatente", "militar");
        build.clan = Some("zenin".to_string());
        build.level = 3;
        build.school = true;
        build.attributes = Attributes::new(3, 3, 1, 1, 1);
        build.class_choices = vec![
            vec!["Tática".to_string()],
            vec!["Pontaria".to_string(), "Reflexos".to_string()],
        ];
        build.free_skills = vec!["Atletismo".to_string(), "Percepção".to_string()];
        build.skill_grades.insert("Luta".to_string(), TrainingGrade::Graduated);
        build.powers = vec!["reflexos_defensivos".to_string(), "corrida".to_string()];
        build.techniques.add(TechniqueCategory::Barrier, 1);
        build
    }

    #[test]
    fn sheet_resolves_names_and_bonuses() {
        let rules = Rules::standard().unwrap();
        let sheet = rules.snapshot(&maki()).unwrap();
        assert_eq!(sheet.class, "Combatente");
        assert_eq!(sheet.clan.as_deref(), Some("Zen'in"));

        let tatica = sheet.skill("tatica").unwrap();
        assert_eq!(tatica.duplicate_bonus, 2);
        assert_eq!(tatica.sources.len(), 2);
        assert!(tatica.is_locked());

        let pontaria = sheet.skill("Pontaria").unwrap();
        assert_eq!(pontaria.duplicate_bonus, 2);

        let luta = sheet.skill("Luta").unwrap();
        assert_eq!(luta.grade, TrainingGrade::Graduated);
        assert_eq!(luta.total(), 10);

        assert!(sheet.skill("Feitiçaria").is_some());
        assert!(!sheet.skill("Atletismo").unwrap().is_locked());
    }

    #[test]
    fn sheet_carries_techniques_and_stats() {
        let rules = Rules::standard().unwrap();
        let sheet = rules.snapshot(&maki()).unwrap();
        assert_eq!(sheet.automatic_techniques.get(TechniqueCategory::Base), 1);
        assert_eq!(sheet.techniques.get(TechniqueCategory::Barrier), 1);
        assert_eq!(sheet.stats.defense, 10 + 3 + 2);
        assert_eq!(sheet.stats.speed, 9);
        assert!(sheet.has_power("corrida"));
        let corrida = sheet.powers.iter().find(|p| p.id == "corrida").unwrap();
        assert_eq!(corrida.conditions, vec!["sem proteção pesada"]);
    }

    #[test]
    fn passive_skill_bonus_reaches_the_line() {
        let rules = Rules::standard().unwrap();
        let mut build = CharacterBuild::new("Nobara", "feiticeiro", "academico");
        build.attributes = Attributes::new(1, 1, 2, 3, 2);
        build.powers = vec!["mente_blindada".to_string()];
        let sheet = rules.snapshot(&build).unwrap();
        assert_eq!(sheet.skill("Vontade").unwrap().power_bonus, 2);
        assert_eq!(sheet.stats.san.max, 25);
    }

    #[test]
    fn track_line_is_locked_and_slotted() {
        let rules = Rules::standard().unwrap();
        let mut build = CharacterBuild::new("Shoko", "especialista", "academico");
        build.attributes = Attributes::new(2, 1, 1, 3, 2);
        build.track = Some("medico_de_campo".to_string());
        let sheet = rules.snapshot(&build).unwrap();
        let medicina = sheet.skill("Medicina").unwrap();
        assert!(medicina.is_locked());
        assert!(medicina.uses_free_slot());
        assert!(!sheet.skill("Percepção").unwrap().uses_free_slot());
        assert_eq!(sheet.skills.iter().filter(|l| l.uses_free_slot()).count(), 1);
    }

    #[test]
    fn unknown_ids_fail_assembly() {
        let rules = Rules::standard().unwrap();
        let mut build = maki();
        build.class = "monge".to_string();
        assert!(rules.snapshot(&build).is_err());
    }
}
