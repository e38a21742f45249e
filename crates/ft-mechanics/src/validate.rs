//! Whole-build validation.
//!
//! Runs every rules component over a [`CharacterBuild`] and collects what is
//! wrong (errors) or unfinished (warnings). Unlike the individual
//! components, validation never fails: unknown ids become error issues too.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ft_core::CharacterBuild;
use ft_core::build::{MAX_LEVEL, MIN_LEVEL};

use crate::attributes::allocate_attributes;
use crate::rules::Rules;

/// A warning or error found in a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// The part of the build the issue concerns (attributes, skills, ...).
    pub section: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    /// An error in `section`.
    pub fn error(section: &str, message: impl Into<String>) -> Self {
        Self {
            section: section.to_string(),
            message: message.into(),
            is_error: true,
        }
    }

    /// A warning in `section`.
    pub fn warning(section: &str, message: impl Into<String>) -> Self {
        Self {
            section: section.to_string(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.section, self.message)
    }
}

/// Returns true if any issue is an error.
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.is_error)
}

/// Validate a complete build against the rules.
///
/// Returns every issue found; an empty list means the build is finished
/// and legal. Checks stop early only when the class, origin, track, or clan
/// id is unknown, since every later check depends on them.
pub fn validate_build(rules: &Rules, build: &CharacterBuild) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !(MIN_LEVEL..=MAX_LEVEL).contains(&build.level) {
        issues.push(ValidationIssue::error(
            "level",
            format!("level {} is outside [{MIN_LEVEL}, {MAX_LEVEL}]", build.level),
        ));
    }

    let allocation = allocate_attributes(build.level, &build.attributes);
    for message in allocation.issues {
        issues.push(ValidationIssue::error("attributes", message));
    }

    if !validate_references(rules, build, &mut issues) {
        debug!(build = %build.name, issues = issues.len(), "validation stopped at references");
        return issues;
    }

    validate_skills(rules, build, &mut issues);
    validate_powers(rules, build, &mut issues);
    validate_techniques(rules, build, &mut issues);

    if build.innate_technique.as_deref().is_none_or(|t| t.trim().is_empty()) {
        issues.push(ValidationIssue::warning("techniques", "no innate technique named"));
    }

    debug!(build = %build.name, issues = issues.len(), "validated build");
    issues
}

/// Check the ids every later step depends on. Returns false if any is
/// unknown.
fn validate_references(
    rules: &Rules,
    build: &CharacterBuild,
    issues: &mut Vec<ValidationIssue>,
) -> bool {
    let catalog = rules.catalog();
    let before = issues.len();

    if catalog.class(&build.class).is_none() {
        issues.push(ValidationIssue::error(
            "class",
            format!("unknown class \"{}\"", build.class),
        ));
    }
    if catalog.origin(&build.origin).is_none() {
        issues.push(ValidationIssue::error(
            "origin",
            format!("unknown origin \"{}\"", build.origin),
        ));
    }
    if let Some(clan) = &build.clan
        && catalog.clan(clan).is_none()
    {
        issues.push(ValidationIssue::error(
            "clan",
            format!("unknown clan \"{clan}\""),
        ));
    }

    match (&build.track, &build.sub_path) {
        (None, Some(sub_path)) => issues.push(ValidationIssue::error(
            "track",
            format!("sub-path \"{sub_path}\" chosen without a track"),
        )),
        (None, None) => {}
        (Some(track_id), sub_path) => match catalog.track(track_id) {
            None => issues.push(ValidationIssue::error(
                "track",
                format!("unknown track \"{track_id}\""),
            )),
            Some(track) => {
                if track.class != build.class {
                    issues.push(ValidationIssue::error(
                        "track",
                        format!("{} is not open to class \"{}\"", track.name, build.class),
                    ));
                }
                match sub_path {
                    Some(sub_path) if !track.has_sub_path(sub_path) => {
                        issues.push(ValidationIssue::error(
                            "track",
                            format!("{} has no sub-path \"{sub_path}\"", track.name),
                        ));
                    }
                    None if !track.sub_paths.is_empty() => {
                        issues.push(ValidationIssue::warning(
                            "track",
                            format!(
                                "no sub-path chosen (options: {})",
                                track.sub_paths.join(", ")
                            ),
                        ));
                    }
                    _ => {}
                }
            }
        },
    }

    !issues[before..].iter().any(|i| i.is_error)
}

fn validate_skills(rules: &Rules, build: &CharacterBuild, issues: &mut Vec<ValidationIssue>) {
    let skills = match rules.build_skills(build) {
        Ok(skills) => skills,
        Err(e) => {
            issues.push(ValidationIssue::error("skills", e.to_string()));
            return;
        }
    };

    for message in &skills.issues {
        issues.push(ValidationIssue::error("skills", message.clone()));
    }
    for status in skills.choices.iter().filter(|c| !c.is_filled()) {
        issues.push(ValidationIssue::warning(
            "skills",
            format!("{}: {} of {} picked", status.source, status.chosen, status.choose),
        ));
    }
    if !skills.is_within_slots() {
        issues.push(ValidationIssue::error(
            "skills",
            format!(
                "{} free skill(s) over {} slot(s)",
                skills.free_count(),
                skills.free_slots
            ),
        ));
    }
    let unused = skills.remaining_free_slots();
    if unused > 0 {
        issues.push(ValidationIssue::warning(
            "skills",
            format!("{unused} free skill slot(s) unused"),
        ));
    }
    for skill in build.skill_grades.keys() {
        if !skills.grants.contains(skill) {
            issues.push(ValidationIssue::warning(
                "skills",
                format!("grade given for untrained skill '{skill}'"),
            ));
        }
    }
}

fn validate_powers(rules: &Rules, build: &CharacterBuild, issues: &mut Vec<ValidationIssue>) {
    let result = rules
        .build_state(build)
        .and_then(|state| rules.validate_powers(&state, &build.powers));
    match result {
        Ok(messages) => {
            for message in messages {
                issues.push(ValidationIssue::error("powers", message));
            }
        }
        Err(e) => issues.push(ValidationIssue::error("powers", e.to_string())),
    }
}

fn validate_techniques(rules: &Rules, build: &CharacterBuild, issues: &mut Vec<ValidationIssue>) {
    let result = rules.technique_allocation(build).and_then(|allocation| {
        let clan = rules.clan(build.clan.as_deref())?;
        Ok((allocation.validate_manual(clan), allocation.remaining()))
    });
    match result {
        Ok((messages, remaining)) => {
            for message in messages {
                issues.push(ValidationIssue::error("techniques", message));
            }
            if remaining > 0 {
                issues.push(ValidationIssue::warning(
                    "techniques",
                    format!("{remaining} technique point(s) unspent"),
                ));
            }
        }
        Err(e) => issues.push(ValidationIssue::error("techniques", e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_core::{Attributes, TechniqueCategory};

    fn finished() -> CharacterBuild {
        let mut build = CharacterBuild::new("Yuji", "combatente", "lutador");
        build.innate_technique = Some("Punho Divergente".to_string());
        build.attributes = Attributes::new(2, 3, 1, 1, 2);
        build.class_choices = vec![
            vec!["Tática".to_string()],
            vec!["Pontaria".to_string(), "Reflexos".to_string()],
        ];
        build.free_skills = vec!["Furtividade".to_string(), "Percepção".to_string()];
        build.powers = vec!["golpe_pesado".to_string()];
        build.techniques.add(TechniqueCategory::Base, 1);
        build
    }

    fn messages(issues: &[ValidationIssue]) -> Vec<String> {
        issues.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn finished_build_has_no_issues() {
        let rules = Rules::standard().unwrap();
        let issues = validate_build(&rules, &finished());
        assert!(issues.is_empty(), "{:#?}", messages(&issues));
    }

    #[test]
    fn zero_padded_technique_map_is_not_spending() {
        let rules = Rules::standard().unwrap();
        let mut build = finished();
        build.techniques = serde_json::from_str(
            r#"{"base":1,"barrier":0,"reversed":0,"anti_barrier":0,"shikigami":0,"secret":0}"#,
        )
        .unwrap();
        let issues = validate_build(&rules, &build);
        assert!(issues.is_empty(), "{:#?}", messages(&issues));
    }

    #[test]
    fn display_format() {
        let issue = ValidationIssue::error("skills", "boom");
        assert_eq!(issue.to_string(), "error: skills: boom");
        assert_eq!(
            ValidationIssue::warning("powers", "hm").to_string(),
            "warning: powers: hm"
        );
    }

    #[test]
    fn unknown_class_stops_early() {
        let rules = Rules::standard().unwrap();
        let mut build = finished();
        build.class = "monge".to_string();
        let issues = validate_build(&rules, &build);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].section, "class");
    }

    #[test]
    fn overspent_attributes_are_errors() {
        let rules = Rules::standard().unwrap();
        let mut build = finished();
        build.attributes.agility = 4;
        let issues = validate_build(&rules, &build);
        assert!(has_errors(&issues));
        assert!(issues.iter().any(|i| i.section == "attributes"));
    }

    #[test]
    fn track_must_match_class() {
        let rules = Rules::standard().unwrap();
        let mut build = finished();
        build.track = Some("mestre_de_barreiras".to_string());
        build.sub_path = Some("dominio".to_string());
        let issues = validate_build(&rules, &build);
        assert_eq!(issues.len(), 1, "{:#?}", messages(&issues));
        assert!(issues[0].message.contains("not open to class"));
    }

    #[test]
    fn track_skill_without_a_slot_is_an_error() {
        let mut catalog = crate::rules::preset::standard();
        if let Some(class) = catalog.classes.iter_mut().find(|c| c.id == "combatente") {
            class.free_skill_slots = 0;
        }
        let rules = Rules::new(catalog).unwrap();
        let mut build = finished();
        build.attributes = Attributes::new(3, 3, 0, 1, 2);
        build.free_skills.clear();
        build.class_choices[0].clear();
        build.track = Some("comandante".to_string());
        let issues = validate_build(&rules, &build);
        let over: Vec<_> = issues.iter().filter(|i| i.is_error).collect();
        assert_eq!(over.len(), 1, "{:#?}", messages(&issues));
        assert_eq!(over[0].section, "skills");
        assert!(over[0].message.contains("1 free skill(s) over 0 slot(s)"));
    }

    #[test]
    fn unfinished_build_gets_warnings_only() {
        let rules = Rules::standard().unwrap();
        let mut build = finished();
        build.free_skills.pop();
        build.techniques = Default::default();
        build.class_choices[1].pop();
        build.innate_technique = None;
        let issues = validate_build(&rules, &build);
        assert!(!has_errors(&issues), "{:#?}", messages(&issues));
        assert_eq!(issues.len(), 4);
    }

    #[test]
    fn ineligible_power_is_an_error() {
        let rules = Rules::standard().unwrap();
        let mut build = finished();
        build.powers = vec!["ataque_brutal".to_string()];
        let issues = validate_build(&rules, &build);
        let power_issues: Vec<_> = issues.iter().filter(|i| i.section == "powers").collect();
        assert_eq!(power_issues.len(), 1);
        assert!(power_issues[0].message.contains("requires level 3"));
        assert!(power_issues[0].message.contains("requires power golpe_pesado"));
    }

    #[test]
    fn secret_technique_without_privileged_clan() {
        let rules = Rules::standard().unwrap();
        let mut build = finished();
        build.clan = Some("inumaki".to_string());
        build.techniques = [(TechniqueCategory::Secret, 1)].into_iter().collect();
        let issues = validate_build(&rules, &build);
        assert!(
            issues
                .iter()
                .any(|i| i.section == "techniques" && i.message.contains("privileged clan"))
        );
    }

    #[test]
    fn grade_on_untrained_skill_warns() {
        let rules = Rules::standard().unwrap();
        let mut build = finished();
        build
            .skill_grades
            .insert("Medicina".to_string(), ft_core::TrainingGrade::Veteran);
        let issues = validate_build(&rules, &build);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error);
    }
}
