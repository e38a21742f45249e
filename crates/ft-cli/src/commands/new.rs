use std::fs;
use std::path::{Path, PathBuf};

use ft_core::{
    Attribute, CharacterBuild, ResourceAttribute, TechniqueCategory, TrainingGrade, fold_name,
};

/// Optional starting values for a template build.
#[derive(Debug, Default)]
pub struct Seed {
    pub attributes: Vec<(Attribute, u8)>,
    pub resource: Option<ResourceAttribute>,
    pub grades: Vec<(String, TrainingGrade)>,
    pub techniques: Vec<(TechniqueCategory, u8)>,
}

pub fn run(
    catalog: Option<&Path>,
    name: &str,
    class: &str,
    origin: &str,
    output: Option<&Path>,
    seed: Seed,
) -> Result<(), String> {
    let rules = super::load_rules(catalog)?;
    let class_def = rules.class(class).map_err(|e| e.to_string())?;
    if rules.catalog().origin(origin).is_none() {
        return Err(format!("unknown origin: \"{origin}\""));
    }

    let target = output.map_or_else(|| default_path(name), Path::to_path_buf);
    if target.exists() {
        return Err(format!("'{}' already exists", target.display()));
    }

    let mut build = CharacterBuild::new(name, class, origin);
    build.class_choices = class_def.skill_choices.iter().map(|_| Vec::new()).collect();
    apply_seed(&mut build, seed);

    let mut content = build.to_json_pretty().map_err(|e| e.to_string())?;
    content.push('\n');
    fs::write(&target, content).map_err(|e| format!("cannot write {}: {e}", target.display()))?;

    println!("Created build '{}' in {}", name, target.display());
    println!();
    println!("Next steps:");
    println!("  # Spend attribute points and pick skills in the file");
    println!("  ft check {}   # Report what is missing", target.display());
    println!("  ft powers {}  # See which powers are open", target.display());

    Ok(())
}

fn apply_seed(build: &mut CharacterBuild, seed: Seed) {
    for (attribute, score) in seed.attributes {
        build.attributes.set(attribute, score);
    }
    if let Some(resource) = seed.resource {
        build.resource_attribute = resource;
    }
    build.skill_grades.extend(seed.grades);
    for (category, grade) in seed.techniques {
        build.techniques.set(category, grade);
    }
}

fn split_pair(s: &str) -> Result<(&str, &str), String> {
    s.split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .ok_or_else(|| format!("expected KEY=VALUE, got \"{s}\""))
}

fn parse_number(value: &str) -> Result<u8, String> {
    value.parse().map_err(|_| format!("\"{value}\" is not a number"))
}

/// `for=3`, `Presença=2`.
pub fn parse_score(s: &str) -> Result<(Attribute, u8), String> {
    let (key, value) = split_pair(s)?;
    let attribute = Attribute::parse(key).ok_or_else(|| format!("unknown attribute \"{key}\""))?;
    Ok((attribute, parse_number(value)?))
}

pub fn parse_resource(s: &str) -> Result<ResourceAttribute, String> {
    ResourceAttribute::parse(s)
        .ok_or_else(|| format!("\"{s}\" cannot feed cursed energy (use intelecto or presenca)"))
}

/// `Luta=graduado`.
pub fn parse_grade(s: &str) -> Result<(String, TrainingGrade), String> {
    let (skill, value) = split_pair(s)?;
    let grade = TrainingGrade::parse(value).ok_or_else(|| format!("unknown grade \"{value}\""))?;
    Ok((skill.to_string(), grade))
}

/// `anti-barrier=1`.
pub fn parse_technique(s: &str) -> Result<(TechniqueCategory, u8), String> {
    let (key, value) = split_pair(s)?;
    let category =
        TechniqueCategory::parse(key).ok_or_else(|| format!("unknown technique \"{key}\""))?;
    Ok((category, parse_number(value)?))
}

/// `<folded-name>.json`, with spaces turned into underscores.
fn default_path(name: &str) -> PathBuf {
    let stem: String = fold_name(name)
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    PathBuf::from(format!("{stem}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_folds_accents_and_spaces() {
        assert_eq!(default_path("Yuji Itadori"), PathBuf::from("yuji_itadori.json"));
        assert_eq!(default_path("Nobara Kugisaki"), PathBuf::from("nobara_kugisaki.json"));
        assert_eq!(default_path("Gojō"), PathBuf::from("gojo.json"));
    }

    #[test]
    fn seed_values_parse_loosely() {
        assert_eq!(parse_score("Força = 3"), Ok((Attribute::Strength, 3)));
        assert_eq!(parse_score("PRE=2"), Ok((Attribute::Presence, 2)));
        assert!(parse_score("sorte=2").unwrap_err().contains("unknown attribute"));
        assert!(parse_score("for").unwrap_err().contains("KEY=VALUE"));
        assert!(parse_score("for=x").unwrap_err().contains("not a number"));

        assert_eq!(parse_resource("Presença"), Ok(ResourceAttribute::Presence));
        assert!(parse_resource("vigor").is_err());

        assert_eq!(
            parse_grade("Luta=Veterano"),
            Ok(("Luta".to_string(), TrainingGrade::Veteran))
        );
        assert!(parse_grade("Luta=mestre").is_err());

        assert_eq!(parse_technique("anti-barrier=1"), Ok((TechniqueCategory::AntiBarrier, 1)));
        assert!(parse_technique("domain=1").is_err());
    }

    #[test]
    fn seed_fills_the_template() {
        let mut build = CharacterBuild::new("Maki", "combatente", "militar");
        let seed = Seed {
            attributes: vec![(Attribute::Strength, 3), (Attribute::Agility, 3)],
            resource: Some(ResourceAttribute::Presence),
            grades: vec![("Luta".to_string(), TrainingGrade::Graduated)],
            techniques: vec![(TechniqueCategory::Barrier, 0), (TechniqueCategory::Base, 1)],
        };
        apply_seed(&mut build, seed);
        assert_eq!(build.attributes.get(Attribute::Strength), 3);
        assert_eq!(build.attributes.get(Attribute::Vigor), 1);
        assert_eq!(build.resource_attribute, ResourceAttribute::Presence);
        assert_eq!(build.skill_grades["Luta"], TrainingGrade::Graduated);
        assert_eq!(build.techniques.get(TechniqueCategory::Base), 1);
        assert!(build.techniques.iter().all(|(c, _)| c == TechniqueCategory::Base));
    }
}
