use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold a skill (or any catalog) name into its comparison key.
///
/// Decomposes to NFD, drops combining marks, lowercases, and trims, so
/// `"Tática"`, `"tatica"` and `" TÁTICA "` share one key.
pub fn fold_name(name: &str) -> String {
    name.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns true if two names refer to the same skill.
pub fn same_skill(a: &str, b: &str) -> bool {
    fold_name(a) == fold_name(b)
}

/// Ordinal training tier of a skill.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TrainingGrade {
    /// Treinado.
    #[default]
    Trained,
    /// Graduado.
    Graduated,
    /// Veterano.
    Veteran,
    /// Especialista.
    Expert,
}

impl TrainingGrade {
    /// Flat check bonus granted by this grade.
    pub fn bonus(self) -> i32 {
        match self {
            Self::Trained => 5,
            Self::Graduated => 10,
            Self::Veteran => 15,
            Self::Expert => 20,
        }
    }

    /// Portuguese label used on sheets.
    pub fn label(self) -> &'static str {
        match self {
            Self::Trained => "treinado",
            Self::Graduated => "graduado",
            Self::Veteran => "veterano",
            Self::Expert => "especialista",
        }
    }

    /// Parse from either the English identifier or the Portuguese label.
    pub fn parse(s: &str) -> Option<Self> {
        match fold_name(s).as_str() {
            "trained" | "treinado" => Some(Self::Trained),
            "graduated" | "graduado" => Some(Self::Graduated),
            "veteran" | "veterano" => Some(Self::Veteran),
            "expert" | "especialista" => Some(Self::Expert),
            _ => None,
        }
    }
}

impl fmt::Display for TrainingGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A "choose N of M" skill group offered by a class or origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillChoiceGroup {
    /// How many skills must be picked.
    pub choose: usize,
    /// The skills on offer.
    pub options: Vec<String>,
}

impl SkillChoiceGroup {
    /// Create a group asking for `choose` of the given options.
    pub fn new<I, S>(choose: usize, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choose,
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// The option matching `skill`, spelled as the catalog spells it.
    pub fn canonical(&self, skill: &str) -> Option<&str> {
        let key = fold_name(skill);
        self.options
            .iter()
            .find(|o| fold_name(o) == key)
            .map(String::as_str)
    }

    /// Returns true if `skill` is one of the options.
    pub fn offers(&self, skill: &str) -> bool {
        self.canonical(skill).is_some()
    }
}
