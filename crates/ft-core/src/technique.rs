use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A discipline of the cursed-technique system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechniqueCategory {
    /// Técnica base; every other category builds on it.
    Base,
    /// Barreira.
    Barrier,
    /// Energia reversa.
    Reversed,
    /// Anti-barreira.
    AntiBarrier,
    /// Shikigami.
    Shikigami,
    /// Técnica secreta, reserved to the great clans.
    Secret,
}

impl TechniqueCategory {
    /// Every category, in sheet order.
    pub const ALL: [TechniqueCategory; 6] = [
        TechniqueCategory::Base,
        TechniqueCategory::Barrier,
        TechniqueCategory::Reversed,
        TechniqueCategory::AntiBarrier,
        TechniqueCategory::Shikigami,
        TechniqueCategory::Secret,
    ];

    /// Base grade needed before manual points may go into this category.
    pub fn required_base_grade(self) -> u8 {
        match self {
            Self::Base => 0,
            Self::Reversed => 2,
            Self::Barrier | Self::AntiBarrier | Self::Shikigami | Self::Secret => 1,
        }
    }

    /// Returns true if only privileged clans may invest in this category.
    pub fn requires_privileged_clan(self) -> bool {
        matches!(self, Self::Secret)
    }

    /// The identifier used in data files.
    pub fn key(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Barrier => "barrier",
            Self::Reversed => "reversed",
            Self::AntiBarrier => "anti_barrier",
            Self::Shikigami => "shikigami",
            Self::Secret => "secret",
        }
    }

    /// Parse from the data-file identifier (hyphens accepted).
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|c| c.key() == normalized)
    }
}

impl fmt::Display for TechniqueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// An automatic grade granted by a track or clan once conditions hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueBonus {
    /// The category that receives the grade.
    pub category: TechniqueCategory,
    /// Grades granted (usually 1).
    #[serde(default = "default_bonus_grade")]
    pub grade: u8,
    /// Character level at which the bonus switches on.
    #[serde(default = "default_min_level")]
    pub min_level: u8,
    /// Sub-path the character must have picked, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_path: Option<String>,
}

fn default_bonus_grade() -> u8 {
    1
}

fn default_min_level() -> u8 {
    1
}

impl TechniqueBonus {
    /// A one-grade bonus available from `min_level`.
    pub fn at_level(category: TechniqueCategory, min_level: u8) -> Self {
        Self {
            category,
            grade: 1,
            min_level,
            sub_path: None,
        }
    }

    /// Restrict the bonus to one sub-path.
    pub fn for_sub_path(mut self, sub_path: impl Into<String>) -> Self {
        self.sub_path = Some(sub_path.into());
        self
    }

    /// Returns true if the bonus applies at `level` with the given sub-path.
    pub fn applies(&self, level: u8, sub_path: Option<&str>) -> bool {
        if level < self.min_level {
            return false;
        }
        match &self.sub_path {
            Some(required) => sub_path.is_some_and(|chosen| chosen == required),
            None => true,
        }
    }
}

/// Grade per technique category; missing categories read as zero.
///
/// Zero grades are never stored, so a map padded with zeros compares equal
/// to the same map without them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<TechniqueCategory, u8>",
    into = "BTreeMap<TechniqueCategory, u8>"
)]
pub struct TechniqueGrades(BTreeMap<TechniqueCategory, u8>);

impl From<BTreeMap<TechniqueCategory, u8>> for TechniqueGrades {
    fn from(map: BTreeMap<TechniqueCategory, u8>) -> Self {
        map.into_iter().collect()
    }
}

impl From<TechniqueGrades> for BTreeMap<TechniqueCategory, u8> {
    fn from(grades: TechniqueGrades) -> Self {
        grades.0
    }
}

impl TechniqueGrades {
    /// All categories at grade zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grade in one category.
    pub fn get(&self, category: TechniqueCategory) -> u8 {
        self.0.get(&category).copied().unwrap_or(0)
    }

    /// Overwrite the grade in one category.
    pub fn set(&mut self, category: TechniqueCategory, grade: u8) {
        if grade == 0 {
            self.0.remove(&category);
        } else {
            self.0.insert(category, grade);
        }
    }

    /// Add grades to one category.
    pub fn add(&mut self, category: TechniqueCategory, grade: u8) {
        let current = self.get(category);
        self.set(category, current.saturating_add(grade));
    }

    /// Remove one grade from a category; returns false if it was already zero.
    pub fn take_one(&mut self, category: TechniqueCategory) -> bool {
        let current = self.get(category);
        if current == 0 {
            return false;
        }
        self.set(category, current - 1);
        true
    }

    /// Sum of grades across every category.
    pub fn total(&self) -> u32 {
        self.0.values().map(|&g| u32::from(g)).sum()
    }

    /// Per-category sum of two grade maps.
    pub fn combined(&self, other: &TechniqueGrades) -> TechniqueGrades {
        let mut out = self.clone();
        for (category, grade) in other.iter() {
            out.add(category, grade);
        }
        out
    }

    /// Iterate categories with a non-zero grade.
    pub fn iter(&self) -> impl Iterator<Item = (TechniqueCategory, u8)> + '_ {
        self.0
            .iter()
            .filter(|&(_, &g)| g > 0)
            .map(|(&c, &g)| (c, g))
    }

    /// Returns true if every category is at zero.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl FromIterator<(TechniqueCategory, u8)> for TechniqueGrades {
    fn from_iter<I: IntoIterator<Item = (TechniqueCategory, u8)>>(iter: I) -> Self {
        let mut grades = Self::new();
        for (category, grade) in iter {
            grades.add(category, grade);
        }
        grades
    }
}
