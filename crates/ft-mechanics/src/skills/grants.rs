//! Skill grants as a multiset of `(skill, source)` pairs.
//!
//! Each skill keeps the list of distinct sources that granted it. Duplicate
//! bonuses fall out of the counts: every side (class, origin, school) that
//! grants the skill beyond the first adds +2, however many there are.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use ft_core::fold_name;

/// Bonus for each duplicate grant beyond the first.
pub const DUPLICATE_BONUS: i32 = 2;

/// Skill name to duplicate-grant bonus.
pub type BonusMap = BTreeMap<String, i32>;

/// Where a skill grant came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "source", content = "group")]
pub enum GrantSource {
    /// Always granted by the class.
    ClassFixed,
    /// Picked from the class choice group at this index.
    ClassChoice(usize),
    /// Always granted by the origin.
    OriginFixed,
    /// Picked from the origin choice group.
    OriginChoice,
    /// Granted by studying at the jujutsu school.
    School,
    /// Required by the character's track.
    Track,
    /// Spent from the free skill slots.
    Free,
}

impl GrantSource {
    /// Returns true if the player may drop this grant.
    pub fn is_removable(self) -> bool {
        matches!(self, Self::Free)
    }

    /// The side of the build a bonus-eligible grant comes from.
    ///
    /// Grants from the same side never stack with each other; track grants
    /// and free picks have no side.
    pub fn side(self) -> Option<&'static str> {
        match self {
            Self::ClassFixed | Self::ClassChoice(_) => Some("class"),
            Self::OriginFixed | Self::OriginChoice => Some("origin"),
            Self::School => Some("school"),
            Self::Track | Self::Free => None,
        }
    }

    /// Returns true if a duplicate from this source earns a bonus.
    pub fn awards_bonus(self) -> bool {
        self.side().is_some()
    }
}

impl fmt::Display for GrantSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClassFixed => write!(f, "class"),
            Self::ClassChoice(i) => write!(f, "class choice {}", i + 1),
            Self::OriginFixed => write!(f, "origin"),
            Self::OriginChoice => write!(f, "origin choice"),
            Self::School => write!(f, "school"),
            Self::Track => write!(f, "track"),
            Self::Free => write!(f, "free"),
        }
    }
}

/// One trained skill and every source that granted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Skill name as first granted.
    pub name: String,
    /// Distinct sources, in grant order.
    pub sources: Vec<GrantSource>,
}

impl SkillEntry {
    /// Returns true if any source makes the skill non-removable.
    pub fn is_locked(&self) -> bool {
        self.sources.iter().any(|s| !s.is_removable())
    }

    /// Returns true if the skill takes up a free slot: nothing but free
    /// picks or a track requirement grants it.
    pub fn uses_free_slot(&self) -> bool {
        !self.sources.iter().any(|s| s.awards_bonus())
    }

    /// Duplicate bonus earned by this skill.
    pub fn bonus(&self) -> i32 {
        let mut sides: Vec<&str> = self.sources.iter().filter_map(|s| s.side()).collect();
        sides.sort_unstable();
        sides.dedup();
        (sides.len() as i32 - 1).max(0) * DUPLICATE_BONUS
    }
}

/// The multiset of skill grants, keyed by folded skill name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGrants {
    entries: BTreeMap<String, SkillEntry>,
}

impl SkillGrants {
    /// No skills granted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a grant. Returns false if the same source already granted it.
    pub fn grant(&mut self, skill: &str, source: GrantSource) -> bool {
        let entry = self
            .entries
            .entry(fold_name(skill))
            .or_insert_with(|| SkillEntry {
                name: skill.trim().to_string(),
                sources: Vec::new(),
            });
        if entry.sources.contains(&source) {
            return false;
        }
        entry.sources.push(source);
        true
    }

    /// Drop one source from a skill, removing the skill when none remain.
    pub fn revoke(&mut self, skill: &str, source: GrantSource) -> bool {
        let key = fold_name(skill);
        let Some(entry) = self.entries.get_mut(&key) else {
            return false;
        };
        let before = entry.sources.len();
        entry.sources.retain(|s| *s != source);
        let removed = entry.sources.len() != before;
        if entry.sources.is_empty() {
            self.entries.remove(&key);
        }
        removed
    }

    /// The entry for a skill, if trained.
    pub fn get(&self, skill: &str) -> Option<&SkillEntry> {
        self.entries.get(&fold_name(skill))
    }

    /// Returns true if the skill is trained from any source.
    pub fn contains(&self, skill: &str) -> bool {
        self.get(skill).is_some()
    }

    /// Returns true if the skill was granted by `source`.
    pub fn has_source(&self, skill: &str, source: GrantSource) -> bool {
        self.get(skill).is_some_and(|e| e.sources.contains(&source))
    }

    /// Returns true if the skill is trained and cannot be dropped.
    pub fn is_locked(&self, skill: &str) -> bool {
        self.get(skill).is_some_and(SkillEntry::is_locked)
    }

    /// Duplicate bonus on one skill.
    pub fn bonus(&self, skill: &str) -> i32 {
        self.get(skill).map_or(0, SkillEntry::bonus)
    }

    /// Every skill with a non-zero duplicate bonus.
    pub fn bonuses(&self) -> BonusMap {
        self.entries
            .values()
            .filter(|e| e.bonus() > 0)
            .map(|e| (e.name.clone(), e.bonus()))
            .collect()
    }

    /// Every trained skill, sorted by folded name.
    pub fn entries(&self) -> impl Iterator<Item = &SkillEntry> {
        self.entries.values()
    }

    /// Names of every trained skill.
    pub fn trained(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.name.as_str())
    }

    /// Names of skills that cannot be dropped.
    pub fn locked(&self) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .filter(|e| e.is_locked())
            .map(|e| e.name.as_str())
    }

    /// Names of skills that occupy a free slot, removable or not.
    pub fn slotted(&self) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .filter(|e| e.uses_free_slot())
            .map(|e| e.name.as_str())
    }

    /// Names of skills held only through free picks.
    pub fn free(&self) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .filter(|e| !e.is_locked())
            .map(|e| e.name.as_str())
    }

    /// Number of trained skills.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no skill is trained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
