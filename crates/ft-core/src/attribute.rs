use std::fmt;

use serde::{Deserialize, Serialize};

use crate::skill::fold_name;

/// Lowest score an attribute may hold.
pub const ATTRIBUTE_MIN: u8 = 0;
/// Highest score an attribute may hold.
pub const ATTRIBUTE_MAX: u8 = 7;

/// One of the five character attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    /// Agilidade: reflexes, defense, and movement.
    #[serde(rename = "agilidade")]
    Agility,
    /// Força: raw physical power.
    #[serde(rename = "forca")]
    Strength,
    /// Intelecto: reasoning; adds free skill slots.
    #[serde(rename = "intelecto")]
    Intellect,
    /// Presença: willpower and charisma.
    #[serde(rename = "presenca")]
    Presence,
    /// Vigor: endurance; feeds health.
    #[serde(rename = "vigor")]
    Vigor,
}

impl Attribute {
    /// Every attribute, in sheet order.
    pub const ALL: [Attribute; 5] = [
        Attribute::Agility,
        Attribute::Strength,
        Attribute::Intellect,
        Attribute::Presence,
        Attribute::Vigor,
    ];

    /// The identifier used in data files.
    pub fn key(self) -> &'static str {
        match self {
            Self::Agility => "agilidade",
            Self::Strength => "forca",
            Self::Intellect => "intelecto",
            Self::Presence => "presenca",
            Self::Vigor => "vigor",
        }
    }

    /// Three-letter abbreviation printed on character sheets.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Agility => "AGI",
            Self::Strength => "FOR",
            Self::Intellect => "INT",
            Self::Presence => "PRE",
            Self::Vigor => "VIG",
        }
    }

    /// Parse an attribute from its key, abbreviation, or English name.
    ///
    /// Matching ignores case and accents, so `"Força"` and `"FOR"` both work.
    pub fn parse(s: &str) -> Option<Self> {
        let folded = fold_name(s);
        Self::ALL.into_iter().find(|attr| {
            folded == attr.key()
                || folded == attr.abbreviation().to_lowercase()
                || folded == format!("{attr:?}").to_lowercase()
        })
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// The attribute a character channels cursed energy through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResourceAttribute {
    /// Energy scales with Intelecto.
    #[default]
    #[serde(rename = "intelecto")]
    Intellect,
    /// Energy scales with Presença.
    #[serde(rename = "presenca")]
    Presence,
}

impl ResourceAttribute {
    /// The attribute this choice reads from.
    pub fn attribute(self) -> Attribute {
        match self {
            Self::Intellect => Attribute::Intellect,
            Self::Presence => Attribute::Presence,
        }
    }

    /// Parse from an attribute name; only Intelecto and Presença qualify.
    pub fn parse(s: &str) -> Option<Self> {
        match Attribute::parse(s)? {
            Attribute::Intellect => Some(Self::Intellect),
            Attribute::Presence => Some(Self::Presence),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.attribute().key())
    }
}

/// Scores for all five attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attributes {
    /// Agilidade score.
    #[serde(default, rename = "agilidade")]
    pub agility: u8,
    /// Força score.
    #[serde(default, rename = "forca")]
    pub strength: u8,
    /// Intelecto score.
    #[serde(default, rename = "intelecto")]
    pub intellect: u8,
    /// Presença score.
    #[serde(default, rename = "presenca")]
    pub presence: u8,
    /// Vigor score.
    #[serde(default)]
    pub vigor: u8,
}

impl Attributes {
    /// Create a score set in sheet order: AGI, FOR, INT, PRE, VIG.
    pub fn new(agility: u8, strength: u8, intellect: u8, presence: u8, vigor: u8) -> Self {
        Self {
            agility,
            strength,
            intellect,
            presence,
            vigor,
        }
    }

    /// Every attribute set to the same score.
    pub fn uniform(score: u8) -> Self {
        Self::new(score, score, score, score, score)
    }

    /// Read one attribute.
    pub fn get(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Agility => self.agility,
            Attribute::Strength => self.strength,
            Attribute::Intellect => self.intellect,
            Attribute::Presence => self.presence,
            Attribute::Vigor => self.vigor,
        }
    }

    /// Mutable access to one attribute.
    pub fn get_mut(&mut self, attribute: Attribute) -> &mut u8 {
        match attribute {
            Attribute::Agility => &mut self.agility,
            Attribute::Strength => &mut self.strength,
            Attribute::Intellect => &mut self.intellect,
            Attribute::Presence => &mut self.presence,
            Attribute::Vigor => &mut self.vigor,
        }
    }

    /// Overwrite one attribute.
    pub fn set(&mut self, attribute: Attribute, score: u8) {
        *self.get_mut(attribute) = score;
    }

    /// Sum of all five scores.
    pub fn total(&self) -> u32 {
        Attribute::ALL
            .iter()
            .map(|&attr| u32::from(self.get(attr)))
            .sum()
    }

    /// Iterate `(attribute, score)` pairs in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, u8)> + '_ {
        Attribute::ALL.into_iter().map(|attr| (attr, self.get(attr)))
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(attr, score)| format!("{attr} {score}"))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_keys_abbreviations_and_accents() {
        assert_eq!(Attribute::parse("agilidade"), Some(Attribute::Agility));
        assert_eq!(Attribute::parse("Força"), Some(Attribute::Strength));
        assert_eq!(Attribute::parse("PRE"), Some(Attribute::Presence));
        assert_eq!(Attribute::parse("vigor"), Some(Attribute::Vigor));
        assert_eq!(Attribute::parse("intellect"), Some(Attribute::Intellect));
        assert_eq!(Attribute::parse("luck"), None);
    }

    #[test]
    fn resource_attribute_only_intellect_or_presence() {
        assert_eq!(
            ResourceAttribute::parse("intelecto"),
            Some(ResourceAttribute::Intellect)
        );
        assert_eq!(
            ResourceAttribute::parse("Presença"),
            Some(ResourceAttribute::Presence)
        );
        assert_eq!(ResourceAttribute::parse("vigor"), None);
    }

    #[test]
    fn get_set_and_total() {
        let mut attrs = Attributes::new(1, 2, 3, 1, 2);
        assert_eq!(attrs.total(), 9);
        attrs.set(Attribute::Vigor, 4);
        assert_eq!(attrs.get(Attribute::Vigor), 4);
        *attrs.get_mut(Attribute::Agility) += 1;
        assert_eq!(attrs.agility, 2);
        assert_eq!(attrs.total(), 12);
    }

    #[test]
    fn deserializes_portuguese_keys_with_defaults() {
        let attrs: Attributes = serde_json::from_str(r#"{"vigor": 1, "forca": 2}"#).unwrap();
        assert_eq!(attrs, Attributes::new(0, 2, 0, 0, 1));
    }

    #[test]
    fn display() {
        let attrs = Attributes::new(1, 0, 2, 1, 3);
        assert_eq!(attrs.to_string(), "AGI 1, FOR 0, INT 2, PRE 1, VIG 3");
    }
}
