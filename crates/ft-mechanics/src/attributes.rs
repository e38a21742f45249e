//! Attribute budget allocation.
//!
//! Every character spreads a level-derived budget of points across the five
//! attributes, each held in `[0, 7]`. The budget starts at `5 + 4` and gains
//! a point at each of a fixed set of level thresholds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ft_core::attribute::{ATTRIBUTE_MAX, ATTRIBUTE_MIN};
use ft_core::build::{MAX_LEVEL, MIN_LEVEL};
use ft_core::{Attribute, Attributes};

/// Points every character has before any level bonus.
const BUDGET_BASE: u8 = 5;
/// Points added at character creation on top of the base.
const CREATION_POINTS: u8 = 4;
/// Levels at which the budget grows by one.
const ATTRIBUTE_STEP_LEVELS: [u8; 5] = [4, 7, 10, 13, 16];

/// Level-derived part of the budget: creation points plus one per threshold.
pub fn attribute_steps(level: u8) -> u8 {
    let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
    let reached = ATTRIBUTE_STEP_LEVELS.iter().filter(|&&t| level >= t).count() as u8;
    CREATION_POINTS + reached
}

/// Total attribute points a character of `level` must distribute.
pub fn attribute_budget(level: u8) -> u8 {
    BUDGET_BASE + attribute_steps(level)
}

/// The verdict on a proposed attribute spread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// True when the sum matches the budget and every score is in range.
    pub valid: bool,
    /// Budget for the level.
    pub budget: u8,
    /// Budget minus points spent; negative when overspent.
    pub remaining_points: i32,
    /// Human-readable problems, empty when valid.
    pub issues: Vec<String>,
}

/// Check a proposed attribute spread against the budget for `level`.
pub fn allocate_attributes(level: u8, attributes: &Attributes) -> Allocation {
    let budget = attribute_budget(level);
    let spent = attributes.total() as i32;
    let remaining_points = i32::from(budget) - spent;
    let mut issues = Vec::new();

    for (attr, score) in attributes.iter() {
        if !(ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&score) {
            issues.push(format!(
                "{attr} is {score}, outside [{ATTRIBUTE_MIN}, {ATTRIBUTE_MAX}]"
            ));
        }
    }

    match remaining_points {
        0 => {}
        n if n > 0 => issues.push(format!("{n} attribute point(s) left to spend of {budget}")),
        n => issues.push(format!("{} attribute point(s) over the budget of {budget}", -n)),
    }

    Allocation {
        valid: issues.is_empty(),
        budget,
        remaining_points,
        issues,
    }
}

/// Step-by-step attribute editing that never leaves the legal range.
///
/// Increments and decrements that would break a limit are refused and leave
/// the scores untouched; callers observe the refusal through the unchanged
/// [`remaining`](Self::remaining) count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeAllocator {
    level: u8,
    attributes: Attributes,
}

impl AttributeAllocator {
    /// Start editing from an existing spread.
    pub fn new(level: u8, attributes: Attributes) -> Self {
        Self { level, attributes }
    }

    /// Start from every attribute at zero.
    pub fn blank(level: u8) -> Self {
        Self::new(level, Attributes::default())
    }

    /// Current scores.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Consume the allocator and return the scores.
    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }

    /// Budget for the allocator's level.
    pub fn budget(&self) -> u8 {
        attribute_budget(self.level)
    }

    /// Points still unspent; negative if the starting spread was overspent.
    pub fn remaining(&self) -> i32 {
        i32::from(self.budget()) - self.attributes.total() as i32
    }

    /// Raise one attribute by a point. Returns false if refused.
    pub fn increment(&mut self, attribute: Attribute) -> bool {
        let score = self.attributes.get(attribute);
        if score >= ATTRIBUTE_MAX {
            debug!(%attribute, score, "increment refused: attribute at maximum");
            return false;
        }
        if self.remaining() <= 0 {
            debug!(%attribute, budget = self.budget(), "increment refused: budget spent");
            return false;
        }
        self.attributes.set(attribute, score + 1);
        true
    }

    /// Lower one attribute by a point. Returns false if refused.
    pub fn decrement(&mut self, attribute: Attribute) -> bool {
        let score = self.attributes.get(attribute);
        if score == ATTRIBUTE_MIN {
            debug!(%attribute, "decrement refused: attribute at minimum");
            return false;
        }
        self.attributes.set(attribute, score - 1);
        true
    }

    /// The verdict on the current spread.
    pub fn allocation(&self) -> Allocation {
        allocate_attributes(self.level, &self.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_steps_at_thresholds() {
        assert_eq!(attribute_budget(1), 9);
        assert_eq!(attribute_budget(3), 9);
        assert_eq!(attribute_budget(4), 10);
        assert_eq!(attribute_budget(7), 11);
        assert_eq!(attribute_budget(15), 13);
        assert_eq!(attribute_budget(16), 14);
        assert_eq!(attribute_budget(20), 14);
    }

    #[test]
    fn exact_budget_is_valid() {
        let alloc = allocate_attributes(1, &Attributes::new(2, 1, 2, 2, 2));
        assert!(alloc.valid, "{:?}", alloc.issues);
        assert_eq!(alloc.remaining_points, 0);
    }

    #[test]
    fn underspent_reports_remaining() {
        let alloc = allocate_attributes(1, &Attributes::uniform(1));
        assert!(!alloc.valid);
        assert_eq!(alloc.remaining_points, 4);
        assert!(alloc.issues[0].contains("4 attribute point(s) left"));
    }

    #[test]
    fn overspent_and_out_of_range() {
        let alloc = allocate_attributes(1, &Attributes::new(8, 1, 0, 0, 0));
        assert!(!alloc.valid);
        assert_eq!(alloc.issues.len(), 1);
        assert!(alloc.issues[0].contains("AGI is 8"));

        let alloc = allocate_attributes(1, &Attributes::new(7, 3, 0, 0, 0));
        assert_eq!(alloc.remaining_points, -1);
        assert!(alloc.issues[0].contains("over the budget"));
    }

    #[test]
    fn increment_refuses_past_budget() {
        let mut alloc = AttributeAllocator::new(1, Attributes::new(2, 2, 2, 2, 1));
        assert_eq!(alloc.remaining(), 0);
        assert!(!alloc.increment(Attribute::Vigor));
        assert_eq!(alloc.attributes().vigor, 1);
        assert_eq!(alloc.remaining(), 0);
    }

    #[test]
    fn increment_refuses_past_seven() {
        let mut alloc = AttributeAllocator::new(20, Attributes::new(7, 0, 0, 0, 0));
        assert!(alloc.remaining() > 0);
        assert!(!alloc.increment(Attribute::Agility));
        assert!(alloc.increment(Attribute::Strength));
    }

    #[test]
    fn decrement_refuses_below_zero() {
        let mut alloc = AttributeAllocator::blank(1);
        assert!(!alloc.decrement(Attribute::Presence));
        assert_eq!(alloc.remaining(), 9);
        assert!(alloc.increment(Attribute::Presence));
        assert!(alloc.decrement(Attribute::Presence));
        assert_eq!(alloc.remaining(), 9);
    }

    #[test]
    fn filling_the_budget_makes_it_valid() {
        let mut alloc = AttributeAllocator::blank(4);
        for attr in Attribute::ALL {
            assert!(alloc.increment(attr));
            assert!(alloc.increment(attr));
        }
        assert_eq!(alloc.remaining(), 0);
        assert!(alloc.allocation().valid);
        assert_eq!(alloc.into_attributes(), Attributes::uniform(2));
    }
}
