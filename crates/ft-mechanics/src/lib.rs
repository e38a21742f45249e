//! Character-build rules engine for Feitiço.
//!
//! Validates attribute budgets, consolidates skill grants and duplicate
//! bonuses, evaluates power prerequisites with cascading removal, enforces
//! technique grade prerequisites, and derives resource pools and combat
//! stats. Every operation is a pure computation over reference data from
//! [`ft_core::Catalog`] and the player's current selections; rejected
//! operations leave the selections unchanged and explain why.

pub mod attributes;
pub mod error;
pub mod powers;
pub mod rules;
pub mod sheet;
pub mod skills;
pub mod stats;
pub mod techniques;
pub mod validate;

pub use attributes::{Allocation, AttributeAllocator, allocate_attributes, attribute_budget};
pub use error::{MechError, MechResult};
pub use powers::{BuildState, Eligibility, PowerGraph, PowerToggle, StatModifiers};
pub use rules::Rules;
pub use sheet::CharacterSheet;
pub use skills::{GrantSource, SkillChoices, SkillConsolidation, SkillProfile, SkillToggle};
pub use stats::{CalculatedStats, ResourcePool};
pub use techniques::{GradeCheck, TechniqueAllocation, TechniqueStep};
pub use validate::{ValidationIssue, validate_build};
