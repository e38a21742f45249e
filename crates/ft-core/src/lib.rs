//! Reference data for Feitiço: attributes, skills, classes, origins, tracks,
//! clans, powers, and technique categories.
//!
//! This crate defines the static tables the rules engine evaluates against
//! and the player selections it evaluates. It does no rule evaluation of its
//! own beyond load-time consistency checks on a [`Catalog`].

/// The five character attributes and their score container.
pub mod attribute;
/// Player selections: the build file and the immutable build context.
pub mod build;
/// The catalog that owns every reference table.
pub mod catalog;
/// Class definitions and resource pool formulas.
pub mod class;
/// Clan definitions.
pub mod clan;
/// Error types used throughout the crate.
pub mod error;
/// Origin definitions.
pub mod origin;
/// Power definitions, prerequisites, and passive effects.
pub mod power;
/// Skill names, training grades, and choice groups.
pub mod skill;
/// Technique categories, grades, and automatic bonus rules.
pub mod technique;
/// Narrative track definitions.
pub mod track;

/// Re-export attribute types.
pub use attribute::{Attribute, Attributes, ResourceAttribute};
/// Re-export build types.
pub use build::{BuildContext, CharacterBuild, Equipment};
/// Re-export the catalog.
pub use catalog::Catalog;
/// Re-export definition types.
pub use class::{ClassDefinition, PoolFormula, ResourceFormulas};
/// Re-export clan definitions.
pub use clan::ClanDefinition;
/// Re-export error types.
pub use error::{CatalogError, CatalogResult};
/// Re-export origin definitions.
pub use origin::OriginDefinition;
/// Re-export power types.
pub use power::{
    AttributeRequirement, EffectKind, EffectValue, PassiveEffect, PowerDefinition, PowerKind,
    Prerequisites, RequirementGroup, RequirementMode, SkillRequirement,
};
/// Re-export skill types.
pub use skill::{SkillChoiceGroup, TrainingGrade, fold_name, same_skill};
/// Re-export technique types.
pub use technique::{TechniqueBonus, TechniqueCategory, TechniqueGrades};
/// Re-export track definitions.
pub use track::TrackDefinition;
