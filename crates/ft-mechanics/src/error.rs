//! Error types for the rules engine.
//!
//! Rule violations are not errors: they come back as structured outcomes
//! with reasons. These variants cover ids the catalog does not know.

use ft_core::CatalogError;

/// Errors that can occur while evaluating a build.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// The class id is not in the catalog.
    #[error("unknown class: {0}")]
    UnknownClass(String),

    /// The origin id is not in the catalog.
    #[error("unknown origin: {0}")]
    UnknownOrigin(String),

    /// The track id is not in the catalog.
    #[error("unknown track: {0}")]
    UnknownTrack(String),

    /// The clan id is not in the catalog.
    #[error("unknown clan: {0}")]
    UnknownClan(String),

    /// The power id is not in the catalog.
    #[error("unknown power: {0}")]
    UnknownPower(String),

    /// The reference data failed to load or validate.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Alias for `Result<T, MechError>`.
pub type MechResult<T> = Result<T, MechError>;
