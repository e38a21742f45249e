use std::path::PathBuf;

/// Alias for `Result<T, CatalogError>`.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while loading or checking reference data and build files.
///
/// Reference tables are static and trusted, so anything reported here is a
/// configuration problem that should stop the program at load time.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A file could not be read or written.
    #[error("cannot access {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON document did not match the expected shape.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two definitions of the same kind share an id.
    #[error("duplicate {kind} id: \"{id}\"")]
    DuplicateId {
        /// The definition kind (class, origin, power, ...).
        kind: &'static str,
        /// The repeated id.
        id: String,
    },

    /// A definition refers to an id that does not exist.
    #[error("{owner} references unknown {kind} \"{id}\"")]
    UnknownReference {
        /// The definition holding the reference.
        owner: String,
        /// The kind of the missing definition.
        kind: &'static str,
        /// The missing id.
        id: String,
    },

    /// Power prerequisites form a cycle.
    #[error("power prerequisites form a cycle: {}", .0.join(" -> "))]
    DependencyCycle(
        /// Power ids along the cycle, first id repeated at the end.
        Vec<String>,
    ),

    /// A skill choice group cannot be satisfied.
    #[error("{owner}: choice group asks for {choose} of {options} options")]
    InvalidChoiceGroup {
        /// The class or origin that owns the group.
        owner: String,
        /// How many skills the group asks for.
        choose: usize,
        /// How many options the group offers.
        options: usize,
    },
}
