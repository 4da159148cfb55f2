use thiserror::Error;

/// Top-level error type for surface model operations.
#[derive(Debug, Error)]
pub enum SurfModelError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised by the mesh engine.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("cell links must be built before cells can be deleted")]
    LinksNotBuilt,

    #[error("cell {cell} is out of range (mesh has {count} cells)")]
    CellOutOfRange { cell: usize, count: usize },

    #[error("cell array {name} has {actual} values, expected {expected}")]
    ArrayLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid cell: {0}")]
    InvalidCell(String),
}

/// Errors raised when a model element rejects an edit.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model has no whole-surface mesh")]
    MissingMesh,

    #[error("mesh has no cell array named {0}")]
    MissingTagArray(String),
}

/// Errors related to the data-node descriptor registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("a descriptor is already registered for data type {0}")]
    DuplicateDataType(String),
}

/// Convenience type alias for results using [`SurfModelError`].
pub type Result<T> = std::result::Result<T, SurfModelError>;
