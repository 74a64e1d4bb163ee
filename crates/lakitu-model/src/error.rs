//! Error types for lakitu-model.

/// Errors produced by model operations.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A timer value outside the set the game engine can encode.
    #[error("invalid timer value {ticks}: the header encodes only 0, 400, 300 or 200 ticks")]
    InvalidTicks { ticks: u16 },

    /// An area with the same id is already present in the atlas.
    #[error("area \"{id}\" is already in the atlas")]
    DuplicateArea { id: String },

    /// An area id could not be resolved.
    #[error("no area \"{id}\" in the atlas")]
    UnknownArea { id: String },

    /// A project document could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// A project document contains invalid JSON.
    #[error("invalid project document at {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    /// A project document could not be serialized.
    #[error("cannot serialize project document: {source}")]
    Serialize { source: serde_json::Error },

    /// A project document could not be written.
    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}
