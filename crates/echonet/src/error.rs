#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid config `{field}`: {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("graph document has no hub node")]
    MissingHub,

    #[error("node keyed `{key}` declares id `{id}`")]
    IdMismatch { key: String, id: String },

    #[error("node `{node}` lists unknown neighbor `{neighbor}`")]
    UnknownNeighbor { node: String, neighbor: String },

    #[error("node `{node}` lists itself as a neighbor")]
    SelfLoop { node: String },

    #[error("edge `{a}` -> `{b}` is not mirrored in `{b}`'s neighbors")]
    AsymmetricEdge { a: String, b: String },
}

pub type Result<T> = std::result::Result<T, Error>;
