//! Error type for the few fallible engine surfaces.
//!
//! Operations addressed by frame or element id never fail: a stale id is a
//! silent no-op. Errors only arise at the edges, when a document or a
//! configuration enters the engine from outside.

/// Error returned by document loading and configuration parsing.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The document JSON could not be parsed.
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Two frames in a document share the same id.
    #[error("duplicate frame id in document: {0}")]
    DuplicateFrame(uuid::Uuid),
    /// A frame has a non-positive or non-finite size.
    #[error("frame {id} has invalid size {width}x{height}")]
    InvalidFrameSize { id: uuid::Uuid, width: f64, height: f64 },
    /// A frame has a non-positive scale or a non-finite position or rotation.
    #[error("frame {0} has a non-finite position or rotation, or a non-positive scale")]
    InvalidFrameTransform(uuid::Uuid),
    /// Configuration values are inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
}
