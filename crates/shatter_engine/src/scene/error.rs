//! Scene and traversal errors
//!
//! Every variant describes malformed input or a broken caller contract. None
//! of them are expected at runtime with valid assets, so callers usually
//! propagate them to the top level and stop.

use super::node::{NodeHandle, ShaderHandle};

/// Result type for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors raised while building or traversing a scene graph
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The node handle does not refer to a live node
    #[error("Invalid node handle: {0:?}")]
    InvalidNode(NodeHandle),

    /// The shader handle does not refer to a live shader
    #[error("Invalid shader handle: {0:?}")]
    InvalidShader(ShaderHandle),

    /// A group operation was applied to some other node kind
    #[error("Node {0:?} is not a group")]
    NotAGroup(NodeHandle),

    /// A mesh operation was applied to some other node kind
    #[error("Node {0:?} is not a mesh")]
    NotAMesh(NodeHandle),

    /// Too many nodes pending on the explicit traversal stack
    #[error("Traversal frontier overflow: more than {capacity} pending nodes")]
    FrontierOverflow {
        /// Frontier capacity that was exceeded
        capacity: usize,
    },

    /// Groups are nested deeper than allowed (or the graph is cyclic)
    #[error("Scene nesting exceeds {max_depth} levels")]
    DepthExceeded {
        /// Depth bound that was exceeded
        max_depth: usize,
    },

    /// A per-vertex attribute array does not match the point count
    #[error("Mesh attribute '{attribute}' has {found} entries, expected {expected}")]
    AttributeLength {
        /// Attribute name
        attribute: &'static str,
        /// Point count
        expected: usize,
        /// Actual attribute count
        found: usize,
    },

    /// A triangle references a point that does not exist
    #[error("Triangle {triangle} references point {index}, mesh has {points} points")]
    IndexOutOfRange {
        /// Triangle number
        triangle: usize,
        /// Offending point index
        index: u32,
        /// Point count
        points: usize,
    },

    /// No vertex normal is available for a referenced point
    #[error("Mesh has no vertex normal for point {index}")]
    MissingVertexNormals {
        /// Point index without a normal
        index: u32,
    },

    /// Explosion stride of zero
    #[error("Particle density must be at least 1")]
    InvalidDensity,

    /// The backend kept asking for another bounding pass
    #[error("Bounding pass did not converge after {passes} passes")]
    BoundsNotConverged {
        /// Passes submitted
        passes: u32,
    },
}
