//! Error types for the anchor engine
//!
//! Every failure in this crate is local and non-fatal: a failed placement or a
//! lookup miss aborts only the operation that hit it. Gate rejections of
//! duplicate anchors are not errors at all (see `GateDecision`).

use std::fmt;
use crate::tracking::AnchorId;

/// Result type for anchor engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Anchor engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The asset collaborator has no model with this name
    AssetNotFound(String),

    /// No scene node carries this name
    NodeNotFound(String),

    /// The anchor's reference object has no name, so nothing can be resolved for it
    MissingReferenceName(AnchorId),

    /// A node key is stale or the requested graph edit is not allowed
    InvalidNode(String),

    /// The tracking collaborator refused a run request
    TrackingFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AssetNotFound(name) => write!(f, "Asset not found: {}", name),
            Error::NodeNotFound(name) => write!(f, "Node not found: {}", name),
            Error::MissingReferenceName(id) => {
                write!(f, "Anchor {} has no reference object name", id)
            }
            Error::InvalidNode(msg) => write!(f, "Invalid node: {}", msg),
            Error::TrackingFailed(msg) => write!(f, "Tracking failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error at WARN level and evaluate to it
///
/// # Example
///
/// ```ignore
/// let node = graph.find(name)
///     .ok_or_else(|| engine_err!("anchor3d::Gesture", Error::NodeNotFound(name.to_string())))?;
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $error:expr) => {{
        let error: $crate::anchor3d::Error = $error;
        $crate::engine_warn!($source, "{}", error);
        error
    }};
}

/// Log an error at WARN level and return it from the enclosing function
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $error:expr) => {
        return Err($crate::engine_err!($source, $error))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
