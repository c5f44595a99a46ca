//! Error Types
//!
//! This module defines the error types used throughout the rig.
//!
//! # Overview
//!
//! The main error type [`RigError`] covers the failure modes of loading and
//! binding animation data:
//! - Hierarchy validation (duplicate names, excessive depth)
//! - Keyframe track validation
//! - Skin weight validation
//! - Palette capacity violations
//!
//! Per-frame operations (sampling, evaluation, sequencing) never fail: every
//! precondition they rely on is checked once, when the data is bound.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, RigError>`.
//!
//! ```rust,ignore
//! use myth_rig::errors::{RigError, Result};
//!
//! fn load_rig() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the rig.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RigError {
    // ========================================================================
    // Skeleton Errors
    // ========================================================================
    /// Two nodes of one hierarchy share a name, so bones could not be
    /// resolved unambiguously.
    #[error("Duplicate node name in hierarchy: {0}")]
    DuplicateNode(String),

    /// The hierarchy is deeper than the configured traversal bound.
    #[error("Hierarchy too deep at node '{node}' (limit: {limit})")]
    HierarchyTooDeep {
        /// First node found beyond the limit
        node: String,
        /// The configured maximum depth
        limit: usize,
    },

    // ========================================================================
    // Palette Errors
    // ========================================================================
    /// A bone id does not fit into the fixed-capacity skinning palette.
    #[error("Bone '{bone}' has id {id}, which exceeds the palette capacity of {capacity}")]
    PaletteOverflow {
        /// Name of the offending bone
        bone: String,
        /// The bone id
        id: usize,
        /// The palette capacity
        capacity: usize,
    },

    // ========================================================================
    // Animation Data Errors
    // ========================================================================
    /// A keyframe channel is empty, unsorted, or has mismatched arrays.
    #[error("Invalid {channel} track for node '{node}': {reason}")]
    InvalidTrack {
        /// Node the track animates
        node: String,
        /// Channel name (`position`, `rotation` or `scale`)
        channel: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Vertex skin data references something that does not exist.
    #[error("Invalid skin for mesh {mesh}: {reason}")]
    InvalidSkin {
        /// Index of the mesh in bind order
        mesh: usize,
        /// What is wrong with it
        reason: String,
    },

    /// No clip with the requested name was bound.
    #[error("Animation clip not found: {0}")]
    ClipNotFound(String),
}

/// Alias for `Result<T, RigError>`.
pub type Result<T> = std::result::Result<T, RigError>;
