//! Error taxonomy for rig fitting and baking
//!
//! All failures here are deterministic geometric conditions. A failed bake
//! never partially writes its target texture; callers in a multi-object
//! invocation isolate failures per object (see [`crate::report::BakeReport`]).

use thiserror::Error;

/// Errors produced by camera rig construction and projection baking
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BakeError {
    /// The bounding volume has no projected silhouette, so a square frustum
    /// cannot be sized around it
    #[error("degenerate bounds: projected extent is {extent} (all points coincident or collinear with the view axis)")]
    DegenerateBounds {
        /// Larger of the camera-local X/Y extents
        extent: f32,
    },

    /// The mesh carries no UV layer (or an incomplete one), so texels cannot
    /// be mapped back to the surface
    #[error("mesh has no usable UV layer ({uvs} UVs for {vertices} vertices)")]
    MissingUvLayer { uvs: usize, vertices: usize },

    /// The source image is unreadable at the required resolution
    #[error("invalid source image: {width}x{height} with {bytes} bytes of pixel data")]
    InvalidSourceImage {
        width: u32,
        height: u32,
        bytes: usize,
    },

    /// Every texel was rejected; the rig framed no visible geometry
    #[error("no visible geometry: all {rejected} candidate texels rejected")]
    NoVisibleGeometry {
        /// Texels that fell inside a UV face but failed visibility
        rejected: u64,
    },
}
