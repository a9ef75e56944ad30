//! Synthesis engine interface.
//!
//! The orchestration layer in [`crate::algo`] never samples texture itself. It
//! prepares masks, bounding boxes and edge pairs, and hands them to a
//! [`SynthesisEngine`], which does the patch search and blending.
//!
//! # Available Engines
//!
//! - [`QuiltEngine`]: image quilting from a random patch library
//!
//! # Search state
//!
//! Seam repair calls the engine once per edge pair. The engine may build an
//! accelerator (a patch library, a spatial index) on the first call and return
//! it; the caller passes it back unchanged into the next call. The caller never
//! inspects the state; see [`crate::algo::seam`].

pub mod quilt;

#[cfg(test)]
pub(crate) mod testing;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algo::rasterize::IslandMask;
use crate::texture::Texture;

pub use quilt::{PatchLibrary, QuiltEngine, UvEdge};

/// Errors reported by a synthesis engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A synthesis parameter is out of range for this engine.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// Target and example textures have different channel counts.
    #[error("channel mismatch: target has {target}, example has {example}")]
    ChannelMismatch {
        /// Target channel count.
        target: usize,
        /// Example channel count.
        example: usize,
    },

    /// Edge geometry cannot be processed.
    #[error("degenerate edge: {0}")]
    DegenerateEdge(String),

    /// Any other engine failure.
    #[error("{0}")]
    Failed(String),
}

impl EngineError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        EngineError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

/// Patch sampling parameters, passed through to the engine unvalidated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatchParams {
    /// Patch size as a fraction of the example's smaller dimension.
    pub patch_ratio: f64,

    /// Maximum number of candidate patches the engine may keep.
    pub libsize: usize,
}

impl PatchParams {
    /// Create patch parameters.
    pub fn new(patch_ratio: f64, libsize: usize) -> Self {
        Self { patch_ratio, libsize }
    }
}

/// Two edge descriptors whose boundary must be made continuous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgePair<E> {
    /// First boundary curve.
    pub e1: E,
    /// Second boundary curve.
    pub e2: E,
}

impl<E> EdgePair<E> {
    /// Create an edge pair.
    pub fn new(e1: E, e2: E) -> Self {
        Self { e1, e2 }
    }
}

/// A texture synthesis backend.
///
/// Both operations modify `target` in place.
pub trait SynthesisEngine {
    /// Edge descriptor consumed by [`make_seamless_edge`](Self::make_seamless_edge).
    type Edge;

    /// Reusable search structure threaded between seam calls.
    type SearchState;

    /// Fill the covered pixels of `mask` with texture sampled from `example`.
    ///
    /// The mask carries the bounding box it is cropped to. Pixels outside the
    /// mask must be left untouched.
    fn fill_area_with_texture(
        &mut self,
        target: &mut Texture,
        example: &Texture,
        params: &PatchParams,
        mask: &IslandMask,
    ) -> Result<(), EngineError>;

    /// Adjust the pixels along `e1` and `e2` so the texture continues across them.
    ///
    /// `search` is `None` on the first call of a run and the value returned by
    /// the previous call afterwards.
    #[allow(clippy::too_many_arguments)]
    fn make_seamless_edge(
        &mut self,
        e1: &Self::Edge,
        e2: &Self::Edge,
        target: &mut Texture,
        example: &Texture,
        params: &PatchParams,
        search: Option<Self::SearchState>,
        debug_level: u32,
    ) -> Result<Self::SearchState, EngineError>;
}
