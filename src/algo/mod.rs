//! Orchestration of texture synthesis over UV islands.
//!
//! This module contains the stages of a synthesis run:
//!
//! - **Rasterization**: UV island polygons to pixel masks and bounding boxes
//! - **Fill**: synthesizing the island region from an example texture
//! - **Seams**: making edge pairs continuous, one engine call per edge
//! - **Pipeline**: fill then seams on one target buffer
//!
//! Texture sampling itself is delegated to a [`crate::engine::SynthesisEngine`].

pub mod fill;
pub mod pipeline;
pub mod progress;
pub mod rasterize;
pub mod seam;
pub mod snapshot;

pub use progress::Progress;
