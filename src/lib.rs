//! # Seamweave
//!
//! Example-based texture synthesis over the UV islands of a mesh.
//!
//! Given a small example texture and a target texture whose surface is
//! described by UV islands, seamweave
//!
//! - fills the islands with texture sampled from the example, and
//! - repairs the seams between islands that meet on the mesh, so the texture
//!   continues across UV cuts.
//!
//! ## Features
//!
//! - **Island rasterization**: even-odd scanline fill of UV polygons into a
//!   cropped pixel mask, with a one-pixel safety margin
//! - **Pluggable engines**: patch search and blending live behind the
//!   [`engine::SynthesisEngine`] trait; [`engine::QuiltEngine`] is included
//! - **Seam iteration**: one engine call per edge pair, with the engine's
//!   search structure carried from call to call
//! - **Live previews**: intermediate textures can be streamed to another thread
//!   through a non-blocking snapshot channel
//! - **Records**: run inputs stored as bincode or JSON
//!
//! ## Quick Start
//!
//! ```no_run
//! use seamweave::prelude::*;
//!
//! let record: SynthesisRecord<UvEdge> = seamweave::io::load_record("uv_test_island.bin").unwrap();
//! let job = record.into_job().unwrap();
//!
//! let mut engine = QuiltEngine::with_seed(0);
//! let options = SynthesisOptions::all();
//! let target = synthesize_textures_on_uvs(&mut engine, job, &options, None).unwrap();
//!
//! seamweave::io::save_texture(&target, "result.png").unwrap();
//! ```
//!
//! ## Rasterizing Islands
//!
//! ```
//! use seamweave::prelude::*;
//!
//! let island = UvIsland::from_uvs(&[(0.25, 0.25), (0.75, 0.25), (0.75, 0.75), (0.25, 0.75)]);
//! let mask = rasterize_islands(&[island], 64, 64);
//!
//! assert_eq!(mask.bounding_box().as_tuple(), (15, 15, 49, 49));
//! assert_eq!(mask.count(), 32 * 32);
//! ```
//!
//! ## Watching a Run
//!
//! ```
//! use seamweave::prelude::*;
//!
//! let job = SynthesisJob {
//!     target: Texture::new(32, 32, 3),
//!     example: Texture::filled(16, 16, 3, 0.5),
//!     params: PatchParams::new(0.3, 16),
//!     island_uvs: vec![UvIsland::from_uvs(&[(0.1, 0.1), (0.9, 0.1), (0.5, 0.9)])],
//!     edge_infos: Vec::<EdgePair<UvEdge>>::new(),
//! };
//!
//! let (sink, previews) = snapshot_channel(8);
//! let worker = std::thread::spawn(move || {
//!     let mut engine = QuiltEngine::with_seed(3);
//!     synthesize_textures_on_uvs(&mut engine, job, &SynthesisOptions::all(), Some(&sink))
//! });
//!
//! let target = worker.join().unwrap().unwrap();
//! let snapshots: Vec<Texture> = previews.iter().collect();
//! assert_eq!(snapshots.len(), 1);
//! assert_eq!(snapshots[0], target);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod engine;
pub mod error;
pub mod io;
pub mod texture;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use seamweave::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::fill::fill_islands;
    pub use crate::algo::pipeline::{synthesize_textures_on_uvs, SynthesisJob, SynthesisOptions};
    pub use crate::algo::rasterize::{rasterize_islands, BoundingBox, IslandMask, UvIsland};
    pub use crate::algo::seam::{make_seamless, SeamOptions, SeamReport};
    pub use crate::algo::snapshot::{snapshot_channel, ChannelSink, SnapshotSink};
    pub use crate::algo::Progress;
    pub use crate::engine::{EdgePair, EngineError, PatchParams, QuiltEngine, SynthesisEngine, UvEdge};
    pub use crate::error::{Result, SynthError};
    pub use crate::io::SynthesisRecord;
    pub use crate::texture::Texture;
}

// Re-export nalgebra types for convenience
pub use nalgebra;
