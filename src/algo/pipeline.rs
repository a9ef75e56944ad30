//! Top-level synthesis pipeline.
//!
//! A run fills the UV islands of the target texture (optional) and then makes
//! the listed edge pairs seamless (optional), both on the same target buffer.
//!
//! # Example
//!
//! ```
//! use seamweave::algo::pipeline::{synthesize_textures_on_uvs, SynthesisJob, SynthesisOptions};
//! use seamweave::algo::rasterize::UvIsland;
//! use seamweave::engine::{EdgePair, PatchParams, QuiltEngine, UvEdge};
//! use seamweave::texture::Texture;
//!
//! let job = SynthesisJob {
//!     target: Texture::new(32, 32, 3),
//!     example: Texture::filled(16, 16, 3, 0.5),
//!     params: PatchParams::new(0.4, 8),
//!     island_uvs: vec![UvIsland::from_uvs(&[(0.1, 0.1), (0.9, 0.1), (0.9, 0.9), (0.1, 0.9)])],
//!     edge_infos: vec![EdgePair::new(
//!         UvEdge::from_uvs(&[(0.1, 0.1), (0.1, 0.9)]),
//!         UvEdge::from_uvs(&[(0.9, 0.1), (0.9, 0.9)]),
//!     )],
//! };
//!
//! let options = SynthesisOptions::default().with_fill(true).with_seams(true);
//! let mut engine = QuiltEngine::with_seed(1);
//! let target = synthesize_textures_on_uvs(&mut engine, job, &options, None).unwrap();
//! assert_eq!(target.pixel(16, 16), &[0.5, 0.5, 0.5]);
//! ```

use std::time::Instant;

use crate::engine::{EdgePair, PatchParams, SynthesisEngine};
use crate::error::Result;
use crate::texture::Texture;

use super::fill::fill_islands_with_progress;
use super::rasterize::UvIsland;
use super::seam::{make_seamless_with_progress, SeamOptions};
use super::snapshot::SnapshotSink;
use super::Progress;

/// Everything a synthesis run operates on.
#[derive(Debug, Clone)]
pub struct SynthesisJob<E> {
    /// Texture to synthesize into. Returned at the end of the run.
    pub target: Texture,

    /// Example texture to sample from.
    pub example: Texture,

    /// Patch sampling parameters.
    pub params: PatchParams,

    /// UV islands of the target surface.
    pub island_uvs: Vec<UvIsland>,

    /// Edge pairs to make seamless, in processing order.
    pub edge_infos: Vec<EdgePair<E>>,
}

/// Which stages to run.
#[derive(Debug, Clone, Default)]
pub struct SynthesisOptions {
    /// Fill the UV islands from the example texture.
    pub synth_tex: bool,

    /// Make the edge pairs seamless.
    pub seamless_uvs: bool,

    /// Seam iteration cap; see [`SeamOptions::edge_iterations`]. Zero is unlimited.
    pub edge_iterations: usize,

    /// Verbosity passed through to the engine.
    pub debug_level: u32,
}

impl SynthesisOptions {
    /// Options that run both stages without an iteration cap.
    pub fn all() -> Self {
        Self {
            synth_tex: true,
            seamless_uvs: true,
            ..Self::default()
        }
    }

    /// Enable or disable the fill stage.
    pub fn with_fill(mut self, synth_tex: bool) -> Self {
        self.synth_tex = synth_tex;
        self
    }

    /// Enable or disable the seam stage.
    pub fn with_seams(mut self, seamless_uvs: bool) -> Self {
        self.seamless_uvs = seamless_uvs;
        self
    }

    /// Set the seam iteration cap.
    pub fn with_edge_iterations(mut self, edge_iterations: usize) -> Self {
        self.edge_iterations = edge_iterations;
        self
    }

    /// Set the engine debug level.
    pub fn with_debug_level(mut self, debug_level: u32) -> Self {
        self.debug_level = debug_level;
        self
    }

    fn seam_options(&self) -> SeamOptions {
        SeamOptions::default()
            .with_edge_iterations(self.edge_iterations)
            .with_debug_level(self.debug_level)
    }
}

/// Run the synthesis pipeline and return the final target texture.
///
/// # Errors
///
/// Fails on the first error of either stage; see [`super::fill::fill_islands`]
/// and [`super::seam::make_seamless`].
pub fn synthesize_textures_on_uvs<E: SynthesisEngine>(
    engine: &mut E,
    job: SynthesisJob<E::Edge>,
    options: &SynthesisOptions,
    sink: Option<&dyn SnapshotSink>,
) -> Result<Texture> {
    synthesize_textures_on_uvs_with_progress(engine, job, options, sink, &Progress::none())
}

/// Run the synthesis pipeline with progress reporting.
pub fn synthesize_textures_on_uvs_with_progress<E: SynthesisEngine>(
    engine: &mut E,
    job: SynthesisJob<E::Edge>,
    options: &SynthesisOptions,
    sink: Option<&dyn SnapshotSink>,
    progress: &Progress,
) -> Result<Texture> {
    let SynthesisJob {
        mut target,
        example,
        params,
        island_uvs,
        edge_infos,
    } = job;

    let start = Instant::now();

    if options.synth_tex {
        let stage = Instant::now();
        fill_islands_with_progress(engine, &mut target, &example, &params, &island_uvs, sink, progress)?;
        log::info!("island fill finished in {:.2?}", stage.elapsed());
    }

    if options.seamless_uvs {
        let stage = Instant::now();
        let report = make_seamless_with_progress(
            engine,
            &mut target,
            &example,
            &params,
            &edge_infos,
            &options.seam_options(),
            sink,
            progress,
        )?;
        log::info!(
            "seam repair finished in {:.2?}: {}/{} edges{}",
            stage.elapsed(),
            report.edges_processed,
            edge_infos.len(),
            if report.stopped_early { " (iteration cap reached)" } else { "" }
        );
    }

    log::info!("synthesize_textures_on_uvs took {:.2?}", start.elapsed());
    Ok(target)
}
