//! Seam repair across UV island boundaries.
//!
//! Each [`EdgePair`] names two boundary curves that meet on the mesh but lie
//! apart in UV space. The controller walks the pairs in order and asks the
//! engine to make each one seamless, threading the engine's search state from
//! one call into the next.
//!
//! # Iteration cap
//!
//! [`SeamOptions::edge_iterations`] limits the run. Zero means no limit.
//! Otherwise the run stops *after* processing edge `i` once `i >= cap`, so a
//! cap of `n` processes `n + 1` edges:
//!
//! | cap | edges processed (of 5) |
//! |-----|------------------------|
//! | 0   | 0, 1, 2, 3, 4          |
//! | 1   | 0, 1                   |
//! | 2   | 0, 1, 2                |
//!
//! # Failure
//!
//! The first engine error aborts the run. Edges after it are not processed,
//! and the error reports the index of the failing edge.

use crate::engine::{EdgePair, PatchParams, SynthesisEngine};
use crate::error::{Result, SynthError};
use crate::texture::Texture;

use super::snapshot::{publish, SnapshotSink};
use super::Progress;

/// Options for the seam repair stage.
#[derive(Debug, Clone, Default)]
pub struct SeamOptions {
    /// Stop after edge `i` once `i >= edge_iterations`. Zero disables the cap.
    pub edge_iterations: usize,

    /// Verbosity passed through to the engine.
    pub debug_level: u32,
}

impl SeamOptions {
    /// Create options with the given iteration cap.
    pub fn with_edge_iterations(mut self, edge_iterations: usize) -> Self {
        self.edge_iterations = edge_iterations;
        self
    }

    /// Set the engine debug level.
    pub fn with_debug_level(mut self, debug_level: u32) -> Self {
        self.debug_level = debug_level;
        self
    }

    /// Check whether the run stops after processing edge `index`.
    #[inline]
    pub fn stops_after(&self, index: usize) -> bool {
        self.edge_iterations != 0 && index >= self.edge_iterations
    }
}

/// Outcome of a seam repair run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeamReport {
    /// Number of edge pairs processed.
    pub edges_processed: usize,

    /// Whether the iteration cap ended the run before the last edge.
    pub stopped_early: bool,
}

/// Make each edge pair in `edges` seamless, in order.
///
/// `target` is modified in place. After every edge a snapshot is published to
/// `sink`.
///
/// # Errors
///
/// Returns [`SynthError::EngineFailure`] with the edge index if the engine
/// rejects an edge.
pub fn make_seamless<E: SynthesisEngine>(
    engine: &mut E,
    target: &mut Texture,
    example: &Texture,
    params: &PatchParams,
    edges: &[EdgePair<E::Edge>],
    options: &SeamOptions,
    sink: Option<&dyn SnapshotSink>,
) -> Result<SeamReport> {
    make_seamless_with_progress(engine, target, example, params, edges, options, sink, &Progress::none())
}

/// Make each edge pair seamless with progress reporting.
///
/// Same as [`make_seamless`] but reports `(edges done, total edges, message)`
/// after each edge.
#[allow(clippy::too_many_arguments)]
pub fn make_seamless_with_progress<E: SynthesisEngine>(
    engine: &mut E,
    target: &mut Texture,
    example: &Texture,
    params: &PatchParams,
    edges: &[EdgePair<E::Edge>],
    options: &SeamOptions,
    sink: Option<&dyn SnapshotSink>,
    progress: &Progress,
) -> Result<SeamReport> {
    let total = edges.len();
    let mut search: Option<E::SearchState> = None;
    let mut report = SeamReport {
        edges_processed: 0,
        stopped_early: false,
    };

    for (i, pair) in edges.iter().enumerate() {
        log::info!("making edge seamless: #{}", i);

        let next = engine
            .make_seamless_edge(
                &pair.e1,
                &pair.e2,
                target,
                example,
                params,
                search.take(),
                options.debug_level,
            )
            .map_err(|e| SynthError::seam_failure(i, e))?;
        search = Some(next);
        report.edges_processed = i + 1;

        publish(sink, target);
        progress.report(i + 1, total, "Making edges seamless");

        if options.stops_after(i) {
            report.stopped_early = i + 1 < total;
            break;
        }
    }

    Ok(report)
}
