//! Filling UV islands with texture.
//!
//! The fill stage rasterizes every island of the target texture into one
//! combined mask and asks the engine to synthesize that region from the
//! example texture in a single call.

use std::time::Instant;

use crate::engine::{PatchParams, SynthesisEngine};
use crate::error::{Result, SynthError};
use crate::texture::Texture;

use super::rasterize::{rasterize_islands, IslandMask, UvIsland};
use super::snapshot::{publish, SnapshotSink};
use super::Progress;

/// Fill the union of `islands` in `target` with texture from `example`.
///
/// Pixels outside the islands are left untouched. On success the rasterized
/// mask is returned, and one snapshot is published to `sink`.
///
/// # Errors
///
/// - [`SynthError::InvalidGeometry`] if there are no islands or they cover no
///   pixel of the target. The engine is not called.
/// - [`SynthError::EngineFailure`] if the engine rejects the fill.
///
/// # Example
///
/// ```
/// use seamweave::algo::fill::fill_islands;
/// use seamweave::algo::rasterize::UvIsland;
/// use seamweave::engine::{PatchParams, QuiltEngine};
/// use seamweave::texture::Texture;
///
/// let mut target = Texture::new(32, 32, 3);
/// let example = Texture::filled(16, 16, 3, 0.5);
/// let island = UvIsland::from_uvs(&[(0.25, 0.25), (0.75, 0.25), (0.75, 0.75), (0.25, 0.75)]);
///
/// let mut engine = QuiltEngine::with_seed(7);
/// let mask = fill_islands(
///     &mut engine,
///     &mut target,
///     &example,
///     &PatchParams::new(0.5, 8),
///     &[island],
///     None,
/// )
/// .unwrap();
///
/// assert_eq!(target.pixel(16, 16), &[0.5, 0.5, 0.5]);
/// assert_eq!(target.pixel(2, 2), &[0.0, 0.0, 0.0]);
/// assert!(mask.count() > 0);
/// ```
pub fn fill_islands<E: SynthesisEngine>(
    engine: &mut E,
    target: &mut Texture,
    example: &Texture,
    params: &PatchParams,
    islands: &[UvIsland],
    sink: Option<&dyn SnapshotSink>,
) -> Result<IslandMask> {
    fill_islands_with_progress(engine, target, example, params, islands, sink, &Progress::none())
}

/// Fill the union of `islands` with progress reporting.
///
/// Same as [`fill_islands`] but reports a single completed step once the
/// engine returns.
pub fn fill_islands_with_progress<E: SynthesisEngine>(
    engine: &mut E,
    target: &mut Texture,
    example: &Texture,
    params: &PatchParams,
    islands: &[UvIsland],
    sink: Option<&dyn SnapshotSink>,
    progress: &Progress,
) -> Result<IslandMask> {
    if islands.is_empty() {
        return Err(SynthError::InvalidGeometry("no UV islands to fill".into()));
    }

    let mask = rasterize_islands(islands, target.height(), target.width());
    if mask.is_empty() {
        return Err(SynthError::InvalidGeometry(format!(
            "{} UV island(s) cover no pixels of the {}x{} target",
            islands.len(),
            target.height(),
            target.width()
        )));
    }

    let bbox = mask.bounding_box();
    log::info!(
        "synthesize uv islands: {} island(s), bbox {:?}, {} pixels",
        islands.len(),
        bbox.as_tuple(),
        mask.count()
    );

    let start = Instant::now();
    engine
        .fill_area_with_texture(target, example, params, &mask)
        .map_err(SynthError::fill_failure)?;
    log::debug!("island fill took {:.2?}", start.elapsed());

    publish(sink, target);
    progress.report(1, 1, "Filling UV islands");
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::RecordingEngine;
    use crate::error::Stage;
    use std::cell::RefCell;

    fn square(lo: f64, hi: f64) -> UvIsland {
        UvIsland::from_uvs(&[(lo, lo), (hi, lo), (hi, hi), (lo, hi)])
    }

    #[test]
    fn test_square_island_calls_engine_once() {
        let mut engine = RecordingEngine::new();
        let mut target = Texture::new(50, 50, 3);
        let example = Texture::filled(8, 8, 3, 0.5);
        let params = PatchParams::new(0.3, 10);

        fill_islands(&mut engine, &mut target, &example, &params, &[square(0.1, 0.9)], None).unwrap();

        assert_eq!(engine.fills.len(), 1);
        let call = &engine.fills[0];
        assert_eq!(call.bbox.as_tuple(), (4, 4, 46, 46));
        assert_eq!(call.params, params);

        // The mask is true only inside the square.
        for row in 0..50 {
            for col in 0..50 {
                let inside = (5..45).contains(&row) && (5..45).contains(&col);
                assert_eq!(call.mask.contains_global(row, col), inside);
            }
        }
    }

    #[test]
    fn test_unmasked_pixels_untouched() {
        let mut engine = RecordingEngine::new();
        let mut target = Texture::filled(20, 20, 1, 0.25);
        let example = Texture::new(4, 4, 1);

        let mask = fill_islands(
            &mut engine,
            &mut target,
            &example,
            &PatchParams::new(0.5, 4),
            &[square(0.2, 0.6)],
            None,
        )
        .unwrap();

        for row in 0..20 {
            for col in 0..20 {
                let expected = if mask.contains_global(row, col) { 1.0 } else { 0.25 };
                assert_eq!(target.pixel(row, col)[0], expected);
            }
        }
    }

    #[test]
    fn test_no_islands_is_invalid_geometry() {
        let mut engine = RecordingEngine::new();
        let mut target = Texture::new(10, 10, 1);
        let example = Texture::new(4, 4, 1);

        let err = fill_islands(&mut engine, &mut target, &example, &PatchParams::new(0.5, 4), &[], None)
            .unwrap_err();
        assert!(matches!(err, SynthError::InvalidGeometry(_)));
        assert!(engine.fills.is_empty());
    }

    #[test]
    fn test_degenerate_islands_are_invalid_geometry() {
        let mut engine = RecordingEngine::new();
        let mut target = Texture::new(10, 10, 1);
        let example = Texture::new(4, 4, 1);
        let islands = vec![
            UvIsland::from_uvs(&[(0.1, 0.1), (0.9, 0.9)]),
            UvIsland::default(),
        ];

        let err = fill_islands(&mut engine, &mut target, &example, &PatchParams::new(0.5, 4), &islands, None)
            .unwrap_err();
        assert!(matches!(err, SynthError::InvalidGeometry(_)));
        assert!(engine.fills.is_empty());
    }

    #[test]
    fn test_engine_failure_is_wrapped() {
        let mut engine = RecordingEngine::new();
        engine.fail_fill = true;
        let mut target = Texture::new(10, 10, 1);
        let example = Texture::new(4, 4, 1);

        let err = fill_islands(
            &mut engine,
            &mut target,
            &example,
            &PatchParams::new(0.5, 4),
            &[square(0.1, 0.9)],
            None,
        )
        .unwrap_err();

        match err {
            SynthError::EngineFailure { stage, edge, .. } => {
                assert_eq!(stage, Stage::Fill);
                assert_eq!(edge, None);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_publishes_one_snapshot() {
        let snapshots = RefCell::new(Vec::new());
        let sink = |t: Texture| snapshots.borrow_mut().push(t);

        let mut engine = RecordingEngine::new();
        let mut target = Texture::new(10, 10, 1);
        let example = Texture::new(4, 4, 1);

        fill_islands(
            &mut engine,
            &mut target,
            &example,
            &PatchParams::new(0.5, 4),
            &[square(0.1, 0.9)],
            Some(&sink),
        )
        .unwrap();

        let snapshots = snapshots.borrow();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0], target);
    }
}
