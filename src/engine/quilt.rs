//! Image quilting engine.
//!
//! A small patch-based engine in the spirit of Efros & Freeman's image
//! quilting:
//!
//! - A [`PatchLibrary`] of `libsize` square patches is cut from random
//!   positions of the example texture. The patch side is `patch_ratio` times
//!   the example's smaller dimension.
//! - **Fill** walks the bounding box in overlapping tiles. For each tile that
//!   touches the mask, the library patch with the smallest squared difference
//!   over the already synthesized overlap is pasted into the covered pixels.
//! - **Seams** sample both edges of a pair at matching arc-length positions.
//!   The neighbourhoods on both sides are averaged, the closest library patch
//!   is looked up, and that patch is blended onto both sides with a radial
//!   falloff, so the two borders end up showing the same texture.
//!
//! The seam library is returned as the engine's search state and reused for
//! every following edge of the run, as long as the patch size and example
//! match.
//!
//! Seam edges need at least two finite vertices, all within one texture
//! extent of the unit UV square; anything else is a
//! [`EngineError::DegenerateEdge`].

use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{EngineError, PatchParams, SynthesisEngine};
use crate::algo::rasterize::{uv_to_pixel, IslandMask};
use crate::texture::Texture;

/// An edge of a UV island: a polyline in normalized UV space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UvEdge {
    points: Vec<Point2<f64>>,
}

impl UvEdge {
    /// Create an edge from its UV vertices.
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        Self { points }
    }

    /// Create an edge from `(u, v)` tuples.
    pub fn from_uvs(uvs: &[(f64, f64)]) -> Self {
        Self::new(uvs.iter().map(|&(u, v)| Point2::new(u, v)).collect())
    }

    /// Get the UV vertices.
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Map the edge into `(row, col)` pixel space.
    fn to_pixel_space(&self, height: usize, width: usize) -> Vec<Point2<f64>> {
        self.points
            .iter()
            .map(|uv| uv_to_pixel(*uv, height, width))
            .collect()
    }
}

/// How far outside the unit square, in UV units, edge vertices may lie.
const UV_MARGIN: f64 = 1.0;

/// Arc-length parameterized pixel-space polyline.
struct PixelPath {
    points: Vec<Point2<f64>>,
    cumulative: Vec<f64>,
}

impl PixelPath {
    fn new(edge: &UvEdge, height: usize, width: usize) -> Result<Self, EngineError> {
        if edge.points.len() < 2 {
            return Err(EngineError::DegenerateEdge(format!(
                "edge has {} point(s), need at least 2",
                edge.points.len()
            )));
        }
        if !edge.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
            return Err(EngineError::DegenerateEdge("edge has non-finite coordinates".into()));
        }
        let range = -UV_MARGIN..=1.0 + UV_MARGIN;
        if !edge.points.iter().all(|p| range.contains(&p.x) && range.contains(&p.y)) {
            return Err(EngineError::DegenerateEdge("edge lies far outside the texture".into()));
        }

        let points = edge.to_pixel_space(height, width);
        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for pair in points.windows(2) {
            total += (pair[1] - pair[0]).norm();
            cumulative.push(total);
        }
        Ok(Self { points, cumulative })
    }

    fn length(&self) -> f64 {
        *self.cumulative.last().unwrap_or(&0.0)
    }

    /// Point at fraction `t` in `[0, 1]` of the arc length.
    fn point_at(&self, t: f64) -> Point2<f64> {
        let length = self.length();
        if length <= 0.0 {
            return self.points[0];
        }
        let s = t.clamp(0.0, 1.0) * length;
        let seg = self
            .cumulative
            .windows(2)
            .position(|w| s <= w[1])
            .unwrap_or(self.points.len() - 2);
        let seg_len = self.cumulative[seg + 1] - self.cumulative[seg];
        let local = if seg_len > 0.0 {
            (s - self.cumulative[seg]) / seg_len
        } else {
            0.0
        };
        self.points[seg] + (self.points[seg + 1] - self.points[seg]) * local
    }
}

/// A square patch cut from the example texture.
#[derive(Debug, Clone)]
struct Patch {
    origin: (usize, usize),
    data: Vec<f32>,
}

/// Candidate patches sampled from an example texture.
#[derive(Debug, Clone)]
pub struct PatchLibrary {
    size: usize,
    channels: usize,
    example_shape: (usize, usize),
    patches: Vec<Patch>,
}

impl PatchLibrary {
    /// Cut `count` patches of side `size` from random positions of `example`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is larger than either dimension of `example`.
    /// [`patch_size`] always returns a valid size.
    pub fn build<R: Rng>(example: &Texture, size: usize, count: usize, rng: &mut R) -> Self {
        let (h, w, channels) = example.shape();
        let patches = (0..count)
            .map(|_| {
                let r0 = rng.gen_range(0..=h - size);
                let c0 = rng.gen_range(0..=w - size);
                let mut data = Vec::with_capacity(size * size * channels);
                for r in r0..r0 + size {
                    for c in c0..c0 + size {
                        data.extend_from_slice(example.pixel(r, c));
                    }
                }
                Patch { origin: (r0, c0), data }
            })
            .collect();

        Self {
            size,
            channels,
            example_shape: (h, w),
            patches,
        }
    }

    /// Side length of the patches.
    #[inline]
    pub fn patch_size(&self) -> usize {
        self.size
    }

    /// Number of patches.
    #[inline]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Check if the library holds no patches.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Top-left example pixel of each patch.
    pub fn origins(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.patches.iter().map(|p| p.origin)
    }

    fn is_compatible(&self, example: &Texture, size: usize, count: usize) -> bool {
        self.size == size
            && self.channels == example.channels()
            && self.example_shape == (example.height(), example.width())
            && self.patches.len() == count
    }

    #[inline]
    fn sample(&self, patch: usize, r: usize, c: usize) -> &[f32] {
        let start = (r * self.size + c) * self.channels;
        &self.patches[patch].data[start..start + self.channels]
    }

    /// Index and cost of the patch with the smallest weighted squared difference.
    ///
    /// `query` holds `size * size * channels` samples, `weights` one weight per pixel.
    fn nearest(&self, query: &[f32], weights: &[f32], parallel: bool) -> (usize, f32) {
        let channels = self.channels;
        let cost = |patch: &Patch| -> f32 {
            let mut total = 0.0;
            for (i, &w) in weights.iter().enumerate() {
                if w == 0.0 {
                    continue;
                }
                let a = &patch.data[i * channels..(i + 1) * channels];
                let b = &query[i * channels..(i + 1) * channels];
                let d: f32 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
                total += w * d;
            }
            total
        };
        let better = |a: &(usize, f32), b: &(usize, f32)| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0));

        let best = if parallel {
            self.patches
                .par_iter()
                .enumerate()
                .map(|(i, p)| (i, cost(p)))
                .min_by(better)
        } else {
            self.patches
                .iter()
                .enumerate()
                .map(|(i, p)| (i, cost(p)))
                .min_by(better)
        };
        best.unwrap_or((0, 0.0))
    }
}

/// Patch side length for `patch_ratio` on `example`.
///
/// The side is `patch_ratio` times the smaller example dimension, rounded, at
/// least 3 pixels and at most the smaller dimension.
pub fn patch_size(example: &Texture, patch_ratio: f64) -> Result<usize, EngineError> {
    if !patch_ratio.is_finite() || patch_ratio <= 0.0 || patch_ratio > 1.0 {
        return Err(EngineError::invalid_param("patch_ratio", patch_ratio, "must be in (0, 1]"));
    }
    if example.is_empty() {
        return Err(EngineError::invalid_param(
            "example",
            format!("{}x{}", example.height(), example.width()),
            "must not be empty",
        ));
    }
    let min_dim = example.height().min(example.width());
    let size = (patch_ratio * min_dim as f64).round() as usize;
    Ok(size.max(3).min(min_dim))
}

/// Image quilting engine.
///
/// # Example
///
/// ```
/// use seamweave::algo::rasterize::{rasterize_islands, UvIsland};
/// use seamweave::engine::{PatchParams, QuiltEngine, SynthesisEngine};
/// use seamweave::texture::Texture;
///
/// let mut target = Texture::new(24, 24, 1);
/// let example = Texture::filled(12, 12, 1, 0.3);
/// let island = UvIsland::from_uvs(&[(0.2, 0.2), (0.8, 0.2), (0.5, 0.8)]);
/// let mask = rasterize_islands(&[island], 24, 24);
///
/// let mut engine = QuiltEngine::with_seed(42);
/// engine
///     .fill_area_with_texture(&mut target, &example, &PatchParams::new(0.5, 16), &mask)
///     .unwrap();
///
/// for (row, col) in mask.covered_pixels() {
///     assert!((target.pixel(row, col)[0] - 0.3).abs() < 1e-6);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct QuiltEngine {
    rng: StdRng,
    parallel: bool,
}

impl Default for QuiltEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QuiltEngine {
    /// Create an engine seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            parallel: true,
        }
    }

    /// Create an engine with a fixed seed. Runs with equal seeds and inputs are identical.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            parallel: true,
        }
    }

    /// Set whether the patch search runs in parallel (default: true).
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn check(target: &Texture, example: &Texture, params: &PatchParams) -> Result<usize, EngineError> {
        if target.channels() != example.channels() {
            return Err(EngineError::ChannelMismatch {
                target: target.channels(),
                example: example.channels(),
            });
        }
        if params.libsize == 0 {
            return Err(EngineError::invalid_param("libsize", params.libsize, "must be positive"));
        }
        patch_size(example, params.patch_ratio)
    }
}

impl SynthesisEngine for QuiltEngine {
    type Edge = UvEdge;
    type SearchState = PatchLibrary;

    fn fill_area_with_texture(
        &mut self,
        target: &mut Texture,
        example: &Texture,
        params: &PatchParams,
        mask: &IslandMask,
    ) -> Result<(), EngineError> {
        let size = Self::check(target, example, params)?;
        let library = PatchLibrary::build(example, size, params.libsize, &mut self.rng);

        let bbox = mask.bounding_box();
        let channels = target.channels();
        let overlap = (size / 6).max(1).min(size - 1);
        let step = (size - overlap).max(1);

        let mut written = vec![false; bbox.height() * bbox.width()];
        let mut query = vec![0.0f32; size * size * channels];
        let mut weights = vec![0.0f32; size * size];

        for ty in (bbox.ymin..bbox.ymax).step_by(step) {
            for tx in (bbox.xmin..bbox.xmax).step_by(step) {
                let rows = ty..(ty + size).min(bbox.ymax);
                let cols = tx..(tx + size).min(bbox.xmax);

                let touches_mask = rows
                    .clone()
                    .any(|r| cols.clone().any(|c| mask.contains_global(r, c)));
                if !touches_mask {
                    continue;
                }

                weights.iter_mut().for_each(|w| *w = 0.0);
                let mut constrained = false;
                for r in rows.clone() {
                    for c in cols.clone() {
                        if written[(r - bbox.ymin) * bbox.width() + (c - bbox.xmin)] {
                            let i = (r - ty) * size + (c - tx);
                            query[i * channels..(i + 1) * channels].copy_from_slice(target.pixel(r, c));
                            weights[i] = 1.0;
                            constrained = true;
                        }
                    }
                }

                let choice = if constrained {
                    library.nearest(&query, &weights, self.parallel).0
                } else {
                    self.rng.gen_range(0..library.len())
                };

                for r in rows.clone() {
                    for c in cols.clone() {
                        if !mask.contains_global(r, c) {
                            continue;
                        }
                        let src = library.sample(choice, r - ty, c - tx);
                        let idx = (r - bbox.ymin) * bbox.width() + (c - bbox.xmin);
                        let dst = target.pixel_mut(r, c);
                        if written[idx] {
                            for (d, s) in dst.iter_mut().zip(src) {
                                *d = 0.5 * (*d + s);
                            }
                        } else {
                            dst.copy_from_slice(src);
                            written[idx] = true;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn make_seamless_edge(
        &mut self,
        e1: &UvEdge,
        e2: &UvEdge,
        target: &mut Texture,
        example: &Texture,
        params: &PatchParams,
        search: Option<PatchLibrary>,
        debug_level: u32,
    ) -> Result<PatchLibrary, EngineError> {
        let size = Self::check(target, example, params)?;
        if target.is_empty() {
            return Err(EngineError::Failed("target texture is empty".into()));
        }

        let library = match search {
            Some(lib) if lib.is_compatible(example, size, params.libsize) => lib,
            previous => {
                if previous.is_some() {
                    log::debug!("patch library does not match current parameters, rebuilding");
                }
                PatchLibrary::build(example, size, params.libsize, &mut self.rng)
            }
        };

        let (h, w) = (target.height(), target.width());
        let path1 = PixelPath::new(e1, h, w)?;
        let path2 = PixelPath::new(e2, h, w)?;
        let length = path1.length().max(path2.length());
        if length < 1e-9 {
            return Err(EngineError::DegenerateEdge("edge pair has zero length".into()));
        }

        let spacing = (size as f64 / 2.0).max(1.0);
        let samples = ((length / spacing).ceil() as usize).max(1).saturating_add(1);
        let channels = target.channels();
        let half = size as f64 / 2.0;
        let weights = vec![1.0f32; size * size];
        let mut query = vec![0.0f32; size * size * channels];

        for k in 0..samples {
            let t = k as f64 / (samples - 1) as f64;
            let corners = [
                window_origin(path1.point_at(t), half),
                window_origin(path2.point_at(t), half),
            ];

            for dr in 0..size {
                for dc in 0..size {
                    let i = dr * size + dc;
                    for ch in 0..channels {
                        let mut sum = 0.0;
                        for &(r0, c0) in &corners {
                            sum += target.pixel_clamped(r0.saturating_add(dr as isize), c0.saturating_add(dc as isize))[ch];
                        }
                        query[i * channels + ch] = sum / corners.len() as f32;
                    }
                }
            }

            let (best, cost) = library.nearest(&query, &weights, self.parallel);
            if debug_level > 0 {
                log::debug!(
                    "seam sample {}/{}: windows at {:?}, patch #{} (cost {:.4})",
                    k + 1,
                    samples,
                    corners,
                    best,
                    cost
                );
            }

            for &(r0, c0) in &corners {
                for dr in 0..size {
                    for dc in 0..size {
                        let (r, c) = (r0.saturating_add(dr as isize), c0.saturating_add(dc as isize));
                        if r < 0 || c < 0 || r as usize >= h || c as usize >= w {
                            continue;
                        }
                        let dy = dr as f64 + 0.5 - half;
                        let dx = dc as f64 + 0.5 - half;
                        let falloff = (1.0 - (dy * dy + dx * dx).sqrt() / half).max(0.0) as f32;
                        if falloff == 0.0 {
                            continue;
                        }
                        let src = library.sample(best, dr, dc);
                        for (d, s) in target.pixel_mut(r as usize, c as usize).iter_mut().zip(src) {
                            *d = (1.0 - falloff) * *d + falloff * s;
                        }
                    }
                }
            }
        }

        Ok(library)
    }
}

/// Top-left pixel of a window of side `2 * half` centred on `center`.
fn window_origin(center: Point2<f64>, half: f64) -> (isize, isize) {
    ((center.x - half).round() as isize, (center.y - half).round() as isize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::rasterize::{rasterize_islands, UvIsland};

    fn gradient(h: usize, w: usize) -> Texture {
        let data = (0..h * w).map(|i| i as f32 / (h * w) as f32).collect();
        Texture::from_raw(h, w, 1, data).unwrap()
    }

    fn vertical_edge(u: f64) -> UvEdge {
        UvEdge::from_uvs(&[(u, 0.2), (u, 0.8)])
    }

    #[test]
    fn test_patch_size() {
        let example = Texture::new(10, 20, 3);
        assert_eq!(patch_size(&example, 0.5).unwrap(), 5);
        assert_eq!(patch_size(&example, 1.0).unwrap(), 10);
        assert_eq!(patch_size(&example, 0.01).unwrap(), 3);

        assert!(patch_size(&example, 0.0).is_err());
        assert!(patch_size(&example, 1.5).is_err());
        assert!(patch_size(&example, f64::NAN).is_err());
        assert!(patch_size(&Texture::new(0, 4, 1), 0.5).is_err());
    }

    #[test]
    fn test_library_patches_come_from_example() {
        let example = gradient(12, 9);
        let mut rng = StdRng::seed_from_u64(3);
        let library = PatchLibrary::build(&example, 4, 20, &mut rng);

        assert_eq!(library.len(), 20);
        assert_eq!(library.patch_size(), 4);
        for (p, (r0, c0)) in library.origins().enumerate() {
            assert!(r0 + 4 <= 12 && c0 + 4 <= 9);
            assert_eq!(library.sample(p, 1, 2), example.pixel(r0 + 1, c0 + 2));
        }
    }

    #[test]
    fn test_nearest_finds_exact_patch() {
        let example = gradient(16, 16);
        let mut rng = StdRng::seed_from_u64(11);
        let library = PatchLibrary::build(&example, 5, 30, &mut rng);

        let query = library.patches[17].data.clone();
        let weights = vec![1.0; 25];
        let (idx, cost) = library.nearest(&query, &weights, true);
        assert_eq!(cost, 0.0);
        assert_eq!(library.patches[idx].origin, library.patches[17].origin);

        let (seq_idx, _) = library.nearest(&query, &weights, false);
        assert_eq!(idx, seq_idx);
    }

    #[test]
    fn test_fill_writes_only_masked_pixels() {
        let island = UvIsland::from_uvs(&[(0.2, 0.2), (0.7, 0.25), (0.6, 0.8), (0.25, 0.7)]);
        let mask = rasterize_islands(&[island], 40, 40);
        let mut target = Texture::filled(40, 40, 3, -1.0);
        let example = Texture::filled(16, 16, 3, 0.6);

        let mut engine = QuiltEngine::with_seed(5);
        engine
            .fill_area_with_texture(&mut target, &example, &PatchParams::new(0.4, 12), &mask)
            .unwrap();

        for row in 0..40 {
            for col in 0..40 {
                let expected = if mask.contains_global(row, col) { 0.6 } else { -1.0 };
                for &v in target.pixel(row, col) {
                    assert!((v - expected).abs() < 1e-6, "pixel ({}, {}) = {}", row, col, v);
                }
            }
        }
    }

    #[test]
    fn test_fill_values_stay_in_example_range() {
        let mask = rasterize_islands(&[UvIsland::from_uvs(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])], 30, 30);
        let mut target = Texture::new(30, 30, 1);
        let example = gradient(20, 20);
        let (lo, hi) = example.value_range().unwrap();

        QuiltEngine::with_seed(9)
            .fill_area_with_texture(&mut target, &example, &PatchParams::new(0.3, 25), &mask)
            .unwrap();

        for &v in target.as_slice() {
            assert!(v >= lo && v <= hi);
        }
    }

    #[test]
    fn test_fill_is_deterministic_for_seed() {
        let mask = rasterize_islands(&[UvIsland::from_uvs(&[(0.1, 0.1), (0.9, 0.2), (0.5, 0.9)])], 32, 32);
        let example = gradient(16, 16);
        let params = PatchParams::new(0.4, 20);

        let mut a = Texture::new(32, 32, 1);
        let mut b = Texture::new(32, 32, 1);
        QuiltEngine::with_seed(21).fill_area_with_texture(&mut a, &example, &params, &mask).unwrap();
        QuiltEngine::with_seed(21)
            .with_parallel(false)
            .fill_area_with_texture(&mut b, &example, &params, &mask)
            .unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_fill_rejects_channel_mismatch() {
        let mask = rasterize_islands(&[UvIsland::from_uvs(&[(0.1, 0.1), (0.9, 0.1), (0.5, 0.9)])], 8, 8);
        let err = QuiltEngine::with_seed(0)
            .fill_area_with_texture(&mut Texture::new(8, 8, 3), &Texture::new(8, 8, 1), &PatchParams::new(0.5, 4), &mask)
            .unwrap_err();
        assert!(matches!(err, EngineError::ChannelMismatch { target: 3, example: 1 }));
    }

    #[test]
    fn test_zero_libsize_is_rejected() {
        let mask = rasterize_islands(&[UvIsland::from_uvs(&[(0.1, 0.1), (0.9, 0.1), (0.5, 0.9)])], 8, 8);
        let err = QuiltEngine::with_seed(0)
            .fill_area_with_texture(&mut Texture::new(8, 8, 1), &Texture::new(8, 8, 1), &PatchParams::new(0.5, 0), &mask)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { name: "libsize", .. }));
    }

    #[test]
    fn test_seam_blends_both_sides() {
        let mut target = Texture::new(40, 40, 1);
        let example = Texture::filled(10, 10, 1, 0.8);
        let params = PatchParams::new(0.5, 6);

        let mut engine = QuiltEngine::with_seed(1);
        engine
            .make_seamless_edge(&vertical_edge(0.25), &vertical_edge(0.75), &mut target, &example, &params, None, 0)
            .unwrap();

        // Edge starts sit at pixel (8, 10) and (8, 30); the patch centre lands on them.
        assert!((target.pixel(8, 10)[0] - 0.8).abs() < 1e-6);
        assert!((target.pixel(8, 30)[0] - 0.8).abs() < 1e-6);
        assert!(target.pixel(20, 10)[0] > 0.0);
        assert!(target.pixel(20, 30)[0] > 0.0);
        // Far from both edges nothing changes.
        assert_eq!(target.pixel(20, 20)[0], 0.0);
        assert_eq!(target.pixel(2, 2)[0], 0.0);
    }

    #[test]
    fn test_seam_library_is_reused() {
        let mut target = gradient(32, 32);
        let example = gradient(16, 16);
        let params = PatchParams::new(0.3, 10);
        let mut engine = QuiltEngine::with_seed(4);

        let first = engine
            .make_seamless_edge(&vertical_edge(0.2), &vertical_edge(0.8), &mut target, &example, &params, None, 0)
            .unwrap();
        let origins: Vec<_> = first.origins().collect();

        let second = engine
            .make_seamless_edge(&vertical_edge(0.3), &vertical_edge(0.7), &mut target, &example, &params, Some(first), 1)
            .unwrap();
        assert_eq!(second.origins().collect::<Vec<_>>(), origins);
    }

    #[test]
    fn test_seam_library_rebuilt_on_parameter_change() {
        let mut target = gradient(32, 32);
        let example = gradient(16, 16);
        let mut engine = QuiltEngine::with_seed(4);

        let first = engine
            .make_seamless_edge(&vertical_edge(0.2), &vertical_edge(0.8), &mut target, &example, &PatchParams::new(0.3, 10), None, 0)
            .unwrap();
        let second = engine
            .make_seamless_edge(&vertical_edge(0.2), &vertical_edge(0.8), &mut target, &example, &PatchParams::new(0.6, 10), Some(first), 0)
            .unwrap();

        assert_eq!(second.patch_size(), 10);
    }

    #[test]
    fn test_seam_rejects_degenerate_edges() {
        let mut target = Texture::new(16, 16, 1);
        let example = Texture::new(8, 8, 1);
        let params = PatchParams::new(0.5, 4);
        let mut engine = QuiltEngine::with_seed(0);

        let single = UvEdge::from_uvs(&[(0.5, 0.5)]);
        let err = engine
            .make_seamless_edge(&single, &vertical_edge(0.5), &mut target, &example, &params, None, 0)
            .unwrap_err();
        assert!(matches!(err, EngineError::DegenerateEdge(_)));

        let point = UvEdge::from_uvs(&[(0.5, 0.5), (0.5, 0.5)]);
        let err = engine
            .make_seamless_edge(&point, &point, &mut target, &example, &params, None, 0)
            .unwrap_err();
        assert!(matches!(err, EngineError::DegenerateEdge(_)));
    }

    #[test]
    fn test_seam_rejects_edges_far_outside_texture() {
        let mut target = Texture::new(16, 16, 1);
        let example = Texture::new(8, 8, 1);
        let params = PatchParams::new(0.5, 4);
        let mut engine = QuiltEngine::with_seed(0);

        for far in [1e20, -5.0, 2.5] {
            let edge = UvEdge::from_uvs(&[(0.0, 0.0), (far, 0.0)]);
            let err = engine
                .make_seamless_edge(&edge, &vertical_edge(0.5), &mut target, &example, &params, None, 0)
                .unwrap_err();
            assert!(matches!(err, EngineError::DegenerateEdge(_)), "edge to {}", far);
        }
        assert_eq!(target, Texture::new(16, 16, 1));

        // Edges just past the border still run.
        let edge = UvEdge::from_uvs(&[(-0.5, 0.2), (1.5, 0.2)]);
        engine
            .make_seamless_edge(&edge, &vertical_edge(0.5), &mut target, &example, &params, None, 0)
            .unwrap();
    }

    #[test]
    fn test_pixel_path_point_at() {
        let edge = UvEdge::from_uvs(&[(0.0, 0.0), (0.5, 0.0), (0.5, 0.5)]);
        let path = PixelPath::new(&edge, 10, 10).unwrap();

        assert!((path.length() - 10.0).abs() < 1e-12);
        assert_eq!(path.point_at(0.0), Point2::new(0.0, 0.0));
        assert_eq!(path.point_at(0.5), Point2::new(0.0, 5.0));
        assert_eq!(path.point_at(1.0), Point2::new(5.0, 5.0));
        assert_eq!(path.point_at(0.75), Point2::new(2.5, 5.0));
    }
}
