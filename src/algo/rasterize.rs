//! Rasterization of UV islands into pixel masks.
//!
//! UV islands are closed polygon loops in normalized `[0, 1]` UV space. To fill
//! them with texture, the islands are mapped into the pixel grid of the target
//! texture and rasterized into an [`IslandMask`] cropped to their combined
//! [`BoundingBox`].
//!
//! # Conventions
//!
//! - A UV point `(u, v)` maps to pixel coordinates `(row, col) = (v * height, u * width)`.
//! - The bounding box is `floor(min) - 1 .. ceil(max) + 1` on each axis, computed
//!   jointly over all islands and clamped to the canvas.
//! - Pixel `(r, c)` is covered when its centre `(r + 0.5, c + 0.5)` lies inside
//!   the polygon under the even-odd rule. Crossings are half-open, so two islands
//!   sharing an edge cover the pixels along it exactly once between them.
//!
//! # Example
//!
//! ```
//! use seamweave::algo::rasterize::{rasterize_islands, UvIsland};
//!
//! let square = UvIsland::from_uvs(&[(0.1, 0.1), (0.9, 0.1), (0.9, 0.9), (0.1, 0.9)]);
//! let mask = rasterize_islands(&[square], 50, 50);
//!
//! let bbox = mask.bounding_box();
//! assert_eq!((bbox.ymin, bbox.xmin, bbox.ymax, bbox.xmax), (4, 4, 46, 46));
//! assert_eq!(mask.count(), 40 * 40);
//! ```

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::texture::Texture;

/// Winding direction of a UV island.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Positive signed area in UV space.
    CounterClockwise,
    /// Negative signed area in UV space.
    Clockwise,
    /// Zero area, or fewer than three vertices.
    Degenerate,
}

/// A closed polygon loop in normalized UV space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UvIsland {
    points: Vec<Point2<f64>>,
}

impl UvIsland {
    /// Create an island from its UV vertices. The loop is closed implicitly.
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        Self { points }
    }

    /// Create an island from `(u, v)` tuples.
    pub fn from_uvs(uvs: &[(f64, f64)]) -> Self {
        Self::new(uvs.iter().map(|&(u, v)| Point2::new(u, v)).collect())
    }

    /// Get the UV vertices.
    #[inline]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the island has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Check that every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Signed area in UV space (shoelace formula).
    ///
    /// Positive for counter-clockwise loops.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice_area = 0.0;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            twice_area += p.x * q.y - q.x * p.y;
        }
        0.5 * twice_area
    }

    /// Winding direction of the loop.
    pub fn orientation(&self) -> Orientation {
        let area = self.signed_area();
        if area > 0.0 {
            Orientation::CounterClockwise
        } else if area < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::Degenerate
        }
    }

    /// Map the island into pixel space for a `height x width` canvas.
    ///
    /// Returned points are `(row, col)`: `x` holds the row, `y` the column.
    pub fn to_pixel_space(&self, height: usize, width: usize) -> Vec<Point2<f64>> {
        self.points
            .iter()
            .map(|uv| uv_to_pixel(*uv, height, width))
            .collect()
    }
}

/// Map a UV coordinate to `(row, col)` pixel coordinates.
///
/// The axes are swapped: `v` selects the row and `u` the column.
#[inline]
pub fn uv_to_pixel(uv: Point2<f64>, height: usize, width: usize) -> Point2<f64> {
    Point2::new(uv.y * height as f64, uv.x * width as f64)
}

/// Axis-aligned pixel rectangle, min inclusive and max exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// First row.
    pub ymin: usize,
    /// First column.
    pub xmin: usize,
    /// One past the last row.
    pub ymax: usize,
    /// One past the last column.
    pub xmax: usize,
}

impl BoundingBox {
    /// Create a bounding box from `(ymin, xmin, ymax, xmax)`.
    pub fn new(ymin: usize, xmin: usize, ymax: usize, xmax: usize) -> Self {
        Self {
            ymin,
            xmin,
            ymax: ymax.max(ymin),
            xmax: xmax.max(xmin),
        }
    }

    /// Number of rows covered.
    #[inline]
    pub fn height(&self) -> usize {
        self.ymax - self.ymin
    }

    /// Number of columns covered.
    #[inline]
    pub fn width(&self) -> usize {
        self.xmax - self.xmin
    }

    /// Check if the box covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    /// Check whether a pixel lies inside the box.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.ymin && row < self.ymax && col >= self.xmin && col < self.xmax
    }

    /// `(ymin, xmin, ymax, xmax)`.
    pub fn as_tuple(&self) -> (usize, usize, usize, usize) {
        (self.ymin, self.xmin, self.ymax, self.xmax)
    }
}

/// Boolean coverage mask cropped to a bounding box.
///
/// Local coordinate `(r, c)` corresponds to canvas pixel
/// `(bbox.ymin + r, bbox.xmin + c)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IslandMask {
    bbox: BoundingBox,
    data: Vec<bool>,
}

impl IslandMask {
    /// Create an all-false mask covering `bbox`.
    pub fn empty(bbox: BoundingBox) -> Self {
        Self {
            bbox,
            data: vec![false; bbox.height() * bbox.width()],
        }
    }

    /// The canvas region the mask covers.
    #[inline]
    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    /// Number of mask rows (equals the bounding box height).
    #[inline]
    pub fn height(&self) -> usize {
        self.bbox.height()
    }

    /// Number of mask columns (equals the bounding box width).
    #[inline]
    pub fn width(&self) -> usize {
        self.bbox.width()
    }

    /// Get the value at local coordinates.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> bool {
        self.data[r * self.bbox.width() + c]
    }

    #[inline]
    fn set(&mut self, r: usize, c: usize) {
        let w = self.bbox.width();
        self.data[r * w + c] = true;
    }

    /// Check coverage of a canvas pixel. Pixels outside the box are uncovered.
    #[inline]
    pub fn contains_global(&self, row: usize, col: usize) -> bool {
        self.bbox.contains(row, col) && self.get(row - self.bbox.ymin, col - self.bbox.xmin)
    }

    /// Number of covered pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    /// Check if no pixel is covered.
    pub fn is_empty(&self) -> bool {
        !self.data.iter().any(|&b| b)
    }

    /// Get the raw row-major values.
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    /// Iterate over covered pixels in canvas coordinates.
    pub fn covered_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.bbox.width();
        let (y0, x0) = (self.bbox.ymin, self.bbox.xmin);
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(move |(i, _)| (y0 + i / w, x0 + i % w))
    }

    /// Render the mask as a single-channel texture (1.0 covered, 0.0 not).
    pub fn to_texture(&self) -> Texture {
        let mut tex = Texture::new(self.height(), self.width(), 1);
        for (dst, &covered) in tex.as_mut_slice().iter_mut().zip(&self.data) {
            *dst = if covered { 1.0 } else { 0.0 };
        }
        tex
    }
}

/// Compute the combined bounding box of a set of islands on a `height x width` canvas.
///
/// All vertices of all islands with finite coordinates contribute, including
/// islands too small to rasterize. Returns an empty box when no vertex
/// contributes or the islands lie entirely outside the canvas.
pub fn island_bounding_box(islands: &[UvIsland], height: usize, width: usize) -> BoundingBox {
    let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);

    for island in islands.iter().filter(|isl| isl.is_finite()) {
        for px in island.to_pixel_space(height, width) {
            min.x = min.x.min(px.x);
            min.y = min.y.min(px.y);
            max.x = max.x.max(px.x);
            max.y = max.y.max(px.y);
        }
    }

    if !min.x.is_finite() {
        return BoundingBox::default();
    }

    let clamp = |v: f64, hi: usize| -> usize { v.max(0.0).min(hi as f64) as usize };
    let ymin = clamp(min.x.floor() - 1.0, height);
    let xmin = clamp(min.y.floor() - 1.0, width);
    let ymax = clamp(max.x.ceil() + 1.0, height);
    let xmax = clamp(max.y.ceil() + 1.0, width);

    BoundingBox::new(ymin, xmin, ymax, xmax)
}

/// Rasterize a set of UV islands onto a `height x width` canvas.
///
/// Returns the union of all island coverages, cropped to the combined
/// bounding box. Islands with fewer than three vertices, zero area or
/// non-finite coordinates contribute no pixels.
pub fn rasterize_islands(islands: &[UvIsland], height: usize, width: usize) -> IslandMask {
    let bbox = island_bounding_box(islands, height, width);
    let mut mask = IslandMask::empty(bbox);
    if bbox.is_empty() {
        return mask;
    }

    let mut crossings = Vec::new();
    for island in islands {
        if island.len() < 3 {
            continue;
        }
        if !island.is_finite() {
            log::warn!("skipping UV island with non-finite coordinates");
            continue;
        }
        let polygon = island.to_pixel_space(height, width);
        fill_polygon(&polygon, &mut mask, &mut crossings);
    }

    mask
}

/// Scanline even-odd fill of one pixel-space polygon, OR-ed into `mask`.
fn fill_polygon(polygon: &[Point2<f64>], mask: &mut IslandMask, crossings: &mut Vec<f64>) {
    let bbox = mask.bounding_box();
    let n = polygon.len();

    for row in bbox.ymin..bbox.ymax {
        let y = row as f64 + 0.5;

        crossings.clear();
        for i in 0..n {
            let p = polygon[i];
            let q = polygon[(i + 1) % n];
            if (p.x > y) != (q.x > y) {
                let t = (y - p.x) / (q.x - p.x);
                crossings.push(p.y + t * (q.y - p.y));
            }
        }
        if crossings.len() < 2 {
            continue;
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for span in crossings.chunks_exact(2) {
            // Columns whose centre c + 0.5 lies in [span[0], span[1]).
            let start = (span[0] - 0.5).ceil().max(bbox.xmin as f64);
            let end = (span[1] - 0.5).ceil().min(bbox.xmax as f64);
            if end <= start {
                continue;
            }
            for col in start as usize..end as usize {
                mask.set(row - bbox.ymin, col - bbox.xmin);
            }
        }
    }
}
