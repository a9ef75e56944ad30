//! Recording engine used by the orchestration tests.

use super::{EngineError, PatchParams, SynthesisEngine};
use crate::algo::rasterize::{BoundingBox, IslandMask};
use crate::texture::Texture;

/// Opaque handle handed out by [`RecordingEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Handle(pub u64);

/// A recorded fill call.
#[derive(Debug, Clone)]
pub(crate) struct FillCall {
    pub bbox: BoundingBox,
    pub mask: IslandMask,
    pub params: PatchParams,
}

/// A recorded seam call.
#[derive(Debug, Clone)]
pub(crate) struct SeamCall {
    pub e1: usize,
    pub e2: usize,
    pub incoming: Option<Handle>,
    pub returned: Option<Handle>,
    pub debug_level: u32,
}

/// Engine that records its calls and paints the pixels it touches.
///
/// Fill writes `fill_value` into every covered pixel. Each seam call writes
/// `e1 + 1` into the first channel of pixel `(0, 0)` and returns a fresh handle.
#[derive(Debug, Default)]
pub(crate) struct RecordingEngine {
    pub fill_value: f32,
    pub fail_fill: bool,
    pub fail_at_edge: Option<usize>,
    pub fills: Vec<FillCall>,
    pub seams: Vec<SeamCall>,
    next_handle: u64,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self {
            fill_value: 1.0,
            next_handle: 100,
            ..Self::default()
        }
    }
}

impl SynthesisEngine for RecordingEngine {
    type Edge = usize;
    type SearchState = Handle;

    fn fill_area_with_texture(
        &mut self,
        target: &mut Texture,
        _example: &Texture,
        params: &PatchParams,
        mask: &IslandMask,
    ) -> Result<(), EngineError> {
        self.fills.push(FillCall {
            bbox: mask.bounding_box(),
            mask: mask.clone(),
            params: *params,
        });
        if self.fail_fill {
            return Err(EngineError::Failed("fill rejected".into()));
        }
        for (row, col) in mask.covered_pixels() {
            for v in target.pixel_mut(row, col) {
                *v = self.fill_value;
            }
        }
        Ok(())
    }

    fn make_seamless_edge(
        &mut self,
        e1: &usize,
        e2: &usize,
        target: &mut Texture,
        _example: &Texture,
        _params: &PatchParams,
        search: Option<Handle>,
        debug_level: u32,
    ) -> Result<Handle, EngineError> {
        let index = self.seams.len();
        let mut call = SeamCall {
            e1: *e1,
            e2: *e2,
            incoming: search,
            returned: None,
            debug_level,
        };
        if self.fail_at_edge == Some(index) {
            self.seams.push(call);
            return Err(EngineError::DegenerateEdge(format!("edge {} has zero length", e1)));
        }

        target.pixel_mut(0, 0)[0] = (*e1 + 1) as f32;

        let handle = Handle(self.next_handle);
        self.next_handle += 1;
        call.returned = Some(handle);
        self.seams.push(call);
        Ok(handle)
    }
}
