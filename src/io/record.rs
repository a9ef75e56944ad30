//! Persisted synthesis records.
//!
//! A record bundles everything a run needs: target and example textures, patch
//! parameters, the target's UV islands and the edge pairs to repair. Every
//! field is optional on disk; [`SynthesisRecord::into_job`] reports the first
//! one that is missing.

use serde::{Deserialize, Serialize};

use crate::algo::pipeline::SynthesisJob;
use crate::algo::rasterize::UvIsland;
use crate::engine::{EdgePair, PatchParams};
use crate::error::{Result, SynthError};
use crate::texture::Texture;

/// Serialized input of a synthesis run.
///
/// Absent fields deserialize as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRecord<E> {
    /// Texture to synthesize into.
    pub target: Option<Texture>,

    /// Example texture to sample from.
    pub example: Option<Texture>,

    /// Patch size as a fraction of the example's smaller dimension.
    pub patch_ratio: Option<f64>,

    /// Maximum number of candidate patches.
    pub libsize: Option<usize>,

    /// UV islands of the target surface.
    pub island_uvs: Option<Vec<UvIsland>>,

    /// Edge pairs to make seamless.
    pub edge_infos: Option<Vec<EdgePair<E>>>,
}

impl<E> Default for SynthesisRecord<E> {
    fn default() -> Self {
        Self {
            target: None,
            example: None,
            patch_ratio: None,
            libsize: None,
            island_uvs: None,
            edge_infos: None,
        }
    }
}

impl<E> From<SynthesisJob<E>> for SynthesisRecord<E> {
    fn from(job: SynthesisJob<E>) -> Self {
        Self {
            target: Some(job.target),
            example: Some(job.example),
            patch_ratio: Some(job.params.patch_ratio),
            libsize: Some(job.params.libsize),
            island_uvs: Some(job.island_uvs),
            edge_infos: Some(job.edge_infos),
        }
    }
}

impl<E> SynthesisRecord<E> {
    /// Validate that every field is present and build a job.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::Configuration`] naming the first missing field, in
    /// the order `target`, `example`, `patch_ratio`, `libsize`, `island_uvs`,
    /// `edge_infos`.
    pub fn into_job(self) -> Result<SynthesisJob<E>> {
        let target = self.target.ok_or(SynthError::Configuration { field: "target" })?;
        let example = self.example.ok_or(SynthError::Configuration { field: "example" })?;
        let patch_ratio = self
            .patch_ratio
            .ok_or(SynthError::Configuration { field: "patch_ratio" })?;
        let libsize = self.libsize.ok_or(SynthError::Configuration { field: "libsize" })?;
        let island_uvs = self
            .island_uvs
            .ok_or(SynthError::Configuration { field: "island_uvs" })?;
        let edge_infos = self
            .edge_infos
            .ok_or(SynthError::Configuration { field: "edge_infos" })?;

        Ok(SynthesisJob {
            target,
            example,
            params: PatchParams::new(patch_ratio, libsize),
            island_uvs,
            edge_infos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::UvEdge;

    fn complete() -> SynthesisRecord<UvEdge> {
        SynthesisRecord {
            target: Some(Texture::new(4, 4, 3)),
            example: Some(Texture::filled(2, 2, 3, 0.5)),
            patch_ratio: Some(0.3),
            libsize: Some(10),
            island_uvs: Some(vec![UvIsland::from_uvs(&[(0.1, 0.1), (0.9, 0.1), (0.5, 0.9)])]),
            edge_infos: Some(vec![EdgePair::new(
                UvEdge::from_uvs(&[(0.1, 0.1), (0.9, 0.1)]),
                UvEdge::from_uvs(&[(0.1, 0.9), (0.9, 0.9)]),
            )]),
        }
    }

    #[test]
    fn test_into_job() {
        let job = complete().into_job().unwrap();
        assert_eq!(job.params, PatchParams::new(0.3, 10));
        assert_eq!(job.island_uvs.len(), 1);
        assert_eq!(job.edge_infos.len(), 1);
        assert_eq!(job.target.shape(), (4, 4, 3));
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let expect_missing = |record: SynthesisRecord<UvEdge>, field: &str| match record.into_job() {
            Err(SynthError::Configuration { field: f }) => assert_eq!(f, field),
            other => panic!("expected missing {}, got {:?}", field, other.map(|_| ())),
        };

        expect_missing(SynthesisRecord::default(), "target");

        let mut r = complete();
        r.example = None;
        r.edge_infos = None;
        expect_missing(r, "example");

        let mut r = complete();
        r.libsize = None;
        expect_missing(r, "libsize");

        let mut r = complete();
        r.edge_infos = None;
        expect_missing(r, "edge_infos");
    }

    #[test]
    fn test_json_with_missing_field() {
        let json = r#"{
            "target": {"height": 1, "width": 1, "channels": 1, "data": [0.0]},
            "example": {"height": 1, "width": 1, "channels": 1, "data": [1.0]},
            "patch_ratio": 0.5,
            "island_uvs": [[[0.1, 0.1], [0.9, 0.1], [0.5, 0.9]]],
            "edge_infos": []
        }"#;
        let record: SynthesisRecord<UvEdge> = serde_json::from_str(json).unwrap();
        assert!(matches!(record.into_job(), Err(SynthError::Configuration { field: "libsize" })));
    }

    #[test]
    fn test_job_round_trip() {
        let record = complete();
        let back: SynthesisRecord<UvEdge> = record.clone().into_job().unwrap().into();
        assert_eq!(back, record);
    }
}
