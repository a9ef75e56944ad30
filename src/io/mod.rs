//! Record and image file I/O.
//!
//! # Supported Formats
//!
//! | Kind | Format | Extension | Load | Save |
//! |------|--------|-----------|------|------|
//! | Record | bincode | `.bin`, `.rec` | ✓ | ✓ |
//! | Record | JSON | `.json` | ✓ | ✓ |
//! | Texture | PNG / JPEG | `.png`, `.jpg`, `.jpeg` | ✓ | ✓ |
//!
//! # Usage
//!
//! ```no_run
//! use seamweave::engine::UvEdge;
//! use seamweave::io::{load_record, save_texture};
//! use seamweave::io::record::SynthesisRecord;
//!
//! let record: SynthesisRecord<UvEdge> = load_record("uv_test_island.bin").unwrap();
//! let job = record.into_job().unwrap();
//! save_texture(&job.example, "example.png").unwrap();
//! ```

pub mod image_file;
pub mod record;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SynthError};

pub use image_file::{load_texture, save_texture};
pub use record::SynthesisRecord;

/// Supported record file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// bincode binary encoding.
    Bincode,
    /// JSON text.
    Json,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "bin" | "rec" => Some(Format::Bincode),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

fn detect(path: &Path) -> Result<Format> {
    Format::from_path(path).ok_or_else(|| SynthError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a synthesis record with automatic format detection.
///
/// The format is determined by the file extension.
pub fn load_record<P: AsRef<Path>, E: DeserializeOwned>(path: P) -> Result<SynthesisRecord<E>> {
    let path = path.as_ref();
    let format = detect(path)?;
    let reader = BufReader::new(File::open(path)?);

    let load_error = |message: String| SynthError::LoadError {
        path: path.to_path_buf(),
        message,
    };

    match format {
        Format::Bincode => bincode::deserialize_from(reader).map_err(|e| load_error(e.to_string())),
        Format::Json => serde_json::from_reader(reader).map_err(|e| load_error(e.to_string())),
    }
}

/// Save a synthesis record with automatic format detection.
///
/// The format is determined by the file extension.
pub fn save_record<P: AsRef<Path>, E: Serialize>(record: &SynthesisRecord<E>, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = detect(path)?;
    let mut writer = BufWriter::new(File::create(path)?);

    let save_error = |message: String| SynthError::SaveError {
        path: path.to_path_buf(),
        message,
    };

    match format {
        Format::Bincode => bincode::serialize_into(&mut writer, record).map_err(|e| save_error(e.to_string()))?,
        Format::Json => serde_json::to_writer(&mut writer, record).map_err(|e| save_error(e.to_string()))?,
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::rasterize::UvIsland;
    use crate::engine::{EdgePair, UvEdge};
    use crate::texture::Texture;

    fn record() -> SynthesisRecord<UvEdge> {
        SynthesisRecord {
            target: Some(Texture::new(3, 5, 3)),
            example: Some(Texture::filled(2, 2, 3, 0.25)),
            patch_ratio: Some(0.3),
            libsize: Some(10),
            island_uvs: Some(vec![UvIsland::from_uvs(&[(0.1, 0.1), (0.9, 0.1), (0.5, 0.9)])]),
            edge_infos: Some(vec![EdgePair::new(
                UvEdge::from_uvs(&[(0.1, 0.1), (0.9, 0.1)]),
                UvEdge::from_uvs(&[(0.1, 0.9), (0.5, 0.95), (0.9, 0.9)]),
            )]),
        }
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path("a/b.bin"), Some(Format::Bincode));
        assert_eq!(Format::from_path("a/b.REC"), Some(Format::Bincode));
        assert_eq!(Format::from_path("b.json"), Some(Format::Json));
        assert_eq!(Format::from_path("b.pickle"), None);
        assert_eq!(Format::from_path("noext"), None);
    }

    #[test]
    fn test_bincode_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.bin");

        save_record(&record(), &path).unwrap();
        let loaded: SynthesisRecord<UvEdge> = load_record(&path).unwrap();
        assert_eq!(loaded, record());
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");

        save_record(&record(), &path).unwrap();
        let loaded: SynthesisRecord<UvEdge> = load_record(&path).unwrap();
        assert_eq!(loaded, record());
    }

    #[test]
    fn test_partial_json_file_loads_then_reports_missing_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{"patch_ratio": 0.3, "libsize": 10}"#).unwrap();

        let loaded: SynthesisRecord<UvEdge> = load_record(&path).unwrap();
        assert_eq!(loaded.patch_ratio, Some(0.3));
        assert_eq!(loaded.edge_infos, None);
        assert!(matches!(loaded.into_job(), Err(SynthError::Configuration { field: "target" })));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_record(&record(), dir.path().join("record.pickle")).unwrap_err();
        assert!(matches!(err, SynthError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_corrupt_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_record::<_, UvEdge>(&path).unwrap_err();
        assert!(matches!(err, SynthError::LoadError { .. }));
    }
}
