//! Persistence of the fitted pipeline.
//!
//! The artifact file is a small header followed by a bincode payload:
//!
//! ```text
//! +-------+---------+----------+------------------+
//! | magic | version | crc32    | bincode payload  |
//! | 4 B   | u32 LE  | u32 LE   | ...              |
//! +-------+---------+----------+------------------+
//! ```
//!
//! The checksum covers the payload only. Loading verifies magic, version,
//! and checksum before deserializing, so a truncated or foreign file fails
//! loudly instead of producing a half-broken pipeline.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{MaydayError, Result};
use crate::ml::pipeline::{ClassificationPipeline, Model};

/// Magic bytes identifying a Mayday model artifact.
const MAGIC: &[u8; 4] = b"MAYD";

/// Current artifact format version.
const FORMAT_VERSION: u32 = 1;

/// Serialize a fitted pipeline to `path`.
///
/// The file is written once and never mutated in place; serving processes
/// load it read-only. Fails if the pipeline is untrained or the path is
/// unwritable.
pub fn save_model(pipeline: &ClassificationPipeline, path: &Path) -> Result<()> {
    if !pipeline.is_trained() {
        return Err(MaydayError::artifact(
            "Refusing to persist an untrained pipeline",
        ));
    }

    let payload = bincode::serialize(pipeline)?;
    let checksum = crc32fast::hash(&payload);

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(MAGIC)?;
    writer.write_u32::<LittleEndian>(FORMAT_VERSION)?;
    writer.write_u32::<LittleEndian>(checksum)?;
    writer.write_all(&payload)?;
    writer.flush()?;

    tracing::info!(path = %path.display(), bytes = payload.len(), "saved model artifact");
    Ok(())
}

/// Load a fitted pipeline from `path`.
///
/// Exact inverse of [`save_model`]; the analyzer chain is reconstructed on
/// load, everything else comes from the payload.
pub fn load_model(path: &Path) -> Result<ClassificationPipeline> {
    let mut reader = BufReader::new(File::open(path)?);

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(MaydayError::artifact(format!(
            "{} is not a Mayday model artifact",
            path.display()
        )));
    }

    let version = reader.read_u32::<LittleEndian>()?;
    if version != FORMAT_VERSION {
        return Err(MaydayError::artifact(format!(
            "Unsupported artifact version {version}, expected {FORMAT_VERSION}"
        )));
    }

    let expected_checksum = reader.read_u32::<LittleEndian>()?;
    let mut payload = Vec::new();
    reader.read_to_end(&mut payload)?;

    let checksum = crc32fast::hash(&payload);
    if checksum != expected_checksum {
        return Err(MaydayError::artifact(format!(
            "Checksum mismatch in {}: expected {expected_checksum:08x}, got {checksum:08x}",
            path.display()
        )));
    }

    let pipeline: ClassificationPipeline = bincode::deserialize(&payload)?;
    tracing::debug!(path = %path.display(), "loaded model artifact");
    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::test_util::toy_corpus;

    fn trained_pipeline() -> ClassificationPipeline {
        let (messages, labels, categories) = toy_corpus();
        let mut pipeline = ClassificationPipeline::new(categories);
        pipeline.fit(&messages, &labels).unwrap();
        pipeline
    }

    #[test]
    fn test_round_trip_preserves_predictions() {
        let pipeline = trained_pipeline();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.mayday");

        save_model(&pipeline, &path).unwrap();
        let loaded = load_model(&path).unwrap();

        assert_eq!(loaded.category_names(), pipeline.category_names());
        assert_eq!(
            loaded.predict_message("there is a fire").unwrap(),
            pipeline.predict_message("there is a fire").unwrap()
        );
    }

    #[test]
    fn test_untrained_pipeline_is_not_persisted() {
        let pipeline = ClassificationPipeline::new(vec!["water".to_string()]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.mayday");

        assert!(save_model(&pipeline, &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_path_fails() {
        let pipeline = trained_pipeline();
        let result = save_model(&pipeline, Path::new("/nonexistent/dir/classifier.mayday"));
        assert!(result.is_err());
    }

    #[test]
    fn test_foreign_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a-model");
        std::fs::write(&path, b"definitely not an artifact").unwrap();

        assert!(load_model(&path).is_err());
    }

    #[test]
    fn test_corrupted_payload_rejected() {
        let pipeline = trained_pipeline();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.mayday");
        save_model(&pipeline, &path).unwrap();

        // Flip a byte in the payload
        let mut bytes = std::fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        std::fs::write(&path, &bytes).unwrap();

        assert!(load_model(&path).is_err());
    }
}
