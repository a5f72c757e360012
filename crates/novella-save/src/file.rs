//! Reading and writing save files.

use std::path::Path;

use crate::codec::{decode, encode};
use crate::error::{Result, SaveError};
use crate::scene::SaveData;

/// Encode `data` and write it to `path`, replacing any existing file.
pub fn write_save_file(path: impl AsRef<Path>, data: &SaveData) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(data)?;

    std::fs::write(path, &bytes).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Read and decode the save file at `path`.
pub fn read_save_file(path: impl AsRef<Path>) -> Result<SaveData> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let data = decode(&bytes)?;

    if !data.is_consistent() {
        tracing::warn!(
            "{}: recent scene {} is not the last read scene",
            path.display(),
            data.recent_scene
        );
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::scene::Scene;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("novella-save-{}-{name}", std::process::id()))
    }

    #[test]
    fn written_file_reads_back() {
        let path = temp_path("roundtrip.data");
        let mut data = SaveData::new();
        data.record_visit(Scene::new(1, 1, 1));
        data.record_visit(Scene::new(1, 1, 2));

        write_save_file(&path, &data).unwrap();
        let read = read_save_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(read, data);
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = temp_path("missing.data");
        let err = read_save_file(&path).unwrap_err();
        assert!(matches!(
            err,
            SaveError::Io { ref source, .. } if source.kind() == std::io::ErrorKind::NotFound
        ));
    }

    #[test]
    fn zero_length_file_is_decode_error() {
        let path = temp_path("empty.data");
        std::fs::write(&path, b"").unwrap();
        let err = read_save_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, SaveError::Decode(DecodeError::Empty)));
    }
}
