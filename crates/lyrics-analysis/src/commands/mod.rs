//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;

use lyrics_analysis_core::{AnalysisError, LyricsPayload, check_input_size};

pub mod analyze;
pub mod cloud;
pub mod info;
pub mod query;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod tracks;

/// Read a file and validate its size against the configured limit.
///
/// The size is checked from metadata before the file is read into memory.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    check_input_size(size, max_bytes).with_context(|| format!("cannot analyze {path}"))?;

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

/// Read and decode a lyrics payload file.
///
/// A payload without a lyrics body is reported as "no lyrics found".
pub fn read_payload(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<LyricsPayload> {
    let content = read_input_file(path, max_bytes)?;
    match LyricsPayload::from_json(&content) {
        Ok(payload) => Ok(payload),
        Err(AnalysisError::InvalidPayload(reason)) => {
            tracing::debug!(%path, %reason, "payload rejected");
            anyhow::bail!("no lyrics found for {path}")
        }
        Err(err) => Err(err).with_context(|| format!("failed to decode {path}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn write_temp(dir: &tempfile::TempDir, name: &str, content: &str) -> Utf8PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        Utf8PathBuf::try_from(path).unwrap()
    }

    #[test]
    fn rejects_oversized_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_temp(&dir, "big.json", "0123456789");
        let err = read_input_file(&path, Some(4)).unwrap_err();
        assert!(format!("{err:#}").contains("input too large"));
        assert!(read_input_file(&path, None).is_ok());
    }

    #[test]
    fn missing_lyrics_body_is_no_lyrics() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_temp(&dir, "empty.json", "{}");
        let err = read_payload(&path, None).unwrap_err();
        assert_eq!(err.to_string(), format!("no lyrics found for {path}"));
    }

    #[test]
    fn decodes_payload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_temp(&dir, "ok.json", r#"{"lyrics": {"lines": [{"words": "hi"}]}}"#);
        let payload = read_payload(&path, None).unwrap();
        assert_eq!(payload.lyrics.lines.len(), 1);
    }
}
