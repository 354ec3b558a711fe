use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::aggregate::aggregate;
use crate::types::{SessionRecord, SummaryBundle};

/// Everything that can go wrong while turning a session log into a bundle.
/// All three variants are recoverable at the UI boundary: the caller keeps
/// its previous bundle and surfaces the message.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single bad line fails the whole load; a bundle is never built
    /// from a partially valid file.
    #[error("line {line} is not valid JSON: {source}")]
    Parse {
        line: usize,
        #[source]
        source: simd_json::Error,
    },

    #[error("no valid data found in file")]
    NoData,
}

/// Parse a whole JSONL payload into session records. The payload is trimmed
/// before splitting so trailing blank lines are tolerated; interior blank
/// lines are skipped.
pub fn parse_sessions(text: &str) -> Result<Vec<SessionRecord>, LoadError> {
    let mut sessions = Vec::new();

    for (idx, line) in text.trim().lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // simd-json parses in place, so each line gets its own scratch buffer.
        let mut buf = line.as_bytes().to_vec();
        let record: SessionRecord = simd_json::from_slice(&mut buf)
            .map_err(|source| LoadError::Parse { line: idx + 1, source })?;
        sessions.push(record);
    }

    Ok(sessions)
}

/// Read a session log off disk without blocking the render loop.
pub async fn load_sessions(path: &Path) -> Result<Vec<SessionRecord>, LoadError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_sessions(&text)
}

/// Load and aggregate in one step. A file that parses but yields nothing
/// usable is reported distinctly from a parse failure.
pub async fn load_bundle(path: &Path) -> Result<SummaryBundle, LoadError> {
    let sessions = load_sessions(path).await?;
    aggregate(&sessions).ok_or(LoadError::NoData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_log(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sessions.jsonl");
        let mut file = std::fs::File::create(&path).expect("create log");
        file.write_all(content.as_bytes()).expect("write log");
        (dir, path)
    }

    #[test]
    fn parses_valid_lines() {
        let text = concat!(
            r#"{"domain":"eng","time_saved_minutes":30,"canonical_task":"fix_bug_production"}"#,
            "\n",
            r#"{"domain":"sales","assist_mode":"drafting"}"#,
            "\n",
        );
        let sessions = parse_sessions(text).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].domain(), "eng");
        assert_eq!(sessions[1].assist_mode(), "drafting");
    }

    #[test]
    fn blank_lines_are_tolerated() {
        let text = "\n{\"domain\":\"eng\"}\n\n{\"domain\":\"ops\"}\n\n\n";
        let sessions = parse_sessions(text).unwrap();
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn one_bad_line_fails_the_whole_load() {
        let text = concat!(
            r#"{"domain":"eng","time_saved_minutes":30}"#,
            "\n",
            r#"{"domain":"sales","time_saved_mi"#,
        );
        let err = parse_sessions(text).unwrap_err();
        match err {
            LoadError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn empty_payload_yields_no_sessions() {
        assert!(parse_sessions("").unwrap().is_empty());
        assert!(parse_sessions("   \n  \n").unwrap().is_empty());
    }

    #[tokio::test]
    async fn load_bundle_from_file() {
        let (_dir, path) = write_log(concat!(
            r#"{"domain":"eng","time_saved_minutes":30,"quality_delta":0.8}"#,
            "\n",
            r#"{"domain":"eng","time_saved_minutes":10,"quality_delta":0.6}"#,
            "\n",
        ));

        let bundle = load_bundle(&path).await.unwrap();
        assert_eq!(bundle.dept_activity.len(), 1);
        assert_eq!(bundle.dept_activity[0].tasks, 2);
    }

    #[tokio::test]
    async fn empty_file_reports_no_data() {
        let (_dir, path) = write_log("\n\n");
        let err = load_bundle(&path).await.unwrap_err();
        assert!(matches!(err, LoadError::NoData));
    }

    #[tokio::test]
    async fn missing_file_reports_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("does-not-exist.jsonl");
        let err = load_bundle(&path).await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
