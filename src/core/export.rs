//! JSON export of the current result set.
//!
//! Preview, clipboard copy and file download all render through
//! [`serialize`], so the three never diverge in formatting.

use std::{
    io::Write,
    path::{
        Path,
        PathBuf,
    },
};

use chrono::{
    DateTime,
    Utc,
};

use super::{
    errors::DatacleanError,
    models::{
        ResultRecord,
        ResultSet,
    },
};

pub const EXPORT_PREFIX: &str = "dataclean-results";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    text: String,
}

impl ExportDocument {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Anything that can receive the document text, e.g. the system clipboard.
pub trait ClipboardSink {
    fn set_text(&mut self, text: String);
}

pub fn serialize(results: &[ResultRecord]) -> Result<ExportDocument, DatacleanError> {
    let text = serde_json::to_string_pretty(results)?;
    Ok(ExportDocument { text })
}

pub fn parse(document: &str) -> Result<ResultSet, DatacleanError> {
    Ok(serde_json::from_str(document)?)
}

pub fn to_clipboard(document: &ExportDocument, sink: &mut impl ClipboardSink) {
    sink.set_text(document.as_str().to_owned());
    tracing::info!("Copied {} bytes of results to the clipboard", document.as_str().len());
}

pub fn export_file_name(generated_at: DateTime<Utc>) -> String {
    format!("{EXPORT_PREFIX}-{}.json", generated_at.timestamp_millis())
}

/// Timestamped name in `dir` that does not collide with an existing file.
pub fn unique_export_path(dir: &Path, generated_at: DateTime<Utc>) -> PathBuf {
    let stamp = generated_at.timestamp_millis();
    let mut candidate = dir.join(export_file_name(generated_at));
    let mut counter = 1;
    while candidate.exists() {
        candidate = dir.join(format!("{EXPORT_PREFIX}-{stamp}-{counter}.json"));
        counter += 1;
    }
    candidate
}

/// Writes the document to `dir/name`.
///
/// The bytes go to a temporary file in the same directory first and are then
/// renamed into place. The temporary is removed if any step fails, so no
/// partial artifact survives.
pub fn to_file(
    document: &ExportDocument,
    dir: &Path,
    name: &str,
) -> Result<PathBuf, DatacleanError> {
    let target = dir.join(name);

    let mut temp = tempfile::Builder::new()
        .prefix(".dataclean-export-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(document.as_str().as_bytes())?;
    temp.flush()?;
    temp.persist(&target)?;

    tracing::info!("Exported results to {}", target.display());
    Ok(target)
}

/// Writes to an explicit destination such as one picked in a save dialog.
pub fn save_as(document: &ExportDocument, path: &Path) -> Result<PathBuf, DatacleanError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| DatacleanError::Custom(format!("Invalid export path: {}", path.display())))?;
    to_file(document, dir, name)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;
    use crate::core::models::{
        Analysis,
        Finding,
        RecordStatus,
    };

    #[derive(Default)]
    struct RecordingClipboard {
        contents: Vec<String>,
    }

    impl ClipboardSink for RecordingClipboard {
        fn set_text(&mut self, text: String) {
            self.contents.push(text);
        }
    }

    fn sample_set() -> ResultSet {
        let mut detailed = Analysis {
            summary: Some("Street photos".to_string()),
            data_quality: Some(Finding::text("Media")),
            usable_for_training: Some(true),
            biases: Some(Finding::Structured(json!({"detected": true, "types": ["geographic"]}))),
            ..Default::default()
        };
        detailed.extra.insert("usability_score".to_string(), json!(64));

        let mut failed = ResultRecord::new("broken.pdf", None);
        failed.status = Some(RecordStatus::Failed);
        failed.error = Some("timeout".to_string());

        vec![ResultRecord::new("street.jpg", Some(detailed)), failed]
    }

    #[test]
    fn serialize_round_trips() {
        let results = sample_set();
        let document = serialize(&results).unwrap();
        assert_eq!(parse(document.as_str()).unwrap(), results);
    }

    #[test]
    fn serialize_is_pretty_and_ordered() {
        let results = vec![ResultRecord::new(
            "a.csv",
            Some(Analysis { summary: Some("ok".to_string()), ..Default::default() }),
        )];
        let document = serialize(&results).unwrap();
        let expected = "[\n  {\n    \"filename\": \"a.csv\",\n    \"analysis\": {\n      \"summary\": \"ok\"\n    }\n  }\n]";
        assert_eq!(document.as_str(), expected);
    }

    #[test]
    fn serialize_is_deterministic() {
        let results = sample_set();
        assert_eq!(serialize(&results).unwrap(), serialize(&results).unwrap());
    }

    #[test]
    fn clipboard_receives_the_same_text_as_the_preview() {
        let document = serialize(&sample_set()).unwrap();
        let mut clipboard = RecordingClipboard::default();
        to_clipboard(&document, &mut clipboard);
        assert_eq!(clipboard.contents, vec![document.as_str().to_string()]);
    }

    #[test]
    fn file_name_has_prefix_and_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(export_file_name(at), "dataclean-results-1700000000123.json");
    }

    #[test]
    fn unique_path_skips_existing_files() {
        let dir = tempdir().unwrap();
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

        let first = unique_export_path(dir.path(), at);
        fs::write(&first, "[]").unwrap();
        let second = unique_export_path(dir.path(), at);

        assert_ne!(first, second);
        assert!(second.to_string_lossy().ends_with("dataclean-results-1700000000000-1.json"));
    }

    #[test]
    fn to_file_writes_document_without_leftovers() {
        let dir = tempdir().unwrap();
        let document = serialize(&sample_set()).unwrap();

        let path = to_file(&document, dir.path(), "out.json").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), document.as_str());
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().filter_map(|e| e.ok()).collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn to_file_into_missing_directory_fails_cleanly() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let document = serialize(&sample_set()).unwrap();

        assert!(to_file(&document, &missing, "out.json").is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn save_as_splits_directory_and_name() {
        let dir = tempdir().unwrap();
        let document = serialize(&sample_set()).unwrap();
        let target = dir.path().join("picked.json");

        let written = save_as(&document, &target).unwrap();
        assert_eq!(written, target);
        assert!(target.exists());
    }
}
