use std::{
    borrow::Cow,
    collections::BTreeMap,
    path::PathBuf,
    sync::Arc,
};

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

/// Ordered findings for one submission batch. Replaced wholesale, never merged.
pub type ResultSet = Vec<ResultRecord>;

type Fields = serde_json::Map<String, Value>;

/// One file's entry in a batch response.
///
/// Known keys are only lifted into typed fields when they carry the expected
/// type. Anything else, including unknown keys, stays in `extra` exactly as
/// received, so a single odd field never rejects the batch and re-serializing
/// reproduces the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRecord")]
pub struct ResultRecord {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Deserialize)]
struct RawRecord {
    filename: String,
    #[serde(flatten)]
    rest: Fields,
}

impl From<RawRecord> for ResultRecord {
    fn from(raw: RawRecord) -> Self {
        let mut fields = raw.rest;
        let analysis = take_if(&mut fields, "analysis", |value| match value {
            Value::Object(map) => Ok(Analysis::from(map)),
            other => Err(other),
        });
        let mime_type = take_if(&mut fields, "mime_type", string_value);
        let status = take_if(&mut fields, "status", |value| {
            serde_json::from_value::<RecordStatus>(value.clone()).map_err(|_| value)
        });
        let error = take_if(&mut fields, "error", string_value);

        Self {
            filename: raw.filename,
            analysis,
            mime_type,
            status,
            error,
            extra: fields.into_iter().collect(),
        }
    }
}

impl ResultRecord {
    pub fn new(filename: impl Into<String>, analysis: Option<Analysis>) -> Self {
        Self {
            filename: filename.into(),
            analysis,
            mime_type: None,
            status: None,
            error: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn summary(&self) -> Option<&str> {
        self.analysis.as_ref().and_then(|a| a.summary.as_deref())
    }

    pub fn quality_label(&self) -> Option<Cow<'_, str>> {
        self.analysis.as_ref().and_then(|a| a.data_quality.as_ref()).map(Finding::as_text)
    }

    pub fn biases(&self) -> Option<&Finding> {
        self.analysis.as_ref().and_then(|a| a.biases.as_ref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Success,
    Failed,
}

/// Analyzer payload for one file. Every field is optional because the
/// upstream model may return partial or loosely typed JSON; see
/// [`ResultRecord`] for how mismatched values are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Fields")]
pub struct Analysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_quality: Option<Finding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usable_for_training: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biases: Option<Finding>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl From<Fields> for Analysis {
    fn from(mut fields: Fields) -> Self {
        let summary = take_if(&mut fields, "summary", string_value);
        let data_quality = take_if(&mut fields, "data_quality", finding_value);
        let usable_for_training = take_if(&mut fields, "usable_for_training", |value| match value {
            Value::Bool(flag) => Ok(flag),
            other => Err(other),
        });
        let biases = take_if(&mut fields, "biases", finding_value);

        Self {
            summary,
            data_quality,
            usable_for_training,
            biases,
            extra: fields.into_iter().collect(),
        }
    }
}

/// Removes `key` when `convert` accepts its value; a rejected value is put
/// back untouched.
fn take_if<T>(
    fields: &mut Fields,
    key: &str,
    convert: impl FnOnce(Value) -> Result<T, Value>,
) -> Option<T> {
    let value = fields.remove(key)?;
    match convert(value) {
        Ok(lifted) => Some(lifted),
        Err(raw) => {
            fields.insert(key.to_string(), raw);
            None
        }
    }
}

fn string_value(value: Value) -> Result<String, Value> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(other),
    }
}

fn finding_value(value: Value) -> Result<Finding, Value> {
    match value {
        Value::Null => Err(Value::Null),
        other => Ok(Finding::from_value(other)),
    }
}

/// A finding reported either as free text or as a structured object
/// (e.g. `{"detected": true, "types": [...]}`).
///
/// Equality is by JSON value, so `Structured` holding a string equals the
/// matching `Text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Finding {
    Text(String),
    Structured(Value),
}

impl Finding {
    pub fn text(value: impl Into<String>) -> Self {
        Finding::Text(value.into())
    }

    /// Strings become `Text`; everything else is kept as structured data.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => Finding::Text(text),
            other => Finding::Structured(other),
        }
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Finding::Text(text) => Cow::Borrowed(text.as_str()),
            Finding::Structured(Value::String(text)) => Cow::Borrowed(text.as_str()),
            Finding::Structured(value) => Cow::Owned(value.to_string()),
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Finding::Text(text) | Finding::Structured(Value::String(text)) => Some(text.as_str()),
            Finding::Structured(_) => None,
        }
    }
}

impl PartialEq for Finding {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_str(), other.as_str()) {
            (Some(left), Some(right)) => left == right,
            (None, None) => match (self, other) {
                (Finding::Structured(left), Finding::Structured(right)) => left == right,
                _ => false,
            },
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContents {
    Disk(PathBuf),
    Memory(Arc<[u8]>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub contents: FileContents,
}

impl SelectedFile {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unnamed")
            .to_string();
        let mime_type = mime_from_name(&name).to_string();
        Self { name, mime_type, contents: FileContents::Disk(path) }
    }

    pub fn in_memory(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let mime_type = mime_from_name(&name).to_string();
        Self { name, mime_type, contents: FileContents::Memory(bytes.into()) }
    }

    pub async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match &self.contents {
            FileContents::Disk(path) => tokio::fs::read(path).await,
            FileContents::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }
}

/// The operator's current selection. Re-selection replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: Vec<SelectedFile>,
}

impl FileSet {
    pub fn new(files: Vec<SelectedFile>) -> Self {
        Self { files }
    }

    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self { files: paths.into_iter().map(SelectedFile::from_path).collect() }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectedFile> {
        self.files.iter()
    }
}

fn mime_from_name(name: &str) -> &'static str {
    let extension = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("mp4") => "video/mp4",
        _ => "application/octet-stream",
    }
}
