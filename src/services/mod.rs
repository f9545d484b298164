//! Seams to the outside world: the remote analysis service, the remote
//! narration service and the local audio device.

pub mod analysis_api;
pub mod audio;
pub mod speech_api;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{
    Deserialize,
    Deserializer,
};

pub use analysis_api::AnalysisApi;
pub use audio::RodioOutput;
pub use speech_api::SpeechApi;

use crate::{
    config::Settings,
    core::{
        narration::AudioClip,
        DatacleanError,
        ResultSet,
    },
};

/// One file as it travels in the multipart body.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchResponse {
    pub results: ResultSet,
    /// Informational only; a value that is not a count is ignored.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: Option<usize>,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().and_then(|count| usize::try_from(count).ok()))
}

#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze_batch(
        &self,
        instruction: String,
        files: Vec<FilePart>,
    ) -> Result<BatchResponse, DatacleanError>;
}

#[async_trait]
pub trait SpeechService: Send + Sync {
    async fn synthesize(&self, text: String) -> Result<AudioClip, DatacleanError>;
}

/// Blocking playback. Returns once the clip has played to its end.
pub trait AudioOutput: Send + Sync {
    fn play_to_end(&self, clip: AudioClip) -> Result<(), DatacleanError>;
}

#[derive(Clone)]
pub struct Services {
    pub analysis: Arc<dyn AnalysisService>,
    pub speech: Arc<dyn SpeechService>,
    pub audio: Arc<dyn AudioOutput>,
}

impl Services {
    /// HTTP clients for the configured service plus the default audio device.
    pub fn from_settings(settings: &Settings) -> Result<Self, DatacleanError> {
        Ok(Self {
            analysis: Arc::new(AnalysisApi::new(settings)?),
            speech: Arc::new(SpeechApi::new(settings)?),
            audio: Arc::new(RodioOutput),
        })
    }
}
