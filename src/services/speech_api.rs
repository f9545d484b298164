use async_trait::async_trait;
use reqwest::{
    Client,
    Url,
};
use serde::Serialize;

use super::SpeechService;
use crate::{
    config::Settings,
    core::{
        http::{
            ensure_success,
            http_client,
        },
        narration::AudioClip,
        DatacleanError,
    },
};

#[derive(Serialize)]
struct SpeakRequest<'a> {
    text: &'a str,
}

pub struct SpeechApi {
    client: Client,
    url: Url,
}

impl SpeechApi {
    pub fn new(settings: &Settings) -> Result<Self, DatacleanError> {
        Ok(Self { client: http_client(settings.request_timeout())?, url: settings.speak_url()? })
    }
}

#[async_trait]
impl SpeechService for SpeechApi {
    async fn synthesize(&self, text: String) -> Result<AudioClip, DatacleanError> {
        let response =
            self.client.post(self.url.clone()).json(&SpeakRequest { text: &text }).send().await?;
        ensure_success(&response)?;

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            // The service streams an empty body when its upstream voice provider fails.
            return Err(DatacleanError::MalformedResponse("empty audio payload".to_string()));
        }

        tracing::debug!("Received {} bytes of narration audio", bytes.len());
        Ok(AudioClip::new(bytes.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_has_single_text_field() {
        let body = serde_json::to_value(SpeakRequest { text: "File 1. Clean." }).unwrap();
        assert_eq!(body, serde_json::json!({ "text": "File 1. Clean." }));
    }
}
