use std::time::Duration;

use reqwest::Url;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::{
        http::endpoint,
        DatacleanError,
    },
    persistence::{
        get_data_file_path,
        load_json_or_default,
        save_json,
    },
};

pub const SETTINGS_FILE: &str = "settings.json";

const DEFAULT_INSTRUCTION: &str = "Analyze the quality of these files, detect gender or race \
     bias, and tell me whether they are usable for training an AI model.";

/// Service addresses and defaults. Read once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub analyze_path: String,
    pub speak_path: String,
    pub default_instruction: String,
    /// Unset means requests may wait indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            analyze_path: "/analyze-batch".to_string(),
            speak_path: "/speak".to_string(),
            default_instruction: DEFAULT_INSTRUCTION.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    /// Loads the settings file, writing the defaults out on first launch so
    /// there is a file to edit.
    pub fn load() -> Self {
        let settings = load_json_or_default::<Settings>(SETTINGS_FILE);
        if !get_data_file_path(SETTINGS_FILE).exists() {
            if let Err(e) = settings.save() {
                tracing::warn!("Failed to write default settings: {}", e);
            }
        }
        settings
    }

    pub fn save(&self) -> Result<(), DatacleanError> {
        save_json(self, SETTINGS_FILE)
    }

    pub fn analyze_url(&self) -> Result<Url, DatacleanError> {
        endpoint(&self.api_base_url, &self.analyze_path)
    }

    pub fn speak_url(&self) -> Result<Url, DatacleanError> {
        endpoint(&self.api_base_url, &self.speak_path)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }
}
