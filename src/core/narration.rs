use std::sync::Arc;

use super::{
    errors::{
        DatacleanError,
        GuardRejection,
    },
    models::ResultRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NarrationTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationState {
    Idle,
    Requesting(NarrationTicket),
    Playing(NarrationTicket),
}

/// Completion signals delivered by the narration task.
#[derive(Debug)]
pub enum NarrationEvent {
    /// Audio arrived and playback has started.
    Playing,
    /// Playback reached its natural end.
    Finished,
    Failed(DatacleanError),
}

/// Synthesized speech. Owned by exactly one playback scope and released when
/// that scope ends.
#[derive(Debug, Clone)]
pub struct AudioClip {
    bytes: Arc<[u8]>,
}

impl AudioClip {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self { bytes: bytes.into() }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_shared(self) -> Arc<[u8]> {
        self.bytes
    }
}

/// Serializes text-to-speech so that at most one narration exists at a time.
pub struct NarrationController {
    state: NarrationState,
    next_ticket: u64,
}

impl NarrationController {
    pub fn new() -> Self {
        Self { state: NarrationState::Idle, next_ticket: 1 }
    }

    pub fn state(&self) -> NarrationState {
        self.state
    }

    pub fn is_speaking(&self) -> bool {
        self.state != NarrationState::Idle
    }

    pub fn begin(&mut self, text: &str) -> Result<NarrationTicket, GuardRejection> {
        if self.is_speaking() {
            return Err(GuardRejection::NarrationInFlight);
        }
        if text.trim().is_empty() {
            return Err(GuardRejection::EmptyNarrationText);
        }

        let ticket = NarrationTicket(self.next_ticket);
        self.next_ticket += 1;
        self.state = NarrationState::Requesting(ticket);
        tracing::debug!("Narration {:?} requested", ticket);
        Ok(ticket)
    }

    /// Advances the state machine. Events for other tickets are dropped.
    pub fn handle(&mut self, ticket: NarrationTicket, event: NarrationEvent) {
        let next = match (self.state, event) {
            (NarrationState::Requesting(current), NarrationEvent::Playing) if current == ticket => {
                NarrationState::Playing(ticket)
            }
            (NarrationState::Playing(current), NarrationEvent::Finished) if current == ticket => {
                tracing::debug!("Narration {:?} finished", ticket);
                NarrationState::Idle
            }
            (
                NarrationState::Requesting(current) | NarrationState::Playing(current),
                NarrationEvent::Failed(error),
            ) if current == ticket => {
                tracing::warn!("Narration failed: {}", error);
                NarrationState::Idle
            }
            (state, event) => {
                tracing::debug!("Ignoring narration event {:?} in state {:?}", event, state);
                state
            }
        };
        self.state = next;
    }
}

impl Default for NarrationController {
    fn default() -> Self {
        Self::new()
    }
}

/// Spoken text for the item at `index` in the result list.
pub fn narration_text(index: usize, record: &ResultRecord) -> String {
    let summary = record.summary().unwrap_or("No data");
    let quality = record.quality_label();
    let quality = quality.as_deref().unwrap_or("unknown");
    format!("File {}. {}. Quality: {}", index + 1, summary, quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{
        Analysis,
        Finding,
    };

    #[test]
    fn successful_narration_walks_through_playing() {
        let mut controller = NarrationController::new();
        let ticket = controller.begin("File 1. Clean.").unwrap();
        assert_eq!(controller.state(), NarrationState::Requesting(ticket));

        controller.handle(ticket, NarrationEvent::Playing);
        assert_eq!(controller.state(), NarrationState::Playing(ticket));

        controller.handle(ticket, NarrationEvent::Finished);
        assert_eq!(controller.state(), NarrationState::Idle);
    }

    #[test]
    fn failed_request_returns_to_idle_without_playing() {
        let mut controller = NarrationController::new();
        let ticket = controller.begin("File 1.").unwrap();

        controller.handle(
            ticket,
            NarrationEvent::Failed(DatacleanError::HttpStatus {
                status: 502,
                url: "http://tts".to_string(),
            }),
        );

        assert_eq!(controller.state(), NarrationState::Idle);
    }

    #[test]
    fn playback_failure_after_playing_returns_to_idle() {
        let mut controller = NarrationController::new();
        let ticket = controller.begin("File 1.").unwrap();
        controller.handle(ticket, NarrationEvent::Playing);

        controller.handle(
            ticket,
            NarrationEvent::Failed(DatacleanError::Audio("no output device".to_string())),
        );

        assert_eq!(controller.state(), NarrationState::Idle);
        assert!(controller.begin("File 1.").is_ok());
    }

    #[test]
    fn begin_while_speaking_is_rejected() {
        let mut controller = NarrationController::new();
        let ticket = controller.begin("first").unwrap();

        assert_eq!(controller.begin("second").unwrap_err(), GuardRejection::NarrationInFlight);

        controller.handle(ticket, NarrationEvent::Playing);
        assert_eq!(controller.begin("third").unwrap_err(), GuardRejection::NarrationInFlight);
        assert!(controller.is_speaking());
    }

    #[test]
    fn blank_text_is_rejected() {
        let mut controller = NarrationController::new();
        assert_eq!(controller.begin("  ").unwrap_err(), GuardRejection::EmptyNarrationText);
        assert!(!controller.is_speaking());
    }

    #[test]
    fn finished_before_playing_is_ignored() {
        let mut controller = NarrationController::new();
        let ticket = controller.begin("text").unwrap();
        controller.handle(ticket, NarrationEvent::Finished);
        assert_eq!(controller.state(), NarrationState::Requesting(ticket));
    }

    #[test]
    fn narration_text_uses_ordinal_summary_and_quality() {
        let record = ResultRecord::new(
            "a.csv",
            Some(Analysis {
                summary: Some("Tabular sales data".to_string()),
                data_quality: Some(Finding::text("High")),
                ..Default::default()
            }),
        );
        assert_eq!(narration_text(0, &record), "File 1. Tabular sales data. Quality: High");

        let pending = ResultRecord::new("b.csv", None);
        assert_eq!(narration_text(1, &pending), "File 2. No data. Quality: unknown");
    }
}
