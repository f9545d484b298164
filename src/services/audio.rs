use std::io::Cursor;

use rodio::{
    Decoder,
    OutputStreamBuilder,
    Sink,
};

use super::AudioOutput;
use crate::core::{
    narration::AudioClip,
    DatacleanError,
};

/// Plays clips on the default output device. The stream, sink and decoded
/// source live only for the duration of one call and are dropped on every
/// return path.
pub struct RodioOutput;

impl AudioOutput for RodioOutput {
    fn play_to_end(&self, clip: AudioClip) -> Result<(), DatacleanError> {
        let size = clip.len();
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|error| DatacleanError::Audio(format!("Audio init failed: {error}")))?;
        stream.log_on_drop(false);

        let source = Decoder::new(Cursor::new(clip.into_shared()))
            .map_err(|error| DatacleanError::Audio(format!("Audio decode failed: {error}")))?;

        let sink = Sink::connect_new(stream.mixer());
        sink.append(source);
        sink.sleep_until_end();

        tracing::debug!("Played {} bytes of narration audio", size);
        Ok(())
    }
}
