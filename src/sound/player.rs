/// Sound player
///
/// Plays the bundled alert and waits for it to finish. One attempt, no
/// retries; the shell hooks run us detached, so blocking here never holds
/// up the prompt.

use crate::error::{AlertError, Result};
use crate::sound::{asset, ALERT_ASSET};
use rodio::cpal::BufferSize;
use rodio::{Decoder, OutputStreamBuilder, Sink, Source};
use std::io::Cursor;
use tracing::debug;

// Output buffer holds a tenth of a second of frames
const BUFFERS_PER_SECOND: u32 = 10;

pub type AlertDecoder = Decoder<Cursor<&'static [u8]>>;

pub struct SoundPlayer {
    asset_name: String,
}

impl SoundPlayer {
    pub fn new() -> Self {
        Self::with_asset(ALERT_ASSET)
    }

    pub fn with_asset(name: impl Into<String>) -> Self {
        Self {
            asset_name: name.into(),
        }
    }

    /// Decode the configured asset without touching the audio device
    pub fn decode(&self) -> Result<AlertDecoder> {
        let bytes =
            asset(&self.asset_name).ok_or_else(|| AlertError::AssetMissing(self.asset_name.clone()))?;
        decode(bytes)
    }

    /// Play the asset on the default output device, blocking until done
    pub fn play(&self) -> Result<()> {
        let source = self.decode()?;
        let sample_rate = source.sample_rate();
        let frames = (sample_rate / BUFFERS_PER_SECOND).max(1);

        let mut stream = OutputStreamBuilder::from_default_device()
            .map(|builder| {
                builder
                    .with_sample_rate(sample_rate)
                    .with_buffer_size(BufferSize::Fixed(frames))
            })
            .and_then(|builder| builder.open_stream_or_fallback())
            .map_err(|e| AlertError::Audio(e.to_string()))?;
        stream.log_on_drop(false);

        debug!(sample_rate, frames, asset = %self.asset_name, "playing");

        let sink = Sink::connect_new(stream.mixer());
        sink.append(source);
        sink.sleep_until_end();

        Ok(())
    }
}

impl Default for SoundPlayer {
    fn default() -> Self {
        Self::new()
    }
}

fn decode(bytes: &'static [u8]) -> Result<AlertDecoder> {
    Decoder::new(Cursor::new(bytes)).map_err(|e| AlertError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_alert_decodes() {
        let source = SoundPlayer::new().decode().unwrap();
        assert_eq!(source.sample_rate(), 22_050);
    }

    #[test]
    fn test_missing_asset_fails_before_audio() {
        let result = SoundPlayer::with_asset("missing.mp3").play();
        assert!(matches!(result, Err(AlertError::AssetMissing(ref name)) if name == "missing.mp3"));
    }

    #[test]
    fn test_garbage_does_not_decode() {
        let result = decode(b"definitely not audio");
        assert!(matches!(result, Err(AlertError::Decode(_))));
    }
}
