/// Fire-and-forget sound cues.
///
/// Playback never blocks the frame loop and never fails it: every error is
/// logged at debug level and dropped. Real output needs the `sound` feature.

use dino_runner::entities::GameEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Jump,
    PowerUp,
}

impl Cue {
    pub fn for_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::Jumped => Some(Cue::Jump),
            GameEvent::PowerUpCollected => Some(Cue::PowerUp),
            _ => None,
        }
    }
}

pub struct Sounds {
    #[cfg(feature = "sound")]
    output: Option<(rodio::OutputStream, rodio::OutputStreamHandle)>,
}

impl Sounds {
    #[cfg(feature = "sound")]
    pub fn new() -> Self {
        let output = match rodio::OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(e) => {
                tracing::warn!(error = %e, "no audio output; continuing silently");
                None
            }
        };
        Self { output }
    }

    #[cfg(not(feature = "sound"))]
    pub fn new() -> Self {
        Self {}
    }

    pub fn play(&self, cue: Cue) {
        if let Err(e) = self.try_play(cue) {
            tracing::debug!(?cue, error = %e, "audio play failed");
        }
    }

    #[cfg(feature = "sound")]
    fn try_play(&self, cue: Cue) -> anyhow::Result<()> {
        use std::time::Duration;

        use rodio::source::{SineWave, Source};

        let (_, handle) = self
            .output
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("audio output unavailable"))?;
        let sink = rodio::Sink::try_new(handle)?;
        sink.set_volume(0.5);

        let blip = |freq: f32, ms: u64| SineWave::new(freq).take_duration(Duration::from_millis(ms));
        match cue {
            Cue::Jump => sink.append(blip(660.0, 70)),
            Cue::PowerUp => {
                sink.append(blip(880.0, 80));
                sink.append(blip(1320.0, 120));
            }
        }
        sink.detach(); // play in background
        Ok(())
    }

    #[cfg(not(feature = "sound"))]
    fn try_play(&self, cue: Cue) -> anyhow::Result<()> {
        tracing::trace!(?cue, "sound feature disabled");
        Ok(())
    }
}
