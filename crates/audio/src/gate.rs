use crate::cue::Cue;
use runner_kernel::StoreEvent;

/// Output backend for cues.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Sink that reports cues through `tracing`. Used when no device backend is wired in.
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: Cue) {
        tracing::debug!(cue = cue.name(), "play");
    }
}

/// Sink that keeps every cue it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub played: Vec<Cue>,
}

impl AudioSink for RecordingSink {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}

/// Gate in front of an [`AudioSink`].
///
/// Platforms refuse to start audio without a user gesture, so the system
/// stays silent until the shell calls [`init`](Self::init) from a button
/// handler. Cues issued before that are dropped, not queued.
pub struct AudioSystem<S: AudioSink = LogSink> {
    sink: S,
    initialized: bool,
    dropped: u64,
}

impl Default for AudioSystem<LogSink> {
    fn default() -> Self {
        Self::new(LogSink)
    }
}

impl<S: AudioSink> AudioSystem<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            initialized: false,
            dropped: 0,
        }
    }

    /// Open the gate. Returns `true` only on the call that opened it.
    pub fn init(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        tracing::info!(dropped = self.dropped, "audio initialized");
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of cues discarded while the gate was closed.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn play(&mut self, cue: Cue) {
        if !self.initialized {
            self.dropped += 1;
            tracing::trace!(cue = cue.name(), "audio not initialized, dropping cue");
            return;
        }
        self.sink.play(cue);
    }

    /// Play the cues for a batch of drained store events.
    pub fn handle_events(&mut self, events: &[StoreEvent]) {
        for cue in events.iter().filter_map(Cue::for_event) {
            self.play(cue);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cues_dropped_before_init() {
        let mut audio = AudioSystem::new(RecordingSink::default());
        audio.play(Cue::Jump);
        audio.play(Cue::Gem);
        assert!(audio.sink().played.is_empty());
        assert_eq!(audio.dropped(), 2);
    }

    #[test]
    fn cues_delivered_after_init() {
        let mut audio = AudioSystem::new(RecordingSink::default());
        assert!(audio.init());
        audio.play(Cue::Jump);
        assert_eq!(audio.sink().played, vec![Cue::Jump]);
    }

    #[test]
    fn init_is_idempotent() {
        let mut audio: AudioSystem = AudioSystem::default();
        assert!(audio.init());
        assert!(!audio.init());
        assert!(audio.is_initialized());
    }

    #[test]
    fn store_events_map_to_cues() {
        let mut audio = AudioSystem::new(RecordingSink::default());
        audio.init();
        audio.handle_events(&[
            StoreEvent::RunStarted { restart: false },
            StoreEvent::GemCollected { value: 1, total: 1 },
            StoreEvent::GameOver,
        ]);
        assert_eq!(audio.sink().played, vec![Cue::Gem, Cue::GameOver]);
    }
}
