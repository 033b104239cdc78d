//! Log-backed sound and achievement services for headless runs.

use barrage_core::events::{AchievementSink, SoundCue, SoundSink};
use barrage_sim::engine::Services;

/// Writes cues to the log instead of an audio device.
#[derive(Debug, Default)]
pub struct LogSoundSink {
    played: u64,
}

impl LogSoundSink {
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl SoundSink for LogSoundSink {
    fn play(&mut self, cue: &SoundCue) {
        self.played += 1;
        match cue {
            SoundCue::Music { track } => tracing::info!(%track, "music"),
            SoundCue::BossAppear { .. } | SoundCue::LevelComplete | SoundCue::GameOver => {
                tracing::info!(?cue, "cue")
            }
            _ => tracing::trace!(?cue, "cue"),
        }
    }
}

#[derive(Debug, Default)]
pub struct LogAchievementSink;

impl AchievementSink for LogAchievementSink {
    fn unlock(&mut self, achievement: &str) {
        tracing::info!(%achievement, "achievement unlocked");
    }
}

pub fn logging_services() -> Services {
    Services {
        sound: Box::new(LogSoundSink::default()),
        achievements: Box::new(LogAchievementSink),
    }
}
