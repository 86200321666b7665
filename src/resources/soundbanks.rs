//! Sound cue lookup.
//!
//! Gameplay code refers to sounds by [`SoundCue`]; the audio backend only
//! knows string ids. A cue without an id is simply not played.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::events::audio::AudioCmd;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    MusicMenuLoop,
    MusicGameLoop,
    WinAlert,
    LoseAlert,
    Hit,
    Death,
}

impl SoundCue {
    pub const ALL: [SoundCue; 6] = [
        SoundCue::MusicMenuLoop,
        SoundCue::MusicGameLoop,
        SoundCue::WinAlert,
        SoundCue::LoseAlert,
        SoundCue::Hit,
        SoundCue::Death,
    ];

    /// Key used in the `[audio]` section of `config.ini`, also the default id.
    pub fn key(&self) -> &'static str {
        match self {
            SoundCue::MusicMenuLoop => "music_menu_loop",
            SoundCue::MusicGameLoop => "music_game_loop",
            SoundCue::WinAlert => "win_alert",
            SoundCue::LoseAlert => "lose_alert",
            SoundCue::Hit => "hit",
            SoundCue::Death => "death",
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SoundBanks {
    cues: FxHashMap<SoundCue, String>,
}

impl SoundBanks {
    /// No cues assigned; every sound is skipped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cue mapped to its default id.
    pub fn standard() -> Self {
        let mut banks = Self::new();
        for cue in SoundCue::ALL {
            banks.assign(cue, cue.key());
        }
        banks
    }

    pub fn assign(&mut self, cue: SoundCue, id: impl Into<String>) {
        self.cues.insert(cue, id.into());
    }

    pub fn unassign(&mut self, cue: SoundCue) {
        self.cues.remove(&cue);
    }

    pub fn get(&self, cue: SoundCue) -> Option<&str> {
        self.cues.get(&cue).map(String::as_str)
    }

    /// One-shot command for `cue`, if it has an id.
    pub fn fx(&self, cue: SoundCue) -> Option<AudioCmd> {
        self.get(cue).map(|id| AudioCmd::PlayFx { id: id.to_string() })
    }

    pub fn fade_in(&self, cue: SoundCue, seconds: f32) -> Option<AudioCmd> {
        self.get(cue).map(|id| AudioCmd::FadeInMusic {
            id: id.to_string(),
            seconds,
        })
    }

    pub fn fade_out(&self, cue: SoundCue, seconds: f32) -> Option<AudioCmd> {
        self.get(cue).map(|id| AudioCmd::FadeOutMusic {
            id: id.to_string(),
            seconds,
        })
    }
}
