//! Audio command and message types.
//!
//! Gameplay systems write [`AudioCmd`] messages; the audio systems forward
//! them to the backend thread, which answers with [`AudioMessage`]s.

use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Play a one-shot sound.
    PlayFx { id: String },
    /// Start a looping track, ramping its volume up over `seconds`.
    FadeInMusic { id: String, seconds: f32 },
    /// Ramp a looping track down over `seconds`, then stop it.
    FadeOutMusic { id: String, seconds: f32 },
    StopAll,
    Shutdown,
}

/// Messages sent *back* from the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    MusicStarted { id: String },
    MusicStopped { id: String },
    MusicNotPlaying { id: String },
    FxPlayed { id: String },
    AllStopped,
}
