//! Audio bridge systems and the headless audio backend.
//!
//! - [`forward_audio_cmds`] sends this frame's [`AudioCmd`]s to the thread.
//! - [`poll_audio_messages`] drains the thread's replies into the ECS.
//! - [`audio_thread`] is the backend: it has no device, it keeps track of
//!   which loops are playing and reports what a real device would.
//!
//! The chain must run in order:
//! `update_audio_cmds -> forward_audio_cmds -> poll_audio_messages -> update_audio_messages`.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::debug;
use rustc_hash::FxHashSet;

/// Drain any pending replies from the audio thread into `Messages<AudioMessage>`.
pub fn poll_audio_messages(
    bridge: Option<Res<AudioBridge>>,
    mut writer: MessageWriter<AudioMessage>,
) {
    if let Some(bridge) = bridge {
        writer.write_batch(bridge.replies());
    }
}

pub fn update_audio_messages(mut messages: ResMut<Messages<AudioMessage>>) {
    messages.update();
}

/// Forward ECS audio commands to the audio thread.
pub fn forward_audio_cmds(bridge: Option<Res<AudioBridge>>, mut reader: MessageReader<AudioCmd>) {
    let Some(bridge) = bridge else {
        // Still consume, so the cursor does not replay them once a bridge appears.
        reader.clear();
        return;
    };
    for cmd in reader.read() {
        if !bridge.send(cmd.clone()) {
            debug!("[audio] thread gone, dropping {:?}", cmd);
        }
    }
}

pub fn update_audio_cmds(mut messages: ResMut<Messages<AudioCmd>>) {
    messages.update();
}

/// Entry point of the audio thread. Blocks on the command channel until
/// [`AudioCmd::Shutdown`] arrives or the world drops its sender.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    debug!(
        "[audio] thread starting (id={:?})",
        std::thread::current().id()
    );
    let mut playing: FxHashSet<String> = FxHashSet::default();

    while let Ok(cmd) = rx_cmd.recv() {
        let reply = match cmd {
            AudioCmd::PlayFx { id } => {
                debug!("[audio] fx '{}'", id);
                AudioMessage::FxPlayed { id }
            }
            AudioCmd::FadeInMusic { id, seconds } => {
                debug!("[audio] fade in '{}' over {:.2}s", id, seconds);
                playing.insert(id.clone());
                AudioMessage::MusicStarted { id }
            }
            AudioCmd::FadeOutMusic { id, seconds } => {
                if playing.remove(&id) {
                    debug!("[audio] fade out '{}' over {:.2}s", id, seconds);
                    AudioMessage::MusicStopped { id }
                } else {
                    AudioMessage::MusicNotPlaying { id }
                }
            }
            AudioCmd::StopAll => {
                playing.clear();
                AudioMessage::AllStopped
            }
            AudioCmd::Shutdown => break,
        };
        if tx_msg.send(reply).is_err() {
            break;
        }
    }
    debug!("[audio] thread exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn backend_tracks_playing_loops() {
        let (tx_cmd, rx_cmd) = unbounded();
        let (tx_msg, rx_msg) = unbounded();
        let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

        tx_cmd
            .send(AudioCmd::FadeInMusic {
                id: "menu".into(),
                seconds: 1.0,
            })
            .unwrap();
        tx_cmd
            .send(AudioCmd::FadeOutMusic {
                id: "menu".into(),
                seconds: 0.5,
            })
            .unwrap();
        tx_cmd
            .send(AudioCmd::FadeOutMusic {
                id: "menu".into(),
                seconds: 0.5,
            })
            .unwrap();
        tx_cmd.send(AudioCmd::Shutdown).unwrap();
        handle.join().unwrap();

        let replies: Vec<AudioMessage> = rx_msg.try_iter().collect();
        assert_eq!(
            replies,
            vec![
                AudioMessage::MusicStarted { id: "menu".into() },
                AudioMessage::MusicStopped { id: "menu".into() },
                AudioMessage::MusicNotPlaying { id: "menu".into() },
            ]
        );
    }
}
