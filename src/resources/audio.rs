//! Channel pair between the ECS world and the audio backend thread.
//!
//! [`Simulation::start_audio`](crate::simulation::Simulation::start_audio)
//! inserts an [`AudioBridge`]; the audio systems forward commands through it
//! and pull replies back into `Messages<AudioMessage>`. Without a bridge the
//! commands are dropped.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, warn};

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;

#[derive(Resource)]
pub struct AudioBridge {
    tx_cmd: Sender<AudioCmd>,
    rx_msg: Receiver<AudioMessage>,
    handle: std::thread::JoinHandle<()>,
}

impl AudioBridge {
    /// Start the backend thread.
    pub fn spawn() -> Self {
        let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
        let (tx_msg, rx_msg) = unbounded::<AudioMessage>();
        let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));
        debug!("Audio bridge up");
        Self {
            tx_cmd,
            rx_msg,
            handle,
        }
    }

    /// Queue a command. Fails only once the thread has exited.
    pub fn send(&self, cmd: AudioCmd) -> bool {
        self.tx_cmd.send(cmd).is_ok()
    }

    /// Replies received so far, without blocking.
    pub fn replies(&self) -> impl Iterator<Item = AudioMessage> + '_ {
        self.rx_msg.try_iter()
    }

    /// Stop the thread, wait for it, and return the replies nobody read.
    pub fn shutdown(self) -> Vec<AudioMessage> {
        let _ = self.tx_cmd.send(AudioCmd::Shutdown);
        if self.handle.join().is_err() {
            warn!("Audio thread panicked");
        }
        self.rx_msg.try_iter().collect()
    }
}
