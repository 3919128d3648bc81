use tokio::sync::mpsc;

use crate::ipc::{PlatformCommand, PlatformEvent};

/// Capacity of both platform channels.
pub const CHANNEL_CAPACITY: usize = 64;

pub type PlatformEventSender = mpsc::Sender<PlatformEvent>;
pub type PlatformEventReceiver = mpsc::Receiver<PlatformEvent>;

pub type PlatformCommandSender = mpsc::Sender<PlatformCommand>;
pub type PlatformCommandReceiver = mpsc::Receiver<PlatformCommand>;

pub fn event_channel() -> (PlatformEventSender, PlatformEventReceiver) {
    mpsc::channel(CHANNEL_CAPACITY)
}

pub fn command_channel() -> (PlatformCommandSender, PlatformCommandReceiver) {
    mpsc::channel(CHANNEL_CAPACITY)
}
