//! Intermediate texture snapshots.
//!
//! A synthesis run can publish the state of its target texture after every
//! major step, so that another thread can show previews while the run
//! continues. Every published snapshot is an owned copy: the consumer may keep
//! it as long as it likes, and the producer keeps mutating its own buffer.
//!
//! Publishing never blocks. [`ChannelSink`] uses a bounded channel and drops
//! snapshots that do not fit; a slow consumer sees fewer previews but never
//! stalls the run.
//!
//! # Example
//!
//! ```
//! use seamweave::algo::snapshot::{snapshot_channel, SnapshotSink};
//! use seamweave::texture::Texture;
//!
//! let (sink, receiver) = snapshot_channel(4);
//!
//! let worker = std::thread::spawn(move || {
//!     let mut target = Texture::new(8, 8, 3);
//!     for step in 0..3 {
//!         target.pixel_mut(0, 0)[0] = step as f32;
//!         sink.publish(target.clone());
//!     }
//! });
//!
//! worker.join().unwrap();
//! let previews: Vec<Texture> = receiver.iter().collect();
//! assert_eq!(previews.len(), 3);
//! assert_eq!(previews[2].pixel(0, 0)[0], 2.0);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::texture::Texture;

/// Destination for texture snapshots.
pub trait SnapshotSink {
    /// Hand over a snapshot. Must not block.
    fn publish(&self, snapshot: Texture);
}

impl<F> SnapshotSink for F
where
    F: Fn(Texture),
{
    fn publish(&self, snapshot: Texture) {
        self(snapshot)
    }
}

/// Publish a copy of `texture` if a sink is configured.
pub(crate) fn publish(sink: Option<&dyn SnapshotSink>, texture: &Texture) {
    if let Some(sink) = sink {
        sink.publish(texture.clone());
    }
}

/// Sending half of a bounded snapshot channel.
#[derive(Debug)]
pub struct ChannelSink {
    sender: Sender<Texture>,
    dropped: AtomicUsize,
}

impl ChannelSink {
    /// Wrap an existing crossbeam sender.
    pub fn new(sender: Sender<Texture>) -> Self {
        Self {
            sender,
            dropped: AtomicUsize::new(0),
        }
    }

    /// Number of snapshots discarded because the channel was full or closed.
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl SnapshotSink for ChannelSink {
    fn publish(&self, snapshot: Texture) {
        match self.sender.try_send(snapshot) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                log::debug!("snapshot channel full, dropping snapshot");
            }
            Err(TrySendError::Disconnected(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                log::debug!("snapshot receiver gone, dropping snapshot");
            }
        }
    }
}

/// Create a bounded snapshot channel holding at most `capacity` pending snapshots.
pub fn snapshot_channel(capacity: usize) -> (ChannelSink, Receiver<Texture>) {
    let (sender, receiver) = bounded(capacity);
    (ChannelSink::new(sender), receiver)
}
