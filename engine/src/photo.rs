//! Reply channel between the editor and an asynchronous photo chooser.

use tokio::sync::oneshot::{self, error::TryRecvError};

#[derive(Debug)]
struct PhotoChoice {
    generation: u64,
    reference: Option<String>,
}

/// Handed to [`PhotoResolver::open_chooser`](crate::PhotoResolver::open_chooser).
/// Send exactly one answer; dropping it counts as "nothing chosen".
#[derive(Debug)]
pub struct PhotoReply {
    generation: u64,
    sender: oneshot::Sender<PhotoChoice>,
}

impl PhotoReply {
    /// Deliver the choice. A reply nobody waits for anymore is silently discarded.
    pub fn send(self, reference: Option<String>) {
        let choice = PhotoChoice {
            generation: self.generation,
            reference,
        };
        if self.sender.send(choice).is_err() {
            tracing::debug!(
                generation = self.generation,
                "Photo choice arrived after the request was abandoned"
            );
        }
    }

    /// True once the editor stopped waiting for this reply.
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.sender.is_closed()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PhotoPoll {
    Waiting,
    Chosen(Option<String>),
    /// Sender dropped, or the answer belonged to another request.
    Abandoned,
}

#[derive(Debug)]
pub(crate) struct PendingPhoto {
    generation: u64,
    receiver: oneshot::Receiver<PhotoChoice>,
}

impl PendingPhoto {
    pub(crate) fn poll(&mut self) -> PhotoPoll {
        match self.receiver.try_recv() {
            Ok(choice) if choice.generation == self.generation => {
                PhotoPoll::Chosen(choice.reference)
            }
            Ok(choice) => {
                tracing::warn!(
                    expected = self.generation,
                    got = choice.generation,
                    "Ignoring photo choice for a superseded request"
                );
                PhotoPoll::Abandoned
            }
            Err(TryRecvError::Empty) => PhotoPoll::Waiting,
            Err(TryRecvError::Closed) => PhotoPoll::Abandoned,
        }
    }
}

/// Hands out reply channels with increasing generation numbers.
#[derive(Debug, Default)]
pub(crate) struct PhotoRequests {
    next_generation: u64,
}

impl PhotoRequests {
    pub(crate) fn request(&mut self) -> (PhotoReply, PendingPhoto) {
        self.next_generation += 1;
        let generation = self.next_generation;
        let (sender, receiver) = oneshot::channel();
        (
            PhotoReply { generation, sender },
            PendingPhoto {
                generation,
                receiver,
            },
        )
    }
}
