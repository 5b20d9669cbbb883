// In memory command queue feeding the application service host.
//
// - CommandQueue is the clonable writing end handed to inbound adapters.
// - CommandQueueReader is owned by exactly one worker at a time.

use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("command queue is closed")]
pub struct QueueClosed;

#[derive(Debug)]
pub struct CommandQueue<C> {
    sender: mpsc::UnboundedSender<C>,
}

impl<C> Clone for CommandQueue<C> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<C> CommandQueue<C> {
    pub fn new() -> (Self, CommandQueueReader<C>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, CommandQueueReader { receiver })
    }

    pub fn enqueue(&self, command: C) -> Result<(), QueueClosed> {
        self.sender.send(command).map_err(|_| QueueClosed)
    }
}

#[derive(Debug)]
pub struct CommandQueueReader<C> {
    receiver: mpsc::UnboundedReceiver<C>,
}

impl<C> CommandQueueReader<C> {
    /// Waits for the next command. None once every writer is gone and the queue is empty.
    pub async fn next(&mut self) -> Option<C> {
        self.receiver.recv().await
    }

    /// Next command if one is already queued.
    pub fn try_next(&mut self) -> Option<C> {
        self.receiver.try_recv().ok()
    }
}
