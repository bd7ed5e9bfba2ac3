//! Outbound publish queues
//!
//! Two bounded `tokio::sync::mpsc` queues: one to the viewer relay, one to
//! the milestone integration. A full queue makes the publishing handler
//! wait; nothing is dropped. That wait only stalls the connection whose
//! handler is publishing, never the registry as a whole, because no lock is
//! held while sending.

use tokio::sync::mpsc;

use super::config::RegistryConfig;
use super::error::RegistryError;
use super::message::ViewerMessage;
use crate::notify::Milestone;

/// Sending half of the outbound queues
#[derive(Debug, Clone)]
pub struct Outbound {
    viewer_tx: mpsc::Sender<ViewerMessage>,
    milestone_tx: mpsc::Sender<Milestone>,
}

/// Receiving half of the outbound queues, handed to the consumers
#[derive(Debug)]
pub struct OutboundReceivers {
    /// Viewer relay feed
    pub viewers: mpsc::Receiver<ViewerMessage>,
    /// Milestone integration feed
    pub milestones: mpsc::Receiver<Milestone>,
}

/// Create a connected pair of outbound queues
pub fn channel(config: &RegistryConfig) -> (Outbound, OutboundReceivers) {
    let (viewer_tx, viewers) = mpsc::channel(config.viewer_queue_capacity.max(1));
    let (milestone_tx, milestones) = mpsc::channel(config.milestone_queue_capacity.max(1));

    (
        Outbound {
            viewer_tx,
            milestone_tx,
        },
        OutboundReceivers {
            viewers,
            milestones,
        },
    )
}

impl Outbound {
    /// Queue a viewer message, waiting for room if the queue is full
    pub async fn publish_viewer(&self, message: ViewerMessage) -> Result<(), RegistryError> {
        self.viewer_tx
            .send(message)
            .await
            .map_err(|_| RegistryError::OutboundClosed("viewer"))
    }

    /// Queue a milestone, waiting for room if the queue is full
    pub async fn publish_milestone(&self, milestone: Milestone) -> Result<(), RegistryError> {
        tracing::info!(
            kind = milestone.kind(),
            player = milestone.player_name(),
            "Milestone"
        );

        self.milestone_tx
            .send(milestone)
            .await
            .map_err(|_| RegistryError::OutboundClosed("milestone"))
    }

    /// Free slots in the viewer queue
    pub fn viewer_capacity(&self) -> usize {
        self.viewer_tx.capacity()
    }

    /// Free slots in the milestone queue
    pub fn milestone_capacity(&self) -> usize {
        self.milestone_tx.capacity()
    }
}
