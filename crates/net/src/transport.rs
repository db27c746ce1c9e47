//! Transport abstraction for per-object replication messages.
//!
//! Implementations:
//! - `LoopbackEndpoint`: in-process fan-out over a `tokio::sync::broadcast` hub
//!
//! Delivery is assumed in order per sender. Messages carry no sequence
//! number, so a lagging receiver simply loses the oldest messages and keeps
//! the newest.

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::identity::{NetworkId, PeerId};

/// A payload addressed to one replicated object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewMessage {
    pub view_id: NetworkId,
    pub sender: PeerId,
    pub payload: Vec<u8>,
}

/// Minimal non-blocking transport for replication messages.
pub trait Transport {
    /// Identity of this endpoint
    fn peer_id(&self) -> PeerId;

    /// Fire-and-forget send to every other peer
    fn send(&self, view_id: NetworkId, payload: Vec<u8>) -> Result<(), TransportError>;

    /// Next message from another peer, if any is queued
    fn try_recv(&mut self) -> Option<ViewMessage>;

    /// Drain all currently queued messages
    fn drain(&mut self) -> Vec<ViewMessage> {
        let mut out = Vec::new();
        while let Some(msg) = self.try_recv() {
            out.push(msg);
        }
        out
    }
}

/// Hands out endpoints that all see each other's messages
#[derive(Debug)]
pub struct LoopbackHub {
    tx: broadcast::Sender<ViewMessage>,
    next_peer: u32,
}

impl LoopbackHub {
    /// `capacity` bounds how many messages a slow endpoint may fall behind
    /// before the oldest are dropped.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx, next_peer: 0 }
    }

    /// Create a new endpoint. It only receives messages sent after this call.
    pub fn endpoint(&mut self) -> LoopbackEndpoint {
        let peer = PeerId(self.next_peer);
        self.next_peer += 1;
        debug!("LoopbackHub: created endpoint {}", peer);
        LoopbackEndpoint {
            peer,
            tx: self.tx.clone(),
            rx: self.tx.subscribe(),
        }
    }
}

/// One peer's connection to a [`LoopbackHub`]
#[derive(Debug)]
pub struct LoopbackEndpoint {
    peer: PeerId,
    tx: broadcast::Sender<ViewMessage>,
    rx: broadcast::Receiver<ViewMessage>,
}

impl Transport for LoopbackEndpoint {
    fn peer_id(&self) -> PeerId {
        self.peer
    }

    fn send(&self, view_id: NetworkId, payload: Vec<u8>) -> Result<(), TransportError> {
        let msg = ViewMessage {
            view_id,
            sender: self.peer,
            payload,
        };
        self.tx
            .send(msg)
            .map(|_| ())
            .map_err(|_| TransportError::NoSubscribers)
    }

    fn try_recv(&mut self) -> Option<ViewMessage> {
        loop {
            match self.rx.try_recv() {
                Ok(msg) if msg.sender == self.peer => continue,
                Ok(msg) => return Some(msg),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("{} lagged, dropped {} stale messages", self.peer, skipped);
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(raw: i32) -> NetworkId {
        NetworkId::new(raw).unwrap()
    }

    #[test]
    fn test_fan_out_skips_sender() {
        let mut hub = LoopbackHub::new(8);
        let mut a = hub.endpoint();
        let mut b = hub.endpoint();
        let mut c = hub.endpoint();

        a.send(view(5), b"ping".to_vec()).unwrap();

        assert!(a.try_recv().is_none());
        let got_b = b.try_recv().unwrap();
        let got_c = c.try_recv().unwrap();
        assert_eq!(got_b, got_c);
        assert_eq!(got_b.view_id, view(5));
        assert_eq!(got_b.sender, a.peer_id());
        assert_eq!(got_b.payload, b"ping".to_vec());
    }

    #[test]
    fn test_in_order_delivery() {
        let mut hub = LoopbackHub::new(8);
        let a = hub.endpoint();
        let mut b = hub.endpoint();

        for i in 0..5u8 {
            a.send(view(1), vec![i]).unwrap();
        }
        let payloads: Vec<u8> = b.drain().into_iter().map(|m| m.payload[0]).collect();
        assert_eq!(payloads, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_lagging_receiver_keeps_newest() {
        let mut hub = LoopbackHub::new(2);
        let a = hub.endpoint();
        let mut b = hub.endpoint();

        for i in 0..6u8 {
            a.send(view(1), vec![i]).unwrap();
        }
        let payloads: Vec<u8> = b.drain().into_iter().map(|m| m.payload[0]).collect();
        assert_eq!(payloads.last(), Some(&5));
        assert!(payloads.len() <= 2);
    }

    #[test]
    fn test_late_endpoint_misses_earlier_messages() {
        let mut hub = LoopbackHub::new(4);
        let a = hub.endpoint();
        a.send(view(1), vec![1]).unwrap();

        let mut late = hub.endpoint();
        assert!(late.try_recv().is_none());
        a.send(view(1), vec![2]).unwrap();
        assert_eq!(late.try_recv().map(|m| m.payload), Some(vec![2]));
    }
}
