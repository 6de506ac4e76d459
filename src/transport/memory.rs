//! # In-Memory Loopback Transport
//!
//! Pairs endpoints inside one process over tokio channels, standing in for
//! the real signaling library in tests and the demo binary. Peer ids are
//! minted as UUID v4 strings, like the ids a signaling server would hand
//! out.
//!
//! Dialing a registered peer queues `Opened` on the dialer's event channel
//! and `Incoming` + `Opened` on the callee's; closing either side of a
//! link queues `Closed` on both.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use super::{PeerId, PeerLink, Transport, TransportError, TransportEvent};

/// Shared rendezvous point for in-process endpoints.
///
/// # Example
/// ```ignore
/// let hub = MemoryHub::new();
/// let (host, host_events) = hub.endpoint();
/// let (guest, guest_events) = hub.endpoint();
/// ```
#[derive(Clone, Default)]
pub struct MemoryHub {
    inner: Arc<Mutex<HubInner>>,
}

#[derive(Default)]
struct HubInner {
    peers: HashMap<PeerId, UnboundedSender<TransportEvent>>,
}

impl MemoryHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new endpoint on this hub.
    ///
    /// Mints a fresh peer id and immediately queues
    /// [`TransportEvent::Ready`] on the returned event channel, mirroring a
    /// signaling server assigning an id shortly after startup.
    pub fn endpoint(&self) -> (MemoryTransport, UnboundedReceiver<TransportEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let local_id = Uuid::new_v4().to_string();

        self.lock().peers.insert(local_id.clone(), tx.clone());
        let _ = tx.send(TransportEvent::Ready {
            local_id: local_id.clone(),
        });

        (
            MemoryTransport {
                local_id,
                hub: self.clone(),
            },
            rx,
        )
    }

    fn lock(&self) -> MutexGuard<'_, HubInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One endpoint's outbound half.
pub struct MemoryTransport {
    local_id: PeerId,
    hub: MemoryHub,
}

impl MemoryTransport {
    pub fn local_id(&self) -> &str {
        &self.local_id
    }
}

impl Transport for MemoryTransport {
    fn connect(&mut self, remote_id: &str) -> Result<Box<dyn PeerLink>, TransportError> {
        let (local_tx, remote_tx) = {
            let inner = self.hub.lock();
            let remote_tx = inner
                .peers
                .get(remote_id)
                .cloned()
                .ok_or_else(|| TransportError::UnknownPeer(remote_id.to_string()))?;
            let local_tx = inner
                .peers
                .get(&self.local_id)
                .cloned()
                .ok_or_else(|| TransportError::UnknownPeer(self.local_id.clone()))?;
            (local_tx, remote_tx)
        };

        // One shared flag per link pair so either side can close it.
        let open = Arc::new(AtomicBool::new(true));

        let dialer_link = MemoryLink {
            local_id: self.local_id.clone(),
            remote_id: remote_id.to_string(),
            local_tx: local_tx.clone(),
            remote_tx: remote_tx.clone(),
            open: Arc::clone(&open),
        };
        let callee_link = MemoryLink {
            local_id: remote_id.to_string(),
            remote_id: self.local_id.clone(),
            local_tx: remote_tx.clone(),
            remote_tx: local_tx.clone(),
            open,
        };

        let _ = remote_tx.send(TransportEvent::Incoming {
            link: Box::new(callee_link),
        });
        let _ = remote_tx.send(TransportEvent::Opened {
            peer_id: self.local_id.clone(),
        });
        let _ = local_tx.send(TransportEvent::Opened {
            peer_id: remote_id.to_string(),
        });

        Ok(Box::new(dialer_link))
    }
}

/// One side of an established in-memory link.
struct MemoryLink {
    /// Id of the side holding this link
    local_id: PeerId,
    /// Id of the other end
    remote_id: PeerId,
    /// Event channel of the side holding this link
    local_tx: UnboundedSender<TransportEvent>,
    /// Event channel of the other end
    remote_tx: UnboundedSender<TransportEvent>,
    open: Arc<AtomicBool>,
}

impl PeerLink for MemoryLink {
    fn peer_id(&self) -> &str {
        &self.remote_id
    }

    fn send(&self, text: &str) -> Result<(), TransportError> {
        if !self.open.load(Ordering::SeqCst) {
            return Err(TransportError::LinkClosed(self.remote_id.clone()));
        }
        self.remote_tx
            .send(TransportEvent::Data {
                from: self.local_id.clone(),
                text: text.to_string(),
            })
            .map_err(|_| TransportError::SendFailed(self.remote_id.clone()))
    }

    fn close(&self) {
        // swap so a close racing its mirror fires the events only once
        if self.open.swap(false, Ordering::SeqCst) {
            let _ = self.local_tx.send(TransportEvent::Closed {
                peer_id: self.remote_id.clone(),
            });
            let _ = self.remote_tx.send(TransportEvent::Closed {
                peer_id: self.local_id.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn next_event(rx: &mut UnboundedReceiver<TransportEvent>) -> TransportEvent {
        rx.try_recv().expect("expected a queued event")
    }

    #[tokio::test]
    async fn test_endpoint_reports_ready_with_unique_ids() {
        let hub = MemoryHub::new();
        let (a, mut a_rx) = hub.endpoint();
        let (b, mut b_rx) = hub.endpoint();

        assert_ne!(a.local_id(), b.local_id());
        assert!(matches!(next_event(&mut a_rx), TransportEvent::Ready { local_id } if local_id == a.local_id()));
        assert!(matches!(next_event(&mut b_rx), TransportEvent::Ready { local_id } if local_id == b.local_id()));
    }

    #[tokio::test]
    async fn test_connect_unknown_peer_fails() {
        let hub = MemoryHub::new();
        let (mut a, _a_rx) = hub.endpoint();

        let err = a.connect("nobody-home").unwrap_err();
        assert!(matches!(err, TransportError::UnknownPeer(_)));
    }

    #[tokio::test]
    async fn test_data_flows_both_ways() {
        let hub = MemoryHub::new();
        let (mut a, mut a_rx) = hub.endpoint();
        let (b, mut b_rx) = hub.endpoint();

        let link = a.connect(b.local_id()).unwrap();
        let _ready = next_event(&mut b_rx);
        let incoming = next_event(&mut b_rx);
        let reverse = match incoming {
            TransportEvent::Incoming { link } => link,
            _ => panic!("expected Incoming"),
        };

        link.send("ping").unwrap();
        reverse.send("pong").unwrap();

        let _opened = next_event(&mut b_rx);
        assert!(matches!(next_event(&mut b_rx), TransportEvent::Data { text, .. } if text == "ping"));

        let _ready = next_event(&mut a_rx);
        let _opened = next_event(&mut a_rx);
        assert!(matches!(next_event(&mut a_rx), TransportEvent::Data { text, .. } if text == "pong"));
    }

    #[tokio::test]
    async fn test_close_notifies_both_sides_once() {
        let hub = MemoryHub::new();
        let (mut a, mut a_rx) = hub.endpoint();
        let (b, mut b_rx) = hub.endpoint();

        let link = a.connect(b.local_id()).unwrap();
        link.close();
        link.close();

        assert!(link.send("late").is_err());

        let mut a_closed = 0;
        while let Ok(event) = a_rx.try_recv() {
            if matches!(event, TransportEvent::Closed { .. }) {
                a_closed += 1;
            }
        }
        let mut b_closed = 0;
        while let Ok(event) = b_rx.try_recv() {
            if matches!(event, TransportEvent::Closed { .. }) {
                b_closed += 1;
            }
        }
        assert_eq!(a_closed, 1);
        assert_eq!(b_closed, 1);
    }
}
