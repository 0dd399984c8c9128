//! UDP session with the console
//!
//! Sends value queries for every subscribed address, decodes inbound
//! datagrams and forwards each report to the tree actor. Local writes go
//! out to the device and into the tree optimistically. Reconnect policy is
//! left to the caller.

use crate::osc;
use crate::state::{LeafValue, TreeHandle};
use crate::variables::Subscription;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::net::{lookup_host, UdpSocket};
use tracing::{debug, info, trace, warn};

/// Largest datagram the console sends
const MAX_DATAGRAM: usize = 65_536;

pub struct Session {
    socket: UdpSocket,
    device: SocketAddr,
    tree: TreeHandle,
    buf: Vec<u8>,
}

impl Session {
    /// Bind a local socket and resolve the console address
    pub async fn connect(device_addr: &str, local_port: u16, tree: TreeHandle) -> Result<Self> {
        let device = lookup_host(device_addr)
            .await
            .with_context(|| format!("Failed to resolve console address: {}", device_addr))?
            .next()
            .with_context(|| format!("No address found for console: {}", device_addr))?;

        let bind_addr: SocketAddr = if device.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], local_port))
        } else {
            SocketAddr::from(([0u16; 8], local_port))
        };
        let socket = UdpSocket::bind(bind_addr)
            .await
            .with_context(|| format!("Failed to bind UDP socket on {}", bind_addr))?;

        info!(
            "Console session opened ({} -> {})",
            socket.local_addr()?,
            device
        );

        Ok(Self {
            socket,
            device,
            tree,
            buf: vec![0u8; MAX_DATAGRAM],
        })
    }

    pub fn device(&self) -> SocketAddr {
        self.device
    }

    /// Ask the console for the current value of every subscription
    pub async fn query_all(&self, subscriptions: &[Subscription]) -> Result<usize> {
        for sub in subscriptions {
            let packet = osc::encode_query(&sub.address)?;
            self.socket
                .send_to(&packet, self.device)
                .await
                .with_context(|| format!("Failed to send query for {}", sub.address))?;
        }
        debug!(count = subscriptions.len(), "Queried console for subscriptions");
        Ok(subscriptions.len())
    }

    /// Write a value to the console and mirror it locally
    pub async fn send_set(
        &self,
        address: &str,
        value: impl Into<LeafValue>,
    ) -> Result<Option<LeafValue>> {
        let value = value.into();
        let previous = self.tree.set(address, value.clone()).await?;
        let packet = osc::encode_set(address, &value)?;
        self.socket
            .send_to(&packet, self.device)
            .await
            .with_context(|| format!("Failed to send {} to console", address))?;
        trace!(address, %value, "Sent value to console");
        Ok(previous)
    }

    /// Receive one datagram and forward its reports; returns how many
    ///
    /// Datagrams from other peers and undecodable packets are dropped.
    pub async fn recv(&mut self) -> Result<usize> {
        let (len, peer) = self
            .socket
            .recv_from(&mut self.buf)
            .await
            .context("Failed to receive from console")?;

        if peer.ip() != self.device.ip() {
            trace!(%peer, "Ignoring datagram from unknown peer");
            return Ok(0);
        }

        let reports = match osc::decode_packet(&self.buf[..len]) {
            Ok(reports) => reports,
            Err(e) => {
                warn!(%peer, error = %e, "Dropping undecodable datagram");
                return Ok(0);
            }
        };

        let count = reports.len();
        for report in reports {
            self.tree.feedback(report.address, report.value);
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::channel;
    use crate::model::FULL;
    use crate::osc::WireValue;
    use crate::state::{StateTree, TreeActor};
    use rosc::{encoder, OscMessage, OscPacket, OscType};

    #[tokio::test]
    async fn test_feedback_reaches_tree() {
        let console = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let console_addr = console.local_addr().unwrap();

        let tree = TreeActor::spawn(StateTree::new(&FULL));
        let mut session = Session::connect(&console_addr.to_string(), 0, tree.clone())
            .await
            .unwrap();

        // Query arrives at the fake console
        let subs = vec![Subscription {
            name: "ch1_fdr".to_string(),
            address: channel::fader(1),
        }];
        session.query_all(&subs).await.unwrap();
        let mut buf = [0u8; 1024];
        let (len, session_addr) = console.recv_from(&mut buf).await.unwrap();
        assert!(osc::decode_packet(&buf[..len]).unwrap().is_empty());

        // Console answers with the value
        let reply = encoder::encode(&OscPacket::Message(OscMessage {
            addr: channel::fader(1),
            args: vec![OscType::Float(-10.0)],
        }))
        .unwrap();
        console.send_to(&reply, session_addr).await.unwrap();

        assert_eq!(session.recv().await.unwrap(), 1);
        assert_eq!(
            tree.get(channel::fader(1)).await.unwrap(),
            Some(LeafValue::Number(-10.0))
        );
    }

    #[tokio::test]
    async fn test_send_set_updates_tree_and_device() {
        let console = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let console_addr = console.local_addr().unwrap();

        let tree = TreeActor::spawn(StateTree::new(&FULL));
        let session = Session::connect(&console_addr.to_string(), 0, tree.clone())
            .await
            .unwrap();

        assert_eq!(session.send_set(&channel::mute(2), true).await.unwrap(), None);

        let mut buf = [0u8; 1024];
        let (len, _) = console.recv_from(&mut buf).await.unwrap();
        let sent = osc::decode_packet(&buf[..len]).unwrap();
        assert_eq!(sent[0].address, "/ch/2/mute");
        assert_eq!(sent[0].value, WireValue::Int(1));

        assert_eq!(
            tree.get(channel::mute(2)).await.unwrap(),
            Some(LeafValue::Bool(true))
        );
    }

    #[tokio::test]
    async fn test_send_set_rejects_unknown_address() {
        let tree = TreeActor::spawn(StateTree::new(&FULL));
        let session = Session::connect("127.0.0.1:9", 0, tree).await.unwrap();
        assert!(session.send_set("/ch/1/send/1/fdr", -3.0).await.is_err());
    }
}
