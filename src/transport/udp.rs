use std::net::SocketAddr;

use tokio::net::{lookup_host, ToSocketAddrs, UdpSocket};

use crate::codec::{Frame, FRAME_LEN};
use crate::common::FrameError;
use crate::transport::Transport;

/// Receive buffer; anything past the first two bytes of a datagram is ignored.
const RECV_BUF: usize = 16;

/// Sent on close. Too short to be a frame, so the peer's `recv` fails on it.
const CLOSE_NOTICE: [u8; 1] = [0];

/// One frame per datagram. UDP does not retransmit, so this carrier suits
/// links that do not drop or reorder datagrams; a lost frame surfaces as a
/// read timeout when wrapped in [`ReadTimeout`](crate::transport::timeout::ReadTimeout).
///
/// Setup: the joiner sends one empty "hello" datagram so the host learns
/// where to reply. Empty datagrams are skipped afterwards. Closing sends a
/// one-byte notice the peer reads as a malformed frame.
pub struct UdpTransport {
    socket: UdpSocket,
    peer: SocketAddr,
    closed: bool,
}

impl UdpTransport {
    /// Wait on a bound socket for the joiner's hello and lock onto its source.
    pub async fn accept(socket: UdpSocket) -> anyhow::Result<Self> {
        let mut buf = [0u8; RECV_BUF];
        let (_, peer) = socket.recv_from(&mut buf).await?;
        socket.connect(peer).await?;
        Ok(Self {
            socket,
            peer,
            closed: false,
        })
    }

    /// Bind an ephemeral port, connect to `remote` and send the hello.
    pub async fn connect<A: ToSocketAddrs>(remote: A) -> anyhow::Result<Self> {
        let peer = lookup_host(remote)
            .await?
            .next()
            .ok_or_else(|| anyhow::anyhow!("No address to connect to"))?;
        let local = if peer.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(peer).await?;
        socket.send(&[]).await?;
        Ok(Self {
            socket,
            peer,
            closed: false,
        })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }
}

#[async_trait::async_trait]
impl Transport for UdpTransport {
    async fn send(&mut self, frame: Frame) -> anyhow::Result<()> {
        if self.closed {
            return Err(anyhow::anyhow!("Transport is closed"));
        }
        self.socket.send(frame.as_bytes()).await?;
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Frame> {
        let mut buf = [0u8; RECV_BUF];
        loop {
            if self.closed {
                return Err(anyhow::anyhow!("Transport is closed"));
            }
            let n = self.socket.recv(&mut buf).await?;
            match n {
                0 => continue,
                n if n < FRAME_LEN => {
                    return Err(anyhow::Error::new(FrameError::Malformed { len: n }))
                }
                _ => return Ok(Frame::from_bytes([buf[0], buf[1]])),
            }
        }
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        // The peer may already be gone; nothing is left to tell it then.
        if let Err(e) = self.socket.send(&CLOSE_NOTICE).await {
            log::debug!("close notice to {} not sent: {}", self.peer, e);
        }
        Ok(())
    }
}
