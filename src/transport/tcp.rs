use std::io::ErrorKind;
use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::codec::{Frame, FRAME_LEN};
use crate::common::FrameError;
use crate::transport::Transport;

/// Frames over a TCP stream: exactly two bytes each, no extra framing.
pub struct TcpTransport {
    stream: TcpStream,
    closed: bool,
}

impl TcpTransport {
    /// Wrap an accepted or connected stream.
    pub fn new(stream: TcpStream) -> Self {
        // Frames are tiny and strictly alternating.
        let _ = stream.set_nodelay(true);
        Self {
            stream,
            closed: false,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    pub fn peer_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.stream.peer_addr()?)
    }
}

fn io_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        ErrorKind::BrokenPipe | ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted => {
            anyhow::anyhow!("Connection closed by peer")
        }
        _ => anyhow::anyhow!("Socket error: {}", e),
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, frame: Frame) -> anyhow::Result<()> {
        if self.closed {
            return Err(anyhow::anyhow!("Transport is closed"));
        }
        self.stream.write_all(frame.as_bytes()).await.map_err(io_error)
    }

    async fn recv(&mut self) -> anyhow::Result<Frame> {
        if self.closed {
            return Err(anyhow::anyhow!("Transport is closed"));
        }
        let mut buf = [0u8; FRAME_LEN];
        let mut filled = 0;
        while filled < FRAME_LEN {
            let n = self.stream.read(&mut buf[filled..]).await.map_err(io_error)?;
            if n == 0 {
                return Err(anyhow::Error::new(FrameError::Malformed { len: filled })
                    .context("Connection closed by peer"));
            }
            filled += n;
        }
        Ok(Frame::from_bytes(buf))
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.stream.shutdown().await.map_err(io_error)
    }
}
