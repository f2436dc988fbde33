use tokio::time::{timeout, Duration};

use crate::codec::Frame;
use crate::transport::Transport;

/// Transport wrapper that bounds how long a `recv` may wait.
///
/// The frame format leaves no room for keep-alive traffic, so a silent peer
/// can only be detected by giving up on it. Once the deadline passes the
/// wrapper reports an error and the match is aborted.
pub struct ReadTimeout<T: Transport> {
    inner: T,
    limit: Duration,
    shutdown: bool,
}

impl<T: Transport> ReadTimeout<T> {
    pub fn new(inner: T, limit: Duration) -> Self {
        Self {
            inner,
            limit,
            shutdown: false,
        }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown
    }
}

#[async_trait::async_trait]
impl<T: Transport> Transport for ReadTimeout<T> {
    async fn send(&mut self, frame: Frame) -> anyhow::Result<()> {
        if self.shutdown {
            return Err(anyhow::anyhow!("Transport is shut down"));
        }
        self.inner.send(frame).await
    }

    async fn recv(&mut self) -> anyhow::Result<Frame> {
        if self.shutdown {
            return Err(anyhow::anyhow!("Transport is shut down"));
        }
        match timeout(self.limit, self.inner.recv()).await {
            Ok(res) => res,
            Err(_) => {
                log::warn!("no frame from peer within {:?}", self.limit);
                Err(anyhow::anyhow!(
                    "Read timeout: no frame within {:?}",
                    self.limit
                ))
            }
        }
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.shutdown = true;
        self.inner.close().await
    }
}
