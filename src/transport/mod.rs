use crate::codec::Frame;

/// Carrier for 2-byte frames. Implementations must deliver frames in order
/// and keep their boundaries.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, frame: Frame) -> anyhow::Result<()>;

    /// Wait for the next frame. Any error ends the match.
    async fn recv(&mut self) -> anyhow::Result<Frame>;

    /// Close the channel; the peer's next `recv` fails.
    async fn close(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&mut self, frame: Frame) -> anyhow::Result<()> {
        (**self).send(frame).await
    }

    async fn recv(&mut self) -> anyhow::Result<Frame> {
        (**self).recv().await
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        (**self).close().await
    }
}

pub mod in_memory;
pub mod tcp;
pub mod timeout;
pub mod udp;
